use std::path::Path;

use board_warp_core::{
    homography_from_4pt, order_corners, rect_corners, warp_perspective, Homography, ImageView,
};
use image::{DynamicImage, GrayImage, ImageError, ImageReader, RgbImage};
use log::{debug, info};
use nalgebra::Point2;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::contours::{rank_by_area, select_quadrilateral, trace_contours};
use crate::edges::edge_map;
use crate::{LocateError, LocatorParams, OutputSize};

/// Successful rectification of one image.
#[derive(Clone, Debug)]
pub struct BoardRectification {
    /// Board corners in the source image, `[top-left, top-right, bottom-right, bottom-left]`.
    pub corners: [Point2<f32>; 4],
    /// Maps source pixels onto the rectified frame.
    pub h_rect_from_img: Homography,
    /// Top-down color image of exactly the requested output size.
    pub image: RgbImage,
}

/// Finds the dominant quadrilateral in a photo and warps it to a fixed-size frame.
#[derive(Clone, Debug, Default)]
pub struct BoardLocator {
    params: LocatorParams,
}

impl BoardLocator {
    pub fn new(params: LocatorParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &LocatorParams {
        &self.params
    }

    /// Ordered board corners of a grayscale image.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip(self, gray), fields(width = gray.width(), height = gray.height()))
    )]
    pub fn find_corners(&self, gray: &GrayImage) -> Result<[Point2<f32>; 4], LocateError> {
        if gray.width() == 0 || gray.height() == 0 {
            return Err(LocateError::NoQuadrilateralFound { contours: 0 });
        }
        let edges = edge_map(gray, &self.params);
        let contours = trace_contours(&edges);
        debug!("found {} contours", contours.len());
        if contours.is_empty() {
            return Err(LocateError::NoQuadrilateralFound { contours: 0 });
        }

        let ranked = rank_by_area(contours);
        if let Some(top) = ranked.first() {
            debug!(
                "largest contour: area={:.1} vertices={}",
                top.area,
                top.points.len()
            );
        }
        let quad = select_quadrilateral(&ranked, self.params.approx_epsilon_rel).ok_or(
            LocateError::NoQuadrilateralFound {
                contours: ranked.len(),
            },
        )?;

        let corners = order_corners(&quad);
        info!("ordered board corners: {}", format_corners(&corners));
        Ok(corners)
    }

    /// Detect and rectify the board in a color image.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, img), fields(width = img.width(), height = img.height()))
    )]
    pub fn locate_rgb(&self, img: &RgbImage) -> Result<BoardRectification, LocateError> {
        let gray = image::imageops::grayscale(img);
        let corners = self.find_corners(&gray)?;
        let rect = rectify(img, &corners, self.params.output_size)?;
        info!(
            "board warped to top-down view ({}x{})",
            rect.image.width(),
            rect.image.height()
        );
        Ok(rect)
    }

    /// Same as [`BoardLocator::locate_rgb`]; alpha and extra precision are dropped.
    pub fn locate(&self, img: &DynamicImage) -> Result<BoardRectification, LocateError> {
        self.locate_rgb(&img.to_rgb8())
    }

    /// Decode an image file and rectify it.
    pub fn locate_path(&self, path: &Path) -> Result<BoardRectification, LocateError> {
        info!("processing image: {}", path.display());
        let img = ImageReader::open(path)
            .map_err(ImageError::IoError)?
            .with_guessed_format()
            .map_err(ImageError::IoError)?
            .decode()?;
        self.locate(&img)
    }

    /// Decode an in-memory encoded image (PNG, JPEG, BMP, ...) and rectify it.
    pub fn locate_bytes(&self, bytes: &[u8]) -> Result<BoardRectification, LocateError> {
        let img = image::load_from_memory(bytes)?;
        self.locate(&img)
    }
}

/// Warp the quadrilateral `corners` (ordered TL, TR, BR, BL) of `src` onto an
/// `output_size` raster whose corners are `(0,0)` .. `(W-1,H-1)`.
pub fn rectify(
    src: &RgbImage,
    corners: &[Point2<f32>; 4],
    output_size: OutputSize,
) -> Result<BoardRectification, LocateError> {
    let OutputSize { width, height } = output_size;
    if width == 0 || height == 0 {
        return Err(LocateError::InvalidDimensions { width, height });
    }
    let (out_w, out_h) = (width as usize, height as usize);

    let dst = rect_corners(out_w, out_h);
    let h_rect_from_img =
        homography_from_4pt(corners, &dst).ok_or(LocateError::DegenerateQuadrilateral)?;
    let h_img_from_rect = h_rect_from_img
        .inverse()
        .ok_or(LocateError::DegenerateQuadrilateral)?;

    let warped = warp_perspective(&rgb_view(src), h_img_from_rect, out_w, out_h);
    let image = RgbImage::from_raw(width, height, warped.into_raw())
        .ok_or(LocateError::InvalidDimensions { width, height })?;

    Ok(BoardRectification {
        corners: *corners,
        h_rect_from_img,
        image,
    })
}

/// Borrow an `image::RgbImage` as a core raster view.
pub fn rgb_view(img: &RgbImage) -> ImageView<'_> {
    ImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        channels: 3,
        data: img.as_raw(),
    }
}

/// Build an `image::RgbImage` from a raw interleaved RGB buffer.
pub fn rgb_image_from_slice(
    width: u32,
    height: u32,
    pixels: &[u8],
) -> Result<RgbImage, LocateError> {
    if width == 0 || height == 0 {
        return Err(LocateError::InvalidDimensions { width, height });
    }
    let w = usize::try_from(width).ok();
    let h = usize::try_from(height).ok();
    let Some((w, h)) = w.zip(h) else {
        return Err(LocateError::InvalidDimensions { width, height });
    };
    let Some(expected) = w.checked_mul(h).and_then(|n| n.checked_mul(3)) else {
        return Err(LocateError::InvalidDimensions { width, height });
    };
    if pixels.len() != expected {
        return Err(LocateError::InvalidBuffer {
            expected,
            got: pixels.len(),
        });
    }
    RgbImage::from_raw(width, height, pixels.to_vec())
        .ok_or(LocateError::InvalidDimensions { width, height })
}

fn format_corners(c: &[Point2<f32>; 4]) -> String {
    c.iter()
        .map(|p| format!("({:.1}, {:.1})", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn p(x: f32, y: f32) -> Point2<f32> {
        Point2::new(x, y)
    }

    #[test]
    fn rectify_identity_quad_copies_source() {
        let mut src = RgbImage::new(16, 12);
        for (x, y, px) in src.enumerate_pixels_mut() {
            *px = Rgb([(x * 10) as u8, (y * 20) as u8, 7]);
        }
        let corners = [p(0.0, 0.0), p(15.0, 0.0), p(15.0, 11.0), p(0.0, 11.0)];
        let out = rectify(&src, &corners, OutputSize::new(16, 12)).expect("rectify");
        assert_eq!(out.image.dimensions(), (16, 12));
        assert_eq!(out.image, src);
    }

    #[test]
    fn rectify_sub_quad_scales_up() {
        let mut src = RgbImage::from_pixel(40, 40, Rgb([0, 0, 0]));
        for y in 10..30 {
            for x in 10..30 {
                src.put_pixel(x, y, Rgb([200, 100, 50]));
            }
        }
        let corners = [p(10.0, 10.0), p(29.0, 10.0), p(29.0, 29.0), p(10.0, 29.0)];
        let out = rectify(&src, &corners, OutputSize::new(100, 60)).expect("rectify");
        assert_eq!(out.image.dimensions(), (100, 60));
        assert!(out.image.pixels().all(|px| *px == Rgb([200, 100, 50])));
    }

    #[test]
    fn zero_output_size_is_rejected() {
        let src = RgbImage::new(4, 4);
        let corners = [p(0.0, 0.0), p(3.0, 0.0), p(3.0, 3.0), p(0.0, 3.0)];
        let err = rectify(&src, &corners, OutputSize::new(0, 10)).unwrap_err();
        assert!(matches!(err, LocateError::InvalidDimensions { width: 0, height: 10 }));
    }

    #[test]
    fn collinear_corners_are_degenerate() {
        let src = RgbImage::new(4, 4);
        let corners = [p(0.0, 0.0), p(1.0, 1.0), p(2.0, 2.0), p(3.0, 3.0)];
        let err = rectify(&src, &corners, OutputSize::default()).unwrap_err();
        assert!(matches!(err, LocateError::DegenerateQuadrilateral));
    }

    #[test]
    fn raw_buffer_length_is_checked() {
        let err = rgb_image_from_slice(4, 2, &[0u8; 23]).unwrap_err();
        assert!(matches!(
            err,
            LocateError::InvalidBuffer {
                expected: 24,
                got: 23
            }
        ));
        let img = rgb_image_from_slice(4, 2, &[9u8; 24]).expect("valid buffer");
        assert_eq!(img.get_pixel(3, 1), &Rgb([9, 9, 9]));
    }

    #[test]
    fn raw_buffer_with_zero_extent_is_rejected() {
        for (w, h) in [(0, 0), (0, 5), (5, 0)] {
            let err = rgb_image_from_slice(w, h, &[]).unwrap_err();
            assert!(
                matches!(err, LocateError::InvalidDimensions { width, height } if (width, height) == (w, h)),
                "{err:?}"
            );
        }
    }

    #[test]
    fn empty_and_tiny_rasters_have_no_quadrilateral() {
        let locator = BoardLocator::default();
        for (w, h) in [(0, 0), (0, 7), (7, 0), (1, 1), (3, 1), (1, 7), (5, 5)] {
            let err = locator.locate_rgb(&RgbImage::new(w, h)).unwrap_err();
            assert!(
                matches!(err, LocateError::NoQuadrilateralFound { contours: 0 }),
                "{w}x{h}: {err:?}"
            );
        }
    }
}
