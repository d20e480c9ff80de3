//! Grayscale preprocessing: denoise, Canny edges and morphological closing.

use image::GrayImage;
use imageproc::distance_transform::Norm;
use imageproc::edges::canny;
use imageproc::filter::gaussian_blur_f32;
use imageproc::morphology::{dilate, erode};

use crate::LocatorParams;

pub fn denoise(gray: &GrayImage, sigma: f32) -> GrayImage {
    gaussian_blur_f32(gray, sigma)
}

/// Binary (0/255) Canny edge map.
pub fn detect_edges(gray: &GrayImage, low: f32, high: f32) -> GrayImage {
    canny(gray, low, high)
}

/// Dilate then erode `iterations` times with a 3x3 square element.
///
/// `k` rounds of a 3x3 element equal one pass with a `(2k+1)` square, which
/// is what an L∞ radius of `k` gives.
pub fn close_gaps(edges: &GrayImage, iterations: u8) -> GrayImage {
    if iterations == 0 {
        return edges.clone();
    }
    let grown = dilate(edges, Norm::LInf, iterations);
    erode(&grown, Norm::LInf, iterations)
}

/// Full preprocessing chain: blur → Canny → closing.
pub fn edge_map(gray: &GrayImage, params: &LocatorParams) -> GrayImage {
    let blurred = denoise(gray, params.blur_sigma());
    let edges = detect_edges(&blurred, params.canny_low, params.canny_high);
    close_gaps(&edges, params.close_iterations)
}
