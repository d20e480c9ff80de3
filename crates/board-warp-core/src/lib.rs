//! Geometry core for board rectification.
//!
//! This crate is intentionally small and purely geometric. It does *not*
//! depend on any concrete image decoding or processing library: rasters are
//! plain row-major buffers described by [`ImageView`].

mod corners;
mod homography;
mod image;
mod logger;
mod polygon;

pub use corners::{order_corners, CornerPosition};
pub use homography::{homography_from_4pt, rect_corners, warp_perspective, Homography};
pub use image::{sample_bilinear, sample_bilinear_u8, Image, ImageView};
pub use polygon::{approx_poly_dp, arc_length, compress_chain, polygon_area};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
