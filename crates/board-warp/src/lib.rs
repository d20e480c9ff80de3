//! Locate a board's quadrilateral outline in a photo and rectify it to a
//! fixed-size top-down image.
//!
//! ## Quickstart
//!
//! ```no_run
//! use board_warp::{BoardLocator, LocatorParams};
//! use image::ImageReader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = ImageReader::open("board.jpg")?.decode()?;
//! let locator = BoardLocator::new(LocatorParams::default().with_output_size(800, 800));
//!
//! let rect = locator.locate(&img)?;
//! println!("corners: {:?}", rect.corners);
//! rect.image.save("board_cropped.jpg")?;
//! # Ok(())
//! # }
//! ```
//!
//! Pipeline:
//! 1. Grayscale, Gaussian blur (5x5 equivalent), Canny (50, 150).
//! 2. Close edge gaps: dilate ×2 then erode ×2.
//! 3. Trace every contour (outer and hole borders), keep straight-run end points.
//! 4. Rank contours by area, largest first.
//! 5. Approximate each with Douglas-Peucker at 2% of its perimeter; take the
//!    first one with exactly 4 vertices.
//! 6. Order corners TL, TR, BR, BL by coordinate sum and difference.
//! 7. Map them onto `(0,0)..(W-1,H-1)` with a homography and resample the
//!    original color image.
//!
//! ## API map
//! - `board_warp::core`: geometry (corner ordering, polygons, homographies, warping).
//! - [`BoardLocator`]: the detection and rectification pipeline.
//! - [`batch`]: directory driver used by the `board-warp` binary.

pub use board_warp_core as core;

pub mod batch;
mod contours;
mod edges;
mod error;
mod locate;
mod params;

pub use contours::{rank_by_area, select_quadrilateral, trace_contours, RankedContour};
pub use edges::{close_gaps, denoise, detect_edges, edge_map};
pub use error::LocateError;
pub use locate::{rectify, rgb_image_from_slice, rgb_view, BoardLocator, BoardRectification};
pub use params::{LocatorParams, OutputSize};

pub use board_warp_core::{order_corners, Homography};
