/// Reasons a single image could not be rectified.
///
/// `Load` and `NoQuadrilateralFound` are the two ordinary outcomes a batch
/// driver sees; both are terminal for that image only.
#[derive(thiserror::Error, Debug)]
pub enum LocateError {
    #[error("failed to load image: {0}")]
    Load(#[from] image::ImageError),

    #[error("no quadrilateral contour found ({contours} contours examined)")]
    NoQuadrilateralFound { contours: usize },

    #[error("board corners do not define an invertible perspective map")]
    DegenerateQuadrilateral,

    #[error("invalid RGB image buffer length (expected {expected} bytes, got {got})")]
    InvalidBuffer { expected: usize, got: usize },

    #[error("invalid image dimensions (width={width}, height={height})")]
    InvalidDimensions { width: u32, height: u32 },
}

impl LocateError {
    /// True when the input raster itself could not be read.
    pub fn is_load_failure(&self) -> bool {
        matches!(self, LocateError::Load(_))
    }
}
