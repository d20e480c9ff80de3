use serde::{Deserialize, Serialize};

/// Size of the rectified output raster in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSize {
    pub width: u32,
    pub height: u32,
}

impl OutputSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for OutputSize {
    fn default() -> Self {
        Self::new(800, 800)
    }
}

/// Configuration for [`crate::BoardLocator`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorParams {
    /// Size of the rectified image.
    pub output_size: OutputSize,
    /// Side of the square Gaussian kernel used to denoise before edge detection.
    ///
    /// The blur sigma is derived from it, see [`LocatorParams::blur_sigma`].
    pub blur_kernel_size: u32,
    /// Canny hysteresis thresholds.
    pub canny_low: f32,
    pub canny_high: f32,
    /// Dilate/erode rounds (3x3 square element) used to close gaps in the edge map.
    pub close_iterations: u8,
    /// Polygon approximation tolerance as a fraction of the contour perimeter.
    pub approx_epsilon_rel: f64,
}

impl Default for LocatorParams {
    fn default() -> Self {
        Self {
            output_size: OutputSize::default(),
            blur_kernel_size: 5,
            canny_low: 50.0,
            canny_high: 150.0,
            close_iterations: 2,
            approx_epsilon_rel: 0.02,
        }
    }
}

impl LocatorParams {
    /// Same parameters with a different output size.
    pub fn with_output_size(mut self, width: u32, height: u32) -> Self {
        self.output_size = OutputSize::new(width, height);
        self
    }

    /// Gaussian sigma matching a `k×k` kernel: `0.3·((k−1)·0.5 − 1) + 0.8`.
    pub fn blur_sigma(&self) -> f32 {
        let k = self.blur_kernel_size as f32;
        (0.3 * ((k - 1.0) * 0.5 - 1.0) + 0.8).max(0.1)
    }
}
