//! Directory driver: rectify every image in a folder and save the results.

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use image::ImageFormat;
use log::{info, warn};
use serde::Serialize;

use crate::BoardLocator;

/// Extensions picked up from the input directory, matched exactly as written.
pub const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "bmp"];

/// Setup failures that abort a batch run.
#[derive(thiserror::Error, Debug)]
pub enum DriverError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Outcome of one image, as written to the JSON report.
#[derive(Clone, Debug, Serialize)]
pub struct ImageReport {
    pub image_path: String,
    pub output_path: Option<String>,
    /// `[top-left, top-right, bottom-right, bottom-left]` in source pixels.
    pub corners: Option<[[f32; 2]; 4]>,
    pub h_rect_from_img: Option<[[f64; 3]; 3]>,
    pub error: Option<String>,
}

/// Image files directly inside `dir`, grouped by [`IMAGE_EXTENSIONS`] order
/// and sorted by path within each group.
pub fn collect_images(dir: &Path) -> Result<Vec<PathBuf>, DriverError> {
    let io_err = |source| DriverError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() {
            files.push(path);
        }
    }

    let mut out = Vec::new();
    for ext in IMAGE_EXTENSIONS {
        let mut group: Vec<PathBuf> = files
            .iter()
            .filter(|p| p.extension() == Some(OsStr::new(ext)))
            .cloned()
            .collect();
        group.sort();
        out.extend(group);
    }
    Ok(out)
}

/// `<output_dir>/<stem>_cropped.jpg`.
pub fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    output_dir.join(format!("{stem}_cropped.jpg"))
}

/// Create `dir` (and parents) when missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), DriverError> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|source| DriverError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        info!("created output directory: {}", dir.display());
    }
    Ok(())
}

/// Rectify every image in `input_dir` into `output_dir`.
///
/// Per-image failures are logged, recorded in the returned reports and
/// skipped; only setup problems are returned as errors.
pub fn process_dir(
    locator: &BoardLocator,
    input_dir: &Path,
    output_dir: &Path,
) -> Result<Vec<ImageReport>, DriverError> {
    ensure_output_dir(output_dir)?;

    let images = collect_images(input_dir)?;
    info!("found {} images in {}", images.len(), input_dir.display());
    if images.is_empty() {
        info!("no images found in the specified directory");
        return Ok(Vec::new());
    }

    Ok(images
        .iter()
        .map(|path| process_one(locator, path, output_dir))
        .collect())
}

fn process_one(locator: &BoardLocator, path: &Path, output_dir: &Path) -> ImageReport {
    let mut report = ImageReport {
        image_path: path.display().to_string(),
        output_path: None,
        corners: None,
        h_rect_from_img: None,
        error: None,
    };

    let rect = match locator.locate_path(path) {
        Ok(rect) => rect,
        Err(err) => {
            warn!("skipping {}: {}", path.display(), err);
            report.error = Some(err.to_string());
            return report;
        }
    };
    report.corners = Some(rect.corners.map(|p| [p.x, p.y]));
    report.h_rect_from_img = Some(rect.h_rect_from_img.to_array());

    let out_path = output_path_for(path, output_dir);
    match rect.image.save_with_format(&out_path, ImageFormat::Jpeg) {
        Ok(()) => {
            info!("saved warped board to {}", out_path.display());
            report.output_path = Some(out_path.display().to_string());
        }
        Err(err) => {
            warn!("failed to write {}: {}", out_path.display(), err);
            report.error = Some(err.to_string());
        }
    }
    report
}

/// Write the per-image outcomes as pretty JSON.
pub fn write_report(path: &Path, reports: &[ImageReport]) -> Result<(), DriverError> {
    let json = serde_json::to_string_pretty(reports)?;
    fs::write(path, json).map_err(|source| DriverError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("wrote report JSON to {}", path.display());
    Ok(())
}
