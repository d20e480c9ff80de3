use std::path::PathBuf;

use board_warp::batch::{process_dir, write_report};
use board_warp::{BoardLocator, LocatorParams};
use clap::Parser;
use log::LevelFilter;

#[cfg(not(feature = "tracing"))]
use board_warp::core::init_with_level;
#[cfg(feature = "tracing")]
use board_warp::core::init_tracing;

/// Detect a board by contour detection, warp it to a top-down view and
/// export one JPEG per input image.
#[derive(Parser, Debug)]
#[command(name = "board-warp", version)]
struct Cli {
    /// Directory containing input images (.jpg, .jpeg, .png, .bmp).
    #[arg(long, alias = "input_dir", value_name = "DIR")]
    input_dir: PathBuf,

    /// Directory to save processed images; created when missing.
    #[arg(long, alias = "output_dir", value_name = "DIR")]
    output_dir: PathBuf,

    /// Width of the rectified image in pixels.
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Height of the rectified image in pixels.
    #[arg(long, default_value_t = 800)]
    height: u32,

    /// Log level (off, error, warn, info, debug, trace). With the `tracing`
    /// feature, `RUST_LOG` takes precedence when set.
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,

    /// Also write per-image results (corners, homography, errors) as JSON.
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    #[cfg(not(feature = "tracing"))]
    init_with_level(cli.log_level)?;
    #[cfg(feature = "tracing")]
    init_tracing(false, cli.log_level);

    run(&cli)
}

#[cfg_attr(feature = "tracing", tracing::instrument(level = "info", skip(cli)))]
fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let params = LocatorParams::default().with_output_size(cli.width, cli.height);
    let locator = BoardLocator::new(params);

    let reports = process_dir(&locator, &cli.input_dir, &cli.output_dir)?;
    let saved = reports.iter().filter(|r| r.output_path.is_some()).count();
    log::info!("rectified {saved} of {} images", reports.len());

    if let Some(path) = &cli.report {
        write_report(path, &reports)?;
    }
    Ok(())
}
