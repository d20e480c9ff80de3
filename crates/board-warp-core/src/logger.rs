//! Minimal stderr logger.
//!
//! Lines look like `[  0.012s  INFO board_warp] message`: elapsed time since
//! installation, level, and the crate that emitted the record. Install it
//! once at startup with [`init_with_level`].

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

struct StderrLogger {
    level: LevelFilter,
    started: Instant,
}

fn crate_of(target: &str) -> &str {
    target.split("::").next().unwrap_or(target)
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let elapsed = self.started.elapsed().as_secs_f64();
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(
            stderr,
            "[{:7.3}s {:>5} {}] {}",
            elapsed,
            record.level(),
            crate_of(record.target()),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

/// Install the stderr logger with the provided level filter.
///
/// Calling this more than once is a no-op after the first successful
/// initialization.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_none() {
        let logger = LOGGER.get_or_init(|| StderrLogger {
            level,
            started: Instant::now(),
        });
        log::set_logger(logger)?;
        log::set_max_level(level);
    }
    Ok(())
}

/// Install a `tracing` subscriber filtered by `RUST_LOG`, or by `level`
/// when `RUST_LOG` is unset or invalid.
///
/// `log` records from the workspace are forwarded into the subscriber.
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool, level: LevelFilter) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_directive(level)));
    if json {
        let _ = fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .json()
            .flatten_event(true)
            .finish()
            .try_init();
    } else {
        let _ = fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .with_timer(fmt::time::Uptime::default())
            .finish()
            .try_init();
    }
}

#[cfg(feature = "tracing")]
fn level_directive(level: LevelFilter) -> String {
    level.as_str().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::crate_of;

    #[test]
    fn target_is_trimmed_to_crate() {
        assert_eq!(crate_of("board_warp::locate"), "board_warp");
        assert_eq!(crate_of("board_warp_core"), "board_warp_core");
    }

    #[cfg(feature = "tracing")]
    #[test]
    fn log_level_becomes_the_fallback_filter() {
        use super::level_directive;
        use log::LevelFilter;
        use tracing_subscriber::filter::LevelFilter as TracingLevel;
        use tracing_subscriber::EnvFilter;

        let cases = [
            (LevelFilter::Error, TracingLevel::ERROR),
            (LevelFilter::Warn, TracingLevel::WARN),
            (LevelFilter::Debug, TracingLevel::DEBUG),
            (LevelFilter::Trace, TracingLevel::TRACE),
        ];
        for (level, expected) in cases {
            let filter = EnvFilter::new(level_directive(level));
            assert_eq!(filter.max_level_hint(), Some(expected), "{level}");
        }
    }
}
