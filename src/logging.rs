//! Tracing subscriber for the qbot daemon.
//!
//! Two sinks: a human readable stream on stderr and a daily log file in the
//! platform data directory. The file sink is written by a background worker,
//! so the returned guard must live until exit.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE_PREFIX: &str = "qbot.log";

/// Install the global subscriber. Returns the file writer guard and the log
/// directory.
pub fn init(debug: bool) -> Result<(WorkerGuard, PathBuf)> {
    let log_dir = log_dir()?;
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Cannot create log directory {}", log_dir.display()))?;

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX));

    tracing_subscriber::registry()
        .with(filter(debug))
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .try_init()?;

    tracing::debug!("Writing logs to {}", log_dir.display());
    Ok((guard, log_dir))
}

/// `RUST_LOG` when set, otherwise info (debug with `--debug`/`QBOT_DEBUG`).
fn filter(debug: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if debug {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info,qbot=info")
        }
    })
}

/// Whether `QBOT_DEBUG` asks for debug logging.
pub fn debug_from_env() -> bool {
    std::env::var("QBOT_DEBUG")
        .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
        .unwrap_or(false)
}

fn log_dir() -> Result<PathBuf> {
    directories::ProjectDirs::from("com", "qbot", "qbot")
        .map(|dirs| dirs.data_dir().join("logs"))
        .context("No data directory available for logs")
}

/// Console-only subscriber for tests. Later calls are no-ops.
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::registry()
        .with(filter(true))
        .with(fmt::layer().with_test_writer())
        .try_init();
}
