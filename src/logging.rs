//! Logging initialization for updateflow.
//!
//! TUI mode: logs to `.updateflow/logs/updateflow-{datetime}.log` so the
//! terminal stays clean. CLI mode: logs to stderr.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

/// Keeps the file writer alive; drop it last so buffered lines are flushed
pub struct LoggingHandle {
    pub _guard: Option<WorkerGuard>,

    /// Set only when logging to a file
    pub log_file_path: Option<PathBuf>,
}

/// Where log lines go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    File(PathBuf),
    Stderr,
}

/// Pick the log destination for this run
pub fn log_target(config: &Config, is_tui_mode: bool, now: DateTime<Utc>) -> LogTarget {
    if is_tui_mode && config.logging.to_file {
        LogTarget::File(config.logs_path().join(log_file_name(now)))
    } else {
        LogTarget::Stderr
    }
}

/// Log file name with an ISO8601 basic-format timestamp
pub fn log_file_name(now: DateTime<Utc>) -> String {
    format!("updateflow-{}.log", now.format("%Y%m%dT%H%M%SZ"))
}

/// Level directive: `RUST_LOG` wins, then `--debug`, then the config
fn filter_directive(config: &Config, debug_override: bool, rust_log: Option<String>) -> String {
    rust_log.unwrap_or_else(|| {
        if debug_override {
            "debug".to_string()
        } else {
            config.logging.level.clone()
        }
    })
}

pub fn init_logging(
    config: &Config,
    is_tui_mode: bool,
    debug_override: bool,
) -> Result<LoggingHandle> {
    let directive = filter_directive(config, debug_override, std::env::var("RUST_LOG").ok());
    let filter = EnvFilter::new(directive);

    match log_target(config, is_tui_mode, Utc::now()) {
        LogTarget::File(path) => {
            let (dir, file_name) = split_log_path(&path)?;
            std::fs::create_dir_all(&dir).context("Failed to create logs directory")?;

            let file_appender = tracing_appender::rolling::never(&dir, &file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(non_blocking),
                )
                .init();

            Ok(LoggingHandle {
                _guard: Some(guard),
                log_file_path: Some(path),
            })
        }
        LogTarget::Stderr => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_writer(std::io::stderr),
                )
                .init();

            Ok(LoggingHandle {
                _guard: None,
                log_file_path: None,
            })
        }
    }
}

fn split_log_path(path: &Path) -> Result<(PathBuf, String)> {
    let dir = path
        .parent()
        .context("Log file path has no parent directory")?
        .to_path_buf();
    let file_name = path
        .file_name()
        .context("Log file path has no file name")?
        .to_string_lossy()
        .to_string();
    Ok((dir, file_name))
}
