//! Per-run logging context
//!
//! Every process run logs to stdout and to a timestamped file under the
//! logs tree. The context is constructed once at startup and held by the
//! caller until exit; construction installs the global subscriber, so a
//! second call in the same process is an error.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::artifacts;
use crate::error::{Error, Result};

/// Options for building a [`LogContext`]
#[derive(Debug, Clone)]
pub struct LogOptions {
    /// Directory the run log file is created in
    pub logs_dir: PathBuf,

    /// Default level filter when `RUST_LOG` is unset
    pub level: String,

    /// ANSI colors on the stdout layer
    pub ansi: bool,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            logs_dir: PathBuf::from("logs"),
            level: "info".to_string(),
            ansi: true,
        }
    }
}

/// Handle to the installed logging pipeline
#[derive(Debug)]
pub struct LogContext {
    log_file: PathBuf,
}

impl LogContext {
    /// Create the logs directory, open this run's log file, and install
    /// stdout + file logging
    pub fn init(options: LogOptions) -> Result<Self> {
        std::fs::create_dir_all(&options.logs_dir)?;

        let log_file = options
            .logs_dir
            .join(format!("run_{}.log", artifacts::timestamp()));
        let file = File::create(&log_file)?;

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(options.level.clone()));

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_ansi(options.ansi))
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Arc::new(file)),
            )
            .try_init()
            .map_err(|e| Error::Logging(e.to_string()))?;

        Ok(Self { log_file })
    }

    /// Path of this run's log file
    pub fn log_file(&self) -> &Path {
        &self.log_file
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_run_log_and_rejects_reinit() {
        let tmp = TempDir::new().unwrap();
        let logs_dir = tmp.path().join("logs");

        let ctx = LogContext::init(LogOptions {
            logs_dir: logs_dir.clone(),
            ..LogOptions::default()
        })
        .unwrap();

        assert!(ctx.log_file().exists());
        let name = ctx.log_file().file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("run_"));
        assert!(name.ends_with(".log"));

        tracing::info!("logging context test line");

        // The global subscriber is already installed
        let again = LogContext::init(LogOptions {
            logs_dir,
            ..LogOptions::default()
        });
        assert!(matches!(again, Err(Error::Logging(_))));
    }
}
