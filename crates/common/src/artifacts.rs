//! Artifact directory layout for the test suite
//!
//! Every generated output lands in one of two trees: HTML reports in
//! `reports/` (with failure screenshots in `reports/screenshots/`) and
//! per-run logs in `logs/`. The report plugin, the browser driver, and
//! the cleanup tooling all share this layout.

use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::Result;

/// Timestamp format used in generated artifact file names
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Name of the screenshot subtree inside the reports tree
pub const SCREENSHOTS_DIR: &str = "screenshots";

/// Directory layout for generated test artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLayout {
    reports_dir: PathBuf,
    logs_dir: PathBuf,
}

impl ArtifactLayout {
    /// Create a layout rooted at the given suite directory
    pub fn new(base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        Self {
            reports_dir: base.join("reports"),
            logs_dir: base.join("logs"),
        }
    }

    /// Create a layout from explicit tree roots
    pub fn with_dirs(reports_dir: impl Into<PathBuf>, logs_dir: impl Into<PathBuf>) -> Self {
        Self {
            reports_dir: reports_dir.into(),
            logs_dir: logs_dir.into(),
        }
    }

    /// Root of the reports tree
    pub fn reports_dir(&self) -> &Path {
        &self.reports_dir
    }

    /// Root of the logs tree
    pub fn logs_dir(&self) -> &Path {
        &self.logs_dir
    }

    /// Screenshot directory nested under the reports tree
    pub fn screenshots_dir(&self) -> PathBuf {
        self.reports_dir.join(SCREENSHOTS_DIR)
    }

    /// Create the reports, screenshots, and logs directories if absent
    pub fn ensure(&self) -> Result<()> {
        std::fs::create_dir_all(&self.reports_dir)?;
        std::fs::create_dir_all(self.screenshots_dir())?;
        std::fs::create_dir_all(&self.logs_dir)?;
        Ok(())
    }

    /// Timestamped HTML report path, e.g. `reports/report_20240101_120000.html`
    pub fn report_path(&self, prefix: &str) -> PathBuf {
        self.reports_dir.join(format!("{}_{}.html", prefix, timestamp()))
    }

    /// Timestamped screenshot path under the screenshots subtree
    pub fn screenshot_path(&self, name: &str) -> PathBuf {
        self.screenshots_dir()
            .join(format!("{}_{}.png", name, timestamp()))
    }

    /// Timestamped run log path, e.g. `logs/run_20240101_120000.log`
    pub fn log_path(&self, prefix: &str) -> PathBuf {
        self.logs_dir.join(format!("{}_{}.log", prefix, timestamp()))
    }
}

impl Default for ArtifactLayout {
    fn default() -> Self {
        Self::new(".")
    }
}

/// Current local time in the artifact naming format
pub(crate) fn timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}
