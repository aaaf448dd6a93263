//! Suite configuration
//!
//! Read once at startup from a TOML file. Every section has defaults so
//! a missing file yields a usable configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::artifacts::ArtifactLayout;
use crate::error::Result;

/// Top-level suite configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Browser environment
    pub environment: EnvironmentConfig,

    /// Wait timeouts, in seconds
    pub timeouts: TimeoutConfig,

    /// Application under test
    pub urls: UrlConfig,

    /// Artifact tree roots
    pub artifacts: ArtifactConfig,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            environment: EnvironmentConfig::default(),
            timeouts: TimeoutConfig::default(),
            urls: UrlConfig::default(),
            artifacts: ArtifactConfig::default(),
        }
    }
}

/// Browser environment configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    /// Browser to drive ("chrome", "firefox", "edge")
    pub browser: String,

    /// Run the browser without a visible window
    pub headless: bool,

    /// Maximize the browser window after startup
    pub maximize_window: bool,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            browser: "chrome".to_string(),
            headless: false,
            maximize_window: true,
        }
    }
}

/// Wait timeout configuration, in seconds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Implicit wait applied to every element lookup
    pub implicit_wait: u64,

    /// Explicit wait used by page objects
    pub explicit_wait: u64,

    /// Page load timeout
    pub page_load_timeout: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            implicit_wait: 10,
            explicit_wait: 10,
            page_load_timeout: 30,
        }
    }
}

/// Application URL configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlConfig {
    /// Base URL of the application under test
    pub base_url: String,
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
        }
    }
}

/// Artifact tree configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactConfig {
    /// Root of the reports tree
    pub reports_dir: PathBuf,

    /// Root of the logs tree
    pub logs_dir: PathBuf,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            reports_dir: PathBuf::from("reports"),
            logs_dir: PathBuf::from("logs"),
        }
    }
}

impl SuiteConfig {
    /// Load configuration from file, falling back to defaults when absent
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Artifact layout derived from the configured tree roots
    pub fn artifact_layout(&self) -> ArtifactLayout {
        ArtifactLayout::with_dirs(
            self.artifacts.reports_dir.clone(),
            self.artifacts.logs_dir.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = SuiteConfig::default();
        assert_eq!(config.environment.browser, "chrome");
        assert!(!config.environment.headless);
        assert_eq!(config.timeouts.explicit_wait, 10);
        assert_eq!(config.timeouts.page_load_timeout, 30);
        assert_eq!(config.artifacts.reports_dir, PathBuf::from("reports"));
        assert_eq!(config.artifacts.logs_dir, PathBuf::from("logs"));
    }

    #[test]
    fn test_load_missing_file_yields_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = SuiteConfig::load(&tmp.path().join("nope.toml")).unwrap();
        assert_eq!(config.environment.browser, "chrome");
    }

    #[test]
    fn test_save_load_round_trip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config").join("suite.toml");

        let mut config = SuiteConfig::default();
        config.environment.browser = "firefox".to_string();
        config.environment.headless = true;
        config.artifacts.reports_dir = PathBuf::from("out/reports");

        config.save(&path).unwrap();
        let loaded = SuiteConfig::load(&path).unwrap();

        assert_eq!(loaded.environment.browser, "firefox");
        assert!(loaded.environment.headless);
        assert_eq!(loaded.artifacts.reports_dir, PathBuf::from("out/reports"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("suite.toml");
        std::fs::write(&path, "[environment]\nbrowser = \"edge\"\n").unwrap();

        let config = SuiteConfig::load(&path).unwrap();
        assert_eq!(config.environment.browser, "edge");
        assert_eq!(config.timeouts.implicit_wait, 10);
    }

    #[test]
    fn test_artifact_layout_derivation() {
        let mut config = SuiteConfig::default();
        config.artifacts.reports_dir = PathBuf::from("/srv/reports");
        config.artifacts.logs_dir = PathBuf::from("/srv/logs");

        let layout = config.artifact_layout();
        assert_eq!(layout.reports_dir(), Path::new("/srv/reports"));
        assert_eq!(layout.logs_dir(), Path::new("/srv/logs"));
    }
}
