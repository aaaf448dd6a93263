//! Testkeeper Common Library
//!
//! Shared infrastructure for the testkeeper UI test suite: the artifact
//! directory layout, suite configuration, the per-run logging context,
//! and the retention-based artifact cleanup.

pub mod artifacts;
pub mod config;
pub mod error;
pub mod logging;
pub mod retention;

// Re-export commonly used types
pub use artifacts::ArtifactLayout;
pub use config::SuiteConfig;
pub use error::{Error, Result};
pub use logging::{LogContext, LogOptions};
pub use retention::{EntryOutcome, RetentionCleaner, SweepEntry, SweepReport};

/// Testkeeper version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
