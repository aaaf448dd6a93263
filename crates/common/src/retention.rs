//! Retention cleanup for generated test artifacts
//!
//! Two entry points: an age-based sweep that removes reports,
//! screenshots, and logs older than a retention threshold, and a full
//! purge that empties both trees and recreates them. Neither aborts on a
//! single unreadable or undeletable entry; every visited entry's fate is
//! recorded in the returned report and logged.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

use crate::artifacts::{ArtifactLayout, SCREENSHOTS_DIR};

/// Fate of a single artifact entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryOutcome {
    /// Entry was removed
    Deleted,
    /// Entry was newer than the cutoff and left in place
    Kept,
    /// Entry could not be inspected or removed
    Failed(String),
}

/// One entry visited by a sweep or purge
#[derive(Debug, Clone, Serialize)]
pub struct SweepEntry {
    pub path: PathBuf,
    pub outcome: EntryOutcome,
}

/// Per-entry outcomes of one sweep or purge run
#[derive(Debug, Default, Serialize)]
pub struct SweepReport {
    pub entries: Vec<SweepEntry>,
}

impl SweepReport {
    /// Number of entries removed
    pub fn deleted(&self) -> usize {
        self.count(|o| matches!(o, EntryOutcome::Deleted))
    }

    /// Number of entries left in place
    pub fn kept(&self) -> usize {
        self.count(|o| matches!(o, EntryOutcome::Kept))
    }

    /// Number of entries that could not be inspected or removed
    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, EntryOutcome::Failed(_)))
    }

    /// Check if any entry failed
    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    fn count(&self, pred: impl Fn(&EntryOutcome) -> bool) -> usize {
        self.entries.iter().filter(|e| pred(&e.outcome)).count()
    }

    fn record(&mut self, path: impl Into<PathBuf>, outcome: EntryOutcome) {
        self.entries.push(SweepEntry {
            path: path.into(),
            outcome,
        });
    }
}

/// Age-based cleanup over the suite's artifact trees
#[derive(Debug, Clone)]
pub struct RetentionCleaner {
    layout: ArtifactLayout,
}

impl RetentionCleaner {
    /// Create a cleaner over the given artifact layout
    pub fn new(layout: ArtifactLayout) -> Self {
        Self { layout }
    }

    /// Remove reports, screenshots, and logs older than `retention_days`
    ///
    /// The reports tree is swept one level deep: its immediate files and
    /// the immediate files of its `screenshots` subdirectory. Any other
    /// subdirectory of the reports tree is left alone. The logs tree is
    /// swept at its top level only. A missing tree root is skipped.
    ///
    /// An entry is deleted iff its last-modified timestamp is strictly
    /// before `now - retention_days`. A stat or remove failure on one
    /// entry is recorded and the sweep moves on to the next.
    pub fn sweep(&self, retention_days: u64) -> SweepReport {
        let cutoff = Utc::now() - Duration::days(retention_days as i64);
        let mut report = SweepReport::default();

        info!(
            "Sweeping artifacts older than {} days (cutoff: {})",
            retention_days,
            cutoff.format("%Y-%m-%d %H:%M:%S")
        );

        self.sweep_reports(cutoff, &mut report);
        sweep_flat(self.layout.logs_dir(), cutoff, "log", &mut report);

        info!(
            "Sweep complete: {} removed, {} kept, {} failed",
            report.deleted(),
            report.kept(),
            report.failed()
        );
        report
    }

    /// Remove everything under both trees and recreate them empty
    ///
    /// Files are removed before their directories, directories bottom-up,
    /// then the roots themselves. A locked or unreadable entry is
    /// recorded and skipped without stopping the walk, and the empty
    /// trees (including `reports/screenshots`) are recreated afterwards
    /// regardless of how much of the removal succeeded.
    pub fn purge(&self) -> SweepReport {
        let mut report = SweepReport::default();

        purge_tree(self.layout.reports_dir(), &mut report);
        purge_tree(self.layout.logs_dir(), &mut report);

        if let Err(e) = self.layout.ensure() {
            error!("Failed to recreate artifact directories: {}", e);
            report.record(
                self.layout.reports_dir().to_path_buf(),
                EntryOutcome::Failed(e.to_string()),
            );
        }

        info!(
            "Purge complete: {} removed, {} failed",
            report.deleted(),
            report.failed()
        );
        report
    }

    /// Sweep the reports tree: immediate files plus the screenshots
    /// subtree, nothing else
    fn sweep_reports(&self, cutoff: DateTime<Utc>, report: &mut SweepReport) {
        let dir = self.layout.reports_dir();
        if !dir.exists() {
            debug!("Reports directory {} does not exist, skipping", dir.display());
            return;
        }

        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Failed to read {}: {}", dir.display(), e);
                report.record(dir.to_path_buf(), EntryOutcome::Failed(e.to_string()));
                return;
            }
        };

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Failed to read entry in {}: {}", dir.display(), e);
                    report.record(dir.to_path_buf(), EntryOutcome::Failed(e.to_string()));
                    continue;
                }
            };

            let path = entry.path();
            match entry.file_type() {
                Ok(ft) if ft.is_dir() => {
                    if entry.file_name() == SCREENSHOTS_DIR {
                        sweep_flat(&path, cutoff, "screenshot", report);
                    }
                    // Other subdirectories are outside the sweep's scope
                }
                Ok(_) => sweep_file(&path, cutoff, "report", report),
                Err(e) => {
                    warn!("Failed to stat {}: {}", path.display(), e);
                    report.record(path, EntryOutcome::Failed(e.to_string()));
                }
            }
        }
    }
}

/// Sweep the immediate files of one directory, ignoring subdirectories
fn sweep_flat(dir: &Path, cutoff: DateTime<Utc>, kind: &str, report: &mut SweepReport) {
    if !dir.exists() {
        debug!("{} directory {} does not exist, skipping", kind, dir.display());
        return;
    }

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Failed to read {}: {}", dir.display(), e);
            report.record(dir.to_path_buf(), EntryOutcome::Failed(e.to_string()));
            return;
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Failed to read entry in {}: {}", dir.display(), e);
                report.record(dir.to_path_buf(), EntryOutcome::Failed(e.to_string()));
                continue;
            }
        };

        let path = entry.path();
        match entry.file_type() {
            Ok(ft) if ft.is_dir() => {}
            Ok(_) => sweep_file(&path, cutoff, kind, report),
            Err(e) => {
                warn!("Failed to stat {}: {}", path.display(), e);
                report.record(path, EntryOutcome::Failed(e.to_string()));
            }
        }
    }
}

/// Apply the age test to one file and remove it if it is older than the
/// cutoff
fn sweep_file(path: &Path, cutoff: DateTime<Utc>, kind: &str, report: &mut SweepReport) {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    let modified = fs::metadata(path).and_then(|m| m.modified());
    match modified {
        Ok(mtime) => {
            if DateTime::<Utc>::from(mtime) < cutoff {
                match fs::remove_file(path) {
                    Ok(()) => {
                        info!("Removed old {}: {}", kind, name);
                        report.record(path.to_path_buf(), EntryOutcome::Deleted);
                    }
                    Err(e) => {
                        warn!("Failed to remove {} {}: {}", kind, name, e);
                        report.record(path.to_path_buf(), EntryOutcome::Failed(e.to_string()));
                    }
                }
            } else {
                debug!("Keeping {}: {}", kind, name);
                report.record(path.to_path_buf(), EntryOutcome::Kept);
            }
        }
        Err(e) => {
            warn!("Failed to stat {} {}: {}", kind, name, e);
            report.record(path.to_path_buf(), EntryOutcome::Failed(e.to_string()));
        }
    }
}

/// Remove a whole tree, contents first, tolerating per-entry failures
fn purge_tree(root: &Path, report: &mut SweepReport) {
    if !root.exists() {
        debug!("Directory {} does not exist, skipping purge", root.display());
        return;
    }

    for entry in WalkDir::new(root).contents_first(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf());
                warn!("Failed to walk {}: {}", path.display(), e);
                report.record(path, EntryOutcome::Failed(e.to_string()));
                continue;
            }
        };

        let path = entry.path();
        let result = if entry.file_type().is_dir() {
            fs::remove_dir(path)
        } else {
            fs::remove_file(path)
        };

        match result {
            Ok(()) => {
                info!("Removed {}", path.display());
                report.record(path.to_path_buf(), EntryOutcome::Deleted);
            }
            Err(e) => {
                warn!("Failed to remove {}: {}", path.display(), e);
                report.record(path.to_path_buf(), EntryOutcome::Failed(e.to_string()));
            }
        }
    }
}
