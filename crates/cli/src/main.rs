//! Testkeeper CLI - Main Entry Point
//!
//! Removes aged reports, screenshots, and logs from the suite's artifact
//! trees, or purges both trees entirely and recreates them empty.

use std::path::PathBuf;

use clap::Parser;

mod output;

use testkeeper_common::{ArtifactLayout, LogContext, LogOptions, RetentionCleaner, SuiteConfig};

/// Cleanup old test reports and logs
#[derive(Parser)]
#[command(name = "testkeeper")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Remove all reports and logs
    #[arg(long)]
    all: bool,

    /// Number of days to keep reports
    #[arg(long, default_value_t = 7)]
    days: u64,

    /// Suite root directory containing the reports and logs trees
    #[arg(long, default_value = ".")]
    base: PathBuf,

    /// Configuration file overriding the artifact tree roots
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format for the end-of-run summary
    #[arg(long, default_value = "table")]
    format: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn artifact_layout(&self) -> anyhow::Result<ArtifactLayout> {
        match &self.config {
            Some(path) => Ok(SuiteConfig::load(path)?.artifact_layout()),
            None => Ok(ArtifactLayout::new(&self.base)),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let layout = cli.artifact_layout()?;

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    let log_ctx = LogContext::init(LogOptions {
        logs_dir: layout.logs_dir().to_path_buf(),
        level: log_level.to_string(),
        ..LogOptions::default()
    })?;
    tracing::debug!("Logging to {}", log_ctx.log_file().display());

    let report = run_cleanup(&cli, layout);
    output::print_report(&report, cli.format);

    // Per-entry failures surface in the summary and the run log, not in
    // the exit code.
    Ok(())
}

/// Run the requested cleanup; `--all` takes precedence over `--days`
fn run_cleanup(cli: &Cli, layout: ArtifactLayout) -> testkeeper_common::SweepReport {
    let cleaner = RetentionCleaner::new(layout);
    if cli.all {
        cleaner.purge()
    } else {
        cleaner.sweep(cli.days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::TempDir;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_days_defaults_to_seven() {
        let cli = Cli::try_parse_from(["testkeeper"]).unwrap();
        assert!(!cli.all);
        assert_eq!(cli.days, 7);
    }

    #[test]
    fn test_all_flag_takes_precedence_over_days() {
        let tmp = TempDir::new().unwrap();
        let base = tmp.path().to_str().unwrap();

        let cli =
            Cli::try_parse_from(["testkeeper", "--all", "--days", "30", "--base", base]).unwrap();
        assert!(cli.all);

        let layout = cli.artifact_layout().unwrap();
        run_cleanup(&cli, layout);

        // A purge ran: the empty trees exist even though nothing was old
        assert!(tmp.path().join("reports/screenshots").is_dir());
        assert!(tmp.path().join("logs").is_dir());
    }

    #[test]
    fn test_layout_from_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("suite.toml");
        let mut config = SuiteConfig::default();
        config.artifacts.reports_dir = tmp.path().join("out/reports");
        config.artifacts.logs_dir = tmp.path().join("out/logs");
        config.save(&config_path).unwrap();

        let cli =
            Cli::try_parse_from(["testkeeper", "--config", config_path.to_str().unwrap()]).unwrap();

        let layout = cli.artifact_layout().unwrap();
        assert_eq!(layout.reports_dir(), tmp.path().join("out/reports"));
        assert_eq!(layout.logs_dir(), tmp.path().join("out/logs"));
    }
}
