//! Output formatting for the cleanup summary

use clap::ValueEnum;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use testkeeper_common::{EntryOutcome, SweepReport};

/// Output format
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// Plain text format
    Plain,
}

/// Print the per-entry outcomes and totals of one cleanup run
pub fn print_report(report: &SweepReport, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if report.entries.is_empty() {
                println!("Nothing to clean up.");
                return;
            }

            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic);

            table.set_header(vec!["Path", "Outcome"]);
            for entry in &report.entries {
                table.add_row(vec![
                    entry.path.display().to_string(),
                    describe(&entry.outcome),
                ]);
            }

            println!("{table}");
            print_totals(report);
        }
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(report).unwrap_or_default()
            );
        }
        OutputFormat::Plain => {
            for entry in &report.entries {
                println!("{}: {}", describe(&entry.outcome), entry.path.display());
            }
            print_totals(report);
        }
    }
}

fn describe(outcome: &EntryOutcome) -> String {
    match outcome {
        EntryOutcome::Deleted => "deleted".to_string(),
        EntryOutcome::Kept => "kept".to_string(),
        EntryOutcome::Failed(reason) => format!("failed: {}", reason),
    }
}

fn print_totals(report: &SweepReport) {
    let line = format!(
        "{} deleted, {} kept, {} failed",
        report.deleted(),
        report.kept(),
        report.failed()
    );
    if report.has_failures() {
        println!("{}", line.yellow());
    } else {
        println!("{}", line.green());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use testkeeper_common::SweepEntry;

    #[test]
    fn test_describe_outcomes() {
        assert_eq!(describe(&EntryOutcome::Deleted), "deleted");
        assert_eq!(describe(&EntryOutcome::Kept), "kept");
        assert_eq!(
            describe(&EntryOutcome::Failed("denied".to_string())),
            "failed: denied"
        );
    }

    #[test]
    fn test_report_serializes_for_json_output() {
        let report = SweepReport {
            entries: vec![SweepEntry {
                path: PathBuf::from("reports/a.html"),
                outcome: EntryOutcome::Deleted,
            }],
        };

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("reports/a.html"));
        assert!(json.contains("deleted"));
    }
}
