//! Report subcommand: render or deliver the fuel status report.

use chrono::Utc;
use clap::Subcommand;
use fuelwatch_core::report::{label_from_metadata, utc_timestamp_label};
use fuelwatch_core::{
    Config, ConfigError, DataSource, DiscordNotifier, RawRow, RecordingNotifier, SnapshotFile,
    StatusReportBuilder,
};

use super::Context;

#[derive(Subcommand)]
pub enum ReportAction {
    /// Print the messages that would be sent
    Preview {
        /// Snapshot file (.json or .csv); defaults to source.snapshot_path
        #[arg(long)]
        snapshot: Option<String>,
        /// Report label; defaults to the snapshot timestamp, then the current time
        #[arg(long)]
        label: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Build the report and post it to the configured webhook
    Send {
        /// Snapshot file (.json or .csv); defaults to source.snapshot_path
        #[arg(long)]
        snapshot: Option<String>,
        /// Report label; defaults to the snapshot timestamp, then the current time
        #[arg(long)]
        label: Option<String>,
        /// Print the messages instead of posting them
        #[arg(long)]
        dry_run: bool,
    },
}

pub fn run(action: ReportAction, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let config = ctx.load_config()?;

    match action {
        ReportAction::Preview {
            snapshot,
            label,
            json,
        } => {
            let rows = load_rows(&config, snapshot)?;
            let label = resolve_label(label, &rows);
            let report = StatusReportBuilder::from_config(&config.report).render(
                &label,
                &rows,
                Utc::now(),
            )?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_messages(&report.chunks);
                for skipped in &report.skipped {
                    eprintln!("warning: skipped {skipped}");
                }
            }
        }
        ReportAction::Send {
            snapshot,
            label,
            dry_run,
        } => {
            let rows = load_rows(&config, snapshot)?;
            let label = resolve_label(label, &rows);
            let builder = StatusReportBuilder::from_config(&config.report);

            let summary = if dry_run {
                let notifier = RecordingNotifier::new();
                let summary = builder.send(&label, &rows, Utc::now(), &notifier)?;
                print_messages(&notifier.messages());
                summary
            } else {
                let notifier = DiscordNotifier::from_config(&config.notify)?;
                builder.send(&label, &rows, Utc::now(), &notifier)?
            };

            for skipped in &summary.skipped {
                eprintln!("warning: skipped {skipped}");
            }
            println!(
                "{} {} message(s) covering {} structure(s), {} row(s) skipped",
                if dry_run { "Rendered" } else { "Sent" },
                summary.messages_sent,
                summary.structures,
                summary.skipped.len()
            );
        }
    }
    Ok(())
}

fn load_rows(
    config: &Config,
    snapshot: Option<String>,
) -> Result<Vec<RawRow>, Box<dyn std::error::Error>> {
    let path = snapshot
        .filter(|p| !p.trim().is_empty())
        .or_else(|| Some(config.source.snapshot_path.clone()).filter(|p| !p.trim().is_empty()))
        .ok_or_else(|| ConfigError::MissingKey("source.snapshot_path".into()))?;
    Ok(SnapshotFile::new().fetch(&path)?)
}

fn resolve_label(explicit: Option<String>, rows: &[RawRow]) -> String {
    explicit
        .or_else(|| label_from_metadata(rows))
        .unwrap_or_else(|| utc_timestamp_label(Utc::now()))
}

fn print_messages(chunks: &[String]) {
    let total = chunks.len();
    for (idx, chunk) in chunks.iter().enumerate() {
        println!(
            "----- message {}/{} ({} chars) -----",
            idx + 1,
            total,
            chunk.chars().count()
        );
        print!("{chunk}");
    }
}
