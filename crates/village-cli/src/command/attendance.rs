use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Subcommand};
use jiff::civil::Date;
use uuid::Uuid;
use village_client::{ApiClient, AttendanceApi, ExportFormat, MonthlyReportQuery, ReportQuery};

use super::print_json;
use crate::TRACING_TARGET_COMMAND;

#[derive(Debug, Clone, Subcommand)]
pub enum AttendanceCommand {
    /// List the attendance records of an event
    List {
        event_id: Uuid,
    },
    /// Attendance counts per participant
    Report(ReportArgs),
    /// Attendance counts per participant for one month
    Monthly {
        #[arg(long)]
        year: i16,
        /// 1-based month
        #[arg(long, value_parser = clap::value_parser!(i8).range(1..=12))]
        month: i8,
        #[arg(long = "event")]
        event_id: Option<Uuid>,
    },
    /// Download the attendance report as a file
    Export {
        #[command(flatten)]
        filter: ReportArgs,
        /// File format
        #[arg(long, default_value = "csv")]
        format: ExportFormat,
        /// Destination file
        #[arg(long, short)]
        output: PathBuf,
    },
}

/// Filters shared by `report` and `export`.
#[derive(Debug, Clone, Args)]
pub struct ReportArgs {
    /// Restrict to one event
    #[arg(long = "event")]
    pub event_id: Option<Uuid>,
    /// First day to include (YYYY-MM-DD)
    #[arg(long = "from")]
    pub start_date: Option<Date>,
    /// Last day to include (YYYY-MM-DD)
    #[arg(long = "to")]
    pub end_date: Option<Date>,
}

impl From<ReportArgs> for ReportQuery {
    fn from(args: ReportArgs) -> Self {
        Self {
            event_id: args.event_id,
            start_date: args.start_date,
            end_date: args.end_date,
        }
    }
}

impl AttendanceCommand {
    pub async fn execute(self, client: &ApiClient) -> anyhow::Result<()> {
        match self {
            Self::List { event_id } => {
                let records = client
                    .event_attendance(event_id)
                    .await
                    .context("failed to list attendance")?;
                print_json(&records)
            }
            Self::Report(filter) => {
                let rows = client
                    .attendance_report(&filter.into())
                    .await
                    .context("failed to load attendance report")?;
                print_json(&rows)
            }
            Self::Monthly {
                year,
                month,
                event_id,
            } => {
                let query = MonthlyReportQuery {
                    year,
                    month,
                    event_id,
                };
                let rows = client
                    .monthly_report(&query)
                    .await
                    .context("failed to load monthly report")?;
                print_json(&rows)
            }
            Self::Export {
                filter,
                format,
                output,
            } => {
                let bytes = client
                    .export_report(&filter.into(), format)
                    .await
                    .context("failed to export attendance report")?;

                fs::write(&output, &bytes)
                    .with_context(|| format!("failed to write {}", output.display()))?;

                tracing::info!(
                    target: TRACING_TARGET_COMMAND,
                    path = %output.display(),
                    bytes = bytes.len(),
                    format = %format,
                    "Attendance report exported"
                );
                Ok(())
            }
        }
    }
}
