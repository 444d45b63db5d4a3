//! CLI commands for reports
//!
//! Renders the dashboard, the classification summary and the investment
//! projection as text, JSON or CSV, to stdout or to a file.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};

use crate::config::settings::Settings;
use crate::display::{render_classification_summary, render_dashboard, render_projection};
use crate::error::{TeamFinError, TeamFinResult};
use crate::export::{
    export_dashboard_csv, export_projection_csv, export_report_json, export_summary_csv,
    ReportExport,
};
use crate::reports::{project_team, summarize, summarize_by_classification};
use crate::sources::BudgetSource;
use crate::storage::Storage;

use super::{parse_money, parse_period_or_current};

/// Output format of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Income, spend per envelope and per category for a month
    Dashboard {
        /// Budget period (e.g., "2025-01", "current", "last")
        #[arg(short, long)]
        period: Option<String>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Budget vs. spend grouped by classification
    Summary {
        /// Budget period (e.g., "2025-01", "current", "last")
        #[arg(short, long)]
        period: Option<String>,
        /// Income to allocate; defaults to the month's declared income
        #[arg(short, long)]
        income: Option<String>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Project investment growth
    Projection {
        /// Horizon in years; defaults to the configured projection years
        #[arg(short, long, allow_hyphen_values = true)]
        years: Option<i32>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn open_output(output: Option<&PathBuf>) -> TeamFinResult<Box<dyn Write>> {
    match output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                TeamFinError::Export(format!("Failed to create {}: {}", path.display(), e))
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

fn write_text(writer: &mut dyn Write, text: &str) -> TeamFinResult<()> {
    writer
        .write_all(text.as_bytes())
        .map_err(|e| TeamFinError::Export(e.to_string()))
}

fn finish(mut writer: Box<dyn Write>, output: Option<&PathBuf>) -> TeamFinResult<()> {
    writer
        .flush()
        .map_err(|e| TeamFinError::Export(e.to_string()))?;
    if let Some(path) = output {
        eprintln!("Report written to: {}", path.display());
    }
    Ok(())
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> TeamFinResult<()> {
    let team = settings.team()?;
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ReportCommands::Dashboard {
            period,
            format,
            output,
        } => {
            let period = parse_period_or_current(period.as_deref())?;
            let dashboard = summarize(storage, team, period.month(), period.year())?;

            let mut writer = open_output(output.as_ref())?;
            match format {
                OutputFormat::Text => {
                    write_text(&mut writer, &render_dashboard(period, &dashboard, symbol))?
                }
                OutputFormat::Json => {
                    let export =
                        ReportExport::new(team, "dashboard", Some(period.to_string()), dashboard);
                    export_report_json(&export, &mut writer, true)?
                }
                OutputFormat::Csv => export_dashboard_csv(period, &dashboard, &mut writer)?,
            }
            finish(writer, output.as_ref())
        }

        ReportCommands::Summary {
            period,
            income,
            format,
            output,
        } => {
            let period = parse_period_or_current(period.as_deref())?;
            let income = match income {
                Some(amount) => parse_money(&amount)?,
                None => storage
                    .budget_for(team, period.month(), period.year())?
                    .map(|b| b.total_income)
                    .unwrap_or_default(),
            };
            let summary =
                summarize_by_classification(storage, team, period.month(), period.year(), income)?;

            let mut writer = open_output(output.as_ref())?;
            match format {
                OutputFormat::Text => write_text(
                    &mut writer,
                    &render_classification_summary(period, &summary, symbol),
                )?,
                OutputFormat::Json => {
                    let export =
                        ReportExport::new(team, "summary", Some(period.to_string()), summary);
                    export_report_json(&export, &mut writer, true)?
                }
                OutputFormat::Csv => export_summary_csv(period, &summary, &mut writer)?,
            }
            finish(writer, output.as_ref())
        }

        ReportCommands::Projection {
            years,
            format,
            output,
        } => {
            let years = years.unwrap_or(settings.projection_years);
            let points = project_team(storage, team, years)?;

            let mut writer = open_output(output.as_ref())?;
            match format {
                OutputFormat::Text => write_text(&mut writer, &render_projection(&points, symbol))?,
                OutputFormat::Json => {
                    let export = ReportExport::new(team, "projection", None, points);
                    export_report_json(&export, &mut writer, true)?
                }
                OutputFormat::Csv => export_projection_csv(&points, &mut writer)?,
            }
            finish(writer, output.as_ref())
        }
    }
}
