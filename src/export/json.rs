//! JSON export of reports
//!
//! Wraps a report DTO with schema and provenance metadata so a consumer can
//! tell which version produced it.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{TeamFinError, TeamFinResult};
use crate::models::TeamId;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// A report plus export metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportExport<T> {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    pub app_version: String,
    pub team_id: TeamId,
    /// Report kind ("dashboard", "summary", "projection")
    pub kind: String,
    /// Month the report covers, absent for projections
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    pub report: T,
}

impl<T> ReportExport<T> {
    pub fn new(team_id: TeamId, kind: &str, period: Option<String>, report: T) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            team_id,
            kind: kind.to_string(),
            period,
            report,
        }
    }
}

/// Write a report export as JSON
pub fn export_report_json<T, W>(
    export: &ReportExport<T>,
    writer: &mut W,
    pretty: bool,
) -> TeamFinResult<()>
where
    T: Serialize,
    W: Write,
{
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, export)
    } else {
        serde_json::to_writer(&mut *writer, export)
    }
    .map_err(|e| TeamFinError::Export(e.to_string()))?;

    writeln!(writer).map_err(|e| TeamFinError::Export(e.to_string()))?;
    Ok(())
}

/// Parse a previously exported report
pub fn import_report_json<T>(json_str: &str) -> TeamFinResult<ReportExport<T>>
where
    T: for<'de> Deserialize<'de>,
{
    let export: ReportExport<T> = serde_json::from_str(json_str)?;

    if export.schema_version != EXPORT_SCHEMA_VERSION {
        return Err(TeamFinError::Export(format!(
            "Schema version mismatch: expected {}, got {}",
            EXPORT_SCHEMA_VERSION, export.schema_version
        )));
    }

    Ok(export)
}
