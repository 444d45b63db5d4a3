//! Export module for teamfin
//!
//! Writes report DTOs as CSV (spreadsheet-compatible) or JSON
//! (machine-readable, with schema metadata).

pub mod csv;
pub mod json;

pub use self::csv::{export_dashboard_csv, export_projection_csv, export_summary_csv};
pub use self::json::{export_report_json, import_report_json, ReportExport, EXPORT_SCHEMA_VERSION};
