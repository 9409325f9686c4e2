//! Export module for split-ledger
//!
//! Writes a group's settlement report in several formats:
//! - CSV: balances and transfers, or the raw expense ledger
//! - JSON: machine-readable, schema-versioned
//! - YAML: human-readable

pub mod csv;
pub mod json;
pub mod yaml;

use std::io::Write;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::SplitResult;
use crate::models::Group;
use crate::reports::SettlementReport;
use crate::services::TieBreak;

pub use self::csv::{export_expenses_csv, export_settlement_csv};
pub use json::{export_ledger_json, import_from_json, LedgerExport, EXPORT_SCHEMA_VERSION};
pub use yaml::{export_ledger_yaml, import_from_yaml};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// JSON (pretty-printed)
    #[default]
    Json,
    /// YAML, human-readable
    Yaml,
    /// CSV, one section for balances and one for transfers
    Csv,
}

/// Write a group's settlement report in the given format
pub fn export_settlement<W: Write>(
    group: &Group,
    tie_break: TieBreak,
    format: ExportFormat,
    writer: &mut W,
) -> SplitResult<()> {
    let report = SettlementReport::generate(group, tie_break)?;

    match format {
        ExportFormat::Csv => export_settlement_csv(&report, writer),
        ExportFormat::Json => export_ledger_json(&LedgerExport::from_report(group, report)?, writer, true),
        ExportFormat::Yaml => export_ledger_yaml(&LedgerExport::from_report(group, report)?, writer),
    }
}
