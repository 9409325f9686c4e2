//! JSON Export functionality
//!
//! Exports a group's balances and settlement plan with schema versioning.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Write;

use crate::error::{SplitError, SplitResult};
use crate::models::{Group, Money};
use crate::reports::{MemberBalanceRow, SettlementReport, SettlementRow};
use crate::services::TieBreak;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Settlement export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub group_name: String,
    pub currency_code: String,

    /// Sorted by |net| descending
    pub balances: Vec<MemberBalanceRow>,

    /// Transfers that settle every balance
    pub settlements: Vec<SettlementRow>,

    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub member_count: usize,
    pub expense_count: usize,
    pub total_spent: Money,
    pub total_transferred: Money,
    pub earliest_expense: Option<NaiveDate>,
    pub latest_expense: Option<NaiveDate>,
}

impl LedgerExport {
    /// Build an export from a group
    pub fn from_group(group: &Group, tie_break: TieBreak) -> SplitResult<Self> {
        let report = SettlementReport::generate(group, tie_break)?;
        Self::from_report(group, report)
    }

    /// Build an export from an already generated report
    pub fn from_report(group: &Group, report: SettlementReport) -> SplitResult<Self> {
        let total_spent = group
            .total_spent()
            .ok_or_else(|| SplitError::amount_overflow("group spending total"))?;
        let metadata = ExportMetadata {
            member_count: group.members.len(),
            expense_count: group.expenses.len(),
            total_spent,
            total_transferred: report.total_transferred(),
            earliest_expense: group.expenses.iter().map(|e| e.date).min(),
            latest_expense: group.last_activity(),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            group_name: report.group_name,
            currency_code: report.currency_code,
            balances: report.balances,
            settlements: report.settlements,
            metadata,
        })
    }

    /// Validate the export structure
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        let member_ids: HashSet<_> = self.balances.iter().map(|b| b.member_id).collect();
        for row in &self.settlements {
            for id in [row.from_member_id, row.to_member_id] {
                if !member_ids.contains(&id) {
                    return Err(format!("Settlement references unknown member {}", id));
                }
            }
            if !row.amount.is_positive() {
                return Err(format!(
                    "Settlement {} -> {} has non-positive amount {}",
                    row.from_name, row.to_name, row.amount
                ));
            }
        }

        let net_sum = Money::checked_sum(self.balances.iter().map(|b| b.net))
            .ok_or_else(|| "Balances overflow when summed".to_string())?;
        if !net_sum.is_zero() {
            return Err(format!("Balances do not sum to zero (off by {})", net_sum));
        }

        Ok(())
    }
}

/// Export the settlement report to JSON
pub fn export_ledger_json<W: Write>(export: &LedgerExport, writer: &mut W, pretty: bool) -> SplitResult<()> {
    if pretty {
        serde_json::to_writer_pretty(writer, export)
    } else {
        serde_json::to_writer(writer, export)
    }
    .map_err(|e| SplitError::Export(e.to_string()))?;

    Ok(())
}

/// Read back a JSON export for verification
pub fn import_from_json(json_str: &str) -> SplitResult<LedgerExport> {
    let export: LedgerExport =
        serde_json::from_str(json_str).map_err(|e| SplitError::Json(e.to_string()))?;

    export.validate().map_err(SplitError::Validation)?;

    Ok(export)
}
