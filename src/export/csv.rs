//! CSV Export functionality
//!
//! Exports the expense ledger (one row per split) and the settlement report.

use std::io::Write;

use crate::error::{SplitError, SplitResult};
use crate::models::Group;
use crate::reports::settlement::escape_csv;
use crate::reports::SettlementReport;

/// Export every expense split to CSV
///
/// An expense with three splits yields three rows; the expense columns
/// repeat on each.
pub fn export_expenses_csv<W: Write>(group: &Group, writer: &mut W) -> SplitResult<()> {
    let export_err = |e: std::io::Error| SplitError::Export(e.to_string());

    writeln!(
        writer,
        "Expense ID,Date,Title,Category,Payer,Amount,Original Currency,Original Amount,Member,Share"
    )
    .map_err(export_err)?;

    for expense in &group.expenses {
        let payer = group.member_name(expense.payer_id);
        let original_amount = if expense.original_currency_code.is_empty() {
            String::new()
        } else {
            expense.original_amount_or_amount().to_string()
        };

        for split in &expense.splits {
            writeln!(
                writer,
                "{},{},{},{},{},{},{},{},{},{}",
                expense.id,
                expense.date,
                escape_csv(&expense.title),
                expense.category.display_name(),
                escape_csv(payer),
                expense.amount,
                expense.original_currency_code,
                original_amount,
                escape_csv(group.member_name(split.member_id)),
                split.amount
            )
            .map_err(export_err)?;
        }
    }

    Ok(())
}

/// Export balances and transfers to CSV
pub fn export_settlement_csv<W: Write>(report: &SettlementReport, writer: &mut W) -> SplitResult<()> {
    report.export_csv(writer)
}
