//! Balance display formatting
//!
//! Formats member balances as an aligned table.

use crate::reports::MemberBalanceRow;

use super::currency::{colorize, format_cents};

/// Format balances as a table with a status column
pub fn format_balance_table(rows: &[MemberBalanceRow], currency_code: &str, color: bool) -> String {
    if rows.is_empty() {
        return "No members in this group.".to_string();
    }

    let name_width = rows
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:>14}  {:>14}  {:>14}  {}\n",
        "Name",
        "Paid",
        "Share",
        "Net",
        "Status",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:->14}  {:->14}  {:->14}  {:-<10}\n",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for row in rows {
        let status = if row.net.is_positive() {
            "gets back"
        } else if row.net.is_negative() {
            "owes"
        } else {
            "settled"
        };
        let net = format!("{:>14}", format_cents(row.net, currency_code));

        output.push_str(&format!(
            "{:<name_width$}  {:>14}  {:>14}  {}  {}\n",
            row.name,
            format_cents(row.paid, currency_code),
            format_cents(row.share, currency_code),
            colorize(row.net, &net, color),
            status,
            name_width = name_width,
        ));
    }

    output
}
