//! Settlement display formatting

use crate::reports::SettlementRow;

use super::currency::format_cents;

/// Format the transfer plan, one payment per line
pub fn format_settlement_list(rows: &[SettlementRow], currency_code: &str) -> String {
    if rows.is_empty() {
        return "Everyone is settled up.".to_string();
    }

    let from_width = rows.iter().map(|r| r.from_name.chars().count()).max().unwrap_or(0);
    let to_width = rows.iter().map(|r| r.to_name.chars().count()).max().unwrap_or(0);

    let mut output = String::new();
    for row in rows {
        output.push_str(&format!(
            "{:<from_width$}  ->  {:<to_width$}  {:>14}\n",
            row.from_name,
            row.to_name,
            format_cents(row.amount, currency_code),
            from_width = from_width,
            to_width = to_width,
        ));
    }
    output.push_str(&format!(
        "{} payment{}",
        rows.len(),
        if rows.len() == 1 { "" } else { "s" }
    ));

    output
}
