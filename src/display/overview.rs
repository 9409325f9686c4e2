//! Group overview, member activity and split preview formatting

use crate::models::{Group, Money, Split};
use crate::reports::{ActivityLine, CategoryTotal, GroupOverview, MemberActivity};
use crate::services::SplitMode;

use super::balance::format_balance_table;
use super::currency::{colorize, format_cents};
use super::report::{double_separator, format_bar, format_percentage, separator, truncate};

const WIDTH: usize = 60;
const TITLE_WIDTH: usize = 28;

fn format_categories(output: &mut String, totals: &[CategoryTotal], currency_code: &str) {
    if totals.is_empty() {
        output.push_str("  (no expenses)\n");
        return;
    }

    for total in totals {
        output.push_str(&format!(
            "  {:<14} {:>14}  {:>6}  {}\n",
            total.category.display_name(),
            format_cents(total.amount, currency_code),
            format_percentage(total.fraction),
            format_bar(total.fraction, 16),
        ));
    }
}

fn format_activity_lines(output: &mut String, lines: &[ActivityLine], currency_code: &str) {
    if lines.is_empty() {
        output.push_str("  (none)\n");
        return;
    }

    for line in lines {
        output.push_str(&format!(
            "  {}  {:<title_width$}  {:>14}  share {:>12}\n",
            line.date.format("%Y-%m-%d"),
            truncate(&line.title, TITLE_WIDTH),
            format_cents(line.amount, currency_code),
            format_cents(line.share, currency_code),
            title_width = TITLE_WIDTH,
        ));
    }
}

/// Format the group overview
pub fn format_group_overview(overview: &GroupOverview, color: bool) -> String {
    let code = overview.currency_code.as_str();
    let mut output = String::new();

    output.push_str(&format!("{}\n", overview.group_name));
    output.push_str(&format!("{}\n", double_separator(WIDTH)));
    output.push_str(&format!(
        "Total spent:    {}\n",
        format_cents(overview.total_spent, code)
    ));
    output.push_str(&format!("Expenses:       {}\n", overview.expense_count));
    output.push_str(&format!(
        "Last activity:  {}\n",
        overview
            .last_activity
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "never".to_string())
    ));

    output.push_str("\nBy category\n");
    output.push_str(&format!("{}\n", separator(WIDTH)));
    format_categories(&mut output, &overview.category_totals, code);

    output.push_str("\nBalances\n");
    output.push_str(&format!("{}\n", separator(WIDTH)));
    output.push_str(&format_balance_table(&overview.members, code, color));

    output.push_str("\nRecent expenses\n");
    output.push_str(&format!("{}\n", separator(WIDTH)));
    if overview.recent_expenses.is_empty() {
        output.push_str("  (no expenses)\n");
    }
    for expense in &overview.recent_expenses {
        output.push_str(&format!(
            "  {}  {:<title_width$}  {:>14}  paid by {}\n",
            expense.date.format("%Y-%m-%d"),
            truncate(&expense.title, TITLE_WIDTH),
            format_cents(expense.amount, code),
            expense.payer_name,
            title_width = TITLE_WIDTH,
        ));
    }

    output
}

/// Format one member's activity
pub fn format_member_activity(activity: &MemberActivity, currency_code: &str, color: bool) -> String {
    let mut output = String::new();
    let net = activity.net();

    output.push_str(&format!("{}\n", activity.name));
    output.push_str(&format!("{}\n", double_separator(WIDTH)));
    output.push_str(&format!(
        "Paid:   {}\n",
        format_cents(activity.total_paid, currency_code)
    ));
    output.push_str(&format!(
        "Share:  {}\n",
        format_cents(activity.total_share, currency_code)
    ));
    output.push_str(&format!(
        "Net:    {}\n",
        colorize(net, &format_cents(net, currency_code), color)
    ));

    output.push_str(&format!("\nPaid for ({})\n", activity.paid_expenses.len()));
    output.push_str(&format!("{}\n", separator(WIDTH)));
    format_activity_lines(&mut output, &activity.paid_expenses, currency_code);

    output.push_str(&format!(
        "\nTook part in ({})\n",
        activity.involved_expenses.len()
    ));
    output.push_str(&format!("{}\n", separator(WIDTH)));
    format_activity_lines(&mut output, &activity.involved_expenses, currency_code);

    output.push_str("\nShare by category\n");
    output.push_str(&format!("{}\n", separator(WIDTH)));
    format_categories(&mut output, &activity.category_breakdown, currency_code);

    output
}

/// Format a proposed split before it is recorded
pub fn format_split_preview(
    group: &Group,
    total: Money,
    splits: &[Split],
    mode: SplitMode,
    currency_code: &str,
) -> String {
    let mut output = String::new();

    let mode_label = match mode {
        SplitMode::Equal => "equal",
        SplitMode::Manual => "manual",
    };
    output.push_str(&format!(
        "Splitting {} ({}, {} way{})\n",
        format_cents(total, currency_code),
        mode_label,
        splits.len(),
        if splits.len() == 1 { "" } else { "s" }
    ));
    output.push_str(&format!("{}\n", separator(WIDTH)));

    let name_width = splits
        .iter()
        .map(|s| group.member_name(s.member_id).chars().count())
        .max()
        .unwrap_or(0);

    for split in splits {
        output.push_str(&format!(
            "  {:<name_width$}  {:>14}\n",
            group.member_name(split.member_id),
            format_cents(split.amount, currency_code),
            name_width = name_width,
        ));
    }

    output
}
