//! CLI commands for balances, settlements and reports

use std::path::Path;

use crate::display::{
    format_balance_table, format_cents, format_group_overview, format_member_activity,
    format_settlement_list,
};
use crate::error::{SplitError, SplitResult};
use crate::reports::{GroupOverview, MemberActivity, SettlementReport};
use crate::services::TieBreak;

use super::CliContext;

/// Print every member's paid, share and net, largest balances first
pub fn handle_balances_command(ctx: &CliContext, group_file: &Path) -> SplitResult<()> {
    let group = ctx.load_group(group_file)?;
    let report = SettlementReport::generate(&group, ctx.settings.tie_break)?;

    println!("{} ({})", report.group_name, report.currency_code);
    println!();
    println!(
        "{}",
        format_balance_table(&report.balances, &report.currency_code, ctx.color)
    );

    Ok(())
}

/// Print the transfers that settle the group
pub fn handle_settle_command(
    ctx: &CliContext,
    group_file: &Path,
    tie_break: Option<TieBreak>,
) -> SplitResult<()> {
    let group = ctx.load_group(group_file)?;
    let tie_break = tie_break.unwrap_or(ctx.settings.tie_break);
    let report = SettlementReport::generate(&group, tie_break)?;

    println!("Settling {}", report.group_name);
    println!();
    println!(
        "{}",
        format_settlement_list(&report.settlements, &report.currency_code)
    );
    if !report.is_settled() {
        println!(
            "Total transferred: {}",
            format_cents(report.total_transferred(), &report.currency_code)
        );
    }

    Ok(())
}

/// Print the group overview
pub fn handle_summary_command(
    ctx: &CliContext,
    group_file: &Path,
    recent: Option<usize>,
) -> SplitResult<()> {
    let group = ctx.load_group(group_file)?;
    let limit = recent.unwrap_or(ctx.settings.recent_expense_limit);
    let overview = GroupOverview::generate(&group, limit)?;

    print!("{}", format_group_overview(&overview, ctx.color));

    Ok(())
}

/// Print one member's activity; the member is given by name or id
pub fn handle_member_command(ctx: &CliContext, group_file: &Path, member: &str) -> SplitResult<()> {
    let group = ctx.load_group(group_file)?;
    let member_id = group
        .find_member(member)
        .map(|m| m.id)
        .ok_or_else(|| SplitError::member_not_found(member))?;
    let activity = MemberActivity::generate(&group, member_id)?;

    print!(
        "{}",
        format_member_activity(&activity, &group.currency_code, ctx.color)
    );

    Ok(())
}
