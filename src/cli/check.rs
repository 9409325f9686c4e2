//! CLI command for checking a group document

use std::path::Path;

use crate::error::{SplitError, SplitResult};
use crate::services::{BalanceEngine, GroupCheck};

use super::CliContext;

/// Check every member and expense, then run the balance engine
///
/// Fails when any problem is found, so scripts can rely on the exit code.
pub fn handle_check_command(ctx: &CliContext, group_file: &Path) -> SplitResult<()> {
    let group = ctx.load_group(group_file)?;
    let check = GroupCheck::run(&group);

    println!(
        "Checked {} member{} and {} expense{} ({} equal, {} manual split{})",
        group.members.len(),
        if group.members.len() == 1 { "" } else { "s" },
        check.expenses_checked,
        if check.expenses_checked == 1 { "" } else { "s" },
        check.equal_splits,
        check.manual_splits,
        if check.manual_splits == 1 { "" } else { "s" },
    );

    if !check.is_clean() {
        for issue in &check.issues {
            match issue.expense_id {
                Some(id) => println!("  [{}] {}: {}", id, issue.subject, issue.message),
                None => println!("  [member] {}: {}", issue.subject, issue.message),
            }
        }
        return Err(SplitError::Validation(format!(
            "{} problem{} found in {}",
            check.issues.len(),
            if check.issues.len() == 1 { "" } else { "s" },
            group.name
        )));
    }

    BalanceEngine::new().compute_balances(&group.members, &group.expenses)?;
    println!("No problems found.");

    Ok(())
}
