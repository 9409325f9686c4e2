//! CLI command for showing and changing settings

use tracing::info;

use crate::error::{SplitError, SplitResult};

use super::CliContext;

/// Print paths and settings, or apply `KEY=VALUE` changes and save them
pub fn handle_config_command(ctx: &CliContext, assignments: &[String]) -> SplitResult<()> {
    if assignments.is_empty() {
        print_config(ctx);
        return Ok(());
    }

    let mut settings = ctx.settings.clone();
    for assignment in assignments {
        let (key, value) = assignment.split_once('=').ok_or_else(|| {
            SplitError::Config(format!("Expected KEY=VALUE, got '{}'", assignment))
        })?;
        settings.set(key, value)?;
    }

    settings.save(&ctx.paths)?;
    info!(path = %ctx.paths.settings_file().display(), "saved settings");
    println!("Saved settings to {}", ctx.paths.settings_file().display());

    Ok(())
}

fn print_config(ctx: &CliContext) {
    println!("split-ledger Configuration");
    println!("==========================");
    println!("Base directory:   {}", ctx.paths.base_dir().display());
    println!("Settings file:    {}", ctx.paths.settings_file().display());
    println!("Groups directory: {}", ctx.paths.groups_dir().display());
    println!();
    println!("Default currency: {}", ctx.settings.default_currency_code);
    println!("Tie-break:        {:?}", ctx.settings.tie_break);
    println!("Recent expenses:  {}", ctx.settings.recent_expense_limit);
    println!("Color output:     {}", ctx.settings.color_output);
}
