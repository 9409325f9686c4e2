//! CLI command handlers
//!
//! Bridges clap argument parsing with the engine. Every handler loads its
//! group document fresh and prints to stdout; group documents are never
//! written back. Only `config --set` writes, and only the settings file.

pub mod check;
pub mod config;
pub mod export;
pub mod report;
pub mod split;

use std::path::Path;

use crate::config::{LedgerPaths, Settings};
use crate::error::SplitResult;
use crate::models::Group;
use crate::storage::load_group;

pub use check::handle_check_command;
pub use config::handle_config_command;
pub use export::{handle_export_command, ExportArgs};
pub use report::{
    handle_balances_command, handle_member_command, handle_settle_command, handle_summary_command,
};
pub use split::{handle_split_command, SplitArgs};

/// Resolved paths and settings shared by every command
#[derive(Debug, Clone)]
pub struct CliContext {
    pub paths: LedgerPaths,
    pub settings: Settings,
    /// Colors enabled for this run (settings combined with `--no-color`)
    pub color: bool,
}

impl CliContext {
    pub fn new(paths: LedgerPaths, settings: Settings, no_color: bool) -> Self {
        let color = settings.color_output && !no_color;
        Self {
            paths,
            settings,
            color,
        }
    }

    /// Load a group document given as a path or a name in the groups directory
    pub fn load_group(&self, arg: &Path) -> SplitResult<Group> {
        let path = self.paths.resolve_group_file(arg);
        load_group(path, &self.settings.default_currency_code)
    }
}
