use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

use split_ledger::cli::{
    handle_balances_command, handle_check_command, handle_config_command, handle_export_command,
    handle_member_command, handle_settle_command, handle_split_command, handle_summary_command,
    CliContext, ExportArgs, SplitArgs,
};
use split_ledger::config::{LedgerPaths, Settings};
use split_ledger::services::TieBreak;

#[derive(Parser)]
#[command(
    name = "splitledger",
    version,
    about = "Shared-expense balances and settlements",
    long_about = "splitledger reads a group's expense document and works out who \
                  paid what, who owes what, and the fewest transfers that settle \
                  everyone up. It never modifies the document."
)]
struct Cli {
    /// Disable colored amounts
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show each member's paid, share and net balance
    #[command(alias = "bal")]
    Balances {
        /// Group document (path or name in the groups directory)
        group: PathBuf,
    },

    /// Show the transfers that settle the group
    Settle {
        /// Group document (path or name in the groups directory)
        group: PathBuf,

        /// Order for equally sized balances
        #[arg(long, value_parser = parse_tie_break)]
        tie_break: Option<TieBreak>,
    },

    /// Show totals, spending by category and recent expenses
    Summary {
        /// Group document (path or name in the groups directory)
        group: PathBuf,

        /// Number of recent expenses to list
        #[arg(long)]
        recent: Option<usize>,
    },

    /// Show what one member paid for and took part in
    Member {
        /// Group document (path or name in the groups directory)
        group: PathBuf,

        /// Member name or ID
        member: String,
    },

    /// Validate every member and expense of a group
    Check {
        /// Group document (path or name in the groups directory)
        group: PathBuf,
    },

    /// Preview an equal split of an amount
    Split(SplitArgs),

    /// Export balances and settlements
    Export(ExportArgs),

    /// Show current configuration and paths, or change settings
    Config {
        /// Setting to change, as KEY=VALUE (currency, tie-break, recent, color)
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
    },
}

fn parse_tie_break(s: &str) -> Result<TieBreak, String> {
    s.parse()
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let paths = LedgerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let ctx = CliContext::new(paths, settings, cli.no_color);

    match cli.command {
        Commands::Balances { group } => handle_balances_command(&ctx, &group)?,
        Commands::Settle { group, tie_break } => handle_settle_command(&ctx, &group, tie_break)?,
        Commands::Summary { group, recent } => handle_summary_command(&ctx, &group, recent)?,
        Commands::Member { group, member } => handle_member_command(&ctx, &group, &member)?,
        Commands::Check { group } => handle_check_command(&ctx, &group)?,
        Commands::Split(args) => handle_split_command(&ctx, args)?,
        Commands::Export(args) => handle_export_command(&ctx, args)?,
        Commands::Config { set } => handle_config_command(&ctx, &set)?,
    }

    Ok(())
}
