//! CLI command for previewing an equal split

use std::collections::HashSet;
use std::path::PathBuf;

use clap::Args;

use crate::display::{format_cents, format_split_preview};
use crate::error::{SplitError, SplitResult};
use crate::models::{Group, Member, MemberId, Money};
use crate::services::{convert, FixedRates, SplitAllocator, SplitMode};

use super::CliContext;

/// Arguments for `split`
#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Amount to split (e.g. "42.10" or "42,10")
    pub amount: String,

    /// Participants, in order; the first one absorbs any leftover cents
    #[arg(required_unless_present = "group")]
    pub names: Vec<String>,

    /// Take participants from a group document, oldest member first
    /// (all members when no names are given)
    #[arg(long)]
    pub group: Option<PathBuf>,

    /// Currency the amount is in, when it differs from the ledger currency
    #[arg(long)]
    pub from: Option<String>,

    /// Exchange rate: ledger units per one unit of --from
    #[arg(long, requires = "from")]
    pub rate: Option<f64>,

    /// Ledger currency (defaults to the group's, then the configured currency)
    #[arg(long, env = "SPLIT_LEDGER_CURRENCY")]
    pub currency: Option<String>,
}

/// Show how an amount would be split equally
pub fn handle_split_command(ctx: &CliContext, args: SplitArgs) -> SplitResult<()> {
    let group = match &args.group {
        Some(file) => Some(ctx.load_group(file)?),
        None => None,
    };
    let ledger_code = args
        .currency
        .as_deref()
        .or(group.as_ref().map(|g| g.currency_code.as_str()))
        .unwrap_or(ctx.settings.default_currency_code.as_str())
        .trim()
        .to_uppercase();

    let entered = Money::parse(&args.amount)
        .map_err(|e| SplitError::Validation(e.to_string()))?;

    let total = match args.from.as_deref() {
        Some(from) => {
            let mut rates = FixedRates::new();
            if let Some(rate) = args.rate {
                rates = rates.with_rate(from, &ledger_code, rate);
            }
            let converted = convert(&rates, entered, from, &ledger_code)?;
            println!(
                "{} = {}",
                format_cents(entered, from),
                format_cents(converted, &ledger_code)
            );
            converted
        }
        None => entered,
    };

    let (group, participants) = match group {
        Some(group) => {
            let participants = group_participants(&group, &args.names)?;
            (group, participants)
        }
        None => {
            // Throwaway group so the preview can show names
            let mut group = Group::new("preview", ledger_code.clone());
            let participants = args
                .names
                .iter()
                .map(|name| group.add_member(Member::new(name.trim())))
                .collect();
            (group, participants)
        }
    };

    let splits = SplitAllocator::new().allocate_equal(total, &participants)?;

    print!(
        "{}",
        format_split_preview(&group, total, &splits, SplitMode::Equal, &ledger_code)
    );

    Ok(())
}

/// Named members (or everyone), ordered oldest first
fn group_participants(group: &Group, names: &[String]) -> SplitResult<Vec<MemberId>> {
    let mut wanted = HashSet::with_capacity(names.len());
    for name in names {
        let member = group
            .find_member(name)
            .ok_or_else(|| SplitError::member_not_found(name.trim()))?;
        if !wanted.insert(member.id) {
            return Err(SplitError::Validation(format!(
                "{} is listed more than once",
                member.name
            )));
        }
    }

    Ok(group
        .members_by_seniority()
        .into_iter()
        .filter(|m| names.is_empty() || wanted.contains(&m.id))
        .map(|m| m.id)
        .collect())
}
