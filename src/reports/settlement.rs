//! Settlement Report
//!
//! Balances and the transfers that settle them, with member names resolved
//! for display and export.

use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{SplitError, SplitResult};
use crate::models::{Balance, Group, MemberId, Money};
use crate::services::{BalanceEngine, SettlementSolver, TieBreak};

/// One member's balance with their name attached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberBalanceRow {
    pub member_id: MemberId,
    pub name: String,
    pub paid: Money,
    pub share: Money,
    /// paid − share
    pub net: Money,
}

impl MemberBalanceRow {
    pub fn from_balance(group: &Group, balance: &Balance) -> Self {
        Self {
            member_id: balance.member_id,
            name: group.member_name(balance.member_id).to_string(),
            paid: balance.paid,
            share: balance.share,
            net: balance.net(),
        }
    }
}

/// One transfer with both names attached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementRow {
    pub from_member_id: MemberId,
    pub from_name: String,
    pub to_member_id: MemberId,
    pub to_name: String,
    pub amount: Money,
}

/// Settlement Report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementReport {
    pub group_name: String,
    pub currency_code: String,
    /// Sorted by |net| descending
    pub balances: Vec<MemberBalanceRow>,
    /// In the order the solver emitted them
    pub settlements: Vec<SettlementRow>,
}

impl SettlementReport {
    /// Generate the report for a group
    ///
    /// Settlements are solved over balances in member order; the balance
    /// rows are re-sorted for display afterwards.
    pub fn generate(group: &Group, tie_break: TieBreak) -> SplitResult<Self> {
        let engine = BalanceEngine::new();
        let mut balances = engine.compute_balances(&group.members, &group.expenses)?;
        let settlements = SettlementSolver::new(tie_break).compute_settlements(&balances)?;

        engine.sort_for_display(&mut balances);

        Ok(Self {
            group_name: group.name.clone(),
            currency_code: group.currency_code.clone(),
            balances: balances
                .iter()
                .map(|b| MemberBalanceRow::from_balance(group, b))
                .collect(),
            settlements: settlements
                .iter()
                .map(|s| SettlementRow {
                    from_member_id: s.from_member_id,
                    from_name: group.member_name(s.from_member_id).to_string(),
                    to_member_id: s.to_member_id,
                    to_name: group.member_name(s.to_member_id).to_string(),
                    amount: s.amount,
                })
                .collect(),
        })
    }

    /// Check whether nobody owes anything
    pub fn is_settled(&self) -> bool {
        self.settlements.is_empty()
    }

    /// Total amount moved by the settlement plan
    pub fn total_transferred(&self) -> Money {
        self.settlements.iter().map(|s| s.amount).sum()
    }

    /// Export the report to CSV: one section for balances, one for transfers
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> SplitResult<()> {
        let export_err = |e: std::io::Error| SplitError::Export(e.to_string());

        writeln!(writer, "Section,Member,Counterparty,Paid,Share,Net,Amount").map_err(export_err)?;

        for row in &self.balances {
            writeln!(
                writer,
                "balance,{},,{},{},{},",
                escape_csv(&row.name),
                row.paid,
                row.share,
                row.net
            )
            .map_err(export_err)?;
        }

        for row in &self.settlements {
            writeln!(
                writer,
                "settlement,{},{},,,,{}",
                escape_csv(&row.from_name),
                escape_csv(&row.to_name),
                row.amount
            )
            .map_err(export_err)?;
        }

        Ok(())
    }
}

/// Quote a CSV field when it contains a delimiter, quote or newline
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, Member, Split};
    use crate::services::SplitAllocator;
    use chrono::NaiveDate;

    fn trip() -> (Group, Vec<MemberId>) {
        let mut group = Group::new("Lisbon", "EUR");
        let a = group.add_member(Member::new("Ana"));
        let b = group.add_member(Member::new("Ben"));
        let c = group.add_member(Member::new("Cleo, Jr."));

        let splits = SplitAllocator
            .allocate_equal(Money::from_cents(9000), &[a, b, c])
            .unwrap();
        group.add_expense(
            Expense::new(
                "Dinner",
                Money::from_cents(9000),
                a,
                NaiveDate::from_ymd_opt(2025, 5, 2).unwrap(),
            )
            .with_splits(splits),
        );
        (group, vec![a, b, c])
    }

    #[test]
    fn test_generate() {
        let (group, ids) = trip();
        let report = SettlementReport::generate(&group, TieBreak::InputOrder).unwrap();

        assert_eq!(report.currency_code, "EUR");
        assert_eq!(report.balances[0].member_id, ids[0]);
        assert_eq!(report.balances[0].net, Money::from_cents(6000));
        assert_eq!(report.settlements.len(), 2);
        assert_eq!(report.settlements[0].from_name, "Ben");
        assert_eq!(report.settlements[0].to_name, "Ana");
        assert_eq!(report.settlements[1].from_name, "Cleo, Jr.");
        assert_eq!(report.total_transferred(), Money::from_cents(6000));
        assert!(!report.is_settled());
    }

    #[test]
    fn test_generate_propagates_dangling_reference() {
        let (mut group, ids) = trip();
        group.members.retain(|m| m.id != ids[0]);

        let err = SettlementReport::generate(&group, TieBreak::InputOrder).unwrap_err();
        assert!(matches!(err, SplitError::DanglingReference { .. }));
    }

    #[test]
    fn test_empty_group_is_settled() {
        let group = Group::new("Empty", "USD");
        let report = SettlementReport::generate(&group, TieBreak::MemberId).unwrap();
        assert!(report.is_settled());
        assert!(report.balances.is_empty());
    }

    #[test]
    fn test_export_csv() {
        let (group, _) = trip();
        let report = SettlementReport::generate(&group, TieBreak::InputOrder).unwrap();

        let mut out = Vec::new();
        report.export_csv(&mut out).unwrap();
        let csv = String::from_utf8(out).unwrap();

        assert!(csv.starts_with("Section,Member,Counterparty,Paid,Share,Net,Amount\n"));
        assert!(csv.contains("balance,Ana,,90.00,30.00,60.00,\n"));
        assert!(csv.contains("settlement,Ben,Ana,,,,30.00\n"));
        assert!(csv.contains("settlement,\"Cleo, Jr.\",Ana,,,,30.00\n"));
    }

    #[test]
    fn test_manual_split_report() {
        let mut group = Group::new("Flat", "USD");
        let a = group.add_member(Member::new("A"));
        let b = group.add_member(Member::new("B"));
        group.add_expense(
            Expense::new(
                "Groceries",
                Money::from_cents(1000),
                b,
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            )
            .with_splits(vec![
                Split::new(a, Money::from_cents(700)),
                Split::new(b, Money::from_cents(300)),
            ]),
        );

        let report = SettlementReport::generate(&group, TieBreak::InputOrder).unwrap();
        assert_eq!(report.settlements.len(), 1);
        assert_eq!(report.settlements[0].from_member_id, a);
        assert_eq!(report.settlements[0].to_member_id, b);
        assert_eq!(report.settlements[0].amount, Money::from_cents(700));
    }
}
