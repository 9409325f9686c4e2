//! Member Activity Report
//!
//! What one member paid for, what they took part in, and how their share
//! breaks down by category.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{SplitError, SplitResult};
use crate::models::{Balance, Expense, ExpenseCategory, ExpenseId, Group, MemberId, Money};
use crate::services::BalanceEngine;

use super::group_overview::{category_totals, CategoryTotal};

/// An expense as seen from one member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityLine {
    pub expense_id: ExpenseId,
    pub title: String,
    pub date: NaiveDate,
    pub category: ExpenseCategory,
    /// Full expense amount
    pub amount: Money,
    /// This member's split, zero if they were not part of it
    pub share: Money,
}

impl ActivityLine {
    fn new(expense: &Expense, member_id: MemberId) -> Self {
        Self {
            expense_id: expense.id,
            title: expense.title.clone(),
            date: expense.date,
            category: expense.category,
            amount: expense.amount,
            share: expense.share_of(member_id),
        }
    }
}

/// Member Activity Report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberActivity {
    pub member_id: MemberId,
    pub name: String,
    /// Expenses this member paid, newest first
    pub paid_expenses: Vec<ActivityLine>,
    /// Expenses this member has a split in, newest first
    pub involved_expenses: Vec<ActivityLine>,
    pub total_paid: Money,
    pub total_share: Money,
    /// Member's share per category
    pub category_breakdown: Vec<CategoryTotal>,
}

impl MemberActivity {
    /// Generate the report for one member of the group
    pub fn generate(group: &Group, member_id: MemberId) -> SplitResult<Self> {
        let member = group
            .member(member_id)
            .ok_or_else(|| SplitError::member_not_found(member_id.to_string()))?;

        let mut paid: Vec<&Expense> = group
            .expenses
            .iter()
            .filter(|e| e.payer_id == member_id)
            .collect();
        paid.sort_by(|a, b| b.date.cmp(&a.date));

        let mut involved: Vec<&Expense> = group
            .expenses
            .iter()
            .filter(|e| e.involves(member_id))
            .collect();
        involved.sort_by(|a, b| b.date.cmp(&a.date));

        // Totals come from the engine so oversized documents fail here
        let balances = BalanceEngine::new().compute_balances(&group.members, &group.expenses)?;
        let balance = balances
            .iter()
            .find(|b| b.member_id == member_id)
            .copied()
            .unwrap_or_else(|| Balance::zero(member_id));
        let category_breakdown =
            category_totals(involved.iter().map(|e| (e.category, e.share_of(member_id))));

        Ok(Self {
            member_id,
            name: member.name.clone(),
            paid_expenses: paid.iter().map(|e| ActivityLine::new(e, member_id)).collect(),
            involved_expenses: involved
                .iter()
                .map(|e| ActivityLine::new(e, member_id))
                .collect(),
            total_paid: balance.paid,
            total_share: balance.share,
            category_breakdown,
        })
    }

    /// paid − share
    pub fn net(&self) -> Money {
        self.total_paid - self.total_share
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Member, Split};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, d).unwrap()
    }

    #[test]
    fn test_generate() {
        let mut group = Group::new("Office lunch", "USD");
        let a = group.add_member(Member::new("Ana"));
        let b = group.add_member(Member::new("Ben"));

        group.add_expense(
            Expense::new("Pizza", Money::from_cents(3000), a, day(4))
                .with_category(ExpenseCategory::Food)
                .with_splits(vec![
                    Split::new(a, Money::from_cents(1000)),
                    Split::new(b, Money::from_cents(2000)),
                ]),
        );
        group.add_expense(
            Expense::new("Coffee", Money::from_cents(800), b, day(6))
                .with_category(ExpenseCategory::Drinks)
                .with_splits(vec![Split::new(b, Money::from_cents(800))]),
        );
        group.add_expense(
            Expense::new("Cab", Money::from_cents(1200), b, day(5))
                .with_category(ExpenseCategory::Transport)
                .with_splits(vec![
                    Split::new(a, Money::from_cents(600)),
                    Split::new(b, Money::from_cents(600)),
                ]),
        );

        let activity = MemberActivity::generate(&group, a).unwrap();
        assert_eq!(activity.name, "Ana");
        assert_eq!(activity.paid_expenses.len(), 1);
        assert_eq!(activity.involved_expenses.len(), 2);
        assert_eq!(activity.involved_expenses[0].title, "Cab");
        assert_eq!(activity.involved_expenses[0].share, Money::from_cents(600));
        assert_eq!(activity.total_paid, Money::from_cents(3000));
        assert_eq!(activity.total_share, Money::from_cents(1600));
        assert_eq!(activity.net(), Money::from_cents(1400));
        assert_eq!(activity.category_breakdown[0].category, ExpenseCategory::Food);

        let ben = MemberActivity::generate(&group, b).unwrap();
        assert_eq!(ben.paid_expenses[0].title, "Coffee");
        assert_eq!(ben.net(), Money::from_cents(-1400));
    }

    #[test]
    fn test_oversized_totals_fail() {
        let mut group = Group::new("Billionaires", "USD");
        let a = group.add_member(Member::new("Ana"));
        let b = group.add_member(Member::new("Ben"));
        let half = Money::from_cents(i64::MAX / 2 + 1);
        for title in ["Yacht", "Jet"] {
            group.add_expense(
                Expense::new(title, half, a, day(1)).with_splits(vec![Split::new(b, half)]),
            );
        }

        let err = MemberActivity::generate(&group, a).unwrap_err();
        assert!(err.is_validation(), "{:?}", err);
    }

    #[test]
    fn test_unknown_member() {
        let group = Group::new("Empty", "USD");
        let err = MemberActivity::generate(&group, MemberId::new()).unwrap_err();
        assert!(err.is_not_found());
    }
}
