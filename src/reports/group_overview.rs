//! Group Overview Report
//!
//! Total spending, spending by category, per-member balances and the most
//! recent expenses of a group.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{SplitError, SplitResult};
use crate::models::{ExpenseCategory, ExpenseId, Group, Money};
use crate::services::BalanceEngine;

use super::settlement::MemberBalanceRow;

/// Spending in one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: ExpenseCategory,
    pub amount: Money,
    /// Share of the grand total, 0.0 to 1.0 (0.0 when the total is zero)
    pub fraction: f64,
}

/// Sum amounts per category, largest first
///
/// Ties keep category display order.
pub fn category_totals<I>(items: I) -> Vec<CategoryTotal>
where
    I: IntoIterator<Item = (ExpenseCategory, Money)>,
{
    let mut by_category: BTreeMap<ExpenseCategory, Money> = BTreeMap::new();
    for (category, amount) in items {
        *by_category.entry(category).or_default() += amount;
    }

    let total: Money = by_category.values().sum();
    let mut totals: Vec<CategoryTotal> = by_category
        .into_iter()
        .map(|(category, amount)| CategoryTotal {
            category,
            amount,
            fraction: if total.is_positive() {
                amount.cents() as f64 / total.cents() as f64
            } else {
                0.0
            },
        })
        .collect();
    totals.sort_by(|a, b| b.amount.cmp(&a.amount));
    totals
}

/// A recent expense line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentExpense {
    pub expense_id: ExpenseId,
    pub title: String,
    pub date: NaiveDate,
    pub amount: Money,
    pub payer_name: String,
    pub category: ExpenseCategory,
}

/// Group Overview Report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupOverview {
    pub group_name: String,
    pub currency_code: String,
    pub total_spent: Money,
    pub expense_count: usize,
    pub last_activity: Option<NaiveDate>,
    pub category_totals: Vec<CategoryTotal>,
    /// In member order
    pub members: Vec<MemberBalanceRow>,
    /// Newest first
    pub recent_expenses: Vec<RecentExpense>,
}

impl GroupOverview {
    /// Generate the overview, keeping at most `recent_limit` recent expenses
    pub fn generate(group: &Group, recent_limit: usize) -> SplitResult<Self> {
        let balances = BalanceEngine::new().compute_balances(&group.members, &group.expenses)?;
        let total_spent = group
            .total_spent()
            .ok_or_else(|| SplitError::amount_overflow("group spending total"))?;

        let mut recent: Vec<_> = group.expenses.iter().collect();
        recent.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(Self {
            group_name: group.name.clone(),
            currency_code: group.currency_code.clone(),
            total_spent,
            expense_count: group.expenses.len(),
            last_activity: group.last_activity(),
            category_totals: category_totals(group.expenses.iter().map(|e| (e.category, e.amount))),
            members: balances
                .iter()
                .map(|b| MemberBalanceRow::from_balance(group, b))
                .collect(),
            recent_expenses: recent
                .into_iter()
                .take(recent_limit)
                .map(|e| RecentExpense {
                    expense_id: e.id,
                    title: e.title.clone(),
                    date: e.date,
                    amount: e.amount,
                    payer_name: group.member_name(e.payer_id).to_string(),
                    category: e.category,
                })
                .collect(),
        })
    }
}
