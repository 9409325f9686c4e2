//! Balance engine
//!
//! Folds every expense of a group into per-member paid/share totals.
//! The result always has exactly one entry per input member, in input order.

use std::collections::HashMap;

use tracing::{debug, error, warn};

use crate::error::{SplitError, SplitResult};
use crate::models::{Balance, Expense, Member, MemberId, Money};

/// Stateless balance calculator
#[derive(Debug, Clone, Copy, Default)]
pub struct BalanceEngine;

impl BalanceEngine {
    pub fn new() -> Self {
        Self
    }

    /// Compute paid, share and net for every member
    ///
    /// Every member starts at zero paid and zero share; members without any
    /// activity come back settled. A payer or split member missing from
    /// `members` fails the whole computation with `DanglingReference`.
    /// If the resulting nets do not sum to zero (a stored split total that
    /// drifted from its expense amount), `ConservationViolation` is returned.
    pub fn compute_balances(
        &self,
        members: &[Member],
        expenses: &[Expense],
    ) -> SplitResult<Vec<Balance>> {
        let mut balances: Vec<Balance> = members.iter().map(|m| Balance::zero(m.id)).collect();
        let index: HashMap<MemberId, usize> = members
            .iter()
            .enumerate()
            .map(|(i, m)| (m.id, i))
            .collect();
        if index.len() != members.len() {
            return Err(SplitError::Validation(
                "Member list contains the same member more than once".into(),
            ));
        }

        for expense in expenses {
            expense
                .validate_structure()
                .map_err(|e| SplitError::Validation(format!("Expense {}: {}", expense.id, e)))?;

            let payer = *index.get(&expense.payer_id).ok_or_else(|| {
                warn!(expense = %expense.id, payer = %expense.payer_id, "payer is not a group member");
                SplitError::dangling_payer(expense.payer_id, expense.id)
            })?;
            balances[payer].paid = balances[payer]
                .paid
                .checked_add(expense.amount)
                .ok_or_else(|| overflow("paid total", expense))?;

            for split in &expense.splits {
                let slot = *index.get(&split.member_id).ok_or_else(|| {
                    warn!(expense = %expense.id, member = %split.member_id, "split member is not a group member");
                    SplitError::dangling_split_member(split.member_id, expense.id)
                })?;
                balances[slot].share = balances[slot]
                    .share
                    .checked_add(split.amount)
                    .ok_or_else(|| overflow("share total", expense))?;
            }
        }

        // Paid and share are both non-negative, so every net fits; the group
        // total and the net sum may not.
        Money::checked_sum(balances.iter().map(|b| b.paid))
            .ok_or_else(|| SplitError::amount_overflow("group spending total"))?;
        let net_sum = balances
            .iter()
            .try_fold(Money::zero(), |acc, b| b.checked_net().and_then(|net| acc.checked_add(net)))
            .ok_or_else(|| SplitError::amount_overflow("sum of net balances"))?;
        if !net_sum.is_zero() {
            error!(net_sum = net_sum.cents(), "net balances do not sum to zero");
            return Err(SplitError::ConservationViolation(format!(
                "net balances sum to {} instead of zero",
                net_sum
            )));
        }

        debug!(
            members = members.len(),
            expenses = expenses.len(),
            "computed balances"
        );
        Ok(balances)
    }

    /// Order balances for display: largest |net| first, ties keep input order
    pub fn sort_for_display(&self, balances: &mut [Balance]) {
        balances.sort_by_key(|b| std::cmp::Reverse(b.net().abs()));
    }
}

fn overflow(total: &str, expense: &Expense) -> SplitError {
    warn!(expense = %expense.id, total, "amount overflow");
    SplitError::amount_overflow(format!("{} exceeds the largest amount at expense {}", total, expense.id))
}
