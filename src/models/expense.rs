//! Expense model
//!
//! An expense is paid by one member and split between one or more members.
//! The amount is always stored in the group's ledger currency; when the user
//! entered it in another currency, the original input is kept alongside.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::category::ExpenseCategory;
use super::ids::{ExpenseId, MemberId};
use super::money::Money;

/// The portion of an expense attributed to one member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Split {
    /// The member this share belongs to
    pub member_id: MemberId,

    /// Share in ledger currency cents (never negative)
    pub amount: Money,
}

impl Split {
    /// Create a new split
    pub fn new(member_id: MemberId, amount: Money) -> Self {
        Self { member_id, amount }
    }
}

/// A shared expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    #[serde(default)]
    pub id: ExpenseId,

    /// Short description ("Dinner", "Taxi to airport")
    #[serde(default)]
    pub title: String,

    /// Amount in the ledger currency; this is what balances are computed from
    pub amount: Money,

    /// Currency the amount was typed in; empty when no conversion happened
    #[serde(default)]
    pub original_currency_code: String,

    /// Amount before conversion; zero when no conversion happened
    #[serde(default)]
    pub original_amount: Money,

    #[serde(default)]
    pub category: ExpenseCategory,

    /// Day the expense happened
    pub date: NaiveDate,

    #[serde(default)]
    pub notes: String,

    /// Member who paid the full amount
    pub payer_id: MemberId,

    /// Per-member shares; must sum to `amount`
    #[serde(default)]
    pub splits: Vec<Split>,

    /// When the expense was recorded
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Create a new expense with no splits
    pub fn new(title: impl Into<String>, amount: Money, payer_id: MemberId, date: NaiveDate) -> Self {
        Self {
            id: ExpenseId::new(),
            title: title.into(),
            amount,
            original_currency_code: String::new(),
            original_amount: Money::zero(),
            category: ExpenseCategory::Other,
            date,
            notes: String::new(),
            payer_id,
            splits: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Replace the splits
    pub fn with_splits(mut self, splits: Vec<Split>) -> Self {
        self.splits = splits;
        self
    }

    /// Set the category
    pub fn with_category(mut self, category: ExpenseCategory) -> Self {
        self.category = category;
        self
    }

    /// Record the pre-conversion input
    pub fn with_original(mut self, currency_code: impl Into<String>, amount: Money) -> Self {
        self.original_currency_code = currency_code.into();
        self.original_amount = amount;
        self
    }

    /// Sum of all split amounts, `None` if it does not fit
    pub fn splits_total(&self) -> Option<Money> {
        Money::checked_sum(self.splits.iter().map(|s| s.amount))
    }

    /// The split belonging to a member, if they participate
    pub fn split_for(&self, member_id: MemberId) -> Option<&Split> {
        self.splits.iter().find(|s| s.member_id == member_id)
    }

    /// A member's share, zero when they do not participate
    pub fn share_of(&self, member_id: MemberId) -> Money {
        self.split_for(member_id)
            .map(|s| s.amount)
            .unwrap_or_default()
    }

    /// Check whether a member has a split in this expense
    pub fn involves(&self, member_id: MemberId) -> bool {
        self.split_for(member_id).is_some()
    }

    /// Participant ids in split order
    pub fn participant_ids(&self) -> Vec<MemberId> {
        self.splits.iter().map(|s| s.member_id).collect()
    }

    /// Check whether the amount was converted from another currency
    pub fn is_converted(&self, ledger_currency: &str) -> bool {
        !self.original_currency_code.is_empty() && self.original_currency_code != ledger_currency
    }

    /// The amount as originally entered (falls back to the ledger amount)
    pub fn original_amount_or_amount(&self) -> Money {
        if self.original_amount.is_zero() {
            self.amount
        } else {
            self.original_amount
        }
    }

    /// Structural checks the balance engine relies on
    ///
    /// Does not check the split total; a mismatch there is caught as a
    /// conservation violation when balances are computed.
    pub fn validate_structure(&self) -> Result<(), ExpenseValidationError> {
        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount));
        }

        let mut seen = HashSet::with_capacity(self.splits.len());
        for split in &self.splits {
            if split.amount.is_negative() {
                return Err(ExpenseValidationError::NegativeSplit {
                    member_id: split.member_id,
                    amount: split.amount,
                });
            }
            if !seen.insert(split.member_id) {
                return Err(ExpenseValidationError::DuplicateSplitMember(split.member_id));
            }
        }

        Ok(())
    }

    /// Full validation, including the split total
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.title.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyTitle);
        }

        self.validate_structure()?;

        if self.splits.is_empty() {
            return Err(ExpenseValidationError::NoSplits);
        }

        let splits_total = self
            .splits_total()
            .ok_or(ExpenseValidationError::SplitsOverflow)?;
        if splits_total != self.amount {
            return Err(ExpenseValidationError::SplitsMismatch {
                expense_amount: self.amount,
                splits_total,
            });
        }

        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.title,
            self.amount
        )
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyTitle,
    NonPositiveAmount(Money),
    NoSplits,
    NegativeSplit { member_id: MemberId, amount: Money },
    DuplicateSplitMember(MemberId),
    SplitsMismatch {
        expense_amount: Money,
        splits_total: Money,
    },
    SplitsOverflow,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Expense title cannot be empty"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Expense amount must be positive, got {}", amount)
            }
            Self::NoSplits => write!(f, "Expense must be split between at least one member"),
            Self::NegativeSplit { member_id, amount } => {
                write!(f, "Split for {} is negative ({})", member_id, amount)
            }
            Self::DuplicateSplitMember(member_id) => {
                write!(f, "Member {} appears more than once in the splits", member_id)
            }
            Self::SplitsMismatch {
                expense_amount,
                splits_total,
            } => write!(
                f,
                "Split totals ({}) do not match expense amount ({})",
                splits_total, expense_amount
            ),
            Self::SplitsOverflow => write!(f, "Split totals exceed the largest amount"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
