//! Split allocation
//!
//! Turns an expense total into per-member shares. Equal splits put the
//! indivisible remainder on the first listed participant, so callers should
//! list participants in a stable order (oldest member first).

use std::collections::HashSet;

use tracing::warn;

use crate::error::{SplitError, SplitResult};
use crate::models::{MemberId, Money, Split};

/// How an expense's total was divided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitMode {
    /// Everyone pays the same, first participant absorbs the remainder
    Equal,
    /// Amounts entered per member
    Manual,
}

/// Result of an equal split
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SplitAllocation {
    /// Shares in participant order; sums to the total
    pub shares: Vec<Split>,
    /// Cents added on top of the base share for the first participant
    pub remainder: Money,
}

impl SplitAllocation {
    /// Share allocated to a participant
    pub fn get(&self, member_id: MemberId) -> Option<Money> {
        self.shares
            .iter()
            .find(|s| s.member_id == member_id)
            .map(|s| s.amount)
    }

    pub fn total(&self) -> Money {
        self.shares.iter().map(|s| s.amount).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    pub fn into_splits(self) -> Vec<Split> {
        self.shares
    }
}

/// Stateless split calculator
#[derive(Debug, Clone, Copy, Default)]
pub struct SplitAllocator;

impl SplitAllocator {
    pub fn new() -> Self {
        Self
    }

    /// Divide `total` equally between `participants`
    ///
    /// Every participant receives `total / n`; the participant at position 0
    /// also receives `total % n`. An empty participant list yields an empty
    /// allocation, which callers must treat as unsplittable.
    pub fn equal_split(&self, total: Money, participants: &[MemberId]) -> SplitAllocation {
        if participants.is_empty() {
            return SplitAllocation::default();
        }
        debug_assert!(!total.is_negative(), "equal split of a negative total");

        let count = participants.len() as i64;
        let base = total.cents() / count;
        let remainder = total.cents() % count;

        let shares = participants
            .iter()
            .enumerate()
            .map(|(index, &member_id)| {
                let extra = if index == 0 { remainder } else { 0 };
                Split::new(member_id, Money::from_cents(base + extra))
            })
            .collect();

        SplitAllocation {
            shares,
            remainder: Money::from_cents(remainder),
        }
    }

    /// Checked equal split producing stored splits
    ///
    /// Rejects an empty participant list, a negative total, and a
    /// participant listed twice.
    pub fn allocate_equal(&self, total: Money, participants: &[MemberId]) -> SplitResult<Vec<Split>> {
        if participants.is_empty() {
            return Err(SplitError::EmptyParticipants);
        }
        if total.is_negative() {
            return Err(SplitError::Validation(format!(
                "Cannot split a negative amount ({})",
                total
            )));
        }
        ensure_unique(participants.iter().copied())?;

        Ok(self.equal_split(total, participants).into_splits())
    }

    /// Check that a manual split adds up to `total`
    ///
    /// Returns `InvalidSplit` carrying `total - sum`: positive when cents are
    /// left unassigned, negative when the splits exceed the total.
    pub fn validate_manual_split(&self, splits: &[Split], total: Money) -> SplitResult<()> {
        let assigned = Money::checked_sum(splits.iter().map(|s| s.amount))
            .ok_or_else(|| SplitError::amount_overflow("manual split total"))?;
        let difference = total
            .checked_sub(assigned)
            .ok_or_else(|| SplitError::amount_overflow("manual split difference"))?;

        if difference.is_zero() {
            Ok(())
        } else {
            warn!(
                total = total.cents(),
                assigned = assigned.cents(),
                "manual split does not match expense total"
            );
            Err(SplitError::InvalidSplit { difference })
        }
    }

    /// Validate a manual split and hand back the splits to store
    pub fn manual_splits(&self, splits: Vec<Split>, total: Money) -> SplitResult<Vec<Split>> {
        if splits.is_empty() {
            return Err(SplitError::EmptyParticipants);
        }
        if let Some(negative) = splits.iter().find(|s| s.amount.is_negative()) {
            return Err(SplitError::Validation(format!(
                "Split for {} is negative ({})",
                negative.member_id, negative.amount
            )));
        }
        ensure_unique(splits.iter().map(|s| s.member_id))?;
        self.validate_manual_split(&splits, total)?;
        Ok(splits)
    }

    /// Work out whether stored splits came from an equal split
    ///
    /// The equal split is recomputed over the splits' own member order, so an
    /// expense whose remainder went to its first listed split reads as Equal.
    pub fn detect_split_mode(&self, total: Money, splits: &[Split]) -> SplitMode {
        if total.is_negative() {
            return SplitMode::Manual;
        }
        let participants: Vec<MemberId> = splits.iter().map(|s| s.member_id).collect();
        let equal = self.equal_split(total, &participants);

        let matches = splits
            .iter()
            .all(|split| equal.get(split.member_id) == Some(split.amount));

        if matches {
            SplitMode::Equal
        } else {
            SplitMode::Manual
        }
    }
}

fn ensure_unique(ids: impl Iterator<Item = MemberId>) -> SplitResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(SplitError::Validation(format!(
                "Member {} is listed more than once",
                id
            )));
        }
    }
    Ok(())
}
