//! Settlement solver
//!
//! Greedy debt minimization: repeatedly match the largest remaining creditor
//! with the largest remaining debtor and move the smaller of the two amounts.
//! Each step zeroes at least one party, so at most `n - 1` transfers are
//! emitted for `n` members with a nonzero net.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::{SplitError, SplitResult};
use crate::models::{Balance, MemberId, Money, Settlement};

/// Secondary ordering among parties owed (or owing) the same amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Earlier balances win ties
    #[default]
    InputOrder,
    /// Lower member ids win ties, independent of input order
    MemberId,
}

impl FromStr for TieBreak {
    type Err = String;

    /// Accepts `input-order`/`input` and `member-id`/`id`, any case, `_` or `-`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "input_order" | "input" => Ok(Self::InputOrder),
            "member_id" | "id" => Ok(Self::MemberId),
            other => Err(format!(
                "unknown tie-break '{}' (expected input-order or member-id)",
                other
            )),
        }
    }
}

/// A creditor or debtor with the amount still to settle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Party {
    member_id: MemberId,
    remaining: Money,
    rank: usize,
}

// Max-heap order: larger remaining first, then lower rank.
impl Ord for Party {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.remaining, Reverse(self.rank)).cmp(&(other.remaining, Reverse(other.rank)))
    }
}

impl PartialOrd for Party {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Stateless settlement calculator
#[derive(Debug, Clone, Copy, Default)]
pub struct SettlementSolver {
    tie_break: TieBreak,
}

impl SettlementSolver {
    pub fn new(tie_break: TieBreak) -> Self {
        Self { tie_break }
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// Compute transfers that bring every balance to zero
    ///
    /// Settlements are returned in emission order. If credits and debits do
    /// not cancel out, the solver stops when one side runs dry and reports a
    /// `ConservationViolation` instead of returning a partial plan.
    pub fn compute_settlements(&self, balances: &[Balance]) -> SplitResult<Vec<Settlement>> {
        let ranks = self.ranks(balances);

        let mut creditors = BinaryHeap::new();
        let mut debtors = BinaryHeap::new();
        for (balance, rank) in balances.iter().zip(ranks) {
            let overflow =
                || SplitError::amount_overflow(format!("net balance of {}", balance.member_id));
            let net = balance.checked_net().ok_or_else(overflow)?;
            let party = Party {
                member_id: balance.member_id,
                remaining: net.checked_abs().ok_or_else(overflow)?,
                rank,
            };
            if net.is_positive() {
                creditors.push(party);
            } else if net.is_negative() {
                debtors.push(party);
            }
        }

        let mut settlements = Vec::new();
        loop {
            let (Some(mut creditor), Some(mut debtor)) = (creditors.peek().copied(), debtors.peek().copied())
            else {
                break;
            };
            creditors.pop();
            debtors.pop();

            let amount = creditor.remaining.min(debtor.remaining);
            settlements.push(Settlement::new(debtor.member_id, creditor.member_id, amount));

            creditor.remaining -= amount;
            debtor.remaining -= amount;

            // A remainder keeps its original rank when it goes back in
            if creditor.remaining.is_positive() {
                creditors.push(creditor);
            }
            if debtor.remaining.is_positive() {
                debtors.push(debtor);
            }
        }

        if !creditors.is_empty() || !debtors.is_empty() {
            let unsettled_credit = describe_total(&creditors);
            let unsettled_debt = describe_total(&debtors);
            error!(
                creditors = creditors.len(),
                debtors = debtors.len(),
                "settlement left a residual imbalance"
            );
            return Err(SplitError::ConservationViolation(format!(
                "settlement left {} of credit and {} of debt unsettled",
                unsettled_credit, unsettled_debt
            )));
        }

        debug!(
            balances = balances.len(),
            settlements = settlements.len(),
            "computed settlements"
        );
        Ok(settlements)
    }

    /// Replay settlements on top of balances
    ///
    /// The payer's `paid` grows by the amount and the receiver's shrinks, so a
    /// complete settlement plan leaves every net at zero.
    pub fn apply_settlements(
        &self,
        balances: &[Balance],
        settlements: &[Settlement],
    ) -> SplitResult<Vec<Balance>> {
        let mut result = balances.to_vec();
        let index: HashMap<MemberId, usize> = result
            .iter()
            .enumerate()
            .map(|(i, b)| (b.member_id, i))
            .collect();

        for settlement in settlements {
            let from = *index
                .get(&settlement.from_member_id)
                .ok_or_else(|| SplitError::member_not_found(settlement.from_member_id.to_string()))?;
            let to = *index
                .get(&settlement.to_member_id)
                .ok_or_else(|| SplitError::member_not_found(settlement.to_member_id.to_string()))?;

            let overflow = || SplitError::amount_overflow("replaying settlements");
            result[from].paid = result[from].paid.checked_add(settlement.amount).ok_or_else(overflow)?;
            result[to].paid = result[to].paid.checked_sub(settlement.amount).ok_or_else(overflow)?;
        }

        Ok(result)
    }

    fn ranks(&self, balances: &[Balance]) -> Vec<usize> {
        match self.tie_break {
            TieBreak::InputOrder => (0..balances.len()).collect(),
            TieBreak::MemberId => {
                let mut order: Vec<usize> = (0..balances.len()).collect();
                order.sort_by_key(|&i| balances[i].member_id);
                let mut ranks = vec![0; balances.len()];
                for (rank, i) in order.into_iter().enumerate() {
                    ranks[i] = rank;
                }
                ranks
            }
        }
    }
}

fn describe_total(parties: &BinaryHeap<Party>) -> String {
    Money::checked_sum(parties.iter().map(|p| p.remaining))
        .map_or_else(|| "more than the largest amount".to_string(), |total| total.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balance(member_id: MemberId, net: i64) -> Balance {
        if net >= 0 {
            Balance {
                member_id,
                paid: Money::from_cents(net),
                share: Money::zero(),
            }
        } else {
            Balance {
                member_id,
                paid: Money::zero(),
                share: Money::from_cents(-net),
            }
        }
    }

    fn ids(n: usize) -> Vec<MemberId> {
        (0..n).map(|_| MemberId::new()).collect()
    }

    fn assert_fully_settled(balances: &[Balance], settlements: &[Settlement]) {
        let solver = SettlementSolver::default();
        let after = solver.apply_settlements(balances, settlements).unwrap();
        assert!(after.iter().all(|b| b.is_settled()), "left {:?}", after);

        let nonzero = balances.iter().filter(|b| !b.is_settled()).count();
        assert!(settlements.len() <= nonzero.saturating_sub(1));
        assert!(settlements.iter().all(|s| s.amount.is_positive()));
    }

    #[test]
    fn test_one_creditor_two_debtors() {
        let m = ids(3);
        let balances = vec![balance(m[0], 6000), balance(m[1], -3000), balance(m[2], -3000)];

        let settlements = SettlementSolver::default()
            .compute_settlements(&balances)
            .unwrap();

        assert_eq!(
            settlements,
            vec![
                Settlement::new(m[1], m[0], Money::from_cents(3000)),
                Settlement::new(m[2], m[0], Money::from_cents(3000)),
            ]
        );
        assert_fully_settled(&balances, &settlements);
    }

    #[test]
    fn test_largest_pairs_first() {
        let m = ids(4);
        let balances = vec![
            balance(m[0], 100),
            balance(m[1], 500),
            balance(m[2], -200),
            balance(m[3], -400),
        ];

        let settlements = SettlementSolver::default()
            .compute_settlements(&balances)
            .unwrap();

        assert_eq!(
            settlements,
            vec![
                Settlement::new(m[3], m[1], Money::from_cents(400)),
                Settlement::new(m[2], m[0], Money::from_cents(100)),
                Settlement::new(m[2], m[1], Money::from_cents(100)),
            ]
        );
        assert_fully_settled(&balances, &settlements);
    }

    #[test]
    fn test_simultaneous_zero_removes_both() {
        let m = ids(4);
        let balances = vec![
            balance(m[0], 300),
            balance(m[1], -300),
            balance(m[2], 200),
            balance(m[3], -200),
        ];

        let settlements = SettlementSolver::default()
            .compute_settlements(&balances)
            .unwrap();

        assert_eq!(settlements.len(), 2);
        assert_eq!(settlements[0], Settlement::new(m[1], m[0], Money::from_cents(300)));
        assert_eq!(settlements[1], Settlement::new(m[3], m[2], Money::from_cents(200)));
    }

    #[test]
    fn test_all_settled_yields_nothing() {
        let m = ids(3);
        let balances: Vec<Balance> = m.iter().map(|&id| Balance::zero(id)).collect();
        assert!(SettlementSolver::default()
            .compute_settlements(&balances)
            .unwrap()
            .is_empty());
        assert!(SettlementSolver::default().compute_settlements(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_tie_break_input_order() {
        let m = ids(3);
        let balances = vec![balance(m[0], -100), balance(m[1], -100), balance(m[2], 200)];

        let settlements = SettlementSolver::new(TieBreak::InputOrder)
            .compute_settlements(&balances)
            .unwrap();
        assert_eq!(settlements[0].from_member_id, m[0]);
        assert_eq!(settlements[1].from_member_id, m[1]);
    }

    #[test]
    fn test_tie_break_from_str() {
        assert_eq!("input-order".parse(), Ok(TieBreak::InputOrder));
        assert_eq!("Member_ID".parse(), Ok(TieBreak::MemberId));
        assert_eq!(" id ".parse(), Ok(TieBreak::MemberId));
        assert!("alphabetical".parse::<TieBreak>().is_err());
    }

    #[test]
    fn test_tie_break_member_id() {
        let low = MemberId::parse("00000000-0000-4000-8000-000000000001").unwrap();
        let high = MemberId::parse("ffffffff-0000-4000-8000-000000000001").unwrap();
        let creditor = MemberId::new();
        let balances = vec![balance(high, -100), balance(low, -100), balance(creditor, 200)];

        let settlements = SettlementSolver::new(TieBreak::MemberId)
            .compute_settlements(&balances)
            .unwrap();
        assert_eq!(settlements[0].from_member_id, low);
        assert_eq!(settlements[1].from_member_id, high);
    }

    #[test]
    fn test_remainder_keeps_its_rank() {
        // X and Y end up owed 1.00 each; X got there by settling with D first
        // and still wins the tie on its original position.
        let m = ids(4);
        let (x, y, d, e) = (m[0], m[1], m[2], m[3]);
        let balances = vec![balance(x, 300), balance(y, 100), balance(d, -200), balance(e, -200)];

        let settlements = SettlementSolver::new(TieBreak::InputOrder)
            .compute_settlements(&balances)
            .unwrap();

        assert_eq!(
            settlements,
            vec![
                Settlement::new(d, x, Money::from_cents(200)),
                Settlement::new(e, x, Money::from_cents(100)),
                Settlement::new(e, y, Money::from_cents(100)),
            ]
        );
        assert_fully_settled(&balances, &settlements);
    }

    #[test]
    fn test_unrepresentable_net_is_an_error() {
        let m = ids(2);
        let balances = vec![
            Balance {
                member_id: m[0],
                paid: Money::zero(),
                share: Money::from_cents(i64::MAX),
            },
            Balance {
                member_id: m[1],
                paid: Money::from_cents(i64::MIN),
                share: Money::zero(),
            },
        ];

        let err = SettlementSolver::default()
            .compute_settlements(&balances)
            .unwrap_err();
        assert!(err.is_validation(), "{:?}", err);
    }

    #[test]
    fn test_residual_is_reported() {
        let m = ids(2);
        let balances = vec![balance(m[0], 500), balance(m[1], -300)];

        let err = SettlementSolver::default()
            .compute_settlements(&balances)
            .unwrap_err();
        assert!(err.is_integrity_violation());
    }

    #[test]
    fn test_settles_many_balances() {
        // Deterministic pseudo-random nets that sum to zero.
        let mut seed: u64 = 0x5eed;
        for round in 0..50 {
            let n = 2 + round % 9;
            let m = ids(n);
            let mut nets = Vec::with_capacity(n);
            let mut running = 0i64;
            for _ in 0..n - 1 {
                seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                let net = (seed >> 33) as i64 % 20_001 - 10_000;
                running += net;
                nets.push(net);
            }
            nets.push(-running);

            let balances: Vec<Balance> = m.iter().zip(&nets).map(|(&id, &net)| balance(id, net)).collect();
            for tie_break in [TieBreak::InputOrder, TieBreak::MemberId] {
                let solver = SettlementSolver::new(tie_break);
                let settlements = solver.compute_settlements(&balances).unwrap();
                assert_fully_settled(&balances, &settlements);
                assert_eq!(settlements, solver.compute_settlements(&balances).unwrap());
            }
        }
    }

    #[test]
    fn test_apply_unknown_member() {
        let m = ids(2);
        let balances = vec![balance(m[0], 100), balance(m[1], -100)];
        let bogus = Settlement::new(MemberId::new(), m[0], Money::from_cents(100));

        let err = SettlementSolver::default()
            .apply_settlements(&balances, &[bogus])
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
