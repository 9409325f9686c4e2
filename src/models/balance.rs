//! Member balance
//!
//! Derived value: how much a member paid versus how much of the group's
//! spending was attributed to them.

use serde::{Deserialize, Serialize};

use super::ids::MemberId;
use super::money::Money;

/// Paid and share totals for one member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub member_id: MemberId,

    /// Total of expenses this member paid for
    pub paid: Money,

    /// Total of splits attributed to this member
    pub share: Money,
}

impl Balance {
    /// A balance with nothing paid and nothing owed
    pub fn zero(member_id: MemberId) -> Self {
        Self {
            member_id,
            paid: Money::zero(),
            share: Money::zero(),
        }
    }

    /// paid − share: positive means the member is owed money
    pub fn net(&self) -> Money {
        self.paid - self.share
    }

    /// `net`, or `None` when paid and share are too far apart to subtract
    pub fn checked_net(&self) -> Option<Money> {
        self.paid.checked_sub(self.share)
    }

    pub fn is_creditor(&self) -> bool {
        self.net().is_positive()
    }

    pub fn is_debtor(&self) -> bool {
        self.net().is_negative()
    }

    pub fn is_settled(&self) -> bool {
        self.net().is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_net() {
        let mut balance = Balance::zero(MemberId::new());
        assert!(balance.is_settled());

        balance.paid = Money::from_cents(9000);
        balance.share = Money::from_cents(3000);
        assert_eq!(balance.net(), Money::from_cents(6000));
        assert!(balance.is_creditor());

        balance.share = Money::from_cents(12000);
        assert!(balance.is_debtor());
        assert_eq!(balance.checked_net(), Some(Money::from_cents(-3000)));
    }

    #[test]
    fn test_checked_net_overflow() {
        let balance = Balance {
            member_id: MemberId::new(),
            paid: Money::from_cents(i64::MAX),
            share: Money::from_cents(-1),
        };
        assert_eq!(balance.checked_net(), None);
    }
}
