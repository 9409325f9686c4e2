//! Settlement transfer
//!
//! A single directed payment from a debtor to a creditor.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::MemberId;
use super::money::Money;

/// One payment that settles (part of) a debt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// The member who pays
    pub from_member_id: MemberId,

    /// The member who receives
    pub to_member_id: MemberId,

    /// Always positive
    pub amount: Money,
}

impl Settlement {
    pub fn new(from_member_id: MemberId, to_member_id: MemberId, amount: Money) -> Self {
        Self {
            from_member_id,
            to_member_id,
            amount,
        }
    }
}

impl fmt::Display for Settlement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} pays {} {}",
            self.from_member_id, self.to_member_id, self.amount
        )
    }
}
