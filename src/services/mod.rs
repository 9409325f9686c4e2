//! Ledger engine
//!
//! Pure, stateless calculators: split allocation, balance aggregation and
//! settlement. Currency conversion sits here as the seam callers use before
//! an expense is built.

pub mod balance;
pub mod check;
pub mod conversion;
pub mod settlement;
pub mod split;

pub use balance::BalanceEngine;
pub use check::{GroupCheck, GroupIssue};
pub use conversion::{convert, convert_amount, FixedRates, RateProvider};
pub use settlement::{SettlementSolver, TieBreak};
pub use split::{SplitAllocation, SplitAllocator, SplitMode};
