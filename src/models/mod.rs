//! Core data models for split-ledger
//!
//! Members, expenses and their splits are the inputs; balances and
//! settlements are derived values recomputed from them on demand.

pub mod balance;
pub mod category;
pub mod expense;
pub mod group;
pub mod ids;
pub mod member;
pub mod money;
pub mod settlement;

pub use balance::Balance;
pub use category::ExpenseCategory;
pub use expense::{Expense, ExpenseValidationError, Split};
pub use group::Group;
pub use ids::{ExpenseId, GroupId, MemberId};
pub use member::{Member, MemberValidationError};
pub use money::{Money, MoneyParseError};
pub use settlement::Settlement;
