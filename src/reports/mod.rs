//! Reports module for split-ledger
//!
//! Read-only views over a group: who owes whom, where the money went, and
//! what a single member paid and consumed.

pub mod group_overview;
pub mod member_activity;
pub mod settlement;

pub use group_overview::{category_totals, CategoryTotal, GroupOverview, RecentExpense};
pub use member_activity::{ActivityLine, MemberActivity};
pub use settlement::{MemberBalanceRow, SettlementReport, SettlementRow};
