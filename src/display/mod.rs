//! Display formatting for terminal output
//!
//! Plain-text tables and lists for balances, settlement plans and reports.
//! Amounts are rendered per the group's currency code.

pub mod balance;
pub mod currency;
pub mod overview;
pub mod report;
pub mod settlement;

pub use balance::format_balance_table;
pub use currency::{colorize, currency_style, format_abs, format_cents, CurrencyStyle};
pub use overview::{format_group_overview, format_member_activity, format_split_preview};
pub use settlement::format_settlement_list;
