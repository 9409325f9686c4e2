//! split-ledger - shared-expense balances and settlements
//!
//! This library records who paid for what in a group, divides each expense
//! between its participants, folds everything into per-member balances and
//! plans the transfers that bring every balance back to zero.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Core data models (money, members, expenses, groups, balances)
//! - `services`: The engine (split allocation, balances, settlement, conversion)
//! - `reports`: Read-only views over a group
//! - `display`: Terminal formatting
//! - `export`: JSON, YAML and CSV export
//! - `storage`: Group document loading
//! - `config`: Configuration and path management
//! - `cli`: Command handlers for the `splitledger` binary
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust,ignore
//! use split_ledger::models::{Expense, Group, Member, Money};
//! use split_ledger::services::{SettlementSolver, SplitAllocator, TieBreak, BalanceEngine};
//!
//! let mut group = Group::new("Trip", "EUR");
//! let ana = group.add_member(Member::new("Ana"));
//! let ben = group.add_member(Member::new("Ben"));
//! let splits = SplitAllocator.allocate_equal(Money::from_cents(9000), &[ana, ben])?;
//! group.add_expense(Expense::new("Dinner", Money::from_cents(9000), ana, today).with_splits(splits));
//!
//! let balances = BalanceEngine::new().compute_balances(&group.members, &group.expenses)?;
//! let plan = SettlementSolver::new(TieBreak::InputOrder).compute_settlements(&balances)?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{SplitError, SplitResult};
