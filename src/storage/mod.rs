//! Storage layer for split-ledger
//!
//! Group documents are plain JSON files holding one [`Group`]. The library
//! only reads them; `write_json_atomic` exists for the settings file.

pub mod file_io;

use std::path::Path;

use tracing::debug;

pub use file_io::{read_json_required, write_json_atomic};

use crate::error::SplitError;
use crate::models::Group;

/// Load a group document
///
/// A group without a currency code takes `default_currency_code`. The
/// group's contents are not validated here; the balance engine and
/// `GroupCheck` do that.
pub fn load_group<P: AsRef<Path>>(path: P, default_currency_code: &str) -> Result<Group, SplitError> {
    let path = path.as_ref();
    let mut group: Group = read_json_required(path)?;

    if group.currency_code.trim().is_empty() {
        group.currency_code = default_currency_code.to_string();
    }
    group.currency_code = group.currency_code.trim().to_uppercase();

    debug!(
        path = %path.display(),
        members = group.members.len(),
        expenses = group.expenses.len(),
        "loaded group document"
    );

    Ok(group)
}
