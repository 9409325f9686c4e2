//! User settings for split-ledger
//!
//! Preferences applied when no command-line flag overrides them: the
//! currency for groups that do not name one, settlement tie-breaking,
//! report length and terminal colors.

use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::error::SplitError;
use crate::services::TieBreak;
use crate::storage::write_json_atomic;

/// User settings for split-ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// ISO 4217 code used by `split` and by groups without a currency
    #[serde(default = "default_currency_code")]
    pub default_currency_code: String,

    /// Order in which equally sized balances are paired
    #[serde(default)]
    pub tie_break: TieBreak,

    /// Number of expenses listed under "Recent expenses"
    #[serde(default = "default_recent_expense_limit")]
    pub recent_expense_limit: usize,

    /// Color positive/negative amounts
    #[serde(default = "default_color_output")]
    pub color_output: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency_code() -> String {
    "USD".to_string()
}

fn default_recent_expense_limit() -> usize {
    5
}

fn default_color_output() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            default_currency_code: default_currency_code(),
            tie_break: TieBreak::default(),
            recent_expense_limit: default_recent_expense_limit(),
            color_output: default_color_output(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &LedgerPaths) -> Result<Self, SplitError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| SplitError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                SplitError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Not persisted until the caller saves
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> Result<(), SplitError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }

    /// Change one setting from its textual form
    ///
    /// Keys match the field names, with `-` allowed for `_` and the short
    /// forms `currency`, `recent` and `color`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), SplitError> {
        let value = value.trim();
        let invalid = |expected: &str| {
            SplitError::Config(format!("Invalid value '{}' for {}: expected {}", value, key, expected))
        };

        match key.trim().to_lowercase().replace('-', "_").as_str() {
            "currency" | "default_currency_code" => {
                if value.len() != 3 || !value.chars().all(|c| c.is_ascii_alphabetic()) {
                    return Err(invalid("a three-letter currency code"));
                }
                self.default_currency_code = value.to_uppercase();
            }
            "tie_break" => {
                self.tie_break = value.parse().map_err(|_| invalid("input-order or member-id"))?;
            }
            "recent" | "recent_expense_limit" => {
                self.recent_expense_limit = value.parse().map_err(|_| invalid("a whole number"))?;
            }
            "color" | "color_output" => {
                self.color_output = match value.to_lowercase().as_str() {
                    "true" | "on" | "yes" => true,
                    "false" | "off" | "no" => false,
                    _ => return Err(invalid("true or false")),
                };
            }
            _ => return Err(SplitError::Config(format!("Unknown setting: {}", key))),
        }

        Ok(())
    }
}
