//! Expense categories
//!
//! A fixed set of categories used to break down group spending.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of an expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Food,
    Drinks,
    Transport,
    Accommodation,
    Groceries,
    Entertainment,
    Shopping,
    #[default]
    Other,
}

impl ExpenseCategory {
    /// All categories in display order
    pub const ALL: [ExpenseCategory; 8] = [
        Self::Food,
        Self::Drinks,
        Self::Transport,
        Self::Accommodation,
        Self::Groceries,
        Self::Entertainment,
        Self::Shopping,
        Self::Other,
    ];

    /// Stable key used in serialized documents
    pub fn key(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Drinks => "drinks",
            Self::Transport => "transport",
            Self::Accommodation => "accommodation",
            Self::Groceries => "groceries",
            Self::Entertainment => "entertainment",
            Self::Shopping => "shopping",
            Self::Other => "other",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Drinks => "Drinks",
            Self::Transport => "Transport",
            Self::Accommodation => "Accommodation",
            Self::Groceries => "Groceries",
            Self::Entertainment => "Entertainment",
            Self::Shopping => "Shopping",
            Self::Other => "Other",
        }
    }

    /// Look up a category by key, falling back to `Other` for unknown keys
    pub fn from_key(key: &str) -> Self {
        key.parse().unwrap_or(Self::Other)
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for ExpenseCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.key() == normalized)
            .ok_or_else(|| format!("Unknown expense category: {}", s))
    }
}

// Unknown keys deserialize as `Other`.
impl<'de> Deserialize<'de> for ExpenseCategory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let key = String::deserialize(deserializer)?;
        Ok(Self::from_key(&key))
    }
}
