//! Member model
//!
//! A person taking part in a group's shared expenses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::MemberId;

/// A group member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Unique identifier
    pub id: MemberId,

    /// Display name
    pub name: String,

    /// When the member joined the group; the oldest member absorbs split remainders
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

impl Member {
    /// Create a new member
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: MemberId::new(),
            name: name.into(),
            created_at: Utc::now(),
        }
    }

    /// Create a member with a fixed join time
    pub fn with_created_at(name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        let mut member = Self::new(name);
        member.created_at = created_at;
        member
    }

    /// Validate the member
    pub fn validate(&self) -> Result<(), MemberValidationError> {
        if self.name.trim().is_empty() {
            return Err(MemberValidationError::EmptyName);
        }
        Ok(())
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for members
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberValidationError {
    EmptyName,
}

impl fmt::Display for MemberValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Member name cannot be empty"),
        }
    }
}

impl std::error::Error for MemberValidationError {}
