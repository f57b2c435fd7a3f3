//! Identifier newtypes with smart constructors.
//!
//! Post identifiers are assigned by the server and never minted locally,
//! so the only constructors are parsing and deserialization.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Server-assigned identifier of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(u64);

impl PostId {
    /// Wrap a raw identifier received from the server.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw numeric identifier.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PostId {
    type Err = InvalidPostId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(InvalidPostId::Empty);
        }
        s.parse::<u64>()
            .map(Self)
            .map_err(|_| InvalidPostId::NotNumeric(s.to_string()))
    }
}

// ===== Error Types =====

/// Reasons a string cannot be used as a [`PostId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidPostId {
    /// The identifier was empty.
    #[error("Post ID cannot be empty")]
    Empty,
    /// The identifier contained something other than digits.
    #[error("Post ID must be numeric, got {0:?}")]
    NotNumeric(String),
}

// ===== Tests =====
