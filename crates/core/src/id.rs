//! Unique identifiers for depot entities.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unique identifier for a job card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct JobCardId(Ulid);

impl JobCardId {
    /// Generate a new JobCardId
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    /// Build an id from raw ULID parts. Used by deterministic sample data.
    pub fn from_parts(timestamp_ms: u64, random: u128) -> Self {
        Self(Ulid::from_parts(timestamp_ms, random))
    }
}

impl Default for JobCardId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for JobCardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for JobCardId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}
