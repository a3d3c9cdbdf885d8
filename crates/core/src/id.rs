//! Unique identifiers for buildscope records.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unique identifier for a stored build metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MetricId(Ulid);

impl MetricId {
    /// Generate a new MetricId
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for MetricId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MetricId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for MetricId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}
