//! Time-based values used while aggregating metrics into charts.

use serde::{Deserialize, Serialize};

/// Errors raised when constructing model values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// A slot that finishes before it starts
    #[error("invalid time slot: finished at {finished_at} before starting at {started_at}")]
    InvalidTimeSlot {
        /// Start (epoch ms)
        started_at: i64,
        /// End (epoch ms)
        finished_at: i64,
    },
}

/// One execution interval, e.g. a single task run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTimeSlot")]
pub struct TimeSlot {
    started_at: i64,
    finished_at: i64,
}

#[derive(Deserialize)]
struct RawTimeSlot {
    started_at: i64,
    finished_at: i64,
}

impl TryFrom<RawTimeSlot> for TimeSlot {
    type Error = ModelError;

    fn try_from(raw: RawTimeSlot) -> Result<Self, Self::Error> {
        TimeSlot::new(raw.started_at, raw.finished_at)
    }
}

impl TimeSlot {
    /// Create a slot. Fails when `finished_at < started_at`.
    pub fn new(started_at: i64, finished_at: i64) -> Result<Self, ModelError> {
        if finished_at < started_at {
            return Err(ModelError::InvalidTimeSlot { started_at, finished_at });
        }
        Ok(Self { started_at, finished_at })
    }

    /// Start of the slot.
    pub fn started_at(&self) -> i64 {
        self.started_at
    }

    /// End of the slot.
    pub fn finished_at(&self) -> i64 {
        self.finished_at
    }

    /// Length of the slot.
    pub fn duration(&self) -> i64 {
        self.finished_at.saturating_sub(self.started_at)
    }
}

/// A value that covers either a single sample or a merged range of samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimespanPoint {
    /// Value
    pub value: i64,

    /// Time of the first sample (epoch ms)
    pub from: i64,

    /// Time of the last merged sample, absent for a single sample
    pub to: Option<i64>,
}

impl TimespanPoint {
    /// A point representing one sample.
    pub fn single(value: i64, at: i64) -> Self {
        Self { value, from: at, to: None }
    }

    /// End of the range covered by this point.
    pub fn end(&self) -> i64 {
        self.to.unwrap_or(self.from)
    }
}

/// A renderable chart point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Value
    pub value: i64,

    /// Date (`dd/MM`) or date range (`dd/MM-dd/MM`) label
    pub description: String,
}
