//! buildscope core data models.
//!
//! This crate defines the build metric snapshot, the time-based values used
//! while aggregating history, and the report accumulator.

#![warn(missing_docs)]

// Identities
mod id;

// Build measurements
mod metric;
mod timeline;

// Aggregated output
mod report;

// Re-exports
pub use id::MetricId;

pub use metric::{
    BuildMetric, ProcessMetric, CacheHitMetric, ModuleCacheHit, BuildOutcome,
    ParallelExecutionMetric, ModuleValue, ModuleExecution,
};
pub use timeline::{TimeSlot, TimespanPoint, ChartPoint, ModelError};
pub use report::{
    Report, ReportIdentity, ProcessReport, CacheHitReport, ModuleCacheHitReport,
    SuccessRateReport, ParallelExecutionRateReport, ModulesSourceCountReport,
    ModuleValueReport, ModulesExecutionReport, ModuleExecutionReport,
};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
