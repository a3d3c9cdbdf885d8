//! Build report generation
//!
//! Collects per-build metrics from a measurement context and aggregates a
//! metric history into a chart-ready [`Report`](buildscope_core::Report).

#![warn(missing_docs)]

mod error;
pub mod config;
pub mod stage;
pub mod history;
pub mod stages;
pub mod generator;
pub mod collect;

pub use error::{ReportError, Result};
pub use config::{
    ReportConfig, DEFAULT_AXIS_PADDING_PERCENTAGE, DEFAULT_COLUMN_BUDGET,
    DEFAULT_NOISE_THRESHOLD_MS,
};
pub use stage::{Pipeline, Stage};
pub use history::{MetricHistory, Sample};
pub use generator::ReportGenerator;
pub use collect::{collect_metric, metric_pipeline, BuildContext, BuildPhase, TaskExecution};
