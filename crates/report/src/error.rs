//! Error type for report generation and metric collection.

use buildscope_stats::StatsError;

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that abort a pipeline run.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Aggregation failure, e.g. an unrepresentable timestamp
    #[error(transparent)]
    Stats(#[from] StatsError),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(String),
}
