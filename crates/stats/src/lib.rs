//! Aggregation primitives
//!
//! Statistics, interval union and series downsampling used to turn build
//! history into bounded chart data.

#![warn(missing_docs)]

pub mod statistics;
pub mod interval;
pub mod downsample;
pub mod chart;

pub use statistics::{
    median, median_f64, mean, mean_f64, diff_percentage_of, to_percentage_of,
    sum_with_percentage, deduct_with_percentage, round_to, saturating_sum,
};
pub use interval::{non_parallel_duration, total_duration, parallel_rate, merge_slots};
pub use downsample::downsample;
pub use chart::{to_chart_point, to_chart_points, format_day};

/// Error type for aggregation helpers.
pub type Result<T> = std::result::Result<T, StatsError>;

/// Errors raised by aggregation helpers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatsError {
    /// Timestamp outside the range chrono can represent
    #[error("timestamp {0} cannot be represented as a date")]
    InvalidTimestamp(i64),
}
