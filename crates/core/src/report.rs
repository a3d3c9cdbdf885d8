//! Report model - the accumulator filled section by section.

use serde::{Deserialize, Serialize};
use crate::timeline::ChartPoint;

/// Identity of a report: one branch and one set of requested tasks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportIdentity {
    /// Branch name
    pub branch: String,

    /// Requested tasks
    pub requested_tasks: Vec<String>,
}

impl ReportIdentity {
    /// Create an identity.
    pub fn new(branch: impl Into<String>, requested_tasks: Vec<String>) -> Self {
        Self {
            branch: branch.into(),
            requested_tasks,
        }
    }
}

/// A historical build report.
///
/// Every section is independent: a section is either fully computed or
/// `None` when the history holds no data for it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Branch name
    pub branch: String,

    /// Requested tasks
    pub requested_tasks: Vec<String>,

    /// Initialization phase
    pub initialization_process: Option<ProcessReport>,

    /// Configuration phase
    pub configuration_process: Option<ProcessReport>,

    /// Execution phase
    pub execution_process: Option<ProcessReport>,

    /// Whole build
    pub overall_build_process: Option<ProcessReport>,

    /// Dependency resolution
    pub dependency_resolve_process: Option<ProcessReport>,

    /// Build cache
    pub cache_hit: Option<CacheHitReport>,

    /// Successful builds
    pub success_build_rate: Option<SuccessRateReport>,

    /// Task parallelism
    pub parallel_execution_rate: Option<ParallelExecutionRateReport>,

    /// Source files per module
    pub modules_source_count: Option<ModulesSourceCountReport>,

    /// Execution time per module
    pub modules_execution: Option<ModulesExecutionReport>,
}

impl Report {
    /// Create an empty report for the given identity.
    pub fn new(identity: ReportIdentity) -> Self {
        Self {
            branch: identity.branch,
            requested_tasks: identity.requested_tasks,
            ..Default::default()
        }
    }

    /// Whether no section has been populated.
    pub fn is_empty(&self) -> bool {
        self.initialization_process.is_none()
            && self.configuration_process.is_none()
            && self.execution_process.is_none()
            && self.overall_build_process.is_none()
            && self.dependency_resolve_process.is_none()
            && self.cache_hit.is_none()
            && self.success_build_rate.is_none()
            && self.parallel_execution_rate.is_none()
            && self.modules_source_count.is_none()
            && self.modules_execution.is_none()
    }
}

/// Median and mean chart series of a timed phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessReport {
    /// Downsampled median values
    pub median_values: Vec<ChartPoint>,

    /// Downsampled mean values
    pub mean_values: Vec<ChartPoint>,

    /// Upper chart bound, padded above the largest value
    pub suggested_max_value: i64,

    /// Lower chart bound, padded below the smallest value
    pub suggested_min_value: i64,
}

/// Build cache report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheHitReport {
    /// Per-module breakdown, highest current rate first
    pub modules: Vec<ModuleCacheHitReport>,

    /// Downsampled overall rate
    pub overall_values: Vec<ChartPoint>,

    /// Most recent overall rate
    pub overall_rate: i64,

    /// Change between the first and last sample
    pub overall_diff_rate: Option<f64>,
}

/// Cache hit breakdown of one module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleCacheHitReport {
    /// Module path
    pub path: String,

    /// Most recent rate
    pub rate: i64,

    /// Change between the first and last sample of this module
    pub diff_rate: Option<f64>,

    /// Downsampled rate
    pub values: Vec<ChartPoint>,
}

/// Share of successful builds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessRateReport {
    /// Downsampled success rate (percent)
    pub values: Vec<ChartPoint>,

    /// Success rate over the whole window
    pub overall_rate: f64,
}

/// Task parallelism report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParallelExecutionRateReport {
    /// Downsampled rate
    pub values: Vec<ChartPoint>,

    /// Most recent rate
    pub overall_rate: i64,

    /// Change between the first and last sample
    pub overall_diff_rate: Option<f64>,

    /// Upper chart bound
    pub suggested_max_value: i64,

    /// Lower chart bound
    pub suggested_min_value: i64,
}

/// Source file count per module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModulesSourceCountReport {
    /// Sum over all modules in the most recent sample
    pub total_source_count: i64,

    /// Per-module breakdown, largest first
    pub modules: Vec<ModuleValueReport>,
}

/// A per-module value with its share of the total and its trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleValueReport {
    /// Module path
    pub path: String,

    /// Most recent value
    pub value: i64,

    /// Share of the total (percent)
    pub coverage_rate: f64,

    /// Change between the first and last sample of this module
    pub diff_rate: Option<f64>,
}

/// Execution time per module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModulesExecutionReport {
    /// Sum over all modules in the most recent sample
    pub total_duration: i64,

    /// Per-module breakdown, slowest first
    pub modules: Vec<ModuleExecutionReport>,
}

/// Execution breakdown of one module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleExecutionReport {
    /// Module path
    pub path: String,

    /// Most recent duration
    pub duration: i64,

    /// Mean duration over the window
    pub mean_duration: i64,

    /// Share of the total execution time (percent)
    pub coverage_rate: f64,

    /// Most recent parallel rate
    pub parallel_rate: i64,

    /// Change between the first and last sample of this module
    pub diff_rate: Option<f64>,

    /// Downsampled durations
    pub values: Vec<ChartPoint>,
}
