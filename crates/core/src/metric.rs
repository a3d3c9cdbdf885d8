//! Build metric model - one measurement snapshot per build.

use serde::{Deserialize, Serialize};
use crate::id::MetricId;

/// A snapshot of everything measured during a single build.
///
/// Every sub-metric is optional: a build that never reached the execution
/// phase, or ran without the build cache, simply leaves the field empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildMetric {
    /// Unique identifier
    pub id: MetricId,

    /// When the metric was created (epoch milliseconds)
    pub created_at: i64,

    /// Branch the build ran on
    pub branch: String,

    /// Tasks requested on the command line
    pub requested_tasks: Vec<String>,

    /// Initialization phase duration
    #[serde(default)]
    pub initialization: Option<ProcessMetric>,

    /// Configuration phase duration
    #[serde(default)]
    pub configuration: Option<ProcessMetric>,

    /// Execution phase duration
    #[serde(default)]
    pub execution: Option<ProcessMetric>,

    /// Whole build duration
    #[serde(default)]
    pub overall_build: Option<ProcessMetric>,

    /// Dependency resolution duration
    #[serde(default)]
    pub dependency_resolve: Option<ProcessMetric>,

    /// Build cache hits
    #[serde(default)]
    pub cache_hit: Option<CacheHitMetric>,

    /// Final build outcome
    #[serde(default)]
    pub outcome: Option<BuildOutcome>,

    /// How much of the execution ran concurrently
    #[serde(default)]
    pub parallel_execution: Option<ParallelExecutionMetric>,

    /// Source file count per module
    #[serde(default)]
    pub modules_source_count: Option<Vec<ModuleValue>>,

    /// Execution time per module
    #[serde(default)]
    pub modules_execution: Option<Vec<ModuleExecution>>,
}

impl BuildMetric {
    /// Create an empty metric for the given build identity.
    pub fn new(branch: impl Into<String>, requested_tasks: Vec<String>, created_at: i64) -> Self {
        Self {
            id: MetricId::new(),
            created_at,
            branch: branch.into(),
            requested_tasks,
            initialization: None,
            configuration: None,
            execution: None,
            overall_build: None,
            dependency_resolve: None,
            cache_hit: None,
            outcome: None,
            parallel_execution: None,
            modules_source_count: None,
            modules_execution: None,
        }
    }

    /// Creation time as a UTC timestamp, if representable.
    pub fn created_at_time(&self) -> Option<crate::Time> {
        chrono::DateTime::from_timestamp_millis(self.created_at)
    }
}

/// A duration measured one or more times within a build (milliseconds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessMetric {
    /// Median of the recorded durations
    pub median: i64,

    /// Mean of the recorded durations
    pub mean: i64,
}

/// Build cache hit rate (percent) overall and per module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheHitMetric {
    /// Overall hit rate
    pub rate: i64,

    /// Hit rate per module
    pub modules: Vec<ModuleCacheHit>,
}

/// Cache hit rate of a single module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleCacheHit {
    /// Module path, e.g. `:app`
    pub path: String,

    /// Hit rate (percent)
    pub rate: i64,
}

/// Outcome of a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildOutcome {
    /// The build finished without errors
    Success,
    /// The build failed
    Failure,
}

impl BuildOutcome {
    /// Whether the build succeeded.
    pub fn is_success(self) -> bool {
        matches!(self, BuildOutcome::Success)
    }
}

/// Parallelism achieved during task execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParallelExecutionMetric {
    /// Share of task time that overlapped with other tasks (percent)
    pub rate: i64,

    /// Wall-clock time covered by the union of all task slots
    pub serial_duration: i64,

    /// Sum of the individual task durations
    pub total_duration: i64,
}

/// A plain value keyed by module path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleValue {
    /// Module path
    pub path: String,

    /// Value
    pub value: i64,
}

/// Execution time spent in one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleExecution {
    /// Module path
    pub path: String,

    /// Wall-clock time covered by the module's tasks
    pub duration: i64,

    /// Share of the module's task time that ran concurrently (percent)
    pub parallel_rate: i64,
}
