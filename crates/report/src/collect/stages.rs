//! Stages that turn a [`BuildContext`] into a [`BuildMetric`].

use std::collections::BTreeMap;

use buildscope_core::{
    BuildMetric, CacheHitMetric, ModuleCacheHit, ModuleExecution, ModuleValue,
    ParallelExecutionMetric, ProcessMetric, TimeSlot,
};
use buildscope_stats::{
    mean, median, non_parallel_duration, parallel_rate, saturating_sum, to_percentage_of,
    total_duration,
};
use tracing::debug;

use super::context::{BuildContext, BuildPhase, TaskExecution};
use crate::{Result, Stage};

fn cache_rate(tasks: &[&TaskExecution]) -> i64 {
    let cached = tasks.iter().filter(|t| t.cached).count() as i64;
    to_percentage_of(cached, tasks.len() as i64).round() as i64
}

fn tasks_by_module(tasks: &[TaskExecution]) -> BTreeMap<&str, Vec<&TaskExecution>> {
    let mut modules: BTreeMap<&str, Vec<&TaskExecution>> = BTreeMap::new();
    for task in tasks {
        modules.entry(task.module.as_str()).or_default().push(task);
    }
    modules
}

/// Median and mean of the durations recorded for one phase.
pub struct PhaseMetricStage<'a> {
    phase: BuildPhase,
    context: &'a BuildContext,
}

impl<'a> PhaseMetricStage<'a> {
    /// Create a stage for `phase`.
    pub fn new(phase: BuildPhase, context: &'a BuildContext) -> Self {
        Self { phase, context }
    }
}

impl Stage<BuildMetric> for PhaseMetricStage<'_> {
    fn name(&self) -> &str {
        match self.phase {
            BuildPhase::Initialization => "collect-initialization",
            BuildPhase::Configuration => "collect-configuration",
            BuildPhase::Execution => "collect-execution",
            BuildPhase::DependencyResolve => "collect-dependency-resolve",
        }
    }

    fn process(&self, mut metric: BuildMetric) -> Result<BuildMetric> {
        let durations = self.context.phase_durations(self.phase);
        if durations.is_empty() {
            return Ok(metric);
        }

        let value = Some(ProcessMetric {
            median: median(&durations),
            mean: mean(&durations),
        });
        match self.phase {
            BuildPhase::Initialization => metric.initialization = value,
            BuildPhase::Configuration => metric.configuration = value,
            BuildPhase::Execution => metric.execution = value,
            BuildPhase::DependencyResolve => metric.dependency_resolve = value,
        }
        Ok(metric)
    }
}

/// Whole-build duration as the sum of the collected lifecycle phases.
///
/// Must run after the phase stages.
pub struct OverallBuildMetricStage;

impl Stage<BuildMetric> for OverallBuildMetricStage {
    fn name(&self) -> &str {
        "collect-overall-build"
    }

    fn process(&self, mut metric: BuildMetric) -> Result<BuildMetric> {
        let phases: Vec<ProcessMetric> = [metric.initialization, metric.configuration, metric.execution]
            .into_iter()
            .flatten()
            .collect();
        if phases.is_empty() {
            return Ok(metric);
        }

        metric.overall_build = Some(ProcessMetric {
            median: saturating_sum(phases.iter().map(|p| p.median)),
            mean: saturating_sum(phases.iter().map(|p| p.mean)),
        });
        Ok(metric)
    }
}

/// Cache hit rate overall and per module.
pub struct CacheHitMetricStage<'a> {
    context: &'a BuildContext,
}

impl<'a> CacheHitMetricStage<'a> {
    /// Create the stage.
    pub fn new(context: &'a BuildContext) -> Self {
        Self { context }
    }
}

impl Stage<BuildMetric> for CacheHitMetricStage<'_> {
    fn name(&self) -> &str {
        "collect-cache-hit"
    }

    fn process(&self, mut metric: BuildMetric) -> Result<BuildMetric> {
        if self.context.tasks.is_empty() {
            return Ok(metric);
        }

        let all: Vec<&TaskExecution> = self.context.tasks.iter().collect();
        let modules = tasks_by_module(&self.context.tasks)
            .into_iter()
            .map(|(path, tasks)| ModuleCacheHit {
                path: path.to_string(),
                rate: cache_rate(&tasks),
            })
            .collect();

        metric.cache_hit = Some(CacheHitMetric {
            rate: cache_rate(&all),
            modules,
        });
        Ok(metric)
    }
}

/// Parallelism of the whole task graph.
pub struct ParallelExecutionMetricStage<'a> {
    context: &'a BuildContext,
}

impl<'a> ParallelExecutionMetricStage<'a> {
    /// Create the stage.
    pub fn new(context: &'a BuildContext) -> Self {
        Self { context }
    }
}

impl Stage<BuildMetric> for ParallelExecutionMetricStage<'_> {
    fn name(&self) -> &str {
        "collect-parallel-execution"
    }

    fn process(&self, mut metric: BuildMetric) -> Result<BuildMetric> {
        let slots: Vec<TimeSlot> = self.context.tasks.iter().map(|t| t.slot).collect();
        let Some(rate) = parallel_rate(&slots) else {
            debug!("No task time recorded, skipping parallel execution rate");
            return Ok(metric);
        };

        metric.parallel_execution = Some(ParallelExecutionMetric {
            rate,
            serial_duration: non_parallel_duration(&slots),
            total_duration: total_duration(&slots),
        });
        Ok(metric)
    }
}

/// Wall-clock time and parallelism per module.
pub struct ModulesExecutionMetricStage<'a> {
    context: &'a BuildContext,
}

impl<'a> ModulesExecutionMetricStage<'a> {
    /// Create the stage.
    pub fn new(context: &'a BuildContext) -> Self {
        Self { context }
    }
}

impl Stage<BuildMetric> for ModulesExecutionMetricStage<'_> {
    fn name(&self) -> &str {
        "collect-modules-execution"
    }

    fn process(&self, mut metric: BuildMetric) -> Result<BuildMetric> {
        if self.context.tasks.is_empty() {
            return Ok(metric);
        }

        let modules = tasks_by_module(&self.context.tasks)
            .into_iter()
            .map(|(path, tasks)| {
                let slots: Vec<TimeSlot> = tasks.iter().map(|t| t.slot).collect();
                ModuleExecution {
                    path: path.to_string(),
                    duration: non_parallel_duration(&slots),
                    parallel_rate: parallel_rate(&slots).unwrap_or(0),
                }
            })
            .collect();

        metric.modules_execution = Some(modules);
        Ok(metric)
    }
}

/// Source file count per module.
pub struct ModulesSourceCountMetricStage<'a> {
    context: &'a BuildContext,
}

impl<'a> ModulesSourceCountMetricStage<'a> {
    /// Create the stage.
    pub fn new(context: &'a BuildContext) -> Self {
        Self { context }
    }
}

impl Stage<BuildMetric> for ModulesSourceCountMetricStage<'_> {
    fn name(&self) -> &str {
        "collect-modules-source-count"
    }

    fn process(&self, mut metric: BuildMetric) -> Result<BuildMetric> {
        if self.context.source_counts.is_empty() {
            return Ok(metric);
        }

        metric.modules_source_count = Some(
            self.context
                .source_counts
                .iter()
                .map(|(path, &count)| ModuleValue {
                    path: path.clone(),
                    value: i64::try_from(count).unwrap_or(i64::MAX),
                })
                .collect(),
        );
        Ok(metric)
    }
}

/// Copies the build outcome.
pub struct OutcomeMetricStage<'a> {
    context: &'a BuildContext,
}

impl<'a> OutcomeMetricStage<'a> {
    /// Create the stage.
    pub fn new(context: &'a BuildContext) -> Self {
        Self { context }
    }
}

impl Stage<BuildMetric> for OutcomeMetricStage<'_> {
    fn name(&self) -> &str {
        "collect-outcome"
    }

    fn process(&self, mut metric: BuildMetric) -> Result<BuildMetric> {
        metric.outcome = self.context.outcome;
        Ok(metric)
    }
}
