//! Per-build metric collection.
//!
//! ```text
//! BuildContext → phases → overall build → cache hit → parallelism
//!              → modules → outcome → BuildMetric
//! ```

mod context;
mod stages;

pub use context::{BuildContext, BuildPhase, TaskExecution};
pub use stages::{
    CacheHitMetricStage, ModulesExecutionMetricStage, ModulesSourceCountMetricStage,
    OutcomeMetricStage, OverallBuildMetricStage, ParallelExecutionMetricStage, PhaseMetricStage,
};

use buildscope_core::BuildMetric;
use tracing::info;

use crate::{Pipeline, Result};

const PHASES: [BuildPhase; 4] = [
    BuildPhase::Initialization,
    BuildPhase::Configuration,
    BuildPhase::Execution,
    BuildPhase::DependencyResolve,
];

/// The collection pipeline over `context`, in execution order.
pub fn metric_pipeline(context: &BuildContext) -> Pipeline<'_, BuildMetric> {
    let mut pipeline = Pipeline::new("collect");
    for phase in PHASES {
        pipeline.push(Box::new(PhaseMetricStage::new(phase, context)));
    }
    pipeline
        .stage(OverallBuildMetricStage)
        .stage(CacheHitMetricStage::new(context))
        .stage(ParallelExecutionMetricStage::new(context))
        .stage(ModulesExecutionMetricStage::new(context))
        .stage(ModulesSourceCountMetricStage::new(context))
        .stage(OutcomeMetricStage::new(context))
}

/// Turn a finished build into a metric snapshot.
pub fn collect_metric(context: &BuildContext) -> Result<BuildMetric> {
    let metric = BuildMetric::new(
        context.branch.clone(),
        context.requested_tasks.clone(),
        context.started_at,
    );
    let metric = metric_pipeline(context).run(metric)?;
    info!(
        "Collected metric {} for {} {:?}",
        metric.id, metric.branch, metric.requested_tasks
    );
    Ok(metric)
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildscope_core::{BuildOutcome, TimeSlot};

    #[test]
    fn test_pipeline_order() {
        let context = BuildContext::default();
        assert_eq!(
            metric_pipeline(&context).stage_names(),
            vec![
                "collect-initialization",
                "collect-configuration",
                "collect-execution",
                "collect-dependency-resolve",
                "collect-overall-build",
                "collect-cache-hit",
                "collect-parallel-execution",
                "collect-modules-execution",
                "collect-modules-source-count",
                "collect-outcome",
            ]
        );
    }

    #[test]
    fn test_collect_metric() {
        let mut context = BuildContext::new("main", vec!["assemble".to_string()], 1_665_532_800_000);
        context.record_phase(BuildPhase::Initialization, 100);
        context.record_phase(BuildPhase::Configuration, 400);
        context.record_phase(BuildPhase::Execution, 2000);
        context.record_task(TaskExecution {
            path: ":app:compile".to_string(),
            module: ":app".to_string(),
            slot: TimeSlot::new(0, 1000).unwrap(),
            cached: false,
        });
        context.record_task(TaskExecution {
            path: ":core:compile".to_string(),
            module: ":core".to_string(),
            slot: TimeSlot::new(0, 1000).unwrap(),
            cached: true,
        });
        context.finish(BuildOutcome::Success);

        let metric = collect_metric(&context).unwrap();
        assert_eq!(metric.branch, "main");
        assert_eq!(metric.created_at, 1_665_532_800_000);
        assert_eq!(metric.overall_build.unwrap().median, 2500);
        assert!(metric.dependency_resolve.is_none());
        assert_eq!(metric.cache_hit.unwrap().rate, 50);
        assert_eq!(metric.parallel_execution.unwrap().rate, 50);
        assert_eq!(metric.modules_execution.unwrap().len(), 2);
        assert!(metric.modules_source_count.is_none());
        assert_eq!(metric.outcome, Some(BuildOutcome::Success));
    }

    #[test]
    fn test_collect_saturates_oversized_durations() {
        let mut context = BuildContext::new("main", vec![], 0);
        context.record_phase(BuildPhase::Execution, u64::MAX);
        context.record_phase(BuildPhase::Execution, u64::MAX);

        let metric = collect_metric(&context).unwrap();
        assert_eq!(metric.execution.unwrap().median, i64::MAX);
        assert_eq!(metric.overall_build.unwrap().mean, i64::MAX);
    }

    #[test]
    fn test_collect_empty_context() {
        let metric = collect_metric(&BuildContext::default()).unwrap();
        assert!(metric.initialization.is_none());
        assert!(metric.overall_build.is_none());
        assert!(metric.cache_hit.is_none());
        assert!(metric.parallel_execution.is_none());
        assert!(metric.outcome.is_none());
    }
}
