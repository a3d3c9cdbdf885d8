//! End-to-end: build contexts → collected metrics → report.

use buildscope_core::{BuildOutcome, ReportIdentity, TimeSlot};
use buildscope_report::{
    collect_metric, BuildContext, BuildPhase, MetricHistory, ReportConfig, ReportGenerator,
    TaskExecution,
};

const DAY: i64 = 86_400_000;
// 2022-10-12T00:00:00Z
const OCT_12: i64 = 1_665_532_800_000;

fn task(module: &str, start: i64, end: i64, cached: bool) -> TaskExecution {
    TaskExecution {
        path: format!("{}:compile", module),
        module: module.to_string(),
        slot: TimeSlot::new(start, end).unwrap(),
        cached,
    }
}

fn build(day: i64) -> BuildContext {
    let mut context = BuildContext::new("main", vec!["assemble".to_string()], OCT_12 + day * DAY);
    context.record_phase(BuildPhase::Initialization, 100 + day as u64);
    context.record_phase(BuildPhase::Configuration, 500);
    context.record_phase(BuildPhase::Execution, 2000 + 10 * day as u64);
    context.record_phase(BuildPhase::DependencyResolve, 50);
    context.record_task(task(":app", 0, 1000, true));
    context.record_task(task(":core", 500, 1500, false));
    context.record_source_count(":app", 10 + day as u64);
    context.record_source_count(":core", 50);
    context.finish(if day % 5 == 0 {
        BuildOutcome::Failure
    } else {
        BuildOutcome::Success
    });
    context
}

fn history(days: i64) -> MetricHistory {
    MetricHistory::new((0..days).map(|day| collect_metric(&build(day)).unwrap()).collect())
}

fn identity() -> ReportIdentity {
    ReportIdentity::new("main", vec!["assemble".to_string()])
}

#[test]
fn test_full_report() {
    let report = ReportGenerator::new().generate(identity(), &history(30)).unwrap();

    let overall = report.overall_build_process.as_ref().unwrap();
    assert!(!overall.median_values.is_empty());
    assert!(overall.suggested_max_value >= overall.suggested_min_value);
    assert!(report.initialization_process.is_some());
    assert!(report.configuration_process.is_some());
    assert!(report.execution_process.is_some());
    assert!(report.dependency_resolve_process.is_some());

    let cache_hit = report.cache_hit.as_ref().unwrap();
    assert_eq!(cache_hit.overall_rate, 50);
    assert_eq!(cache_hit.overall_diff_rate, Some(0.0));
    assert_eq!(cache_hit.modules[0].path, ":app");
    assert_eq!(cache_hit.modules[0].rate, 100);
    assert_eq!(cache_hit.modules[1].rate, 0);

    assert_eq!(report.success_build_rate.as_ref().unwrap().overall_rate, 80.0);

    let parallel = report.parallel_execution_rate.as_ref().unwrap();
    assert_eq!(parallel.overall_rate, 25);
    assert_eq!(parallel.overall_diff_rate, Some(0.0));

    let sources = report.modules_source_count.as_ref().unwrap();
    assert_eq!(sources.total_source_count, 89);
    assert_eq!(sources.modules[0].path, ":core");
    assert_eq!(sources.modules[1].value, 39);
    assert_eq!(sources.modules[1].diff_rate, Some(290.0));

    let modules = report.modules_execution.as_ref().unwrap();
    assert_eq!(modules.total_duration, 2000);
    assert_eq!(modules.modules[0].path, ":app");
    assert_eq!(modules.modules[0].coverage_rate, 50.0);
}

#[test]
fn test_every_series_respects_the_column_budget() {
    let config = ReportConfig {
        column_budget: 5,
        ..Default::default()
    };
    let report = ReportGenerator::new()
        .with_config(config)
        .unwrap()
        .generate(identity(), &history(40))
        .unwrap();

    let process = [
        &report.initialization_process,
        &report.configuration_process,
        &report.execution_process,
        &report.overall_build_process,
        &report.dependency_resolve_process,
    ];
    for section in process.into_iter().flatten() {
        assert!(section.median_values.len() <= 5);
        assert!(section.mean_values.len() <= 5);
    }

    let cache_hit = report.cache_hit.unwrap();
    assert!(cache_hit.overall_values.len() <= 5);
    assert!(cache_hit.modules.iter().all(|m| m.values.len() <= 5));
    assert!(report.success_build_rate.unwrap().values.len() <= 5);
    assert!(report.parallel_execution_rate.unwrap().values.len() <= 5);
    assert!(report
        .modules_execution
        .unwrap()
        .modules
        .iter()
        .all(|m| m.values.len() <= 5));
}

#[test]
fn test_empty_history() {
    let report = ReportGenerator::new()
        .generate(identity(), &MetricHistory::default())
        .unwrap();
    assert!(report.is_empty());
}

#[test]
fn test_report_serializes() {
    let report = ReportGenerator::new().generate(identity(), &history(3)).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["branch"], "main");
    assert!(json["cache_hit"]["overall_values"].is_array());
}
