//! Per-module breakdown reports.

use std::collections::BTreeMap;

use buildscope_core::{
    BuildMetric, ModuleExecution, ModuleExecutionReport, ModuleValue, ModuleValueReport,
    ModulesExecutionReport, ModulesSourceCountReport, Report,
};
use buildscope_stats::{mean, to_percentage_of};
use tracing::debug;

use crate::history::{chart_series, diff_rate, MetricHistory, Sample};
use crate::{ReportConfig, Result, Stage};

/// Collect per-module samples from every metric that carries a breakdown.
fn module_samples<'a, T, F, V>(
    history: &'a MetricHistory,
    select: F,
    value: V,
) -> BTreeMap<&'a str, Vec<Sample>>
where
    T: 'a,
    F: Fn(&'a BuildMetric) -> Option<&'a [T]>,
    V: Fn(&'a T) -> (&'a str, i64),
{
    let mut modules: BTreeMap<&'a str, Vec<Sample>> = BTreeMap::new();
    for metric in history.metrics() {
        for item in select(metric).unwrap_or_default() {
            let (path, v) = value(item);
            modules.entry(path).or_default().push(Sample::new(metric.created_at, v));
        }
    }
    modules
}

/// The most recent metric with a non-empty breakdown.
fn latest<'a, T, F>(history: &'a MetricHistory, select: F) -> Option<&'a [T]>
where
    F: Fn(&'a BuildMetric) -> Option<&'a [T]>,
{
    history
        .metrics()
        .iter()
        .rev()
        .filter_map(select)
        .find(|items| !items.is_empty())
}

fn source_counts(metric: &BuildMetric) -> Option<&[ModuleValue]> {
    metric.modules_source_count.as_deref()
}

fn module_executions(metric: &BuildMetric) -> Option<&[ModuleExecution]> {
    metric.modules_execution.as_deref()
}

/// Fills the source count section, ranking modules by their current size.
pub struct ModulesSourceCountReportStage<'a> {
    history: &'a MetricHistory,
}

impl<'a> ModulesSourceCountReportStage<'a> {
    /// Create the stage.
    pub fn new(history: &'a MetricHistory) -> Self {
        Self { history }
    }
}

impl Stage<Report> for ModulesSourceCountReportStage<'_> {
    fn name(&self) -> &str {
        "create-modules-source-count-report"
    }

    fn process(&self, mut report: Report) -> Result<Report> {
        let Some(current) = latest(self.history, source_counts) else {
            debug!("No module source counts, leaving section empty");
            return Ok(report);
        };

        let by_module = module_samples(self.history, source_counts, |m| (m.path.as_str(), m.value));
        let total_source_count: i64 = current.iter().map(|m| m.value).sum();

        let mut modules: Vec<ModuleValueReport> = current
            .iter()
            .map(|module| ModuleValueReport {
                path: module.path.clone(),
                value: module.value,
                coverage_rate: to_percentage_of(module.value, total_source_count),
                diff_rate: by_module.get(module.path.as_str()).and_then(|s| diff_rate(s)),
            })
            .collect();
        modules.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.path.cmp(&b.path)));

        report.modules_source_count = Some(ModulesSourceCountReport {
            total_source_count,
            modules,
        });
        Ok(report)
    }
}

/// Fills the module execution section, ranking modules by their current
/// duration.
pub struct ModulesExecutionReportStage<'a> {
    history: &'a MetricHistory,
    config: ReportConfig,
}

impl<'a> ModulesExecutionReportStage<'a> {
    /// Create the stage.
    pub fn new(history: &'a MetricHistory, config: ReportConfig) -> Self {
        Self { history, config }
    }
}

impl Stage<Report> for ModulesExecutionReportStage<'_> {
    fn name(&self) -> &str {
        "create-modules-execution-report"
    }

    fn process(&self, mut report: Report) -> Result<Report> {
        let Some(current) = latest(self.history, module_executions) else {
            debug!("No module executions, leaving section empty");
            return Ok(report);
        };

        let by_module =
            module_samples(self.history, module_executions, |m| (m.path.as_str(), m.duration));
        let total_duration: i64 = current.iter().map(|m| m.duration).sum();

        let mut modules = Vec::with_capacity(current.len());
        for module in current {
            let samples = by_module.get(module.path.as_str()).map(Vec::as_slice).unwrap_or_default();
            let durations: Vec<i64> = samples.iter().map(|s| s.value).collect();
            modules.push(ModuleExecutionReport {
                path: module.path.clone(),
                duration: module.duration,
                mean_duration: mean(&durations),
                coverage_rate: to_percentage_of(module.duration, total_duration),
                parallel_rate: module.parallel_rate,
                diff_rate: diff_rate(samples),
                values: chart_series(samples, self.config.column_budget)?,
            });
        }
        modules.sort_by(|a, b| b.duration.cmp(&a.duration).then_with(|| a.path.cmp(&b.path)));

        report.modules_execution = Some(ModulesExecutionReport {
            total_duration,
            modules,
        });
        Ok(report)
    }
}
