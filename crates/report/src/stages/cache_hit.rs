//! Build cache hit report.

use std::collections::BTreeMap;

use buildscope_core::{CacheHitReport, ModuleCacheHit, ModuleCacheHitReport, Report};
use tracing::debug;

use crate::history::{chart_series, diff_rate, MetricHistory, Sample};
use crate::{ReportConfig, Result, Stage};

/// Fills the cache hit section: the overall rate plus a per-module breakdown.
pub struct CacheHitReportStage<'a> {
    history: &'a MetricHistory,
    config: ReportConfig,
}

impl<'a> CacheHitReportStage<'a> {
    /// Create the stage.
    pub fn new(history: &'a MetricHistory, config: ReportConfig) -> Self {
        Self { history, config }
    }

    /// Module breakdown of the most recent metric that has one.
    fn current_modules(&self) -> Option<&'a [ModuleCacheHit]> {
        self.history
            .metrics()
            .iter()
            .rev()
            .filter_map(|m| m.cache_hit.as_ref().map(|c| c.modules.as_slice()))
            .find(|modules| !modules.is_empty())
    }

    fn module_samples(&self) -> BTreeMap<&'a str, Vec<Sample>> {
        let mut modules: BTreeMap<&'a str, Vec<Sample>> = BTreeMap::new();
        for metric in self.history.metrics() {
            let Some(cache_hit) = &metric.cache_hit else {
                continue;
            };
            for module in &cache_hit.modules {
                modules
                    .entry(module.path.as_str())
                    .or_default()
                    .push(Sample::new(metric.created_at, module.rate));
            }
        }
        modules
    }
}

impl Stage<Report> for CacheHitReportStage<'_> {
    fn name(&self) -> &str {
        "create-cache-hit-report"
    }

    fn process(&self, mut report: Report) -> Result<Report> {
        let overall = self.history.samples(|m| m.cache_hit.as_ref().map(|c| c.rate));
        let Some(latest) = overall.last() else {
            debug!("No cache hit samples, leaving section empty");
            return Ok(report);
        };

        let mut modules = Vec::new();
        if let Some(current) = self.current_modules() {
            let by_module = self.module_samples();
            for module in current {
                let samples = by_module.get(module.path.as_str()).map(Vec::as_slice).unwrap_or_default();
                modules.push(ModuleCacheHitReport {
                    path: module.path.clone(),
                    rate: module.rate,
                    diff_rate: diff_rate(samples),
                    values: chart_series(samples, self.config.column_budget)?,
                });
            }
        }
        modules.sort_by(|a, b| b.rate.cmp(&a.rate).then_with(|| a.path.cmp(&b.path)));

        report.cache_hit = Some(CacheHitReport {
            modules,
            overall_values: chart_series(&overall, self.config.column_budget)?,
            overall_rate: latest.value,
            overall_diff_rate: diff_rate(&overall),
        });
        Ok(report)
    }
}
