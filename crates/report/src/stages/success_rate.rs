//! Successful build rate report.

use buildscope_core::{Report, SuccessRateReport};
use buildscope_stats::to_percentage_of;
use tracing::debug;

use crate::history::{chart_series, MetricHistory};
use crate::{ReportConfig, Result, Stage};

/// Fills the success rate section.
///
/// Each build contributes `100` (success) or `0` (failure); downsampling then
/// turns merged ranges into the success rate of that range.
pub struct SuccessRateReportStage<'a> {
    history: &'a MetricHistory,
    config: ReportConfig,
}

impl<'a> SuccessRateReportStage<'a> {
    /// Create the stage.
    pub fn new(history: &'a MetricHistory, config: ReportConfig) -> Self {
        Self { history, config }
    }
}

impl Stage<Report> for SuccessRateReportStage<'_> {
    fn name(&self) -> &str {
        "create-success-build-rate-report"
    }

    fn process(&self, mut report: Report) -> Result<Report> {
        let samples = self
            .history
            .samples(|m| m.outcome.map(|o| if o.is_success() { 100 } else { 0 }));
        if samples.is_empty() {
            debug!("No build outcomes, leaving section empty");
            return Ok(report);
        }

        let successes = samples.iter().filter(|s| s.value == 100).count() as i64;
        report.success_build_rate = Some(SuccessRateReport {
            values: chart_series(&samples, self.config.column_budget)?,
            overall_rate: to_percentage_of(successes, samples.len() as i64),
        });
        Ok(report)
    }
}
