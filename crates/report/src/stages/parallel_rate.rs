//! Parallel execution rate report.

use buildscope_core::{ParallelExecutionRateReport, Report};
use tracing::debug;

use crate::history::{axis_bounds, chart_series, diff_rate, MetricHistory};
use crate::{ReportConfig, Result, Stage};

/// Fills the parallel execution rate section.
pub struct ParallelRateReportStage<'a> {
    history: &'a MetricHistory,
    config: ReportConfig,
}

impl<'a> ParallelRateReportStage<'a> {
    /// Create the stage.
    pub fn new(history: &'a MetricHistory, config: ReportConfig) -> Self {
        Self { history, config }
    }
}

impl Stage<Report> for ParallelRateReportStage<'_> {
    fn name(&self) -> &str {
        "create-parallel-execution-rate-report"
    }

    fn process(&self, mut report: Report) -> Result<Report> {
        let threshold = self.config.noise_threshold_ms;
        let samples = self.history.samples(|m| {
            m.parallel_execution
                .filter(|p| p.serial_duration >= threshold)
                .map(|p| p.rate)
        });
        let Some(latest) = samples.last() else {
            debug!("No parallel execution samples, leaving section empty");
            return Ok(report);
        };

        let values = chart_series(&samples, self.config.column_budget)?;
        let (suggested_max_value, suggested_min_value) =
            axis_bounds(&values, self.config.axis_padding_percentage);

        report.parallel_execution_rate = Some(ParallelExecutionRateReport {
            overall_rate: latest.value,
            overall_diff_rate: diff_rate(&samples),
            values,
            suggested_max_value,
            suggested_min_value,
        });
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildscope_core::{BuildMetric, ParallelExecutionMetric, ReportIdentity};

    const DAY: i64 = 86_400_000;
    // 2022-10-12T00:00:00Z
    const OCT_12: i64 = 1_665_532_800_000;

    fn metric(day: i64, rate: i64, serial_duration: i64) -> BuildMetric {
        let mut metric = BuildMetric::new("main", vec![], OCT_12 + day * DAY);
        metric.parallel_execution = Some(ParallelExecutionMetric {
            rate,
            serial_duration,
            total_duration: serial_duration * 2,
        });
        metric
    }

    fn run(history: &MetricHistory) -> Report {
        ParallelRateReportStage::new(history, ReportConfig::default())
            .process(Report::new(ReportIdentity::new("main", vec![])))
            .unwrap()
    }

    #[test]
    fn test_empty() {
        assert!(run(&MetricHistory::default()).parallel_execution_rate.is_none());
    }

    #[test]
    fn test_rates_and_diff() {
        let history = MetricHistory::new(vec![metric(0, 20, 1000), metric(1, 30, 1000)]);
        let section = run(&history).parallel_execution_rate.unwrap();
        assert_eq!(section.overall_rate, 30);
        assert_eq!(section.overall_diff_rate, Some(50.0));
        assert_eq!(section.suggested_max_value, 39);
        assert_eq!(section.suggested_min_value, 14);
    }

    #[test]
    fn test_near_instant_builds_are_skipped() {
        let history = MetricHistory::new(vec![metric(0, 90, 10), metric(1, 30, 1000)]);
        let section = run(&history).parallel_execution_rate.unwrap();
        assert_eq!(section.values.len(), 1);
        assert_eq!(section.overall_diff_rate, None);
    }
}
