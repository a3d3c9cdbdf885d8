//! Median/mean chart stages for the timed build phases.

use buildscope_core::{BuildMetric, ProcessMetric, ProcessReport, Report};
use tracing::debug;

use crate::history::{axis_bounds, chart_series, MetricHistory, Sample};
use crate::{ReportConfig, Result, Stage};

/// A timed phase that is charted as median and mean series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum ProcessKind {
    Initialization,
    Configuration,
    Execution,
    OverallBuild,
    DependencyResolve,
}

impl ProcessKind {
    /// Every kind, in report order.
    pub const ALL: [ProcessKind; 5] = [
        ProcessKind::Initialization,
        ProcessKind::Configuration,
        ProcessKind::Execution,
        ProcessKind::OverallBuild,
        ProcessKind::DependencyResolve,
    ];

    /// Stage name.
    pub fn stage_name(self) -> &'static str {
        match self {
            ProcessKind::Initialization => "create-initialization-process-report",
            ProcessKind::Configuration => "create-configuration-process-report",
            ProcessKind::Execution => "create-execution-process-report",
            ProcessKind::OverallBuild => "create-overall-build-process-report",
            ProcessKind::DependencyResolve => "create-dependency-resolve-process-report",
        }
    }

    fn select(self, metric: &BuildMetric) -> Option<ProcessMetric> {
        match self {
            ProcessKind::Initialization => metric.initialization,
            ProcessKind::Configuration => metric.configuration,
            ProcessKind::Execution => metric.execution,
            ProcessKind::OverallBuild => metric.overall_build,
            ProcessKind::DependencyResolve => metric.dependency_resolve,
        }
    }

    /// Whether samples under the noise threshold are dropped.
    fn skips_noise(self) -> bool {
        matches!(self, ProcessKind::Execution | ProcessKind::OverallBuild)
    }

    fn section(self, report: &mut Report) -> &mut Option<ProcessReport> {
        match self {
            ProcessKind::Initialization => &mut report.initialization_process,
            ProcessKind::Configuration => &mut report.configuration_process,
            ProcessKind::Execution => &mut report.execution_process,
            ProcessKind::OverallBuild => &mut report.overall_build_process,
            ProcessKind::DependencyResolve => &mut report.dependency_resolve_process,
        }
    }
}

/// Fills one phase section of the report.
pub struct ProcessReportStage<'a> {
    kind: ProcessKind,
    history: &'a MetricHistory,
    config: ReportConfig,
}

impl<'a> ProcessReportStage<'a> {
    /// Create a stage for `kind`.
    pub fn new(kind: ProcessKind, history: &'a MetricHistory, config: ReportConfig) -> Self {
        Self { kind, history, config }
    }

    fn qualifying(&self) -> Vec<(i64, ProcessMetric)> {
        self.history
            .metrics()
            .iter()
            .filter_map(|m| self.kind.select(m).map(|p| (m.created_at, p)))
            .filter(|(_, p)| !self.kind.skips_noise() || p.median >= self.config.noise_threshold_ms)
            .collect()
    }
}

impl Stage<Report> for ProcessReportStage<'_> {
    fn name(&self) -> &str {
        self.kind.stage_name()
    }

    fn process(&self, mut report: Report) -> Result<Report> {
        let qualifying = self.qualifying();
        if qualifying.is_empty() {
            debug!("No {:?} samples, leaving section empty", self.kind);
            return Ok(report);
        }

        let medians: Vec<Sample> = qualifying.iter().map(|(at, p)| Sample::new(*at, p.median)).collect();
        let means: Vec<Sample> = qualifying.iter().map(|(at, p)| Sample::new(*at, p.mean)).collect();

        let median_values = chart_series(&medians, self.config.column_budget)?;
        let mean_values = chart_series(&means, self.config.column_budget)?;
        let (suggested_max_value, suggested_min_value) = axis_bounds(
            median_values.iter().chain(mean_values.iter()),
            self.config.axis_padding_percentage,
        );

        *self.kind.section(&mut report) = Some(ProcessReport {
            median_values,
            mean_values,
            suggested_max_value,
            suggested_min_value,
        });
        Ok(report)
    }
}
