//! Per-build measurement context.

use std::collections::BTreeMap;

use buildscope_core::{BuildOutcome, TimeSlot};
use serde::{Deserialize, Serialize};

/// A lifecycle phase whose duration is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildPhase {
    /// Settings and build script evaluation
    Initialization,
    /// Project configuration
    Configuration,
    /// Task execution
    Execution,
    /// Dependency resolution
    DependencyResolve,
}

/// One executed task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskExecution {
    /// Task path, e.g. `:app:compileKotlin`
    pub path: String,

    /// Owning module path, e.g. `:app`
    pub module: String,

    /// When the task ran
    pub slot: TimeSlot,

    /// Whether the outputs came from the build cache
    #[serde(default)]
    pub cached: bool,
}

/// Everything measured during one build.
///
/// The host build records into a context while it runs; once the build is
/// finished the context is collected into a [`BuildMetric`] and `reset()`
/// before the next build starts.
///
/// [`BuildMetric`]: buildscope_core::BuildMetric
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildContext {
    /// Branch the build runs on
    pub branch: String,

    /// Requested tasks
    pub requested_tasks: Vec<String>,

    /// Build start (epoch ms)
    pub started_at: i64,

    /// Recorded phase durations (ms)
    pub phases: BTreeMap<BuildPhase, Vec<u64>>,

    /// Executed tasks
    pub tasks: Vec<TaskExecution>,

    /// Source file count per module
    pub source_counts: BTreeMap<String, u64>,

    /// Final outcome
    pub outcome: Option<BuildOutcome>,
}

impl BuildContext {
    /// Start a context for a build.
    pub fn new(branch: impl Into<String>, requested_tasks: Vec<String>, started_at: i64) -> Self {
        Self {
            branch: branch.into(),
            requested_tasks,
            started_at,
            ..Default::default()
        }
    }

    /// Record one duration of `phase`.
    pub fn record_phase(&mut self, phase: BuildPhase, duration_ms: u64) {
        self.phases.entry(phase).or_default().push(duration_ms);
    }

    /// Record an executed task.
    pub fn record_task(&mut self, task: TaskExecution) {
        self.tasks.push(task);
    }

    /// Record the source file count of a module.
    pub fn record_source_count(&mut self, module: impl Into<String>, count: u64) {
        self.source_counts.insert(module.into(), count);
    }

    /// Record the build outcome.
    pub fn finish(&mut self, outcome: BuildOutcome) {
        self.outcome = Some(outcome);
    }

    /// Recorded durations of `phase` as signed milliseconds.
    pub fn phase_durations(&self, phase: BuildPhase) -> Vec<i64> {
        self.phases
            .get(&phase)
            .map(|durations| {
                durations
                    .iter()
                    .map(|&d| i64::try_from(d).unwrap_or(i64::MAX))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Clear every measurement, keeping nothing from the previous build.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_reset() {
        let mut context = BuildContext::new("main", vec!["assemble".to_string()], 1000);
        context.record_phase(BuildPhase::Configuration, 120);
        context.record_phase(BuildPhase::Configuration, 80);
        context.record_source_count(":app", 12);
        context.finish(BuildOutcome::Success);

        assert_eq!(context.phase_durations(BuildPhase::Configuration), vec![120, 80]);
        assert!(context.phase_durations(BuildPhase::Execution).is_empty());

        context.reset();
        assert_eq!(context, BuildContext::default());
    }

    #[test]
    fn test_trace_deserialization() {
        let trace = r#"{
            "branch": "main",
            "requested_tasks": ["assemble"],
            "started_at": 1665532800000,
            "phases": {"initialization": [120], "execution": [3000]},
            "tasks": [
                {"path": ":app:compile", "module": ":app",
                 "slot": {"started_at": 0, "finished_at": 100}, "cached": true}
            ]
        }"#;
        let context: BuildContext = serde_json::from_str(trace).unwrap();
        assert_eq!(context.phase_durations(BuildPhase::Initialization), vec![120]);
        assert_eq!(context.tasks.len(), 1);
        assert!(context.tasks[0].cached);
        assert!(context.outcome.is_none());
    }

    #[test]
    fn test_trace_with_reversed_slot_is_rejected() {
        let trace = r#"{"tasks": [{"path": ":a", "module": ":a",
            "slot": {"started_at": 10, "finished_at": 0}}]}"#;
        assert!(serde_json::from_str::<BuildContext>(trace).is_err());
    }

    #[test]
    fn test_trace_with_negative_duration_is_rejected() {
        let trace = r#"{"phases": {"execution": [-5]}}"#;
        assert!(serde_json::from_str::<BuildContext>(trace).is_err());
    }
}
