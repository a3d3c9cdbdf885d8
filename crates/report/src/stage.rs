//! Sequential stage pipeline.
//!
//! A [`Pipeline`] threads one value through an ordered list of stages:
//! ```text
//! input → stage 1 → stage 2 → … → output
//! ```
//! Stages run strictly in registration order and the first failure aborts the
//! run; no partially processed value is returned.

use std::time::Instant;
use tracing::{debug, warn};

use crate::Result;

/// A named transformation over an accumulator.
pub trait Stage<T>: Send + Sync {
    /// Stage name, used in logs.
    fn name(&self) -> &str;

    /// Transform the accumulator.
    fn process(&self, input: T) -> Result<T>;
}

/// An ordered list of stages over the same accumulator type.
pub struct Pipeline<'a, T> {
    name: String,
    stages: Vec<Box<dyn Stage<T> + 'a>>,
}

impl<'a, T> Pipeline<'a, T> {
    /// Create an empty pipeline.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stages: Vec::new(),
        }
    }

    /// Append a stage.
    pub fn stage(mut self, stage: impl Stage<T> + 'a) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Append a boxed stage.
    pub fn push(&mut self, stage: Box<dyn Stage<T> + 'a>) {
        self.stages.push(stage);
    }

    /// Names of the registered stages, in execution order.
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the pipeline has no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run every stage in order.
    pub fn run(&self, input: T) -> Result<T> {
        debug!("Running pipeline '{}' with {} stages", self.name, self.stages.len());

        let mut value = input;
        for stage in &self.stages {
            let start = Instant::now();
            value = stage.process(value).map_err(|e| {
                warn!("Stage '{}' of pipeline '{}' failed: {}", stage.name(), self.name, e);
                e
            })?;
            debug!("Stage '{}' finished in {:?}", stage.name(), start.elapsed());
        }

        Ok(value)
    }
}
