//! Storage abstraction and implementations for buildscope.
//!
//! This crate provides a trait-based metric store with a JSON file
//! reference implementation.

#![warn(missing_docs)]

pub mod trait_;
pub mod json_storage;

pub use trait_::{MetricStore, MetricFilter, StorageError, Result};
pub use json_storage::JsonMetricStore;
