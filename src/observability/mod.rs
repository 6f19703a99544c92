//! Observability module for monitoring and metrics.
//!
//! This module provides counters for the validation and storage flows and a
//! timer that logs operation durations through `tracing`.

pub mod metrics;

pub use metrics::{MetricsTracker, Timer};
