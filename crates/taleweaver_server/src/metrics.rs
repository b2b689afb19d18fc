//! Story operation metrics.
//!
//! Backed by OpenTelemetry with the `metrics` feature; a no-op otherwise.

#[cfg(feature = "metrics")]
use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram},
};
use std::time::Duration;

/// Story operation being measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoryOperation {
    /// `POST /story/start`
    Start,
    /// `POST /story/continue`
    Continue,
}

impl StoryOperation {
    /// Label value for this operation.
    pub fn as_str(self) -> &'static str {
        match self {
            StoryOperation::Start => "start",
            StoryOperation::Continue => "continue",
        }
    }
}

/// Counters and latency histogram for story operations.
#[cfg(feature = "metrics")]
#[derive(Clone)]
pub struct StoryMetrics {
    operations: Counter<u64>,
    failures: Counter<u64>,
    duration: Histogram<f64>,
}

#[cfg(feature = "metrics")]
impl StoryMetrics {
    /// Create instruments on the global meter.
    pub fn new() -> Self {
        let meter = global::meter("taleweaver_story");
        Self {
            operations: meter
                .u64_counter("story.operations")
                .with_description("Completed story operations")
                .build(),
            failures: meter
                .u64_counter("story.failures")
                .with_description("Failed story operations")
                .build(),
            duration: meter
                .f64_histogram("story.duration")
                .with_unit("seconds")
                .with_description("Story operation duration including the backend call")
                .build(),
        }
    }

    /// Record one finished operation.
    pub fn record(&self, operation: StoryOperation, succeeded: bool, elapsed: Duration) {
        let labels = &[KeyValue::new("operation", operation.as_str())];
        self.duration.record(elapsed.as_secs_f64(), labels);
        if succeeded {
            self.operations.add(1, labels);
        } else {
            self.failures.add(1, labels);
        }
    }
}

/// No-op stand-in used when the `metrics` feature is disabled.
#[cfg(not(feature = "metrics"))]
#[derive(Clone, Copy)]
pub struct StoryMetrics;

#[cfg(not(feature = "metrics"))]
impl StoryMetrics {
    /// Create the no-op recorder.
    pub fn new() -> Self {
        Self
    }

    /// Discards the measurement.
    pub fn record(&self, operation: StoryOperation, succeeded: bool, elapsed: Duration) {
        let _ = (operation, succeeded, elapsed);
    }
}

impl Default for StoryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StoryMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoryMetrics")
            .field("enabled", &cfg!(feature = "metrics"))
            .finish()
    }
}
