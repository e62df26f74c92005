//! SinkHandle - owns one sink and isolates calls into it

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use contracts::{LogEvent, LogEventSink, SinkError};

use crate::metrics::SinkMetrics;

/// Handle to one sink in an aggregate
///
/// Calls through the handle never unwind: a panicking sink is reported as
/// [`SinkError::Panicked`].
pub struct SinkHandle {
    /// Position in dispatch order
    index: usize,
    /// Sink name, captured at construction
    name: String,
    sink: Box<dyn LogEventSink>,
    /// Shared metrics
    metrics: Arc<SinkMetrics>,
}

impl SinkHandle {
    /// Wrap a sink at the given dispatch position
    pub fn new(index: usize, sink: Box<dyn LogEventSink>) -> Self {
        Self {
            index,
            name: sink.name().to_string(),
            sink,
            metrics: Arc::new(SinkMetrics::new()),
        }
    }

    /// Get dispatch position
    pub fn index(&self) -> usize {
        self.index
    }

    /// Get sink name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get current metrics
    pub fn metrics(&self) -> &Arc<SinkMetrics> {
        &self.metrics
    }

    /// Whether the sink exposes the release capability
    pub fn is_releasable(&self) -> bool {
        self.sink.as_release().is_some()
    }

    /// Emit to the sink, converting a panic into an error
    pub fn try_emit(&self, event: &LogEvent) -> Result<(), SinkError> {
        match panic::catch_unwind(AssertUnwindSafe(|| self.sink.emit(event))) {
            Ok(result) => result,
            Err(payload) => Err(SinkError::panicked(
                &self.name,
                panic_message(payload.as_ref()),
            )),
        }
    }

    /// Release the sink if it supports release
    ///
    /// Returns `None` when the sink has no release capability.
    pub fn try_release(&self) -> Option<Result<(), SinkError>> {
        let releasable = self.sink.as_release()?;
        let result = match panic::catch_unwind(AssertUnwindSafe(|| releasable.release())) {
            Ok(result) => result,
            Err(payload) => Err(SinkError::panicked(
                &self.name,
                panic_message(payload.as_ref()),
            )),
        };
        Some(result)
    }
}

impl std::fmt::Debug for SinkHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SinkHandle")
            .field("index", &self.index)
            .field("name", &self.name)
            .field("releasable", &self.is_releasable())
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
