//! AggregateSink - sequential fan-out of one event to a fixed set of sinks

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use contracts::{LogEvent, LogEventSink, Release, SinkError};

use crate::error::{DispatcherError, SinkFailure};
use crate::handle::SinkHandle;
use crate::metrics::MetricsSnapshot;
use crate::selflog::{self, GlobalSelfLog, SelfLog};

const DEFAULT_NAME: &str = "aggregate";

/// Builder for creating an AggregateSink
///
/// `build` fails with [`DispatcherError::InvalidArgument`] when no sink
/// source was supplied.
#[derive(Default)]
pub struct AggregateSinkBuilder {
    name: Option<String>,
    sinks: Option<Vec<Box<dyn LogEventSink>>>,
    self_log: Option<Arc<dyn SelfLog>>,
}

impl AggregateSinkBuilder {
    /// Create a new AggregateSinkBuilder
    pub fn new() -> Self {
        Self::default()
    }

    /// Name used in diagnostics when this aggregate is itself a sink
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Supply the sink source; traversed once, here
    pub fn sinks<I>(mut self, sinks: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn LogEventSink>>,
    {
        self.sinks.get_or_insert_with(Vec::new).extend(sinks);
        self
    }

    /// Append a single sink
    pub fn sink(mut self, sink: impl LogEventSink + 'static) -> Self {
        self.sinks.get_or_insert_with(Vec::new).push(Box::new(sink));
        self
    }

    /// Diagnostic channel; defaults to the process-wide channel
    pub fn self_log(mut self, channel: Arc<dyn SelfLog>) -> Self {
        self.self_log = Some(channel);
        self
    }

    /// Build the aggregate. No sink method is invoked.
    pub fn build(self) -> Result<AggregateSink, DispatcherError> {
        let sinks = self.sinks.ok_or_else(|| {
            DispatcherError::invalid_argument("sinks", "no sink source was supplied")
        })?;
        let self_log = self.self_log.unwrap_or_else(|| Arc::new(GlobalSelfLog));

        let mut aggregate = AggregateSink::new(sinks, self_log);
        if let Some(name) = self.name {
            aggregate.name = name;
        }
        Ok(aggregate)
    }
}

/// Distributes each event to every owned sink, in construction order
///
/// Per-sink faults never stop delivery to the remaining sinks. Emit faults
/// are reported on the diagnostic channel and returned together as one
/// [`DispatcherError::AggregatedFailure`]. Release faults are reported and
/// dropped.
///
/// The dispatcher does not serialize concurrent `emit` calls; sinks shared
/// this way must synchronize themselves.
pub struct AggregateSink {
    name: String,
    handles: Vec<SinkHandle>,
    self_log: Arc<dyn SelfLog>,
    released: AtomicBool,
}

impl AggregateSink {
    /// Create an aggregate over `sinks`, materialized eagerly
    pub fn new<I>(sinks: I, self_log: Arc<dyn SelfLog>) -> Self
    where
        I: IntoIterator<Item = Box<dyn LogEventSink>>,
    {
        let handles = sinks
            .into_iter()
            .enumerate()
            .map(|(index, sink)| SinkHandle::new(index, sink))
            .collect();

        Self {
            name: DEFAULT_NAME.to_string(),
            handles,
            self_log,
            released: AtomicBool::new(false),
        }
    }

    /// Start a builder
    pub fn builder() -> AggregateSinkBuilder {
        AggregateSinkBuilder::new()
    }

    /// Number of owned sinks
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Sink names in dispatch order
    pub fn sink_names(&self) -> Vec<&str> {
        self.handles.iter().map(SinkHandle::name).collect()
    }

    /// Handles in dispatch order
    pub fn handles(&self) -> &[SinkHandle] {
        &self.handles
    }

    /// Whether release has been attempted at least once
    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::Acquire)
    }

    /// Get metrics for all sinks
    pub fn metrics(&self) -> Vec<(String, MetricsSnapshot)> {
        self.handles
            .iter()
            .map(|h| (h.name().to_string(), h.metrics().snapshot()))
            .collect()
    }

    /// Emit `event` to every sink
    ///
    /// # Errors
    /// - [`DispatcherError::AggregatedFailure`] when at least one sink failed;
    ///   every other sink still received the event
    /// - [`DispatcherError::Released`] when called after [`release`](Self::release);
    ///   no sink is invoked
    #[instrument(
        name = "aggregate_sink_emit",
        skip(self, event),
        fields(aggregate = %self.name, level = %event.level, sinks = self.handles.len())
    )]
    pub fn emit(&self, event: &LogEvent) -> Result<(), DispatcherError> {
        if self.is_released() {
            warn!(aggregate = %self.name, "Emit after release rejected");
            return Err(DispatcherError::Released {
                name: self.name.clone(),
            });
        }

        let mut failures: Vec<SinkFailure> = Vec::new();

        for handle in &self.handles {
            match handle.try_emit(event) {
                Ok(()) => {
                    handle.metrics().inc_emit_count();
                    observability::record_sink_emit(handle.name(), true);
                }
                Err(error) => {
                    handle.metrics().inc_failure_count();
                    observability::record_sink_emit(handle.name(), false);
                    selflog::report(
                        self.self_log.as_ref(),
                        &format!(
                            "caught exception while emitting to sink {}: {}",
                            handle.name(),
                            error
                        ),
                    );
                    failures.push(SinkFailure {
                        index: handle.index(),
                        sink: handle.name().to_string(),
                        error,
                    });
                }
            }
        }

        observability::record_event_emitted(self.handles.len());

        if failures.is_empty() {
            return Ok(());
        }

        debug!(failed = failures.len(), "Emit completed with sink failures");
        observability::record_aggregate_failure(failures.len());
        Err(DispatcherError::AggregatedFailure { failures })
    }

    /// Release every sink that supports release
    ///
    /// Always completes. Sinks without the release capability are skipped.
    /// Calling this again attempts release on every releasable sink again.
    #[instrument(
        name = "aggregate_sink_release",
        skip(self),
        fields(aggregate = %self.name, sinks = self.handles.len())
    )]
    pub fn release(&self) {
        let first = !self.released.swap(true, Ordering::AcqRel);
        if !first {
            debug!(aggregate = %self.name, "Aggregate already released, releasing sinks again");
        }

        let mut attempted = 0usize;
        let mut failed = 0usize;

        for handle in &self.handles {
            let Some(result) = handle.try_release() else {
                continue;
            };
            attempted += 1;

            match result {
                Ok(()) => {
                    handle.metrics().inc_release_count();
                    observability::record_sink_release(handle.name(), true);
                }
                Err(error) => {
                    failed += 1;
                    handle.metrics().inc_release_failure_count();
                    observability::record_sink_release(handle.name(), false);
                    selflog::report(
                        self.self_log.as_ref(),
                        &format!(
                            "caught exception while disposing sink {}: {}",
                            handle.name(),
                            error
                        ),
                    );
                }
            }
        }

        info!(
            aggregate = %self.name,
            attempted,
            failed,
            "Aggregate sink released"
        );
    }
}

impl std::fmt::Debug for AggregateSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AggregateSink")
            .field("name", &self.name)
            .field("handles", &self.handles)
            .field("released", &self.is_released())
            .finish()
    }
}

impl LogEventSink for AggregateSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn emit(&self, event: &LogEvent) -> Result<(), SinkError> {
        AggregateSink::emit(self, event).map_err(SinkError::other)
    }

    fn as_release(&self) -> Option<&dyn Release> {
        Some(self)
    }
}

impl Release for AggregateSink {
    fn release(&self) -> Result<(), SinkError> {
        AggregateSink::release(self);
        Ok(())
    }
}
