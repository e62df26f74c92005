//! # Dispatcher
//!
//! Log event fan-out.
//!
//! Responsibilities:
//! - Deliver each `LogEvent` to every owned sink, in order
//! - Isolate sink failures, one broken sink never blocks the rest
//! - Aggregate emit failures into one `DispatcherError`
//! - Release owned sinks on shutdown without ever failing

pub mod dispatcher;
pub mod error;
pub mod handle;
pub mod metrics;
pub mod selflog;
pub mod sinks;

pub use contracts::{LogEvent, LogEventSink, LogLevel, Release, SinkError};
pub use dispatcher::{AggregateSink, AggregateSinkBuilder};
pub use error::{DispatcherError, SinkFailure};
pub use handle::SinkHandle;
pub use metrics::{MetricsSnapshot, SinkMetrics};
pub use selflog::{
    CaptureSelfLog, GlobalSelfLog, NullSelfLog, SelfLog, StderrSelfLog, TracingSelfLog,
};
pub use sinks::{FileSink, LogSink};
