//! LogEventSink trait - dispatcher output interface
//!
//! Emit is the mandatory capability. Release is optional and discovered by
//! probing [`LogEventSink::as_release`] at the point of use.

use crate::{LogEvent, SinkError};

/// Event output trait
///
/// All sink implementations must implement this trait. Calls take `&self`;
/// a sink shared across threads provides its own synchronization.
pub trait LogEventSink: Send + Sync {
    /// Sink name (used for diagnostics/metrics)
    fn name(&self) -> &str;

    /// Accept one event
    ///
    /// # Errors
    /// Returns write error (should include context)
    fn emit(&self, event: &LogEvent) -> Result<(), SinkError>;

    /// Release capability, if this sink holds resources
    fn as_release(&self) -> Option<&dyn Release> {
        None
    }
}

/// Optional capability: free resources held by a sink (flush and close)
pub trait Release: Send + Sync {
    /// # Errors
    /// Returns release error; callers on shutdown paths report and move on
    fn release(&self) -> Result<(), SinkError>;
}

impl<S: LogEventSink + ?Sized> LogEventSink for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn emit(&self, event: &LogEvent) -> Result<(), SinkError> {
        (**self).emit(event)
    }

    fn as_release(&self) -> Option<&dyn Release> {
        (**self).as_release()
    }
}

impl<S: LogEventSink + ?Sized> LogEventSink for std::sync::Arc<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn emit(&self, event: &LogEvent) -> Result<(), SinkError> {
        (**self).emit(event)
    }

    fn as_release(&self) -> Option<&dyn Release> {
        (**self).as_release()
    }
}
