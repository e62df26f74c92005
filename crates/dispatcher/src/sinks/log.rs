//! LogSink - forwards events into tracing

use contracts::{LogEvent, LogEventSink, LogLevel, SinkError};
use tracing::{debug, error, info, trace, warn};

/// Sink that re-emits events through `tracing`
///
/// Holds no resources, so it has no release capability.
pub struct LogSink {
    name: String,
}

impl LogSink {
    /// Create a new LogSink with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl LogEventSink for LogSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn emit(&self, event: &LogEvent) -> Result<(), SinkError> {
        let sink = self.name.as_str();
        let properties = &event.properties;
        let exception = event.exception.as_deref();
        let message = event.message.as_str();

        match event.level {
            LogLevel::Verbose => trace!(sink, ?properties, exception, "{message}"),
            LogLevel::Debug => debug!(sink, ?properties, exception, "{message}"),
            LogLevel::Information => info!(sink, ?properties, exception, "{message}"),
            LogLevel::Warning => warn!(sink, ?properties, exception, "{message}"),
            LogLevel::Error | LogLevel::Fatal => {
                error!(sink, level = %event.level, ?properties, exception, "{message}")
            }
        }
        Ok(())
    }
}
