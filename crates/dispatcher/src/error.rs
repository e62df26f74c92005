//! Dispatcher error types

use std::fmt;

use contracts::SinkError;
use thiserror::Error;

/// One captured sink fault from a single emit pass
#[derive(Debug)]
pub struct SinkFailure {
    /// Position of the sink in dispatch order
    pub index: usize,
    /// Sink name
    pub sink: String,
    /// Underlying error
    pub error: SinkError,
}

impl fmt::Display for SinkFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sink #{} '{}': {}", self.index, self.sink, self.error)
    }
}

/// Dispatcher-specific errors
#[derive(Debug, Error)]
pub enum DispatcherError {
    /// Construction was given no sink source
    #[error("invalid argument '{name}': {message}")]
    InvalidArgument { name: String, message: String },

    /// One or more sinks failed during a single emit pass
    #[error("failed to emit a log event")]
    AggregatedFailure { failures: Vec<SinkFailure> },

    /// Emit was called after release
    #[error("aggregate sink '{name}' has been released")]
    Released { name: String },
}

impl DispatcherError {
    /// Create an invalid argument error
    pub fn invalid_argument(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Per-sink failures carried by an aggregated failure, in dispatch order
    ///
    /// Empty for every other variant.
    pub fn failures(&self) -> &[SinkFailure] {
        match self {
            Self::AggregatedFailure { failures } => failures,
            _ => &[],
        }
    }

    /// Underlying sink errors, in dispatch order
    pub fn errors(&self) -> impl Iterator<Item = &SinkError> {
        self.failures().iter().map(|f| &f.error)
    }
}
