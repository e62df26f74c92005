//! Sink error definitions
//!
//! Categorized by phase: emit / release / panic / underlying io

use thiserror::Error;

/// Error raised by a single sink
#[derive(Debug, Error)]
pub enum SinkError {
    /// Emit failed
    #[error("sink '{sink_name}' write error: {message}")]
    Write { sink_name: String, message: String },

    /// Sink was already released
    #[error("sink '{sink_name}' is closed")]
    Closed { sink_name: String },

    /// Release failed
    #[error("sink '{sink_name}' release error: {message}")]
    Release { sink_name: String, message: String },

    /// Sink panicked while handling a call
    #[error("sink '{sink_name}' panicked: {message}")]
    Panicked { sink_name: String, message: String },

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialize error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Any other error, e.g. a nested aggregate failure
    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl SinkError {
    /// Create sink write error
    pub fn write(sink_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Write {
            sink_name: sink_name.into(),
            message: message.into(),
        }
    }

    /// Create closed-sink error
    pub fn closed(sink_name: impl Into<String>) -> Self {
        Self::Closed {
            sink_name: sink_name.into(),
        }
    }

    /// Create sink release error
    pub fn release(sink_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Release {
            sink_name: sink_name.into(),
            message: message.into(),
        }
    }

    /// Create panic error
    pub fn panicked(sink_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Panicked {
            sink_name: sink_name.into(),
            message: message.into(),
        }
    }

    /// Wrap an arbitrary error
    pub fn other(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Other(Box::new(error))
    }
}
