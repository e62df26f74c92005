//! Error types for CLI operations.

use std::path::PathBuf;

use dispatcher::DispatcherError;
use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// A sink could not be created
    #[error("Failed to open sink '{name}' at {}: {source}", path.display())]
    SinkSetup {
        name: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Emitting through the aggregate failed
    #[error("Emit failed: {0}")]
    Emit(#[from] DispatcherError),

    /// Serialization error
    #[error("Output serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl CliError {
    pub fn sink_setup(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::SinkSetup {
            name: name.into(),
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
