//! Shared sink wiring for `run` and `info`.

use std::path::Path;
use std::sync::Arc;

use dispatcher::{AggregateSink, FileSink, GlobalSelfLog, LogEventSink, LogSink};
use tracing::debug;

use crate::error::{CliError, Result};

pub const CONSOLE_SINK: &str = "console";
pub const FILE_SINK: &str = "file";

/// Build the aggregate: console first, then the optional file sink
///
/// Faults are reported on the process-wide diagnostic channel.
pub fn build_aggregate(console: bool, output: Option<&Path>) -> Result<AggregateSink> {
    let mut sinks: Vec<Box<dyn LogEventSink>> = Vec::with_capacity(2);

    if console {
        sinks.push(Box::new(LogSink::new(CONSOLE_SINK)));
    }
    if let Some(path) = output {
        let sink = FileSink::new(FILE_SINK, path)
            .map_err(|e| CliError::sink_setup(FILE_SINK, path, e))?;
        debug!(path = %path.display(), "File sink opened");
        sinks.push(Box::new(sink));
    }

    Ok(AggregateSink::builder()
        .name("logmux")
        .sinks(sinks)
        .self_log(Arc::new(GlobalSelfLog))
        .build()?)
}
