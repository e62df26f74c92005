//! Diagnostic side channel for internal faults
//!
//! A [`SelfLog`] receives plain-text lines describing faults the dispatcher
//! caught. Writing to the channel never propagates a failure back to the
//! caller: write errors are ignored by the implementations here, and a panic
//! raised by any channel is swallowed by [`report`].
//!
//! A process-wide channel can be installed with [`enable`]; it is disabled
//! until then. [`GlobalSelfLog`] forwards to whatever is installed at the
//! time of the call.

use std::io::Write;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tracing::warn;

/// Best-effort diagnostic line writer
pub trait SelfLog: Send + Sync {
    fn write_line(&self, line: &str);
}

static GLOBAL: RwLock<Option<Arc<dyn SelfLog>>> = RwLock::new(None);

/// Install the process-wide channel, replacing any previous one
pub fn enable(channel: Arc<dyn SelfLog>) {
    *GLOBAL.write().unwrap_or_else(PoisonError::into_inner) = Some(channel);
}

/// Remove the process-wide channel
pub fn disable() {
    *GLOBAL.write().unwrap_or_else(PoisonError::into_inner) = None;
}

/// Whether a process-wide channel is installed
pub fn is_enabled() -> bool {
    GLOBAL
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .is_some()
}

/// Write a line to the process-wide channel, if any
pub fn write_line(line: &str) {
    let channel = GLOBAL
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone();
    if let Some(channel) = channel {
        report(channel.as_ref(), line);
    }
}

/// Deliver a line to `channel`, swallowing any panic it raises
pub fn report(channel: &dyn SelfLog, line: &str) {
    // The hook still prints the panic; only unwinding into the caller is stopped.
    let _ = panic::catch_unwind(AssertUnwindSafe(|| channel.write_line(line)));
}

/// Forwards to the process-wide channel
#[derive(Debug, Default, Clone, Copy)]
pub struct GlobalSelfLog;

impl SelfLog for GlobalSelfLog {
    fn write_line(&self, line: &str) {
        write_line(line);
    }
}

/// Routes lines into `tracing` at WARN on target `logmux::selflog`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSelfLog;

impl SelfLog for TracingSelfLog {
    fn write_line(&self, line: &str) {
        warn!(target: "logmux::selflog", "{line}");
    }
}

/// Writes lines to stderr, ignoring write errors
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrSelfLog;

impl SelfLog for StderrSelfLog {
    fn write_line(&self, line: &str) {
        let _ = writeln!(std::io::stderr().lock(), "{line}");
    }
}

/// Discards every line
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSelfLog;

impl SelfLog for NullSelfLog {
    fn write_line(&self, _line: &str) {}
}

/// Keeps every line in memory
#[derive(Debug, Default)]
pub struct CaptureSelfLog {
    lines: Mutex<Vec<String>>,
}

impl CaptureSelfLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the captured lines, oldest first
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl SelfLog for CaptureSelfLog {
    fn write_line(&self, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_string());
    }
}

impl<S: SelfLog + ?Sized> SelfLog for Arc<S> {
    fn write_line(&self, line: &str) {
        (**self).write_line(line);
    }
}
