//! FileSink - appends events to a file as JSON lines

use contracts::{LogEvent, LogEventSink, Release, SinkError};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, error, instrument};

/// Sink that writes one JSON document per line
///
/// Writes are buffered until release, which flushes and closes the file.
/// Emitting after release fails with [`SinkError::Closed`].
pub struct FileSink {
    name: String,
    path: PathBuf,
    writer: Mutex<Option<BufWriter<File>>>,
}

impl FileSink {
    /// Open (or create) `path` for appending
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> std::io::Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            name: name.into(),
            path,
            writer: Mutex::new(Some(BufWriter::new(file))),
        })
    }

    /// Output file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_line(writer: &mut BufWriter<File>, event: &LogEvent) -> Result<(), SinkError> {
        serde_json::to_writer(&mut *writer, event)?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

impl LogEventSink for FileSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn emit(&self, event: &LogEvent) -> Result<(), SinkError> {
        let mut guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let writer = guard
            .as_mut()
            .ok_or_else(|| SinkError::closed(&self.name))?;

        Self::write_line(writer, event).inspect_err(|e| {
            error!(sink = %self.name, path = %self.path.display(), error = %e, "Write failed");
        })
    }

    fn as_release(&self) -> Option<&dyn Release> {
        Some(self)
    }
}

impl Release for FileSink {
    #[instrument(name = "file_sink_release", skip(self), fields(sink = %self.name))]
    fn release(&self) -> Result<(), SinkError> {
        let taken = self
            .writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        let Some(mut writer) = taken else {
            debug!(sink = %self.name, "FileSink already closed");
            return Ok(());
        };

        writer
            .flush()
            .map_err(|e| SinkError::release(&self.name, e.to_string()))?;
        debug!(sink = %self.name, path = %self.path.display(), "FileSink closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::LogLevel;
    use tempfile::tempdir;

    #[test]
    fn test_file_sink_writes_json_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logs").join("events.jsonl");
        let sink = FileSink::new("file", &path).unwrap();

        sink.emit(&LogEvent::new(LogLevel::Debug, "Getting started"))
            .unwrap();
        sink.emit(&LogEvent::new(LogLevel::Information, "Hello").with_property("Name", "bob"))
            .unwrap();
        sink.release().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let second: LogEvent = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second.message, "Hello");
        assert_eq!(second.property("Name"), Some(&serde_json::json!("bob")));
    }

    #[test]
    fn test_file_sink_release_is_idempotent() {
        let dir = tempdir().unwrap();
        let sink = FileSink::new("file", dir.path().join("out.jsonl")).unwrap();

        assert!(sink.release().is_ok());
        assert!(sink.release().is_ok());
    }

    #[test]
    fn test_file_sink_emit_after_release_fails() {
        let dir = tempdir().unwrap();
        let sink = FileSink::new("file", dir.path().join("out.jsonl")).unwrap();
        sink.release().unwrap();

        let err = sink
            .emit(&LogEvent::new(LogLevel::Warning, "late"))
            .unwrap_err();
        assert!(matches!(err, SinkError::Closed { .. }));
    }
}
