//! # Integration Tests
//!
//! Cross-crate tests for the aggregate sink.
//!
//! Covers:
//! - Failure isolation and aggregation across real and mock sinks
//! - Release capability probing on shutdown
//! - Routing of diagnostics through the process-wide channel

#[cfg(test)]
mod support {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::{Arc, Mutex};

    use contracts::{LogEvent, LogEventSink, Release, SinkError};

    /// Records every event it accepts; can be told to fail emit or release
    #[derive(Default)]
    pub struct RecordingSink {
        pub name: String,
        pub received: Arc<Mutex<Vec<String>>>,
        pub releases: Arc<AtomicU64>,
        pub fail_emit: bool,
        pub releasable: bool,
        pub fail_release: bool,
    }

    impl RecordingSink {
        pub fn new(name: &str) -> Self {
            Self {
                name: name.to_string(),
                ..Default::default()
            }
        }

        pub fn failing(name: &str) -> Self {
            Self {
                fail_emit: true,
                ..Self::new(name)
            }
        }

        pub fn releasable(name: &str, fail_release: bool) -> Self {
            Self {
                releasable: true,
                fail_release,
                ..Self::new(name)
            }
        }
    }

    impl LogEventSink for RecordingSink {
        fn name(&self) -> &str {
            &self.name
        }

        fn emit(&self, event: &LogEvent) -> Result<(), SinkError> {
            if self.fail_emit {
                return Err(SinkError::write(&self.name, "refused"));
            }
            self.received
                .lock()
                .unwrap()
                .push(event.message.clone());
            Ok(())
        }

        fn as_release(&self) -> Option<&dyn Release> {
            self.releasable.then_some(self as &dyn Release)
        }
    }

    impl Release for RecordingSink {
        fn release(&self) -> Result<(), SinkError> {
            self.releases.fetch_add(1, Ordering::Relaxed);
            if self.fail_release {
                return Err(SinkError::release(&self.name, "already closed"));
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod aggregate_tests {
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    use contracts::{LogEvent, LogEventSink, LogLevel, SinkError};
    use dispatcher::{AggregateSink, CaptureSelfLog, DispatcherError};

    use crate::support::RecordingSink;

    fn event(message: &str) -> LogEvent {
        LogEvent::new(LogLevel::Information, message)
    }

    #[test]
    fn test_two_of_four_sinks_fail() {
        let sinks = [
            RecordingSink::new("s0"),
            RecordingSink::failing("s1"),
            RecordingSink::new("s2"),
            RecordingSink::failing("s3"),
        ];
        let received: Vec<_> = sinks.iter().map(|s| Arc::clone(&s.received)).collect();
        let capture = Arc::new(CaptureSelfLog::new());
        let aggregate = AggregateSink::new(
            sinks
                .into_iter()
                .map(|s| Box::new(s) as Box<dyn LogEventSink>),
            capture.clone(),
        );

        let err = aggregate.emit(&event("fan out")).unwrap_err();

        let failures = err.failures();
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].index, 1);
        assert_eq!(failures[1].index, 3);
        assert!(matches!(
            failures[0].error,
            SinkError::Write { ref sink_name, .. } if sink_name == "s1"
        ));
        assert!(matches!(
            failures[1].error,
            SinkError::Write { ref sink_name, .. } if sink_name == "s3"
        ));

        assert_eq!(*received[0].lock().unwrap(), vec!["fan out"]);
        assert_eq!(*received[2].lock().unwrap(), vec!["fan out"]);

        let lines = capture.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.contains("emitting")));
    }

    #[test]
    fn test_release_on_mixed_capabilities() {
        let first = RecordingSink::releasable("r0", false);
        let plain = RecordingSink::new("plain");
        let last = RecordingSink::releasable("r2", true);
        let releases = [
            Arc::clone(&first.releases),
            Arc::clone(&plain.releases),
            Arc::clone(&last.releases),
        ];
        let capture = Arc::new(CaptureSelfLog::new());
        let aggregate = AggregateSink::new(
            vec![
                Box::new(first) as Box<dyn LogEventSink>,
                Box::new(plain),
                Box::new(last),
            ],
            capture.clone(),
        );

        aggregate.release();

        let counts: Vec<u64> = releases.iter().map(|r| r.load(Ordering::Relaxed)).collect();
        assert_eq!(counts, vec![1, 0, 1]);
        let lines = capture.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("disposing"));
        assert!(lines[0].contains("r2"));
    }

    #[test]
    fn test_missing_source_is_invalid_argument() {
        let err = AggregateSink::builder()
            .self_log(Arc::new(CaptureSelfLog::new()))
            .build()
            .unwrap_err();

        assert!(matches!(err, DispatcherError::InvalidArgument { .. }));
    }

    #[test]
    fn test_double_release_reports_second_fault() {
        let sink = RecordingSink::releasable("once", true);
        let releases = Arc::clone(&sink.releases);
        let capture = Arc::new(CaptureSelfLog::new());
        let aggregate = AggregateSink::new(
            vec![Box::new(sink) as Box<dyn LogEventSink>],
            capture.clone(),
        );

        aggregate.release();
        aggregate.release();

        assert_eq!(releases.load(Ordering::Relaxed), 2);
        assert_eq!(capture.len(), 2);
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::fs;
    use std::sync::Arc;

    use contracts::{LogEvent, LogEventSink, LogLevel};
    use dispatcher::{AggregateSink, CaptureSelfLog, FileSink, LogSink};
    use tempfile::tempdir;

    use crate::support::RecordingSink;

    /// File sink keeps receiving events while a neighbour keeps failing;
    /// release flushes the file
    #[test]
    fn test_file_sink_survives_failing_neighbour() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.jsonl");
        let capture = Arc::new(CaptureSelfLog::new());

        let aggregate = AggregateSink::builder()
            .sink(LogSink::new("console"))
            .sink(RecordingSink::failing("broken"))
            .sink(FileSink::new("file", &path).unwrap())
            .self_log(capture.clone())
            .build()
            .unwrap();

        for i in 0..3 {
            let event = LogEvent::new(LogLevel::Warning, format!("event {i}"))
                .with_property("Seq", i);
            let err = aggregate.emit(&event).unwrap_err();
            assert_eq!(err.failures().len(), 1);
        }
        aggregate.release();

        let content = fs::read_to_string(&path).unwrap();
        let messages: Vec<String> = content
            .lines()
            .map(|l| serde_json::from_str::<LogEvent>(l).unwrap().message)
            .collect();
        assert_eq!(messages, vec!["event 0", "event 1", "event 2"]);
        assert_eq!(capture.len(), 3);

        let metrics = aggregate.metrics();
        assert_eq!(metrics[1].0, "broken");
        assert_eq!(metrics[1].1.failure_count, 3);
        assert_eq!(metrics[2].1.emit_count, 3);
        assert_eq!(metrics[2].1.release_count, 1);
    }

    /// An aggregate nested inside another is released through the capability probe
    #[test]
    fn test_nested_aggregate_release() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested.jsonl");
        let capture = Arc::new(CaptureSelfLog::new());

        let inner = AggregateSink::builder()
            .name("inner")
            .sink(FileSink::new("file", &path).unwrap())
            .self_log(capture.clone())
            .build()
            .unwrap();
        let outer = AggregateSink::new(
            vec![Box::new(inner) as Box<dyn LogEventSink>],
            capture.clone(),
        );

        outer.emit(&LogEvent::new(LogLevel::Debug, "nested")).unwrap();
        outer.release();

        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 1);
        assert!(capture.is_empty());
    }
}

#[cfg(test)]
mod selflog_tests {
    use std::sync::Arc;

    use contracts::{LogEvent, LogLevel};
    use dispatcher::{selflog, AggregateSink, CaptureSelfLog};

    use crate::support::RecordingSink;

    /// Without an explicit channel, reports go to the process-wide one
    #[test]
    fn test_builder_defaults_to_global_channel() {
        let capture = Arc::new(CaptureSelfLog::new());
        selflog::enable(capture.clone());

        let aggregate = AggregateSink::builder()
            .sink(RecordingSink::failing("global-target"))
            .build()
            .unwrap();
        let _ = aggregate.emit(&LogEvent::new(LogLevel::Error, "x"));

        selflog::disable();

        let expected = "caught exception while emitting to sink global-target: \
                        sink 'global-target' write error: refused";
        assert!(capture.lines().iter().any(|l| l == expected));
    }
}
