//! `run` command implementation.

use std::sync::Arc;

use dispatcher::selflog::{self, StderrSelfLog, TracingSelfLog};
use dispatcher::{AggregateSink, LogEvent, LogLevel};
use serde_json::json;
use tracing::{debug, info, warn};

use crate::cli::{RunArgs, SelfLogTarget};
use crate::commands::setup::build_aggregate;
use crate::error::Result;

/// Execute the `run` command
///
/// Emits the demo events, reports an emit failure as an error event, and
/// always releases the sinks before returning.
pub fn run_demo(args: &RunArgs) -> Result<()> {
    install_self_log(args.self_log);

    let aggregate = build_aggregate(!args.no_console, args.output.as_deref())?;
    info!(sinks = ?aggregate.sink_names(), "Aggregate sink ready");

    if let Err(e) = emit_demo_events(&aggregate, args.user.as_deref()) {
        warn!(error = %e, "Demo emit failed");
        let event = LogEvent::new(LogLevel::Error, "Something went wrong").with_exception(&e);
        if let Err(report_err) = aggregate.emit(&event) {
            warn!(error = %report_err, "Failed to emit error event");
        }
    }

    aggregate.release();

    for (name, snapshot) in aggregate.metrics() {
        debug!(
            sink = %name,
            emitted = snapshot.emit_count,
            failed = snapshot.failure_count,
            released = snapshot.release_count,
            release_failed = snapshot.release_failure_count,
            "Sink summary"
        );
    }

    info!("logmux finished");
    Ok(())
}

fn install_self_log(target: SelfLogTarget) {
    match target {
        SelfLogTarget::Tracing => selflog::enable(Arc::new(TracingSelfLog)),
        SelfLogTarget::Stderr => selflog::enable(Arc::new(StderrSelfLog)),
        SelfLogTarget::Off => selflog::disable(),
    }
}

/// The demo event sequence; stops at the first failed emit
fn emit_demo_events(aggregate: &AggregateSink, user: Option<&str>) -> Result<()> {
    aggregate.emit(&LogEvent::new(LogLevel::Debug, "Getting started"))?;

    let name = user.unwrap_or("anonymous");
    let thread_id = format!("{:?}", std::thread::current().id());
    aggregate.emit(
        &LogEvent::new(
            LogLevel::Information,
            format!("Hello {name} from thread {thread_id}"),
        )
        .with_property("Name", name)
        .with_property("ThreadId", thread_id.as_str()),
    )?;

    let position = json!({ "Lat": 25, "Long": 134 });
    aggregate.emit(
        &LogEvent::new(
            LogLevel::Warning,
            format!("No coins remain at position {position}"),
        )
        .with_property("Position", position),
    )?;

    aggregate.emit(
        &LogEvent::new(LogLevel::Warning, "this is a security issue")
            .with_property("Category", "security")
            .with_property("app", "a1")
            .with_property("module", "m1"),
    )?;

    Ok(())
}
