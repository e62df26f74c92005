//! Dispatch metrics
//!
//! Thin wrappers over the `metrics` facade. Without an installed recorder
//! every call is a no-op.

use metrics::{counter, histogram};

/// Record one aggregate emit pass
pub fn record_event_emitted(sink_count: usize) {
    counter!("logmux_events_emitted_total").increment(1);
    histogram!("logmux_event_fanout").record(sink_count as f64);
}

/// Record the outcome of emitting to one sink
pub fn record_sink_emit(sink_name: &str, success: bool) {
    counter!(
        "logmux_sink_emits_total",
        "sink" => sink_name.to_string(),
        "status" => status(success)
    )
    .increment(1);
}

/// Record the outcome of releasing one sink
pub fn record_sink_release(sink_name: &str, success: bool) {
    counter!(
        "logmux_sink_releases_total",
        "sink" => sink_name.to_string(),
        "status" => status(success)
    )
    .increment(1);
}

/// Record an emit pass that ended in an aggregated failure
pub fn record_aggregate_failure(failed_sinks: usize) {
    counter!("logmux_aggregate_failures_total").increment(1);
    histogram!("logmux_aggregate_failed_sinks").record(failed_sinks as f64);
}

fn status(success: bool) -> &'static str {
    if success {
        "success"
    } else {
        "failure"
    }
}
