//! Sink metrics for observability

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for a single sink handle
#[derive(Debug, Default)]
pub struct SinkMetrics {
    /// Total successful emits
    emit_count: AtomicU64,
    /// Total emit failures
    failure_count: AtomicU64,
    /// Total successful releases
    release_count: AtomicU64,
    /// Total release failures
    release_failure_count: AtomicU64,
}

impl SinkMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Get total emit count
    pub fn emit_count(&self) -> u64 {
        self.emit_count.load(Ordering::Relaxed)
    }

    /// Increment emit count
    pub fn inc_emit_count(&self) {
        self.emit_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get failure count
    pub fn failure_count(&self) -> u64 {
        self.failure_count.load(Ordering::Relaxed)
    }

    /// Increment failure count
    pub fn inc_failure_count(&self) {
        self.failure_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get release count
    pub fn release_count(&self) -> u64 {
        self.release_count.load(Ordering::Relaxed)
    }

    /// Increment release count
    pub fn inc_release_count(&self) {
        self.release_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get release failure count
    pub fn release_failure_count(&self) -> u64 {
        self.release_failure_count.load(Ordering::Relaxed)
    }

    /// Increment release failure count
    pub fn inc_release_failure_count(&self) {
        self.release_failure_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot of all metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            emit_count: self.emit_count(),
            failure_count: self.failure_count(),
            release_count: self.release_count(),
            release_failure_count: self.release_failure_count(),
        }
    }
}

/// Snapshot of sink metrics (for reporting)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub emit_count: u64,
    pub failure_count: u64,
    pub release_count: u64,
    pub release_failure_count: u64,
}
