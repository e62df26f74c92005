//! # Contracts
//!
//! Frozen interface contracts shared by the dispatcher and every sink.
//! All other crates depend on this crate, reverse dependencies are prohibited.
//!
//! ## Capability Model
//! - [`LogEventSink`] is mandatory: a sink accepts one [`LogEvent`] at a time
//! - [`Release`] is optional, probed via [`LogEventSink::as_release`]

mod error;
mod event;
mod sink;

pub use error::*;
pub use event::*;
pub use sink::*;
