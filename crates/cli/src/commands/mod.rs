//! Command implementations.

mod info;
mod run;
mod setup;

pub use info::run_info;
pub use run::run_demo;
