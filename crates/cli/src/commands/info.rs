//! `info` command implementation.

use serde_json::json;

use crate::cli::InfoArgs;
use crate::commands::setup::build_aggregate;
use crate::error::Result;

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    let aggregate = build_aggregate(!args.no_console, args.output.as_deref())?;

    if args.json {
        let sinks: Vec<_> = aggregate
            .handles()
            .iter()
            .map(|h| {
                json!({
                    "index": h.index(),
                    "name": h.name(),
                    "releasable": h.is_releasable(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&json!({ "sinks": sinks }))?);
    } else {
        println!("\n=== Aggregate Sink ===\n");
        println!("Sinks ({}):", aggregate.len());
        for handle in aggregate.handles() {
            let release = if handle.is_releasable() {
                "release"
            } else {
                "no release"
            };
            println!("  {}. {} ({})", handle.index(), handle.name(), release);
        }
        println!();
    }

    aggregate.release();
    Ok(())
}
