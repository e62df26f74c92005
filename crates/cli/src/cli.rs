//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// logmux - fan log events out to several sinks
#[derive(Parser, Debug)]
#[command(
    name = "logmux",
    author,
    version,
    about = "Aggregate log sink demo",
    long_about = "Builds an aggregate of a console sink and an optional JSON-lines file sink,\n\
                  emits a handful of structured events through it and releases every\n\
                  sink on shutdown. Sink faults are reported on the diagnostic channel."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "LOGMUX_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "LOGMUX_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    /// Prometheus metrics port (unset = disabled)
    #[arg(long, global = true, env = "LOGMUX_METRICS_PORT")]
    pub metrics_port: Option<u16>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Emit the demo events through the aggregate sink
    Run(RunArgs),

    /// Display the sink set `run` would use
    Info(InfoArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Also write events as JSON lines to this file
    #[arg(short, long, env = "LOGMUX_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Skip the console (tracing) sink
    #[arg(long)]
    pub no_console: bool,

    /// User name placed in the greeting event
    #[arg(long, env = "USERNAME")]
    pub user: Option<String>,

    /// Where sink faults are reported
    #[arg(long, value_enum, default_value = "tracing", env = "LOGMUX_SELF_LOG")]
    pub self_log: SelfLogTarget,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// File sink path to include
    #[arg(short, long, env = "LOGMUX_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Skip the console (tracing) sink
    #[arg(long)]
    pub no_console: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}

/// Diagnostic channel destination
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelfLogTarget {
    /// Route through tracing at WARN
    #[default]
    Tracing,
    /// Write to stderr
    Stderr,
    /// Disable reporting
    Off,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_args() {
        let cli = Cli::try_parse_from([
            "logmux",
            "-v",
            "run",
            "--output",
            "out/events.jsonl",
            "--self-log",
            "stderr",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.output, Some(PathBuf::from("out/events.jsonl")));
                assert_eq!(args.self_log, SelfLogTarget::Stderr);
                assert!(!args.no_console);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["logmux", "-q", "-v", "info"]).is_err());
    }
}
