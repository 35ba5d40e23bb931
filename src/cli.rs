//! Command-line interface for the `topiclog` driver.

use std::path::PathBuf;

use clap::Parser;

/// Route prefixed log lines to per-topic files, a single file, or
/// standard error.
#[derive(Parser, Debug)]
#[command(
    name = "topiclog",
    about = "Prefix-routed file logging with multi-process append safety",
    version = option_env!("TOPICLOG_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
)]
pub struct Cli {
    /// Directory receiving global.log and per-topic <topic>.log files
    #[arg(short = 'D', long)]
    pub dir: Option<PathBuf>,

    /// Octal permission mode for newly created directory segments (default 755)
    #[arg(long, value_parser = parse_octal_mode)]
    pub mode: Option<u32>,

    /// Single file receiving every line regardless of topic
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Keep output on standard error even when --dir or --file is given
    #[arg(short, long)]
    pub stderr: bool,

    /// Emit debug-only messages too
    #[arg(long)]
    pub debug: bool,

    /// Messages to emit; standard input is routed line by line when omitted
    pub messages: Vec<String>,
}

/// Parse a `chmod`-style octal mode such as `750`.
fn parse_octal_mode(s: &str) -> Result<u32, String> {
    u32::from_str_radix(s, 8).map_err(|e| format!("invalid octal mode '{s}': {e}"))
}
