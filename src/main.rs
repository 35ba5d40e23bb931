//! CLI entry point for topiclog.

use std::io::BufRead as _;

use anyhow::Result;
use clap::Parser;

use topiclog::Logger;

mod cli;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = cli::Cli::parse();
    let mut log = Logger::new();
    log.set_debug(args.debug);
    if let Some(file) = args.file {
        log.set_file(file);
    }
    if let Some(dir) = &args.dir {
        if let Err(error) = log.set_dir(dir.clone(), args.mode) {
            // Degraded mode: file-bound writes may be dropped.
            tracing::warn!("{error}");
        }
    }
    if args.stderr {
        log.use_files(false);
    }

    if args.messages.is_empty() {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            log.emit(&line?);
        }
    } else {
        for msg in &args.messages {
            log.emit(msg);
        }
    }

    log.close_all();
    Ok(())
}
