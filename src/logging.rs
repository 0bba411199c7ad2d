//! `tracing` subscriber setup for the binaries.
//!
//! The game owns stdout, so it only logs when given a file. The engine server
//! logs to stderr.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

use crate::config::DEFAULT_LOG_FILTER;

fn filter(directives: &str) -> EnvFilter {
    EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Append plain-text logs to `path`.
pub fn init_file(path: &Path, directives: &str) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter(directives))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow!("installing log subscriber: {err}"))
}

pub fn init_stderr(directives: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(filter(directives))
        .with_writer(io::stderr)
        .try_init()
        .map_err(|err| anyhow!("installing log subscriber: {err}"))
}
