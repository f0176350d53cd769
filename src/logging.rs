//! tracing subscriber setup
//!
//! Logs always go to a file: the TUI owns the terminal, and in probe mode
//! stdout and stderr carry the result and nothing else.
//! `CROWDFUND_LOG` takes an `EnvFilter` directive, default `info`.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

fn filter() -> EnvFilter {
    EnvFilter::try_from_env("CROWDFUND_LOG").unwrap_or_else(|_| EnvFilter::new("info"))
}

pub fn init_file(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!("logger already installed: {err}"))
}
