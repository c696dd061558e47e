//! Logging setup.
//!
//! The terminal belongs to the UI, so events go to a log file instead of
//! stdout/stderr. `RUST_LOG` takes precedence over the configured filter.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use crate::config::{LogSettings, default_log_path};

/// Install the global `tracing` subscriber. Returns the log file in use, if
/// one could be opened; otherwise events are discarded.
pub fn init(settings: &LogSettings) -> Option<PathBuf> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let path = settings.file.clone().or_else(default_log_path);
    let file = path.as_ref().and_then(|p| open_log_file(p).ok());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_line_number(true)
        .with_target(false)
        .with_file(true);

    let registry = tracing_subscriber::registry().with(env_filter);
    match file {
        Some(f) => {
            registry.with(fmt_layer.with_writer(Mutex::new(f))).init();
            path
        }
        None => {
            registry.with(fmt_layer.with_writer(io::sink)).init();
            None
        }
    }
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
