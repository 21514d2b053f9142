//! Tracing setup.
//!
//! The chat interface owns the terminal (raw mode + alternate screen), so
//! diagnostics cannot go to stdout or stderr. They are written to the file
//! named by `--debug-log`; without the flag, tracing stays uninitialized and
//! all diagnostics are dropped.

use std::error::Error;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

pub fn init_tracing(debug_log: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let Some(path) = debug_log else {
        return Ok(());
    };
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("minbar=info")),
        )
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| format!("failed to initialize tracing: {e}"))?;
    Ok(())
}
