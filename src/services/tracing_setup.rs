//! Log output for the binary
//!
//! The terminal is owned by the editor, so logs always go to a file.

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is unset or invalid
pub const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber, truncating `log_file`
///
/// A subscriber that is already installed is left in place.
pub fn init_global(log_file: &Path) -> io::Result<()> {
    let file = File::create(log_file)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

/// Like [`init_global`], but a log file that cannot be created only disables logging
///
/// Returns whether logging is active.
pub fn init_or_skip(log_file: &Path) -> bool {
    match init_global(log_file) {
        Ok(()) => true,
        Err(e) => {
            eprintln!("notavi: logging disabled, cannot open {}: {}", log_file.display(), e);
            false
        }
    }
}
