//! Typed errors reported at the configuration boundary.
//!
//! Only configuration can fail loudly here. The emit path never surfaces
//! errors: open, lock, and write failures degrade to skipped destinations
//! so that logging is never the reason a host process fails.

use std::path::PathBuf;

use thiserror::Error;

/// The log directory could not be created.
///
/// Returned by [`Logger::set_dir`](crate::Logger::set_dir). The directory
/// configuration is still applied when this is returned; file-bound writes
/// then degrade to best-effort skips until the path becomes usable.
#[derive(Error, Debug)]
#[error("failed to create log directory {}: {source}", .path.display())]
pub struct CreateDirError {
    /// Directory that could not be created.
    pub path: PathBuf,
    /// Underlying I/O error.
    #[source]
    pub source: std::io::Error,
}
