//! Error types for jail operations

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for jail operations
pub type Result<T> = std::result::Result<T, JailError>;

/// Errors that can occur while building or enforcing a jail.
///
/// Every failure is surfaced immediately to the caller; there is no retry
/// and no partial success. A jail that cannot be fully enforced must not
/// run the target program at all.
#[derive(Error, Debug)]
pub enum JailError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Landlock is not available on this kernel (requires Linux 5.13+): {0}")]
    NotAvailable(io::Error),

    #[error("failed to create Landlock ruleset: {0}")]
    Ruleset(io::Error),

    #[error("failed to inspect path descriptor: {0}")]
    Inspect(io::Error),

    #[error("failed to add Landlock rule: {0}")]
    Rule(io::Error),

    #[error("failed to disable privilege escalation: {0}")]
    NoNewPrivs(io::Error),

    #[error("failed to enforce Landlock ruleset: {0}")]
    Enforce(io::Error),

    #[error("cannot open {}: {}", .path.display(), .source)]
    Open { path: PathBuf, source: io::Error },

    #[error("cannot execute {program}: {source}")]
    Exec { program: String, source: io::Error },
}
