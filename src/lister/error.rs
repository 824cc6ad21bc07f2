//! Reference listing error types

use thiserror::Error;

/// Errors that prevent a lister from producing the current reference list
#[derive(Debug, Error)]
pub enum ListError {
    #[error("Failed to run git: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("git for-each-ref exited with {status}: {stderr}")]
    CommandFailed { status: String, stderr: String },

    #[error("Malformed for-each-ref line: {line:?}")]
    Parse { line: String },

    #[error("Reference listing failed: {0}")]
    Other(String),
}
