//! Error types for registry construction, selection, and actions

use thiserror::Error;

/// Errors surfaced to the user by the codespace core
///
/// All of these are reported as a visible message; none should abort the
/// process without one.
#[derive(Debug, Error)]
pub enum CodespaceError {
    /// The `gh` listing process could not be run or exited non-zero
    #[error("codespace listing unavailable: {0}")]
    SourceUnavailable(String),

    /// Listing output was not a well-formed JSON array of records
    #[error("unexpected codespace listing output: {0}")]
    InvalidResponse(String),

    /// One listed record is missing a required field
    ///
    /// This aborts the whole registry build: a partial listing could lead
    /// the user to select a codespace that does not exist as presented.
    #[error("malformed codespace record: missing '{field}'")]
    MalformedRecord { field: &'static str },

    /// The picker had no candidates to offer, or the user aborted it
    #[error("no codespace selected")]
    NoSelection,

    /// The remote session could not be opened
    #[error("failed to connect to codespace '{name}': {reason}")]
    ConnectFailed { name: String, reason: String },

    /// The stop process exited non-zero
    #[error("failed to stop codespace '{name}': {reason}")]
    StopFailed { name: String, reason: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
