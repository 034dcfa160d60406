//! Remote session transport seam

use crate::error::CodespaceError;

/// Opens an interactive remote session on a codespace
///
/// Session establishment is a black box to the core: given a codespace
/// name and a path to land in, the session either runs to completion or
/// the attempt failed. [`crate::gh::GhClient`] implements this over
/// `gh codespace ssh`.
pub trait Transport {
    /// Open a session on `name` rooted at `path`, blocking until it ends
    ///
    /// # Errors
    ///
    /// [`CodespaceError::ConnectFailed`] when the session could not be
    /// established or ended abnormally.
    fn open(&self, name: &str, path: &str) -> Result<(), CodespaceError>;
}
