//! Single-choice selection over a registry
//!
//! The interactive menu itself is a collaborator behind the [`Picker`]
//! trait; this module owns the contract around it: candidates come from a
//! registry snapshot, annotations are derived from that same snapshot, and
//! the chosen key resolves back to a codespace by direct lookup. No
//! process-wide state is involved — the annotation callback is a closure
//! capturing the registry it describes.

use crate::error::CodespaceError;
use crate::registry::Registry;
use crate::schema::Codespace;

/// Interactive single-choice collaborator
///
/// Given candidate display keys and an annotation callback, returns the
/// chosen key, or `None` when the user aborts the interaction. The picker
/// must only ever return a key from the given set; free-text answers are
/// its problem to prevent.
pub trait Picker {
    /// Present `keys` and return the chosen one, or `None` on abort
    fn pick(
        &self,
        keys: &[String],
        annotate: &dyn Fn(&str) -> String,
    ) -> Result<Option<String>, CodespaceError>;
}

/// Annotation shown beside a display key: `<state> | <repository> | <ref>`
pub fn annotation(codespace: &Codespace) -> String {
    format!(
        "{} | {} | {}",
        codespace.state,
        codespace.repository,
        codespace.git_ref.as_deref().unwrap_or_default()
    )
}

/// Resolve one codespace from `candidates` via the picker
///
/// # Errors
///
/// [`CodespaceError::NoSelection`] when `candidates` is empty (the picker
/// is never consulted) or when the user aborts the interaction.
///
/// # Panics
///
/// Panics if the picker returns a key outside the candidate set. That
/// violates the [`Picker`] contract and is a bug in the picker, not a
/// runtime condition to recover from.
pub fn select(candidates: &Registry, picker: &dyn Picker) -> Result<Codespace, CodespaceError> {
    if candidates.is_empty() {
        return Err(CodespaceError::NoSelection);
    }

    let annotate = |key: &str| candidates.get(key).map(annotation).unwrap_or_default();
    let Some(key) = picker.pick(candidates.keys(), &annotate)? else {
        return Err(CodespaceError::NoSelection);
    };

    match candidates.get(&key) {
        Some(codespace) => Ok(codespace.clone()),
        None => panic!("picker returned a key outside the candidate set: {key:?}"),
    }
}
