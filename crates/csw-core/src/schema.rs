//! Schema for codespace records returned by `gh codespace list`
//!
//! Raw records preserve unknown fields for forward compatibility and are
//! normalized into [`Codespace`] values before anything else looks at
//! them. Free-text lifecycle states collapse into [`CodespaceState`];
//! values we do not recognize are carried along rather than rejected.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::CodespaceError;

/// One raw record from `gh codespace list --json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCodespace {
    /// Machine identifier assigned by GitHub
    pub name: String,

    /// Human label; may be empty
    pub display_name: String,

    /// Repository in `owner/repo` form
    pub repository: String,

    /// Free-text lifecycle state (e.g. "Available", "Shutdown", "Starting")
    pub state: String,

    /// Git status block; only the ref is of interest here
    pub git_status: Option<GitStatus>,

    /// Last-use timestamp (RFC 3339)
    pub last_used_at: Option<String>,

    /// Unknown fields for forward compatibility
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

/// Nested `gitStatus` object of a raw record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GitStatus {
    /// Git ref the codespace was created from
    #[serde(rename = "ref")]
    pub git_ref: Option<String>,

    /// Unknown fields for forward compatibility
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

/// Lifecycle state of a codespace
///
/// Derived from the free-text status string by case-insensitive match.
/// Anything other than "available" or "shutdown" is preserved verbatim
/// (lowercased) in [`CodespaceState::Other`] — states such as "starting"
/// or "provisioning" are data, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodespaceState {
    /// Running and reachable
    Available,
    /// Stopped
    Shutdown,
    /// Any other reported state, lowercased
    Other(String),
}

impl CodespaceState {
    /// Normalize a raw state string
    pub fn parse(raw: &str) -> Self {
        let lowered = raw.to_lowercase();
        match lowered.as_str() {
            "available" => Self::Available,
            "shutdown" => Self::Shutdown,
            _ => Self::Other(lowered),
        }
    }

    /// True only for [`CodespaceState::Available`]
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }

    /// True only for [`CodespaceState::Shutdown`]
    pub fn is_shutdown(&self) -> bool {
        matches!(self, Self::Shutdown)
    }

    /// The normalized state string
    pub fn as_str(&self) -> &str {
        match self {
            Self::Available => "available",
            Self::Shutdown => "shutdown",
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for CodespaceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CodespaceState {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A normalized codespace record
///
/// Identity is `name`; every other field is a snapshot valid only at fetch
/// time. The state observed here can go stale between fetch and action,
/// which is expected and handled by the actions themselves.
#[derive(Debug, Clone, Serialize)]
pub struct Codespace {
    /// Stable machine identifier assigned by GitHub
    pub name: String,

    /// Human label; may be empty
    pub display_name: String,

    /// Lifecycle state at fetch time
    pub state: CodespaceState,

    /// Repository in `owner/repo` form
    pub repository: String,

    /// Git ref the codespace was created from, when reported
    pub git_ref: Option<String>,

    /// Last-use timestamp as reported by `gh` (RFC 3339)
    pub last_used_at: Option<String>,
}

impl Codespace {
    /// Normalize one raw record
    ///
    /// # Errors
    ///
    /// Returns [`CodespaceError::MalformedRecord`] when `name` or
    /// `repository` is absent or empty. Every other field degrades to a
    /// default instead: an absent `displayName` becomes the empty string
    /// and an absent `gitStatus.ref` becomes `None`.
    pub fn from_raw(raw: RawCodespace) -> Result<Self, CodespaceError> {
        if raw.name.is_empty() {
            return Err(CodespaceError::MalformedRecord { field: "name" });
        }
        if raw.repository.is_empty() {
            return Err(CodespaceError::MalformedRecord { field: "repository" });
        }

        Ok(Self {
            state: CodespaceState::parse(&raw.state),
            git_ref: raw
                .git_status
                .and_then(|status| status.git_ref)
                .filter(|r| !r.is_empty()),
            name: raw.name,
            display_name: raw.display_name,
            repository: raw.repository,
            last_used_at: raw.last_used_at,
        })
    }

    /// The label shown to and chosen by the user
    ///
    /// `display_name` when non-empty, else `name`.
    pub fn display_key(&self) -> &str {
        if self.display_name.is_empty() {
            &self.name
        } else {
            &self.display_name
        }
    }

    /// Repository name with the `owner/` prefix removed
    pub fn repo_short_name(&self) -> &str {
        self.repository
            .split_once('/')
            .map_or(self.repository.as_str(), |(_, repo)| repo)
    }

    /// True when the codespace is running and reachable
    pub fn is_available(&self) -> bool {
        self.state.is_available()
    }

    /// True when the codespace is stopped
    pub fn is_shutdown(&self) -> bool {
        self.state.is_shutdown()
    }
}
