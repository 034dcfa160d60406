//! Home directory resolution
//!
//! Single source of truth for where `~/.config/csw/` lives. The `CSW_HOME`
//! environment variable takes precedence over platform detection so tests
//! and sandboxed deployments can redirect every lookup.

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Get the home directory for csw operations
///
/// # Precedence
///
/// 1. `CSW_HOME` environment variable (if set and non-empty)
/// 2. `dirs::home_dir()` platform default
///
/// # Errors
///
/// Returns an error only when `CSW_HOME` is unset and the platform home
/// directory cannot be determined.
pub fn get_home_dir() -> Result<PathBuf> {
    if let Ok(home) = std::env::var("CSW_HOME") {
        let trimmed = home.trim();
        if !trimmed.is_empty() {
            return Ok(PathBuf::from(trimmed));
        }
    }

    dirs::home_dir().context("Could not determine home directory")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    #[test]
    #[serial]
    fn test_csw_home_set() {
        let original = env::var("CSW_HOME").ok();
        unsafe { env::set_var("CSW_HOME", "/custom/home") };

        let home = get_home_dir().unwrap();
        assert_eq!(home, PathBuf::from("/custom/home"));

        unsafe {
            match original {
                Some(v) => env::set_var("CSW_HOME", v),
                None => env::remove_var("CSW_HOME"),
            }
        }
    }

    #[test]
    #[serial]
    fn test_csw_home_not_set_uses_platform_default() {
        let original = env::var("CSW_HOME").ok();
        unsafe { env::remove_var("CSW_HOME") };

        let home = get_home_dir().unwrap();
        assert_eq!(home, dirs::home_dir().unwrap());

        unsafe {
            if let Some(v) = original {
                env::set_var("CSW_HOME", v);
            }
        }
    }

    #[test]
    #[serial]
    fn test_csw_home_empty_string_uses_platform_default() {
        let original = env::var("CSW_HOME").ok();
        unsafe { env::set_var("CSW_HOME", "") };

        let home = get_home_dir().unwrap();
        assert_eq!(home, dirs::home_dir().unwrap());

        unsafe {
            match original {
                Some(v) => env::set_var("CSW_HOME", v),
                None => env::remove_var("CSW_HOME"),
            }
        }
    }
}
