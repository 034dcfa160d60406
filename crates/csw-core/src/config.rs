//! Configuration discovery and resolution
//!
//! Priority (highest to lowest):
//! 1. Command-line overrides
//! 2. Environment variables (`CSW_PATH`, `CSW_GH_BIN`)
//! 3. Repo-local config (`.csw.toml` in current dir or up to the git root)
//! 4. Global config (`~/.config/csw/config.toml`)
//! 5. Defaults
//!
//! A config file that fails to parse is warned about and skipped; it never
//! aborts an action.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Complete configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Connect configuration
    #[serde(default)]
    pub connect: ConnectConfig,
    /// `gh` invocation configuration
    #[serde(default)]
    pub gh: GhConfig,
}

/// Connect configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConnectConfig {
    /// Default path opened on a connected codespace
    ///
    /// Unset means `/workspaces/<repo-short-name>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// `gh` invocation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GhConfig {
    /// The `gh` binary to invoke
    #[serde(default = "default_gh_program")]
    pub program: String,
}

fn default_gh_program() -> String {
    "gh".to_string()
}

impl Default for GhConfig {
    fn default() -> Self {
        Self {
            program: default_gh_program(),
        }
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    /// Override the connect path
    pub path: Option<String>,
}

/// Resolve configuration from all sources
pub fn resolve_config(
    overrides: &ConfigOverrides,
    current_dir: &Path,
    home_dir: &Path,
) -> Result<Config, ConfigError> {
    let mut config = Config::default();

    // 4. Try global config
    let global_config_path = home_dir.join(".config/csw/config.toml");
    if global_config_path.exists() {
        if let Ok(file_config) = load_config_file(&global_config_path) {
            merge_config(&mut config, file_config);
        } else {
            warn!("Failed to parse global config at {global_config_path:?}");
        }
    }

    // 3. Try repo-local config (current dir or git root)
    if let Some(repo_config) = find_repo_local_config(current_dir) {
        if let Ok(file_config) = load_config_file(&repo_config) {
            merge_config(&mut config, file_config);
        } else {
            warn!("Failed to parse repo config at {repo_config:?}");
        }
    }

    // 2. Apply environment variables
    apply_env_overrides(&mut config);

    // 1. Apply command-line overrides
    apply_cli_overrides(&mut config, overrides);

    Ok(config)
}

/// Find repo-local config file
///
/// Searches current directory and parent directories up to the git root
fn find_repo_local_config(current_dir: &Path) -> Option<PathBuf> {
    let mut dir = current_dir;

    loop {
        let config_path = dir.join(".csw.toml");
        if config_path.exists() {
            return Some(config_path);
        }

        // Stop at git root
        if dir.join(".git").exists() {
            break;
        }

        dir = dir.parent()?;
    }

    None
}

/// Load config from a TOML file
fn load_config_file(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)?;
    Ok(config)
}

/// Merge file config into base config (file wins)
fn merge_config(base: &mut Config, file: Config) {
    if file.connect.path.is_some() {
        base.connect.path = file.connect.path;
    }
    base.gh.program = file.gh.program;
}

/// Apply environment variable overrides
fn apply_env_overrides(config: &mut Config) {
    if let Ok(path) = std::env::var("CSW_PATH") {
        if !path.is_empty() {
            config.connect.path = Some(path);
        }
    }

    if let Ok(program) = std::env::var("CSW_GH_BIN") {
        if !program.is_empty() {
            config.gh.program = program;
        }
    }
}

/// Apply command-line overrides
fn apply_cli_overrides(config: &mut Config, overrides: &ConfigOverrides) {
    if let Some(ref path) = overrides.path {
        config.connect.path = Some(path.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use std::fs;
    use tempfile::TempDir;

    fn clear_env() {
        unsafe {
            env::remove_var("CSW_PATH");
            env::remove_var("CSW_GH_BIN");
        }
    }

    #[test]
    #[serial]
    fn test_defaults_when_nothing_configured() {
        clear_env();
        let home = TempDir::new().unwrap();
        let cwd = TempDir::new().unwrap();

        let config = resolve_config(&ConfigOverrides::default(), cwd.path(), home.path()).unwrap();
        assert!(config.connect.path.is_none());
        assert_eq!(config.gh.program, "gh");
    }

    #[test]
    #[serial]
    fn test_global_config_is_read() {
        clear_env();
        let home = TempDir::new().unwrap();
        let cwd = TempDir::new().unwrap();

        let config_dir = home.path().join(".config/csw");
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(
            config_dir.join("config.toml"),
            "[connect]\npath = \"/workspaces/custom\"\n",
        )
        .unwrap();

        let config = resolve_config(&ConfigOverrides::default(), cwd.path(), home.path()).unwrap();
        assert_eq!(config.connect.path.as_deref(), Some("/workspaces/custom"));
    }

    #[test]
    #[serial]
    fn test_repo_local_config_overrides_global() {
        clear_env();
        let home = TempDir::new().unwrap();
        let cwd = TempDir::new().unwrap();

        let config_dir = home.path().join(".config/csw");
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(
            config_dir.join("config.toml"),
            "[connect]\npath = \"/workspaces/global\"\n",
        )
        .unwrap();
        fs::write(
            cwd.path().join(".csw.toml"),
            "[connect]\npath = \"/workspaces/local\"\n",
        )
        .unwrap();

        let config = resolve_config(&ConfigOverrides::default(), cwd.path(), home.path()).unwrap();
        assert_eq!(config.connect.path.as_deref(), Some("/workspaces/local"));
    }

    #[test]
    #[serial]
    fn test_repo_local_config_found_in_parent_dir() {
        clear_env();
        let home = TempDir::new().unwrap();
        let repo = TempDir::new().unwrap();

        fs::write(
            repo.path().join(".csw.toml"),
            "[gh]\nprogram = \"gh-enterprise\"\n",
        )
        .unwrap();
        let nested = repo.path().join("src/deeply/nested");
        fs::create_dir_all(&nested).unwrap();

        let config = resolve_config(&ConfigOverrides::default(), &nested, home.path()).unwrap();
        assert_eq!(config.gh.program, "gh-enterprise");
    }

    #[test]
    #[serial]
    fn test_env_overrides_files() {
        clear_env();
        let home = TempDir::new().unwrap();
        let cwd = TempDir::new().unwrap();

        fs::write(
            cwd.path().join(".csw.toml"),
            "[connect]\npath = \"/workspaces/local\"\n",
        )
        .unwrap();

        unsafe {
            env::set_var("CSW_PATH", "/workspaces/from-env");
            env::set_var("CSW_GH_BIN", "/opt/gh/bin/gh");
        }

        let config = resolve_config(&ConfigOverrides::default(), cwd.path(), home.path()).unwrap();
        assert_eq!(config.connect.path.as_deref(), Some("/workspaces/from-env"));
        assert_eq!(config.gh.program, "/opt/gh/bin/gh");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_cli_override_wins_over_everything() {
        clear_env();
        let home = TempDir::new().unwrap();
        let cwd = TempDir::new().unwrap();

        unsafe { env::set_var("CSW_PATH", "/workspaces/from-env") };

        let overrides = ConfigOverrides {
            path: Some("/workspaces/from-cli".to_string()),
        };
        let config = resolve_config(&overrides, cwd.path(), home.path()).unwrap();
        assert_eq!(config.connect.path.as_deref(), Some("/workspaces/from-cli"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_unparsable_config_is_skipped() {
        clear_env();
        let home = TempDir::new().unwrap();
        let cwd = TempDir::new().unwrap();

        fs::write(cwd.path().join(".csw.toml"), "not [valid toml").unwrap();

        let config = resolve_config(&ConfigOverrides::default(), cwd.path(), home.path()).unwrap();
        assert!(config.connect.path.is_none());
        assert_eq!(config.gh.program, "gh");
    }
}
