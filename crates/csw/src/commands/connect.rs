//! Connect command implementation

use anyhow::Result;
use clap::Args;

use codespace_switch_core::config::{Config, ConfigOverrides};
use codespace_switch_core::schema::Codespace;
use codespace_switch_core::transport::Transport;

/// Open a remote session on a codespace
#[derive(Args, Debug)]
pub struct ConnectArgs {
    /// Codespace to connect to (display name or name; omit to pick interactively)
    codespace: Option<String>,

    /// Remote path to open (default: /workspaces/<repo>)
    #[arg(long)]
    path: Option<String>,
}

/// Execute the connect command
pub fn execute(args: ConnectArgs) -> Result<()> {
    let (config, client) = super::setup(ConfigOverrides {
        path: args.path.clone(),
    })?;

    let candidates = client.build_registry()?;
    if candidates.is_empty() {
        println!("No codespaces found.");
        return Ok(());
    }

    let Some(codespace) = super::choose(&candidates, args.codespace.as_deref())? else {
        println!("No codespace selected.");
        return Ok(());
    };

    // The state is a fetch-time snapshot; a cold codespace gets one
    // blocking start so the ssh attempt below does not race it.
    if !codespace.is_available() {
        println!(
            "Codespace '{}' is {}; starting it (this can take a while)...",
            codespace.display_key(),
            codespace.state
        );
        client.start_blocking(&codespace.name)?;
    }

    let path = resolved_path(&config, &codespace);
    println!("Connecting to '{}' at {path}...", codespace.display_key());
    client.open(&codespace.name, &path)?;

    Ok(())
}

/// Configured path override, else `/workspaces/<repo-short-name>`
fn resolved_path(config: &Config, codespace: &Codespace) -> String {
    match &config.connect.path {
        Some(path) => path.clone(),
        None => format!("/workspaces/{}", codespace.repo_short_name()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codespace_switch_core::schema::RawCodespace;

    fn widgets_codespace() -> Codespace {
        let raw: RawCodespace = serde_json::from_str(
            r#"{"name": "fox-123", "repository": "acme/widgets", "state": "Available"}"#,
        )
        .unwrap();
        Codespace::from_raw(raw).unwrap()
    }

    #[test]
    fn test_resolved_path_defaults_to_workspaces_short_repo() {
        let config = Config::default();
        assert_eq!(
            resolved_path(&config, &widgets_codespace()),
            "/workspaces/widgets"
        );
    }

    #[test]
    fn test_resolved_path_honors_override() {
        let mut config = Config::default();
        config.connect.path = Some("/workspaces/elsewhere".to_string());
        assert_eq!(
            resolved_path(&config, &widgets_codespace()),
            "/workspaces/elsewhere"
        );
    }
}
