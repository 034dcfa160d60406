//! List command implementation

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;

use codespace_switch_core::config::ConfigOverrides;
use codespace_switch_core::schema::Codespace;

/// List codespaces
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Emit JSON
    #[arg(long)]
    json: bool,
}

/// Execute the list command
pub fn execute(args: ListArgs) -> Result<()> {
    let (_config, client) = super::setup(ConfigOverrides::default())?;
    let registry = client.build_registry()?;

    if args.json {
        let entries: Vec<&Codespace> = registry.iter().collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&entries).context("serialize codespaces")?
        );
        return Ok(());
    }

    if registry.is_empty() {
        println!("No codespaces found.");
        return Ok(());
    }

    let key_width = registry
        .keys()
        .iter()
        .map(|key| key.len())
        .max()
        .unwrap_or(0);

    let now = Utc::now();
    for codespace in registry.iter() {
        println!(
            "{:key_width$}  {:9}  {:30}  {:12}  {}",
            codespace.display_key(),
            codespace.state.as_str(),
            codespace.repository,
            codespace.git_ref.as_deref().unwrap_or("-"),
            format_last_used(codespace.last_used_at.as_deref(), now),
        );
    }

    Ok(())
}

/// Render a last-used timestamp relative to `now` ("2d ago", "5m ago")
///
/// A missing timestamp renders as "-"; an unparsable one is shown verbatim.
fn format_last_used(raw: Option<&str>, now: DateTime<Utc>) -> String {
    let Some(raw) = raw else {
        return "-".to_string();
    };
    let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) else {
        return raw.to_string();
    };

    let minutes = (now - timestamp.with_timezone(&Utc)).num_minutes();
    if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("{minutes}m ago")
    } else if minutes < 60 * 24 {
        format!("{}h ago", minutes / 60)
    } else {
        format!("{}d ago", minutes / (60 * 24))
    }
}
