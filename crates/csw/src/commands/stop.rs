//! Stop command implementation

use anyhow::Result;
use clap::Args;

use codespace_switch_core::config::ConfigOverrides;
use codespace_switch_core::schema::Codespace;

/// Stop a running codespace
#[derive(Args, Debug)]
pub struct StopArgs {
    /// Codespace to stop (display name or name; omit to pick interactively)
    codespace: Option<String>,
}

/// Execute the stop command, blocking until the stop process exits
pub fn execute(args: StopArgs) -> Result<()> {
    let (_config, client) = super::setup(ConfigOverrides::default())?;

    let candidates = client.build_registry()?.filtered(Codespace::is_available);
    if candidates.is_empty() {
        println!("No running codespaces.");
        return Ok(());
    }

    let Some(codespace) = super::choose(&candidates, args.codespace.as_deref())? else {
        println!("No codespace selected.");
        return Ok(());
    };

    client.stop_blocking(&codespace.name)?;
    println!("Stopped '{}'.", codespace.display_key());

    Ok(())
}
