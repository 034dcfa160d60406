//! Start command implementation

use anyhow::Result;
use clap::Args;

use codespace_switch_core::config::ConfigOverrides;
use codespace_switch_core::schema::Codespace;

/// Start a stopped codespace
#[derive(Args, Debug)]
pub struct StartArgs {
    /// Codespace to start (display name or name; omit to pick interactively)
    codespace: Option<String>,
}

/// Execute the start command
///
/// The start process is launched and left behind; this command returns as
/// soon as the launch succeeded, not when the codespace becomes available.
pub fn execute(args: StartArgs) -> Result<()> {
    let (_config, client) = super::setup(ConfigOverrides::default())?;

    let candidates = client.build_registry()?.filtered(Codespace::is_shutdown);
    if candidates.is_empty() {
        println!("No stopped codespaces.");
        return Ok(());
    }

    let Some(codespace) = super::choose(&candidates, args.codespace.as_deref())? else {
        println!("No codespace selected.");
        return Ok(());
    };

    client.start_detached(&codespace.name)?;
    println!(
        "Start requested for '{}'. Readiness can take a few minutes; run `csw connect` when it is up.",
        codespace.display_key()
    );

    Ok(())
}
