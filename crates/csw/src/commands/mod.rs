//! CLI command dispatch and execution

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use codespace_switch_core::CodespaceError;
use codespace_switch_core::config::{Config, ConfigOverrides, resolve_config};
use codespace_switch_core::gh::GhClient;
use codespace_switch_core::home::get_home_dir;
use codespace_switch_core::registry::Registry;
use codespace_switch_core::schema::Codespace;
use codespace_switch_core::select::select;

use crate::picker::TerminalPicker;

mod connect;
mod list;
mod start;
mod stop;

/// csw - pick a GitHub codespace and connect, start, or stop it
#[derive(Parser, Debug)]
#[command(
    name = "csw",
    version,
    about = "Pick a GitHub codespace and connect, start, or stop it",
    long_about = "A thin CLI over `gh codespace`: list your codespaces, pick one \
                  interactively (or by name), then open an ssh session on it, start it, \
                  or stop it"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open a remote session on a codespace (starting it first if needed)
    Connect(connect::ConnectArgs),

    /// Start a stopped codespace without waiting for readiness
    Start(start::StartArgs),

    /// Stop a running codespace
    Stop(stop::StopArgs),

    /// List codespaces
    List(list::ListArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Connect(args) => connect::execute(args),
            Commands::Start(args) => start::execute(args),
            Commands::Stop(args) => stop::execute(args),
            Commands::List(args) => list::execute(args),
        }
    }
}

/// Resolve configuration and the `gh` client for one command invocation
fn setup(overrides: ConfigOverrides) -> Result<(Config, GhClient)> {
    let home_dir = get_home_dir()?;
    let current_dir = std::env::current_dir().context("get current dir")?;
    let config = resolve_config(&overrides, &current_dir, &home_dir)?;
    debug!("resolved gh program: {}", config.gh.program);
    let client = GhClient::new(config.gh.program.clone());
    Ok((config, client))
}

/// Pick one codespace from `candidates`, honoring a direct-key bypass
///
/// With `key` given the picker is skipped entirely; an unknown key is an
/// error (the user named something that is not in the candidate set).
/// Returns `Ok(None)` when the user aborts the interactive menu.
fn choose(candidates: &Registry, key: Option<&str>) -> Result<Option<Codespace>> {
    if let Some(key) = key {
        return match candidates.get(key) {
            Some(codespace) => Ok(Some(codespace.clone())),
            None => anyhow::bail!("no matching codespace named '{key}'"),
        };
    }

    match select(candidates, &TerminalPicker::new()) {
        Ok(codespace) => Ok(Some(codespace)),
        Err(CodespaceError::NoSelection) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
