//! csw - pick a GitHub codespace and connect, start, or stop it
//!
//! A thin CLI over `gh codespace`: fetch the codespace listing, pick one
//! from an interactive menu (or by name), then open an ssh session on it,
//! start it, or stop it.

use clap::Parser;

mod commands;
mod picker;

use commands::Cli;

fn main() {
    codespace_switch_core::logging::init();

    let cli = Cli::parse();

    if let Err(e) = cli.execute() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
