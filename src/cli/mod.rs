//! CLI commands for git-review.

pub mod hooks;
pub mod internal;
pub mod legacy;

use std::path::Path;

use clap::{ArgAction, Parser, Subcommand};
use tracing::debug;

use crate::cli::hooks::InstallOptions;
use crate::config::Config;
use crate::error::Error;

/// git-review - Change-Id hooks for code review
#[derive(Parser)]
#[command(name = "git-review")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Print diagnostics (repeat for more detail)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Install git-review hooks in the current repository
    Hooks,

    /// Internal: run a hook handler (used by installed hook scripts)
    #[command(hide = true)]
    HookInvoke {
        /// Hook name followed by the arguments git passed to the hook
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

/// Run a parsed command.
///
/// Only `hooks` reads the config file; `hook-invoke` runs inside every
/// `git commit` and must not depend on it.
pub fn execute(command: Commands, verbose: u8, config_path: &Path) -> Result<(), Error> {
    match command {
        Commands::Hooks => {
            let config = Config::load_from(config_path)?;
            let options = InstallOptions {
                verbose,
                command: config.hooks.command,
            };
            let report = hooks::install_hook(&options)?;
            debug!(
                installed = ?report.installed,
                existing = ?report.existing,
                legacy_removed = ?report.legacy_removed,
                "Hook install finished"
            );
        }
        Commands::HookInvoke { args } => {
            internal::hook_invoke(&args)?;
        }
    }

    Ok(())
}
