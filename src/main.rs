//! git-review - Change-Id hooks for code review.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use git_review::cli::{self, Cli};
use git_review::config::Config;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // A bad config file is reported by `hooks`; here it only costs the log level.
    let config = Config::load().unwrap_or_default();

    // Hooks run under git, so diagnostics go to stderr.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_directive(cli.verbose)));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli::execute(cli.command, cli.verbose, &Config::path()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("git-review: {e}");
            ExitCode::FAILURE
        }
    }
}
