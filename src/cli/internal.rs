//! Hidden internal commands for git hooks.

use tracing::debug;

use crate::cli::hooks;
use crate::error::Error;
use crate::random::{OsRandom, SecureRandom};

const USAGE: &str = "git-review hook-invoke <hook-name> [args...]";

/// Run the handler for an installed hook (called by the dispatcher scripts).
///
/// `args[0]` names the hook; the rest are the arguments git passed to it.
pub fn hook_invoke(args: &[String]) -> Result<(), Error> {
    hook_invoke_with(args, &OsRandom)
}

/// [`hook_invoke`] with an explicit randomness source.
pub fn hook_invoke_with(args: &[String], random: &dyn SecureRandom) -> Result<(), Error> {
    let Some((name, rest)) = args.split_first() else {
        return Err(Error::Usage(USAGE));
    };

    match hooks::find_hook(name) {
        Some(spec) => (spec.handler)(rest, random),
        None => {
            // Hooks from newer or older versions are not an error.
            debug!(hook = %name, "No handler for hook");
            Ok(())
        }
    }
}
