//! git-review hook core.
//!
//! Installs a `commit-msg` dispatcher into `.git/hooks/` and, when git runs
//! it, adds a `Change-Id:` trailer to the commit message.

pub mod change_id;
pub mod cli;
pub mod config;
pub mod error;
pub mod random;
pub mod repo;

pub use cli::hooks::{install_hook, InstallOptions, InstallReport};
pub use cli::internal::hook_invoke;
pub use error::Error;
