//! Error types for git-review.

use std::path::PathBuf;

use thiserror::Error;

/// Crate error type.
///
/// Every variant is fatal to the operation that produced it. Conditions that
/// are only worth a diagnostic (an unexpected hook body, a legacy hook that
/// could not be removed) never become an `Error`.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("could not get current directory: {0}")]
    CurrentDir(#[source] std::io::Error),

    #[error("git root not found. Rerun from within the Git tree.")]
    RootNotFound,

    #[error("checking hook: {0}")]
    CheckHook(#[source] std::io::Error),

    #[error("writing hook: {0}")]
    WriteHook(#[source] std::io::Error),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("generating Change-Id: {0}")]
    Random(String),

    #[error("{}: {source}", .path.display())]
    MessageFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
