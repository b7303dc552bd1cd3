//! Repository root discovery.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Error;

/// Name of the metadata entry that marks a git work tree.
const GIT_DIR: &str = ".git";

/// Find the root of the git tree containing the current directory.
pub fn repo_root() -> Result<PathBuf, Error> {
    let cwd = std::env::current_dir().map_err(Error::CurrentDir)?;
    find_root(&cwd)
}

/// Walk upward from `start` to the first directory holding a `.git` entry.
///
/// `Path::parent` returns `None` once the filesystem root (including any
/// drive or UNC prefix) has been checked, which ends the search.
pub fn find_root(start: &Path) -> Result<PathBuf, Error> {
    let mut dir = start;
    loop {
        if dir.join(GIT_DIR).exists() {
            debug!(root = %dir.display(), "Found git root");
            return Ok(dir.to_path_buf());
        }
        match dir.parent() {
            Some(parent) => dir = parent,
            None => return Err(Error::RootNotFound),
        }
    }
}
