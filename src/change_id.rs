//! `commit-msg` hook: add a Change-Id trailer to the commit message.
//!
//! Review servers use the Change-Id to tie successive amendments of one
//! logical change together. The trailer is only ever appended at the very end
//! of the message; nothing else in the message is parsed.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::Error;
use crate::random::SecureRandom;

/// Marker that means the message already carries a trailer.
const TRAILER_MARKER: &[u8] = b"\nChange-Id: ";

/// Number of random bytes in a Change-Id (160 bits).
pub const CHANGE_ID_BYTES: usize = 20;

const USAGE: &str = "git-review hook-invoke commit-msg message.txt";

/// Run the `commit-msg` hook. `args` holds the message file path only.
pub fn handle(args: &[String], random: &dyn SecureRandom) -> Result<(), Error> {
    let [file] = args else {
        return Err(Error::Usage(USAGE));
    };
    add_change_id_to_file(Path::new(file), random)?;
    Ok(())
}

/// Rewrite the message file at `path` with a Change-Id if it lacks one.
///
/// Returns whether the file was modified.
pub fn add_change_id_to_file(path: &Path, random: &dyn SecureRandom) -> Result<bool, Error> {
    let data = fs::read(path).map_err(|source| message_error(path, source))?;

    let Some(updated) = add_change_id(data, random)? else {
        debug!(path = %path.display(), "Commit message already has a Change-Id");
        return Ok(false);
    };

    // fs::write creates with 0666 (before umask) and keeps an existing mode.
    fs::write(path, &updated).map_err(|source| message_error(path, source))?;
    info!(path = %path.display(), "Added Change-Id to commit message");
    Ok(true)
}

/// Append a Change-Id trailer to `message`.
///
/// Returns `None` when the message already contains one, whatever its
/// position or value.
pub fn add_change_id(
    mut message: Vec<u8>,
    random: &dyn SecureRandom,
) -> Result<Option<Vec<u8>>, Error> {
    if contains(&message, TRAILER_MARKER) {
        return Ok(None);
    }

    let end = message
        .iter()
        .rposition(|&b| b != b'\n')
        .map_or(0, |i| i + 1);
    message.truncate(end);

    let id = new_change_id(random)?;
    message.extend_from_slice(format!("\n\nChange-Id: {id}\n").as_bytes());
    Ok(Some(message))
}

/// Generate a fresh `I`-prefixed Change-Id value.
pub fn new_change_id(random: &dyn SecureRandom) -> Result<String, Error> {
    let mut id = [0u8; CHANGE_ID_BYTES];
    random.fill(&mut id)?;
    Ok(format!("I{}", hex::encode(id)))
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

fn message_error(path: &Path, source: std::io::Error) -> Error {
    Error::MessageFile {
        path: PathBuf::from(path),
        source,
    }
}
