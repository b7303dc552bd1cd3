//! Source of cryptographically secure random bytes.

use crate::error::Error;

/// Fills buffers with secure random bytes.
///
/// Production code uses [`OsRandom`]; tests substitute a deterministic source.
pub trait SecureRandom {
    fn fill(&self, buf: &mut [u8]) -> Result<(), Error>;
}

/// The operating system's CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl SecureRandom for OsRandom {
    fn fill(&self, buf: &mut [u8]) -> Result<(), Error> {
        getrandom::fill(buf).map_err(|e| Error::Random(e.to_string()))
    }
}
