//! Random salt generation
//!
//! Randomness is a capability: [`OsRandom`] draws from the operating system,
//! other [`RandomSource`] implementations can be injected.

use crate::error::Result;

/// Salt length produced by [`random_salt`]
pub const SALT_LENGTH: usize = 16;

/// Source of cryptographically secure random bytes
pub trait RandomSource {
    /// Fill `dest` with random bytes
    ///
    /// # Errors
    ///
    /// Returns an error when no randomness is available.
    fn fill(&mut self, dest: &mut [u8]) -> Result<()>;
}

/// Operating system randomness via `getrandom`
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill(&mut self, dest: &mut [u8]) -> Result<()> {
        getrandom::fill(dest)?;
        Ok(())
    }
}

/// Fresh 16-byte salt from the operating system
///
/// # Errors
///
/// Returns [`Argon2Error::Random`](crate::Argon2Error::Random) when the OS
/// source fails.
pub fn random_salt() -> Result<Vec<u8>> {
    random_salt_from(&mut OsRandom)
}

/// Fresh 16-byte salt from `source`
///
/// # Errors
///
/// Propagates the source's error.
pub fn random_salt_from<R: RandomSource + ?Sized>(source: &mut R) -> Result<Vec<u8>> {
    let mut salt = vec![0u8; SALT_LENGTH];
    source.fill(&mut salt)?;
    Ok(salt)
}
