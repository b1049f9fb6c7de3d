//! Hash and verify operations on a [`Context`]
//!
//! Every primitive call runs under the context's [`PrimitiveLock`](crate::lock::PrimitiveLock).
//! The guard is dropped on every exit path, including primitive failure.
//!
//! Clearing flags mutate caller memory: with [`Flags::CLEAR_PASSWORD`] the
//! password buffer is zero-filled after the call, with [`Flags::CLEAR_SECRET`]
//! the context's secret is. Both happen whether the call succeeded or not.

use crate::context::{Context, Flags};
use crate::encoding::encode;
use crate::error::Result;
use crate::logging::fingerprint;
use crate::primitive;
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

impl Context {
    /// Hash `password` with `salt`
    ///
    /// # Errors
    ///
    /// Returns the primitive's error when a parameter is out of bounds or
    /// the computation fails.
    pub fn hash(&mut self, password: &mut [u8], salt: &[u8]) -> Result<Vec<u8>> {
        log::trace!("Hashing with salt {}", fingerprint(salt));
        let result = self.hash_retaining(password, salt);
        self.clear_after_use(password);
        result
    }

    /// Hash `password` with `salt` and render the encoded string
    ///
    /// # Errors
    ///
    /// Returns the error of [`Context::hash`] unchanged.
    pub fn hash_encoded(&mut self, password: &mut [u8], salt: &[u8]) -> Result<String> {
        let hash = self.hash(password, salt)?;
        Ok(encode(self, salt, &hash))
    }

    /// Check `password` and `salt` against a raw `hash`
    ///
    /// The comparison runs in constant time with an output length equal to
    /// `hash.len()`. A mismatch is `Ok(false)`, never an error.
    ///
    /// # Errors
    ///
    /// Returns the primitive's error when the recomputation itself fails;
    /// the boolean is then meaningless.
    pub fn verify(&mut self, hash: &[u8], password: &mut [u8], salt: &[u8]) -> Result<bool> {
        log::trace!("Verifying with salt {}", fingerprint(salt));
        let result = self.compute_locked(password, salt, hash.len());
        self.clear_after_use(password);
        let computed = result?;
        Ok(computed.ct_eq(hash).into())
    }

    /// Decode `encoded` into this context, then verify `password` against it
    ///
    /// This is a decode-and-adopt operation: the context's mode, version and
    /// costs are replaced by the encoded ones. Use a fresh context per
    /// verification.
    ///
    /// # Errors
    ///
    /// Returns decoding errors as-is without verifying, otherwise the
    /// errors of [`Context::verify`].
    pub fn verify_encoded(&mut self, encoded: &str, password: &mut [u8]) -> Result<bool> {
        let (hash, salt) = self.set_from_encoded(encoded)?;
        self.verify(&hash, password, &salt)
    }

    /// Hash without applying the clearing flags
    pub(crate) fn hash_retaining(&self, password: &[u8], salt: &[u8]) -> Result<Vec<u8>> {
        self.compute_locked(password, salt, self.output_length)
    }

    // Salts are not logged here: chain links are salted with derived secrets
    fn compute_locked(&self, password: &[u8], salt: &[u8], output_length: usize) -> Result<Vec<u8>> {
        log::trace!(
            "Invoking {} v={:#x} m={} t={} p={}",
            self.mode,
            self.version,
            self.memory,
            self.iterations,
            self.parallelism
        );
        let _guard = self.lock.acquire();
        primitive::compute(self, password, salt, output_length)
    }

    /// Zero-fill the buffers selected by the flags
    pub(crate) fn clear_after_use(&mut self, password: &mut [u8]) {
        if self.flags.contains(Flags::CLEAR_PASSWORD) {
            password.zeroize();
        }
        if self.flags.contains(Flags::CLEAR_SECRET) {
            if let Some(secret) = self.secret.as_mut() {
                secret.as_mut_slice().zeroize();
            }
        }
    }
}
