//! Chained secret derivation
//!
//! One password and a seed salt yield a sequence of dependent secrets: each
//! derived hash is delivered to its sink and becomes the salt of the next.

use crate::context::Context;
use crate::error::Result;
use crate::logging::fingerprint;
use zeroize::Zeroizing;

/// Receiver of a derived secret
pub trait SecretSink {
    /// Take ownership of derived secret bytes
    fn accept_secret(&mut self, secret: Vec<u8>);
}

impl SecretSink for Vec<u8> {
    fn accept_secret(&mut self, secret: Vec<u8>) {
        *self = secret;
    }
}

impl SecretSink for Zeroizing<Vec<u8>> {
    fn accept_secret(&mut self, secret: Vec<u8>) {
        *self = Zeroizing::new(secret);
    }
}

impl SecretSink for Context {
    fn accept_secret(&mut self, secret: Vec<u8>) {
        self.set_secret(secret);
    }
}

impl Context {
    /// Derive one secret per sink, each salted by the previous one
    ///
    /// Clearing flags are applied once after the whole chain, so every link
    /// hashes the original password and secret.
    ///
    /// # Errors
    ///
    /// Stops at the first failing hash and returns its error. Sinks filled
    /// before the failure keep their values.
    pub fn derive_chain(
        &mut self,
        password: &mut [u8],
        initial_salt: &[u8],
        sinks: &mut [&mut dyn SecretSink],
    ) -> Result<()> {
        let result = self.fill_chain(password, initial_salt, sinks);
        self.clear_after_use(password);
        result
    }

    fn fill_chain(
        &self,
        password: &[u8],
        initial_salt: &[u8],
        sinks: &mut [&mut dyn SecretSink],
    ) -> Result<()> {
        let total = sinks.len();
        log::trace!("Deriving {total} chain secrets from seed salt {}", fingerprint(initial_salt));
        let mut salt = Zeroizing::new(initial_salt.to_vec());
        for (index, sink) in sinks.iter_mut().enumerate() {
            let hash = self.hash_retaining(password, &salt)?;
            log::debug!("Derived chain secret {} of {total}", index + 1);
            salt = Zeroizing::new(hash.clone());
            sink.accept_secret(hash);
        }
        Ok(())
    }
}
