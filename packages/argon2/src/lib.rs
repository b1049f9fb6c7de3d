//! Argon2 password hashing with a mutable configuration context
//!
//! A [`Context`] holds the variant, revision, cost parameters, optional
//! secret and associated data, and clearing flags. It hashes and verifies
//! passwords, renders and adopts the `$argon2…$v=…$m=…,t=…,p=…$salt$hash`
//! encoding, and derives chains of dependent secrets.
//!
//! ```no_run
//! use cryypt_argon2::{Context, Mode, random_salt};
//!
//! # fn main() -> cryypt_argon2::Result<()> {
//! let mut ctx = Context::new(Some(Mode::Argon2id));
//! let salt = random_salt()?;
//! let encoded = ctx.hash_encoded(&mut b"correct horse".to_vec(), &salt)?;
//!
//! let mut verifier = Context::default();
//! assert!(verifier.verify_encoded(&encoded, &mut b"correct horse".to_vec())?);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod async_result;
pub mod chain;
pub mod config;
pub mod context;
pub mod encoding;
pub mod error;
pub mod lock;
pub mod logging;
mod primitive;
mod protocol;
pub mod salt;

pub use async_result::{AsyncArgon2Result, AsyncArgon2ResultWithHandler};
pub use chain::SecretSink;
pub use config::ContextConfig;
pub use context::{
    Context, Flags, Mode, Profile, DEFAULT_ITERATIONS, DEFAULT_OUTPUT_LENGTH, DEFAULT_VERSION,
    VERSION_10, VERSION_13,
};
pub use encoding::{encode, EncodedHash};
pub use error::{Argon2Error, Result};
pub use lock::{global_lock, GlobalLock, LockGuard, NoopLock, PrimitiveLock};
pub use salt::{random_salt, random_salt_from, OsRandom, RandomSource, SALT_LENGTH};
