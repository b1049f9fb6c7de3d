//! Logging setup and log-safe rendering of sensitive bytes
//!
//! The crate logs through the `log` facade. Configure levels with `RUST_LOG`,
//! e.g. `RUST_LOG=cryypt_argon2=trace`.

use log::info;
use sha2::{Digest, Sha256};
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Initialize `env_logger` once per process
pub fn init() {
    INIT_LOGGER.call_once(|| {
        let initialized = env_logger::Builder::from_default_env()
            .format_timestamp_micros()
            .try_init()
            .is_ok();
        if initialized {
            info!("Structured logging initialized");
        }
    });
}

/// Initialize logging for tests; safe to call repeatedly
pub fn init_test() {
    let _ = env_logger::Builder::from_default_env()
        .is_test(true)
        .try_init();
}

/// Short SHA-256 fingerprint of `bytes` for log lines
///
/// Returns `#` followed by the first 12 hex characters of the digest.
#[must_use]
pub fn fingerprint(bytes: &[u8]) -> String {
    let digest = hex::encode(Sha256::digest(bytes));
    format!("#{}", &digest[..12])
}
