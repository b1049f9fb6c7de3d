//! Plain configuration record for contexts
//!
//! [`ContextConfig`] is a serializable snapshot of every context field. It
//! lets callers assemble parameters elsewhere (a settings file, a test
//! vector table) and attach them with [`Context::adopt`].

use crate::context::{Context, Flags, Mode, Profile, DEFAULT_OUTPUT_LENGTH, DEFAULT_VERSION};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Serializable context parameters
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Variant
    #[serde(default)]
    pub mode: Mode,
    /// Revision
    #[serde(default = "default_version")]
    pub version: u32,
    /// Time cost
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    /// Memory cost in KiB
    #[serde(default = "default_memory")]
    pub memory: u32,
    /// Number of lanes
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
    /// Output length in bytes
    #[serde(default = "default_output_length")]
    pub output_length: usize,
    /// Keying material, hex encoded; empty means none
    #[serde(default, with = "hex::serde")]
    pub secret: Vec<u8>,
    /// Associated data, hex encoded; empty means none
    #[serde(default, with = "hex::serde")]
    pub associated_data: Vec<u8>,
    /// Zero-fill the password after use
    #[serde(default)]
    pub clear_password: bool,
    /// Zero-fill the secret after use
    #[serde(default)]
    pub clear_secret: bool,
}

fn default_version() -> u32 {
    DEFAULT_VERSION
}

fn default_iterations() -> u32 {
    Profile::Interactive.iterations()
}

fn default_memory() -> u32 {
    Profile::Interactive.memory()
}

fn default_parallelism() -> u32 {
    Profile::Interactive.parallelism()
}

fn default_output_length() -> usize {
    DEFAULT_OUTPUT_LENGTH
}

impl ContextConfig {
    /// Record matching a baseline profile
    #[must_use]
    pub fn from_profile(profile: Profile, mode: Mode) -> Self {
        Self {
            mode,
            version: DEFAULT_VERSION,
            iterations: profile.iterations(),
            memory: profile.memory(),
            parallelism: profile.parallelism(),
            output_length: DEFAULT_OUTPUT_LENGTH,
            secret: Vec::new(),
            associated_data: Vec::new(),
            clear_password: false,
            clear_secret: false,
        }
    }

    /// Interactive profile, hybrid mode
    #[must_use]
    pub fn interactive() -> Self {
        Self::from_profile(Profile::Interactive, Mode::default())
    }

    /// Vault profile, hybrid mode
    #[must_use]
    pub fn vault() -> Self {
        Self::from_profile(Profile::Vault, Mode::default())
    }

    /// Parse a JSON record; missing fields take interactive defaults
    ///
    /// # Errors
    ///
    /// Returns [`Argon2Error::Config`](crate::Argon2Error::Config) for
    /// malformed JSON, unknown modes or bad hex.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render as JSON
    ///
    /// # Errors
    ///
    /// Returns [`Argon2Error::Config`](crate::Argon2Error::Config) if
    /// serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Clearing flags described by the record
    #[must_use]
    pub fn flags(&self) -> Flags {
        let mut flags = Flags::DEFAULT;
        flags.set(Flags::CLEAR_PASSWORD, self.clear_password);
        flags.set(Flags::CLEAR_SECRET, self.clear_secret);
        flags
    }
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self::interactive()
    }
}

impl Context {
    /// Copy every field of `config` onto this context; the lock is kept
    pub fn adopt(&mut self, config: &ContextConfig) -> &mut Self {
        self.set_mode(config.mode)
            .set_version(config.version)
            .set_iterations(config.iterations)
            .set_memory(config.memory)
            .set_parallelism(config.parallelism)
            .set_output_length(config.output_length)
            .set_secret(config.secret.clone())
            .set_associated_data(config.associated_data.clone())
            .set_flags(config.flags())
    }

    /// Context built from a record
    #[must_use]
    pub fn from_config(config: &ContextConfig) -> Self {
        let mut ctx = Self::default();
        ctx.adopt(config);
        ctx
    }

    /// Snapshot of this context as a record
    #[must_use]
    pub fn to_config(&self) -> ContextConfig {
        ContextConfig {
            mode: self.mode,
            version: self.version,
            iterations: self.iterations,
            memory: self.memory,
            parallelism: self.parallelism,
            output_length: self.output_length,
            secret: self.secret().map(<[u8]>::to_vec).unwrap_or_default(),
            associated_data: self.associated_data.clone().unwrap_or_default(),
            clear_password: self.flags.contains(Flags::CLEAR_PASSWORD),
            clear_secret: self.flags.contains(Flags::CLEAR_SECRET),
        }
    }
}
