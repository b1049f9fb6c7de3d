//! Argon2 configuration context
//!
//! A [`Context`] carries every knob the primitive needs. Setters never
//! validate: bounds are checked by the primitive when the context is used,
//! so a bad value surfaces as a typed error instead of a silent clamp.

use crate::error::{Argon2Error, Result};
use crate::lock::{global_lock, PrimitiveLock};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::sync::Arc;
use zeroize::Zeroizing;

/// Legacy Argon2 revision (1.0)
pub const VERSION_10: u32 = 0x10;

/// Current Argon2 revision (1.3)
pub const VERSION_13: u32 = 0x13;

/// Revision used by new contexts
pub const DEFAULT_VERSION: u32 = VERSION_13;

/// Primitive default time cost
pub const DEFAULT_ITERATIONS: u32 = 3;

/// Primitive default output length in bytes
pub const DEFAULT_OUTPUT_LENGTH: usize = 32;

/// Argon2 variant selecting the primitive's mixing strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Data-dependent addressing
    #[serde(rename = "argon2d")]
    Argon2d,
    /// Data-independent addressing
    #[serde(rename = "argon2i")]
    Argon2i,
    /// Hybrid addressing
    #[default]
    #[serde(rename = "argon2id")]
    Argon2id,
}

impl Mode {
    /// Canonical lowercase token used in encoded hashes
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Argon2d => "argon2d",
            Self::Argon2i => "argon2i",
            Self::Argon2id => "argon2id",
        }
    }

    /// Parse a canonical token, `None` when unrecognized
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "argon2d" => Some(Self::Argon2d),
            "argon2i" => Some(Self::Argon2i),
            "argon2id" => Some(Self::Argon2id),
            _ => None,
        }
    }

    /// Numeric type identifier of the variant
    #[must_use]
    pub fn code(self) -> u32 {
        match self {
            Self::Argon2d => 0,
            Self::Argon2i => 1,
            Self::Argon2id => 2,
        }
    }
}

impl TryFrom<u32> for Mode {
    type Error = Argon2Error;

    fn try_from(code: u32) -> Result<Self> {
        match code {
            0 => Ok(Self::Argon2d),
            1 => Ok(Self::Argon2i),
            2 => Ok(Self::Argon2id),
            _ => Err(Argon2Error::IncorrectType),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Buffer clearing flags applied after each primitive invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Flags(u32);

impl Flags {
    /// Clear nothing
    pub const DEFAULT: Self = Self(0);
    /// Zero-fill the caller's password buffer after use
    pub const CLEAR_PASSWORD: Self = Self(1);
    /// Zero-fill the context's secret after use
    pub const CLEAR_SECRET: Self = Self(1 << 1);

    /// Raw bit representation
    #[must_use]
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Build from raw bits, unknown bits are dropped
    #[must_use]
    pub fn from_bits_truncate(bits: u32) -> Self {
        Self(bits & (Self::CLEAR_PASSWORD.0 | Self::CLEAR_SECRET.0))
    }

    /// Whether every bit of `other` is set
    #[must_use]
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Set or unset the bits of `other`
    pub fn set(&mut self, other: Self, enabled: bool) {
        if enabled {
            self.0 |= other.0;
        } else {
            self.0 &= !other.0;
        }
    }
}

impl BitOr for Flags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Flags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Baseline cost profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Sub-second login hashing: 64 MiB, 2 lanes, primitive default passes
    #[default]
    Interactive,
    /// Multi-second master secret derivation: 256 MiB, 2 lanes, 20 passes
    Vault,
}

impl Profile {
    /// Memory cost in KiB
    #[must_use]
    pub fn memory(self) -> u32 {
        match self {
            Self::Interactive => 1 << 16,
            Self::Vault => 1 << 18,
        }
    }

    /// Number of lanes
    #[must_use]
    pub fn parallelism(self) -> u32 {
        2
    }

    /// Number of passes
    #[must_use]
    pub fn iterations(self) -> u32 {
        match self {
            Self::Interactive => DEFAULT_ITERATIONS,
            Self::Vault => 20,
        }
    }
}

/// Mutable configuration for one hash or verify operation
///
/// Every context shares the process-wide [`GlobalLock`](crate::lock::GlobalLock)
/// unless another lock is installed with [`Context::set_lock`].
#[derive(Clone)]
pub struct Context {
    pub(crate) mode: Mode,
    pub(crate) version: u32,
    pub(crate) iterations: u32,
    pub(crate) memory: u32,
    pub(crate) parallelism: u32,
    pub(crate) output_length: usize,
    pub(crate) secret: Option<Zeroizing<Vec<u8>>>,
    pub(crate) associated_data: Option<Vec<u8>>,
    pub(crate) flags: Flags,
    pub(crate) lock: Arc<dyn PrimitiveLock>,
}

impl Context {
    /// Interactive profile, hybrid mode unless overridden
    #[must_use]
    pub fn new(mode: Option<Mode>) -> Self {
        Self::with_profile(Profile::Interactive, mode)
    }

    /// Vault profile, hybrid mode unless overridden
    #[must_use]
    pub fn vault(mode: Option<Mode>) -> Self {
        Self::with_profile(Profile::Vault, mode)
    }

    /// Context seeded from a baseline profile
    #[must_use]
    pub fn with_profile(profile: Profile, mode: Option<Mode>) -> Self {
        Self {
            mode: mode.unwrap_or_default(),
            version: DEFAULT_VERSION,
            iterations: profile.iterations(),
            memory: profile.memory(),
            parallelism: profile.parallelism(),
            output_length: DEFAULT_OUTPUT_LENGTH,
            secret: None,
            associated_data: None,
            flags: Flags::DEFAULT,
            lock: global_lock(),
        }
    }

    /// Set the variant
    pub fn set_mode(&mut self, mode: Mode) -> &mut Self {
        self.mode = mode;
        self
    }

    /// Variant
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Set the revision (0x10 or 0x13)
    pub fn set_version(&mut self, version: u32) -> &mut Self {
        self.version = version;
        self
    }

    /// Revision
    #[must_use]
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Set the time cost
    pub fn set_iterations(&mut self, iterations: u32) -> &mut Self {
        self.iterations = iterations;
        self
    }

    /// Time cost
    #[must_use]
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Set the memory cost in KiB
    pub fn set_memory(&mut self, memory: u32) -> &mut Self {
        self.memory = memory;
        self
    }

    /// Memory cost in KiB
    #[must_use]
    pub fn memory(&self) -> u32 {
        self.memory
    }

    /// Set the number of lanes
    pub fn set_parallelism(&mut self, parallelism: u32) -> &mut Self {
        self.parallelism = parallelism;
        self
    }

    /// Number of lanes
    #[must_use]
    pub fn parallelism(&self) -> u32 {
        self.parallelism
    }

    /// Set the output length in bytes
    pub fn set_output_length(&mut self, output_length: usize) -> &mut Self {
        self.output_length = output_length;
        self
    }

    /// Output length in bytes
    #[must_use]
    pub fn output_length(&self) -> usize {
        self.output_length
    }

    /// Set keying material folded into every hash; empty means none
    pub fn set_secret(&mut self, secret: impl Into<Vec<u8>>) -> &mut Self {
        let secret = secret.into();
        self.secret = (!secret.is_empty()).then(|| Zeroizing::new(secret));
        self
    }

    /// Keying material, if any
    #[must_use]
    pub fn secret(&self) -> Option<&[u8]> {
        self.secret.as_deref().map(Vec::as_slice)
    }

    /// Set public context bytes bound into every hash; empty means none
    ///
    /// At most 32 bytes are accepted when hashing. Longer data fails with
    /// [`Argon2Error::AdTooLong`], so hashes produced elsewhere with longer
    /// associated data cannot be verified by this crate.
    pub fn set_associated_data(&mut self, associated_data: impl Into<Vec<u8>>) -> &mut Self {
        let associated_data = associated_data.into();
        self.associated_data = (!associated_data.is_empty()).then_some(associated_data);
        self
    }

    /// Associated data, if any
    #[must_use]
    pub fn associated_data(&self) -> Option<&[u8]> {
        self.associated_data.as_deref()
    }

    /// Set the clearing flags
    pub fn set_flags(&mut self, flags: Flags) -> &mut Self {
        self.flags = flags;
        self
    }

    /// Clearing flags
    #[must_use]
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Replace the lock serializing primitive calls
    pub fn set_lock(&mut self, lock: Arc<dyn PrimitiveLock>) -> &mut Self {
        self.lock = lock;
        self
    }

    /// Lock serializing primitive calls
    #[must_use]
    pub fn lock(&self) -> &Arc<dyn PrimitiveLock> {
        &self.lock
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new(None)
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("mode", &self.mode)
            .field("version", &self.version)
            .field("iterations", &self.iterations)
            .field("memory", &self.memory)
            .field("parallelism", &self.parallelism)
            .field("output_length", &self.output_length)
            .field("secret_len", &self.secret().map(<[u8]>::len))
            .field("associated_data_len", &self.associated_data.as_ref().map(Vec::len))
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}
