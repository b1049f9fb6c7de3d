//! Error taxonomy for Argon2 operations
//!
//! Primitive failures keep the numeric codes of the reference Argon2
//! implementation so they stay comparable across process boundaries.
//! Encoded-format failures are local and carry no code.

use thiserror::Error;

/// Argon2-specific errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Argon2Error {
    /// Output buffer is missing
    #[error("output pointer is null")]
    OutputPtrNull,

    /// Requested output is shorter than the primitive allows
    #[error("output is too short")]
    OutputTooShort,

    /// Requested output is longer than the primitive allows
    #[error("output is too long")]
    OutputTooLong,

    /// Password is shorter than the primitive allows
    #[error("password is too short")]
    PwdTooShort,

    /// Password is longer than the primitive allows
    #[error("password is too long")]
    PwdTooLong,

    /// Salt is shorter than the primitive allows
    #[error("salt is too short")]
    SaltTooShort,

    /// Salt is longer than the primitive allows
    #[error("salt is too long")]
    SaltTooLong,

    /// Associated data is shorter than the primitive allows
    #[error("associated data is too short")]
    AdTooShort,

    /// Associated data is longer than the primitive allows
    #[error("associated data is too long")]
    AdTooLong,

    /// Secret is shorter than the primitive allows
    #[error("secret is too short")]
    SecretTooShort,

    /// Secret is longer than the primitive allows
    #[error("secret is too long")]
    SecretTooLong,

    /// Iterations below the primitive minimum
    #[error("time cost is too small")]
    TimeTooSmall,

    /// Iterations above the primitive maximum
    #[error("time cost is too large")]
    TimeTooLarge,

    /// Memory below the primitive minimum
    #[error("memory cost is too small")]
    MemoryTooLittle,

    /// Memory above the primitive maximum
    #[error("memory cost is too large")]
    MemoryTooMuch,

    /// Parallelism below the primitive minimum
    #[error("too few lanes")]
    LanesTooFew,

    /// Parallelism above the primitive maximum
    #[error("too many lanes")]
    LanesTooMany,

    /// Password buffer missing while a length was given
    #[error("password pointer is null, but password length is not 0")]
    PwdPtrMismatch,

    /// Salt buffer missing while a length was given
    #[error("salt pointer is null, but salt length is not 0")]
    SaltPtrMismatch,

    /// Secret buffer missing while a length was given
    #[error("secret pointer is null, but secret length is not 0")]
    SecretPtrMismatch,

    /// Associated data buffer missing while a length was given
    #[error("associated data pointer is null, but ad length is not 0")]
    AdPtrMismatch,

    /// Memory allocation failed
    #[error("memory allocation error")]
    MemoryAllocationError,

    /// Free-memory callback missing
    #[error("the free memory callback is null")]
    FreeMemoryCbkNull,

    /// Allocate-memory callback missing
    #[error("the allocate memory callback is null")]
    AllocateMemoryCbkNull,

    /// A parameter is structurally invalid (e.g. unsupported version)
    #[error("incorrect parameter")]
    IncorrectParameter,

    /// Unrecognized Argon2 variant
    #[error("incorrect type")]
    IncorrectType,

    /// Output buffer mismatch
    #[error("output pointer mismatch")]
    OutPtrMismatch,

    /// Not enough threads
    #[error("not enough threads")]
    ThreadsTooFew,

    /// Too many threads
    #[error("too many threads")]
    ThreadsTooMany,

    /// Required arguments missing
    #[error("missing arguments")]
    MissingArgs,

    /// Primitive-side encoding failed
    #[error("encoding failed")]
    EncodingFail,

    /// Primitive-side decoding failed
    #[error("decoding failed")]
    DecodingFail,

    /// Worker thread failed
    #[error("threading failure")]
    ThreadFail,

    /// Encoded parameters are too long or too short
    #[error("some of encoded parameters are too long or too short")]
    DecodingLengthFail,

    /// Password does not match the supplied hash
    #[error("the password does not match the supplied hash")]
    VerifyMismatch,

    /// Encoded hash is malformed
    #[error("cannot parse encoded hash")]
    EncodedFormat,

    /// Encoded hash does not split into six `$` parts
    #[error("cannot parse encoded hash: not 6 parts")]
    EncodedNotSixParts,

    /// Encoded hash names an unknown variant
    #[error("cannot parse encoded hash: unknown type")]
    EncodedUnknownType,

    /// Encoded hash has no `v=<int>` segment
    #[error("cannot parse encoded hash: no version")]
    EncodedNoVersion,

    /// Cost segment does not split into three comma parts
    #[error("cannot parse encoded hash: not 3 subparts")]
    EncodedNotThreeSubparts,

    /// Cost segment has no `m=<int>`
    #[error("cannot parse encoded hash: no memory")]
    EncodedNoMemory,

    /// Cost segment has no `t=<int>`
    #[error("cannot parse encoded hash: no time")]
    EncodedNoTime,

    /// Cost segment has no `p=<int>`
    #[error("cannot parse encoded hash: no parallelism")]
    EncodedNoParallelism,

    /// Salt or hash segment is not unpadded base64
    #[error("cannot parse encoded hash: base64 decoding failed: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Random byte source failed
    #[error("random byte generation failed: {0}")]
    Random(getrandom::Error),

    /// Configuration record could not be parsed
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

/// Every primitive variant paired with its reference-implementation code.
static PRIMITIVE_CODES: [(i32, Argon2Error); 35] = [
    (-1, Argon2Error::OutputPtrNull),
    (-2, Argon2Error::OutputTooShort),
    (-3, Argon2Error::OutputTooLong),
    (-4, Argon2Error::PwdTooShort),
    (-5, Argon2Error::PwdTooLong),
    (-6, Argon2Error::SaltTooShort),
    (-7, Argon2Error::SaltTooLong),
    (-8, Argon2Error::AdTooShort),
    (-9, Argon2Error::AdTooLong),
    (-10, Argon2Error::SecretTooShort),
    (-11, Argon2Error::SecretTooLong),
    (-12, Argon2Error::TimeTooSmall),
    (-13, Argon2Error::TimeTooLarge),
    (-14, Argon2Error::MemoryTooLittle),
    (-15, Argon2Error::MemoryTooMuch),
    (-16, Argon2Error::LanesTooFew),
    (-17, Argon2Error::LanesTooMany),
    (-18, Argon2Error::PwdPtrMismatch),
    (-19, Argon2Error::SaltPtrMismatch),
    (-20, Argon2Error::SecretPtrMismatch),
    (-21, Argon2Error::AdPtrMismatch),
    (-22, Argon2Error::MemoryAllocationError),
    (-23, Argon2Error::FreeMemoryCbkNull),
    (-24, Argon2Error::AllocateMemoryCbkNull),
    (-25, Argon2Error::IncorrectParameter),
    (-26, Argon2Error::IncorrectType),
    (-27, Argon2Error::OutPtrMismatch),
    (-28, Argon2Error::ThreadsTooFew),
    (-29, Argon2Error::ThreadsTooMany),
    (-30, Argon2Error::MissingArgs),
    (-31, Argon2Error::EncodingFail),
    (-32, Argon2Error::DecodingFail),
    (-33, Argon2Error::ThreadFail),
    (-34, Argon2Error::DecodingLengthFail),
    (-35, Argon2Error::VerifyMismatch),
];

impl Argon2Error {
    /// Numeric code of a primitive failure, `None` for local errors
    #[must_use]
    pub fn code(&self) -> Option<i32> {
        PRIMITIVE_CODES
            .iter()
            .find(|(_, err)| err == self)
            .map(|(code, _)| *code)
    }

    /// Translate a primitive failure code into its error value
    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        PRIMITIVE_CODES
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, err)| err.clone())
    }

    /// Parameter-bounds failure reported by the primitive
    #[must_use]
    pub fn is_parameter_error(&self) -> bool {
        matches!(
            self,
            Self::OutputTooShort
                | Self::OutputTooLong
                | Self::PwdTooShort
                | Self::PwdTooLong
                | Self::SaltTooShort
                | Self::SaltTooLong
                | Self::AdTooShort
                | Self::AdTooLong
                | Self::SecretTooShort
                | Self::SecretTooLong
                | Self::TimeTooSmall
                | Self::TimeTooLarge
                | Self::MemoryTooLittle
                | Self::MemoryTooMuch
                | Self::LanesTooFew
                | Self::LanesTooMany
                | Self::IncorrectParameter
                | Self::IncorrectType
        )
    }

    /// Operational failure reported by the primitive
    #[must_use]
    pub fn is_operational_error(&self) -> bool {
        self.code().is_some() && !self.is_parameter_error()
    }

    /// Local failure while parsing an encoded hash
    #[must_use]
    pub fn is_encoding_error(&self) -> bool {
        matches!(
            self,
            Self::EncodedFormat
                | Self::EncodedNotSixParts
                | Self::EncodedUnknownType
                | Self::EncodedNoVersion
                | Self::EncodedNotThreeSubparts
                | Self::EncodedNoMemory
                | Self::EncodedNoTime
                | Self::EncodedNoParallelism
                | Self::Base64(_)
        )
    }

    /// Create an internal error
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<argon2::Error> for Argon2Error {
    fn from(err: argon2::Error) -> Self {
        match err {
            argon2::Error::AdTooLong => Self::AdTooLong,
            argon2::Error::AlgorithmInvalid => Self::IncorrectType,
            argon2::Error::MemoryTooLittle => Self::MemoryTooLittle,
            argon2::Error::MemoryTooMuch => Self::MemoryTooMuch,
            argon2::Error::OutputTooShort => Self::OutputTooShort,
            argon2::Error::OutputTooLong => Self::OutputTooLong,
            argon2::Error::PwdTooLong => Self::PwdTooLong,
            argon2::Error::SaltTooShort => Self::SaltTooShort,
            argon2::Error::SaltTooLong => Self::SaltTooLong,
            argon2::Error::SecretTooLong => Self::SecretTooLong,
            argon2::Error::ThreadsTooFew => Self::LanesTooFew,
            argon2::Error::ThreadsTooMany => Self::LanesTooMany,
            argon2::Error::TimeTooSmall => Self::TimeTooSmall,
            // version, key id and PHC encoding faults
            _ => Self::IncorrectParameter,
        }
    }
}

impl From<getrandom::Error> for Argon2Error {
    fn from(err: getrandom::Error) -> Self {
        Self::Random(err)
    }
}

impl From<serde_json::Error> for Argon2Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type for Argon2 operations
pub type Result<T> = std::result::Result<T, Argon2Error>;
