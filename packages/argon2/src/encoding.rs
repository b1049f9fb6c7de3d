//! Crypt-style encoded hash format
//!
//! `$<variant>$v=<version>$m=<memory>,t=<iterations>,p=<parallelism>$<salt>$<hash>`
//!
//! Salt and hash use the standard base64 alphabet without padding.

use crate::context::{Context, Mode};
use crate::error::{Argon2Error, Result};
use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine as _;
use std::fmt;
use std::str::FromStr;

/// Parsed form of an encoded hash
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedHash {
    /// Variant
    pub mode: Mode,
    /// Revision
    pub version: u32,
    /// Memory cost in KiB
    pub memory: u32,
    /// Time cost
    pub iterations: u32,
    /// Number of lanes
    pub parallelism: u32,
    /// Raw salt bytes
    pub salt: Vec<u8>,
    /// Raw hash bytes
    pub hash: Vec<u8>,
}

impl EncodedHash {
    /// Capture the cost parameters of `ctx` together with a salt and hash
    #[must_use]
    pub fn from_context(ctx: &Context, salt: &[u8], hash: &[u8]) -> Self {
        Self {
            mode: ctx.mode(),
            version: ctx.version(),
            memory: ctx.memory(),
            iterations: ctx.iterations(),
            parallelism: ctx.parallelism(),
            salt: salt.to_vec(),
            hash: hash.to_vec(),
        }
    }

    /// Parse an encoded hash string
    ///
    /// # Errors
    ///
    /// Fails with the first structural problem found, checked in order:
    /// part count, variant, version, cost sub-part count, `m`, `t`, `p`,
    /// then salt and hash base64.
    pub fn parse(encoded: &str) -> Result<Self> {
        let parts: Vec<&str> = encoded.split('$').collect();
        if parts.len() != 6 {
            return Err(Argon2Error::EncodedNotSixParts);
        }
        if !parts[0].is_empty() {
            return Err(Argon2Error::EncodedFormat);
        }

        let mode = Mode::from_token(parts[1]).ok_or(Argon2Error::EncodedUnknownType)?;
        let version = parse_field(parts[2], "v=").ok_or(Argon2Error::EncodedNoVersion)?;

        let costs: Vec<&str> = parts[3].split(',').collect();
        if costs.len() != 3 {
            return Err(Argon2Error::EncodedNotThreeSubparts);
        }
        let memory = parse_field(costs[0], "m=").ok_or(Argon2Error::EncodedNoMemory)?;
        let iterations = parse_field(costs[1], "t=").ok_or(Argon2Error::EncodedNoTime)?;
        let parallelism = parse_field(costs[2], "p=").ok_or(Argon2Error::EncodedNoParallelism)?;

        let salt = STANDARD_NO_PAD.decode(parts[4])?;
        let hash = STANDARD_NO_PAD.decode(parts[5])?;

        Ok(Self {
            mode,
            version,
            memory,
            iterations,
            parallelism,
            salt,
            hash,
        })
    }

    /// Render the canonical encoded string
    #[must_use]
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for EncodedHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "${}$v={}$m={},t={},p={}${}${}",
            self.mode,
            self.version,
            self.memory,
            self.iterations,
            self.parallelism,
            STANDARD_NO_PAD.encode(&self.salt),
            STANDARD_NO_PAD.encode(&self.hash),
        )
    }
}

impl FromStr for EncodedHash {
    type Err = Argon2Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// `<prefix><digits>` with nothing else around it
fn parse_field(segment: &str, prefix: &str) -> Option<u32> {
    let digits = segment.strip_prefix(prefix)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Encode `salt` and `hash` with the cost parameters of `ctx`
#[must_use]
pub fn encode(ctx: &Context, salt: &[u8], hash: &[u8]) -> String {
    EncodedHash::from_context(ctx, salt, hash).encode()
}

impl Context {
    /// Adopt the parameters of an encoded hash, returning `(hash, salt)`
    ///
    /// Mode, version and costs are overwritten and the output length follows
    /// the decoded hash. Secret, associated data, flags and lock are kept.
    /// Nothing changes when decoding fails.
    ///
    /// # Errors
    ///
    /// Returns the decoding error of [`EncodedHash::parse`].
    pub fn set_from_encoded(&mut self, encoded: &str) -> Result<(Vec<u8>, Vec<u8>)> {
        let decoded = EncodedHash::parse(encoded)?;
        self.mode = decoded.mode;
        self.version = decoded.version;
        self.memory = decoded.memory;
        self.iterations = decoded.iterations;
        self.parallelism = decoded.parallelism;
        self.output_length = decoded.hash.len();
        log::debug!(
            "Adopted encoded parameters: {} v={} m={} t={} p={}",
            self.mode,
            self.version,
            self.memory,
            self.iterations,
            self.parallelism
        );
        Ok((decoded.hash, decoded.salt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str =
        "$argon2d$v=19$m=4096,t=3,p=1$c29tZXNhbHQ$THaZx86KeqT+xuygENqvxaYIk3zu4wH0UmqzBL/wrdQ";

    #[test]
    fn parses_fixture() {
        let parsed = EncodedHash::parse(FIXTURE).expect("fixture should parse");
        assert_eq!(parsed.mode, Mode::Argon2d);
        assert_eq!(parsed.version, 19);
        assert_eq!(
            (parsed.memory, parsed.iterations, parsed.parallelism),
            (4096, 3, 1)
        );
        assert_eq!(parsed.salt, b"somesalt");
        assert_eq!(parsed.hash.len(), 32);
        assert_eq!(parsed.encode(), FIXTURE);
    }

    #[test]
    fn part_count_is_checked_first() {
        for bad in [
            "",
            "$argon2x$v=19",
            "$argon2x$v=x$m=1$c29tZXNhbHQ",
            "$argon2d$v=19$m=4096,t=3,p=1$c29tZXNhbHQ$aGFzaA$extra",
        ] {
            assert_eq!(EncodedHash::parse(bad), Err(Argon2Error::EncodedNotSixParts));
        }
    }

    #[test]
    fn unknown_variant_precedes_cost_parsing() {
        assert_eq!(
            EncodedHash::parse("$argon2x$v=zz$bogus$!!$!!"),
            Err(Argon2Error::EncodedUnknownType)
        );
    }

    #[test]
    fn leading_segment_must_be_empty() {
        assert_eq!(
            EncodedHash::parse("x$argon2d$v=19$m=4096,t=3,p=1$c29tZXNhbHQ$aGFzaA"),
            Err(Argon2Error::EncodedFormat)
        );
    }

    #[test]
    fn field_errors_are_specific() {
        let cases = [
            ("$argon2i$19$m=1,t=1,p=1$c2FsdA$aGFzaA", Argon2Error::EncodedNoVersion),
            ("$argon2i$v=1x$m=1,t=1,p=1$c2FsdA$aGFzaA", Argon2Error::EncodedNoVersion),
            ("$argon2i$v=19$m=1,t=1$c2FsdA$aGFzaA", Argon2Error::EncodedNotThreeSubparts),
            ("$argon2i$v=19$m=1,t=1,p=1,x=1$c2FsdA$aGFzaA", Argon2Error::EncodedNotThreeSubparts),
            ("$argon2i$v=19$t=1,m=1,p=1$c2FsdA$aGFzaA", Argon2Error::EncodedNoMemory),
            ("$argon2i$v=19$m=1,t=-1,p=1$c2FsdA$aGFzaA", Argon2Error::EncodedNoTime),
            ("$argon2i$v=19$m=1,t=1,p=$c2FsdA$aGFzaA", Argon2Error::EncodedNoParallelism),
        ];
        for (encoded, expected) in cases {
            assert_eq!(EncodedHash::parse(encoded), Err(expected), "{encoded}");
        }
    }

    #[test]
    fn padded_base64_is_rejected() {
        let err = EncodedHash::parse("$argon2i$v=19$m=1,t=1,p=1$c2FsdA==$aGFzaA")
            .expect_err("padding is not canonical");
        assert!(matches!(err, Argon2Error::Base64(_)));
        assert!(err.is_encoding_error());
    }

    #[test]
    fn adopting_keeps_secret_material() {
        let mut ctx = Context::new(Some(Mode::Argon2id));
        ctx.set_secret(b"pepper".to_vec())
            .set_associated_data(b"tenant-7".to_vec());

        let (hash, salt) = ctx.set_from_encoded(FIXTURE).expect("fixture should parse");

        assert_eq!(salt, b"somesalt");
        assert_eq!(hash.len(), 32);
        assert_eq!(ctx.mode(), Mode::Argon2d);
        assert_eq!((ctx.memory(), ctx.iterations(), ctx.parallelism()), (4096, 3, 1));
        assert_eq!(ctx.output_length(), 32);
        assert_eq!(ctx.secret(), Some(&b"pepper"[..]));
        assert_eq!(ctx.associated_data(), Some(&b"tenant-7"[..]));
    }

    #[test]
    fn failed_decode_leaves_context_untouched() {
        let mut ctx = Context::new(None);
        let before = format!("{ctx:?}");
        assert!(ctx.set_from_encoded("$argon2d$v=19$m=4096,t=3$c2FsdA$aGFzaA").is_err());
        assert_eq!(format!("{ctx:?}"), before);
    }
}
