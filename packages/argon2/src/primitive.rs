//! Boundary to the memory-hard hash function
//!
//! Translates a [`Context`] into RustCrypto `argon2` parameters and maps its
//! failures into [`Argon2Error`]. Callers must hold the context's lock.

use crate::context::{Context, Mode};
use crate::error::{Argon2Error, Result};
use argon2::{Algorithm, Argon2, AssociatedData, ParamsBuilder, Version};

fn algorithm(mode: Mode) -> Algorithm {
    match mode {
        Mode::Argon2d => Algorithm::Argon2d,
        Mode::Argon2i => Algorithm::Argon2i,
        Mode::Argon2id => Algorithm::Argon2id,
    }
}

fn version(version: u32) -> Result<Version> {
    Version::try_from(version).map_err(|_| Argon2Error::IncorrectParameter)
}

/// Run the primitive with `output_length` bytes of output
pub(crate) fn compute(
    ctx: &Context,
    password: &[u8],
    salt: &[u8],
    output_length: usize,
) -> Result<Vec<u8>> {
    let mut builder = ParamsBuilder::new();
    builder
        .m_cost(ctx.memory)
        .t_cost(ctx.iterations)
        .p_cost(ctx.parallelism)
        .output_len(output_length);
    if let Some(data) = ctx.associated_data.as_deref() {
        builder.data(AssociatedData::new(data)?);
    }
    let params = builder.build()?;

    let algorithm = algorithm(ctx.mode);
    let version = version(ctx.version)?;
    let hasher = match ctx.secret() {
        Some(secret) => Argon2::new_with_secret(secret, algorithm, version, params)?,
        None => Argon2::new(algorithm, version, params),
    };

    let mut output = vec![0u8; output_length];
    hasher.hash_password_into(password, salt, &mut output)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_context() -> Context {
        let mut ctx = Context::new(Some(Mode::Argon2id));
        ctx.set_memory(64).set_iterations(1).set_parallelism(1);
        ctx
    }

    #[test]
    fn unsupported_version_is_incorrect_parameter() {
        let mut ctx = small_context();
        ctx.set_version(0x11);
        assert_eq!(
            compute(&ctx, b"password", b"somesalt", 32),
            Err(Argon2Error::IncorrectParameter)
        );
    }

    #[test]
    fn output_length_is_honoured() {
        let ctx = small_context();
        let out = compute(&ctx, b"password", b"somesalt", 48).expect("valid parameters");
        assert_eq!(out.len(), 48);
    }

    #[test]
    fn short_output_is_rejected() {
        let ctx = small_context();
        assert_eq!(
            compute(&ctx, b"password", b"somesalt", 3),
            Err(Argon2Error::OutputTooShort)
        );
    }

    #[test]
    fn zero_lanes_are_rejected() {
        let mut ctx = small_context();
        ctx.set_parallelism(0);
        assert_eq!(
            compute(&ctx, b"password", b"somesalt", 32),
            Err(Argon2Error::LanesTooFew)
        );
    }

    #[test]
    fn oversized_associated_data_is_rejected() {
        let mut ctx = small_context();
        ctx.set_associated_data(vec![4u8; 64]);
        assert_eq!(
            compute(&ctx, b"password", b"somesalt", 32),
            Err(Argon2Error::AdTooLong)
        );
    }
}
