//! Passcode generation

use rand::rngs::OsRng;
use rand::RngCore;

use crate::errors::{OtpError, OtpResult};

const CODE_SPACE: u32 = 1_000_000;

/// Generate a zero-padded 6-digit code from the OS random source
pub fn generate_code() -> OtpResult<String> {
    generate_code_with(&mut OsRng)
}

/// Generate a code from an arbitrary random source
///
/// Three bytes are read as a big-endian 24-bit integer and reduced modulo
/// 10^6. The resulting bias is small and acceptable for a short-lived,
/// rate-limited, single-use code.
pub fn generate_code_with<R: RngCore + ?Sized>(rng: &mut R) -> OtpResult<String> {
    let mut bytes = [0u8; 3];
    rng.try_fill_bytes(&mut bytes)
        .map_err(|e| OtpError::RandomSource {
            message: e.to_string(),
        })?;

    let n = (u32::from(bytes[0]) << 16) | (u32::from(bytes[1]) << 8) | u32::from(bytes[2]);
    Ok(format!("{:06}", n % CODE_SPACE))
}
