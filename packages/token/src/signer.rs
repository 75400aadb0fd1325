//! HMAC signing for token segments
//!
//! Digests are returned as raw bytes; base64url encoding happens in the
//! codec. Signing is deterministic for a given `(data, secret, algorithm)`.

use crate::algorithm::Algorithm;
use crate::error::{TokenError, TokenResult};
use hmac::{Hmac, Mac, digest::KeyInit};
use sha2::{Sha256, Sha384, Sha512};
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;
type HmacSha384 = Hmac<Sha384>;
type HmacSha512 = Hmac<Sha512>;

/// Compute the raw HMAC of `data` keyed by `secret`
///
/// # Errors
/// Returns `TokenError::Configuration` if the MAC rejects the key.
pub fn sign(algorithm: Algorithm, data: &[u8], secret: &[u8]) -> TokenResult<Vec<u8>> {
    match algorithm {
        Algorithm::Hs256 => mac_digest::<HmacSha256>(data, secret),
        Algorithm::Hs384 => mac_digest::<HmacSha384>(data, secret),
        Algorithm::Hs512 => mac_digest::<HmacSha512>(data, secret),
    }
}

/// Compare two signatures in constant time
///
/// Length differences return `false` without inspecting contents.
#[inline]
#[must_use]
pub fn signatures_match(expected: &[u8], provided: &[u8]) -> bool {
    expected.ct_eq(provided).into()
}

fn mac_digest<M: Mac + KeyInit>(data: &[u8], secret: &[u8]) -> TokenResult<Vec<u8>> {
    let mut mac = <M as KeyInit>::new_from_slice(secret)
        .map_err(|_| TokenError::configuration("Invalid HMAC key"))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}
