//! Unpadded URL-safe base64
//!
//! Encoding uses the `-`/`_` alphabet and strips `=` padding. Decoding
//! restores the padding from the input length before decoding, so both
//! padded and unpadded input are accepted. Decoding is strict: characters
//! outside the URL-safe alphabet, impossible lengths and non-canonical
//! trailing bits are all errors.

use base64::{
    Engine as _,
    engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD},
};

/// Encode bytes as unpadded base64url text
#[inline]
#[must_use]
pub fn encode(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Decode base64url text, with or without trailing padding
///
/// # Errors
/// Returns `base64::DecodeError` on an invalid symbol or truncated input.
pub fn decode(input: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let remainder = input.len() % 4;
    if remainder == 0 {
        return URL_SAFE.decode(input);
    }

    let mut padded = String::with_capacity(input.len() + 4 - remainder);
    padded.push_str(input);
    padded.push_str(&"=".repeat(4 - remainder));
    URL_SAFE.decode(padded)
}
