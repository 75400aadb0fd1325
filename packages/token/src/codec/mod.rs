//! Compact token codec
//!
//! Wire format: `base64url(header_json) "." base64url(payload_json) "."
//! base64url(hmac)`. The MAC covers the first two encoded segments exactly
//! as they appear in the token.

mod decoder;
mod encoder;

use crate::config::CodecConfig;
use crate::error::{TokenError, TokenResult};
use crate::types::{Payload, Segment};
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;

/// Segment separator
pub const SEPARATOR: char = '.';

/// Encoder and verifier bound to one immutable [`CodecConfig`]
///
/// Cloning is cheap and clones may be used from any thread.
#[derive(Debug, Clone)]
pub struct TokenCodec {
    config: Arc<CodecConfig>,
}

impl TokenCodec {
    /// Create a codec from a validated configuration
    #[must_use]
    pub fn new(config: CodecConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// The codec's configuration
    #[must_use]
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Sign `payload` into a compact token
    ///
    /// # Errors
    /// Returns `TokenError::Serialization` if the payload cannot be rendered
    /// as JSON, or `TokenError::UnsupportedAlgorithm` if the configured
    /// algorithm cannot be resolved.
    pub fn encode(&self, payload: &Payload) -> TokenResult<String> {
        encoder::encode(&self.config, payload)
    }

    /// Sign any serializable claims value
    ///
    /// The value must serialize to a JSON object.
    ///
    /// # Errors
    /// As [`TokenCodec::encode`]; a non-object value is `TokenError::Serialization`.
    pub fn encode_claims<T: Serialize + ?Sized>(&self, claims: &T) -> TokenResult<String> {
        let value = serde_json::to_value(claims)
            .map_err(|e| TokenError::serialization(&e.to_string()))?;
        match value {
            serde_json::Value::Object(payload) => self.encode(&payload),
            _ => Err(TokenError::serialization(
                "claims must serialize to a JSON object",
            )),
        }
    }

    /// Verify `token` and return its payload
    ///
    /// Fails closed: no payload is returned unless every check passes.
    ///
    /// # Errors
    /// `TokenError::Format`, `TokenError::Decode`,
    /// `TokenError::MissingAlgorithm`, `TokenError::DisallowedAlgorithm` or
    /// `TokenError::SignatureMismatch` for an invalid token;
    /// `TokenError::UnsupportedAlgorithm` if the verifying algorithm cannot
    /// be resolved.
    pub fn decode(&self, token: &str) -> TokenResult<Payload> {
        decoder::decode(&self.config, token)
    }

    /// Verify `token` and deserialize its payload into `T`
    ///
    /// # Errors
    /// As [`TokenCodec::decode`]; a payload that does not fit `T` is
    /// `TokenError::Decode` on the payload segment.
    pub fn decode_claims<T: DeserializeOwned>(&self, token: &str) -> TokenResult<T> {
        let payload = self.decode(token)?;
        serde_json::from_value(serde_json::Value::Object(payload)).map_err(|e| {
            TokenError::decode(Segment::Payload, &crate::error::describe_json_error(&e))
        })
    }
}

impl From<CodecConfig> for TokenCodec {
    fn from(config: CodecConfig) -> Self {
        Self::new(config)
    }
}
