//! Process-wide signing context
//!
//! Convenience entrypoints for callers that configure one secret and
//! algorithm at startup and then encode and decode from anywhere. State
//! lives in a lock-free [`ArcSwap`]; each call works on one consistent
//! snapshot, so a concurrent `set_*` never produces a half-updated
//! context. Prefer an explicit [`TokenCodec`] where one can be passed
//! around.

use crate::algorithm::Algorithm;
use crate::codec::TokenCodec;
use crate::config::CodecConfig;
use crate::error::{TokenError, TokenResult};
use crate::secret::Secret;
use crate::types::Payload;
use arc_swap::ArcSwap;
use once_cell::sync::Lazy;
use signet_common::LoggingTransformer;
use std::sync::Arc;

#[derive(Debug, Clone)]
struct ProcessContext {
    secret: Option<Secret>,
    algorithm: String,
    codec: Option<TokenCodec>,
}

impl ProcessContext {
    fn rebuild(secret: Option<Secret>, algorithm: String) -> Self {
        // Invalid combinations leave `codec` empty; the error is reported
        // by the next encode or decode.
        let codec = secret.clone().and_then(|secret| {
            CodecConfig::builder()
                .with_secret(secret)
                .algorithm(&algorithm)
                .build()
                .ok()
                .map(TokenCodec::new)
        });
        Self {
            secret,
            algorithm,
            codec,
        }
    }
}

static CONTEXT: Lazy<ArcSwap<ProcessContext>> = Lazy::new(|| {
    ArcSwap::from_pointee(ProcessContext {
        secret: None,
        algorithm: Algorithm::default().as_str().to_string(),
        codec: None,
    })
});

/// Set the process-wide secret
pub fn set_secret(secret: impl AsRef<[u8]>) {
    let secret = Secret::new(secret);
    // `rcu` hands back the context the new secret was paired with
    let previous = CONTEXT.rcu(|current| {
        ProcessContext::rebuild(Some(secret.clone()), current.algorithm.clone())
    });
    LoggingTransformer::log_configuration("secret set", &previous.algorithm);
}

/// Set the process-wide algorithm (default `HS256`)
///
/// The identifier is not checked here; an unsupported value makes the
/// next encode or decode fail with `TokenError::UnsupportedAlgorithm`.
pub fn set_algorithm(id: &str) {
    CONTEXT.rcu(|current| ProcessContext::rebuild(current.secret.clone(), id.to_string()));
    LoggingTransformer::log_configuration("algorithm set", id);
}

/// Codec for the current process-wide context
///
/// # Errors
/// - `TokenError::Configuration` if no secret has been set
/// - `TokenError::UnsupportedAlgorithm` if the algorithm is not supported
pub fn codec() -> TokenResult<TokenCodec> {
    let context = CONTEXT.load_full();
    if let Some(codec) = &context.codec {
        return Ok(codec.clone());
    }
    match &context.secret {
        None => Err(TokenError::configuration("secret must be set before use")),
        Some(secret) => CodecConfig::builder()
            .with_secret(secret.clone())
            .algorithm(&context.algorithm)
            .build()
            .map(TokenCodec::new),
    }
}

/// Encode `payload` with the process-wide context
///
/// # Errors
/// See [`codec`] and [`TokenCodec::encode`].
pub fn encode(payload: &Payload) -> TokenResult<String> {
    codec()?.encode(payload)
}

/// Decode `token` with the process-wide context
///
/// # Errors
/// See [`codec`] and [`TokenCodec::decode`].
pub fn decode(token: &str) -> TokenResult<Payload> {
    codec()?.decode(token)
}

/// Currently configured process-wide algorithm identifier
#[must_use]
pub fn algorithm() -> String {
    CONTEXT.load().algorithm.clone()
}

/// Forget the secret and restore the default algorithm
pub fn clear() {
    CONTEXT.store(Arc::new(ProcessContext {
        secret: None,
        algorithm: Algorithm::default().as_str().to_string(),
        codec: None,
    }));
}
