//! Token builder API - entry point structs and configuration methods
//!
//! `sign` and `verify` run the codec on a tokio task and hand back an
//! [`AsyncTokenResult`]. Both require a running tokio runtime.

use super::result::AsyncTokenResult;
use crate::codec::TokenCodec;
use crate::config::{AlgorithmPolicy, CodecConfig};
use crate::error::TokenResult;
use crate::secret::Secret;
use crate::types::Payload;
use serde::Serialize;
use tokio::sync::oneshot;

/// Direct builder entry point - equivalent to `Signet::token()`
pub struct Token;

impl Token {
    /// Create new token builder
    #[inline]
    #[must_use]
    pub fn builder() -> TokenBuilder {
        TokenBuilder::new()
    }
}

/// Fluent configuration for one-off sign and verify calls
#[derive(Default)]
pub struct TokenBuilder {
    pub(crate) algorithm: Option<String>,
    pub(crate) secret: Option<Secret>,
    pub(crate) allowed: Vec<String>,
    pub(crate) policy: AlgorithmPolicy,
}

impl TokenBuilder {
    /// Create new token builder
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set algorithm (default `HS256`)
    #[inline]
    #[must_use]
    pub fn with_algorithm(mut self, algorithm: &str) -> Self {
        self.algorithm = Some(algorithm.to_string());
        self
    }

    /// Set HMAC secret
    #[inline]
    #[must_use]
    pub fn with_secret(mut self, secret: &[u8]) -> Self {
        self.secret = Some(Secret::new(secret));
        self
    }

    /// Also accept tokens signed with `algorithm` when verifying
    #[inline]
    #[must_use]
    pub fn allow_algorithm(mut self, algorithm: &str) -> Self {
        self.allowed.push(algorithm.to_string());
        self
    }

    /// Set verification policy
    #[inline]
    #[must_use]
    pub fn with_policy(mut self, policy: AlgorithmPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Build a reusable codec
    ///
    /// # Errors
    /// See [`crate::CodecConfigBuilder::build`].
    pub fn build(self) -> TokenResult<TokenCodec> {
        let mut config = CodecConfig::builder().policy(self.policy);
        if let Some(secret) = self.secret {
            config = config.with_secret(secret);
        }
        if let Some(algorithm) = &self.algorithm {
            config = config.algorithm(algorithm);
        }
        for algorithm in &self.allowed {
            config = config.allow_algorithm(algorithm);
        }
        config.build().map(TokenCodec::new)
    }

    /// Sign claims on a background task
    ///
    /// The configuration is validated on every call; for repeated use,
    /// [`TokenBuilder::build`] a codec once and share it.
    #[must_use]
    pub fn sign<C: Serialize + Send + 'static>(self, claims: C) -> AsyncTokenResult<String> {
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let result = self
                .build()
                .and_then(|codec| codec.encode_claims(&claims));
            let _ = tx.send(result);
        });

        AsyncTokenResult::new(rx)
    }

    /// Verify a token on a background task
    ///
    /// Like [`TokenBuilder::sign`], this validates the configuration per call.
    #[must_use]
    pub fn verify<S: AsRef<str>>(self, token: S) -> AsyncTokenResult<Payload> {
        let token = token.as_ref().to_string();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let result = self.build().and_then(|codec| codec.decode(&token));
            let _ = tx.send(result);
        });

        AsyncTokenResult::new(rx)
    }
}
