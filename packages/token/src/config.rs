//! Immutable codec configuration

use crate::algorithm::{Algorithm, AlgorithmRegistry, MacFunction};
use crate::error::{TokenError, TokenResult};
use crate::secret::Secret;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

static WEAK_KEY_WARNED: AtomicBool = AtomicBool::new(false);

/// True for the first weak-key report of the process only
fn first_weak_key_report() -> bool {
    !WEAK_KEY_WARNED.swap(true, Ordering::Relaxed)
}

/// How the verifier picks the algorithm for a token
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AlgorithmPolicy {
    /// Use the algorithm named in the token header, which must be on the
    /// allow-list. The configured algorithm is always allowed.
    #[default]
    HeaderAllowList,
    /// Always verify with the configured algorithm; the header `alg` is
    /// only checked for presence.
    Configured,
}

/// Signing context shared by every encode and decode call of a codec
#[derive(Debug, Clone)]
pub struct CodecConfig {
    secret: Secret,
    algorithm: String,
    allowed: Vec<String>,
    policy: AlgorithmPolicy,
    registry: Arc<AlgorithmRegistry>,
}

impl CodecConfig {
    /// Start building a configuration
    #[must_use]
    pub fn builder() -> CodecConfigBuilder {
        CodecConfigBuilder::new()
    }

    /// Signing secret
    #[must_use]
    pub fn secret(&self) -> &Secret {
        &self.secret
    }

    /// Algorithm used for encoding
    #[must_use]
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// Algorithms accepted when verifying under [`AlgorithmPolicy::HeaderAllowList`]
    #[must_use]
    pub fn allowed_algorithms(&self) -> &[String] {
        &self.allowed
    }

    /// Whether `id` is on the verification allow-list
    #[must_use]
    pub fn allows(&self, id: &str) -> bool {
        self.allowed.iter().any(|allowed| allowed == id)
    }

    /// Verification policy
    #[must_use]
    pub fn policy(&self) -> AlgorithmPolicy {
        self.policy
    }

    /// Registry the algorithms are resolved against
    #[must_use]
    pub fn registry(&self) -> &AlgorithmRegistry {
        &self.registry
    }

    pub(crate) fn mac_for(&self, id: &str) -> TokenResult<MacFunction> {
        self.registry.resolve(id)
    }
}

/// Builder for [`CodecConfig`]
#[derive(Debug, Default)]
pub struct CodecConfigBuilder {
    secret: Option<Secret>,
    algorithm: Option<String>,
    allowed: Vec<String>,
    policy: AlgorithmPolicy,
    registry: Option<Arc<AlgorithmRegistry>>,
}

impl CodecConfigBuilder {
    /// Create new builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the HMAC secret
    #[must_use]
    pub fn secret(mut self, secret: impl AsRef<[u8]>) -> Self {
        self.secret = Some(Secret::new(secret));
        self
    }

    /// Reuse an existing secret
    #[must_use]
    pub fn with_secret(mut self, secret: Secret) -> Self {
        self.secret = Some(secret);
        self
    }

    /// Set the signing algorithm (default `HS256`)
    #[must_use]
    pub fn algorithm(mut self, id: &str) -> Self {
        self.algorithm = Some(id.to_string());
        self
    }

    /// Accept tokens signed with `id` in addition to the signing algorithm
    #[must_use]
    pub fn allow_algorithm(mut self, id: &str) -> Self {
        if !self.allowed.iter().any(|allowed| allowed == id) {
            self.allowed.push(id.to_string());
        }
        self
    }

    /// Set the verification policy
    #[must_use]
    pub fn policy(mut self, policy: AlgorithmPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Resolve algorithms against a custom registry
    #[must_use]
    pub fn registry(mut self, registry: AlgorithmRegistry) -> Self {
        self.registry = Some(Arc::new(registry));
        self
    }

    /// Validate and freeze the configuration
    ///
    /// # Errors
    /// - `TokenError::Configuration` if no secret or an empty secret was set
    /// - `TokenError::UnsupportedAlgorithm` if the algorithm or an allow-list
    ///   entry is not registered
    pub fn build(self) -> TokenResult<CodecConfig> {
        let secret = self
            .secret
            .ok_or_else(|| TokenError::configuration("secret must be set before use"))?;
        if secret.is_empty() {
            return Err(TokenError::configuration("secret must not be empty"));
        }

        let registry = self.registry.unwrap_or_else(AlgorithmRegistry::shared_builtins);
        let algorithm = self
            .algorithm
            .unwrap_or_else(|| Algorithm::default().as_str().to_string());
        if !registry.contains(&algorithm) {
            return Err(TokenError::unsupported_algorithm(&algorithm));
        }
        if let Some(unknown) = self.allowed.iter().find(|id| !registry.contains(id)) {
            return Err(TokenError::unsupported_algorithm(unknown));
        }

        if let Ok(builtin) = algorithm.parse::<Algorithm>() {
            // Builders rebuilt per request would otherwise warn every time
            if secret.len() < builtin.recommended_key_len() {
                if first_weak_key_report() {
                    tracing::warn!(
                        alg = %builtin,
                        key_len = secret.len(),
                        recommended = builtin.recommended_key_len(),
                        "HMAC secret is shorter than the recommended length"
                    );
                } else {
                    tracing::debug!(
                        alg = %builtin,
                        key_len = secret.len(),
                        "HMAC secret is shorter than the recommended length"
                    );
                }
            }
        }

        let mut allowed = vec![algorithm.clone()];
        allowed.extend(self.allowed.into_iter().filter(|id| *id != algorithm));

        Ok(CodecConfig {
            secret,
            algorithm,
            allowed,
            policy: self.policy,
            registry,
        })
    }
}
