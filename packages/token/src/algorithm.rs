//! Signing algorithms and the algorithm registry
//!
//! The three HMAC-SHA2 identifiers are built in. Additional identifiers can
//! be registered on an [`AlgorithmRegistry`] with a MAC capability, but the
//! built-ins can never be replaced.

use crate::error::{TokenError, TokenResult};
use crate::signer;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Built-in HMAC algorithms
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// HMAC with SHA-256
    #[default]
    Hs256,
    /// HMAC with SHA-384
    Hs384,
    /// HMAC with SHA-512
    Hs512,
}

impl Algorithm {
    /// All built-in algorithms
    pub const ALL: [Algorithm; 3] = [Algorithm::Hs256, Algorithm::Hs384, Algorithm::Hs512];

    /// Header `alg` value
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Hs256 => "HS256",
            Algorithm::Hs384 => "HS384",
            Algorithm::Hs512 => "HS512",
        }
    }

    /// Length of the raw signature in bytes
    #[must_use]
    pub fn digest_len(self) -> usize {
        match self {
            Algorithm::Hs256 => 32,
            Algorithm::Hs384 => 48,
            Algorithm::Hs512 => 64,
        }
    }

    /// Recommended minimum secret length in bytes (the digest size)
    #[must_use]
    pub fn recommended_key_len(self) -> usize {
        self.digest_len()
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HS256" => Ok(Algorithm::Hs256),
            "HS384" => Ok(Algorithm::Hs384),
            "HS512" => Ok(Algorithm::Hs512),
            _ => Err(TokenError::unsupported_algorithm(s)),
        }
    }
}

/// MAC capability: `(secret, data) -> raw digest`
pub type MacFunction = Arc<dyn Fn(&[u8], &[u8]) -> TokenResult<Vec<u8>> + Send + Sync>;

static BUILTIN_REGISTRY: Lazy<Arc<AlgorithmRegistry>> =
    Lazy::new(|| Arc::new(AlgorithmRegistry::with_builtins()));

/// Mapping from algorithm identifier to MAC capability
#[derive(Clone)]
pub struct AlgorithmRegistry {
    entries: HashMap<String, MacFunction>,
}

impl AlgorithmRegistry {
    /// Registry containing `HS256`, `HS384` and `HS512`
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut entries: HashMap<String, MacFunction> = HashMap::new();
        for algorithm in Algorithm::ALL {
            let mac: MacFunction =
                Arc::new(move |secret: &[u8], data: &[u8]| signer::sign(algorithm, data, secret));
            entries.insert(algorithm.as_str().to_string(), mac);
        }
        Self { entries }
    }

    /// Process-wide shared registry with only the built-ins
    #[must_use]
    pub fn shared_builtins() -> Arc<Self> {
        Arc::clone(&BUILTIN_REGISTRY)
    }

    /// Register an additional algorithm
    ///
    /// # Errors
    /// Returns `TokenError::UnsupportedAlgorithm` for an empty identifier and
    /// `TokenError::Configuration` when `id` names a built-in algorithm.
    pub fn register<F>(&mut self, id: &str, mac: F) -> TokenResult<()>
    where
        F: Fn(&[u8], &[u8]) -> TokenResult<Vec<u8>> + Send + Sync + 'static,
    {
        if id.is_empty() {
            return Err(TokenError::unsupported_algorithm(id));
        }
        if id.parse::<Algorithm>().is_ok() {
            return Err(TokenError::configuration(&format!(
                "built-in algorithm {id} cannot be replaced"
            )));
        }
        self.entries.insert(id.to_string(), Arc::new(mac));
        Ok(())
    }

    /// Look up the MAC capability for `id`
    ///
    /// # Errors
    /// Returns `TokenError::UnsupportedAlgorithm` if `id` is not registered.
    pub fn resolve(&self, id: &str) -> TokenResult<MacFunction> {
        self.entries
            .get(id)
            .cloned()
            .ok_or_else(|| TokenError::unsupported_algorithm(id))
    }

    /// Whether `id` is registered
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Registered identifiers, sorted
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl Default for AlgorithmRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for AlgorithmRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlgorithmRegistry")
            .field("ids", &self.ids())
            .finish()
    }
}
