//! Token codec error types

use crate::types::Segment;
use thiserror::Error;

/// Token operation result type
pub type TokenResult<T> = Result<T, TokenError>;

/// Token codec error types
///
/// Configuration variants indicate a programming or deployment bug; the
/// rejection variants are the expected outcome for a bad token from a
/// client. See [`TokenError::is_configuration_error`] and
/// [`TokenError::is_rejection`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Secret missing or codec misconfigured
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// Algorithm identifier not in the registry
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),
    /// Payload could not be rendered as JSON
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Token does not have exactly three non-empty segments
    #[error("Invalid token format: {0}")]
    Format(String),
    /// A segment failed base64url or JSON decoding
    #[error("Decode error in {segment} segment: {reason}")]
    Decode {
        /// Segment that failed
        segment: Segment,
        /// What went wrong
        reason: String,
    },
    /// Header has no non-empty `alg` field
    #[error("Token header is missing the algorithm")]
    MissingAlgorithm,
    /// Header names an algorithm outside the verification allow-list
    #[error("Algorithm not allowed for verification: {0}")]
    DisallowedAlgorithm(String),
    /// Recomputed signature does not match the token's signature
    #[error("Token signature mismatch")]
    SignatureMismatch,
    /// Background task failed
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TokenError {
    /// Create a configuration error
    #[inline]
    #[must_use]
    pub fn configuration(msg: &str) -> Self {
        TokenError::Configuration(msg.to_string())
    }

    /// Create an unsupported algorithm error
    #[inline]
    #[must_use]
    pub fn unsupported_algorithm(alg: &str) -> Self {
        TokenError::UnsupportedAlgorithm(alg.to_string())
    }

    /// Create a serialization error
    #[inline]
    #[must_use]
    pub fn serialization(msg: &str) -> Self {
        TokenError::Serialization(msg.to_string())
    }

    /// Create a format error
    #[inline]
    #[must_use]
    pub fn format(msg: &str) -> Self {
        TokenError::Format(msg.to_string())
    }

    /// Create a decode error for one segment
    #[inline]
    #[must_use]
    pub fn decode(segment: Segment, reason: &str) -> Self {
        TokenError::Decode {
            segment,
            reason: reason.to_string(),
        }
    }

    /// Create an internal error
    #[inline]
    #[must_use]
    pub fn internal(msg: &str) -> Self {
        TokenError::Internal(msg.to_string())
    }

    /// True for errors caused by how the codec was set up rather than by
    /// the token being processed.
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            TokenError::Configuration(_) | TokenError::UnsupportedAlgorithm(_)
        )
    }

    /// True for errors that mean "this token is invalid, reject the request".
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            TokenError::Format(_)
                | TokenError::Decode { .. }
                | TokenError::MissingAlgorithm
                | TokenError::DisallowedAlgorithm(_)
                | TokenError::SignatureMismatch
        )
    }

    /// Short stable name of the error kind, used in log output
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            TokenError::Configuration(_) => "configuration",
            TokenError::UnsupportedAlgorithm(_) => "unsupported_algorithm",
            TokenError::Serialization(_) => "serialization",
            TokenError::Format(_) => "format",
            TokenError::Decode { .. } => "decode",
            TokenError::MissingAlgorithm => "missing_algorithm",
            TokenError::DisallowedAlgorithm(_) => "disallowed_algorithm",
            TokenError::SignatureMismatch => "signature_mismatch",
            TokenError::Internal(_) => "internal",
        }
    }
}

/// Describe a `serde_json` failure: syntax (including depth overflow and
/// control characters), truncated input, or wrong shape.
pub(crate) fn describe_json_error(error: &serde_json::Error) -> String {
    use serde_json::error::Category;

    let category = match error.classify() {
        Category::Syntax => "syntax error, malformed JSON",
        Category::Eof => "unexpected end of JSON input",
        Category::Data => "JSON has an unexpected shape",
        Category::Io => "JSON read failure",
    };
    format!("{category} ({error})")
}
