//! Structured logging infrastructure
//!
//! Provides env_logger-based logging with secure handling of credentials.
//! Tokens are bearer credentials, so they are only ever logged as a short
//! SHA-256 fingerprint.

use log::{info, warn};
use sha2::{Digest, Sha256};
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Number of digest bytes kept in a fingerprint (12 hex characters).
const FINGERPRINT_BYTES: usize = 6;

/// Logging entry points used by the token crates
pub struct LoggingTransformer;

impl LoggingTransformer {
    /// Initialize logging system (should be called once at application startup)
    ///
    /// Configure levels via the `RUST_LOG` environment variable, e.g.
    /// `RUST_LOG=signet_token=debug`.
    pub fn init() {
        INIT_LOGGER.call_once(|| {
            env_logger::Builder::from_default_env()
                .format_timestamp_micros()
                .init();

            info!("Structured logging initialized");
        });
    }

    /// Initialize logging for test environments
    ///
    /// Safe to call from every test; later calls are ignored.
    pub fn init_test() {
        let _ = env_logger::Builder::from_default_env()
            .is_test(true)
            .try_init();
    }

    /// Log a token that failed verification or parsing
    ///
    /// `kind` is the error category, `fingerprint` comes from [`Self::fingerprint`].
    pub fn log_token_rejected(operation: &str, kind: &str, fingerprint: &str) {
        warn!("Token rejected: {operation} (kind: {kind}, token: {fingerprint})");
    }

    /// Log a change to signing configuration
    ///
    /// Only the algorithm identifier is logged, never key material.
    pub fn log_configuration(event: &str, algorithm: &str) {
        info!("Signing configuration: {event} (alg: {algorithm})");
    }

    /// Short SHA-256 fingerprint of sensitive bytes
    ///
    /// Returns `#` followed by 12 hex characters.
    #[must_use]
    pub fn fingerprint(data: &[u8]) -> String {
        let digest = Sha256::digest(data);
        format!("#{}", hex::encode(&digest[..FINGERPRINT_BYTES]))
    }
}
