//! Signed compact tokens
//!
//! Encodes a JSON payload as `base64url(header).base64url(payload).base64url(hmac)`
//! and verifies such tokens, failing closed on any structural, encoding or
//! signature problem.
//!
//! - HS256, HS384 and HS512 built in; more can be registered
//! - Explicit immutable configuration ([`CodecConfig`]) or a process-wide
//!   context ([`process`])
//! - Constant-time signature comparison
//! - Async builder API backed by tokio
//!
//! ```
//! use signet_token::{CodecConfig, Payload, TokenCodec};
//!
//! # fn main() -> signet_token::TokenResult<()> {
//! let codec = TokenCodec::new(CodecConfig::builder().secret(b"s3cr3t").build()?);
//!
//! let mut payload = Payload::new();
//! payload.insert("sub".into(), "user-1".into());
//!
//! let token = codec.encode(&payload)?;
//! assert_eq!(codec.decode(&token)?, payload);
//! # Ok(())
//! # }
//! ```

pub mod algorithm;
pub mod api;
pub mod base64url;
mod codec;
mod config;
mod error;
pub mod process;
mod secret;
pub mod signer;
mod types;

pub use algorithm::{Algorithm, AlgorithmRegistry, MacFunction};
pub use api::{AsyncTokenResult, Token, TokenBuilder};
pub use codec::{SEPARATOR, TokenCodec};
pub use config::{AlgorithmPolicy, CodecConfig, CodecConfigBuilder};
pub use error::*;
pub use secret::Secret;
pub use types::*;

/// Main entry point
pub struct Signet;

impl Signet {
    /// Token builder
    #[must_use]
    pub fn token() -> TokenBuilder {
        TokenBuilder::new()
    }
}
