//! Async builder API
//!
//! Fluent, tokio-backed front end over [`crate::TokenCodec`].

pub mod builder;
pub mod result;

pub use builder::{Token, TokenBuilder};
pub use result::AsyncTokenResult;
