//! Common infrastructure shared by the signet crates
//!
//! Currently this is the logging layer: `env_logger` initialization and
//! log helpers that never put credentials into log output.

pub mod logging;

pub use logging::LoggingTransformer;
