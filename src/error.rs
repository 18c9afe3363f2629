use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the importer
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Feed error: {0}")]
    #[diagnostic(code(live25::feed))]
    Feed(String),

    #[error("Record store error: {0}")]
    #[diagnostic(code(live25::store))]
    Store(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(live25::config))]
    Config(String),

    #[error(transparent)]
    #[diagnostic(code(live25::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(live25::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(live25::other))]
    Other(String),
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<redis::RedisError> for Error {
    fn from(err: redis::RedisError) -> Self {
        Error::Store(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type ImportResult<T> = Result<T, Error>;

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create feed errors
pub fn feed_error(message: &str) -> Error {
    Error::Feed(message.to_string())
}

/// Helper to create record store errors
pub fn store_error(message: &str) -> Error {
    Error::Store(message.to_string())
}
