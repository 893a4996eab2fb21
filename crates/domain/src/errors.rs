//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the Chameleon client
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum ChameleonError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Chameleon operations
pub type Result<T> = std::result::Result<T, ChameleonError>;

/// Failure modes of the field-encryption helper.
///
/// The upstream deployment collapses every failure into a bare sentinel;
/// callers here can branch on the cause instead. The diagnostic is still
/// logged at the failure site, so the caller contract stays "got a value
/// or a tagged error".
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum CryptoError {
    /// Plaintext, ciphertext, or key material was empty.
    #[error("missing plaintext or key material")]
    EmptyInput,

    /// Ciphertext is not a pure hexadecimal string.
    #[error("ciphertext is not a valid hex string")]
    MalformedHex,

    /// The SM2 primitive rejected the input (bad key, corrupt ciphertext).
    #[error("SM2 primitive failure: {0}")]
    Primitive(String),
}

impl From<CryptoError> for ChameleonError {
    fn from(value: CryptoError) -> Self {
        ChameleonError::Crypto(value.to_string())
    }
}
