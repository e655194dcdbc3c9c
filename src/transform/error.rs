//! Transform error types

use thiserror::Error;

/// Errors raised by the encode-then-encrypt pipeline
#[derive(Debug, Error)]
pub enum TransformError {
    /// The dataset (or hologram) could not be turned into JSON text
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Ciphertext could not be decrypted or unpadded
    #[error("Decryption failed: {0}")]
    Decryption(String),
}

/// Result type for transform operations
pub type TransformResult<T> = Result<T, TransformError>;
