//! Post service error types.

use thiserror::Error;

/// Result type for post operations.
pub type PostResult<T> = Result<T, PostError>;

/// Errors surfaced to the UI collaborator.
#[derive(Debug, Error)]
pub enum PostError {
    #[error("crypto error: {0}")]
    Crypto(#[from] sealpost_crypto::CryptoError),

    #[error("storage error: {0}")]
    Storage(#[from] sealpost_storage::StorageError),

    #[error("post not found: {0}")]
    NotFound(String),

    /// The envelope authenticated but its content is not text. Distinct
    /// from a decryption failure: the key was right and the data intact.
    #[error("decrypted content is not valid UTF-8")]
    ContentEncoding,
}
