//! Crypto error types.

use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur during key handling and envelope crypto.
///
/// None of these are retried internally: given fixed inputs they are
/// deterministic, except [`CryptoError::RandomSource`], which only the
/// caller may retry.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Malformed or invalid key encoding (bad base64, wrong length,
    /// identity point). Surfaced to callers as "invalid key".
    #[error("invalid key: {0}")]
    KeyFormat(String),

    /// Malformed envelope structure. Surfaced as "corrupted post".
    #[error("corrupted envelope: {0}")]
    EnvelopeFormat(String),

    /// AEAD encryption failed.
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// AEAD authentication failed. Carries no cause: wrong private key,
    /// tampered envelope, and corrupted data are indistinguishable so the
    /// error cannot be used as an oracle.
    #[error("decryption failed (wrong key or tampered data)")]
    Decryption,

    /// The secure random source is unavailable. Fatal for the operation;
    /// there is no fallback to a weaker source.
    #[error("secure random source unavailable: {0}")]
    RandomSource(String),
}
