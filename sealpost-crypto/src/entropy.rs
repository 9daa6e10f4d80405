//! Injectable entropy for key generation and nonces.
//!
//! All randomness in the crate flows through [`EntropySource`] so that
//! callers (and tests) can substitute a deterministic source without
//! touching seal/open call sites. Production code uses [`OsEntropy`].

use crate::error::{CryptoError, CryptoResult};

/// A cryptographically secure source of random bytes.
///
/// Implementations must be safe to share across concurrent seal/open
/// calls; the methods take `&self` for that reason.
pub trait EntropySource: Send + Sync {
    /// Fills `dest` with random bytes, or fails with
    /// [`CryptoError::RandomSource`] if the source is unavailable.
    fn fill(&self, dest: &mut [u8]) -> CryptoResult<()>;
}

/// Operating-system entropy via `getrandom`.
///
/// Failure is reported, never masked: a post sealed with weak randomness
/// would be silently compromised, so there is no fallback.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&self, dest: &mut [u8]) -> CryptoResult<()> {
        getrandom::getrandom(dest).map_err(|e| CryptoError::RandomSource(e.to_string()))
    }
}
