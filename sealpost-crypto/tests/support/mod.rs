//! Shared test fixtures: deterministic and failing entropy sources.

use sealpost_crypto::{CryptoError, CryptoResult, EntropySource};
use std::sync::Mutex;

/// Deterministic entropy: fills from a seeded xorshift stream so repeated
/// runs produce identical keys and ivs.
pub struct SeededEntropy {
    state: Mutex<u64>,
}

impl SeededEntropy {
    /// `seed` must be nonzero (xorshift has a fixed point at zero).
    pub fn new(seed: u64) -> Self {
        assert_ne!(seed, 0, "xorshift seed must be nonzero");
        Self {
            state: Mutex::new(seed),
        }
    }
}

impl EntropySource for SeededEntropy {
    fn fill(&self, dest: &mut [u8]) -> CryptoResult<()> {
        let mut state = self.state.lock().unwrap();
        for byte in dest.iter_mut() {
            *state ^= *state << 13;
            *state ^= *state >> 7;
            *state ^= *state << 17;
            *byte = (*state & 0xFF) as u8;
        }
        Ok(())
    }
}

/// Entropy source that always fails, for exercising the random-source
/// error path.
pub struct FailingEntropy;

impl EntropySource for FailingEntropy {
    fn fill(&self, _dest: &mut [u8]) -> CryptoResult<()> {
        Err(CryptoError::RandomSource("entropy exhausted".to_string()))
    }
}
