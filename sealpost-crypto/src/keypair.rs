//! Per-post keypair generation and transport-safe key encoding.
//!
//! Keys live on X25519, the one curve fixed for the whole system. Both
//! halves travel as base64 over their raw 32-byte encodings, and
//! `import(export(k)) == k` for every valid key.

use crate::entropy::{EntropySource, OsEntropy};
use crate::error::{CryptoError, CryptoResult};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use x25519_dalek::{PublicKey, StaticSecret};

/// Raw size of both key halves (X25519 point / scalar).
pub const KEY_SIZE: usize = 32;

/// X25519 keypair for a single post.
///
/// The secret half zeroizes on drop (from x25519-dalek). The crate keeps
/// no copy of either half once the creation flow returns.
pub struct PostKeyPair {
    pub secret: StaticSecret,
    pub public: PublicKey,
}

impl PostKeyPair {
    /// Returns the public key as a raw 32-byte array.
    pub fn public_bytes(&self) -> [u8; KEY_SIZE] {
        *self.public.as_bytes()
    }

    /// Returns the secret key as a raw 32-byte array.
    pub fn secret_bytes(&self) -> [u8; KEY_SIZE] {
        self.secret.to_bytes()
    }

    /// Reconstructs a keypair from raw secret key bytes.
    pub fn from_secret_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        let secret = StaticSecret::from(bytes);
        let public = PublicKey::from(&secret);
        Self { secret, public }
    }

    /// Exports the public key as base64 text.
    pub fn export_public(&self) -> String {
        BASE64.encode(self.public.as_bytes())
    }

    /// Exports the private key as base64 text.
    pub fn export_private(&self) -> String {
        BASE64.encode(self.secret.to_bytes())
    }
}

/// Generates a fresh post keypair from OS entropy.
pub fn generate_keypair() -> CryptoResult<PostKeyPair> {
    generate_keypair_with(&OsEntropy)
}

/// Generates a fresh post keypair from the given entropy source.
pub fn generate_keypair_with(entropy: &dyn EntropySource) -> CryptoResult<PostKeyPair> {
    let mut seed = [0u8; KEY_SIZE];
    entropy.fill(&mut seed)?;
    Ok(PostKeyPair::from_secret_bytes(seed))
}

/// Imports a public key from base64 text.
///
/// Rejects input that is not valid base64 over exactly 32 bytes, and the
/// all-zero identity encoding. Low-order points that survive this check
/// are caught at agreement time, before any ciphertext is touched.
pub fn import_public(encoded: &str) -> CryptoResult<PublicKey> {
    let bytes = decode_key_bytes(encoded, "public")?;
    public_key_from_bytes(bytes)
}

/// Imports a private key from base64 text.
pub fn import_private(encoded: &str) -> CryptoResult<StaticSecret> {
    let bytes = decode_key_bytes(encoded, "private")?;
    Ok(StaticSecret::from(bytes))
}

/// Validates raw public key bytes. Shared by text import and envelope
/// decode so embedded ephemeral keys go through the same rejection.
pub(crate) fn public_key_from_bytes(bytes: [u8; KEY_SIZE]) -> CryptoResult<PublicKey> {
    if bytes == [0u8; KEY_SIZE] {
        return Err(CryptoError::KeyFormat(
            "public key is the identity point".to_string(),
        ));
    }
    Ok(PublicKey::from(bytes))
}

fn decode_key_bytes(encoded: &str, which: &str) -> CryptoResult<[u8; KEY_SIZE]> {
    let bytes = BASE64
        .decode(encoded.trim())
        .map_err(|e| CryptoError::KeyFormat(format!("{which} key is not valid base64: {e}")))?;
    bytes.try_into().map_err(|rejected: Vec<u8>| {
        CryptoError::KeyFormat(format!(
            "{which} key must be {KEY_SIZE} bytes, got {}",
            rejected.len()
        ))
    })
}
