//! Hybrid public-key encryption for Sealpost.
//!
//! Provides per-post encryption using:
//! - X25519 for key agreement (one ephemeral keypair per seal)
//! - HKDF-SHA256 to bind the shared point to an AEAD key
//! - ChaCha20-Poly1305 for authenticated encryption
//!
//! # Architecture
//!
//! Every post gets its own recipient keypair; there is no key registry,
//! and "identity" is simply possession of a private key. Sealing generates
//! a second, single-use ephemeral keypair, derives a symmetric key from the
//! ECDH shared secret, and packs `{iv, ephemeral public key, ciphertext}`
//! into a self-contained base64 envelope. Opening reverses it with the
//! recipient's private key; by ECDH symmetry both sides derive the same
//! symmetric key.
//!
//! Each seal/open call is atomic and stateless. Ephemeral secrets and
//! derived keys never outlive the call that created them, on success or
//! failure. Randomness comes from an injectable [`EntropySource`] so tests
//! can run the whole scheme deterministically.

mod entropy;
mod envelope;
mod error;
mod keypair;

pub use entropy::{EntropySource, OsEntropy};
pub use envelope::{open, seal, seal_with_entropy, SealedEnvelope, IV_SIZE, TAG_SIZE};
pub use error::{CryptoError, CryptoResult};
pub use keypair::{
    generate_keypair, generate_keypair_with, import_private, import_public, PostKeyPair, KEY_SIZE,
};
