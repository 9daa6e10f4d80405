//! One-shot hybrid envelope encryption.
//!
//! Sealing generates an ephemeral X25519 keypair, derives a symmetric key
//! from the ECDH shared secret via HKDF-SHA256, and encrypts with
//! ChaCha20-Poly1305 under a fresh 12-byte iv. The envelope embeds the
//! ephemeral public key so the recipient can reconstruct the shared
//! secret.
//!
//! Wire format: base64 over a JSON record of base64 fields,
//! `{iv, ephemeral_public_key, ciphertext}`, where the ciphertext carries
//! the 16-byte Poly1305 tag appended.

use crate::entropy::{EntropySource, OsEntropy};
use crate::error::{CryptoError, CryptoResult};
use crate::keypair::{self, KEY_SIZE};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{ChaCha20Poly1305, Key, Nonce};
use hkdf::Hkdf;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use x25519_dalek::SharedSecret;
use zeroize::Zeroize;

/// Size of the AEAD iv.
pub const IV_SIZE: usize = 12;
/// Size of the Poly1305 authentication tag appended to the ciphertext.
pub const TAG_SIZE: usize = 16;

/// Domain separation string for HKDF.
const HKDF_INFO: &[u8] = b"sealpost-envelope-v1";

/// A sealed post envelope.
///
/// Self-contained: together with the recipient's private key this is
/// everything needed to recover the plaintext.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SealedEnvelope {
    /// AEAD iv, drawn fresh per seal. A (key, iv) pair is never reused.
    pub iv: [u8; IV_SIZE],
    /// Ephemeral X25519 public key (sender side of DH).
    pub ephemeral_public_key: [u8; KEY_SIZE],
    /// ChaCha20-Poly1305 ciphertext with the tag appended.
    pub ciphertext: Vec<u8>,
}

/// Text form of the envelope: every binary field as base64.
#[derive(Serialize, Deserialize)]
struct EnvelopeWire {
    iv: String,
    ephemeral_public_key: String,
    ciphertext: String,
}

impl SealedEnvelope {
    /// Encodes the envelope as transport-safe text.
    pub fn encode(&self) -> String {
        let wire = EnvelopeWire {
            iv: BASE64.encode(self.iv),
            ephemeral_public_key: BASE64.encode(self.ephemeral_public_key),
            ciphertext: BASE64.encode(&self.ciphertext),
        };
        let json =
            serde_json::to_string(&wire).expect("record of plain strings always serializes");
        BASE64.encode(json)
    }

    /// Decodes envelope text, validating structure and field sizes.
    pub fn decode(text: &str) -> CryptoResult<Self> {
        let json = BASE64
            .decode(text.trim())
            .map_err(|e| CryptoError::EnvelopeFormat(format!("not valid base64: {e}")))?;
        let wire: EnvelopeWire = serde_json::from_slice(&json)
            .map_err(|e| CryptoError::EnvelopeFormat(format!("malformed record: {e}")))?;

        let iv = decode_sized(&wire.iv, "iv", IV_SIZE)?;
        let iv: [u8; IV_SIZE] = iv.try_into().expect("length checked above");

        let epk = decode_sized(&wire.ephemeral_public_key, "ephemeral public key", KEY_SIZE)?;
        let ephemeral_public_key: [u8; KEY_SIZE] = epk.try_into().expect("length checked above");

        let ciphertext = BASE64
            .decode(&wire.ciphertext)
            .map_err(|e| CryptoError::EnvelopeFormat(format!("ciphertext: {e}")))?;
        if ciphertext.len() < TAG_SIZE {
            return Err(CryptoError::EnvelopeFormat(format!(
                "ciphertext shorter than the {TAG_SIZE}-byte authentication tag"
            )));
        }

        Ok(Self {
            iv,
            ephemeral_public_key,
            ciphertext,
        })
    }
}

fn decode_sized(field: &str, name: &str, expected: usize) -> CryptoResult<Vec<u8>> {
    let bytes = BASE64
        .decode(field)
        .map_err(|e| CryptoError::EnvelopeFormat(format!("{name}: {e}")))?;
    if bytes.len() != expected {
        return Err(CryptoError::EnvelopeFormat(format!(
            "{name} must be {expected} bytes, got {}",
            bytes.len()
        )));
    }
    Ok(bytes)
}

/// Seals `plaintext` for the holder of `recipient_public` (base64 text),
/// returning envelope text. Uses OS entropy.
pub fn seal(plaintext: &[u8], recipient_public: &str) -> CryptoResult<String> {
    seal_with_entropy(&OsEntropy, plaintext, recipient_public)
}

/// Seals `plaintext` drawing the ephemeral key and iv from `entropy`.
///
/// The ephemeral secret and the derived symmetric key are scoped to this
/// call and cleared on every exit path.
pub fn seal_with_entropy(
    entropy: &dyn EntropySource,
    plaintext: &[u8],
    recipient_public: &str,
) -> CryptoResult<String> {
    let recipient = keypair::import_public(recipient_public)?;
    let ephemeral = keypair::generate_keypair_with(entropy)?;

    let shared = ephemeral.secret.diffie_hellman(&recipient);
    let mut key = derive_envelope_key(&shared)?;
    let cipher = ChaCha20Poly1305::new(Key::from_slice(&key));
    key.zeroize();

    let mut iv = [0u8; IV_SIZE];
    entropy.fill(&mut iv)?;

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&iv), plaintext)
        .map_err(|e| CryptoError::Encryption(format!("envelope seal failed: {e}")))?;

    let envelope = SealedEnvelope {
        iv,
        ephemeral_public_key: ephemeral.public_bytes(),
        ciphertext,
    };
    Ok(envelope.encode())
}

/// Opens envelope text with the recipient's private key (base64 text),
/// returning the plaintext bytes.
///
/// Authentication failure yields the uniform [`CryptoError::Decryption`]:
/// wrong key, tampered envelope, and corrupted data are indistinguishable.
pub fn open(envelope_text: &str, recipient_private: &str) -> CryptoResult<Vec<u8>> {
    let envelope = SealedEnvelope::decode(envelope_text)?;
    let secret = keypair::import_private(recipient_private)?;
    let ephemeral = keypair::public_key_from_bytes(envelope.ephemeral_public_key)?;

    let shared = secret.diffie_hellman(&ephemeral);
    let mut key = derive_envelope_key(&shared)?;
    let cipher = ChaCha20Poly1305::new(Key::from_slice(&key));
    key.zeroize();

    cipher
        .decrypt(Nonce::from_slice(&envelope.iv), envelope.ciphertext.as_ref())
        .map_err(|_| CryptoError::Decryption)
}

/// Binds the ECDH shared point to a 32-byte AEAD key.
///
/// Rejects non-contributory exchanges (a low-order public key forces an
/// all-zero shared secret) before any key material is derived. Both sides
/// of seal/open run this identically, so the derived keys agree.
fn derive_envelope_key(shared: &SharedSecret) -> CryptoResult<[u8; 32]> {
    if !shared.was_contributory() {
        return Err(CryptoError::KeyFormat(
            "public key yields a degenerate shared secret".to_string(),
        ));
    }
    let hk = Hkdf::<Sha256>::new(None, shared.as_bytes());
    let mut key = [0u8; 32];
    hk.expand(HKDF_INFO, &mut key)
        .expect("HKDF expand never fails for a 32-byte output");
    Ok(key)
}
