//! Post creation and reading.
//!
//! The two pure operations the UI calls, [`create_encrypted_post`] and
//! [`decrypt_post`], plus [`PostService`], which composes them with a
//! [`PostStore`] for publish/read flows. Key material and plaintext are
//! never logged.

use crate::error::{PostError, PostResult};
use sealpost_crypto::{generate_keypair, open, seal};
use sealpost_storage::{PostRecord, PostStore};
use std::sync::Arc;
use tracing::{debug, info};

/// Everything produced by creating an encrypted post.
///
/// The private key exists only in this value: it is never persisted and
/// must be shown to the author exactly once.
#[derive(Clone, Debug)]
pub struct CreatedPost {
    pub public_key: String,
    pub private_key: String,
    pub envelope: String,
}

/// Generates a fresh keypair and seals `plaintext` to it.
///
/// Nothing is stored; the caller decides what to do with the envelope and
/// where to surface the keys.
pub fn create_encrypted_post(plaintext: &str) -> PostResult<CreatedPost> {
    let keypair = generate_keypair()?;
    let envelope = seal(plaintext.as_bytes(), &keypair.export_public())?;
    Ok(CreatedPost {
        public_key: keypair.export_public(),
        private_key: keypair.export_private(),
        envelope,
    })
}

/// Opens envelope text with the given private key and decodes the content
/// as text.
pub fn decrypt_post(envelope: &str, private_key: &str) -> PostResult<String> {
    let plaintext = open(envelope, private_key)?;
    String::from_utf8(plaintext).map_err(|_| PostError::ContentEncoding)
}

/// Publishes and reads encrypted posts against a backing store.
pub struct PostService {
    store: Arc<dyn PostStore>,
}

impl PostService {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self { store }
    }

    /// Creates an encrypted post and stores it under `id`.
    ///
    /// The id is caller-supplied and opaque. The returned [`CreatedPost`]
    /// is the only copy of the private key.
    pub fn publish(&self, id: &str, plaintext: &str) -> PostResult<CreatedPost> {
        let created = create_encrypted_post(plaintext)?;
        self.store.store(&PostRecord {
            id: id.to_string(),
            envelope: created.envelope.clone(),
            public_key: created.public_key.clone(),
        })?;
        info!("published post {id} ({} bytes sealed)", plaintext.len());
        Ok(created)
    }

    /// Fetches the post stored under `id` and decrypts it.
    pub fn read(&self, id: &str, private_key: &str) -> PostResult<String> {
        let record = self
            .store
            .fetch(id)?
            .ok_or_else(|| PostError::NotFound(id.to_string()))?;
        let plaintext = decrypt_post(&record.envelope, private_key)?;
        debug!("decrypted post {id}");
        Ok(plaintext)
    }

    /// Lists the ids of all stored posts.
    pub fn list_post_ids(&self) -> PostResult<Vec<String>> {
        Ok(self.store.list_ids()?)
    }
}
