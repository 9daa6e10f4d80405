//! Post record storage for Sealpost.
//!
//! Persists sealed posts as text-only records: post id, envelope text,
//! recipient public key text. Nothing stored here can decrypt anything;
//! plaintext and private keys never reach this layer.
//!
//! The default backend is DuckDB. Records are opaque to the store; the id
//! is caller-supplied and compared only for equality.

mod error;
mod post_store;

pub use error::{StorageError, StorageResult};
pub use post_store::{DuckDbPostStore, PostRecord, PostStore};
