//! The `PostStore` trait and its DuckDB implementation.

use crate::error::StorageResult;
use duckdb::{params, Connection};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// One stored post. Text fields only: the envelope and public key are
/// already transport-encoded, and no private key ever appears here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    pub id: String,
    pub envelope: String,
    pub public_key: String,
}

/// Backing store for post records.
///
/// `store` upserts by id. `fetch` returns `Ok(None)` for an unknown id;
/// errors are reserved for the store itself failing.
pub trait PostStore: Send + Sync {
    fn store(&self, record: &PostRecord) -> StorageResult<()>;
    fn fetch(&self, id: &str) -> StorageResult<Option<PostRecord>>;
    fn list_ids(&self) -> StorageResult<Vec<String>>;
}

/// DuckDB-backed post store.
#[derive(Clone)]
pub struct DuckDbPostStore {
    conn: Arc<Mutex<Connection>>,
}

impl DuckDbPostStore {
    /// Opens or creates a post store at the given path.
    pub fn open(path: &Path) -> StorageResult<Self> {
        let conn = open_database(path)?;
        initialize_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Opens an in-memory post store (for testing).
    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

impl PostStore for DuckDbPostStore {
    fn store(&self, record: &PostRecord) -> StorageResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR REPLACE INTO posts (id, envelope, public_key) VALUES (?, ?, ?)",
            params![record.id, record.envelope, record.public_key],
        )?;
        debug!("stored post {}", record.id);
        Ok(())
    }

    fn fetch(&self, id: &str) -> StorageResult<Option<PostRecord>> {
        let conn = self.conn.lock().unwrap();
        let result = conn.query_row(
            "SELECT id, envelope, public_key FROM posts WHERE id = ?",
            params![id],
            |row| {
                Ok(PostRecord {
                    id: row.get(0)?,
                    envelope: row.get(1)?,
                    public_key: row.get(2)?,
                })
            },
        );

        match result {
            Ok(record) => Ok(Some(record)),
            Err(duckdb::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn list_ids(&self) -> StorageResult<Vec<String>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT id FROM posts ORDER BY id")?;
        let ids = stmt
            .query_map(params![], |row| row.get::<_, String>(0))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(ids)
    }
}

fn initialize_schema(conn: &Connection) -> StorageResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS posts (
            id TEXT PRIMARY KEY,
            envelope TEXT NOT NULL,
            public_key TEXT NOT NULL
        );",
    )?;
    Ok(())
}

/// Open the backing database, recovering from a stale WAL: if the first
/// open fails and a `.wal` file sits next to the database (an unclean
/// shutdown leaves one behind), remove it and retry once.
fn open_database(path: &Path) -> StorageResult<Connection> {
    let conn = match Connection::open(path) {
        Ok(c) => c,
        Err(first_err) => {
            let wal = wal_path(path);
            if !wal.exists() || std::fs::remove_file(&wal).is_err() {
                return Err(first_err.into());
            }
            warn!("open failed, removed stale WAL, retrying: {}", wal.display());
            Connection::open(path)?
        }
    };
    // Post records are tiny; keep DuckDB from claiming its default ~80% of RAM
    conn.execute_batch("PRAGMA memory_limit='128MB'; PRAGMA threads=2;")?;
    Ok(conn)
}

fn wal_path(path: &Path) -> PathBuf {
    match path.extension() {
        Some(ext) => path.with_extension(format!("{}.wal", ext.to_string_lossy())),
        None => path.with_extension("wal"),
    }
}
