//! Key/value document cache contracts and SQLite implementation.
//!
//! # Responsibility
//! - Store the serialized portfolio document under a fixed key, the way a
//!   browser keeps it in local storage.
//! - Expose a per-key revision counter so listeners can detect changes.
//!
//! # Invariants
//! - Every successful `write` or effective `remove` bumps the key revision.
//! - The stored value is opaque text; validation belongs to callers.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default cache key for the portfolio document.
pub const DEFAULT_CACHE_KEY: &str = "folio-portfolio-data";

pub type CacheResult<T> = Result<T, CacheError>;

/// Cache storage failure.
#[derive(Debug)]
pub enum CacheError {
    Db(DbError),
    EmptyKey,
}

impl Display for CacheError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::EmptyKey => write!(f, "cache key cannot be empty"),
        }
    }
}

impl Error for CacheError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::EmptyKey => None,
        }
    }
}

impl From<DbError> for CacheError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for CacheError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage contract for cached documents.
pub trait DocumentCache {
    /// Returns the stored text for `key`, if any.
    fn read(&self, key: &str) -> CacheResult<Option<String>>;
    /// Stores `value` under `key` and returns the new revision.
    fn write(&self, key: &str, value: &str) -> CacheResult<u64>;
    /// Removes `key`. Returns whether an entry existed.
    fn remove(&self, key: &str) -> CacheResult<bool>;
    /// Current revision of `key`; `0` when never written.
    fn revision(&self, key: &str) -> CacheResult<u64>;
}

impl<T: DocumentCache + ?Sized> DocumentCache for &T {
    fn read(&self, key: &str) -> CacheResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> CacheResult<u64> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> CacheResult<bool> {
        (**self).remove(key)
    }

    fn revision(&self, key: &str) -> CacheResult<u64> {
        (**self).revision(key)
    }
}

/// SQLite-backed document cache.
pub struct SqliteDocumentCache<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDocumentCache<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn bump_revision(conn: &Connection, key: &str) -> CacheResult<u64> {
        conn.execute(
            "INSERT INTO cache_revisions (key, revision) VALUES (?1, 1)
             ON CONFLICT(key) DO UPDATE SET revision = revision + 1;",
            [key],
        )?;
        let revision: i64 = conn.query_row(
            "SELECT revision FROM cache_revisions WHERE key = ?1;",
            [key],
            |row| row.get(0),
        )?;
        Ok(u64::try_from(revision).unwrap_or(0))
    }
}

impl DocumentCache for SqliteDocumentCache<'_> {
    fn read(&self, key: &str) -> CacheResult<Option<String>> {
        require_key(key)?;
        let value = self
            .conn
            .query_row(
                "SELECT value FROM cache_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write(&self, key: &str, value: &str) -> CacheResult<u64> {
        require_key(key)?;
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO cache_entries (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        let revision = Self::bump_revision(&tx, key)?;
        tx.commit()?;
        Ok(revision)
    }

    fn remove(&self, key: &str) -> CacheResult<bool> {
        require_key(key)?;
        let tx = self.conn.unchecked_transaction()?;
        let removed = tx.execute("DELETE FROM cache_entries WHERE key = ?1;", [key])?;
        if removed > 0 {
            Self::bump_revision(&tx, key)?;
        }
        tx.commit()?;
        Ok(removed > 0)
    }

    fn revision(&self, key: &str) -> CacheResult<u64> {
        require_key(key)?;
        let revision = self
            .conn
            .query_row(
                "SELECT revision FROM cache_revisions WHERE key = ?1;",
                [key],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        Ok(revision.map_or(0, |value| u64::try_from(value).unwrap_or(0)))
    }
}

fn require_key(key: &str) -> CacheResult<()> {
    if key.trim().is_empty() {
        return Err(CacheError::EmptyKey);
    }
    Ok(())
}
