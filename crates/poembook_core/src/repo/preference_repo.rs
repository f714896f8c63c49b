//! Preference repository contract and SQLite implementation.
//!
//! # Invariants
//! - Keys are non-blank after trim.
//! - `set` is an upsert; the last write wins.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for preference reads and writes.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidKey(String),
    /// Value could not be encoded for storage.
    InvalidValue(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidKey(key) => write!(f, "invalid preference key: `{key}`"),
            Self::InvalidValue(message) => write!(f, "invalid preference value: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidKey(_) | Self::InvalidValue(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Key-value store for raw preference values.
pub trait PreferenceRepository {
    /// Returns the stored raw value for `key`.
    fn get(&self, key: &str) -> RepoResult<Option<String>>;
    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> RepoResult<()>;
    /// Removes `key`; returns whether a value existed.
    fn remove(&self, key: &str) -> RepoResult<bool>;
}

/// SQLite-backed preference repository.
pub struct SqlitePreferenceRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePreferenceRepository<'conn> {
    /// Wraps a connection returned by [`crate::db::open_db`].
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl PreferenceRepository for SqlitePreferenceRepository<'_> {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        let key = normalize_key(key)?;
        let value = self
            .conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1;",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> RepoResult<()> {
        let key = normalize_key(key)?;
        self.conn.execute(
            "INSERT INTO preferences (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> RepoResult<bool> {
        let key = normalize_key(key)?;
        let changed = self
            .conn
            .execute("DELETE FROM preferences WHERE key = ?1;", params![key])?;
        Ok(changed > 0)
    }
}

fn normalize_key(key: &str) -> RepoResult<&str> {
    let trimmed = key.trim();
    if trimmed.is_empty() {
        return Err(RepoError::InvalidKey(key.to_string()));
    }
    Ok(trimmed)
}
