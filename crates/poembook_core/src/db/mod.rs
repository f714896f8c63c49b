//! SQLite bootstrap for the preference store.
//!
//! # Responsibility
//! - Open and configure SQLite connections.
//! - Apply schema migrations before any preference is read or written.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Poem and poet data is never written here.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};
pub use rusqlite::Connection;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// Parent directory of the database file could not be created.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The file was migrated by a newer binary.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Io { path, source } => {
                write!(f, "failed to create `{}`: {source}", path.display())
            }
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "preference store schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Io { source, .. } => Some(source),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
