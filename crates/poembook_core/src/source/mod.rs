//! Collection loading from a static site.
//!
//! # Responsibility
//! - Fetch the raw poems/poets collections from a directory or over HTTP.
//! - Decode collections leniently into domain records.
//! - Run both loads concurrently and hand back one [`Catalog`].
//!
//! # Invariants
//! - A failed load of either collection fails the whole catalog load; there
//!   is no retry and no partial-data fallback.
//! - Per-record defects never fail a load; bad records are skipped and logged.

mod dir;
mod http;

pub use dir::DirSource;
pub use http::{HttpSource, DEFAULT_REQUEST_TIMEOUT};

use crate::model::catalog::Catalog;
use crate::model::poem::Poem;
use crate::model::poet::Poet;
use async_trait::async_trait;
use log::{error, info, warn};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Default path of the poems collection relative to the site root.
pub const DEFAULT_POEMS_PATH: &str = "data/poems.json";
/// Default path of the poets collection relative to the site root.
pub const DEFAULT_POETS_PATH: &str = "data/poets.json";

pub type FetchResult<T> = Result<T, FetchError>;

/// Collection load failure. Fatal to startup.
#[derive(Debug)]
pub enum FetchError {
    /// Local file could not be read.
    Io {
        path: String,
        source: std::io::Error,
    },
    /// Request could not be sent or the body could not be read.
    Transport {
        path: String,
        source: reqwest::Error,
    },
    /// Server answered with a non-success status.
    Status { path: String, status: u16 },
    /// Body is not a JSON array of records.
    Decode { path: String, message: String },
}

impl FetchError {
    /// Collection path that failed.
    pub fn path(&self) -> &str {
        match self {
            Self::Io { path, .. }
            | Self::Transport { path, .. }
            | Self::Status { path, .. }
            | Self::Decode { path, .. } => path,
        }
    }

    /// Stable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "fetch_io",
            Self::Transport { .. } => "fetch_transport",
            Self::Status { .. } => "fetch_status",
            Self::Decode { .. } => "fetch_decode",
        }
    }
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "failed to read `{path}`: {source}"),
            Self::Transport { path, source } => write!(f, "failed to fetch `{path}`: {source}"),
            Self::Status { path, status } => {
                write!(f, "failed to fetch `{path}`: HTTP status {status}")
            }
            Self::Decode { path, message } => write!(f, "invalid collection `{path}`: {message}"),
        }
    }
}

impl Error for FetchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Transport { source, .. } => Some(source),
            Self::Status { .. } | Self::Decode { .. } => None,
        }
    }
}

/// Fetches raw collection documents by site-relative path.
#[async_trait]
pub trait CollectionSource: Send + Sync {
    /// Returns the raw body of the collection at `path`.
    async fn fetch_collection(&self, path: &str) -> FetchResult<String>;

    /// Short description for log events (no credentials).
    fn describe(&self) -> String;
}

/// Site-relative locations of the two collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionPaths {
    pub poems: String,
    pub poets: String,
}

impl Default for CollectionPaths {
    fn default() -> Self {
        Self {
            poems: DEFAULT_POEMS_PATH.to_string(),
            poets: DEFAULT_POETS_PATH.to_string(),
        }
    }
}

/// Loads both collections concurrently and builds the session catalog.
///
/// # Errors
/// - Returns the first [`FetchError`] from either collection.
pub async fn load_catalog<S>(source: &S, paths: &CollectionPaths) -> FetchResult<Catalog>
where
    S: CollectionSource + ?Sized,
{
    let started_at = Instant::now();
    info!(
        "event=catalog_load module=source status=start source={}",
        source.describe()
    );

    let loaded = tokio::try_join!(
        source.fetch_collection(&paths.poems),
        source.fetch_collection(&paths.poets),
    )
    .and_then(|(poems_raw, poets_raw)| {
        let poems = decode_poems(&paths.poems, &poems_raw)?;
        let poets = decode_poets(&paths.poets, &poets_raw)?;
        Ok((poems, poets))
    });

    match loaded {
        Ok((poems, poets)) => {
            info!(
                "event=catalog_load module=source status=ok duration_ms={} poems={} poets={}",
                started_at.elapsed().as_millis(),
                poems.len(),
                poets.len()
            );
            Ok(Catalog::new(poems, poets))
        }
        Err(err) => {
            error!(
                "event=catalog_load module=source status=error duration_ms={} error_code={} path={} error={}",
                started_at.elapsed().as_millis(),
                err.code(),
                err.path(),
                err
            );
            Err(err)
        }
    }
}

/// Decodes a poems collection document.
pub fn decode_poems(path: &str, raw: &str) -> FetchResult<Vec<Poem>> {
    decode_records(path, raw, Poem::from_json)
}

/// Decodes a poets collection document.
pub fn decode_poets(path: &str, raw: &str) -> FetchResult<Vec<Poet>> {
    decode_records(path, raw, Poet::from_json)
}

fn decode_records<T>(path: &str, raw: &str, decode: fn(&Value) -> Option<T>) -> FetchResult<Vec<T>> {
    let document: Value = serde_json::from_str(raw).map_err(|err| FetchError::Decode {
        path: path.to_string(),
        message: err.to_string(),
    })?;
    let Value::Array(items) = document else {
        return Err(FetchError::Decode {
            path: path.to_string(),
            message: "expected a JSON array of records".to_string(),
        });
    };

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match decode(item) {
            Some(record) => records.push(record),
            None => warn!(
                "event=record_skip module=source status=miss path={} index={}",
                path, index
            ),
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::{decode_poems, decode_poets, FetchError};

    #[test]
    fn decode_skips_records_without_ids_and_keeps_order() {
        let poems = decode_poems(
            "data/poems.json",
            r#"[{"id": 2, "title": "B"}, {"title": "no id"}, 7, {"id": "1", "title": "A"}]"#,
        )
        .unwrap();
        let ids: Vec<&str> = poems.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[test]
    fn decode_rejects_non_array_documents() {
        let err = decode_poets("data/poets.json", r#"{"id": 1}"#).unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));
        assert_eq!(err.path(), "data/poets.json");

        let err = decode_poets("data/poets.json", "not json").unwrap_err();
        assert_eq!(err.code(), "fetch_decode");
    }
}
