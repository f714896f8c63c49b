//! Collection source backed by a local site directory.

use super::{CollectionSource, FetchError, FetchResult};
use async_trait::async_trait;
use std::path::PathBuf;

/// Reads collections from files under a site root directory.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }
}

#[async_trait]
impl CollectionSource for DirSource {
    async fn fetch_collection(&self, path: &str) -> FetchResult<String> {
        tokio::fs::read_to_string(self.resolve(path))
            .await
            .map_err(|source| FetchError::Io {
                path: path.to_string(),
                source,
            })
    }

    fn describe(&self) -> String {
        format!("dir:{}", self.root.display())
    }
}
