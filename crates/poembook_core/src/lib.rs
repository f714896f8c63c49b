//! Core browsing logic for PoemBook.
//! Loads the poem site's collections and drives list/detail views from them.

pub mod db;
pub mod logging;
pub mod model;
pub mod render;
pub mod repo;
pub mod search;
pub mod service;
pub mod source;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::catalog::Catalog;
pub use model::poem::{parse_tags, Poem, PoemBody, PoemId};
pub use model::poet::{Poet, PoetId};
pub use model::preference::{FontKey, Theme};
pub use model::RecordId;
pub use render::text::TextRenderer;
pub use render::{DetailView, ListEntry, PoetCard, RenderSink, TagControl};
pub use repo::preference_repo::{PreferenceRepository, RepoError, SqlitePreferenceRepository};
pub use search::filter::{apply_filters, BrowseQuery, SortMode};
pub use search::selection::{find_poem, find_poet, PoetLookup};
pub use search::tags::{aggregate_tags, TagCount, TagCounts, UNCATEGORIZED_TAG};
pub use service::browse_service::{BrowseCommand, BrowseController, BrowseState};
pub use service::preference_service::PreferenceService;
pub use source::{
    load_catalog, CollectionPaths, CollectionSource, DirSource, FetchError, HttpSource,
    DEFAULT_REQUEST_TIMEOUT,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
