//! Browse controller: session state plus command dispatch.
//!
//! # Responsibility
//! - Own the loaded catalog and the mutable UI state for one session.
//! - Turn [`BrowseCommand`]s into recomputed views pushed to a [`RenderSink`].
//!
//! # Invariants
//! - Views are recomputed from the full catalog on every command.
//! - Selecting an unknown id changes nothing and renders nothing.
//! - The active tag is `None` or a label present in the tag counts.
//! - After startup on a non-empty catalog, the newest poem is selected.

use crate::model::catalog::Catalog;
use crate::model::poem::{Poem, PoemId};
use crate::render::{detail_view, list_entries, tag_controls, RenderSink};
use crate::search::filter::{apply_filters, BrowseQuery, SortMode};
use crate::search::selection::{find_poem, find_poet};
use crate::search::tags::{aggregate_tags, TagCounts};
use crate::source::{load_catalog, CollectionPaths, CollectionSource, FetchResult};
use log::{debug, info};

/// User intent dispatched to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    /// Free-text search input changed.
    SetQuery(String),
    /// Tag button clicked; `None` is "All".
    SetTag(Option<String>),
    /// Sort option changed.
    SetSort(SortMode),
    /// List row clicked; id as free text.
    Select(String),
}

/// Mutable session state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowseState {
    pub query: BrowseQuery,
    pub selected_id: Option<PoemId>,
}

/// Session controller over one catalog and one render sink.
pub struct BrowseController<S: RenderSink> {
    catalog: Catalog,
    tag_counts: TagCounts,
    state: BrowseState,
    sink: S,
}

impl<S: RenderSink> BrowseController<S> {
    /// Loads both collections and performs the initial render.
    ///
    /// # Errors
    /// - On load failure the sink receives `render_load_failure` and the
    ///   error is returned; no list is rendered.
    pub async fn start<C>(source: &C, paths: &CollectionPaths, mut sink: S) -> FetchResult<Self>
    where
        C: CollectionSource + ?Sized,
    {
        match load_catalog(source, paths).await {
            Ok(catalog) => Ok(Self::from_catalog(catalog, sink)),
            Err(err) => {
                sink.render_load_failure(&err);
                Err(err)
            }
        }
    }

    /// Performs the initial render over an already loaded catalog.
    pub fn from_catalog(catalog: Catalog, sink: S) -> Self {
        let tag_counts = aggregate_tags(catalog.poems());
        let mut controller = Self {
            catalog,
            tag_counts,
            state: BrowseState::default(),
            sink,
        };

        controller.render_tags();
        controller.render_list();
        let first_id = controller.view().first().map(|poem| poem.id.to_string());
        if let Some(first_id) = first_id {
            controller.select(&first_id);
        }

        info!(
            "event=browse_start module=service status=ok poems={} tags={} selected={}",
            controller.catalog.poems().len(),
            controller.tag_counts.entries().len(),
            controller.state.selected_id.is_some()
        );
        controller
    }

    /// Applies one command and re-renders the affected views.
    pub fn dispatch(&mut self, command: BrowseCommand) {
        match command {
            BrowseCommand::SetQuery(text) => {
                self.state.query.text = text;
                self.render_list();
            }
            BrowseCommand::SetTag(tag) => {
                self.state.query.active_tag = self.known_tag(tag);
                self.render_tags();
                self.render_list();
            }
            BrowseCommand::SetSort(sort) => {
                self.state.query.sort = sort;
                self.render_list();
            }
            BrowseCommand::Select(id) => {
                self.select(&id);
            }
        }
    }

    /// Re-renders tag bar, list and, when a poem is selected, the detail pane.
    pub fn refresh(&mut self) {
        self.render_tags();
        self.render_list();
        if let Some(poem) = self.selected_poem() {
            let poet = find_poet(self.catalog.poets(), poem.poet_id.as_ref());
            let detail = detail_view(poem, poet);
            self.sink.render_detail(&detail);
        }
    }

    /// Current filtered and sorted list.
    pub fn view(&self) -> Vec<&Poem> {
        apply_filters(self.catalog.poems(), &self.state.query)
    }

    pub fn state(&self) -> &BrowseState {
        &self.state
    }

    pub fn tag_counts(&self) -> &TagCounts {
        &self.tag_counts
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Currently selected poem, if any.
    pub fn selected_poem(&self) -> Option<&Poem> {
        let selected = self.state.selected_id.as_ref()?;
        find_poem(self.catalog.poems(), selected.as_str())
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Labels missing from the tag bar clear the filter.
    fn known_tag(&self, tag: Option<String>) -> Option<String> {
        match tag {
            Some(label) if self.tag_counts.count(&label) == 0 => {
                debug!("event=set_tag module=service status=miss");
                None
            }
            other => other,
        }
    }

    fn select(&mut self, id: &str) {
        let Some(poem) = find_poem(self.catalog.poems(), id) else {
            debug!("event=select module=service status=miss");
            return;
        };

        let poet = find_poet(self.catalog.poets(), poem.poet_id.as_ref());
        let detail = detail_view(poem, poet);
        self.state.selected_id = Some(poem.id.clone());
        self.sink.render_detail(&detail);
        self.render_list();
    }

    fn render_tags(&mut self) {
        let controls = tag_controls(&self.tag_counts, self.state.query.active_tag.as_deref());
        self.sink.render_tags(&controls);
    }

    fn render_list(&mut self) {
        let view = apply_filters(self.catalog.poems(), &self.state.query);
        let entries = list_entries(&view, self.state.selected_id.as_ref());
        self.sink.render_list(&entries);
    }
}
