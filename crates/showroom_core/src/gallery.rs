//! Filtered media gallery: facet filters and the paginated visible window
//!
//! The engine holds the full record collection fetched once per session,
//! derives the facet-filtered order in a single pass preserving source
//! order, and exposes a visible prefix that only grows until the facet
//! selection changes.

use crate::config::GalleryConfig;
use crate::source::{FetchError, RecordSource};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable media record identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(pub String);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One media record from the external collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaRecord {
    pub id: RecordId,
    pub title: String,
    /// Category facet ("Kitchen", "Living", ...)
    pub room: String,
    /// Style facet ("Modern", "Traditional", ...)
    pub style: String,
    pub image: String,
    #[serde(default)]
    pub extra_images: Vec<String>,
}

/// Active facet selection. `None` on a facet means "match all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetFilters {
    pub room: Option<String>,
    pub style: Option<String>,
}

impl FacetFilters {
    /// Facet values compare case-insensitively.
    pub fn matches(&self, record: &MediaRecord) -> bool {
        let facet_eq = |want: &Option<String>, have: &str| match want {
            Some(v) => v.eq_ignore_ascii_case(have),
            None => true,
        };
        facet_eq(&self.room, &record.room) && facet_eq(&self.style, &record.style)
    }

    pub fn is_match_all(&self) -> bool {
        self.room.is_none() && self.style.is_none()
    }
}

/// Where the record collection stands with respect to the external source
#[derive(Debug, Clone)]
pub enum FetchState {
    /// Nothing requested yet
    NotLoaded,
    /// Collection fetched and usable
    Ready,
    /// Last fetch failed; retry re-invokes the source
    Failed(FetchError),
}

/// Facet filtering and pagination over the media record collection
pub struct RecordFilterEngine {
    records: Vec<MediaRecord>,
    fetch: FetchState,
    filters: FacetFilters,
    /// Indices into `records` matching the current facets, in source order
    filtered: Vec<usize>,
    visible: usize,
    page_size: usize,
    page_step: usize,
}

impl RecordFilterEngine {
    pub fn new(config: &GalleryConfig) -> Self {
        Self {
            records: Vec::new(),
            fetch: FetchState::NotLoaded,
            filters: FacetFilters::default(),
            filtered: Vec::new(),
            visible: 0,
            page_size: config.page_size,
            page_step: config.page_step,
        }
    }

    /// Fetch the collection for the first time this session.
    ///
    /// Failure is not an `Err`: the engine enters `FetchState::Failed`,
    /// distinct from "filtered to zero", and stays usable.
    pub fn load_from(&mut self, source: &dyn RecordSource) {
        match source.fetch_records() {
            Ok(records) => {
                tracing::info!(count = records.len(), "record collection loaded");
                self.records = records;
                self.fetch = FetchState::Ready;
                self.recompute();
            }
            Err(e) => {
                tracing::warn!(error = %e, "record fetch failed");
                self.records.clear();
                self.filtered.clear();
                self.visible = 0;
                self.fetch = FetchState::Failed(e);
            }
        }
    }

    /// Re-invoke the source after a failed fetch
    pub fn retry(&mut self, source: &dyn RecordSource) {
        self.load_from(source);
    }

    /// Replace the collection wholesale, keeping the current facet
    /// selection and resetting the visible window.
    pub fn refresh(&mut self, source: &dyn RecordSource) {
        self.load_from(source);
    }

    /// Replace the active facet selection and recompute atomically
    pub fn set_filter(&mut self, room: Option<String>, style: Option<String>) {
        self.filters = FacetFilters { room, style };
        self.recompute();
    }

    /// Change the category facet, keeping the style facet
    pub fn set_room(&mut self, room: Option<String>) {
        self.filters.room = room;
        self.recompute();
    }

    /// Change the style facet, keeping the category facet
    pub fn set_style(&mut self, style: Option<String>) {
        self.filters.style = style;
        self.recompute();
    }

    /// Clear filters to "match all" and re-derive from the collection
    pub fn reset(&mut self) {
        self.filters = FacetFilters::default();
        self.recompute();
    }

    /// Extend the visible window by one page step.
    ///
    /// Idempotent once exhausted; always safe to call, including after a
    /// failed fetch. Returns whether the window actually grew.
    pub fn load_more(&mut self) -> bool {
        if self.exhausted() {
            tracing::debug!("load_more ignored: collection exhausted");
            return false;
        }
        let before = self.visible;
        self.visible = (self.visible + self.page_step).min(self.filtered.len());
        self.visible != before
    }

    /// The first `visible_count` records of the filtered order
    pub fn visible_records(&self) -> Vec<&MediaRecord> {
        self.filtered[..self.visible]
            .iter()
            .map(|&i| &self.records[i])
            .collect()
    }

    /// Look up a visible-or-not record by id
    pub fn record(&self, id: &RecordId) -> Option<&MediaRecord> {
        self.records.iter().find(|r| &r.id == id)
    }

    /// True iff every record matching the current facets is visible.
    ///
    /// Never true before a successful fetch, so "no data yet / failed"
    /// stays distinguishable from "filtered to zero".
    pub fn exhausted(&self) -> bool {
        matches!(self.fetch, FetchState::Ready) && self.visible == self.filtered.len()
    }

    pub fn fetch_state(&self) -> &FetchState {
        &self.fetch
    }

    pub fn filters(&self) -> &FacetFilters {
        &self.filters
    }

    pub fn visible_count(&self) -> usize {
        self.visible
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered.len()
    }

    /// Single pass over the collection in source order; the visible window
    /// resets together with the new order, so no frame can blend old and
    /// new filtered sets.
    fn recompute(&mut self) {
        self.filtered = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| self.filters.matches(r))
            .map(|(i, _)| i)
            .collect();
        self.visible = self.page_size.min(self.filtered.len());
    }
}
