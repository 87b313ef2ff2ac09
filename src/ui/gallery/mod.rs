// SPDX-License-Identifier: MPL-2.0
//! Gallery grid: a paged window over the aggregated records with keyword
//! search, a provider filter, and infinite-scroll expansion.
//!
//! Scroll triggering mirrors the original behavior: a page is revealed on
//! the second consecutive "near bottom" observation, and the counter resets
//! once the viewport moves far enough back up (hysteresis), so a single
//! scroll tick at the bottom edge cannot fire repeatedly.

mod view;

pub use view::{tile_grid, Tile};

use crate::providers::{MemeRecord, Provider};
use iced::widget::scrollable::Viewport;

/// Distance from the content bottom that counts as "near bottom".
pub const SCROLL_BOTTOM_THRESHOLD_PX: f32 = 100.0;

/// How far back above the threshold the viewport must move before the
/// near-bottom counter rearms.
pub const SCROLL_HYSTERESIS_PX: f32 = 200.0;

/// Consecutive near-bottom observations required to reveal a page.
pub const SCROLL_TRIGGER_COUNT: u8 = 2;

/// Provider filter choices for the toolbar dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderFilter {
    All,
    Only(Provider),
}

impl ProviderFilter {
    #[must_use]
    pub fn all() -> Vec<ProviderFilter> {
        let mut options = vec![ProviderFilter::All];
        options.extend(Provider::all().iter().map(|p| ProviderFilter::Only(*p)));
        options
    }

    fn matches(&self, record: &MemeRecord) -> bool {
        match self {
            ProviderFilter::All => true,
            ProviderFilter::Only(provider) => record.provider == *provider,
        }
    }
}

impl std::fmt::Display for ProviderFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderFilter::All => f.write_str("All sources"),
            ProviderFilter::Only(provider) => f.write_str(provider.label()),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    QueryChanged(String),
    SearchSubmitted,
    FilterSelected(ProviderFilter),
    LoadMore,
    Scrolled(Viewport),
    TileClicked(MemeRecord),
}

/// Events propagated to the parent application.
#[derive(Debug, Clone)]
pub enum Event {
    None,
    /// A tile was clicked; open the editor with this record.
    OpenRecord(MemeRecord),
    /// Fetch the unfiltered aggregate listing.
    RequestListing,
    /// Run a keyword search across all providers.
    RequestSearch(String),
}

/// Gallery component state.
#[derive(Debug)]
pub struct State {
    records: Vec<MemeRecord>,
    visible_count: usize,
    page_size: usize,
    /// A fetch is in flight. Distinguishes "loading" from "loaded, empty".
    loading: bool,
    /// At least one fetch completed; gates the empty state.
    loaded_once: bool,
    query: String,
    filter: ProviderFilter,
    near_bottom_ticks: u8,
}

impl State {
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            records: Vec::new(),
            visible_count: 0,
            page_size: page_size.max(1),
            loading: false,
            loaded_once: false,
            query: String::new(),
            filter: ProviderFilter::All,
            near_bottom_ticks: 0,
        }
    }

    /// Update the state and emit an [`Event`] for the parent when needed.
    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::QueryChanged(query) => {
                self.query = query;
                Event::None
            }
            Message::SearchSubmitted => {
                self.loading = true;
                let query = self.query.trim().to_string();
                if query.is_empty() {
                    Event::RequestListing
                } else {
                    Event::RequestSearch(query)
                }
            }
            Message::FilterSelected(filter) => {
                self.filter = filter;
                self.visible_count = self.page_size.min(self.filtered_len());
                self.near_bottom_ticks = 0;
                Event::None
            }
            Message::LoadMore => {
                self.reveal_page();
                Event::None
            }
            Message::Scrolled(viewport) => {
                let offset = viewport.absolute_offset();
                let scroll_position = offset.y + viewport.bounds().height;
                self.scroll_tick(scroll_position, viewport.content_bounds().height);
                Event::None
            }
            Message::TileClicked(record) => Event::OpenRecord(record),
        }
    }

    /// Marks a fetch as started (spawned by the parent).
    pub fn set_loading(&mut self) {
        self.loading = true;
    }

    /// Installs a fresh aggregate result and resets the paging window.
    pub fn set_records(&mut self, records: Vec<MemeRecord>) {
        self.records = records;
        self.loading = false;
        self.loaded_once = true;
        self.near_bottom_ticks = 0;
        self.visible_count = self.page_size.min(self.filtered_len());
    }

    /// Advances the scroll sub-machine; returns `true` when a page was
    /// revealed by this observation.
    pub fn scroll_tick(&mut self, scroll_position: f32, content_height: f32) -> bool {
        let threshold = content_height - SCROLL_BOTTOM_THRESHOLD_PX;

        if scroll_position >= threshold {
            self.near_bottom_ticks += 1;
            if self.near_bottom_ticks >= SCROLL_TRIGGER_COUNT && self.has_more() {
                self.reveal_page();
                self.near_bottom_ticks = 0;
                return true;
            }
        } else if scroll_position < threshold - SCROLL_HYSTERESIS_PX {
            self.near_bottom_ticks = 0;
        }
        false
    }

    fn reveal_page(&mut self) {
        self.visible_count = (self.visible_count + self.page_size).min(self.filtered_len());
    }

    fn filtered_len(&self) -> usize {
        self.records
            .iter()
            .filter(|record| self.filter.matches(record))
            .count()
    }

    /// The records currently revealed by the paging window.
    pub fn visible_records(&self) -> Vec<&MemeRecord> {
        self.records
            .iter()
            .filter(|record| self.filter.matches(record))
            .take(self.visible_count)
            .collect()
    }

    #[must_use]
    pub fn has_more(&self) -> bool {
        self.visible_count < self.filtered_len()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// True once a fetch completed with nothing to show.
    #[must_use]
    pub fn is_empty_result(&self) -> bool {
        self.loaded_once && !self.loading && self.filtered_len() == 0
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn filter(&self) -> ProviderFilter {
        self.filter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(n: usize, provider: Provider) -> MemeRecord {
        MemeRecord {
            url: format!("https://example.com/{n}.png"),
            title: format!("meme {n}"),
            provider,
        }
    }

    fn records(count: usize) -> Vec<MemeRecord> {
        (0..count).map(|n| record(n, Provider::Imgflip)).collect()
    }

    #[test]
    fn set_records_reveals_one_page() {
        let mut state = State::new(30);
        state.set_records(records(75));

        assert_eq!(state.visible_records().len(), 30);
        assert!(state.has_more());
    }

    #[test]
    fn load_more_expands_by_page_size() {
        let mut state = State::new(30);
        state.set_records(records(75));

        state.update(Message::LoadMore);
        assert_eq!(state.visible_records().len(), 60);
        state.update(Message::LoadMore);
        assert_eq!(state.visible_records().len(), 75);
        assert!(!state.has_more());
    }

    #[test]
    fn scroll_requires_two_consecutive_near_bottom_ticks() {
        let mut state = State::new(30);
        state.set_records(records(90));

        // Content 1000 tall, viewport bottom at 950: within 100px of the end.
        assert!(!state.scroll_tick(950.0, 1000.0));
        assert_eq!(state.visible_records().len(), 30);

        assert!(state.scroll_tick(950.0, 1000.0));
        assert_eq!(state.visible_records().len(), 60);
    }

    #[test]
    fn scrolling_back_up_rearms_the_counter() {
        let mut state = State::new(30);
        state.set_records(records(90));

        assert!(!state.scroll_tick(950.0, 1000.0));
        // Far above threshold - 200: counter resets.
        assert!(!state.scroll_tick(500.0, 1000.0));
        assert!(!state.scroll_tick(950.0, 1000.0));
        assert_eq!(state.visible_records().len(), 30);
    }

    #[test]
    fn lingering_between_thresholds_keeps_the_counter() {
        let mut state = State::new(30);
        state.set_records(records(90));

        assert!(!state.scroll_tick(950.0, 1000.0));
        // Between (threshold - hysteresis) and threshold: no reset.
        assert!(!state.scroll_tick(850.0, 1000.0));
        assert!(state.scroll_tick(950.0, 1000.0));
    }

    #[test]
    fn scroll_without_more_records_reveals_nothing() {
        let mut state = State::new(30);
        state.set_records(records(10));

        assert!(!state.scroll_tick(950.0, 1000.0));
        assert!(!state.scroll_tick(950.0, 1000.0));
        assert_eq!(state.visible_records().len(), 10);
    }

    #[test]
    fn empty_search_submits_a_listing_request() {
        let mut state = State::new(30);
        state.update(Message::QueryChanged("   ".to_string()));
        assert!(matches!(
            state.update(Message::SearchSubmitted),
            Event::RequestListing
        ));
        assert!(state.is_loading());
    }

    #[test]
    fn nonempty_search_submits_a_search_request() {
        let mut state = State::new(30);
        state.update(Message::QueryChanged("cats".to_string()));
        match state.update(Message::SearchSubmitted) {
            Event::RequestSearch(query) => assert_eq!(query, "cats"),
            other => panic!("expected RequestSearch, got {other:?}"),
        }
    }

    #[test]
    fn provider_filter_narrows_visible_records() {
        let mut state = State::new(30);
        let mut mixed = records(10);
        mixed.extend((0..5).map(|n| record(100 + n, Provider::Tenor)));
        state.set_records(mixed);

        state.update(Message::FilterSelected(ProviderFilter::Only(
            Provider::Tenor,
        )));
        let visible = state.visible_records();
        assert_eq!(visible.len(), 5);
        assert!(visible.iter().all(|r| r.provider == Provider::Tenor));
    }

    #[test]
    fn empty_result_is_distinct_from_loading() {
        let mut state = State::new(30);
        assert!(!state.is_empty_result());

        state.set_loading();
        assert!(state.is_loading());
        assert!(!state.is_empty_result());

        state.set_records(Vec::new());
        assert!(!state.is_loading());
        assert!(state.is_empty_result());
    }

    #[test]
    fn tile_click_opens_the_record() {
        let mut state = State::new(30);
        let target = record(1, Provider::Memegen);
        match state.update(Message::TileClicked(target.clone())) {
            Event::OpenRecord(opened) => assert_eq!(opened, target),
            other => panic!("expected OpenRecord, got {other:?}"),
        }
    }
}
