/// Gallery view state
///
/// One state machine drives all three gallery flavours. What differs is
/// the `GalleryConfig`: where records come from, whether they are shuffled,
/// and which works are hidden.
use std::ops::Range;
use std::sync::Arc;

use crate::config::Settings;
use crate::error::GalleryError;
use crate::indexer::query::ArtQuery;
use crate::state::data::ArtRecord;
use crate::state::shuffle;

/// A 1-based page over an in-memory sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: usize,
    pub items_per_page: usize,
}

impl PageWindow {
    pub fn new(page: usize, items_per_page: usize) -> Self {
        Self {
            page,
            items_per_page,
        }
    }

    /// Index of the first item on this page
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1) * self.items_per_page
    }

    /// `[(page-1)*n, page*n)` clamped to `len`
    pub fn range(&self, len: usize) -> Range<usize> {
        let start = self.offset().min(len);
        let end = (start + self.items_per_page).min(len);
        start..end
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.range(items.len())]
    }
}

/// Where a gallery's records come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// One large window fetched on mount and paged locally
    Bulk { address: String, limit: usize },
    /// Server-side paging, newest acquisitions first. `None` means the
    /// address is supplied later by the user.
    Paged { address: Option<String> },
}

/// Parameters that turn the shared gallery into one of its flavours
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryConfig {
    pub source: Source,
    /// Shuffle once per fetch
    pub shuffle: bool,
    pub blocked_creators: Vec<String>,
    pub excluded_names: Vec<String>,
    pub items_per_page: usize,
    /// Fixed page count shown in the pager
    pub total_pages: usize,
}

impl GalleryConfig {
    /// The whole reference collection in random order, minus hidden works
    pub fn unranked(settings: &Settings) -> Self {
        Self {
            source: Source::Bulk {
                address: settings.reference_address.clone(),
                limit: settings.bulk_limit,
            },
            shuffle: true,
            blocked_creators: settings.block_list.creators.clone(),
            excluded_names: settings.block_list.names.clone(),
            items_per_page: settings.items_per_page,
            total_pages: settings.pages.unranked,
        }
    }

    /// The reference collection, most recently acquired first
    pub fn recency(settings: &Settings) -> Self {
        Self {
            source: Source::Paged {
                address: Some(settings.reference_address.clone()),
            },
            shuffle: false,
            blocked_creators: Vec::new(),
            excluded_names: Vec::new(),
            items_per_page: settings.items_per_page,
            total_pages: settings.pages.recency,
        }
    }

    /// Any collection, chosen by the user
    pub fn address_scoped(settings: &Settings) -> Self {
        Self {
            source: Source::Paged { address: None },
            shuffle: false,
            blocked_creators: Vec::new(),
            excluded_names: Vec::new(),
            items_per_page: settings.items_per_page,
            total_pages: settings.pages.address,
        }
    }

    fn is_hidden(&self, record: &ArtRecord) -> bool {
        let blocked_creator = record
            .first_creator()
            .is_some_and(|creator| self.blocked_creators.iter().any(|b| b == creator));
        let excluded_name = record
            .name
            .as_deref()
            .is_some_and(|name| self.excluded_names.iter().any(|n| n == name));
        blocked_creator || excluded_name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the user to submit an address
    Idle,
    Loading,
    /// Last fetch failed; records were cleared
    Failed,
    Ready,
}

/// A query the gallery wants run, tagged so stale answers can be dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: u64,
    pub query: ArtQuery,
}

/// State of one mounted gallery
#[derive(Debug, Clone)]
pub struct Gallery {
    config: GalleryConfig,
    phase: Phase,
    /// Filtered and, if configured, shuffled
    records: Vec<ArtRecord>,
    page: usize,
    address: Option<String>,
    generation: u64,
    /// Index into the visible page of the record whose dialog is open
    open_detail: Option<usize>,
}

impl Gallery {
    pub fn new(config: GalleryConfig) -> Self {
        let address = match &config.source {
            Source::Bulk { address, .. } => Some(address.clone()),
            Source::Paged { address } => address.clone(),
        };
        Self {
            config,
            phase: Phase::Idle,
            records: Vec::new(),
            page: 1,
            address,
            generation: 0,
            open_detail: None,
        }
    }

    /// Swap in a new configuration, starting over from page 1.
    ///
    /// The generation keeps counting, so answers to requests made under the
    /// previous configuration are still recognised as stale.
    pub fn reconfigure(&mut self, config: GalleryConfig) {
        let generation = self.generation;
        *self = Self::new(config);
        self.generation = generation;
    }

    /// Start the gallery. Returns the first fetch, or `None` while the
    /// gallery still needs an address.
    pub fn mount(&mut self) -> Option<FetchRequest> {
        if self.address.is_none() {
            self.phase = Phase::Idle;
            return None;
        }
        Some(self.request())
    }

    /// Search a caller-supplied address from the first page.
    ///
    /// Blank input is ignored. Only galleries without a fixed address accept
    /// a search.
    pub fn submit_address(&mut self, address: &str) -> Option<FetchRequest> {
        let address = address.trim();
        if address.is_empty() || !matches!(self.config.source, Source::Paged { address: None }) {
            return None;
        }
        self.address = Some(address.to_string());
        self.page = 1;
        Some(self.request())
    }

    /// Move to `page`, clamped to `[1, total_pages]`.
    ///
    /// Locally paged galleries just re-slice; server-paged ones refetch.
    pub fn set_page(&mut self, page: usize) -> Option<FetchRequest> {
        let page = page.clamp(1, self.total_pages().max(1));
        if page == self.page {
            return None;
        }
        self.page = page;
        self.open_detail = None;

        match self.config.source {
            Source::Bulk { .. } => None,
            Source::Paged { .. } if self.address.is_some() => Some(self.request()),
            Source::Paged { .. } => None,
        }
    }

    pub fn next_page(&mut self) -> Option<FetchRequest> {
        self.set_page(self.page + 1)
    }

    pub fn previous_page(&mut self) -> Option<FetchRequest> {
        self.set_page(self.page.saturating_sub(1))
    }

    /// Apply the outcome of a fetch.
    ///
    /// Returns `false` when the answer belongs to a superseded request and
    /// was dropped.
    pub fn apply(
        &mut self,
        generation: u64,
        result: Result<Vec<ArtRecord>, Arc<GalleryError>>,
    ) -> bool {
        if generation != self.generation {
            tracing::debug!(generation, current = self.generation, "dropping stale result");
            return false;
        }

        self.open_detail = None;
        match result {
            Ok(records) => {
                let fetched = records.len();
                let kept: Vec<ArtRecord> = records
                    .into_iter()
                    .filter(|record| !self.config.is_hidden(record))
                    .collect();
                if kept.len() < fetched {
                    tracing::debug!(hidden = fetched - kept.len(), "hid blocked works");
                }
                self.records = if self.config.shuffle {
                    shuffle::shuffled(&kept)
                } else {
                    kept
                };
                self.phase = Phase::Ready;
            }
            Err(err) => {
                tracing::warn!(error = %err, "⚠️  Fetch failed");
                self.records.clear();
                self.phase = Phase::Failed;
            }
        }
        true
    }

    /// Records on the current page
    pub fn visible(&self) -> &[ArtRecord] {
        match self.config.source {
            Source::Bulk { .. } => self.window().slice(&self.records),
            Source::Paged { .. } => &self.records,
        }
    }

    pub fn window(&self) -> PageWindow {
        PageWindow::new(self.page, self.config.items_per_page)
    }

    pub fn open_detail(&mut self, index: usize) {
        if index < self.visible().len() {
            self.open_detail = Some(index);
        }
    }

    pub fn close_detail(&mut self) {
        self.open_detail = None;
    }

    /// The record whose dialog is open, with its index on the page
    pub fn detail(&self) -> Option<(usize, &ArtRecord)> {
        let index = self.open_detail?;
        self.visible().get(index).map(|record| (index, record))
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        self.config.total_pages
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn records(&self) -> &[ArtRecord] {
        &self.records
    }

    /// Whether this gallery waits for a user-supplied address
    pub fn is_searchable(&self) -> bool {
        matches!(self.config.source, Source::Paged { address: None })
    }

    fn request(&mut self) -> FetchRequest {
        self.generation += 1;
        self.phase = Phase::Loading;

        let address = self.address.clone().unwrap_or_default();
        let query = match &self.config.source {
            Source::Bulk { limit, .. } => ArtQuery::held(address, *limit, 0),
            Source::Paged { .. } => {
                let window = self.window();
                ArtQuery::recently_acquired(address, window.items_per_page, window.offset())
            }
        };

        FetchRequest {
            generation: self.generation,
            query,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(count: usize) -> Vec<ArtRecord> {
        (0..count)
            .map(|i| ArtRecord {
                name: Some(format!("art {}", i)),
                ophash: Some(format!("oo{}", i)),
                ..ArtRecord::default()
            })
            .collect()
    }

    fn settings() -> Settings {
        Settings::default()
    }

    #[test]
    fn test_page_window_bounds() {
        let items: Vec<usize> = (0..100).collect();

        let first = PageWindow::new(1, 24);
        assert_eq!(first.range(items.len()), 0..24);
        assert_eq!(first.slice(&items), &items[0..24]);

        let last = PageWindow::new(5, 24);
        assert_eq!(last.range(items.len()), 96..100);
        assert_eq!(last.slice(&items).len(), 4);

        let past_end = PageWindow::new(9, 24);
        assert!(past_end.slice(&items).is_empty());
    }

    #[test]
    fn test_page_zero_acts_as_first() {
        assert_eq!(PageWindow::new(0, 24).range(100), 0..24);
    }

    #[test]
    fn test_unranked_fetches_once() {
        let mut gallery = Gallery::new(GalleryConfig::unranked(&settings()));

        let request = gallery.mount().expect("mount should fetch");
        assert_eq!(request.query, ArtQuery::held(crate::config::DEFAULT_REFERENCE_ADDRESS, 1000, 0));
        assert_eq!(gallery.phase(), Phase::Loading);

        assert!(gallery.apply(request.generation, Ok(named(100))));
        assert_eq!(gallery.phase(), Phase::Ready);

        let first_page: Vec<_> = gallery.visible().to_vec();
        assert_eq!(first_page.len(), 24);

        // Paging re-slices the already shuffled set
        assert_eq!(gallery.set_page(2), None);
        assert_eq!(gallery.page(), 2);
        assert_eq!(gallery.visible(), &gallery.records()[24..48]);
        assert_eq!(gallery.set_page(5), None);
        assert_eq!(gallery.visible().len(), 4);

        // Shuffle order is stable across page changes
        assert_eq!(gallery.set_page(1), None);
        assert_eq!(gallery.visible(), &first_page[..]);
    }

    #[test]
    fn test_unranked_keeps_every_record() {
        let mut gallery = Gallery::new(GalleryConfig::unranked(&settings()));
        let request = gallery.mount().unwrap();
        gallery.apply(request.generation, Ok(named(30)));

        let mut names: Vec<_> = gallery
            .records()
            .iter()
            .map(|r| r.name.clone().unwrap())
            .collect();
        names.sort();
        let mut expected: Vec<_> = (0..30).map(|i| format!("art {}", i)).collect();
        expected.sort();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_unranked_hides_blocked_works() {
        let mut gallery = Gallery::new(GalleryConfig::unranked(&settings()));
        let request = gallery.mount().unwrap();

        let mut records = named(3);
        records[0].creators = vec![crate::state::data::Creator {
            creator_address: Some("tz1erY7SqRTAM6UmdwzfmQ48VqB6675uUrHH".into()),
        }];
        records[1].name = Some("WILD VIOLET".into());
        gallery.apply(request.generation, Ok(records));

        assert_eq!(gallery.records().len(), 1);
        assert_eq!(gallery.records()[0].name.as_deref(), Some("art 2"));
    }

    #[test]
    fn test_block_list_checks_first_creator_only() {
        let config = GalleryConfig::unranked(&settings());
        let mut record = named(1).remove(0);
        record.creators = vec![
            crate::state::data::Creator {
                creator_address: Some("tz1someoneelse".into()),
            },
            crate::state::data::Creator {
                creator_address: Some("tz1erY7SqRTAM6UmdwzfmQ48VqB6675uUrHH".into()),
            },
        ];
        assert!(!config.is_hidden(&record));
    }

    #[test]
    fn test_recency_refetches_each_page() {
        let mut gallery = Gallery::new(GalleryConfig::recency(&settings()));

        let first = gallery.mount().unwrap();
        assert_eq!(
            first.query,
            ArtQuery::recently_acquired(crate::config::DEFAULT_REFERENCE_ADDRESS, 24, 0)
        );
        gallery.apply(first.generation, Ok(named(24)));

        let third = gallery.set_page(3).expect("page change should refetch");
        assert_eq!(third.query.window(), (24, 48));
        assert_eq!(gallery.phase(), Phase::Loading);
        assert!(gallery.generation > first.generation);
    }

    #[test]
    fn test_recency_keeps_server_order() {
        let mut gallery = Gallery::new(GalleryConfig::recency(&settings()));
        let request = gallery.mount().unwrap();
        let records = named(24);
        gallery.apply(request.generation, Ok(records.clone()));
        assert_eq!(gallery.visible(), &records[..]);
    }

    #[test]
    fn test_recency_does_not_filter() {
        let mut gallery = Gallery::new(GalleryConfig::recency(&settings()));
        let request = gallery.mount().unwrap();
        let mut records = named(2);
        records[0].name = Some("WILD VIOLET".into());
        gallery.apply(request.generation, Ok(records));
        assert_eq!(gallery.visible().len(), 2);
    }

    #[test]
    fn test_page_clamps_to_bounds() {
        let mut gallery = Gallery::new(GalleryConfig::recency(&settings()));
        gallery.mount();

        assert_eq!(gallery.previous_page(), None);
        assert_eq!(gallery.page(), 1);

        gallery.set_page(99);
        assert_eq!(gallery.page(), 10);
        assert_eq!(gallery.next_page(), None);
        assert_eq!(gallery.page(), 10);
    }

    #[test]
    fn test_address_scoped_waits_for_address() {
        let mut gallery = Gallery::new(GalleryConfig::address_scoped(&settings()));
        assert!(gallery.is_searchable());
        assert_eq!(gallery.mount(), None);
        assert_eq!(gallery.phase(), Phase::Idle);

        // Paging before a search does nothing but move the cursor
        assert_eq!(gallery.set_page(2), None);

        assert_eq!(gallery.submit_address("   "), None);
        let request = gallery.submit_address(" tz1collector ").unwrap();
        assert_eq!(request.query, ArtQuery::recently_acquired("tz1collector", 24, 0));
        assert_eq!(gallery.page(), 1);
        assert_eq!(gallery.address(), Some("tz1collector"));

        gallery.apply(request.generation, Ok(named(5)));
        let next = gallery.next_page().unwrap();
        assert_eq!(next.query, ArtQuery::recently_acquired("tz1collector", 24, 24));
    }

    #[test]
    fn test_fixed_galleries_reject_search() {
        let mut gallery = Gallery::new(GalleryConfig::recency(&settings()));
        assert_eq!(gallery.submit_address("tz1other"), None);
        assert!(!gallery.is_searchable());
    }

    #[test]
    fn test_failure_clears_records() {
        let mut gallery = Gallery::new(GalleryConfig::recency(&settings()));
        let first = gallery.mount().unwrap();
        gallery.apply(first.generation, Ok(named(24)));

        let second = gallery.next_page().unwrap();
        let err = Arc::new(GalleryError::GraphQl {
            messages: vec!["boom".into()],
        });
        assert!(gallery.apply(second.generation, Err(err)));
        assert_eq!(gallery.phase(), Phase::Failed);
        assert!(gallery.visible().is_empty());
    }

    #[test]
    fn test_stale_results_are_dropped() {
        let mut gallery = Gallery::new(GalleryConfig::recency(&settings()));
        let first = gallery.mount().unwrap();
        let second = gallery.next_page().unwrap();

        gallery.apply(second.generation, Ok(named(3)));
        assert!(!gallery.apply(first.generation, Ok(named(24))));
        assert_eq!(gallery.visible().len(), 3);
    }

    #[test]
    fn test_reconfigure_drops_answers_for_previous_view() {
        let mut gallery = Gallery::new(GalleryConfig::unranked(&settings()));
        let bulk = gallery.mount().unwrap();

        gallery.reconfigure(GalleryConfig::recency(&settings()));
        let recent = gallery.mount().unwrap();
        assert_ne!(bulk.generation, recent.generation);
        assert_eq!(gallery.phase(), Phase::Loading);

        assert!(!gallery.apply(bulk.generation, Ok(named(100))));
        assert!(gallery.apply(recent.generation, Ok(named(24))));
        assert_eq!(gallery.visible().len(), 24);
        assert_eq!(gallery.total_pages(), 10);
    }

    #[test]
    fn test_detail_dialog_follows_page() {
        let mut gallery = Gallery::new(GalleryConfig::unranked(&settings()));
        let request = gallery.mount().unwrap();
        gallery.apply(request.generation, Ok(named(30)));

        gallery.open_detail(3);
        let (index, record) = gallery.detail().unwrap();
        assert_eq!(index, 3);
        assert_eq!(record, &gallery.visible()[3]);

        gallery.set_page(2);
        assert!(gallery.detail().is_none());

        // Page 2 holds only 6 records
        gallery.open_detail(10);
        assert!(gallery.detail().is_none());
        gallery.open_detail(5);
        assert!(gallery.detail().is_some());
        gallery.close_detail();
        assert!(gallery.detail().is_none());
    }
}
