// src/controller.rs
//! The pagination state machine and its async driver.
//!
//! `Pager` is pure state: it decides when a fetch may start, hands out a
//! generation-tagged ticket for it, and folds the page (or failure) back
//! in. `PaginationController` pairs a pager with a source and drives one
//! fetch at a time under a timeout. The split keeps every state
//! transition testable without I/O.
//!
//! Failure semantics: a failed first page clears the accumulation; a
//! failed later page keeps everything already fetched and only records
//! the error.

use crate::constants::{FETCH_TIMEOUT_SECS, MAX_PAGE_SIZE};
use crate::error::StoreError;
use crate::record::Record;
use crate::source::PaginatedSource;
use crate::store::{Cursor, Page};
use crate::types::RecordId;
use std::time::Duration;

/// Permission to run one fetch, tagged with the generation it belongs
/// to. A ticket issued before a reset is worthless afterwards: applying
/// it is a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    cursor: Option<Cursor>,
}

impl FetchTicket {
    /// Where this fetch resumes from (`None` for the first page).
    pub fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }
}

/// What `Pager::apply` did with a fetch resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The page was appended to the accumulation.
    Applied,
    /// The failure was recorded.
    Failed,
    /// The ticket predates the current generation; nothing changed.
    Stale,
}

/// Cursor-pagination state for one bound resource.
///
/// Accumulates pages in fetch order: after N applied fetches with no
/// intervening reset, `items()` is the concatenation of pages 1..=N,
/// no duplicates, no gaps.
#[derive(Debug)]
pub struct Pager {
    page_size: u32,
    server_pages_fetched: u32,
    accumulated: Vec<Record>,
    cursor: Option<Cursor>,
    has_more: bool,
    loading: bool,
    error: Option<StoreError>,
    generation: u64,
}

impl Pager {
    /// Creates a pager with a fixed page size.
    ///
    /// The page size cannot change for the lifetime of the pager;
    /// paging with a different size means building a new pager.
    /// Out-of-range sizes are clamped rather than rejected.
    pub fn new(page_size: u32) -> Self {
        let safe_size = page_size.clamp(1, MAX_PAGE_SIZE);
        if page_size != safe_size {
            log::warn!(
                "Requested page size {} outside 1..={}. Clamping.",
                page_size,
                MAX_PAGE_SIZE
            );
        }
        Self {
            page_size: safe_size,
            server_pages_fetched: 0,
            accumulated: Vec::new(),
            cursor: None,
            has_more: true,
            loading: false,
            error: None,
            generation: 0,
        }
    }

    // --- Accessors ---

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Every record fetched since the last reset, in fetch order.
    pub fn items(&self) -> &[Record] {
        &self.accumulated
    }

    /// Server pages successfully applied since the last reset.
    pub fn server_pages_fetched(&self) -> u32 {
        self.server_pages_fetched
    }

    /// Whether the store reported more data past the last applied page.
    /// True before the first fetch: nothing is known yet.
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The most recent fetch failure, until a fetch succeeds or a reset.
    pub fn error(&self) -> Option<&StoreError> {
        self.error.as_ref()
    }

    // --- Transitions ---

    /// Returns to the initial state and invalidates every outstanding
    /// ticket. Idempotent: resetting twice is the same as once.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.server_pages_fetched = 0;
        self.accumulated.clear();
        self.cursor = None;
        self.has_more = true;
        self.loading = false;
        self.error = None;
    }

    /// Asks to start the next fetch.
    ///
    /// Refused (`None`) while a fetch is in flight, and once the store
    /// has said there is no more data. When granted, the pager is
    /// loading until the ticket is applied.
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        if self.loading || !self.has_more {
            return None;
        }
        self.loading = true;
        Some(FetchTicket {
            generation: self.generation,
            cursor: self.cursor.clone(),
        })
    }

    /// Folds a fetch resolution back into the state.
    ///
    /// Resolutions are applied in issue order by construction: only one
    /// ticket can be outstanding, and a stale ticket (issued before the
    /// most recent reset) is discarded without touching anything, so a
    /// slow response can never overwrite fresher state.
    pub fn apply(
        &mut self,
        ticket: FetchTicket,
        result: Result<Page, StoreError>,
    ) -> ApplyOutcome {
        if ticket.generation != self.generation {
            return ApplyOutcome::Stale;
        }
        self.loading = false;

        match result {
            Ok(page) => {
                let (items, next_cursor, has_more) = page.into_parts();
                self.accumulated.extend(items);
                self.cursor = next_cursor;
                self.has_more = has_more;
                self.server_pages_fetched += 1;
                self.error = None;
                ApplyOutcome::Applied
            }
            Err(error) => {
                // First-page failure leaves nothing trustworthy; a later
                // failure keeps the pages that did arrive.
                if self.server_pages_fetched == 0 {
                    self.accumulated.clear();
                }
                self.error = Some(error);
                ApplyOutcome::Failed
            }
        }
    }

    /// Removes the record with `id`, keeping the others in order.
    /// Returns whether anything was removed. A local patch, not a
    /// refetch: cursors and page counts are untouched.
    pub fn remove_item(&mut self, id: &RecordId) -> bool {
        let before = self.accumulated.len();
        self.accumulated
            .retain(|record| record.id().as_ref() != Some(id));
        self.accumulated.len() != before
    }
}

/// Drives a `Pager` against a `PaginatedSource`, one fetch at a time.
///
/// `&mut self` on the driving methods makes overlapping fetches
/// unrepresentable; the generation check in `Pager::apply` additionally
/// covers resets that happen while a fetch is awaited.
pub struct PaginationController<S> {
    source: S,
    pager: Pager,
    fetch_timeout: Duration,
}

impl<S: PaginatedSource> PaginationController<S> {
    pub fn new(source: S, page_size: u32) -> Self {
        Self {
            source,
            pager: Pager::new(page_size),
            fetch_timeout: Duration::from_secs(FETCH_TIMEOUT_SECS),
        }
    }

    /// Overrides the per-fetch timeout guard.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn state(&self) -> &Pager {
        &self.pager
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Clears pagination state; the next load starts from page one.
    pub fn reset(&mut self) {
        self.pager.reset();
    }

    /// Replaces the bound source and resets. The old source is never
    /// fetched again.
    pub fn rebind(&mut self, source: S) {
        self.source = source;
        self.pager.reset();
    }

    /// Fetches page one if nothing has been fetched yet. Returns `None`
    /// without fetching once data (or an error) is present; call `reset`
    /// first to refetch.
    pub async fn load_first(&mut self) -> Option<ApplyOutcome> {
        if self.pager.server_pages_fetched() > 0 || self.pager.error().is_some() {
            return None;
        }
        self.run_fetch().await
    }

    /// Fetches the next server page and appends it. Returns `None`
    /// without fetching while loading or when the store has said there
    /// is no more data.
    pub async fn load_more(&mut self) -> Option<ApplyOutcome> {
        self.run_fetch().await
    }

    async fn run_fetch(&mut self) -> Option<ApplyOutcome> {
        let ticket = self.pager.begin_fetch()?;

        let cursor = ticket.cursor().cloned();
        let page_size = self.pager.page_size();
        let fetched = match tokio::time::timeout(
            self.fetch_timeout,
            self.source.fetch(cursor, page_size),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout {
                elapsed_secs: self.fetch_timeout.as_secs(),
            }),
        };

        if let Err(error) = &fetched {
            log::warn!(
                "page fetch failed for {}: {}",
                self.source.identity(),
                error
            );
        }
        Some(self.pager.apply(ticket, fetched))
    }

    /// Local removal of a record by id; see `Pager::remove_item`.
    pub fn remove_item(&mut self, id: &RecordId) -> bool {
        self.pager.remove_item(id)
    }
}
