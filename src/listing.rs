// src/listing.rs
//! The listing view-model: what an admin entity table binds to.
//!
//! Stacks two independent paging mechanisms by design: the controller
//! fetches server pages of records, and the listing windows the
//! accumulated (and search-filtered) records into display pages. The
//! two counters are deliberately separate; the only bridge is the
//! `next_page` rule, which fetches exactly when the next window would
//! run past what has been fetched so far.

use crate::constants::{DISPLAY_PAGE_SIZE, SERVER_PAGE_SIZE};
use crate::controller::PaginationController;
use crate::error::{AppError, StoreError};
use crate::record::Record;
use crate::source::{PaginatedSource, RecordActions};
use crate::types::RecordId;

/// A searchable, windowed view over one resource's records.
pub struct Listing<S> {
    controller: PaginationController<S>,
    search: String,
    display_page: usize,
    display_page_size: usize,
}

impl<S: PaginatedSource + RecordActions> Listing<S> {
    /// A listing with the console's standard page sizes.
    pub fn new(source: S) -> Self {
        Self::with_page_sizes(source, SERVER_PAGE_SIZE, DISPLAY_PAGE_SIZE)
    }

    /// A listing with explicit server and display page sizes. Sizes are
    /// fixed for the listing's lifetime.
    pub fn with_page_sizes(source: S, server_page_size: u32, display_page_size: usize) -> Self {
        Self {
            controller: PaginationController::new(source, server_page_size),
            search: String::new(),
            display_page: 0,
            display_page_size: display_page_size.max(1),
        }
    }

    /// Pagination state, read-only.
    pub fn state(&self) -> &crate::controller::Pager {
        self.controller.state()
    }

    /// Loads the first server page if nothing is loaded yet.
    pub async fn load_initial(&mut self) {
        self.controller.load_first().await;
    }

    // --- Search ---

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Sets the search term and jumps back to the first display page.
    /// Server state is untouched: filtering happens only over what has
    /// been fetched so far.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.display_page = 0;
    }

    /// Accumulated records that match the search term, in fetch order.
    pub fn filtered(&self) -> Vec<&Record> {
        self.controller
            .state()
            .items()
            .iter()
            .filter(|record| record.matches(&self.search))
            .collect()
    }

    // --- Display windowing ---

    /// Current display page, zero-based.
    pub fn display_page(&self) -> usize {
        self.display_page
    }

    /// Number of display pages the filtered records currently fill.
    /// At least 1, so an empty listing still has a page to stand on.
    pub fn display_page_count(&self) -> usize {
        self.filtered().len().div_ceil(self.display_page_size).max(1)
    }

    /// The filtered records visible on the current display page.
    pub fn visible(&self) -> Vec<&Record> {
        self.filtered()
            .into_iter()
            .skip(self.display_page * self.display_page_size)
            .take(self.display_page_size)
            .collect()
    }

    /// Advances one display page, fetching a server page first when the
    /// next window would run past the records fetched so far.
    ///
    /// The window only advances if the (possibly grown) filtered list
    /// actually has rows for it, so a fetch that returns nothing new
    /// leaves the view where it was.
    pub async fn next_page(&mut self) {
        let shown_through = (self.display_page + 1) * self.display_page_size;
        if self.controller.state().has_more() && shown_through >= self.filtered().len() {
            self.controller.load_more().await;
        }
        if shown_through < self.filtered().len() {
            self.display_page += 1;
        }
    }

    /// Fetches one more server page without moving the display window.
    /// Used to widen what search and windowing have to work over.
    pub async fn fetch_more(&mut self) {
        self.controller.load_more().await;
    }

    /// Steps one display page back. Never fetches.
    pub fn prev_page(&mut self) {
        self.display_page = self.display_page.saturating_sub(1);
    }

    /// Jumps to a display page over already-fetched records. Never
    /// fetches: going backward is always safe, and going forward past
    /// the fetched data is clamped; use `next_page` to grow the data.
    pub fn go_to_page(&mut self, page: usize) {
        self.display_page = page.min(self.display_page_count() - 1);
    }

    // --- Rebinding ---

    /// Binds the listing to a different source: full reset, then one
    /// fetch against the new source. The old source is never consulted
    /// again.
    pub async fn rebind(&mut self, source: S) {
        self.controller.rebind(source);
        self.search.clear();
        self.display_page = 0;
        self.controller.load_first().await;
    }

    // --- Row actions ---

    /// Deletes a record in the store, then removes it locally.
    ///
    /// On success the record disappears from the accumulation with every
    /// other row keeping its relative order; no refetch happens. On
    /// failure the row stays put and the error is returned to the view.
    pub async fn delete(&mut self, id: &RecordId) -> Result<(), StoreError> {
        match RecordActions::delete(self.controller.source(), id).await {
            Ok(()) => {
                self.controller.remove_item(id);
                // The last display page may have just emptied.
                let last = self.display_page_count() - 1;
                self.display_page = self.display_page.min(last);
                Ok(())
            }
            Err(error) => {
                log::warn!("delete of {} failed, keeping row: {}", id, error);
                Err(error)
            }
        }
    }

    /// Creates a record after checking its required fields. Validation
    /// failures surface before any network call is made.
    pub async fn create(
        &mut self,
        record: Record,
        required_fields: &[&str],
    ) -> Result<RecordId, AppError> {
        record.require_fields(required_fields)?;
        let id = RecordActions::create(self.controller.source(), record).await?;
        Ok(id)
    }
}
