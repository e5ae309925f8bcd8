//! Page bookkeeping for the server-paginated listing.

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: u64 = 12;

/// Whether the listing waits for a response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PagePhase {
    /// Showing the results of the last successful query.
    Idle,
    /// A query for the current page is in flight.
    Fetching,
}

/// What a completed query means for the displayed page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// The response belongs to a valid page and can be shown.
    Applied,
    /// The requested page lies past the end; the page was clamped and must be fetched again.
    Reissue {
        /// Clamped 1-based page.
        page: u64,
    },
}

/// What: Current page, page size and total-result bookkeeping.
///
/// Details:
/// - `page` is 1-based and never below 1.
/// - `last_page` is at least 1, so an empty result set still sits on page 1.
/// - Transitions mirror the listing flow: filter change or navigation enters
///   [`PagePhase::Fetching`]; completion or failure returns to [`PagePhase::Idle`]
///   unless the page had to be clamped.
/// - A failure moves back to the last displayed page so counts keep describing
///   the products on screen; [`Self::begin_retry`] targets the failed page again.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaginationController {
    /// 1-based page shown, or requested while fetching.
    page: u64,
    /// Page of the last applied response.
    displayed_page: u64,
    /// Page whose request failed; consumed by a retry.
    failed_page: Option<u64>,
    /// Results per page, at least 1.
    page_size: u64,
    /// Total matches reported by the last successful response.
    total_results: u64,
    /// Idle or fetching.
    phase: PagePhase,
}

impl Default for PaginationController {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PaginationController {
    /// Creates an idle controller on page 1; a zero `page_size` falls back to the default.
    #[must_use]
    pub const fn new(page_size: u64) -> Self {
        Self {
            page: 1,
            displayed_page: 1,
            failed_page: None,
            page_size: if page_size == 0 {
                DEFAULT_PAGE_SIZE
            } else {
                page_size
            },
            total_results: 0,
            phase: PagePhase::Idle,
        }
    }

    /// 1-based current page.
    #[must_use]
    pub const fn page(&self) -> u64 {
        self.page
    }

    /// Zero-based page index as sent to the retrieval service.
    #[must_use]
    pub const fn page_index(&self) -> u64 {
        self.page - 1
    }

    /// Results per page.
    #[must_use]
    pub const fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Total matches from the last successful response.
    #[must_use]
    pub const fn total_results(&self) -> u64 {
        self.total_results
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> PagePhase {
        self.phase
    }

    /// Returns `true` while a query is in flight.
    #[must_use]
    pub fn is_fetching(&self) -> bool {
        self.phase == PagePhase::Fetching
    }

    /// Number of pages holding results (0 when there are none).
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.total_results.div_ceil(self.page_size)
    }

    /// Highest page that may be requested; never below 1.
    #[must_use]
    pub const fn last_page(&self) -> u64 {
        let pages = self.total_pages();
        if pages == 0 { 1 } else { pages }
    }

    /// What: Start over after a filter, sort or page-size change.
    ///
    /// Output:
    /// - Page 1, fetching.
    pub fn reset_for_filter_change(&mut self) {
        self.page = 1;
        self.failed_page = None;
        self.phase = PagePhase::Fetching;
    }

    /// What: Change the page size and start over.
    ///
    /// Inputs:
    /// - `page_size`: New size; zero keeps the current size
    ///
    /// Output:
    /// - `true` when the size changed (page reset to 1, fetching).
    pub fn set_page_size(&mut self, page_size: u64) -> bool {
        if page_size == 0 || page_size == self.page_size {
            return false;
        }
        self.page_size = page_size;
        self.reset_for_filter_change();
        true
    }

    /// What: Navigate to a page.
    ///
    /// Inputs:
    /// - `requested`: 1-based page; clamped into `1..=last_page`
    ///
    /// Output:
    /// - `true` when a fetch is needed; `false` for the page already shown while idle.
    pub fn go_to_page(&mut self, requested: u64) -> bool {
        let target = requested.clamp(1, self.last_page());
        if target == self.page && self.phase == PagePhase::Idle {
            return false;
        }
        self.page = target;
        self.failed_page = None;
        self.phase = PagePhase::Fetching;
        true
    }

    /// Navigate one page forward; see [`Self::go_to_page`].
    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.page.saturating_add(1))
    }

    /// Navigate one page back; see [`Self::go_to_page`].
    pub fn prev_page(&mut self) -> bool {
        self.go_to_page(self.page.saturating_sub(1))
    }

    /// Re-enter fetching for the page that failed, or the current page when none did.
    pub fn begin_retry(&mut self) {
        if let Some(page) = self.failed_page.take() {
            self.page = page;
        }
        self.phase = PagePhase::Fetching;
    }

    /// What: Record a successful response.
    ///
    /// Inputs:
    /// - `total_results`: Total matches reported by the response
    ///
    /// Output:
    /// - [`CompletionOutcome::Applied`] when the current page is valid (idle again).
    /// - [`CompletionOutcome::Reissue`] when the page now lies past the end; the
    ///   page is clamped to the last valid page and stays fetching.
    pub fn on_success(&mut self, total_results: u64) -> CompletionOutcome {
        self.total_results = total_results;
        let last = self.last_page();
        if self.page > last {
            self.page = last;
            self.phase = PagePhase::Fetching;
            return CompletionOutcome::Reissue { page: last };
        }
        self.displayed_page = self.page;
        self.failed_page = None;
        self.phase = PagePhase::Idle;
        CompletionOutcome::Applied
    }

    /// Record a failed response; page and totals fall back to the last success.
    pub fn on_failure(&mut self) {
        if self.page != self.displayed_page {
            self.failed_page = Some(self.page);
            self.page = self.displayed_page;
        }
        self.phase = PagePhase::Idle;
    }

    /// What: 1-based item range shown on the current page.
    ///
    /// Output:
    /// - `Some((first, last))`, e.g. `(13, 24)` for page 2 of 12; `None` when the page is empty.
    #[must_use]
    pub const fn range_label(&self) -> Option<(u64, u64)> {
        let first = self.page_index() * self.page_size + 1;
        if self.total_results == 0 || first > self.total_results {
            return None;
        }
        let last = first + self.page_size - 1;
        Some((
            first,
            if last < self.total_results {
                last
            } else {
                self.total_results
            },
        ))
    }
}
