//! Paginated result accumulation for one search session.
//!
//! [`SearchState`] is a plain value: every transition is a method that
//! either hands back a [`PageRequest`] to issue or consumes the outcome of
//! one. [`SearchSession`] drives it against a [`UserDirectory`].
//!
//! Each issued request carries a sequence token. Only the response for the
//! outstanding token is applied, so a slow response for a superseded
//! search can never overwrite newer results.

use std::sync::Arc;

use crate::client::UserDirectory;
use crate::error::{SearchError, MISSING_CRITERIA_MESSAGE};
use crate::models::{SearchFilters, SearchResultPage, UserSummary};

/// `true` while more results exist beyond `page` pages of `page_size`.
pub fn has_more(page: u32, page_size: u32, total_count: u64) -> bool {
    u64::from(page) * u64::from(page_size) < total_count
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// First page of a fresh filter set is in flight.
    Searching,
    Ready,
    LoadingMore { page: u32 },
    Failed { message: String },
}

/// Results gathered so far for the current filter set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccumulatedResults {
    pub items: Vec<UserSummary>,
    pub current_page: u32,
    pub total_count: u64,
    pub has_more: bool,
}

impl Default for AccumulatedResults {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            current_page: 1,
            total_count: 0,
            has_more: false,
        }
    }
}

impl AccumulatedResults {
    /// Results still on the server after what has been loaded.
    pub fn remaining(&self) -> u64 {
        self.total_count.saturating_sub(self.items.len() as u64)
    }
}

/// A request the state machine wants issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub token: u64,
    pub filters: SearchFilters,
    pub page: u32,
    pub per_page: u32,
}

#[derive(Debug, Clone)]
pub struct SearchState {
    phase: Phase,
    results: AccumulatedResults,
    filters: Option<SearchFilters>,
    page_size: u32,
    last_token: u64,
    outstanding: Option<PageRequest>,
}

impl SearchState {
    pub fn new(page_size: u32) -> Self {
        Self {
            phase: Phase::Idle,
            results: AccumulatedResults::default(),
            filters: None,
            page_size: page_size.max(1),
            last_token: 0,
            outstanding: None,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn results(&self) -> &AccumulatedResults {
        &self.results
    }

    pub fn filters(&self) -> Option<&SearchFilters> {
        self.filters.as_ref()
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed { message } => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Searching | Phase::LoadingMore { .. })
    }

    /// Starts a fresh search for `filters`.
    ///
    /// Empty filters are rejected without touching the accumulated results,
    /// but any in-flight request is still superseded.
    pub fn submit(&mut self, filters: SearchFilters) -> Result<PageRequest, SearchError> {
        if filters.is_empty() {
            let err = SearchError::Validation(MISSING_CRITERIA_MESSAGE.to_string());
            self.outstanding = None;
            self.phase = Phase::Failed {
                message: err.user_message(),
            };
            return Err(err);
        }

        self.results = AccumulatedResults::default();
        self.filters = Some(filters.clone());
        self.phase = Phase::Searching;
        Ok(self.issue(filters, 1))
    }

    /// Requests the next page, if the last page left more results.
    pub fn load_more(&mut self) -> Option<PageRequest> {
        if self.phase != Phase::Ready || !self.results.has_more {
            return None;
        }
        let filters = self.filters.clone()?;
        let page = self.results.current_page + 1;
        self.phase = Phase::LoadingMore { page };
        Some(self.issue(filters, page))
    }

    /// Applies a successful response. Returns `false` for stale tokens.
    pub fn apply_page(&mut self, token: u64, page: SearchResultPage) -> bool {
        let Some(request) = self.take_outstanding(token) else {
            return false;
        };

        if request.page == 1 {
            self.results.items = page.items;
        } else {
            self.results.items.extend(page.items);
        }
        self.results.current_page = request.page;
        self.results.total_count = page.total_count;
        self.results.has_more = has_more(request.page, request.per_page, page.total_count);
        self.phase = Phase::Ready;
        true
    }

    /// Applies a failed response. Returns `false` for stale tokens.
    ///
    /// Results from earlier pages are kept.
    pub fn apply_failure(&mut self, token: u64, err: &SearchError) -> bool {
        if self.take_outstanding(token).is_none() {
            return false;
        }
        self.phase = Phase::Failed {
            message: err.user_message(),
        };
        true
    }

    /// Discards results, filters and any in-flight request.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.results = AccumulatedResults::default();
        self.filters = None;
        self.outstanding = None;
    }

    fn issue(&mut self, filters: SearchFilters, page: u32) -> PageRequest {
        self.last_token += 1;
        let request = PageRequest {
            token: self.last_token,
            filters,
            page,
            per_page: self.page_size,
        };
        self.outstanding = Some(request.clone());
        request
    }

    fn take_outstanding(&mut self, token: u64) -> Option<PageRequest> {
        if self.outstanding.as_ref().is_some_and(|r| r.token == token) {
            self.outstanding.take()
        } else {
            tracing::debug!(token, "discarding response for superseded request");
            None
        }
    }
}

/// Couples a [`SearchState`] to a directory. Failures end up in the state,
/// never in the return value.
pub struct SearchSession<D: ?Sized> {
    directory: Arc<D>,
    state: SearchState,
}

impl<D> SearchSession<D>
where
    D: UserDirectory + ?Sized,
{
    pub fn new(directory: Arc<D>, page_size: u32) -> Self {
        Self {
            directory,
            state: SearchState::new(page_size),
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn directory(&self) -> &Arc<D> {
        &self.directory
    }

    pub async fn submit(&mut self, filters: SearchFilters) -> &SearchState {
        match self.state.submit(filters) {
            Ok(request) => self.run(request).await,
            Err(err) => tracing::warn!("search rejected: {err}"),
        }
        &self.state
    }

    pub async fn load_more(&mut self) -> &SearchState {
        match self.state.load_more() {
            Some(request) => self.run(request).await,
            None => tracing::debug!("nothing more to load"),
        }
        &self.state
    }

    pub fn reset(&mut self) -> &SearchState {
        self.state.reset();
        &self.state
    }

    async fn run(&mut self, request: PageRequest) {
        let outcome = self
            .directory
            .search_users(&request.filters, request.page, request.per_page)
            .await;

        match outcome {
            Ok(page) => {
                self.state.apply_page(request.token, page);
            }
            Err(err) => {
                tracing::error!(page = request.page, "search failed: {err}");
                self.state.apply_failure(request.token, &err);
            }
        }
    }
}
