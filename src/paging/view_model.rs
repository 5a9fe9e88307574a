use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::{debug, warn};

use super::key::{Identified, RecordKey};
use super::page::Page;
use crate::error::{ConsoleError, Result};

/// Remote source of pages.
#[async_trait]
pub trait PageSource<T>: Send + Sync {
    async fn fetch_page(&self, page: u32, size: u32) -> Result<Page<T>>;
}

/// Rendering backend for a list screen.
pub trait ListView<T>: Send + Sync {
    /// Called synchronously before a fetch is issued
    fn show_loading(&self);
    fn show_items(&self, items: &[T]);
    fn show_pagination(&self, page: &Page<T>);
    /// Failed load; the previous items stay valid
    fn show_error(&self, message: &str);
    /// Failed action
    fn report_failure(&self, message: &str);
}

/// Which page a successful action reloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTarget {
    CurrentPage,
    FirstPage,
}

/// How overlapping loads are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPolicy {
    /// Every completion is applied; the last one to resolve wins
    LastResolved,
    /// Completions from loads issued before the newest one are dropped
    LatestIssued,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Failed,
    /// Discarded because a newer load was issued meanwhile
    Superseded,
}

struct ListState<T> {
    current_page: u32,
    total_pages: u32,
    cached_items: Vec<T>,
    filter_query: Option<RecordKey>,
    issued: u64,
    in_flight: usize,
}

/// Paged list with a local cache and key filter.
///
/// State is replaced wholesale on each successful fetch. Filtering works on
/// the cached page only and never touches the network.
pub struct PagedListViewModel<T> {
    source: Arc<dyn PageSource<T>>,
    view: Arc<dyn ListView<T>>,
    page_size: u32,
    refresh_target: RefreshTarget,
    policy: LoadPolicy,
    state: Mutex<ListState<T>>,
}

impl<T> PagedListViewModel<T>
where
    T: Identified + Clone + Send + Sync + 'static,
{
    pub fn new(
        source: Arc<dyn PageSource<T>>,
        view: Arc<dyn ListView<T>>,
        page_size: u32,
        refresh_target: RefreshTarget,
    ) -> Self {
        Self {
            source,
            view,
            page_size: page_size.max(1),
            refresh_target,
            policy: LoadPolicy::LastResolved,
            state: Mutex::new(ListState {
                current_page: 0,
                total_pages: 0,
                cached_items: Vec::new(),
                filter_query: None,
                issued: 0,
                in_flight: 0,
            }),
        }
    }

    pub fn with_policy(mut self, policy: LoadPolicy) -> Self {
        self.policy = policy;
        self
    }

    fn state(&self) -> MutexGuard<'_, ListState<T>> {
        // No lock is held across an await, so a poisoned guard still holds
        // a consistent tuple.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Fetch `page` and replace the cache with it.
    ///
    /// Failures are reported through [`ListView::show_error`] and leave the
    /// cached page untouched.
    pub async fn load(&self, page: u32) -> LoadOutcome {
        let generation = {
            let mut state = self.state();
            state.issued += 1;
            state.in_flight += 1;
            state.issued
        };

        self.view.show_loading();
        debug!("Loading page {} (size {}, request #{})", page, self.page_size, generation);

        let result = self.source.fetch_page(page, self.page_size).await;

        let mut state = self.state();
        state.in_flight = state.in_flight.saturating_sub(1);

        if self.policy == LoadPolicy::LatestIssued && generation < state.issued {
            debug!(
                "Dropping result of request #{}; request #{} is newer",
                generation, state.issued
            );
            return LoadOutcome::Superseded;
        }

        // Rendered while the guard is held so concurrent completions reach
        // the screen in the order they were applied to the cache.
        match result {
            Ok(fetched) => {
                state.cached_items = fetched.content.clone();
                state.current_page = fetched.number;
                state.total_pages = fetched.total_pages;
                state.filter_query = None;
                self.view.show_items(&fetched.content);
                self.view.show_pagination(&fetched);
                LoadOutcome::Loaded
            }
            Err(e) => {
                drop(state);
                warn!("Failed to load page {}: {}", page, e);
                self.view.show_error(&e.to_string());
                LoadOutcome::Failed
            }
        }
    }

    /// Render the cached items matching `key`, or all of them for `None`.
    pub fn filter_by_key(&self, key: Option<RecordKey>) -> Vec<T> {
        let key = key.filter(|k| !matches!(k, RecordKey::Text(t) if t.trim().is_empty()));

        let filtered = {
            let mut state = self.state();
            state.filter_query = key.clone();
            match &key {
                None => state.cached_items.clone(),
                Some(query) => state
                    .cached_items
                    .iter()
                    .filter(|item| {
                        item.record_key()
                            .map_or(false, |id| id.loose_eq(query))
                    })
                    .cloned()
                    .collect(),
            }
        };

        self.view.show_items(&filtered);
        filtered
    }

    /// Load `current_page + delta` if it is in range, otherwise do nothing.
    pub async fn change_page(&self, delta: i64) -> Option<LoadOutcome> {
        let (current, total) = {
            let state = self.state();
            (state.current_page, state.total_pages)
        };

        let target = i64::from(current) + delta;
        if target < 0 || target >= i64::from(total) {
            debug!("Ignoring page change to {} ({} pages)", target, total);
            return None;
        }

        Some(self.load(target as u32).await)
    }

    /// Run an already-confirmed mutating call for `id`, then refresh.
    ///
    /// A missing id fails with [`ConsoleError::MissingIdentifier`] before
    /// anything is sent. Call failures go to [`ListView::report_failure`]
    /// and leave the cache as it was.
    pub async fn dispatch_action<F, Fut>(&self, id: Option<RecordKey>, call: F) -> Result<()>
    where
        F: FnOnce(RecordKey) -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        let id = match id.filter(RecordKey::is_present) {
            Some(id) => id,
            None => {
                let err = ConsoleError::MissingIdentifier;
                self.view.report_failure(&err.user_message());
                return Err(err);
            }
        };

        debug!("Dispatching action for record {}", id);
        if let Err(e) = call(id.clone()).await {
            warn!("Action on record {} failed: {}", id, e);
            self.view.report_failure(&e.user_message());
            return Err(e);
        }

        let target = match self.refresh_target {
            RefreshTarget::CurrentPage => self.current_page(),
            RefreshTarget::FirstPage => 0,
        };
        self.load(target).await;
        Ok(())
    }

    pub fn current_page(&self) -> u32 {
        self.state().current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.state().total_pages
    }

    pub fn cached_items(&self) -> Vec<T> {
        self.state().cached_items.clone()
    }

    pub fn filter_query(&self) -> Option<RecordKey> {
        self.state().filter_query.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state().in_flight > 0
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// First cached record whose key loosely equals `key`
    pub fn find_cached(&self, key: &RecordKey) -> Option<T> {
        self.state()
            .cached_items
            .iter()
            .find(|item| item.record_key().map_or(false, |id| id.loose_eq(key)))
            .cloned()
    }
}
