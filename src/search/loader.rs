//! Lazily fetched, session-cached search index
//!
//! Nothing is fetched until the first non-empty query. Queries that arrive
//! while that fetch is in flight wait for it instead of starting their own.
//! A successful fetch is cached for the loader's lifetime; a failed one is
//! logged and reported as "no results", and the next query may try again.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

use super::{IndexSource, SearchHit, SearchIndex};

#[derive(Clone)]
enum Progress {
    Pending,
    Done(Option<Arc<SearchIndex>>),
}

enum Slot {
    Empty,
    Loading(watch::Receiver<Progress>),
    Ready(Arc<SearchIndex>),
}

enum Action {
    Ready(Arc<SearchIndex>),
    Wait(watch::Receiver<Progress>),
    Fetch(watch::Sender<Progress>),
}

/// Single-flight loader for a search index source
pub struct SearchIndexLoader<S> {
    source: S,
    slot: Mutex<Slot>,
    fetches: AtomicUsize,
    max_results: usize,
}

impl<S: IndexSource> SearchIndexLoader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            slot: Mutex::new(Slot::Empty),
            fetches: AtomicUsize::new(0),
            max_results: 0,
        }
    }

    /// Cap the number of hits per query (0 = unlimited)
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Fuzzy search titles; an empty query never triggers a fetch
    pub async fn search(&self, query: &str) -> Vec<SearchHit> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        match self.ensure_loaded().await {
            Some(index) => index.search(query, self.max_results),
            None => Vec::new(),
        }
    }

    /// The cached index, fetching it first if needed
    pub async fn ensure_loaded(&self) -> Option<Arc<SearchIndex>> {
        let action = {
            let mut slot = self.lock_slot();
            match &*slot {
                Slot::Ready(index) => Action::Ready(Arc::clone(index)),
                Slot::Loading(rx) => Action::Wait(rx.clone()),
                Slot::Empty => {
                    let (tx, rx) = watch::channel(Progress::Pending);
                    *slot = Slot::Loading(rx);
                    Action::Fetch(tx)
                }
            }
        };

        match action {
            Action::Ready(index) => Some(index),
            Action::Wait(rx) => wait_for(rx).await,
            Action::Fetch(tx) => self.fetch_once(tx).await,
        }
    }

    /// Whether the index is cached
    pub fn is_loaded(&self) -> bool {
        matches!(&*self.lock_slot(), Slot::Ready(_))
    }

    /// Number of fetches issued so far
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    async fn fetch_once(&self, tx: watch::Sender<Progress>) -> Option<Arc<SearchIndex>> {
        let mut guard = InFlight {
            slot: &self.slot,
            armed: true,
        };
        self.fetches.fetch_add(1, Ordering::SeqCst);
        tracing::debug!("Fetching search index from {}", self.source.location());

        let outcome = match self.source.fetch().await {
            Ok(entries) => {
                tracing::info!("Loaded search index with {} entries", entries.len());
                Some(Arc::new(SearchIndex::new(entries)))
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to load search index from {}: {}",
                    self.source.location(),
                    e
                );
                None
            }
        };

        guard.complete(outcome.clone());
        tx.send_replace(Progress::Done(outcome.clone()));
        outcome
    }

    fn lock_slot(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

async fn wait_for(mut rx: watch::Receiver<Progress>) -> Option<Arc<SearchIndex>> {
    loop {
        let progress = rx.borrow_and_update().clone();
        if let Progress::Done(outcome) = progress {
            return outcome;
        }
        if rx.changed().await.is_err() {
            // Fetch abandoned before completing
            let progress = rx.borrow().clone();
            return match progress {
                Progress::Done(outcome) => outcome,
                Progress::Pending => None,
            };
        }
    }
}

/// Clears the in-flight marker if the fetching future is dropped mid-flight
struct InFlight<'a> {
    slot: &'a Mutex<Slot>,
    armed: bool,
}

impl InFlight<'_> {
    fn complete(&mut self, outcome: Option<Arc<SearchIndex>>) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = match outcome {
            Some(index) => Slot::Ready(index),
            None => Slot::Empty,
        };
        self.armed = false;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
            *slot = Slot::Empty;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{FetchError, SearchIndexEntry};
    use async_trait::async_trait;
    use std::sync::atomic::AtomicBool;
    use std::time::Duration;
    use tokio::sync::Notify;

    /// Source that counts fetches and only resolves once released
    struct GatedSource {
        calls: AtomicUsize,
        gate: Notify,
        fail: AtomicBool,
    }

    impl GatedSource {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                gate: Notify::new(),
                fail: AtomicBool::new(false),
            })
        }
    }

    #[async_trait]
    impl IndexSource for Arc<GatedSource> {
        async fn fetch(&self) -> Result<Vec<SearchIndexEntry>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.gate.notified().await;
            if self.fail.load(Ordering::SeqCst) {
                let err = serde_json::from_str::<Vec<SearchIndexEntry>>("{").unwrap_err();
                return Err(FetchError::Parse(err));
            }
            Ok(vec![
                SearchIndexEntry {
                    id: "1".to_string(),
                    title: "Infinite scroll with hooks".to_string(),
                    slug: "/infinite-scroll/".to_string(),
                },
                SearchIndexEntry {
                    id: "2".to_string(),
                    title: "Category filters".to_string(),
                    slug: "/categories/".to_string(),
                },
            ])
        }

        fn location(&self) -> String {
            "gated".to_string()
        }
    }

    async fn release_later(source: Arc<GatedSource>) {
        tokio::time::sleep(Duration::from_millis(10)).await;
        source.gate.notify_waiters();
    }

    #[tokio::test]
    async fn test_empty_query_does_not_fetch() {
        let source = GatedSource::new();
        let loader = SearchIndexLoader::new(source.clone());
        assert!(loader.search("").await.is_empty());
        assert!(loader.search("   ").await.is_empty());
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
        assert!(!loader.is_loaded());
    }

    #[tokio::test]
    async fn test_concurrent_queries_share_one_fetch() {
        let source = GatedSource::new();
        let loader = SearchIndexLoader::new(source.clone());

        let (first, second, _) = tokio::join!(
            loader.search("scroll"),
            loader.search("filter"),
            release_later(source.clone())
        );

        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(loader.fetch_count(), 1);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].id, "1");
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].id, "2");

        // Cached afterwards
        assert!(loader.is_loaded());
        assert_eq!(loader.search("category").await.len(), 1);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_fetch_yields_empty_then_refetches() {
        let source = GatedSource::new();
        source.fail.store(true, Ordering::SeqCst);
        let loader = SearchIndexLoader::new(source.clone());

        let (first, second, _) = tokio::join!(
            loader.search("scroll"),
            loader.search("scroll"),
            release_later(source.clone())
        );
        assert!(first.is_empty());
        assert!(second.is_empty());
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert!(!loader.is_loaded());

        source.fail.store(false, Ordering::SeqCst);
        let (hits, _) = tokio::join!(loader.search("scroll"), release_later(source.clone()));
        assert_eq!(hits.len(), 1);
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_cancelled_fetch_clears_in_flight() {
        let source = GatedSource::new();
        let loader = SearchIndexLoader::new(source.clone());

        let cancelled =
            tokio::time::timeout(Duration::from_millis(5), loader.search("scroll")).await;
        assert!(cancelled.is_err());
        assert!(!loader.is_loaded());

        let (hits, _) = tokio::join!(loader.search("scroll"), release_later(source.clone()));
        assert_eq!(hits.len(), 1);
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_max_results() {
        let source = GatedSource::new();
        let loader = SearchIndexLoader::new(source.clone()).with_max_results(1);
        let (hits, _) = tokio::join!(loader.search("i"), release_later(source.clone()));
        assert_eq!(hits.len(), 1);
    }
}
