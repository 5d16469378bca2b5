use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::app::LoadResult;
use crate::cache::policy::FeedCachePolicy;
use crate::compose::{Cache, Loader};
use crate::domain::{FeedItem, Paginated};
use crate::store::{FeedStore, LocalFeedItem};

/// Source of the current time.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

pub fn system_clock() -> Clock {
    Arc::new(Utc::now)
}

/// Loads, saves and validates the cached feed.
pub struct LocalFeedLoader<S: ?Sized> {
    store: Arc<S>,
    current_date: Clock,
}

impl<S: FeedStore + ?Sized> LocalFeedLoader<S> {
    pub fn new(store: Arc<S>, current_date: Clock) -> Self {
        Self {
            store,
            current_date,
        }
    }

    pub fn with_system_clock(store: Arc<S>) -> Self {
        Self::new(store, system_clock())
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Returns the cached items if they are still fresh.
    ///
    /// An empty or stale cache is not an error; it yields no items. Stale
    /// data is left in place for [`LocalFeedLoader::validate_cache`].
    pub fn load_items(&self) -> LoadResult<Vec<FeedItem>> {
        match self.store.retrieve()? {
            Some(cache) if FeedCachePolicy::validate(cache.timestamp, (self.current_date)()) => {
                Ok(cache.items.into_iter().map(FeedItem::from).collect())
            }
            Some(_) | None => Ok(Vec::new()),
        }
    }

    /// Replaces the cached feed with `items`, stamped with the current time.
    ///
    /// The old cache is deleted first; if that fails nothing is inserted.
    pub fn save(&self, items: &[FeedItem]) -> LoadResult<()> {
        self.store.delete_cached_feed()?;

        let local: Vec<LocalFeedItem> = items.iter().map(LocalFeedItem::from).collect();
        self.store.insert(&local, (self.current_date)())?;
        Ok(())
    }

    /// Deletes the cache when it is stale or cannot be read.
    pub fn validate_cache(&self) {
        let expired = match self.store.retrieve() {
            Ok(Some(cache)) => !FeedCachePolicy::validate(cache.timestamp, (self.current_date)()),
            Ok(None) => false,
            Err(e) => {
                warn!("Failed to read feed cache: {}", e);
                true
            }
        };

        if expired {
            info!("Deleting invalid feed cache");
            if let Err(e) = self.store.delete_cached_feed() {
                warn!("Failed to delete feed cache: {}", e);
            }
        }
    }
}

#[async_trait]
impl<S: FeedStore + ?Sized> Loader<Vec<FeedItem>> for LocalFeedLoader<S> {
    async fn load(&self) -> LoadResult<Vec<FeedItem>> {
        self.load_items()
    }
}

impl<S: FeedStore + ?Sized> Cache<Vec<FeedItem>> for LocalFeedLoader<S> {
    fn save(&self, items: &Vec<FeedItem>) -> LoadResult<()> {
        LocalFeedLoader::save(self, items)
    }
}

impl<S: FeedStore + ?Sized> Cache<Paginated<FeedItem>> for LocalFeedLoader<S> {
    fn save(&self, page: &Paginated<FeedItem>) -> LoadResult<()> {
        LocalFeedLoader::save(self, &page.items)
    }
}
