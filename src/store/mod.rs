pub mod memory;
pub mod sqlite;

use chrono::{DateTime, Utc};
use url::Url;
use uuid::Uuid;

use crate::app::StoreError;
use crate::domain::FeedItem;

pub use memory::InMemoryStore;
pub use sqlite::SqliteStore;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Cache-side representation of a feed item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFeedItem {
    pub id: Uuid,
    pub description: Option<String>,
    pub location: Option<String>,
    pub url: Url,
}

impl From<&FeedItem> for LocalFeedItem {
    fn from(item: &FeedItem) -> Self {
        Self {
            id: item.id,
            description: item.description.clone(),
            location: item.location.clone(),
            url: item.url.clone(),
        }
    }
}

impl From<LocalFeedItem> for FeedItem {
    fn from(local: LocalFeedItem) -> Self {
        Self {
            id: local.id,
            description: local.description,
            location: local.location,
            url: local.url,
        }
    }
}

/// The whole cached feed together with the moment it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedFeed {
    pub items: Vec<LocalFeedItem>,
    pub timestamp: DateTime<Utc>,
}

/// Persistence contract for the cached feed.
///
/// Each call must be atomic on its own. Callers make no assumption about
/// atomicity across calls.
pub trait FeedStore: Send + Sync {
    /// Removes the cached feed. Deleting an empty cache succeeds.
    fn delete_cached_feed(&self) -> StoreResult<()>;

    /// Replaces the entire cached feed.
    fn insert(&self, items: &[LocalFeedItem], timestamp: DateTime<Utc>) -> StoreResult<()>;

    fn retrieve(&self) -> StoreResult<Option<CachedFeed>>;
}

/// Persistence contract for binary image data keyed by URL.
pub trait ImageDataStore: Send + Sync {
    fn retrieve_data(&self, url: &Url) -> StoreResult<Option<Vec<u8>>>;

    /// Inserts or replaces the data stored for `url`.
    fn insert_data(&self, data: &[u8], url: &Url) -> StoreResult<()>;
}
