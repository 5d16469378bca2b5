use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use url::Url;

use crate::app::StoreError;
use crate::store::{CachedFeed, FeedStore, ImageDataStore, LocalFeedItem, StoreResult};

/// Process-local store. Nothing survives a restart.
#[derive(Default)]
pub struct InMemoryStore {
    feed: Mutex<Option<CachedFeed>>,
    images: Mutex<HashMap<Url, Vec<u8>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FeedStore for InMemoryStore {
    fn delete_cached_feed(&self) -> StoreResult<()> {
        *self.feed.lock().map_err(|_| StoreError::Poisoned)? = None;
        Ok(())
    }

    fn insert(&self, items: &[LocalFeedItem], timestamp: DateTime<Utc>) -> StoreResult<()> {
        *self.feed.lock().map_err(|_| StoreError::Poisoned)? = Some(CachedFeed {
            items: items.to_vec(),
            timestamp,
        });
        Ok(())
    }

    fn retrieve(&self) -> StoreResult<Option<CachedFeed>> {
        Ok(self.feed.lock().map_err(|_| StoreError::Poisoned)?.clone())
    }
}

impl ImageDataStore for InMemoryStore {
    fn retrieve_data(&self, url: &Url) -> StoreResult<Option<Vec<u8>>> {
        let images = self.images.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(images.get(url).cloned())
    }

    fn insert_data(&self, data: &[u8], url: &Url) -> StoreResult<()> {
        self.images
            .lock()
            .map_err(|_| StoreError::Poisoned)?
            .insert(url.clone(), data.to_vec());
        Ok(())
    }
}
