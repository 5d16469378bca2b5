use async_trait::async_trait;
use tracing::warn;

use crate::app::LoadResult;
use crate::compose::{Cache, Loader};

/// Saves each value produced by `loader` into `cache` before handing it on.
///
/// The value returned is always the one the wrapped loader produced. Save
/// failures are logged and otherwise ignored.
pub struct CachingLoader<L, C> {
    loader: L,
    cache: C,
}

impl<L, C> CachingLoader<L, C> {
    pub fn new(loader: L, cache: C) -> Self {
        Self { loader, cache }
    }
}

#[async_trait]
impl<T, L, C> Loader<T> for CachingLoader<L, C>
where
    T: Send + 'static,
    L: Loader<T>,
    C: Cache<T>,
{
    async fn load(&self) -> LoadResult<T> {
        let value = self.loader.load().await?;
        if let Err(e) = self.cache.save(&value) {
            warn!("Failed to cache loaded value: {}", e);
        }
        Ok(value)
    }
}
