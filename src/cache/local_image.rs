use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::app::{LoadError, LoadResult};
use crate::compose::{Cache, Loader};
use crate::store::ImageDataStore;

/// Reads and writes cached image data. Entries never expire.
pub struct LocalImageDataLoader<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ImageDataStore + ?Sized> LocalImageDataLoader<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Any store failure is reported as [`LoadError::Failed`]; a successful
    /// lookup without an entry as [`LoadError::NotFound`].
    pub fn load_image_data(&self, url: &Url) -> LoadResult<Vec<u8>> {
        match self.store.retrieve_data(url) {
            Ok(Some(data)) => Ok(data),
            Ok(None) => Err(LoadError::NotFound),
            Err(e) => {
                debug!("Image data lookup for {} failed: {}", url, e);
                Err(LoadError::Failed)
            }
        }
    }

    pub fn save(&self, data: &[u8], url: &Url) -> LoadResult<()> {
        self.store.insert_data(data, url)?;
        Ok(())
    }

    /// Binds this loader to one URL so it can take part in composition.
    pub fn entry(self: &Arc<Self>, url: Url) -> ImageDataEntry<S> {
        ImageDataEntry {
            loader: self.clone(),
            url,
        }
    }
}

/// The cached image data of a single URL, as a [`Loader`] and a [`Cache`].
pub struct ImageDataEntry<S: ?Sized> {
    loader: Arc<LocalImageDataLoader<S>>,
    url: Url,
}

#[async_trait]
impl<S: ImageDataStore + ?Sized> Loader<Vec<u8>> for ImageDataEntry<S> {
    async fn load(&self) -> LoadResult<Vec<u8>> {
        self.loader.load_image_data(&self.url)
    }
}

impl<S: ImageDataStore + ?Sized> Cache<Vec<u8>> for ImageDataEntry<S> {
    fn save(&self, data: &Vec<u8>) -> LoadResult<()> {
        self.loader.save(data, &self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::StoreError;
    use crate::store::{InMemoryStore, StoreResult};

    struct FailingStore;

    impl ImageDataStore for FailingStore {
        fn retrieve_data(&self, _url: &Url) -> StoreResult<Option<Vec<u8>>> {
            Err(StoreError::Poisoned)
        }

        fn insert_data(&self, _data: &[u8], _url: &Url) -> StoreResult<()> {
            Err(StoreError::Poisoned)
        }
    }

    fn any_url() -> Url {
        Url::parse("https://example.com/image.png").unwrap()
    }

    #[test]
    fn test_load_fails_on_store_error() {
        let sut = LocalImageDataLoader::new(Arc::new(FailingStore));
        assert!(matches!(
            sut.load_image_data(&any_url()),
            Err(LoadError::Failed)
        ));
    }

    #[test]
    fn test_load_not_found_when_missing() {
        let sut = LocalImageDataLoader::new(Arc::new(InMemoryStore::new()));
        assert!(matches!(
            sut.load_image_data(&any_url()),
            Err(LoadError::NotFound)
        ));
    }

    #[test]
    fn test_load_returns_stored_data() {
        let sut = LocalImageDataLoader::new(Arc::new(InMemoryStore::new()));
        sut.save(b"image", &any_url()).unwrap();
        assert_eq!(sut.load_image_data(&any_url()).unwrap(), b"image".to_vec());
    }

    #[test]
    fn test_save_surfaces_store_error() {
        let sut = LocalImageDataLoader::new(Arc::new(FailingStore));
        assert!(matches!(
            sut.save(b"image", &any_url()),
            Err(LoadError::Store(StoreError::Poisoned))
        ));
    }

    #[tokio::test]
    async fn test_entry_loads_and_caches_for_its_url() {
        let sut = Arc::new(LocalImageDataLoader::new(Arc::new(InMemoryStore::new())));
        let entry = sut.entry(any_url());

        assert!(matches!(entry.load().await, Err(LoadError::NotFound)));
        entry.save(&b"cached".to_vec()).unwrap();
        assert_eq!(entry.load().await.unwrap(), b"cached".to_vec());
    }
}
