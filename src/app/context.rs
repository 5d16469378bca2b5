use std::path::PathBuf;
use std::sync::Arc;

use crate::app::error::{Result, TributaryError};
use crate::compose::{Executor, FeedPipeline, TokioExecutor};
use crate::config::Config;
use crate::fetcher::{HttpClient, HttpFetcher};
use crate::store::{FeedStore, ImageDataStore, InMemoryStore, SqliteStore};

pub struct AppContext {
    pub config: Config,
    pub pipeline: FeedPipeline,
}

impl AppContext {
    /// Builds the pipeline over the on-disk SQLite cache.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(config: Config) -> Result<Self> {
        let db_path = match config.cache.db_path.clone() {
            Some(p) => p,
            None => Self::default_db_path()?,
        };

        let store = Arc::new(SqliteStore::new(&db_path)?);
        Self::with_store(config, store)
    }

    pub fn in_memory(config: Config) -> Result<Self> {
        Self::with_store(config, Arc::new(InMemoryStore::new()))
    }

    fn with_store<S>(config: Config, store: Arc<S>) -> Result<Self>
    where
        S: FeedStore + ImageDataStore + 'static,
    {
        let client: Arc<dyn HttpClient> = Arc::new(HttpFetcher::new(&config.api)?);
        let executor: Arc<dyn Executor> = Arc::new(TokioExecutor::current()?);
        let feed_store: Arc<dyn FeedStore> = store.clone();
        let image_store: Arc<dyn ImageDataStore> = store;

        let pipeline = FeedPipeline::new(
            client,
            config.api.base_url.clone(),
            feed_store,
            image_store,
            executor,
        )
        .with_page_limit(config.api.page_limit);

        Ok(Self { config, pipeline })
    }

    fn default_db_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| TributaryError::Other("Could not find data directory".into()))?;
        let tributary_dir = data_dir.join("tributary");
        std::fs::create_dir_all(&tributary_dir)?;
        Ok(tributary_dir.join("tributary.db"))
    }
}
