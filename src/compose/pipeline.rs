use std::future::Future;
use std::sync::Arc;

use url::Url;
use uuid::Uuid;

use crate::app::LoadResult;
use crate::cache::{Clock, LocalFeedLoader, LocalImageDataLoader};
use crate::compose::{Executor, FeedPagination, LoadTask, Loader, LoaderExt};
use crate::domain::{Comment, FeedItem, Paginated};
use crate::fetcher::{Endpoint, HttpClient, RemoteLoader};
use crate::normalizer::{map_comments, map_image_data};
use crate::store::{FeedStore, ImageDataStore};

pub const DEFAULT_PAGE_LIMIT: usize = 10;

/// Composition root wiring remote loaders, local caches and executors into
/// the feed, comments and image data pipelines.
///
/// ```text
/// feed:     remote page → cache → (background) → fallback: local feed → first page
/// more:     local feed ⨝ remote next page → concatenate → page → cache
/// image:    local data → fallback: remote data → cache → (background) → (background)
/// comments: remote comments → (background)
/// ```
#[derive(Clone)]
pub struct FeedPipeline {
    client: Arc<dyn HttpClient>,
    base_url: Url,
    page_limit: usize,
    local_feed: Arc<LocalFeedLoader<dyn FeedStore>>,
    local_images: Arc<LocalImageDataLoader<dyn ImageDataStore>>,
    executor: Arc<dyn Executor>,
    delivery: Option<Arc<dyn Executor>>,
}

impl FeedPipeline {
    pub fn new(
        client: Arc<dyn HttpClient>,
        base_url: Url,
        feed_store: Arc<dyn FeedStore>,
        image_store: Arc<dyn ImageDataStore>,
        executor: Arc<dyn Executor>,
    ) -> Self {
        Self {
            client,
            base_url,
            page_limit: DEFAULT_PAGE_LIMIT,
            local_feed: Arc::new(LocalFeedLoader::with_system_clock(feed_store)),
            local_images: Arc::new(LocalImageDataLoader::new(image_store)),
            executor,
            delivery: None,
        }
    }

    pub fn with_page_limit(mut self, page_limit: usize) -> Self {
        self.page_limit = page_limit;
        self
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        let store = self.local_feed.store().clone();
        self.local_feed = Arc::new(LocalFeedLoader::new(store, clock));
        self
    }

    /// Completions of tasks started by this pipeline are re-dispatched
    /// through `delivery`.
    pub fn with_delivery(mut self, delivery: Arc<dyn Executor>) -> Self {
        self.delivery = Some(delivery);
        self
    }

    pub fn local_feed(&self) -> &Arc<LocalFeedLoader<dyn FeedStore>> {
        &self.local_feed
    }

    fn pagination(&self) -> FeedPagination {
        FeedPagination::new(
            self.client.clone(),
            self.base_url.clone(),
            self.page_limit,
            self.local_feed.clone(),
        )
    }

    /// First feed page from the remote, or from the local cache when the
    /// remote fails.
    pub async fn load_feed(&self) -> LoadResult<Paginated<FeedItem>> {
        let pagination = self.pagination();

        let items = pagination
            .page_loader(None)
            .caching(self.local_feed.clone())
            .scheduled(self.executor.clone())
            .fallback(self.local_feed.clone())
            .load()
            .await?;

        Ok(pagination.first_page(items))
    }

    pub async fn load_comments(&self, image_id: Uuid) -> LoadResult<Vec<Comment>> {
        let url = Endpoint::ImageComments(image_id).url(&self.base_url);

        RemoteLoader::new(self.client.clone(), url, map_comments)
            .scheduled(self.executor.clone())
            .load()
            .await
    }

    /// Image data from the local cache, or from `url` when not cached.
    pub async fn load_image_data(&self, url: &Url) -> LoadResult<Vec<u8>> {
        let remote = RemoteLoader::new(self.client.clone(), url.clone(), map_image_data)
            .caching(self.local_images.entry(url.clone()))
            .scheduled(self.executor.clone());

        self.local_images
            .entry(url.clone())
            .fallback(remote)
            .scheduled(self.executor.clone())
            .load()
            .await
    }

    /// Deletes the cached feed if it is stale or unreadable.
    pub fn validate_cache(&self) {
        self.local_feed.validate_cache();
    }

    pub fn start_feed<C>(&self, completion: C) -> LoadTask
    where
        C: FnOnce(LoadResult<Paginated<FeedItem>>) + Send + 'static,
    {
        let pipeline = self.clone();
        self.start(async move { pipeline.load_feed().await }, completion)
    }

    /// Starts loading the page after `page`, unless it is the last one.
    pub fn start_load_more<C>(&self, page: &Paginated<FeedItem>, completion: C) -> Option<LoadTask>
    where
        C: FnOnce(LoadResult<Paginated<FeedItem>>) + Send + 'static,
    {
        let next = page.load_more()?;
        Some(self.start(next, completion))
    }

    pub fn start_comments<C>(&self, image_id: Uuid, completion: C) -> LoadTask
    where
        C: FnOnce(LoadResult<Vec<Comment>>) + Send + 'static,
    {
        let pipeline = self.clone();
        self.start(async move { pipeline.load_comments(image_id).await }, completion)
    }

    pub fn start_image_data<C>(&self, url: Url, completion: C) -> LoadTask
    where
        C: FnOnce(LoadResult<Vec<u8>>) + Send + 'static,
    {
        let pipeline = self.clone();
        self.start(async move { pipeline.load_image_data(&url).await }, completion)
    }

    fn start<T, Fut, C>(&self, operation: Fut, completion: C) -> LoadTask
    where
        T: Send + 'static,
        Fut: Future<Output = T> + Send + 'static,
        C: FnOnce(T) + Send + 'static,
    {
        LoadTask::start_with_delivery(
            self.executor.as_ref(),
            self.delivery.clone(),
            operation,
            completion,
        )
    }
}
