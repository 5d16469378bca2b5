use std::sync::Arc;

use async_trait::async_trait;
use futures::future::FutureExt;
use url::Url;

use crate::app::LoadResult;
use crate::cache::LocalFeedLoader;
use crate::compose::{Loader, LoaderExt};
use crate::domain::{FeedItem, LoadMore, Paginated};
use crate::fetcher::{Endpoint, HttpClient, RemoteLoader};
use crate::normalizer::map_feed_items;
use crate::store::FeedStore;

/// Builds feed pages whose continuation fetches the items after the last
/// one shown.
///
/// Holds no accumulated state: every "load more" re-reads the local cache
/// and appends the newly fetched batch to it.
#[derive(Clone)]
pub struct FeedPagination {
    client: Arc<dyn HttpClient>,
    base_url: Url,
    page_limit: usize,
    local: Arc<LocalFeedLoader<dyn FeedStore>>,
}

impl FeedPagination {
    pub fn new(
        client: Arc<dyn HttpClient>,
        base_url: Url,
        page_limit: usize,
        local: Arc<LocalFeedLoader<dyn FeedStore>>,
    ) -> Self {
        Self {
            client,
            base_url,
            page_limit,
            local,
        }
    }

    /// Remote loader for the page following `after`, or the first page.
    pub fn page_loader(&self, after: Option<&FeedItem>) -> RemoteLoader<Vec<FeedItem>> {
        let endpoint = Endpoint::Feed {
            limit: self.page_limit,
            after: after.map(|item| item.id),
        };
        RemoteLoader::new(self.client.clone(), endpoint.url(&self.base_url), map_feed_items)
    }

    pub fn first_page(&self, items: Vec<FeedItem>) -> Paginated<FeedItem> {
        let load_more = self.load_more_after(items.last());
        Paginated::new(items, load_more)
    }

    /// Loads the page after `last`, caching the combined item list.
    pub async fn next_page(&self, last: &FeedItem) -> LoadResult<Paginated<FeedItem>> {
        NextPage {
            pagination: self.clone(),
            remote: self.page_loader(Some(last)),
        }
        .caching(self.local.clone())
        .load()
        .await
    }

    fn load_more_after(&self, last: Option<&FeedItem>) -> Option<LoadMore<FeedItem>> {
        let last = last?.clone();
        let pagination = self.clone();

        Some(Arc::new(move || {
            let pagination = pagination.clone();
            let last = last.clone();
            async move { pagination.next_page(&last).await }.boxed()
        }))
    }
}

struct NextPage {
    pagination: FeedPagination,
    remote: RemoteLoader<Vec<FeedItem>>,
}

#[async_trait]
impl Loader<Paginated<FeedItem>> for NextPage {
    async fn load(&self) -> LoadResult<Paginated<FeedItem>> {
        let (cached, fetched) = futures::try_join!(self.pagination.local.load(), self.remote.load())?;

        let load_more = self.pagination.load_more_after(fetched.last());
        let mut items = cached;
        items.extend(fetched);

        Ok(Paginated::new(items, load_more))
    }
}
