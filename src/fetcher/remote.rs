use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::app::{LoadError, LoadResult};
use crate::compose::Loader;
use crate::fetcher::HttpClient;

/// Turns a raw response body and status code into a resource.
pub type Mapper<R> = fn(&[u8], u16) -> LoadResult<R>;

/// Fetches `url` through an [`HttpClient`] and maps the response.
///
/// Transport failures all become [`LoadError::Connectivity`]; mapper errors
/// pass through unchanged.
pub struct RemoteLoader<R> {
    client: Arc<dyn HttpClient>,
    url: Url,
    mapper: Mapper<R>,
}

impl<R> RemoteLoader<R> {
    pub fn new(client: Arc<dyn HttpClient>, url: Url, mapper: Mapper<R>) -> Self {
        Self {
            client,
            url,
            mapper,
        }
    }
}

#[async_trait]
impl<R: Send + 'static> Loader<R> for RemoteLoader<R> {
    async fn load(&self) -> LoadResult<R> {
        let response = self.client.get(&self.url).await.map_err(|e| {
            debug!("Request to {} failed: {}", self.url, e);
            LoadError::Connectivity
        })?;

        (self.mapper)(&response.body, response.status)
    }
}
