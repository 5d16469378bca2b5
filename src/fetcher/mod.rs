pub mod endpoint;
pub mod http_fetcher;
pub mod remote;

use async_trait::async_trait;
use url::Url;

use crate::app::TransportError;

pub use endpoint::Endpoint;
pub use http_fetcher::HttpFetcher;
pub use remote::{Mapper, RemoteLoader};

/// Raw response handed to a mapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Transport contract. Dropping the returned future cancels the request.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &Url) -> Result<HttpResponse, TransportError>;
}
