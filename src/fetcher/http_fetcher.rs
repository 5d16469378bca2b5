use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::app::TransportError;
use crate::config::ApiConfig;
use crate::fetcher::{HttpClient, HttpResponse};

/// [`HttpClient`] backed by reqwest.
///
/// Every status code is returned as a response; only failures to get a
/// response at all are errors.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &ApiConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .brotli(true)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for HttpFetcher {
    async fn get(&self, url: &Url) -> Result<HttpResponse, TransportError> {
        debug!("GET {}", url);
        let response = self.client.get(url.as_str()).send().await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        Ok(HttpResponse { status, body })
    }
}
