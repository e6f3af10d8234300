use super::model::Results;
use super::pagination::PAGE_SIZE;
use super::query::search_url;
use crate::config::RuntimeConfig;
use crate::error::UpstreamError;
use futures_util::StreamExt;
use reqwest::{Client, StatusCode};
use std::fmt;
use std::time::Duration;
use url::Url;

/// Client for the news search endpoint. Cheap to clone; the connection pool
/// is shared.
#[derive(Clone)]
pub struct NewsClient {
    client: Client,
    endpoint: Url,
    api_key: String,
    max_body_bytes: usize,
}

impl fmt::Debug for NewsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &"<redacted>")
            .field("max_body_bytes", &self.max_body_bytes)
            .finish()
    }
}

impl NewsClient {
    pub fn new(cfg: &RuntimeConfig) -> Result<Self, UpstreamError> {
        let mut builder = Client::builder()
            .user_agent(cfg.user_agent.as_str())
            .gzip(true)
            .connect_timeout(Duration::from_secs(5));
        if let Some(timeout) = cfg.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint: cfg.endpoint.clone(),
            api_key: cfg.api_key.clone(),
            max_body_bytes: cfg.max_body_bytes,
        })
    }

    pub async fn search(
        &self,
        term: &str,
        language: Option<&str>,
        page: i64,
    ) -> Result<Results, UpstreamError> {
        let url = search_url(&self.endpoint, &self.api_key, term, language, page, PAGE_SIZE);
        tracing::debug!(term, page, ?language, "querying upstream");

        let resp = self.client.get(url).send().await?;
        if resp.status() != StatusCode::OK {
            return Err(UpstreamError::Status(resp.status()));
        }

        // Stop reading once the body passes max_body_bytes.
        let max = self.max_body_bytes;
        let mut stream = resp.bytes_stream();
        let mut buf: Vec<u8> = Vec::new();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            if buf.len() + chunk.len() > max {
                return Err(UpstreamError::TooLarge(max));
            }
            buf.extend_from_slice(&chunk);
        }

        let results: Results = serde_json::from_slice(&buf)?;
        tracing::debug!(
            total = results.total_results,
            returned = results.articles.len(),
            "upstream answered"
        );
        Ok(results)
    }
}
