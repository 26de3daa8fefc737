use async_trait::async_trait;
use common::ApiRequest;
use compute::CatalogTransport;
use model::FetchError;
use std::time::Duration;
use tracing::{debug, instrument};

/// [`CatalogTransport`] over a reqwest client.
///
/// Transport failures, timeouts and non-2xx statuses all surface as
/// [`FetchError::Network`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| FetchError::network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait(?Send)]
impl CatalogTransport for HttpTransport {
    #[instrument(skip(self), fields(endpoint = request.endpoint.path()))]
    async fn get(&self, request: &ApiRequest) -> Result<String, FetchError> {
        let url = request.url(&self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&request.query)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::network(format!("request to {url} timed out"))
                } else {
                    FetchError::network(e.to_string())
                }
            })?;

        let status = response.status();
        debug!(%status, "Response received");
        if !status.is_success() {
            return Err(FetchError::network(format!("HTTP error: {}", status.as_u16())));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::network(format!("failed to read response body: {e}")))
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
