use async_trait::async_trait;
use common::ApiRequest;
use compute::CatalogTransport;
use gloo_net::http::Request;
use model::FetchError;

/// [`CatalogTransport`] over the browser's fetch API.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowserTransport {
    base_url: String,
}

impl BrowserTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

#[async_trait(?Send)]
impl CatalogTransport for BrowserTransport {
    async fn get(&self, request: &ApiRequest) -> Result<String, FetchError> {
        let url = request.url(&self.base_url);
        log::debug!("GET request to: {} {:?}", url, request.query);

        let response = Request::get(&url)
            .query(request.query.iter().map(|(k, v)| (*k, v.as_str())))
            .send()
            .await
            .map_err(|e| {
                let error_msg = format!("Request failed: {}", e);
                log::error!("GET {} - {}", url, error_msg);
                FetchError::network(error_msg)
            })?;

        if !response.ok() {
            let error_msg = format!("HTTP error: {}", response.status());
            log::error!("GET {} - {}", url, error_msg);
            return Err(FetchError::network(error_msg));
        }

        log::trace!("GET {} - Response received", url);
        response.text().await.map_err(|e| {
            let error_msg = format!("Failed to read response: {}", e);
            log::error!("GET {} - {}", url, error_msg);
            FetchError::network(error_msg)
        })
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
