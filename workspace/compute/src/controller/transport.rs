use async_trait::async_trait;
use common::ApiRequest;
use model::FetchError;
use serde::de::DeserializeOwned;
use std::rc::Rc;

/// How the controller reaches the catalog API.
///
/// Implementations perform one unauthenticated GET and hand back the body of
/// a 2xx response. Unreachable hosts and non-2xx statuses are
/// [`FetchError::Network`]. Decoding is left to the controller.
///
/// Futures are not required to be `Send` so the browser transport can be
/// built on `gloo-net`.
#[async_trait(?Send)]
pub trait CatalogTransport {
    async fn get(&self, request: &ApiRequest) -> Result<String, FetchError>;

    /// Base URL of the API, used to resolve static image links.
    fn base_url(&self) -> &str;
}

#[async_trait(?Send)]
impl<T: CatalogTransport + ?Sized> CatalogTransport for Rc<T> {
    async fn get(&self, request: &ApiRequest) -> Result<String, FetchError> {
        (**self).get(request).await
    }

    fn base_url(&self) -> &str {
        (**self).base_url()
    }
}

/// Decodes a response body, mapping shape mismatches to [`FetchError::Malformed`].
pub fn decode<R: DeserializeOwned>(request: &ApiRequest, body: &str) -> Result<R, FetchError> {
    serde_json::from_str(body).map_err(|e| {
        FetchError::malformed(format!("{}: {}", request.endpoint.path(), e))
    })
}
