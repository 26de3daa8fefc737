//! Common transport-layer types shared by every client of the catalog API.
//! These structs mirror the backend's JSON payloads so the browser frontend
//! and the native host deserialize responses without duplicating shapes.

mod converters;

pub use converters::{GenreField, Label};

use serde::{Deserialize, Serialize};

// ===================== Endpoints =====================

/// Every backend route the dashboard talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Backend root, returns the static visualization paths.
    Home,
    Years,
    Filter,
    AllData,
    CountryData,
    TypeData,
    MatplotlibChart,
}

impl Endpoint {
    /// Path relative to the API base URL. The backend expects trailing slashes.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Home => "/",
            Endpoint::Years => "/years/",
            Endpoint::Filter => "/filter/",
            Endpoint::AllData => "/all_data/",
            Endpoint::CountryData => "/country_data/",
            Endpoint::TypeData => "/type_data/",
            Endpoint::MatplotlibChart => "/matplotlib_chart/",
        }
    }
}

/// A single GET request against the catalog API.
///
/// Query parameters are kept as raw pairs; encoding is left to the HTTP
/// client so free-text genres survive untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub endpoint: Endpoint,
    pub query: Vec<(&'static str, String)>,
}

impl ApiRequest {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            query: Vec::new(),
        }
    }

    /// Adds `key=value` when a value is present; absent filters are omitted.
    pub fn param(mut self, key: &'static str, value: Option<impl ToString>) -> Self {
        if let Some(value) = value {
            self.query.push((key, value.to_string()));
        }
        self
    }

    /// Looks up a query parameter by name.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Joins the endpoint path onto a base URL without doubling slashes.
    pub fn url(&self, base: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), self.endpoint.path())
    }
}

// ===================== Years =====================

/// Response of `/years/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct YearsResponse {
    pub years: Vec<i32>,
}

// ===================== Content =====================

/// One catalog row as served by `/filter/` (mirrors the backend's `values()` call).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentRowDto {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub release_year: i32,
    #[serde(default)]
    pub rating: Option<String>,
    /// Sent as `listed_in` (comma-joined) by the stock backend, `genres` by newer ones.
    #[serde(alias = "listed_in", default)]
    pub genres: GenreField,
}

/// Response of `/filter/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentResponse {
    pub content: Vec<ContentRowDto>,
}

// ===================== Aggregates =====================

/// Response of `/all_data/`: show counts per release year.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AllDataResponse {
    #[serde(rename = "barChartLabels")]
    pub labels: Vec<Label>,
    #[serde(rename = "barChartData")]
    pub data: Vec<u64>,
    /// Unfiltered baseline, only sent by backends that support the overlay view.
    #[serde(rename = "barChartDataAll", default, skip_serializing_if = "Option::is_none")]
    pub data_all: Option<Vec<u64>>,
}

/// Response of `/country_data/` and `/type_data/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BreakdownResponse {
    pub labels: Vec<Label>,
    pub data: Vec<u64>,
}

// ===================== Images =====================

/// Response of `/matplotlib_chart/`: a base64 encoded PNG.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartImageResponse {
    pub chart: String,
}

/// Response of the backend root: where the pre-rendered static graphs live.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VisualizationPathsResponse {
    pub genres_graph: String,
    pub ratings_graph: String,
    pub trend_graph: String,
}
