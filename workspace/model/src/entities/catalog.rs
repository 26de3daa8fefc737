use common::{VisualizationPathsResponse, YearsResponse};
use serde::{Deserialize, Serialize};

/// Distinct release years offered by the year filter.
///
/// Loaded once per session. Duplicates are dropped, backend order is kept.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct YearCatalog {
    years: Vec<i32>,
}

impl YearCatalog {
    pub fn new(years: impl IntoIterator<Item = i32>) -> Self {
        let mut unique = Vec::new();
        for year in years {
            if !unique.contains(&year) {
                unique.push(year);
            }
        }
        Self { years: unique }
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn contains(&self, year: i32) -> bool {
        self.years.contains(&year)
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

impl From<YearsResponse> for YearCatalog {
    fn from(response: YearsResponse) -> Self {
        YearCatalog::new(response.years)
    }
}

/// Server-rendered chart for the current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartImage {
    base64_png: String,
}

impl ChartImage {
    pub fn new(base64_png: impl Into<String>) -> Self {
        Self {
            base64_png: base64_png.into(),
        }
    }

    /// Inline URL usable as an `<img src>`.
    pub fn data_url(&self) -> String {
        format!("data:image/png;base64,{}", self.base64_png)
    }
}

/// Where the three pre-rendered catalog graphs can be fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualizationSet {
    pub genres: String,
    pub ratings: String,
    pub trend: String,
}

impl VisualizationSet {
    /// The fixed `/static/*.png` locations every backend serves.
    pub fn static_defaults(base_url: &str) -> Self {
        Self {
            genres: resolve(base_url, "/static/genres.png"),
            ratings: resolve(base_url, "/static/ratings.png"),
            trend: resolve(base_url, "/static/trend.png"),
        }
    }

    /// Paths announced by the backend root, resolved against the base URL.
    pub fn from_paths(base_url: &str, paths: VisualizationPathsResponse) -> Self {
        Self {
            genres: resolve(base_url, &paths.genres_graph),
            ratings: resolve(base_url, &paths.ratings_graph),
            trend: resolve(base_url, &paths.trend_graph),
        }
    }
}

fn resolve(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") || path.starts_with("data:") {
        return path.to_string();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
