pub mod test_utils {
    use axum::{
        extract::{Query, State},
        http::StatusCode,
        response::Json,
        routing::get,
        Router,
    };
    use serde_json::{json, Value};
    use std::collections::{HashMap, HashSet};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    type Params = HashMap<String, String>;

    /// One catalog entry served by the mock backend.
    #[derive(Debug, Clone)]
    pub struct CatalogEntry {
        pub title: String,
        pub kind: &'static str,
        pub release_year: i32,
        pub rating: &'static str,
        pub listed_in: String,
        pub country: &'static str,
    }

    fn entry(
        title: &str,
        kind: &'static str,
        release_year: i32,
        rating: &'static str,
        listed_in: &str,
        country: &'static str,
    ) -> CatalogEntry {
        CatalogEntry {
            title: title.to_string(),
            kind,
            release_year,
            rating,
            listed_in: listed_in.to_string(),
            country,
        }
    }

    /// A small catalog: eight hand-picked titles plus 24 stand-up specials
    /// from 2019, enough to page through.
    pub fn sample_catalog() -> Vec<CatalogEntry> {
        let mut catalog = vec![
            entry("Extraction", "Movie", 2020, "R", "Action & Adventure", "United States"),
            entry(
                "Sacred Games",
                "TV Show",
                2018,
                "TV-MA",
                "International TV Shows, TV Action & Adventure, TV Dramas",
                "India",
            ),
            entry(
                "The Old Guard",
                "Movie",
                2020,
                "R",
                "Action & Adventure, Sci-Fi & Fantasy",
                "United States",
            ),
            entry("Lupin", "TV Show", 2021, "TV-MA", "Crime TV Shows, International TV Shows", "France"),
            entry("Dark", "TV Show", 2017, "TV-MA", "Crime TV Shows, TV Mysteries", "Germany"),
            entry("Roma", "Movie", 2018, "R", "Dramas, International Movies", "Mexico"),
            entry("Okja", "Movie", 2017, "TV-MA", "Action & Adventure, Dramas", "South Korea"),
            entry("Kingdom", "TV Show", 2020, "TV-MA", "International TV Shows, TV Horror", "South Korea"),
        ];
        for i in 1..=24 {
            catalog.push(entry(
                &format!("Stand-Up Special {i:02}"),
                "Movie",
                2019,
                "TV-14",
                "Stand-Up Comedy",
                "United States",
            ));
        }
        catalog
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct RecordedRequest {
        pub path: &'static str,
        pub params: Params,
    }

    #[derive(Default)]
    struct Inner {
        requests: Vec<RecordedRequest>,
        failing: HashMap<&'static str, StatusCode>,
        bodies: HashMap<&'static str, Value>,
        delays: HashMap<&'static str, Duration>,
        with_baseline: bool,
    }

    #[derive(Clone)]
    struct MockState {
        catalog: Arc<Vec<CatalogEntry>>,
        inner: Arc<Mutex<Inner>>,
    }

    impl MockState {
        /// Records the request and applies any configured delay, failure or
        /// body override for `path`.
        async fn enter(&self, path: &'static str, params: &Params) -> Result<Option<Value>, StatusCode> {
            let (delay, failure, body) = {
                let mut inner = self.inner.lock().unwrap();
                inner.requests.push(RecordedRequest {
                    path,
                    params: params.clone(),
                });
                (
                    inner.delays.get(path).copied(),
                    inner.failing.get(path).copied(),
                    inner.bodies.get(path).cloned(),
                )
            };
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            match failure {
                Some(status) => Err(status),
                None => Ok(body),
            }
        }

        fn select(&self, params: &Params) -> Vec<&CatalogEntry> {
            let year = params.get("year").and_then(|y| y.parse::<i32>().ok());
            let genre = params.get("genre").map(|g| g.to_lowercase());
            self.catalog
                .iter()
                .filter(|e| year.is_none_or(|y| e.release_year == y))
                .filter(|e| {
                    genre
                        .as_ref()
                        .is_none_or(|g| e.listed_in.to_lowercase().contains(g))
                })
                .collect()
        }

        fn with_baseline(&self) -> bool {
            self.inner.lock().unwrap().with_baseline
        }
    }

    /// Counts by key in order of first appearance.
    fn tally(keys: impl Iterator<Item = String>) -> (Vec<String>, Vec<u64>) {
        let mut labels: Vec<String> = Vec::new();
        let mut counts: Vec<u64> = Vec::new();
        for key in keys {
            match labels.iter().position(|l| *l == key) {
                Some(i) => counts[i] += 1,
                None => {
                    labels.push(key);
                    counts.push(1);
                }
            }
        }
        (labels, counts)
    }

    fn year_counts(entries: &[&CatalogEntry], years: &[i32]) -> Vec<u64> {
        years
            .iter()
            .map(|y| entries.iter().filter(|e| e.release_year == *y).count() as u64)
            .collect()
    }

    async fn home(State(state): State<MockState>, Query(params): Query<Params>) -> Result<Json<Value>, StatusCode> {
        if let Some(body) = state.enter("/", &params).await? {
            return Ok(Json(body));
        }
        Ok(Json(json!({
            "genres_graph": "/static/genres.png",
            "ratings_graph": "/static/ratings.png",
            "trend_graph": "/static/trend.png",
        })))
    }

    async fn years(State(state): State<MockState>, Query(params): Query<Params>) -> Result<Json<Value>, StatusCode> {
        if let Some(body) = state.enter("/years/", &params).await? {
            return Ok(Json(body));
        }
        let mut years: Vec<i32> = state.catalog.iter().map(|e| e.release_year).collect();
        years.sort_unstable_by(|a, b| b.cmp(a));
        years.dedup();
        Ok(Json(json!({ "years": years })))
    }

    async fn filter(State(state): State<MockState>, Query(params): Query<Params>) -> Result<Json<Value>, StatusCode> {
        if let Some(body) = state.enter("/filter/", &params).await? {
            return Ok(Json(body));
        }
        let content: Vec<Value> = state
            .select(&params)
            .into_iter()
            .map(|e| {
                json!({
                    "title": e.title,
                    "type": e.kind,
                    "release_year": e.release_year,
                    "rating": e.rating,
                    "listed_in": e.listed_in,
                })
            })
            .collect();
        Ok(Json(json!({ "content": content })))
    }

    async fn all_data(State(state): State<MockState>, Query(params): Query<Params>) -> Result<Json<Value>, StatusCode> {
        if let Some(body) = state.enter("/all_data/", &params).await? {
            return Ok(Json(body));
        }
        let mut years: Vec<i32> = state.catalog.iter().map(|e| e.release_year).collect();
        years.sort_unstable();
        years.dedup();

        let selected = state.select(&params);
        let mut body = json!({
            "barChartLabels": years,
            "barChartData": year_counts(&selected, &years),
        });
        if state.with_baseline() {
            let everything: Vec<&CatalogEntry> = state.catalog.iter().collect();
            body["barChartDataAll"] = json!(year_counts(&everything, &years));
        }
        Ok(Json(body))
    }

    async fn breakdown(
        state: &MockState,
        path: &'static str,
        params: Params,
        key: impl Fn(&CatalogEntry) -> String,
    ) -> Result<Json<Value>, StatusCode> {
        if let Some(body) = state.enter(path, &params).await? {
            return Ok(Json(body));
        }
        // Genre never narrows the breakdowns.
        let year_only: Params = params.into_iter().filter(|(k, _)| k == "year").collect();
        let (labels, data) = tally(state.select(&year_only).into_iter().map(key));
        Ok(Json(json!({ "labels": labels, "data": data })))
    }

    async fn country_data(State(state): State<MockState>, Query(params): Query<Params>) -> Result<Json<Value>, StatusCode> {
        breakdown(&state, "/country_data/", params, |e| e.country.to_string()).await
    }

    async fn type_data(State(state): State<MockState>, Query(params): Query<Params>) -> Result<Json<Value>, StatusCode> {
        breakdown(&state, "/type_data/", params, |e| e.kind.to_string()).await
    }

    async fn matplotlib_chart(State(state): State<MockState>, Query(params): Query<Params>) -> Result<Json<Value>, StatusCode> {
        if let Some(body) = state.enter("/matplotlib_chart/", &params).await? {
            return Ok(Json(body));
        }
        Ok(Json(json!({ "chart": "iVBORw0KGgoAAAANSUhEUg==" })))
    }

    /// Catalog backend served on an ephemeral local port.
    pub struct MockBackend {
        pub base_url: String,
        state: MockState,
        server: JoinHandle<()>,
    }

    impl MockBackend {
        pub async fn start() -> Self {
            Self::start_with(sample_catalog()).await
        }

        pub async fn start_with(catalog: Vec<CatalogEntry>) -> Self {
            let state = MockState {
                catalog: Arc::new(catalog),
                inner: Arc::new(Mutex::new(Inner::default())),
            };
            let app = Router::new()
                .route("/", get(home))
                .route("/years/", get(years))
                .route("/filter/", get(filter))
                .route("/all_data/", get(all_data))
                .route("/country_data/", get(country_data))
                .route("/type_data/", get(type_data))
                .route("/matplotlib_chart/", get(matplotlib_chart))
                .with_state(state.clone());

            let listener = TcpListener::bind("127.0.0.1:0")
                .await
                .expect("Failed to bind mock backend");
            let address = listener.local_addr().expect("Mock backend has no address");
            let server = tokio::spawn(async move {
                axum::serve(listener, app).await.expect("Mock backend crashed");
            });

            Self {
                base_url: format!("http://{address}"),
                state,
                server,
            }
        }

        pub fn requests(&self) -> Vec<RecordedRequest> {
            self.state.inner.lock().unwrap().requests.clone()
        }

        pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
            self.requests().into_iter().filter(|r| r.path == path).collect()
        }

        pub fn clear_requests(&self) {
            self.state.inner.lock().unwrap().requests.clear();
        }

        pub fn fail(&self, path: &'static str, status: StatusCode) {
            self.state.inner.lock().unwrap().failing.insert(path, status);
        }

        pub fn recover(&self, path: &'static str) {
            self.state.inner.lock().unwrap().failing.remove(path);
        }

        pub fn respond_with(&self, path: &'static str, body: Value) {
            self.state.inner.lock().unwrap().bodies.insert(path, body);
        }

        pub fn delay(&self, path: &'static str, delay: Duration) {
            self.state.inner.lock().unwrap().delays.insert(path, delay);
        }

        /// Adds `barChartDataAll` to `/all_data/` answers.
        pub fn send_baseline(&self) {
            self.state.inner.lock().unwrap().with_baseline = true;
        }

        /// Distinct paths hit so far.
        pub fn paths(&self) -> HashSet<&'static str> {
            self.requests().into_iter().map(|r| r.path).collect()
        }
    }

    impl Drop for MockBackend {
        fn drop(&mut self) {
            self.server.abort();
        }
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is taken from RUST_LOG, defaulting to WARN. Keep the
    /// returned guard alive for the duration of the test.
    pub fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }
}
