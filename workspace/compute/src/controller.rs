//! The dashboard controller: turns operations into requests and their
//! answers into [`Action`]s.
//!
//! The controller owns no dashboard state. It is handed a dispatch function
//! that feeds the host's store (a Yew reducer in the browser, a `RefCell` in
//! the native session). Every fetch follows the same path:
//!
//! 1. issue a generation and dispatch [`Action::Requested`];
//! 2. GET through the [`CatalogTransport`] and decode the body;
//! 3. dispatch the loaded action, or [`Action::Failed`] after logging.
//!
//! The reducer drops answers whose generation is no longer the latest, so a
//! slow response for an old selection never replaces a newer one.

mod tracker;
mod transport;

pub use tracker::RequestTracker;
pub use transport::{decode, CatalogTransport};

use common::{
    AllDataResponse, ApiRequest, BreakdownResponse, ChartImageResponse, ContentResponse,
    Endpoint, VisualizationPathsResponse, YearsResponse,
};
use futures::future::join_all;
use model::{
    Action, CategoryAggregate, ChartImage, ContentRow, DatasetKind, Effect, FetchError,
    FilterState, Generation, VisualizationSet, YearBreakdown, YearCatalog,
};
use serde::de::DeserializeOwned;
use std::rc::Rc;
use tracing::{debug, info, warn};

/// Switches for optional fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControllerOptions {
    /// Also request the server-rendered chart whenever filters are applied.
    pub fetch_chart_image: bool,
}

/// Per-fetch results of [`DashboardController::apply_filters`].
///
/// The fetches are independent: one failing does not undo the other.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    pub rows: Result<(), FetchError>,
    pub year_counts: Result<(), FetchError>,
    /// Present only when chart images are enabled.
    pub chart_image: Option<Result<(), FetchError>>,
}

impl FilterOutcome {
    pub fn is_ok(&self) -> bool {
        self.errors().is_empty()
    }

    pub fn errors(&self) -> Vec<&FetchError> {
        let mut errors = Vec::new();
        if let Err(e) = &self.rows {
            errors.push(e);
        }
        if let Err(e) = &self.year_counts {
            errors.push(e);
        }
        if let Some(Err(e)) = &self.chart_image {
            errors.push(e);
        }
        errors
    }
}

pub struct DashboardController<T, D> {
    transport: Rc<T>,
    dispatch: D,
    tracker: Rc<RequestTracker>,
    options: ControllerOptions,
}

impl<T, D: Clone> Clone for DashboardController<T, D> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            dispatch: self.dispatch.clone(),
            tracker: self.tracker.clone(),
            options: self.options,
        }
    }
}

impl<T, D> DashboardController<T, D>
where
    T: CatalogTransport,
    D: Fn(Action),
{
    pub fn new(transport: Rc<T>, dispatch: D, options: ControllerOptions) -> Self {
        Self {
            transport,
            dispatch,
            tracker: Rc::new(RequestTracker::new()),
            options,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn options(&self) -> ControllerOptions {
        self.options
    }

    pub fn tracker(&self) -> &RequestTracker {
        &self.tracker
    }

    /// Fetches the distinct years for the year selector.
    ///
    /// On failure the catalog stays empty and the selector shows no years.
    pub async fn load_years(&self) -> Result<(), FetchError> {
        self.fetch(
            DatasetKind::Years,
            ApiRequest::new(Endpoint::Years),
            |response: YearsResponse| Ok(YearCatalog::from(response)),
            |generation, catalog| Action::YearsLoaded {
                generation,
                catalog,
            },
        )
        .await
    }

    /// Refetches the filtered rows and the year counts concurrently.
    pub async fn apply_filters(&self, filters: &FilterState) -> FilterOutcome {
        info!(%filters, "Applying filters");
        if self.options.fetch_chart_image {
            let (rows, year_counts, chart_image) = futures::join!(
                self.load_rows(filters),
                self.load_year_counts(filters),
                self.load_chart_image(filters),
            );
            FilterOutcome {
                rows,
                year_counts,
                chart_image: Some(chart_image),
            }
        } else {
            let (rows, year_counts) =
                futures::join!(self.load_rows(filters), self.load_year_counts(filters));
            FilterOutcome {
                rows,
                year_counts,
                chart_image: None,
            }
        }
    }

    pub async fn load_rows(&self, filters: &FilterState) -> Result<(), FetchError> {
        self.fetch(
            DatasetKind::Rows,
            filtered_request(Endpoint::Filter, filters),
            |response: ContentResponse| {
                response
                    .content
                    .into_iter()
                    .map(ContentRow::try_from)
                    .collect::<Result<Vec<_>, _>>()
            },
            |generation, rows| Action::RowsLoaded { generation, rows },
        )
        .await
    }

    pub async fn load_year_counts(&self, filters: &FilterState) -> Result<(), FetchError> {
        self.fetch(
            DatasetKind::YearCounts,
            filtered_request(Endpoint::AllData, filters),
            |response: AllDataResponse| YearBreakdown::try_from(response),
            |generation, breakdown: YearBreakdown| Action::YearCountsLoaded {
                generation,
                breakdown,
            },
        )
        .await
    }

    /// Country shares for the selected year; the genre filter does not apply.
    pub async fn load_country_breakdown(&self, year: Option<i32>) -> Result<(), FetchError> {
        self.fetch(
            DatasetKind::Countries,
            ApiRequest::new(Endpoint::CountryData).param("year", year),
            |response: BreakdownResponse| CategoryAggregate::try_from(response),
            |generation, aggregate: CategoryAggregate| Action::CountriesLoaded {
                generation,
                aggregate,
            },
        )
        .await
    }

    /// Movie/TV show split for the selected year; the genre filter does not apply.
    pub async fn load_type_breakdown(&self, year: Option<i32>) -> Result<(), FetchError> {
        self.fetch(
            DatasetKind::Types,
            ApiRequest::new(Endpoint::TypeData).param("year", year),
            |response: BreakdownResponse| CategoryAggregate::try_from(response),
            |generation, aggregate| Action::TypesLoaded {
                generation,
                aggregate,
            },
        )
        .await
    }

    pub async fn load_chart_image(&self, filters: &FilterState) -> Result<(), FetchError> {
        self.fetch(
            DatasetKind::ChartImage,
            filtered_request(Endpoint::MatplotlibChart, filters),
            |response: ChartImageResponse| {
                if response.chart.trim().is_empty() {
                    return Err(FetchError::malformed("empty chart image"));
                }
                Ok(ChartImage::new(response.chart))
            },
            |generation, image| Action::ChartImageLoaded { generation, image },
        )
        .await
    }

    /// Asks the backend root where the static graphs are. Until this succeeds
    /// the hosts fall back to [`VisualizationSet::static_defaults`].
    pub async fn load_visualizations(&self) -> Result<(), FetchError> {
        let base_url = self.transport.base_url().to_string();
        self.fetch(
            DatasetKind::Visualizations,
            ApiRequest::new(Endpoint::Home),
            move |paths: VisualizationPathsResponse| {
                Ok(VisualizationSet::from_paths(&base_url, paths))
            },
            |generation, set| Action::VisualizationsLoaded { generation, set },
        )
        .await
    }

    /// Runs one effect. Filter application reports its first failure.
    pub async fn run(&self, effect: Effect) -> Result<(), FetchError> {
        debug!(?effect, "Running effect");
        match effect {
            Effect::LoadYears => self.load_years().await,
            Effect::ApplyFilters(filters) => {
                let outcome = self.apply_filters(&filters).await;
                match outcome.errors().first() {
                    Some(error) => Err((*error).clone()),
                    None => Ok(()),
                }
            }
            Effect::LoadCountryBreakdown(year) => self.load_country_breakdown(year).await,
            Effect::LoadTypeBreakdown(year) => self.load_type_breakdown(year).await,
            Effect::LoadChartImage(filters) => self.load_chart_image(&filters).await,
            Effect::LoadVisualizations => self.load_visualizations().await,
        }
    }

    /// Runs effects concurrently; results are in the order given.
    pub async fn run_all(&self, effects: Vec<Effect>) -> Vec<Result<(), FetchError>> {
        join_all(effects.into_iter().map(|effect| self.run(effect))).await
    }

    async fn fetch<R, V>(
        &self,
        dataset: DatasetKind,
        request: ApiRequest,
        convert: impl FnOnce(R) -> Result<V, FetchError>,
        loaded: impl FnOnce(Generation, V) -> Action,
    ) -> Result<(), FetchError>
    where
        R: DeserializeOwned,
    {
        let generation = self.tracker.issue(dataset);
        (self.dispatch)(Action::Requested {
            dataset,
            generation,
        });
        debug!(%dataset, %generation, endpoint = request.endpoint.path(), query = ?request.query, "Fetching");

        let outcome = match self.transport.get(&request).await {
            Ok(body) => decode::<R>(&request, &body).and_then(convert),
            Err(error) => Err(error),
        };

        match outcome {
            Ok(value) => {
                info!(%dataset, %generation, "Loaded");
                (self.dispatch)(loaded(generation, value));
                Ok(())
            }
            Err(error) => {
                warn!(%dataset, %generation, %error, "Fetch failed, keeping previous data");
                (self.dispatch)(Action::Failed {
                    dataset,
                    generation,
                    error: error.clone(),
                });
                Err(error)
            }
        }
    }
}

fn filtered_request(endpoint: Endpoint, filters: &FilterState) -> ApiRequest {
    ApiRequest::new(endpoint)
        .param("year", filters.year)
        .param("genre", filters.genre.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use model::{DashboardState, LoadStatus};
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;

    /// Canned transport: one body per endpoint, optional per-year slowness.
    #[derive(Default)]
    struct FakeTransport {
        bodies: RefCell<HashMap<Endpoint, Result<String, FetchError>>>,
        year_bodies: RefCell<HashMap<Option<String>, String>>,
        slow_years: RefCell<HashMap<String, usize>>,
        requests: RefCell<Vec<ApiRequest>>,
        in_flight: Cell<usize>,
        max_in_flight: Cell<usize>,
    }

    impl FakeTransport {
        fn respond(&self, endpoint: Endpoint, body: &str) {
            self.bodies.borrow_mut().insert(endpoint, Ok(body.to_string()));
        }

        fn fail(&self, endpoint: Endpoint, error: FetchError) {
            self.bodies.borrow_mut().insert(endpoint, Err(error));
        }
    }

    #[async_trait(?Send)]
    impl CatalogTransport for FakeTransport {
        async fn get(&self, request: &ApiRequest) -> Result<String, FetchError> {
            self.requests.borrow_mut().push(request.clone());
            self.in_flight.set(self.in_flight.get() + 1);
            self.max_in_flight
                .set(self.max_in_flight.get().max(self.in_flight.get()));

            let year = request.query_value("year").map(str::to_string);
            let delay = year
                .as_ref()
                .and_then(|y| self.slow_years.borrow().get(y).copied())
                .unwrap_or(1);
            for _ in 0..delay {
                tokio::task::yield_now().await;
            }
            self.in_flight.set(self.in_flight.get() - 1);

            if let Some(body) = self.year_bodies.borrow().get(&year) {
                return Ok(body.clone());
            }
            self.bodies
                .borrow()
                .get(&request.endpoint)
                .cloned()
                .unwrap_or_else(|| Err(FetchError::network("HTTP error: 404")))
        }

        fn base_url(&self) -> &str {
            "http://127.0.0.1:8000"
        }
    }

    type Store = Rc<RefCell<DashboardState>>;

    fn controller(
        transport: Rc<FakeTransport>,
        options: ControllerOptions,
    ) -> (DashboardController<FakeTransport, impl Fn(Action) + Clone>, Store) {
        let store: Store = Rc::new(RefCell::new(DashboardState::default()));
        let dispatch = {
            let store = store.clone();
            move |action: Action| {
                let next = store.borrow().reduce(action);
                *store.borrow_mut() = next;
            }
        };
        (DashboardController::new(transport, dispatch, options), store)
    }

    #[tokio::test]
    async fn apply_filters_issues_two_concurrent_requests_with_both_params() {
        let transport = Rc::new(FakeTransport::default());
        transport.respond(
            Endpoint::Filter,
            r#"{"content": [{"title": "Extraction", "type": "Movie", "release_year": 2020, "rating": "R", "listed_in": "Action & Adventure"}]}"#,
        );
        transport.respond(
            Endpoint::AllData,
            r#"{"barChartLabels": ["2020"], "barChartData": [1]}"#,
        );
        let (controller, store) = controller(transport.clone(), ControllerOptions::default());

        let filters = FilterState::new(Some(2020), Some("Action"));
        let outcome = controller.apply_filters(&filters).await;
        assert!(outcome.is_ok());

        let requests = transport.requests.borrow();
        assert_eq!(requests.len(), 2);
        let endpoints: Vec<Endpoint> = requests.iter().map(|r| r.endpoint).collect();
        assert!(endpoints.contains(&Endpoint::Filter));
        assert!(endpoints.contains(&Endpoint::AllData));
        for request in requests.iter() {
            assert_eq!(request.query_value("year"), Some("2020"));
            assert_eq!(request.query_value("genre"), Some("Action"));
        }
        assert_eq!(transport.max_in_flight.get(), 2);

        let state = store.borrow();
        assert_eq!(state.content()[0].title, "Extraction");
        assert_eq!(state.year_counts.data().unwrap().filtered.counts(), [1]);
    }

    #[tokio::test]
    async fn one_failed_fetch_does_not_block_the_other() {
        let transport = Rc::new(FakeTransport::default());
        transport.fail(Endpoint::Filter, FetchError::network("connection refused"));
        transport.respond(
            Endpoint::AllData,
            r#"{"barChartLabels": ["2019", "2020"], "barChartData": [4, 5]}"#,
        );
        let (controller, store) = controller(transport, ControllerOptions::default());

        let outcome = controller.apply_filters(&FilterState::default()).await;
        assert!(outcome.rows.is_err());
        assert!(outcome.year_counts.is_ok());
        assert_eq!(outcome.errors().len(), 1);

        let state = store.borrow();
        assert_eq!(state.rows.status(), LoadStatus::Failed);
        assert_eq!(state.year_counts.status(), LoadStatus::Ready);
    }

    #[tokio::test]
    async fn chart_image_joins_filter_fetches_when_enabled() {
        let transport = Rc::new(FakeTransport::default());
        transport.respond(Endpoint::Filter, r#"{"content": []}"#);
        transport.respond(Endpoint::AllData, r#"{"barChartLabels": [], "barChartData": []}"#);
        transport.respond(Endpoint::MatplotlibChart, r#"{"chart": "iVBORw0KGgo="}"#);
        let options = ControllerOptions {
            fetch_chart_image: true,
        };
        let (controller, store) = controller(transport.clone(), options);

        let outcome = controller.apply_filters(&FilterState::default()).await;
        assert_eq!(outcome.chart_image, Some(Ok(())));
        assert_eq!(transport.max_in_flight.get(), 3);
        assert_eq!(
            store.borrow().chart_image.data().unwrap().data_url(),
            "data:image/png;base64,iVBORw0KGgo="
        );
    }

    #[tokio::test]
    async fn load_years_failure_leaves_empty_catalog() {
        let transport = Rc::new(FakeTransport::default());
        transport.fail(Endpoint::Years, FetchError::network("HTTP error: 500"));
        let (controller, store) = controller(transport, ControllerOptions::default());

        assert!(controller.load_years().await.is_err());
        assert!(store.borrow().year_options().is_empty());
    }

    #[tokio::test]
    async fn malformed_breakdown_keeps_previous_chart() {
        let transport = Rc::new(FakeTransport::default());
        transport.respond(Endpoint::CountryData, r#"{"labels": ["US", "IN"], "data": [40, 55]}"#);
        let (controller, store) = controller(transport.clone(), ControllerOptions::default());
        controller.load_country_breakdown(None).await.unwrap();

        transport.respond(Endpoint::CountryData, r#"{"labels": ["US"], "data": [1, 2]}"#);
        let err = controller.load_country_breakdown(Some(2020)).await.unwrap_err();
        assert!(err.is_malformed());

        let state = store.borrow();
        assert_eq!(state.countries.data().unwrap().labels(), ["US", "IN"]);
        assert_eq!(state.countries.status(), LoadStatus::Failed);
    }

    #[tokio::test]
    async fn slow_stale_response_is_discarded() {
        let transport = Rc::new(FakeTransport::default());
        transport.year_bodies.borrow_mut().insert(
            Some("2019".to_string()),
            r#"{"labels": ["Movie"], "data": [19]}"#.to_string(),
        );
        transport.year_bodies.borrow_mut().insert(
            Some("2020".to_string()),
            r#"{"labels": ["Movie"], "data": [20]}"#.to_string(),
        );
        transport.slow_years.borrow_mut().insert("2019".to_string(), 10);
        let (controller, store) = controller(transport, ControllerOptions::default());

        let (old, new) = futures::join!(
            controller.load_type_breakdown(Some(2019)),
            controller.load_type_breakdown(Some(2020)),
        );
        assert!(old.is_ok());
        assert!(new.is_ok());

        let state = store.borrow();
        assert_eq!(state.types.data().unwrap().counts(), [20]);
        assert_eq!(state.types.latest(), Generation(2));
    }

    #[tokio::test]
    async fn visualizations_resolve_against_base_url() {
        let transport = Rc::new(FakeTransport::default());
        transport.respond(
            Endpoint::Home,
            r#"{"genres_graph": "/static/genres.png", "ratings_graph": "/static/ratings.png", "trend_graph": "/static/trend.png"}"#,
        );
        let (controller, store) = controller(transport, ControllerOptions::default());
        controller.load_visualizations().await.unwrap();

        let state = store.borrow();
        let set = state.visualizations.data().unwrap();
        assert_eq!(set.ratings, "http://127.0.0.1:8000/static/ratings.png");
    }

    #[tokio::test]
    async fn run_all_executes_startup_effects() {
        let transport = Rc::new(FakeTransport::default());
        transport.respond(Endpoint::Years, r#"{"years": [2021, 2020]}"#);
        transport.respond(Endpoint::CountryData, r#"{"labels": ["US"], "data": [3]}"#);
        transport.respond(Endpoint::TypeData, r#"{"labels": ["Movie", "TV Show"], "data": [2, 1]}"#);
        let (controller, store) = controller(transport, ControllerOptions::default());

        let results = controller
            .run_all(model::startup_effects(model::RefetchPolicy::OnSubmit))
            .await;
        assert_eq!(results.len(), 4);
        // The backend root is not canned, so only the visualization lookup fails.
        assert!(results[..3].iter().all(Result::is_ok));
        assert!(results[3].is_err());

        let state = store.borrow();
        assert_eq!(state.year_options(), [2021, 2020]);
        assert_eq!(state.types.data().unwrap().len(), 2);
    }
}
