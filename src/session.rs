//! A dashboard driven from native code.
//!
//! [`DashboardSession`] owns the current [`DashboardState`] and a controller
//! whose dispatch replaces it through the reducer. It mirrors what the
//! browser app does with its reducer hook, which makes it the place where
//! the whole data flow is exercised end to end.

use crate::config::DashboardConfig;
use crate::http::HttpTransport;
use compute::{
    views, BarChartModel, CatalogTransport, ControllerOptions, DashboardController,
    FilterOutcome, PieChartModel,
};
use model::{
    effects_for, startup_effects, Action, ContentRow, DashboardState, Effect, FetchError,
    FilterState, RefetchPolicy, VisualizationSet,
};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info};

type Store = Rc<RefCell<DashboardState>>;
type StoreDispatch = Box<dyn Fn(Action)>;

pub struct DashboardSession<T> {
    store: Store,
    controller: DashboardController<T, StoreDispatch>,
}

impl DashboardSession<HttpTransport> {
    /// Session against the configured backend.
    pub fn connect(config: &DashboardConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let transport = HttpTransport::new(config.api_base_url.clone(), config.request_timeout())?;
        info!(api_base_url = %config.api_base_url, "Dashboard session created");
        Ok(Self::with_transport(
            transport,
            config.refetch_policy,
            config.page_size,
            ControllerOptions {
                fetch_chart_image: config.fetch_chart_image,
            },
        ))
    }
}

impl<T: CatalogTransport> DashboardSession<T> {
    pub fn with_transport(
        transport: T,
        policy: RefetchPolicy,
        page_size: usize,
        options: ControllerOptions,
    ) -> Self {
        let store: Store = Rc::new(RefCell::new(DashboardState::new(policy, page_size)));
        let dispatch: StoreDispatch = {
            let store = store.clone();
            Box::new(move |action: Action| {
                let next = store.borrow().reduce(action);
                *store.borrow_mut() = next;
            })
        };
        Self {
            controller: DashboardController::new(Rc::new(transport), dispatch, options),
            store,
        }
    }

    /// Copy of the current state. Cheap: loaded data is shared.
    pub fn snapshot(&self) -> DashboardState {
        self.store.borrow().clone()
    }

    pub fn filters(&self) -> FilterState {
        self.store.borrow().filters.clone()
    }

    pub fn policy(&self) -> RefetchPolicy {
        self.store.borrow().policy
    }

    pub fn dispatch(&self, action: Action) {
        let next = self.store.borrow().reduce(action);
        *self.store.borrow_mut() = next;
    }

    /// Runs the mount-time fetches.
    pub async fn start(&self) -> Vec<Result<(), FetchError>> {
        let effects = startup_effects(self.policy());
        self.controller.run_all(effects).await
    }

    /// Updates the year filter from raw selector input and returns the
    /// fetches it implies. Nothing is fetched here.
    pub fn set_year_filter(&self, value: &str) -> Vec<Effect> {
        self.update_filters(Action::SetYear(FilterState::parse_year(value)))
    }

    /// Updates the genre filter from raw text input and returns the fetches
    /// it implies. Nothing is fetched here.
    pub fn set_genre_filter(&self, value: &str) -> Vec<Effect> {
        self.update_filters(Action::SetGenre(FilterState::parse_genre(value)))
    }

    fn update_filters(&self, action: Action) -> Vec<Effect> {
        let previous = self.filters();
        self.dispatch(action);
        let next = self.filters();
        let effects = effects_for(&previous, &next, self.policy());
        debug!(%previous, %next, count = effects.len(), "Filters changed");
        effects
    }

    /// Sets the year and runs whatever that implies.
    pub async fn select_year(&self, value: &str) -> Vec<Result<(), FetchError>> {
        let effects = self.set_year_filter(value);
        self.run_effects(effects).await
    }

    /// Sets the genre and runs whatever that implies.
    pub async fn select_genre(&self, value: &str) -> Vec<Result<(), FetchError>> {
        let effects = self.set_genre_filter(value);
        self.run_effects(effects).await
    }

    pub async fn run_effects(&self, effects: Vec<Effect>) -> Vec<Result<(), FetchError>> {
        self.controller.run_all(effects).await
    }

    /// Refetches rows and year counts for the current filters.
    pub async fn apply_filters(&self) -> FilterOutcome {
        let filters = self.filters();
        self.controller.apply_filters(&filters).await
    }

    pub async fn load_years(&self) -> Result<(), FetchError> {
        self.controller.load_years().await
    }

    pub async fn load_country_breakdown(&self) -> Result<(), FetchError> {
        let year = self.filters().year;
        self.controller.load_country_breakdown(year).await
    }

    pub async fn load_type_breakdown(&self) -> Result<(), FetchError> {
        let year = self.filters().year;
        self.controller.load_type_breakdown(year).await
    }

    pub async fn load_chart_image(&self) -> Result<(), FetchError> {
        let filters = self.filters();
        self.controller.load_chart_image(&filters).await
    }

    pub fn toggle_dark_mode(&self) {
        self.dispatch(Action::ToggleDarkMode);
    }

    pub fn set_page(&self, page: usize) {
        self.dispatch(Action::SetPage(page));
    }

    pub fn set_page_size(&self, page_size: usize) {
        self.dispatch(Action::SetPageSize(page_size));
    }

    pub fn bar_chart(&self) -> Option<BarChartModel> {
        views::bar_chart(&self.store.borrow())
    }

    pub fn country_pie(&self) -> Option<PieChartModel> {
        views::country_pie(&self.store.borrow())
    }

    pub fn type_pie(&self) -> Option<PieChartModel> {
        views::type_pie(&self.store.borrow())
    }

    /// Rows of the current table page with their 1-based running index.
    pub fn table_rows(&self) -> Vec<(usize, ContentRow)> {
        let state = self.store.borrow();
        let page = views::table_page(&state);
        page.numbered()
            .map(|(index, row)| (index, row.clone()))
            .collect()
    }

    pub fn visualizations(&self) -> VisualizationSet {
        views::visualizations(&self.store.borrow(), self.controller.transport().base_url())
    }
}
