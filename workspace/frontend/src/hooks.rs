use crate::api_client::BrowserTransport;
use crate::settings::AppSettings;
use compute::{ControllerOptions, DashboardController};
use model::{effects_for, startup_effects, Action, DashboardState, Effect, FilterState, RefetchPolicy};
use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;

/// [`DashboardState`] as a Yew reducer store.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardStore(pub DashboardState);

impl Reducible for DashboardStore {
    type Action = Action;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        log::trace!("Reducing {:?}", action);
        Rc::new(DashboardStore(self.0.reduce(action)))
    }
}

/// Filters as of the last edit, ahead of the render that shows them.
///
/// Edits arriving before a re-render would otherwise diff against the
/// filters of the previous render.
#[derive(Debug, Clone, Default)]
pub struct PendingFilters(Rc<RefCell<FilterState>>);

impl PendingFilters {
    pub fn new(filters: FilterState) -> Self {
        Self(Rc::new(RefCell::new(filters)))
    }

    pub fn current(&self) -> FilterState {
        self.0.borrow().clone()
    }

    /// Records the edit and returns the fetches it implies.
    pub fn edit(&self, action: &Action, policy: RefetchPolicy) -> Vec<Effect> {
        let previous = self.current();
        let next = previous.edited(action);
        let effects = effects_for(&previous, &next, policy);
        *self.0.borrow_mut() = next;
        effects
    }
}

pub type StoreController = DashboardController<BrowserTransport, Box<dyn Fn(Action)>>;

/// State plus the controller that feeds it.
#[derive(Clone)]
pub struct DashboardHandle {
    store: UseReducerHandle<DashboardStore>,
    controller: Rc<StoreController>,
    filters: Rc<PendingFilters>,
}

impl PartialEq for DashboardHandle {
    fn eq(&self, other: &Self) -> bool {
        self.store == other.store
            && Rc::ptr_eq(&self.controller, &other.controller)
            && Rc::ptr_eq(&self.filters, &other.filters)
    }
}

impl DashboardHandle {
    pub fn state(&self) -> &DashboardState {
        &self.store.0
    }

    pub fn base_url(&self) -> String {
        use compute::CatalogTransport;
        self.controller.transport().base_url().to_string()
    }

    pub fn show_chart_image(&self) -> bool {
        self.controller.options().fetch_chart_image
    }

    /// Runs effects in the background; failures are already logged and
    /// recorded on their datasets.
    pub fn spawn(&self, effects: Vec<Effect>) {
        if effects.is_empty() {
            return;
        }
        let controller = self.controller.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let results = controller.run_all(effects).await;
            let failures = results.iter().filter(|r| r.is_err()).count();
            if failures > 0 {
                log::debug!("{} of {} fetches failed", failures, results.len());
            }
        });
    }

    /// Dispatches a filter edit and spawns the fetches it implies.
    pub fn update_filters(&self, action: Action) {
        let effects = self.filters.edit(&action, self.state().policy);
        self.store.dispatch(action);
        self.spawn(effects);
    }

    pub fn apply_filters(&self) {
        let filters = self.filters.current();
        log::info!("Applying filters: {}", filters);
        self.spawn(vec![Effect::ApplyFilters(filters)]);
    }

    pub fn dispatch(&self, action: Action) {
        self.store.dispatch(action);
    }
}

/// Creates the store and controller once and runs the startup fetches.
#[hook]
pub fn use_dashboard(settings: &AppSettings) -> DashboardHandle {
    let store = {
        let policy = settings.refetch_policy;
        let page_size = settings.page_size;
        use_reducer(move || DashboardStore(DashboardState::new(policy, page_size)))
    };

    let controller = {
        let dispatcher = store.dispatcher();
        let base_url = settings.api_base_url.clone();
        let options = ControllerOptions {
            fetch_chart_image: settings.fetch_chart_image,
        };
        use_memo((), move |_| {
            let dispatch: Box<dyn Fn(Action)> = Box::new(move |action: Action| dispatcher.dispatch(action));
            DashboardController::new(Rc::new(BrowserTransport::new(base_url)), dispatch, options)
        })
    };

    let filters = {
        let initial = store.0.filters.clone();
        use_memo((), move |_| PendingFilters::new(initial))
    };

    let handle = DashboardHandle {
        store,
        controller,
        filters,
    };

    {
        let handle = handle.clone();
        use_effect_with((), move |_| {
            log::info!("Dashboard mounted, loading catalog");
            handle.spawn(startup_effects(handle.state().policy));
            || ()
        });
    }

    handle
}
