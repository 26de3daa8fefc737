pub mod breakdown;
pub mod charts;
pub mod controller;
pub mod pagination;
pub mod theme;
pub mod views;

pub use breakdown::{top_n, PIE_SLICES};
pub use charts::{BarChartModel, BarSeries, PieChartModel};
pub use controller::{
    CatalogTransport, ControllerOptions, DashboardController, FilterOutcome, RequestTracker,
};
pub use pagination::{page_count, paginate, TablePage};
pub use theme::Theme;
