//! Read-only projections of [`DashboardState`] for rendering.

use crate::breakdown::PIE_SLICES;
use crate::charts::{BarChartModel, PieChartModel};
use crate::pagination::TablePage;
use crate::theme::Theme;
use model::{ContentRow, DashboardState, VisualizationSet};

pub const COUNTRY_PIE_TITLE: &str = "Content by Country";
pub const TYPE_PIE_TITLE: &str = "Content by Type";

/// Bar chart of the latest year counts, `None` until they first load.
pub fn bar_chart(state: &DashboardState) -> Option<BarChartModel> {
    state.year_counts.data().map(BarChartModel::from_breakdown)
}

pub fn country_pie(state: &DashboardState) -> Option<PieChartModel> {
    state
        .countries
        .data()
        .and_then(|aggregate| PieChartModel::from_aggregate(COUNTRY_PIE_TITLE, aggregate, PIE_SLICES))
}

pub fn type_pie(state: &DashboardState) -> Option<PieChartModel> {
    state
        .types
        .data()
        .and_then(|aggregate| PieChartModel::from_aggregate(TYPE_PIE_TITLE, aggregate, PIE_SLICES))
}

pub fn table_page(state: &DashboardState) -> TablePage<'_, ContentRow> {
    TablePage::new(state.content(), state.table)
}

pub fn theme(state: &DashboardState) -> Theme {
    Theme::from_dark_mode(state.dark_mode)
}

/// Static graph URLs: the backend's answer when there is one, otherwise the
/// conventional `/static/*.png` paths.
pub fn visualizations(state: &DashboardState, base_url: &str) -> VisualizationSet {
    state
        .visualizations
        .data()
        .cloned()
        .unwrap_or_else(|| VisualizationSet::static_defaults(base_url))
}

/// `data:` URL of the server-rendered chart, if one has loaded.
pub fn chart_image_url(state: &DashboardState) -> Option<String> {
    state.chart_image.data().map(|image| image.data_url())
}
