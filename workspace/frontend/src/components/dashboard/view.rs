use super::chart::{PieChartPanel, YearBarChart};
use super::content_table::ContentTable;
use super::filters::FiltersPanel;
use super::server_chart::ServerChart;
use super::visualizations::Visualizations;
use crate::common::loading::Loading;
use crate::components::layout::layout::Layout;
use crate::hooks::use_dashboard;
use crate::settings::get_settings;
use compute::views::{self, COUNTRY_PIE_TITLE, TYPE_PIE_TITLE};
use model::{Action, FilterState};
use yew::prelude::*;

#[function_component(Dashboard)]
pub fn dashboard() -> Html {
    let settings = use_memo((), |_| get_settings());
    let handle = use_dashboard(&settings);
    let state = handle.state();
    let theme = views::theme(state);

    let on_year = {
        let handle = handle.clone();
        Callback::from(move |value: String| {
            log::debug!("Year selected: {:?}", value);
            handle.update_filters(Action::SetYear(FilterState::parse_year(&value)));
        })
    };

    let on_genre = {
        let handle = handle.clone();
        Callback::from(move |value: String| {
            handle.update_filters(Action::SetGenre(FilterState::parse_genre(&value)));
        })
    };

    let on_apply = {
        let handle = handle.clone();
        Callback::from(move |_: ()| handle.apply_filters())
    };

    let on_toggle_dark_mode = {
        let handle = handle.clone();
        Callback::from(move |_: ()| handle.dispatch(Action::ToggleDarkMode))
    };

    let on_page_change = {
        let handle = handle.clone();
        Callback::from(move |page: usize| handle.dispatch(Action::SetPage(page)))
    };

    let on_page_size_change = {
        let handle = handle.clone();
        Callback::from(move |size: usize| handle.dispatch(Action::SetPageSize(size)))
    };

    let bar_chart = match views::bar_chart(state) {
        Some(chart) => html! { <YearBarChart {chart} {theme} /> },
        None if state.year_counts.is_loading() => html! {
            <Loading text={AttrValue::from("Loading year counts...")} />
        },
        None => html! {
            <div class="card bg-base-100 shadow-sm">
                <div class="card-body">
                    <h2 class="card-title text-lg">{"Content by Year"}</h2>
                    <p class="text-sm opacity-70">{"No data available for Content by Year"}</p>
                </div>
            </div>
        },
    };

    let server_chart = if handle.show_chart_image() {
        html! { <ServerChart image={state.chart_image.clone()} /> }
    } else {
        html! {}
    };

    html! {
        <Layout title="Catalog Dashboard" {theme} {on_toggle_dark_mode}>
            <div class="grid grid-cols-1 md:grid-cols-12 gap-4">
                <div class="md:col-span-3 flex flex-col gap-4">
                    <PieChartPanel
                        id="chart-countries"
                        title={COUNTRY_PIE_TITLE}
                        chart={views::country_pie(state)}
                        {theme}
                    />
                    <PieChartPanel
                        id="chart-types"
                        title={TYPE_PIE_TITLE}
                        chart={views::type_pie(state)}
                        {theme}
                    />
                </div>

                <div class="md:col-span-6 flex flex-col gap-4">
                    <FiltersPanel
                        years={state.year_options().to_vec()}
                        filters={state.filters.clone()}
                        {on_year}
                        {on_genre}
                        {on_apply}
                    />
                    {bar_chart}
                    {server_chart}
                    <ContentTable
                        rows={state.rows.clone()}
                        table={state.table}
                        {on_page_change}
                        {on_page_size_change}
                    />
                </div>

                <div class="md:col-span-3">
                    <Visualizations set={views::visualizations(state, &handle.base_url())} />
                </div>
            </div>
        </Layout>
    }
}
