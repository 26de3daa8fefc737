use compute::charts::plot_config;
use compute::{BarChartModel, PieChartModel, Theme};
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use web_sys::Element;
use yew::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Plotly, js_name = newPlot)]
    fn new_plot(div_id: &str, data: JsValue, layout: JsValue, config: JsValue);
}

/// Plain JS objects; serde-wasm-bindgen would otherwise emit `Map`s.
fn to_js(value: &Value) -> Result<JsValue, serde_wasm_bindgen::Error> {
    value.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
}

#[derive(Properties, PartialEq)]
pub struct PlotlyChartProps {
    pub id: AttrValue,
    pub traces: Value,
    pub layout: Value,
    #[prop_or(AttrValue::Static("height: 300px;"))]
    pub style: AttrValue,
}

/// A div handed to `Plotly.newPlot`, redrawn whenever traces or layout change.
#[function_component(PlotlyChart)]
pub fn plotly_chart(props: &PlotlyChartProps) -> Html {
    let chart_ref = use_node_ref();

    use_effect_with(
        (chart_ref.clone(), props.traces.clone(), props.layout.clone()),
        move |(chart_ref, traces, layout)| {
            if let Some(element) = chart_ref.cast::<Element>() {
                let div_id = element.id();
                if !div_id.is_empty() {
                    match (to_js(traces), to_js(layout), to_js(&plot_config())) {
                        (Ok(traces), Ok(layout), Ok(config)) => {
                            log::trace!("Drawing chart {}", div_id);
                            new_plot(&div_id, traces, layout, config);
                        }
                        _ => log::error!("Failed to convert chart {} for Plotly", div_id),
                    }
                }
            }
            || ()
        },
    );

    html! {
        <div ref={chart_ref} id={props.id.clone()} class="chart-container" style={props.style.clone()}></div>
    }
}

#[derive(Properties, PartialEq)]
pub struct YearBarChartProps {
    pub chart: BarChartModel,
    pub theme: Theme,
}

#[function_component(YearBarChart)]
pub fn year_bar_chart(props: &YearBarChartProps) -> Html {
    html! {
        <div class="card bg-base-100 shadow-sm">
            <div class="card-body">
                <h2 class="card-title text-lg">{"Content by Year"}</h2>
                <PlotlyChart
                    id="chart-year-counts"
                    traces={props.chart.traces()}
                    layout={props.chart.layout(props.theme)}
                />
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct PieChartPanelProps {
    pub id: AttrValue,
    pub title: AttrValue,
    pub chart: Option<PieChartModel>,
    pub theme: Theme,
}

#[function_component(PieChartPanel)]
pub fn pie_chart_panel(props: &PieChartPanelProps) -> Html {
    let body = match &props.chart {
        Some(chart) => html! {
            <PlotlyChart
                id={props.id.clone()}
                traces={chart.traces()}
                layout={chart.layout(props.theme)}
                style="height: 260px;"
            />
        },
        None => html! {
            <p class="text-sm opacity-70 py-4">{format!("No data available for {}", props.title)}</p>
        },
    };

    html! {
        <div class="card bg-base-100 shadow-sm">
            <div class="card-body">
                <h2 class="card-title text-lg">{&props.title}</h2>
                {body}
            </div>
        </div>
    }
}
