use crate::common::fetch_render::DatasetRender;
use model::{ChartImage, Dataset};
use std::rc::Rc;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ServerChartProps {
    pub image: Dataset<ChartImage>,
}

/// Chart rendered by the backend for the current filters.
#[function_component(ServerChart)]
pub fn server_chart(props: &ServerChartProps) -> Html {
    let render = Callback::from(|image: Rc<ChartImage>| {
        html! { <img class="w-full" src={image.data_url()} alt="Filtered Matplotlib Chart" /> }
    });

    html! {
        <div class="card bg-base-100 shadow-sm">
            <div class="card-body">
                <h2 class="card-title text-lg">{"Matplotlib Chart"}</h2>
                <DatasetRender<ChartImage>
                    dataset={props.image.clone()}
                    render={render}
                    empty_message="No chart available"
                    loading_text={AttrValue::from("Loading chart...")}
                />
            </div>
        </div>
    }
}
