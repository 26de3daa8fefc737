use model::VisualizationSet;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct VisualizationsProps {
    pub set: VisualizationSet,
}

/// The backend's static graphs.
#[function_component(Visualizations)]
pub fn visualizations(props: &VisualizationsProps) -> Html {
    html! {
        <div class="flex flex-col gap-4">
            <img class="w-full rounded" src={props.set.genres.clone()} alt="Top Genres Visualization" />
            <img class="w-full rounded" src={props.set.ratings.clone()} alt="Content Ratings Visualization" />
            <img class="w-full rounded" src={props.set.trend.clone()} alt="Content Addition Trend" />
        </div>
    }
}
