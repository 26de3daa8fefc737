use model::FilterState;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct FiltersPanelProps {
    pub years: Vec<i32>,
    pub filters: FilterState,
    /// Raw selector value; empty means all years.
    pub on_year: Callback<String>,
    pub on_genre: Callback<String>,
    pub on_apply: Callback<()>,
}

#[function_component(FiltersPanel)]
pub fn filters_panel(props: &FiltersPanelProps) -> Html {
    let on_year = {
        let on_year = props.on_year.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_year.emit(select.value());
        })
    };

    let on_genre = {
        let on_genre = props.on_genre.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_genre.emit(input.value());
        })
    };

    let on_apply = {
        let on_apply = props.on_apply.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            on_apply.emit(());
        })
    };

    let selected_year = props.filters.year;
    let genre = props.filters.genre.clone().unwrap_or_default();

    html! {
        <div class="flex flex-row flex-wrap items-end justify-center gap-4 mb-4">
            <label class="form-control w-48">
                <span class="label-text">{"Filter by Year"}</span>
                <select class="select select-bordered" onchange={on_year}>
                    <option value="" selected={selected_year.is_none()}>{"Select Year"}</option>
                    {for props.years.iter().map(|&year| html! {
                        <option value={year.to_string()} selected={selected_year == Some(year)}>{year}</option>
                    })}
                </select>
            </label>
            <label class="form-control w-48">
                <span class="label-text">{"Filter by Genre"}</span>
                <input class="input input-bordered" type="text" value={genre} oninput={on_genre} />
            </label>
            <button class="btn btn-primary" onclick={on_apply}>{"Filter"}</button>
        </div>
    }
}
