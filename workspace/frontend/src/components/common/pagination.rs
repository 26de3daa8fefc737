use model::PAGE_SIZE_OPTIONS;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PaginationProps {
    /// Zero-based page index.
    pub current_page: usize,
    pub has_previous: bool,
    pub has_next: bool,
    pub page_size: usize,
    /// "11–20 of 24"
    pub range_label: AttrValue,
    pub on_page_change: Callback<usize>,
    pub on_page_size_change: Callback<usize>,
}

/// Table footer: rows-per-page choice, range label and previous/next.
#[function_component(Pagination)]
pub fn pagination(props: &PaginationProps) -> Html {
    let current = props.current_page;
    let has_previous = props.has_previous;
    let has_next = props.has_next;

    let on_previous = {
        let on_page_change = props.on_page_change.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            if has_previous {
                on_page_change.emit(current - 1);
            }
        })
    };

    let on_next = {
        let on_page_change = props.on_page_change.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            if has_next {
                on_page_change.emit(current + 1);
            }
        })
    };

    let on_size = {
        let on_page_size_change = props.on_page_size_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            match select.value().parse::<usize>() {
                Ok(size) => on_page_size_change.emit(size),
                Err(_) => log::warn!("Ignoring rows-per-page value {:?}", select.value()),
            }
        })
    };

    html! {
        <div class="flex justify-end items-center gap-4 my-2 text-sm">
            <label class="flex items-center gap-2">
                {"Rows per page:"}
                <select class="select select-sm select-bordered" onchange={on_size}>
                    {for PAGE_SIZE_OPTIONS.iter().map(|&size| html! {
                        <option value={size.to_string()} selected={size == props.page_size}>{size}</option>
                    })}
                </select>
            </label>

            <span>{&props.range_label}</span>

            <button class="btn btn-sm" disabled={!has_previous} onclick={on_previous}>
                <i class="fas fa-chevron-left"></i>
            </button>
            <button class="btn btn-sm" disabled={!has_next} onclick={on_next}>
                <i class="fas fa-chevron-right"></i>
            </button>
        </div>
    }
}
