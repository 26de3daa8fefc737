use crate::common::loading::{Loading, LoadingSize};
use crate::components::common::pagination::Pagination;
use compute::TablePage;
use model::{ContentRow, Dataset, TableState};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ContentTableProps {
    pub rows: Dataset<Vec<ContentRow>>,
    pub table: TableState,
    pub on_page_change: Callback<usize>,
    pub on_page_size_change: Callback<usize>,
}

#[function_component(ContentTable)]
pub fn content_table(props: &ContentTableProps) -> Html {
    let rows: &[ContentRow] = props.rows.data().map(Vec::as_slice).unwrap_or_default();
    let page = TablePage::new(rows, props.table);

    if rows.is_empty() && props.rows.is_loading() {
        return html! { <Loading size={LoadingSize::Small} text={AttrValue::from("Loading content...")} /> };
    }

    html! {
        <div class="card bg-base-100 shadow-sm">
            <div class="card-body">
                <h2 class="card-title text-lg">{"Filtered Content"}</h2>
                <div class="overflow-x-auto max-h-[440px]">
                    <table class="table table-zebra table-pin-rows">
                        <thead>
                            <tr>
                                <th>{"Index"}</th>
                                <th>{"Title"}</th>
                                <th>{"Type"}</th>
                                <th>{"Release Year"}</th>
                                <th>{"Rating"}</th>
                                <th>{"Genres"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            {for page.numbered().map(|(index, row)| html! {
                                <tr class="hover">
                                    <td>{index}</td>
                                    <td>{&row.title}</td>
                                    <td>{row.kind.as_str()}</td>
                                    <td>{row.release_year}</td>
                                    <td>{row.rating_label()}</td>
                                    <td>{row.genres_label()}</td>
                                </tr>
                            })}
                        </tbody>
                    </table>
                </div>
                <Pagination
                    current_page={page.page}
                    has_previous={page.has_previous()}
                    has_next={page.has_next()}
                    page_size={page.page_size}
                    range_label={page.range_label()}
                    on_page_change={props.on_page_change.clone()}
                    on_page_size_change={props.on_page_size_change.clone()}
                />
            </div>
        </div>
    }
}
