use super::loading::{Loading, LoadingSize};
use model::{Dataset, LoadStatus};
use std::rc::Rc;
use yew::prelude::*;

#[derive(Properties)]
pub struct DatasetRenderProps<T: PartialEq + 'static> {
    pub dataset: Dataset<T>,
    pub render: Callback<Rc<T>, Html>,
    /// Shown while there is nothing to render: before the first load and
    /// after failures that left no data behind.
    pub empty_message: AttrValue,
    #[prop_or_default]
    pub loading_text: Option<AttrValue>,
}

impl<T: PartialEq + 'static> PartialEq for DatasetRenderProps<T> {
    fn eq(&self, other: &Self) -> bool {
        self.dataset == other.dataset
            && self.empty_message == other.empty_message
            && self.loading_text == other.loading_text
    }
}

/// Renders a dataset's last good value.
///
/// Loaded data stays on screen while a refetch is running or after it
/// failed; the spinner only appears when there is nothing to show yet.
#[function_component(DatasetRender)]
pub fn dataset_render<T>(props: &DatasetRenderProps<T>) -> Html
where
    T: PartialEq + 'static,
{
    match (props.dataset.shared(), props.dataset.status()) {
        (Some(data), _) => props.render.emit(data),
        (None, LoadStatus::Loading) => html! {
            <Loading size={LoadingSize::Small} text={props.loading_text.clone()} />
        },
        (None, status) => {
            if status == LoadStatus::Failed {
                log::debug!("Nothing to render: {}", props.empty_message);
            }
            html! { <p class="text-sm opacity-70 py-4">{&props.empty_message}</p> }
        }
    }
}
