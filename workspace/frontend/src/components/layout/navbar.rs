use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub title: AttrValue,
    pub dark_mode: bool,
    pub on_toggle_dark_mode: Callback<()>,
}

#[function_component(Navbar)]
pub fn navbar(props: &Props) -> Html {
    let on_toggle = {
        let on_toggle_dark_mode = props.on_toggle_dark_mode.clone();
        Callback::from(move |_: Event| {
            log::debug!("Dark mode toggled");
            on_toggle_dark_mode.emit(());
        })
    };

    html! {
        <div class="navbar bg-base-100 shadow-sm z-40 sticky top-0">
            <div class="flex-1 px-4">
                <h1 class="text-xl font-bold" id="page-title">{ &props.title }</h1>
            </div>
            <div class="flex-none gap-2 px-4">
                <label class="label cursor-pointer gap-2">
                    <span class="label-text">{"Dark Mode"}</span>
                    <input
                        id="theme-toggle"
                        type="checkbox"
                        class="toggle"
                        checked={props.dark_mode}
                        onchange={on_toggle}
                    />
                </label>
            </div>
        </div>
    }
}
