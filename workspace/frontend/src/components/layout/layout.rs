use super::navbar::Navbar;
use compute::Theme;
use stylist::css;
use stylist::yew::Global;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub children: Children,
    pub title: AttrValue,
    pub theme: Theme,
    pub on_toggle_dark_mode: Callback<()>,
}

#[function_component(Layout)]
pub fn layout(props: &Props) -> Html {
    let theme = props.theme;
    let global = css!(
        r#"
            body {
                background-color: ${background};
                color: ${text};
                transition: background-color 0.2s ease;
            }
            .card {
                background-color: ${surface};
                color: ${text};
            }
        "#,
        background = theme.background(),
        surface = theme.surface(),
        text = theme.text(),
    );

    html! {
        <div data-theme={theme.name()} class="flex flex-col min-h-screen">
            <Global css={global} />
            <Navbar
                title={props.title.clone()}
                dark_mode={theme.is_dark()}
                on_toggle_dark_mode={props.on_toggle_dark_mode.clone()}
            />
            <main class="flex-1 p-4 mx-auto w-full max-w-[2000px]">
                { for props.children.iter() }
            </main>
        </div>
    }
}
