//! Action button used across the game panels.
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub label: AttrValue,
    #[prop_or_default]
    pub onclick: Callback<MouseEvent>,
    /// Rendered with the native `disabled` attribute so it drops out of the tab order.
    #[prop_or_default]
    pub disabled: bool,
    #[prop_or_default]
    pub id: Option<AttrValue>,
    #[prop_or_default]
    pub class: Classes,
}

#[function_component(Button)]
pub fn button(p: &Props) -> Html {
    let onclick = p.onclick.clone();
    html! {
        <button
            type="button"
            id={p.id.clone()}
            class={classes!("action", p.class.clone())}
            disabled={p.disabled}
            {onclick}
        >
            { p.label.clone() }
        </button>
    }
}
