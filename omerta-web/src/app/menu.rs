use super::panel::Panel;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub on_open: Callback<Panel>,
    #[prop_or_default]
    pub unread_mail: usize,
    pub on_new_game: Callback<()>,
}

#[function_component(MainMenu)]
pub fn main_menu(p: &Props) -> Html {
    let new_game = {
        let cb = p.on_new_game.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    html! {
        <nav class="panels" aria-label="Main menu">
            { for Panel::ALL.iter().map(|&panel| {
                let on_open = p.on_open.clone();
                let onclick = Callback::from(move |_: MouseEvent| on_open.emit(panel));
                let label = if panel == Panel::Mail && p.unread_mail > 0 {
                    format!("{} ({})", panel.title(), p.unread_mail)
                } else {
                    panel.title().to_string()
                };
                html! {
                    <button type="button" key={panel.button_id()} id={panel.button_id()} {onclick}>{ label }</button>
                }
            }) }
            <button type="button" id="open-new-game" class="panels__new" onclick={new_game}>{"New game"}</button>
        </nav>
    }
}
