use crate::components::ui::bind_input;
use yew::prelude::*;

const MAX_NAME_LEN: usize = 24;

/// Trimmed character name, or a reason it is not acceptable.
///
/// # Errors
///
/// Returns a message for blank or over-long names.
pub fn validate_name(input: &str) -> Result<String, String> {
    let name = input.trim();
    if name.is_empty() {
        return Err(String::from("Pick a name"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(format!("Names are limited to {MAX_NAME_LEN} characters"));
    }
    Ok(name.to_string())
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub on_start: Callback<String>,
}

#[function_component(NewGameForm)]
pub fn new_game_form(p: &Props) -> Html {
    let name = use_state(String::new);
    let error = use_state(String::new);

    let onsubmit = {
        let name = name.clone();
        let error = error.clone();
        let on_start = p.on_start.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match validate_name(&name) {
                Ok(valid) => {
                    error.set(String::new());
                    on_start.emit(valid);
                }
                Err(msg) => error.set(msg),
            }
        })
    };

    html! {
        <form class="new-game" {onsubmit}>
            <p>{"Every family starts somewhere. Starting over erases the current save."}</p>
            <label for="new-game-name">{"Your name"}</label>
            <input id="new-game-name" type="text" maxlength={MAX_NAME_LEN.to_string()} value={(*name).clone()} oninput={bind_input(&name)} />
            <button type="submit">{"Start"}</button>
            <p class="status" role="alert">{ (*error).clone() }</p>
        </form>
    }
}
