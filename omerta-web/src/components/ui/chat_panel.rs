use super::{PanelProps, announce, apply, bind_input, status_line};
use yew::prelude::*;

/// Messages shown at once; the log itself keeps more.
const VISIBLE: usize = 50;

#[function_component(ChatPanel)]
pub fn chat_panel(p: &PanelProps) -> Html {
    let draft = use_state(String::new);
    let status = use_state(String::new);

    let on_post = {
        let draft = draft.clone();
        let status = status.clone();
        let game = p.game.clone();
        let on_change = p.on_state_change.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let now = crate::clock::now_ms();
            let body = (*draft).clone();
            match apply(&game, &on_change, |g| {
                let author = g.player.name.clone();
                g.world.chat.post(&author, &body, now).map(|_| ())
            }) {
                Ok(()) => {
                    draft.set(String::new());
                    status.set(String::new());
                }
                Err(err) => announce(&status, err.to_string()),
            }
        })
    };

    let remaining = p
        .config
        .chat
        .max_len
        .saturating_sub(draft.trim().chars().count());

    html! {
        <section class="panel chat" aria-label="Chat">
            <ol class="chat__log" aria-live="polite">
                { for p.game.world.chat.recent(VISIBLE).map(|m| html! {
                    <li key={m.id}>
                        <strong>{ m.author.clone() }</strong>{ ": " }{ m.body.clone() }
                    </li>
                }) }
            </ol>
            if p.game.world.chat.is_empty() {
                <p class="chat__empty">{"Nobody has said anything yet."}</p>
            }
            <form class="chat__compose" onsubmit={on_post}>
                <label for="chat-input" class="sr-only">{"Message"}</label>
                <input id="chat-input" type="text" value={(*draft).clone()} oninput={bind_input(&draft)} />
                <span class="chat__remaining">{ remaining.to_string() }</span>
                <button type="submit">{"Say"}</button>
            </form>
            { status_line(&status) }
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ui::fixtures::{NOW, props, props_with};
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn empty_channel_prompt() {
        let html = block_on(LocalServerRenderer::<ChatPanel>::with_props(props()).render());
        assert!(html.contains("Nobody has said anything yet."), "{html}");
        assert!(html.contains("280"), "{html}");
    }

    #[test]
    fn renders_posted_messages() {
        let base = props();
        let mut game = (*base.game).clone();
        game.world.chat.post("Sonny", "Who wants cannoli?", NOW).unwrap();
        game.world.chat.post("Michael", "Leave the gun.", NOW + 1).unwrap();
        let props = props_with(game, (*base.config).clone());
        let html = block_on(LocalServerRenderer::<ChatPanel>::with_props(props).render());
        let first = html.find("Who wants cannoli?").unwrap();
        let second = html.find("Leave the gun.").unwrap();
        assert!(first < second, "oldest first: {html}");
        assert!(!html.contains("Nobody has said"), "{html}");
    }
}
