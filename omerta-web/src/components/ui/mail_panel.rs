use super::{PanelProps, announce, apply, bind_input, bind_select, bind_textarea, status_line};
use crate::game::{MailDraft, MailMessage};
use yew::prelude::*;

fn message_row(message: &MailMessage, open: bool, on_open: Callback<u64>, on_delete: Callback<u64>) -> Html {
    let id = message.id;
    let toggle = Callback::from(move |_: MouseEvent| on_open.emit(id));
    let delete = Callback::from(move |_: MouseEvent| on_delete.emit(id));
    html! {
        <li key={id} class={classes!("mail__item", (!message.read).then_some("mail__item--unread"))}>
            <button type="button" class="mail__subject" aria-expanded={open.to_string()} onclick={toggle}>
                { format!("{}: {}", message.from, message.subject) }
            </button>
            if open {
                <div class="mail__body">
                    <p>{ message.body.clone() }</p>
                    <button type="button" onclick={delete}>{"Delete"}</button>
                </div>
            }
        </li>
    }
}

#[function_component(MailPanel)]
pub fn mail_panel(p: &PanelProps) -> Html {
    let to = use_state(String::new);
    let subject = use_state(String::new);
    let body = use_state(String::new);
    let opened = use_state(|| None::<u64>);
    let status = use_state(String::new);
    let me = p.game.player.name.clone();

    let on_send = {
        let (to, subject, body, status) = (to.clone(), subject.clone(), body.clone(), status.clone());
        let game = p.game.clone();
        let config = p.config.clone();
        let on_change = p.on_state_change.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let draft = MailDraft {
                to: (*to).clone(),
                subject: (*subject).clone(),
                body: (*body).clone(),
            };
            let now = crate::clock::now_ms();
            match apply(&game, &on_change, |g| {
                let player = g.player.clone();
                g.world.send_mail(&player, draft, now, &config.mail)
            }) {
                Ok(_) => {
                    announce(&status, format!("Message sent to {}", *to));
                    subject.set(String::new());
                    body.set(String::new());
                }
                Err(err) => announce(&status, err.to_string()),
            }
        })
    };

    let on_open = {
        let opened = opened.clone();
        let status = status.clone();
        let game = p.game.clone();
        let on_change = p.on_state_change.clone();
        let me = me.clone();
        Callback::from(move |id: u64| {
            if *opened == Some(id) {
                opened.set(None);
                return;
            }
            opened.set(Some(id));
            let unread = game
                .world
                .mailbox
                .inbox(&me)
                .iter()
                .any(|m| m.id == id && !m.read);
            if unread && let Err(err) = apply(&game, &on_change, |g| g.world.mailbox.mark_read(id, &me)) {
                announce(&status, err.to_string());
            }
        })
    };

    let on_delete = {
        let status = status.clone();
        let game = p.game.clone();
        let on_change = p.on_state_change.clone();
        let me = me.clone();
        Callback::from(move |id: u64| {
            match apply(&game, &on_change, |g| g.world.mailbox.delete(id, &me)) {
                Ok(message) => announce(&status, format!("Deleted \"{}\"", message.subject)),
                Err(err) => announce(&status, err.to_string()),
            }
        })
    };

    let inbox = p.game.world.mailbox.inbox(&me);
    let unread = p.game.world.mailbox.unread_count(&me);
    let directory = p.game.world.directory(&p.game.player);

    html! {
        <section class="panel mail" aria-label="Mail">
            <h3>{ format!("Inbox ({unread} unread)") }</h3>
            if inbox.is_empty() {
                <p class="mail__empty">{"No messages."}</p>
            } else {
                <ul class="mail__list">
                    { for inbox.iter().map(|m| message_row(m, *opened == Some(m.id), on_open.clone(), on_delete.clone())) }
                </ul>
            }
            <form class="mail__compose" onsubmit={on_send}>
                <h3>{"Compose"}</h3>
                <label for="mail-to">{"To"}</label>
                <select id="mail-to" onchange={bind_select(&to)}>
                    <option value="" selected={to.is_empty()}>{"Choose a recipient"}</option>
                    { for directory.iter().map(|name| html! {
                        <option value={name.to_string()} selected={*to == *name}>{ name.to_string() }</option>
                    }) }
                </select>
                <label for="mail-subject">{"Subject"}</label>
                <input id="mail-subject" type="text" maxlength={p.config.mail.max_subject_len.to_string()} value={(*subject).clone()} oninput={bind_input(&subject)} />
                <label for="mail-body">{"Message"}</label>
                <textarea id="mail-body" rows="5" value={(*body).clone()} oninput={bind_textarea(&body)} />
                <button type="submit">{"Send"}</button>
            </form>
            { status_line(&status) }
        </section>
    }
}
