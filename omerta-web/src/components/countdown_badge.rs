//! Live countdown shared by cooldowns, flights, prison and attacks.
use crate::game::{Countdown, CountdownKind};
use gloo::timers::callback::Interval;
use omerta_game::countdown::TICK_MS;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub end_ms: u64,
    pub kind: CountdownKind,
    /// Clock reading at render time; the badge only moves forward from it.
    pub now_ms: u64,
    #[prop_or_default]
    pub label: Option<AttrValue>,
    #[prop_or_default]
    pub on_expired: Callback<()>,
}

/// Re-renders once a second until the countdown expires.
///
/// The interval lives inside an effect keyed on `(end_ms, expired)`, so it is
/// dropped on expiry, on unmount and whenever a new end time arrives.
#[function_component(CountdownBadge)]
pub fn countdown_badge(p: &Props) -> Html {
    let ticked = use_state(|| p.now_ms);
    let now = (*ticked).max(p.now_ms);
    let tick = Countdown::new(p.end_ms, p.kind).tick(now);
    let expired = tick.is_expired();

    {
        let ticked = ticked.clone();
        let on_expired = p.on_expired.clone();
        use_effect_with((p.end_ms, expired), move |&(_, expired)| {
            let interval = if expired {
                on_expired.emit(());
                None
            } else {
                Some(Interval::new(TICK_MS, move || {
                    ticked.set(crate::clock::now_ms());
                }))
            };
            move || drop(interval)
        });
    }

    html! {
        <span
            class={classes!("countdown", expired.then_some("countdown--done"))}
            role="timer"
            data-kind={format!("{:?}", p.kind).to_lowercase()}
        >
            { p.label.as_ref().map(|l| html! { <span class="countdown__label">{ format!("{l}: ") }</span> }).unwrap_or_default() }
            <span class="countdown__value">{ tick.label().to_string() }</span>
        </span>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    const NOW: u64 = 1_700_000_000_000;

    fn render(end_ms: u64, kind: CountdownKind, label: Option<&'static str>) -> String {
        let props = Props {
            end_ms,
            kind,
            now_ms: NOW,
            label: label.map(AttrValue::from),
            on_expired: Callback::noop(),
        };
        block_on(LocalServerRenderer::<CountdownBadge>::with_props(props).render())
    }

    #[test]
    fn running_badge_shows_remaining_time() {
        let html = render(NOW + 125_000, CountdownKind::Cooldown, Some("crime:bank"));
        assert!(html.contains("2m 5s"), "{html}");
        assert!(html.contains("crime:bank: "), "{html}");
        assert!(!html.contains("countdown--done"), "{html}");
    }

    #[test]
    fn expired_badge_shows_terminal_label() {
        let html = render(NOW, CountdownKind::Travel, None);
        assert!(html.contains("Arrived"), "{html}");
        assert!(html.contains("countdown--done"), "{html}");

        let html = render(NOW - 1, CountdownKind::Prison, None);
        assert!(html.contains("Released"), "{html}");
    }
}
