pub mod bootstrap;
pub mod menu;
pub mod new_game;
pub mod panel;
pub mod store;

use crate::components::ui::{
    AttackPanel, BankPanel, ChatPanel, CrimePanel, FamilyPanel, HiloPanel, MailPanel,
    OddsEvensPanel, PanelProps, StocksPanel, TravelPanel,
};
use yew::prelude::*;

pub use panel::Panel;
pub use store::{GameAction, GameStore};

/// Stock prices move this often while the page is open.
pub const MARKET_TICK_MS: u32 = 10_000;

#[must_use]
pub fn render_panel(panel: Panel, props: PanelProps) -> Html {
    match panel {
        Panel::Crimes => html! { <CrimePanel ..props /> },
        Panel::Bank => html! { <BankPanel ..props /> },
        Panel::HigherLower => html! { <HiloPanel ..props /> },
        Panel::OddsEvens => html! { <OddsEvensPanel ..props /> },
        Panel::Travel => html! { <TravelPanel ..props /> },
        Panel::Attack => html! { <AttackPanel ..props /> },
        Panel::Mail => html! { <MailPanel ..props /> },
        Panel::Chat => html! { <ChatPanel ..props /> },
        Panel::Family => html! { <FamilyPanel ..props /> },
        Panel::Stocks => html! { <StocksPanel ..props /> },
    }
}

#[cfg(target_arch = "wasm32")]
#[function_component(App)]
pub fn app() -> Html {
    use crate::components::Modal;
    use crate::components::ui::StatsBar;
    use crate::components::ui::stats_bar::city_label;
    use crate::game::{GameSnapshot, GameStorage, SAVE_SLOT, WebGameStorage, shared_rng};
    use gloo::timers::callback::Interval;
    use rand::Rng;

    let booted = use_memo((), |()| bootstrap::boot(crate::clock::now_ms()));
    let config = booted.config.clone();
    let store = {
        let booted = booted.clone();
        use_reducer(move || GameStore::new(booted.snapshot.clone()))
    };
    let rng = use_state(|| shared_rng(crate::clock::now_ms()));
    let active = use_state(|| None::<Panel>);
    let fresh = booted.fresh;
    let naming = use_state(move || fresh);

    {
        use_effect_with(store.snapshot.clone(), |snapshot| {
            if let Err(err) = WebGameStorage.save_game(SAVE_SLOT, snapshot) {
                log::warn!("autosave failed: {err}");
            }
        });
    }

    {
        let dispatcher = store.dispatcher();
        let rng = (*rng).clone();
        use_effect_with((), move |()| {
            let interval = Interval::new(MARKET_TICK_MS, move || {
                let seed: u64 = rng.borrow_mut().r#gen();
                dispatcher.dispatch(GameAction::TickMarket(seed));
            });
            move || drop(interval)
        });
    }

    let now_ms = crate::clock::now_ms();
    let on_timer_done = {
        let dispatcher = store.dispatcher();
        Callback::from(move |()| dispatcher.dispatch(GameAction::Settle(crate::clock::now_ms())))
    };
    let on_state_change = {
        let dispatcher = store.dispatcher();
        Callback::from(move |next: GameSnapshot| dispatcher.dispatch(GameAction::Replace(next)))
    };
    let on_open = {
        let active = active.clone();
        Callback::from(move |panel: Panel| active.set(Some(panel)))
    };
    let on_close = {
        let active = active.clone();
        Callback::from(move |()| active.set(None))
    };
    let on_new_game = {
        let naming = naming.clone();
        Callback::from(move |()| naming.set(true))
    };
    let on_start = {
        let naming = naming.clone();
        let active = active.clone();
        let dispatcher = store.dispatcher();
        let config = config.clone();
        Callback::from(move |name: String| {
            log::info!("starting a new game as {name}");
            dispatcher.dispatch(GameAction::Replace(bootstrap::fresh_snapshot(&name, &config)));
            active.set(None);
            naming.set(false);
        })
    };
    let on_cancel_naming = {
        let naming = naming.clone();
        Callback::from(move |()| naming.set(false))
    };

    let snapshot = store.snapshot.clone();
    let unread = snapshot.world.mailbox.unread_count(&snapshot.player.name);
    let city_name = AttrValue::from(city_label(&snapshot, &config.cities));
    let panel_props = PanelProps {
        game: snapshot.clone(),
        config: config.clone(),
        now_ms,
        rng: (*rng).clone(),
        on_state_change,
    };

    html! {
        <main class="omerta">
            <StatsBar game={snapshot} {city_name} {now_ms} {on_timer_done} />
            <menu::MainMenu {on_open} unread_mail={unread} {on_new_game} />
            {
                (*active).map(|panel| html! {
                    <Modal
                        open={true}
                        title={AttrValue::from(panel.title())}
                        on_close={on_close.clone()}
                        return_focus_id={AttrValue::from(panel.button_id())}
                    >
                        { render_panel(panel, panel_props.clone()) }
                    </Modal>
                }).unwrap_or_default()
            }
            <Modal
                open={*naming}
                title={AttrValue::from("New game")}
                on_close={on_cancel_naming}
                return_focus_id={AttrValue::from("open-new-game")}
            >
                <new_game::NewGameForm {on_start} />
            </Modal>
        </main>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ui::fixtures::props;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[derive(Properties, PartialEq, Clone)]
    struct HostProps {
        panel: Panel,
        inner: PanelProps,
    }

    #[function_component(Host)]
    fn host(p: &HostProps) -> Html {
        render_panel(p.panel, p.inner.clone())
    }

    #[test]
    fn every_panel_renders() {
        for panel in Panel::ALL {
            let props = HostProps {
                panel,
                inner: props(),
            };
            let html = block_on(LocalServerRenderer::<Host>::with_props(props).render());
            assert!(html.contains("class=\"panel"), "{panel:?} rendered {html}");
        }
    }
}
