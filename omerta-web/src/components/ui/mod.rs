//! Game panels. Each one renders against the current snapshot and reports
//! changes by emitting a new snapshot through `on_state_change`.

pub mod attack_panel;
pub mod bank_panel;
pub mod chat_panel;
pub mod crime_panel;
pub mod family_panel;
pub mod hilo_panel;
pub mod mail_panel;
pub mod odds_evens_panel;
pub mod stats_bar;
pub mod stocks_panel;
pub mod travel_panel;

use crate::game::{GameConfig, GameResult, GameSnapshot, SharedRng, clamp_amount};
use std::rc::Rc;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

pub use attack_panel::AttackPanel;
pub use bank_panel::BankPanel;
pub use chat_panel::ChatPanel;
pub use crime_panel::CrimePanel;
pub use family_panel::FamilyPanel;
pub use hilo_panel::HiloPanel;
pub use mail_panel::MailPanel;
pub use odds_evens_panel::OddsEvensPanel;
pub use stats_bar::StatsBar;
pub use stocks_panel::StocksPanel;
pub use travel_panel::TravelPanel;

#[derive(Properties, Clone)]
pub struct PanelProps {
    pub game: Rc<GameSnapshot>,
    pub config: Rc<GameConfig>,
    pub now_ms: u64,
    pub rng: SharedRng,
    pub on_state_change: Callback<GameSnapshot>,
}

impl PartialEq for PanelProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.game, &other.game)
            && Rc::ptr_eq(&self.config, &other.config)
            && Rc::ptr_eq(&self.rng, &other.rng)
            && self.now_ms == other.now_ms
    }
}

/// Run `action` against a copy of the snapshot and publish the copy only
/// when the action succeeds, so a rejected action leaves state untouched.
pub(crate) fn apply<T>(
    game: &GameSnapshot,
    on_change: &Callback<GameSnapshot>,
    action: impl FnOnce(&mut GameSnapshot) -> GameResult<T>,
) -> GameResult<T> {
    let mut next = game.clone();
    let out = action(&mut next)?;
    on_change.emit(next);
    Ok(out)
}

/// Show `msg` in the panel's status line and announce it.
pub(crate) fn announce(status: &UseStateHandle<String>, msg: String) {
    crate::a11y::set_status(&msg);
    status.set(msg);
}

pub(crate) fn status_line(msg: &str) -> Html {
    html! { <p class="status" role="status">{ msg.to_string() }</p> }
}

pub(crate) fn bind_input(state: &UseStateHandle<String>) -> Callback<InputEvent> {
    let state = state.clone();
    Callback::from(move |e: InputEvent| {
        state.set(e.target_unchecked_into::<HtmlInputElement>().value());
    })
}

/// Bind an amount field, pulling any number above `available` down to it.
pub(crate) fn bind_amount(state: &UseStateHandle<String>, available: u64) -> Callback<InputEvent> {
    let state = state.clone();
    Callback::from(move |e: InputEvent| {
        let input = e.target_unchecked_into::<HtmlInputElement>();
        let shown = clamp_field(&input.value(), available);
        input.set_value(&shown);
        state.set(shown);
    })
}

/// Text an amount field should show: numbers above `available` become
/// `available`, anything else stays as typed.
#[must_use]
pub fn clamp_field(raw: &str, available: u64) -> String {
    match parse_amount(raw) {
        Some(amount) if amount > available => clamp_amount(amount, available).to_string(),
        _ => raw.to_string(),
    }
}

/// Parse a typed amount and clamp it to `available`.
#[must_use]
pub fn clamped_amount(raw: &str, available: u64) -> Option<u64> {
    parse_amount(raw).map(|amount| clamp_amount(amount, available))
}

pub(crate) fn bind_textarea(state: &UseStateHandle<String>) -> Callback<InputEvent> {
    let state = state.clone();
    Callback::from(move |e: InputEvent| {
        state.set(e.target_unchecked_into::<HtmlTextAreaElement>().value());
    })
}

pub(crate) fn bind_select(state: &UseStateHandle<String>) -> Callback<Event> {
    let state = state.clone();
    Callback::from(move |e: Event| {
        state.set(e.target_unchecked_into::<HtmlSelectElement>().value());
    })
}

/// Dollar amount with thousands separators, e.g. `$12,500`.
#[must_use]
pub fn format_money(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Parse a typed amount, tolerating a leading `$` and thousands separators.
#[must_use]
pub fn parse_amount(input: &str) -> Option<u64> {
    let cleaned: String = input
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',' && *c != '_')
        .collect();
    cleaned.parse().ok()
}
