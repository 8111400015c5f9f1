//! Odds-or-Evens dice table.
use super::{PanelProps, announce, apply, bind_amount, clamped_amount, format_money, status_line};
use crate::components::Button;
use crate::game::odds_evens::play;
use crate::game::{OddsEvensOutcome, Parity, clamp_amount};

const DEFAULT_STAKE: u64 = 100;
use yew::prelude::*;

fn describe(outcome: &OddsEvensOutcome) -> String {
    let roll = outcome.roll;
    let verdict = if outcome.won {
        format!("you win {}", format_money(outcome.payout))
    } else {
        format!("you lose {}", format_money(outcome.stake))
    };
    format!(
        "Rolled {} + {} = {} ({}): {verdict}",
        roll.first,
        roll.second,
        roll.sum(),
        roll.parity().label()
    )
}

#[function_component(OddsEvensPanel)]
pub fn odds_evens_panel(p: &PanelProps) -> Html {
    let cash = p.game.player.cash;
    let stake_input = use_state(|| clamp_amount(DEFAULT_STAKE, cash).to_string());
    let status = use_state(String::new);

    let make_call = |choice: Parity| {
        let stake_input = stake_input.clone();
        let status = status.clone();
        let game = p.game.clone();
        let rng = p.rng.clone();
        let on_change = p.on_state_change.clone();
        Callback::from(move |_: MouseEvent| {
            let stake = clamped_amount(&stake_input, game.player.cash).unwrap_or(0);
            match apply(&game, &on_change, |g| {
                play(&mut g.player, stake, choice, &mut *rng.borrow_mut())
            }) {
                Ok(outcome) => announce(&status, describe(&outcome)),
                Err(err) => announce(&status, err.to_string()),
            }
        })
    };

    html! {
        <section class="panel odds-evens" aria-label="Odds or Evens">
            <p>{"Two dice are rolled. Call the parity of their sum; a correct call pays even money."}</p>
            <label for="oe-stake">{"Stake"}</label>
            <input id="oe-stake" type="text" inputmode="numeric" value={(*stake_input).clone()} oninput={bind_amount(&stake_input, cash)} />
            <div class="odds-evens__actions">
                <Button label={Parity::Odd.label()} onclick={make_call(Parity::Odd)} />
                <Button label={Parity::Even.label()} onclick={make_call(Parity::Even)} />
            </div>
            <p class="odds-evens__cash">{ format!("Cash on hand: {}", format_money(cash)) }</p>
            { status_line(&status) }
        </section>
    }
}
