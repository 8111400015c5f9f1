//! Higher-or-Lower table.
use super::{PanelProps, announce, apply, bind_amount, clamped_amount, format_money, status_line};
use crate::components::Button;
use crate::game::{
    Card, GameSnapshot, Guess, GuessResult, HigherLowerRound, RoundStatus, clamp_amount,
};
use yew::prelude::*;

const DEFAULT_BET: u64 = 100;

fn card_face(card: Card) -> Html {
    html! {
        <span
            class={classes!("card", card.suit.is_red().then_some("card--red"))}
            aria-label={card.to_string()}
        >
            { card.to_string() }
        </span>
    }
}

fn describe(result: GuessResult, drawn: Card, payout: u64) -> String {
    match result {
        GuessResult::Win => format!("{drawn}: correct! Pot is {}", format_money(payout)),
        GuessResult::Push => format!("{drawn}: a push counts as a win. Pot is {}", format_money(payout)),
        GuessResult::Lose => format!("{drawn}: wrong call, the pot is gone"),
    }
}

#[function_component(HiloPanel)]
pub fn hilo_panel(p: &PanelProps) -> Html {
    let cash = p.game.player.cash;
    let bet_input = use_state(|| clamp_amount(DEFAULT_BET, cash).to_string());
    let status = use_state(String::new);

    let on_start = {
        let bet_input = bet_input.clone();
        let status = status.clone();
        let game = p.game.clone();
        let rng = p.rng.clone();
        let on_change = p.on_state_change.clone();
        Callback::from(move |_: MouseEvent| {
            let bet = clamped_amount(&bet_input, game.player.cash).unwrap_or(0);
            let dealt = apply(&game, &on_change, |g| {
                g.deal_hilo(bet, &mut *rng.borrow_mut()).map(HigherLowerRound::current)
            });
            match dealt {
                Ok(first) => announce(
                    &status,
                    format!("Bet {} placed. First card is {first}", format_money(bet)),
                ),
                Err(err) => announce(&status, err.to_string()),
            }
        })
    };

    let make_guess = |guess: Guess| {
        let status = status.clone();
        let game = p.game.clone();
        let on_change = p.on_state_change.clone();
        Callback::from(move |_: MouseEvent| {
            match apply(&game, &on_change, |g| g.guess_hilo(guess)) {
                Ok(outcome) => {
                    announce(&status, describe(outcome.result, outcome.drawn, outcome.payout));
                }
                Err(err) => announce(&status, err.to_string()),
            }
        })
    };
    let on_higher = make_guess(Guess::Higher);
    let on_lower = make_guess(Guess::Lower);

    let on_cash_out = {
        let status = status.clone();
        let game = p.game.clone();
        let on_change = p.on_state_change.clone();
        Callback::from(move |_: MouseEvent| {
            match apply(&game, &on_change, GameSnapshot::cash_out_hilo) {
                Ok(payout) => announce(&status, format!("Cashed out {}", format_money(payout))),
                Err(err) => announce(&status, err.to_string()),
            }
        })
    };

    let table = p.game.hilo.as_ref().map_or_else(
        || html! { <p class="hilo__idle">{"Place a bet to deal the first card."}</p> },
        |r| {
            let finished = match r.status() {
                RoundStatus::Active => Html::default(),
                RoundStatus::CashedOut { payout } => {
                    html! { <p class="hilo__result">{ format!("Round over: won {}", format_money(payout)) }</p> }
                }
                RoundStatus::Busted => {
                    html! { <p class="hilo__result">{ format!("Round over: lost {}", format_money(r.bet())) }</p> }
                }
            };
            html! {
                <div class="hilo__table">
                    <div class="hilo__cards">{ for r.history().iter().map(|c| card_face(*c)) }</div>
                    <p>{ format!("Bet {} / streak {} / pot {} / {} cards left",
                        format_money(r.bet()), r.streak(), format_money(r.potential_payout()), r.cards_left()) }</p>
                    <div class="hilo__actions">
                        <Button label="Higher" disabled={!r.can_guess()} onclick={on_higher} />
                        <Button label="Lower" disabled={!r.can_guess()} onclick={on_lower} />
                        <Button
                            id="hilo-cash-out"
                            label={format!("Cash out {}", format_money(r.potential_payout()))}
                            disabled={!r.can_cash_out()}
                            onclick={on_cash_out}
                        />
                    </div>
                    { finished }
                </div>
            }
        },
    );
    let in_play = p.game.active_hilo().is_some();

    html! {
        <section class="panel hilo" aria-label="Higher or Lower">
            <p>{"Guess whether the next card is higher or lower. Equal ranks count as a win; every win doubles the pot."}</p>
            <label for="hilo-bet">{"Bet"}</label>
            <input id="hilo-bet" type="text" inputmode="numeric" value={(*bet_input).clone()} oninput={bind_amount(&bet_input, cash)} disabled={in_play} />
            <Button label="Deal" onclick={on_start} disabled={in_play} />
            { table }
            { status_line(&status) }
        </section>
    }
}
