use super::{PanelProps, announce, apply, bind_amount, clamped_amount, format_money, status_line};
use crate::components::Button;
use crate::game::{Player, deposit, withdraw};
use yew::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Transfer {
    Deposit,
    Withdraw,
}

impl Transfer {
    /// Balance the transfer draws from.
    const fn available(self, player: &Player) -> u64 {
        match self {
            Self::Deposit => player.cash,
            Self::Withdraw => player.bank,
        }
    }
}

#[function_component(BankPanel)]
pub fn bank_panel(p: &PanelProps) -> Html {
    let amount_input = use_state(String::new);
    let status = use_state(String::new);
    let player = &p.game.player;

    let make_transfer = |kind: Transfer| {
        let amount_input = amount_input.clone();
        let status = status.clone();
        let game = p.game.clone();
        let on_change = p.on_state_change.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(amount) = clamped_amount(&amount_input, kind.available(&game.player)) else {
                announce(&status, String::from("Enter a whole dollar amount"));
                return;
            };
            let result = apply(&game, &on_change, |g| match kind {
                Transfer::Deposit => deposit(&mut g.player, amount),
                Transfer::Withdraw => withdraw(&mut g.player, amount),
            });
            match result {
                Ok(()) => {
                    let verb = match kind {
                        Transfer::Deposit => "Deposited",
                        Transfer::Withdraw => "Withdrew",
                    };
                    announce(&status, format!("{verb} {}", format_money(amount)));
                    amount_input.set(String::new());
                }
                Err(err) => announce(&status, err.to_string()),
            }
        })
    };

    // "All" fills the field with everything that can move in that direction.
    let make_fill = |available: u64| {
        let amount_input = amount_input.clone();
        Callback::from(move |_: MouseEvent| {
            amount_input.set(available.to_string());
        })
    };

    html! {
        <section class="panel bank" aria-label="Bank">
            <dl class="bank__balances">
                <dt>{"Cash"}</dt><dd>{ format_money(player.cash) }</dd>
                <dt>{"Bank"}</dt><dd>{ format_money(player.bank) }</dd>
            </dl>
            <label for="bank-amount">{"Amount"}</label>
            <input id="bank-amount" type="text" inputmode="numeric" value={(*amount_input).clone()} oninput={bind_amount(&amount_input, player.cash.max(player.bank))} />
            <div class="bank__actions">
                <Button label="All cash" onclick={make_fill(player.cash)} />
                <Button label="All savings" onclick={make_fill(player.bank)} />
                <Button label="Deposit" class={classes!("bank__deposit")} onclick={make_transfer(Transfer::Deposit)} />
                <Button label="Withdraw" class={classes!("bank__withdraw")} onclick={make_transfer(Transfer::Withdraw)} />
            </div>
            { status_line(&status) }
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ui::fixtures::{props, props_with};
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn shows_both_balances() {
        let base = props();
        let mut game = (*base.game).clone();
        game.player.cash = 500;
        game.player.bank = 2_500;
        let props = props_with(game, (*base.config).clone());
        let html = block_on(LocalServerRenderer::<BankPanel>::with_props(props).render());
        assert!(html.contains("$500"), "{html}");
        assert!(html.contains("$2,500"), "{html}");
        assert!(html.contains("Deposit"), "{html}");
        assert!(html.contains("Withdraw"), "{html}");
        assert!(html.contains("class=\"action bank__deposit\""), "{html}");
    }

    #[test]
    fn transfers_clamp_to_their_source() {
        let mut player = props().game.player.clone();
        player.cash = 500;
        player.bank = 2_500;
        assert_eq!(clamped_amount("900", Transfer::Deposit.available(&player)), Some(500));
        assert_eq!(clamped_amount("900", Transfer::Withdraw.available(&player)), Some(900));
        assert_eq!(clamped_amount("$9,000", Transfer::Withdraw.available(&player)), Some(2_500));
    }
}
