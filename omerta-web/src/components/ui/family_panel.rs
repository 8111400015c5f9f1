//! Family registry: found, join, leave and pay into the family bank.
use super::{
    PanelProps, announce, apply, bind_amount, bind_input, clamped_amount, format_money, status_line,
};
use crate::components::Button;
use crate::game::Family;
use yew::prelude::*;

fn family_card(family: &Family) -> Html {
    html! {
        <div class="family__card">
            <h4>{ family.name.clone() }</h4>
            <p>{ format!("Boss: {}", family.boss) }</p>
            <p>{ format!("Members: {}", family.members.join(", ")) }</p>
            <p>{ format!("Family bank: {}", format_money(family.bank)) }</p>
        </div>
    }
}

#[function_component(FamilyPanel)]
pub fn family_panel(p: &PanelProps) -> Html {
    let name_input = use_state(String::new);
    let amount_input = use_state(String::new);
    let status = use_state(String::new);
    let player = &p.game.player;
    let families = &p.game.world.families;
    let rules = &p.config.family;

    let on_create = {
        let name_input = name_input.clone();
        let status = status.clone();
        let game = p.game.clone();
        let config = p.config.clone();
        let on_change = p.on_state_change.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let now = crate::clock::now_ms();
            let result = apply(&game, &on_change, |g| {
                g.world
                    .families
                    .create(&mut g.player, &name_input, now, &config.family)
                    .map(|family| family.name.clone())
            });
            match result {
                Ok(name) => {
                    announce(&status, format!("The {name} family is born"));
                    name_input.set(String::new());
                }
                Err(err) => announce(&status, err.to_string()),
            }
        })
    };

    let on_join = {
        let status = status.clone();
        let game = p.game.clone();
        let on_change = p.on_state_change.clone();
        Callback::from(move |name: String| {
            match apply(&game, &on_change, |g| g.world.families.join(&mut g.player, &name)) {
                Ok(()) => announce(&status, format!("You joined the {name} family")),
                Err(err) => announce(&status, err.to_string()),
            }
        })
    };

    let on_leave = {
        let status = status.clone();
        let game = p.game.clone();
        let on_change = p.on_state_change.clone();
        Callback::from(move |_: MouseEvent| {
            match apply(&game, &on_change, |g| g.world.families.leave(&mut g.player)) {
                Ok(()) => announce(&status, String::from("You left the family")),
                Err(err) => announce(&status, err.to_string()),
            }
        })
    };

    let on_deposit = {
        let amount_input = amount_input.clone();
        let status = status.clone();
        let game = p.game.clone();
        let on_change = p.on_state_change.clone();
        Callback::from(move |_: MouseEvent| {
            let amount = clamped_amount(&amount_input, game.player.cash).unwrap_or(0);
            match apply(&game, &on_change, |g| g.world.families.deposit(&mut g.player, amount)) {
                Ok(total) => {
                    announce(&status, format!("Family bank now holds {}", format_money(total)));
                    amount_input.set(String::new());
                }
                Err(err) => announce(&status, err.to_string()),
            }
        })
    };

    let mine = player.family_name.as_deref().and_then(|name| families.get(name));
    let membership = mine.map_or_else(
        || html! {
            <form class="family__create" onsubmit={on_create}>
                <h3>{"Found a family"}</h3>
                <p>{ format!("Costs {}. Names up to {} characters.", format_money(rules.create_cost), rules.max_name_len) }</p>
                <label for="family-name">{"Family name"}</label>
                <input id="family-name" type="text" value={(*name_input).clone()} oninput={bind_input(&name_input)} />
                <button type="submit">{"Found"}</button>
            </form>
        },
        |family| html! {
            <div class="family__mine">
                <h3>{"Your family"}</h3>
                { family_card(family) }
                <label for="family-amount">{"Contribute"}</label>
                <input id="family-amount" type="text" inputmode="numeric" value={(*amount_input).clone()} oninput={bind_amount(&amount_input, player.cash)} />
                <Button label="Deposit" onclick={on_deposit} />
                <Button label="Leave family" onclick={on_leave} />
            </div>
        },
    );

    html! {
        <section class="panel family" aria-label="Families">
            { membership }
            <h3>{"Families"}</h3>
            <ul class="family__list">
                { for families.iter().map(|family| {
                    let join = (player.family_name.is_none()).then(|| {
                        let on_join = on_join.clone();
                        let name = family.name.clone();
                        let onclick = Callback::from(move |_: MouseEvent| on_join.emit(name.clone()));
                        html! { <Button label="Join" {onclick} /> }
                    });
                    html! {
                        <li key={family.name.clone()}>
                            { family_card(family) }
                            { join.unwrap_or_default() }
                        </li>
                    }
                }) }
            </ul>
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
    fn outsider_sees_roster_families_and_fee() {
        let html = block_on(LocalServerRenderer::<FamilyPanel>::with_props(props()).render());
        assert!(html.contains("Tattaglia"), "{html}");
        assert!(html.contains("Barzini"), "{html}");
        assert!(html.contains("Boss: Philip Tattaglia"), "{html}");
        assert!(html.contains("Costs $50,000."), "{html}");
        assert!(html.contains("Join"), "{html}");
    }

    #[test]
    fn member_sees_own_family() {
        let base = props();
        let mut game = (*base.game).clone();
        game.world
            .families
            .join(&mut game.player, "barzini")
            .unwrap();
        let props = props_with(game, (*base.config).clone());
        let html = block_on(LocalServerRenderer::<FamilyPanel>::with_props(props).render());
        assert!(html.contains("Your family"), "{html}");
        assert!(html.contains("Members: Emilio Barzini, Michael"), "{html}");
        assert!(html.contains("Leave family"), "{html}");
        assert!(!html.contains(">Join<"), "{html}");
    }
}
