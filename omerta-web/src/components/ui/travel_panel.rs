use super::{PanelProps, announce, apply, format_money, status_line};
use crate::components::CountdownBadge;
use crate::game::countdown::format_secs;
use crate::game::travel::find_city;
use crate::game::{CountdownKind, GameSnapshot, depart};
use yew::prelude::*;

#[function_component(TravelPanel)]
pub fn travel_panel(p: &PanelProps) -> Html {
    let status = use_state(String::new);
    let player = &p.game.player;
    let cities = &p.config.cities;
    let city_name = |id: &str| find_city(cities, id).map_or_else(|| id.to_string(), |c| c.name.clone());

    let on_fly = {
        let status = status.clone();
        let game = p.game.clone();
        let config = p.config.clone();
        let on_change = p.on_state_change.clone();
        Callback::from(move |destination: String| {
            let now = crate::clock::now_ms();
            match apply(&game, &on_change, |g| depart(&mut g.player, &config.cities, &destination, now)) {
                Ok(journey) => {
                    let to = find_city(&config.cities, &journey.to)
                        .map_or(journey.to.as_str(), |c| c.name.as_str());
                    announce(&status, format!("Boarded the flight to {to}"));
                }
                Err(err) => announce(&status, err.to_string()),
            }
        })
    };

    let on_landed = {
        let game = p.game.clone();
        let on_change = p.on_state_change.clone();
        Callback::from(move |()| {
            let mut next: GameSnapshot = (*game).clone();
            if next.player.settle(crate::clock::now_ms()).arrived.is_some() {
                on_change.emit(next);
            }
        })
    };

    let in_flight = player.journey.as_ref().filter(|j| p.now_ms < j.arrive_at);
    let header = in_flight.map_or_else(
        || html! { <p>{ format!("You are in {}.", city_name(&player.location)) }</p> },
        |journey| html! {
            <p class="travel__flight">
                { format!("Flying {} to {}. ", city_name(&journey.from), city_name(&journey.to)) }
                <CountdownBadge
                    end_ms={journey.arrive_at}
                    kind={CountdownKind::Travel}
                    now_ms={p.now_ms}
                    label={AttrValue::from("Landing")}
                    on_expired={on_landed.clone()}
                />
            </p>
        },
    );
    let grounded = player.ensure_free(p.now_ms).is_err();

    html! {
        <section class="panel travel" aria-label="Travel">
            { header }
            <table>
                <thead>
                    <tr><th>{"City"}</th><th>{"Ticket"}</th><th>{"Flight"}</th><th></th></tr>
                </thead>
                <tbody>
                    { for cities.iter().filter(|c| c.id != player.location).map(|city| {
                        let onclick = {
                            let on_fly = on_fly.clone();
                            let id = city.id.clone();
                            Callback::from(move |_: MouseEvent| on_fly.emit(id.clone()))
                        };
                        let affordable = player.cash >= city.ticket_price;
                        html! {
                            <tr key={city.id.clone()}>
                                <td>{ city.name.clone() }</td>
                                <td>{ format_money(city.ticket_price) }</td>
                                <td>{ format_secs(city.flight_secs) }</td>
                                <td>
                                    <button type="button" disabled={grounded || !affordable} {onclick}>{"Fly"}</button>
                                </td>
                            </tr>
                        }
                    }) }
                </tbody>
            </table>
            { status_line(&status) }
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ui::fixtures::{NOW, props, props_with};
    use crate::game::Journey;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn lists_destinations_but_not_current_city() {
        let html = block_on(LocalServerRenderer::<TravelPanel>::with_props(props()).render());
        assert!(html.contains("You are in Palermo."), "{html}");
        assert!(html.contains("New York"), "{html}");
        assert!(!html.contains("<td>Palermo</td>"), "{html}");
    }

    #[test]
    fn flight_in_progress_shows_landing_countdown() {
        let base = props();
        let mut game = (*base.game).clone();
        game.player.journey = Some(Journey {
            from: "palermo".into(),
            to: "havana".into(),
            depart_at: NOW - 1_000,
            arrive_at: NOW + 3_725_000,
        });
        let props = props_with(game, (*base.config).clone());
        let html = block_on(LocalServerRenderer::<TravelPanel>::with_props(props).render());
        assert!(html.contains("Flying Palermo to Havana."), "{html}");
        assert!(html.contains("1h 2m"), "{html}");
    }
}
