use super::format_money;
use crate::components::CountdownBadge;
use crate::game::travel::find_city;
use crate::game::{CityDef, GameSnapshot};
use std::rc::Rc;
use yew::prelude::*;

#[derive(Properties, Clone)]
pub struct Props {
    pub game: Rc<GameSnapshot>,
    pub city_name: AttrValue,
    pub now_ms: u64,
    /// Fired when any running timer reaches zero.
    #[prop_or_default]
    pub on_timer_done: Callback<()>,
}

impl PartialEq for Props {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.game, &other.game)
            && self.city_name == other.city_name
            && self.now_ms == other.now_ms
    }
}

fn stat_chip(label: &'static str, value: String) -> Html {
    html! {
        <div class="stat-chip" role="listitem">
            <span class="stat-label">{ label }</span>
            <span class="stat-value">{ value }</span>
        </div>
    }
}

#[function_component(StatsBar)]
pub fn stats_bar(p: &Props) -> Html {
    let player = &p.game.player;
    let portfolio = p.game.world.market.portfolio_value(player);
    let unread = p.game.world.mailbox.unread_count(&player.name);
    let timers = player.countdowns(p.now_ms);

    html! {
        <header class="stats-bar" aria-label="Player status">
            <div class="stats-row" role="list">
                { stat_chip("Name", player.name.clone()) }
                { stat_chip("Rank", player.rank().label().to_string()) }
                { stat_chip("Cash", format_money(player.cash)) }
                { stat_chip("Bank", format_money(player.bank)) }
                { stat_chip("Stocks", format_money(portfolio)) }
                { stat_chip("Health", format!("{}%", player.health)) }
                { stat_chip("Bullets", player.bullets.to_string()) }
                { stat_chip("City", p.city_name.to_string()) }
                { stat_chip("Family", player.family_name.clone().unwrap_or_else(|| "None".to_string())) }
                { stat_chip("Mail", unread.to_string()) }
            </div>
            <div class="timers" aria-live="polite">
                { for timers.into_iter().map(|(label, countdown)| html! {
                    <CountdownBadge
                        key={label.clone()}
                        end_ms={countdown.end_ms}
                        kind={countdown.kind}
                        now_ms={p.now_ms}
                        label={AttrValue::from(label.clone())}
                        on_expired={p.on_timer_done.clone()}
                    />
                }) }
            </div>
        </header>
    }
}

/// Display name for the player's current city, falling back to its id.
#[must_use]
pub fn city_label(game: &GameSnapshot, cities: &[CityDef]) -> String {
    let id = &game.player.location;
    find_city(cities, id).map_or_else(|| id.clone(), |city| city.name.clone())
}
