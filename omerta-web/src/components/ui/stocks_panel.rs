use super::{PanelProps, announce, apply, bind_input, clamped_amount, format_money, status_line};
use crate::components::Button;
use crate::game::{GameSnapshot, StockState};
use yew::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Order {
    Buy,
    Sell,
}

impl Order {
    /// Most shares of `symbol` this order could move right now.
    fn max_shares(self, game: &GameSnapshot, symbol: &str) -> u64 {
        let player = &game.player;
        match self {
            Self::Buy => game
                .world
                .market
                .quote(symbol)
                .map_or(0, |stock| player.cash / stock.price.max(1)),
            Self::Sell => player.holdings.get(symbol).copied().unwrap_or(0),
        }
    }
}

/// SVG polyline points for a price history scaled into `width` x `height`.
#[must_use]
pub fn sparkline_points(history: &[u64], width: u32, height: u32) -> String {
    let (Some(&lo), Some(&hi)) = (history.iter().min(), history.iter().max()) else {
        return String::new();
    };
    let span = (hi - lo).max(1);
    let steps = u64::try_from(history.len().saturating_sub(1)).unwrap_or(1).max(1);
    history
        .iter()
        .zip(0_u64..)
        .map(|(&price, i)| {
            let x = i * u64::from(width) / steps;
            let y = u64::from(height) - (price - lo) * u64::from(height) / span;
            format!("{x},{y}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn change_label(stock: &StockState) -> String {
    let previous = stock
        .history
        .iter()
        .rev()
        .nth(1)
        .copied()
        .unwrap_or(stock.price);
    match stock.price.cmp(&previous) {
        std::cmp::Ordering::Greater => format!("▲ {}", stock.price - previous),
        std::cmp::Ordering::Less => format!("▼ {}", previous - stock.price),
        std::cmp::Ordering::Equal => String::from("–"),
    }
}

#[function_component(StocksPanel)]
pub fn stocks_panel(p: &PanelProps) -> Html {
    let shares_input = use_state(|| String::from("10"));
    let status = use_state(String::new);
    let player = &p.game.player;
    let market = &p.game.world.market;

    let on_order = {
        let shares_input = shares_input.clone();
        let status = status.clone();
        let game = p.game.clone();
        let on_change = p.on_state_change.clone();
        Callback::from(move |(order, symbol): (Order, String)| {
            let shares =
                clamped_amount(&shares_input, order.max_shares(&game, &symbol)).unwrap_or(0);
            let result = apply(&game, &on_change, |g| match order {
                Order::Buy => g.world.market.buy(&mut g.player, &symbol, shares),
                Order::Sell => g.world.market.sell(&mut g.player, &symbol, shares),
            });
            match (result, order) {
                (Ok(total), Order::Buy) => {
                    announce(&status, format!("Bought {shares} {symbol} for {}", format_money(total)));
                }
                (Ok(total), Order::Sell) => {
                    announce(&status, format!("Sold {shares} {symbol} for {}", format_money(total)));
                }
                (Err(err), _) => announce(&status, err.to_string()),
            }
        })
    };

    let order_button = |order: Order, symbol: &str| {
        let on_order = on_order.clone();
        let symbol = symbol.to_string();
        let onclick = Callback::from(move |_: MouseEvent| on_order.emit((order, symbol.clone())));
        let label = match order {
            Order::Buy => "Buy",
            Order::Sell => "Sell",
        };
        html! { <Button {label} {onclick} /> }
    };

    html! {
        <section class="panel stocks" aria-label="Stock market">
            <p>{ format!("Portfolio value: {}", format_money(market.portfolio_value(player))) }</p>
            <label for="stock-shares">{"Shares"}</label>
            <input id="stock-shares" type="text" inputmode="numeric" value={(*shares_input).clone()} oninput={bind_input(&shares_input)} />
            <table>
                <thead>
                    <tr><th>{"Symbol"}</th><th>{"Company"}</th><th>{"Price"}</th><th>{"Change"}</th><th>{"Trend"}</th><th>{"Held"}</th><th></th></tr>
                </thead>
                <tbody>
                    { for market.stocks().iter().map(|stock| {
                        let history: Vec<u64> = stock.history.iter().copied().collect();
                        let held = player.holdings.get(&stock.symbol).copied().unwrap_or(0);
                        html! {
                            <tr key={stock.symbol.clone()}>
                                <td>{ stock.symbol.clone() }</td>
                                <td>{ stock.name.clone() }</td>
                                <td>{ format_money(stock.price) }</td>
                                <td>{ change_label(stock) }</td>
                                <td>
                                    <svg width="80" height="20" viewBox="0 0 80 20" role="presentation" aria-hidden="true">
                                        <polyline points={sparkline_points(&history, 80, 20)} fill="none" stroke="currentColor" stroke-width="1.5" />
                                    </svg>
                                </td>
                                <td>{ held.to_string() }</td>
                                <td>
                                    { order_button(Order::Buy, &stock.symbol) }
                                    { order_button(Order::Sell, &stock.symbol) }
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
    use crate::components::ui::fixtures::{props, props_with};
    use crate::game::seeded;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn sparkline_scales_into_box() {
        assert_eq!(sparkline_points(&[], 80, 20), "");
        assert_eq!(sparkline_points(&[5], 80, 20), "0,20");
        assert_eq!(sparkline_points(&[10, 20, 15], 80, 20), "0,20 40,0 80,10");
    }

    #[test]
    fn lists_stocks_with_holdings() {
        let base = props();
        let mut game = (*base.game).clone();
        let market = game.world.market.clone();
        market.buy(&mut game.player, "DOCK", 3).unwrap();
        game.world.market.tick(&mut seeded(3));
        let props = props_with(game, (*base.config).clone());
        let html = block_on(LocalServerRenderer::<StocksPanel>::with_props(props).render());
        assert!(html.contains("Genco Olive Oil"), "{html}");
        assert!(html.contains("DOCK"), "{html}");
        assert!(html.contains("<polyline"), "{html}");
        assert!(html.contains("<td>3</td>"), "{html}");
    }

    #[test]
    fn orders_clamp_to_cash_and_holdings() {
        let base = props();
        let mut game = (*base.game).clone();
        let price = game.world.market.quote("DOCK").unwrap().price;
        game.player.cash = price * 4 + 1;
        game.player.holdings.insert(String::from("DOCK"), 2);
        assert_eq!(Order::Buy.max_shares(&game, "DOCK"), 4);
        assert_eq!(Order::Sell.max_shares(&game, "DOCK"), 2);
        assert_eq!(Order::Sell.max_shares(&game, "OLIV"), 0);
        assert_eq!(Order::Buy.max_shares(&game, "NOPE"), 0);
        assert_eq!(clamped_amount("10", Order::Buy.max_shares(&game, "DOCK")), Some(4));
    }
}
