//! Toy stock market driven by a bounded random walk.
use crate::error::{GameError, GameResult};
use crate::numbers::{round_f64_to_u64, u64_to_f64};
use crate::player::Player;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Prices kept per stock for the sparkline.
pub const HISTORY_LEN: usize = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockDef {
    pub symbol: String,
    pub name: String,
    pub initial_price: u64,
    /// Largest move per tick, in percent.
    #[serde(default = "default_volatility")]
    pub volatility_pct: f64,
}

const fn default_volatility() -> f64 {
    5.0
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockState {
    pub symbol: String,
    pub name: String,
    pub price: u64,
    pub history: VecDeque<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Market {
    stocks: Vec<StockState>,
    volatility: Vec<f64>,
}

impl Market {
    #[must_use]
    pub fn new(defs: &[StockDef]) -> Self {
        let stocks = defs
            .iter()
            .map(|def| StockState {
                symbol: def.symbol.clone(),
                name: def.name.clone(),
                price: def.initial_price.max(1),
                history: VecDeque::from([def.initial_price.max(1)]),
            })
            .collect();
        let volatility = defs
            .iter()
            .map(|def| def.volatility_pct.clamp(0.0, 50.0))
            .collect();
        Self { stocks, volatility }
    }

    #[must_use]
    pub fn stocks(&self) -> &[StockState] {
        &self.stocks
    }

    #[must_use]
    pub fn quote(&self, symbol: &str) -> Option<&StockState> {
        self.stocks.iter().find(|s| s.symbol == symbol)
    }

    /// Move every price by up to its volatility, never below 1.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for (stock, &vol) in self.stocks.iter_mut().zip(&self.volatility) {
            let pct = if vol > 0.0 {
                rng.gen_range(-vol..=vol)
            } else {
                0.0
            };
            let next = u64_to_f64(stock.price) * (1.0 + pct / 100.0);
            stock.price = round_f64_to_u64(next).max(1);
            if stock.history.len() >= HISTORY_LEN {
                stock.history.pop_front();
            }
            stock.history.push_back(stock.price);
        }
    }

    fn price_of(&self, symbol: &str) -> GameResult<u64> {
        self.quote(symbol)
            .map(|s| s.price)
            .ok_or_else(|| GameError::UnknownStock(symbol.to_string()))
    }

    /// Buy whole shares at the current price. Returns the cost.
    ///
    /// # Errors
    ///
    /// Rejects unknown symbols, zero shares and unaffordable orders.
    pub fn buy(&self, player: &mut Player, symbol: &str, shares: u64) -> GameResult<u64> {
        let price = self.price_of(symbol)?;
        if shares == 0 {
            return Err(GameError::ZeroAmount);
        }
        let cost = price.saturating_mul(shares);
        player.debit(cost)?;
        let held = player.holdings.entry(symbol.to_string()).or_insert(0);
        *held = held.saturating_add(shares);
        Ok(cost)
    }

    /// Sell whole shares at the current price. Returns the proceeds.
    ///
    /// # Errors
    ///
    /// Rejects unknown symbols, zero shares and selling more than held.
    pub fn sell(&self, player: &mut Player, symbol: &str, shares: u64) -> GameResult<u64> {
        let price = self.price_of(symbol)?;
        if shares == 0 {
            return Err(GameError::ZeroAmount);
        }
        let held = player.holdings.get(symbol).copied().unwrap_or(0);
        if shares > held {
            return Err(GameError::InsufficientShares {
                held,
                requested: shares,
            });
        }
        if held == shares {
            player.holdings.remove(symbol);
        } else {
            player.holdings.insert(symbol.to_string(), held - shares);
        }
        let proceeds = price.saturating_mul(shares);
        player.credit(proceeds);
        Ok(proceeds)
    }

    /// Current value of everything the player holds.
    #[must_use]
    pub fn portfolio_value(&self, player: &Player) -> u64 {
        player
            .holdings
            .iter()
            .filter_map(|(symbol, &shares)| {
                self.quote(symbol).map(|s| s.price.saturating_mul(shares))
            })
            .fold(0, u64::saturating_add)
    }
}
