//! Reducer that owns the live snapshot.
//!
//! Timers (market ticks, countdown expiry) dispatch actions instead of
//! capturing a snapshot, so they always act on the latest state.

use crate::game::{GameSnapshot, seeded};
use std::rc::Rc;
use yew::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub enum GameAction {
    /// A panel produced a new snapshot.
    Replace(GameSnapshot),
    /// Land flights and release prisoners whose time is up.
    Settle(u64),
    /// Move stock prices one step, drawing from a generator seeded with the value.
    TickMarket(u64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameStore {
    pub snapshot: Rc<GameSnapshot>,
}

impl GameStore {
    #[must_use]
    pub fn new(snapshot: GameSnapshot) -> Self {
        Self {
            snapshot: Rc::new(snapshot),
        }
    }
}

impl Reducible for GameStore {
    type Action = GameAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            GameAction::Replace(snapshot) => Rc::new(Self::new(snapshot)),
            GameAction::Settle(now_ms) => {
                let mut next = (*self.snapshot).clone();
                let report = next.player.settle(now_ms);
                if let Some(city) = &report.arrived {
                    log::info!("arrived in {city}");
                }
                if report.released {
                    log::info!("released from prison");
                }
                if next == *self.snapshot {
                    self
                } else {
                    Rc::new(Self::new(next))
                }
            }
            GameAction::TickMarket(seed) => {
                if self.snapshot.world.market.stocks().is_empty() {
                    return self;
                }
                let mut next = (*self.snapshot).clone();
                next.world.market.tick(&mut seeded(seed));
                Rc::new(Self::new(next))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, Journey, Player, World};

    fn store() -> Rc<GameStore> {
        let config = GameConfig::default_config();
        Rc::new(GameStore::new(GameSnapshot::new(
            Player::new("Fredo", &config.player),
            World::from_config(&config),
        )))
    }

    #[test]
    fn settle_lands_flights_and_skips_noops() {
        let base = store();
        let unchanged = base.clone().reduce(GameAction::Settle(5_000));
        assert!(Rc::ptr_eq(&base, &unchanged), "nothing to settle keeps the same state");

        let mut flying = (*base.snapshot).clone();
        flying.player.journey = Some(Journey {
            from: "palermo".into(),
            to: "las-vegas".into(),
            depart_at: 0,
            arrive_at: 10_000,
        });
        let flying = Rc::new(GameStore::new(flying));
        let still_flying = flying.clone().reduce(GameAction::Settle(9_999));
        assert_eq!(still_flying.snapshot.player.location, "palermo");

        let landed = flying.reduce(GameAction::Settle(10_000));
        assert_eq!(landed.snapshot.player.location, "las-vegas");
        assert!(landed.snapshot.player.journey.is_none());
    }

    #[test]
    fn market_tick_records_history() {
        let base = store();
        let ticked = base.clone().reduce(GameAction::TickMarket(11));
        for (before, after) in base
            .snapshot
            .world
            .market
            .stocks()
            .iter()
            .zip(ticked.snapshot.world.market.stocks())
        {
            assert_eq!(after.history.len(), before.history.len() + 1);
            assert!(after.price >= 1);
        }
    }

    #[test]
    fn replace_swaps_snapshot() {
        let base = store();
        let mut next = (*base.snapshot).clone();
        next.player.cash = 7;
        let replaced = base.reduce(GameAction::Replace(next));
        assert_eq!(replaced.snapshot.player.cash, 7);
    }
}
