//! Odds-or-Evens dice game.
//!
//! Two fair dice are summed and the player wins when the sum's parity matches
//! their call. Pays 1:1, so a win returns the stake doubled.

use crate::error::{GameError, GameResult};
use crate::player::Player;
use crate::rng::roll_die;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Parity {
    Odd,
    Even,
}

impl Parity {
    #[must_use]
    pub const fn of(value: u8) -> Self {
        if value % 2 == 0 { Self::Even } else { Self::Odd }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Odd => "Odd",
            Self::Even => "Even",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    pub first: u8,
    pub second: u8,
}

impl DiceRoll {
    #[must_use]
    pub const fn sum(self) -> u8 {
        self.first + self.second
    }

    #[must_use]
    pub const fn parity(self) -> Parity {
        Parity::of(self.sum())
    }
}

pub fn roll_dice<R: Rng + ?Sized>(rng: &mut R) -> DiceRoll {
    DiceRoll {
        first: roll_die(rng),
        second: roll_die(rng),
    }
}

/// Win iff the sum's parity matches the call.
#[must_use]
pub fn resolve(roll: DiceRoll, choice: Parity) -> bool {
    (roll.sum() % 2 == 0) == (choice == Parity::Even)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OddsEvensOutcome {
    pub roll: DiceRoll,
    pub choice: Parity,
    pub stake: u64,
    pub won: bool,
    /// Amount credited back to the player: twice the stake on a win.
    pub payout: u64,
}

/// Stake, roll and settle one game against the player's cash.
///
/// # Errors
///
/// Rejects a zero stake or one above the player's cash.
pub fn play<R: Rng + ?Sized>(
    player: &mut Player,
    stake: u64,
    choice: Parity,
    rng: &mut R,
) -> GameResult<OddsEvensOutcome> {
    if stake > player.cash {
        return Err(GameError::InsufficientFunds {
            available: player.cash,
            requested: stake,
        });
    }
    player.debit(stake)?;
    let roll = roll_dice(rng);
    let won = resolve(roll, choice);
    let payout = if won { stake.saturating_mul(2) } else { 0 };
    player.credit(payout);
    log::debug!(
        "odds-evens: rolled {}+{}={} calling {}: {}",
        roll.first,
        roll.second,
        roll.sum(),
        choice.label(),
        if won { "win" } else { "loss" }
    );
    Ok(OddsEvensOutcome {
        roll,
        choice,
        stake,
        won,
        payout,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayerStart;
    use crate::rng::seeded;

    #[test]
    fn resolve_matches_parity_for_every_roll() {
        for first in 1..=6 {
            for second in 1..=6 {
                let roll = DiceRoll { first, second };
                let even = (first + second) % 2 == 0;
                assert_eq!(resolve(roll, Parity::Even), even);
                assert_eq!(resolve(roll, Parity::Odd), !even);
                assert_eq!(roll.parity() == Parity::Even, even);
            }
        }
    }

    #[test]
    fn parity_split_is_exactly_half() {
        let even = (1..=6_u8)
            .flat_map(|a| (1..=6_u8).map(move |b| a + b))
            .filter(|sum| sum % 2 == 0)
            .count();
        assert_eq!(even, 18);
    }

    #[test]
    fn play_settles_one_to_one() {
        let mut rng = seeded(21);
        let mut player = Player::new("Clemenza", &PlayerStart::default());
        for _ in 0..50 {
            let before = player.cash;
            let outcome = play(&mut player, 10, Parity::Odd, &mut rng).unwrap();
            if outcome.won {
                assert_eq!(player.cash, before + 10);
                assert_eq!(outcome.payout, 20);
            } else {
                assert_eq!(player.cash, before - 10);
                assert_eq!(outcome.payout, 0);
            }
        }
    }

    #[test]
    fn stake_limits() {
        let mut rng = seeded(2);
        let mut player = Player::new("Fredo", &PlayerStart::default());
        assert_eq!(
            play(&mut player, 1_001, Parity::Even, &mut rng),
            Err(GameError::InsufficientFunds {
                available: 1_000,
                requested: 1_001
            })
        );
        assert_eq!(
            play(&mut player, 0, Parity::Even, &mut rng),
            Err(GameError::ZeroAmount)
        );
        assert!(play(&mut player, 1_000, Parity::Even, &mut rng).is_ok());
    }
}
