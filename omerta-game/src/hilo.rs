//! Higher-or-Lower card game.
//!
//! A round reveals one card from a freshly shuffled deck. Each guess draws
//! the next card without replacement:
//! - Higher wins when the drawn rank is greater, Lower when it is smaller.
//! - An equal rank is a push and always counts as a win.
//! - Every win doubles the running payout, `bet × 2^streak`.
//! - A miss zeroes the payout and ends the round.
//!
//! The player may cash out after any win. Once the deck is spent the only
//! remaining move is to cash out.

use crate::cards::{Card, Deck};
use crate::error::{GameError, GameResult};
use crate::numbers::saturating_double;
use crate::player::Player;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Guess {
    Higher,
    Lower,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuessResult {
    Win,
    /// Equal rank; scored as a win.
    Push,
    Lose,
}

impl GuessResult {
    #[must_use]
    pub const fn is_win(self) -> bool {
        matches!(self, Self::Win | Self::Push)
    }
}

/// Compare the drawn card against the visible one.
#[must_use]
pub fn resolve_guess(current: Card, drawn: Card, guess: Guess) -> GuessResult {
    use std::cmp::Ordering;
    match (drawn.value().cmp(&current.value()), guess) {
        (Ordering::Equal, _) => GuessResult::Push,
        (Ordering::Greater, Guess::Higher) | (Ordering::Less, Guess::Lower) => GuessResult::Win,
        _ => GuessResult::Lose,
    }
}

/// Running payout after `streak` consecutive wins.
#[must_use]
pub fn payout_for_streak(bet: u64, streak: u32) -> u64 {
    saturating_double(bet, streak)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundStatus {
    Active,
    CashedOut { payout: u64 },
    Busted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessOutcome {
    pub previous: Card,
    pub drawn: Card,
    pub result: GuessResult,
    pub streak: u32,
    pub payout: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HigherLowerRound {
    bet: u64,
    deck: Deck,
    current: Card,
    streak: u32,
    status: RoundStatus,
    history: Vec<Card>,
}

impl HigherLowerRound {
    /// Shuffle a fresh deck and reveal the first card.
    ///
    /// # Errors
    ///
    /// Rejects a zero bet or one above `available` before any card is drawn.
    pub fn start<R: Rng + ?Sized>(bet: u64, available: u64, rng: &mut R) -> GameResult<Self> {
        if bet == 0 {
            return Err(GameError::ZeroAmount);
        }
        if bet > available {
            return Err(GameError::InsufficientFunds {
                available,
                requested: bet,
            });
        }
        Self::with_deck(bet, Deck::shuffled(rng))
    }

    /// Start from a prepared deck; the last card is revealed first.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::ZeroAmount`] for a zero bet and
    /// [`GameError::DeckExhausted`] when the deck has no cards.
    pub fn with_deck(bet: u64, mut deck: Deck) -> GameResult<Self> {
        if bet == 0 {
            return Err(GameError::ZeroAmount);
        }
        let current = deck.draw().ok_or(GameError::DeckExhausted)?;
        Ok(Self {
            bet,
            deck,
            current,
            streak: 0,
            status: RoundStatus::Active,
            history: vec![current],
        })
    }

    /// # Errors
    ///
    /// Returns [`GameError::RoundOver`] after a bust or cash-out and
    /// [`GameError::DeckExhausted`] once every card has been revealed.
    pub fn guess(&mut self, guess: Guess) -> GameResult<GuessOutcome> {
        if self.status != RoundStatus::Active {
            return Err(GameError::RoundOver);
        }
        let drawn = self.deck.draw().ok_or(GameError::DeckExhausted)?;
        let previous = self.current;
        let result = resolve_guess(previous, drawn, guess);
        self.current = drawn;
        self.history.push(drawn);
        if result.is_win() {
            self.streak = self.streak.saturating_add(1);
        } else {
            self.status = RoundStatus::Busted;
        }
        let payout = self.potential_payout();
        log::debug!(
            "hilo: {previous} -> {drawn} guessing {guess:?}: {result:?}, streak {}, payout {payout}",
            self.streak
        );
        Ok(GuessOutcome {
            previous,
            drawn,
            result,
            streak: self.streak,
            payout,
        })
    }

    /// Bank `bet × 2^streak` and end the round.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::RoundOver`] when the round already ended and
    /// [`GameError::NothingToCashOut`] before the first correct guess.
    pub fn cash_out(&mut self) -> GameResult<u64> {
        if self.status != RoundStatus::Active {
            return Err(GameError::RoundOver);
        }
        if self.streak == 0 {
            return Err(GameError::NothingToCashOut);
        }
        let payout = payout_for_streak(self.bet, self.streak);
        self.status = RoundStatus::CashedOut { payout };
        Ok(payout)
    }

    /// What cashing out would pay right now; zero once busted.
    #[must_use]
    pub fn potential_payout(&self) -> u64 {
        match self.status {
            RoundStatus::Active => payout_for_streak(self.bet, self.streak),
            RoundStatus::CashedOut { payout } => payout,
            RoundStatus::Busted => 0,
        }
    }

    #[must_use]
    pub fn can_guess(&self) -> bool {
        self.status == RoundStatus::Active && !self.deck.is_empty()
    }

    #[must_use]
    pub fn can_cash_out(&self) -> bool {
        self.status == RoundStatus::Active && self.streak > 0
    }

    #[must_use]
    pub const fn bet(&self) -> u64 {
        self.bet
    }

    #[must_use]
    pub const fn current(&self) -> Card {
        self.current
    }

    #[must_use]
    pub const fn streak(&self) -> u32 {
        self.streak
    }

    #[must_use]
    pub const fn status(&self) -> RoundStatus {
        self.status
    }

    #[must_use]
    pub fn cards_left(&self) -> usize {
        self.deck.remaining()
    }

    /// Every card revealed so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &[Card] {
        &self.history
    }
}

/// Take the stake from the player's cash and open a round.
///
/// # Errors
///
/// Same as [`HigherLowerRound::start`]; cash is untouched on error.
pub fn start_round<R: Rng + ?Sized>(
    player: &mut Player,
    bet: u64,
    rng: &mut R,
) -> GameResult<HigherLowerRound> {
    let round = HigherLowerRound::start(bet, player.cash, rng)?;
    player.debit(bet)?;
    Ok(round)
}

/// Cash the round out into the player's cash.
///
/// # Errors
///
/// Same as [`HigherLowerRound::cash_out`].
pub fn cash_out_round(player: &mut Player, round: &mut HigherLowerRound) -> GameResult<u64> {
    let payout = round.cash_out()?;
    player.credit(payout);
    Ok(payout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};
    use crate::player::PlayerStart;
    use crate::rng::seeded;

    fn card(value: u8) -> Card {
        Card::new(Suit::Hearts, Rank::new(value).unwrap())
    }

    /// Deck that reveals `values` in order.
    fn stacked(values: &[u8]) -> Deck {
        let mut ordered: Vec<Card> = values.iter().map(|&v| card(v)).collect();
        ordered.reverse();
        Deck::from_cards(ordered)
    }

    #[test]
    fn guess_resolution_table() {
        assert_eq!(resolve_guess(card(5), card(9), Guess::Higher), GuessResult::Win);
        assert_eq!(resolve_guess(card(5), card(9), Guess::Lower), GuessResult::Lose);
        assert_eq!(resolve_guess(card(9), card(5), Guess::Lower), GuessResult::Win);
        assert_eq!(resolve_guess(card(9), card(5), Guess::Higher), GuessResult::Lose);
        assert_eq!(resolve_guess(card(7), card(7), Guess::Higher), GuessResult::Push);
        assert_eq!(resolve_guess(card(7), card(7), Guess::Lower), GuessResult::Push);
        assert!(GuessResult::Push.is_win());
    }

    #[test]
    fn three_wins_from_one_hundred_pays_eight_hundred() {
        let mut round = HigherLowerRound::with_deck(100, stacked(&[5, 8, 3, 3])).unwrap();
        assert_eq!(round.current(), card(5));
        assert_eq!(round.guess(Guess::Higher).unwrap().payout, 200);
        assert_eq!(round.guess(Guess::Lower).unwrap().payout, 400);
        let push = round.guess(Guess::Higher).unwrap();
        assert_eq!(push.result, GuessResult::Push);
        assert_eq!(push.streak, 3);
        assert_eq!(round.potential_payout(), 800);
        assert_eq!(round.cash_out(), Ok(800));
        assert_eq!(round.status(), RoundStatus::CashedOut { payout: 800 });
        assert_eq!(round.guess(Guess::Higher), Err(GameError::RoundOver));
    }

    #[test]
    fn miss_zeroes_payout_and_ends_round() {
        let mut round = HigherLowerRound::with_deck(50, stacked(&[10, 12, 2])).unwrap();
        round.guess(Guess::Higher).unwrap();
        let miss = round.guess(Guess::Higher).unwrap();
        assert_eq!(miss.result, GuessResult::Lose);
        assert_eq!(miss.payout, 0);
        assert_eq!(round.status(), RoundStatus::Busted);
        assert_eq!(round.cash_out(), Err(GameError::RoundOver));
        assert!(!round.can_guess());
    }

    #[test]
    fn cash_out_needs_a_win() {
        let mut round = HigherLowerRound::with_deck(10, stacked(&[4, 9])).unwrap();
        assert!(!round.can_cash_out());
        assert_eq!(round.cash_out(), Err(GameError::NothingToCashOut));
    }

    #[test]
    fn exhausted_deck_only_cashes_out() {
        let mut round = HigherLowerRound::with_deck(10, stacked(&[4, 9])).unwrap();
        round.guess(Guess::Higher).unwrap();
        assert!(!round.can_guess());
        assert_eq!(round.guess(Guess::Lower), Err(GameError::DeckExhausted));
        assert_eq!(round.cash_out(), Ok(20));
    }

    #[test]
    fn oversized_bet_rejected_before_drawing() {
        let mut rng = seeded(1);
        assert_eq!(
            HigherLowerRound::start(501, 500, &mut rng),
            Err(GameError::InsufficientFunds {
                available: 500,
                requested: 501
            })
        );
        assert_eq!(
            HigherLowerRound::start(0, 500, &mut rng),
            Err(GameError::ZeroAmount)
        );
        let round = HigherLowerRound::start(500, 500, &mut rng).unwrap();
        assert_eq!(round.cards_left(), 51);
    }

    #[test]
    fn full_deck_never_repeats_a_card() {
        let mut round = HigherLowerRound::start(1, 1, &mut seeded(77)).unwrap();
        // Ride every push/win until the deck runs out or the round busts.
        while round.can_guess() {
            let guess = if round.current().value() <= 8 {
                Guess::Higher
            } else {
                Guess::Lower
            };
            round.guess(guess).unwrap();
        }
        let mut seen = round.history().to_vec();
        let total = seen.len();
        seen.sort_by_key(|c| (c.suit, c.rank));
        seen.dedup();
        assert_eq!(seen.len(), total);
    }

    #[test]
    fn settlement_moves_cash() {
        let mut player = Player::new("Tessio", &PlayerStart::default());
        let opened = start_round(&mut player, 250, &mut seeded(5)).unwrap();
        assert_eq!(player.cash, 750);
        assert_eq!(opened.bet(), 250);

        assert!(start_round(&mut player, 751, &mut seeded(5)).is_err());
        assert_eq!(player.cash, 750);

        let mut round = HigherLowerRound::with_deck(250, stacked(&[2, 9])).unwrap();
        round.guess(Guess::Higher).unwrap();
        assert_eq!(cash_out_round(&mut player, &mut round), Ok(500));
        assert_eq!(player.cash, 1_250);
    }
}
