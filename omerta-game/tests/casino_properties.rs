use std::collections::HashSet;

use omerta_game::odds_evens::{self, DiceRoll};
use omerta_game::{
    Card, CardRank, DECK_SIZE, Deck, Guess, GuessResult, HigherLowerRound, Parity, Player,
    PlayerStart, Suit, payout_for_streak, resolve_guess, seeded,
};

fn card(suit: Suit, value: u8) -> Card {
    Card::new(suit, CardRank::new(value).unwrap())
}

#[test]
fn every_shuffle_is_a_permutation_of_the_standard_deck() {
    let standard: HashSet<Card> = Deck::standard().cards().iter().copied().collect();
    for seed in 0..256 {
        let deck = Deck::shuffled(&mut seeded(seed));
        let cards = deck.cards();
        assert_eq!(cards.len(), DECK_SIZE);
        let unique: HashSet<Card> = cards.iter().copied().collect();
        assert_eq!(unique.len(), DECK_SIZE, "duplicate card for seed {seed}");
        assert_eq!(unique, standard);
    }
}

#[test]
fn higher_lower_comparisons_cover_every_rank_pair() {
    for current in 2..=14 {
        for drawn in 2..=14 {
            let c = card(Suit::Clubs, current);
            let d = card(Suit::Spades, drawn);
            let higher = resolve_guess(c, d, Guess::Higher);
            let lower = resolve_guess(c, d, Guess::Lower);
            if drawn == current {
                assert_eq!(higher, GuessResult::Push);
                assert_eq!(lower, GuessResult::Push);
            } else {
                assert_eq!(higher.is_win(), drawn > current);
                assert_eq!(lower.is_win(), drawn < current);
            }
        }
    }
}

#[test]
fn payout_doubles_per_win() {
    for bet in [1_u64, 25, 100, 9_999] {
        for n in 0..20 {
            assert_eq!(payout_for_streak(bet, n), bet * (1 << n));
        }
    }
    assert_eq!(payout_for_streak(100, 3), 800);
}

#[test]
fn streak_payout_matches_round_state_across_seeds() {
    for seed in 0..64 {
        let mut round = HigherLowerRound::start(100, 100, &mut seeded(seed)).unwrap();
        while round.can_guess() {
            let guess = if round.current().value() < 8 {
                Guess::Higher
            } else {
                Guess::Lower
            };
            let outcome = round.guess(guess).unwrap();
            if outcome.result.is_win() {
                assert_eq!(outcome.payout, payout_for_streak(100, outcome.streak));
            } else {
                assert_eq!(outcome.payout, 0);
            }
        }
    }
}

#[test]
fn odds_evens_rule_for_all_rolls() {
    for first in 1..=6 {
        for second in 1..=6 {
            let roll = DiceRoll { first, second };
            for choice in [Parity::Odd, Parity::Even] {
                let expected = ((first + second) % 2 == 0) == (choice == Parity::Even);
                assert_eq!(odds_evens::resolve(roll, choice), expected);
            }
        }
    }
}

#[test]
fn odds_evens_win_rate_is_near_half() {
    let mut rng = seeded(0x0DD5);
    let start = PlayerStart {
        cash: 1_000_000,
        ..PlayerStart::default()
    };
    let mut player = Player::new("Sim", &start);
    let trials: u32 = 10_000;
    let wins = (0..trials)
        .filter(|_| {
            odds_evens::play(&mut player, 1, Parity::Even, &mut rng)
                .unwrap()
                .won
        })
        .count();
    let rate = f64::from(u32::try_from(wins).unwrap()) / f64::from(trials);
    assert!((0.47..=0.53).contains(&rate), "win rate {rate}");
}
