//! Omerta Game Engine
//!
//! Platform-agnostic rules for the Omerta mafia idle game: the casino
//! mini-games, crimes, banking, travel and the social systems around them.
//! This crate has no UI or platform-specific dependencies; callers pass the
//! current time in milliseconds and a random generator into every action.

pub mod attack;
pub mod bank;
pub mod cards;
pub mod chat;
pub mod config;
pub mod countdown;
pub mod crime;
pub mod error;
pub mod family;
pub mod hilo;
pub mod mail;
pub mod numbers;
pub mod odds_evens;
pub mod player;
pub mod rng;
pub mod stocks;
pub mod travel;
pub mod world;

// Re-export commonly used types
pub use attack::{AttackPhase, AttackReport, AttackRules, AttackStep, attack, attack_chance};
pub use bank::{clamp_amount, deposit, withdraw};
pub use cards::{Card, DECK_SIZE, Deck, Rank as CardRank, Suit};
pub use chat::{ChatLog, ChatMessage, ChatRules};
pub use config::{ConfigError, GameConfig};
pub use countdown::{Countdown, CountdownKind, CountdownTick, format_remaining};
pub use crime::{CrimeDef, CrimeOutcome, CrimeReport, commit_crime, commit_crime_by_id};
pub use error::{GameError, GameResult};
pub use family::{Family, FamilyRegistry, FamilyRules};
pub use hilo::{
    Guess, GuessOutcome, GuessResult, HigherLowerRound, RoundStatus, cash_out_round,
    payout_for_streak, resolve_guess, start_round,
};
pub use mail::{MailDraft, MailMessage, MailRules, Mailbox};
pub use odds_evens::{DiceRoll, OddsEvensOutcome, Parity};
pub use player::{Journey, MockUser, Player, PlayerStart, Rank, SettleReport};
pub use rng::{GameRng, seeded};
pub use stocks::{Market, StockDef, StockState};
pub use travel::{CityDef, depart};
pub use world::{GameSnapshot, World};

/// Trait for abstracting configuration loading
/// Platform-specific implementations should provide this
pub trait DataLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the game configuration from the platform-specific source
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or parsed.
    fn load_config(&self) -> Result<GameConfig, Self::Error>;
}

/// Trait for abstracting save/load operations
/// Platform-specific implementations should provide this
pub trait GameStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Save a snapshot
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be saved.
    fn save_game(&self, save_name: &str, snapshot: &GameSnapshot) -> Result<(), Self::Error>;

    /// Load a snapshot
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be loaded.
    fn load_game(&self, save_name: &str) -> Result<Option<GameSnapshot>, Self::Error>;

    /// Delete a saved snapshot
    ///
    /// # Errors
    ///
    /// Returns an error if the save cannot be deleted.
    fn delete_save(&self, save_name: &str) -> Result<(), Self::Error>;
}

/// Main game engine for creating and persisting game instances
pub struct GameEngine<L, S>
where
    L: DataLoader,
    S: GameStorage,
{
    data_loader: L,
    storage: S,
}

impl<L, S> GameEngine<L, S>
where
    L: DataLoader,
    S: GameStorage,
{
    /// Create a new game engine with the provided data loader and storage
    pub const fn new(data_loader: L, storage: S) -> Self {
        Self {
            data_loader,
            storage,
        }
    }

    /// Create a fresh player and world from the loaded configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded.
    pub fn create_game(&self, player_name: &str) -> Result<(GameSnapshot, GameConfig), L::Error> {
        let config = self.data_loader.load_config()?;
        let snapshot = GameSnapshot::new(
            Player::new(player_name, &config.player),
            World::from_config(&config),
        );
        Ok((snapshot, config))
    }

    /// Save a snapshot
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be saved.
    pub fn save_game(&self, save_name: &str, snapshot: &GameSnapshot) -> Result<(), S::Error> {
        self.storage.save_game(save_name, snapshot)
    }

    /// Load a snapshot and settle any timers that ran out while it was stored
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be loaded.
    pub fn load_game(
        &self,
        save_name: &str,
        now_ms: u64,
    ) -> Result<Option<GameSnapshot>, anyhow::Error>
    where
        S::Error: Into<anyhow::Error>,
    {
        let loaded = self.storage.load_game(save_name).map_err(Into::into)?;
        Ok(loaded.map(|mut snapshot| {
            snapshot.player.settle(now_ms);
            snapshot
        }))
    }

    /// Delete a saved snapshot
    ///
    /// # Errors
    ///
    /// Returns an error if the save cannot be deleted.
    pub fn delete_game(&self, save_name: &str) -> Result<(), S::Error> {
        self.storage.delete_save(save_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::convert::Infallible;
    use std::rc::Rc;

    #[derive(Clone, Copy, Default)]
    struct FixtureLoader;

    impl DataLoader for FixtureLoader {
        type Error = Infallible;

        fn load_config(&self) -> Result<GameConfig, Self::Error> {
            Ok(GameConfig::default_config())
        }
    }

    #[derive(Clone, Default)]
    struct MemoryStorage {
        saves: Rc<RefCell<HashMap<String, GameSnapshot>>>,
    }

    impl GameStorage for MemoryStorage {
        type Error = Infallible;

        fn save_game(&self, save_name: &str, snapshot: &GameSnapshot) -> Result<(), Self::Error> {
            self.saves
                .borrow_mut()
                .insert(save_name.to_string(), snapshot.clone());
            Ok(())
        }

        fn load_game(&self, save_name: &str) -> Result<Option<GameSnapshot>, Self::Error> {
            Ok(self.saves.borrow().get(save_name).cloned())
        }

        fn delete_save(&self, save_name: &str) -> Result<(), Self::Error> {
            self.saves.borrow_mut().remove(save_name);
            Ok(())
        }
    }

    #[test]
    fn engine_creates_and_roundtrips_snapshot() {
        let engine = GameEngine::new(FixtureLoader, MemoryStorage::default());
        let (mut snapshot, config) = engine.create_game("Vito").unwrap();
        assert_eq!(snapshot.player.cash, config.player.cash);
        snapshot.player.cash = 250;
        snapshot.player.prison_until = Some(5_000);
        engine.save_game("slot-one", &snapshot).unwrap();

        let loaded = engine
            .load_game("slot-one", 6_000)
            .unwrap()
            .expect("save exists");
        assert_eq!(loaded.player.cash, 250);
        assert!(loaded.player.prison_until.is_none(), "sentence served while saved");
        assert!(engine.load_game("missing-slot", 0).unwrap().is_none());

        engine.delete_game("slot-one").unwrap();
        assert!(engine.load_game("slot-one", 0).unwrap().is_none());
    }
}
