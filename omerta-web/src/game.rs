//! Web-specific game engine implementation
//!
//! This module provides the browser implementations of the omerta-game
//! traits and re-exports the core game logic types.

use gloo::storage::errors::StorageError;
use gloo::storage::{LocalStorage, Storage};
use std::cell::RefCell;
use std::rc::Rc;

// Re-export all types from omerta-game
pub use omerta_game::*;

/// Save slot the app reads on boot and writes after every change.
pub const SAVE_SLOT: &str = "main";

/// Random source shared by every panel for the lifetime of the page.
pub type SharedRng = Rc<RefCell<GameRng>>;

#[must_use]
pub fn shared_rng(seed: u64) -> SharedRng {
    Rc::new(RefCell::new(seeded(seed)))
}

/// Loads the game data bundled into the wasm binary
pub struct WebDataLoader;

#[derive(Debug, thiserror::Error)]
pub enum WebDataError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl DataLoader for WebDataLoader {
    type Error = WebDataError;

    fn load_config(&self) -> Result<GameConfig, Self::Error> {
        let json = include_str!("../static/assets/data/game.json");
        Ok(GameConfig::from_json(json)?)
    }
}

/// Web-specific game storage using localStorage
pub struct WebGameStorage;

#[derive(Debug, thiserror::Error)]
pub enum WebStorageError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[must_use]
pub fn save_key(save_name: &str) -> String {
    format!("omerta.save.{save_name}")
}

impl GameStorage for WebGameStorage {
    type Error = WebStorageError;

    fn save_game(&self, save_name: &str, snapshot: &GameSnapshot) -> Result<(), Self::Error> {
        LocalStorage::set(save_key(save_name), snapshot).map_err(|e| match e {
            StorageError::SerdeError(err) => WebStorageError::Serialization(err),
            other => WebStorageError::Storage(format!("{other:?}")),
        })
    }

    fn load_game(&self, save_name: &str) -> Result<Option<GameSnapshot>, Self::Error> {
        match LocalStorage::get(save_key(save_name)) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(StorageError::KeyNotFound(_)) => Ok(None),
            Err(StorageError::SerdeError(err)) => Err(WebStorageError::Serialization(err)),
            Err(other) => Err(WebStorageError::Storage(format!("{other:?}"))),
        }
    }

    fn delete_save(&self, save_name: &str) -> Result<(), Self::Error> {
        LocalStorage::delete(save_key(save_name));
        Ok(())
    }
}

/// Create a web-compatible game engine with `WebDataLoader` and `WebGameStorage`
#[must_use]
pub const fn create_web_game_engine() -> GameEngine<WebDataLoader, WebGameStorage> {
    GameEngine::new(WebDataLoader, WebGameStorage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_data_loads() {
        let config = WebDataLoader.load_config().unwrap();
        assert_eq!(config, GameConfig::default_config());
    }

    #[test]
    fn save_keys_are_namespaced() {
        assert_eq!(save_key(SAVE_SLOT), "omerta.save.main");
    }

    #[test]
    fn shared_rng_is_deterministic() {
        use rand::Rng;
        let a: u64 = shared_rng(9).borrow_mut().r#gen();
        let b: u64 = shared_rng(9).borrow_mut().r#gen();
        assert_eq!(a, b);
    }
}
