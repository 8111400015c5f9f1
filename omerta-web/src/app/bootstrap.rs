//! First-render setup: load config and the saved slot, or start fresh.
use crate::game::{
    DataLoader, GameConfig, GameSnapshot, Player, SAVE_SLOT, WebDataLoader, World,
    create_web_game_engine,
};
use std::rc::Rc;

/// Name given to a character created before the player picks one.
pub const DEFAULT_NAME: &str = "Newcomer";

pub struct Booted {
    pub snapshot: GameSnapshot,
    pub config: Rc<GameConfig>,
    /// No save was found; the UI should offer to name the new character.
    pub fresh: bool,
}

#[must_use]
pub fn fresh_snapshot(name: &str, config: &GameConfig) -> GameSnapshot {
    GameSnapshot::new(
        Player::new(name, &config.player),
        World::from_config(config),
    )
}

#[must_use]
pub fn boot(now_ms: u64) -> Booted {
    let config = WebDataLoader.load_config().unwrap_or_else(|err| {
        log::warn!("bundled game data rejected, using defaults: {err}");
        GameConfig::default_config()
    });
    let saved = create_web_game_engine()
        .load_game(SAVE_SLOT, now_ms)
        .unwrap_or_else(|err| {
            log::warn!("could not load save slot {SAVE_SLOT}: {err}");
            None
        });
    let fresh = saved.is_none();
    let snapshot = saved.unwrap_or_else(|| fresh_snapshot(DEFAULT_NAME, &config));
    Booted {
        snapshot,
        config: Rc::new(config),
        fresh,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_snapshot_uses_config_start() {
        let config = GameConfig::default_config();
        let snapshot = fresh_snapshot("Kay", &config);
        assert_eq!(snapshot.player.name, "Kay");
        assert_eq!(snapshot.player.cash, config.player.cash);
        assert_eq!(snapshot.player.location, config.player.city);
        assert_eq!(snapshot.world.roster.len(), config.roster.len());
    }
}
