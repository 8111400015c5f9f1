//! Game tunables loaded from the bundled JSON data.
use crate::attack::AttackRules;
use crate::chat::ChatRules;
use crate::crime::CrimeDef;
use crate::family::FamilyRules;
use crate::mail::MailRules;
use crate::player::{MockUser, PlayerStart};
use crate::stocks::StockDef;
use crate::travel::CityDef;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

const DEFAULT_GAME_DATA: &str = include_str!("../../omerta-web/static/assets/data/game.json");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config JSON is invalid: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config has no {0}")]
    Empty(&'static str),
    #[error("duplicate {what} id: {id}")]
    DuplicateId { what: &'static str, id: String },
    #[error("starting city {0} is not in the city list")]
    UnknownStartCity(String),
    #[error("crime {id}: success_pct {value} is above 100")]
    BadPercent { id: String, value: u8 },
    #[error("crime {id}: payout_min exceeds payout_max")]
    BadPayoutRange { id: String },
    #[error("attack chance bounds are inverted: {min} > {max}")]
    BadChanceBounds { min: u8, max: u8 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub player: PlayerStart,
    pub crimes: Vec<CrimeDef>,
    pub cities: Vec<CityDef>,
    #[serde(default)]
    pub stocks: Vec<StockDef>,
    #[serde(default)]
    pub family: FamilyRules,
    #[serde(default)]
    pub mail: MailRules,
    #[serde(default)]
    pub chat: ChatRules,
    #[serde(default)]
    pub attack: AttackRules,
    #[serde(default)]
    pub roster: Vec<MockUser>,
}

fn ensure_unique<'a>(
    what: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ConfigError::DuplicateId {
                what,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

impl GameConfig {
    /// Parse and validate a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the JSON is malformed or fails validation.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Bundled configuration, or the built-in minimum if it fails to load.
    #[must_use]
    pub fn default_config() -> Self {
        Self::from_json(DEFAULT_GAME_DATA).unwrap_or_else(|err| {
            log::warn!("falling back to built-in config: {err}");
            Self::fallback()
        })
    }

    fn fallback() -> Self {
        let start = PlayerStart::default();
        Self {
            crimes: vec![CrimeDef {
                id: String::from("pickpocket"),
                name: String::from("Pickpocket a tourist"),
                success_pct: 80,
                payout_min: 20,
                payout_max: 80,
                experience: 5,
                cooldown_secs: 30,
                jail_secs: 60,
            }],
            cities: vec![CityDef {
                id: start.city.clone(),
                name: String::from("Palermo"),
                ticket_price: 400,
                flight_secs: 300,
            }],
            player: start,
            stocks: Vec::new(),
            family: FamilyRules::default(),
            mail: MailRules::default(),
            chat: ChatRules::default(),
            attack: AttackRules::default(),
            roster: Vec::new(),
        }
    }

    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cities.is_empty() {
            return Err(ConfigError::Empty("cities"));
        }
        if self.crimes.is_empty() {
            return Err(ConfigError::Empty("crimes"));
        }
        ensure_unique("city", self.cities.iter().map(|c| c.id.as_str()))?;
        ensure_unique("crime", self.crimes.iter().map(|c| c.id.as_str()))?;
        ensure_unique("stock", self.stocks.iter().map(|s| s.symbol.as_str()))?;
        ensure_unique("user", self.roster.iter().map(|u| u.id.as_str()))?;
        if !self.cities.iter().any(|c| c.id == self.player.city) {
            return Err(ConfigError::UnknownStartCity(self.player.city.clone()));
        }
        for crime in &self.crimes {
            if crime.success_pct > 100 {
                return Err(ConfigError::BadPercent {
                    id: crime.id.clone(),
                    value: crime.success_pct,
                });
            }
            if crime.payout_min > crime.payout_max {
                return Err(ConfigError::BadPayoutRange {
                    id: crime.id.clone(),
                });
            }
        }
        if self.attack.min_chance > self.attack.max_chance {
            return Err(ConfigError::BadChanceBounds {
                min: self.attack.min_chance,
                max: self.attack.max_chance,
            });
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::default_config()
    }
}
