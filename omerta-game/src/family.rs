//! Crime families: creation, membership and the shared family bank.
use crate::error::{GameError, GameResult};
use crate::player::Player;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyRules {
    pub create_cost: u64,
    pub max_name_len: usize,
}

impl Default for FamilyRules {
    fn default() -> Self {
        Self {
            create_cost: 50_000,
            max_name_len: 24,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Family {
    pub name: String,
    pub boss: String,
    pub members: Vec<String>,
    pub bank: u64,
    pub founded_at: u64,
}

/// Families keyed by lower-cased name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyRegistry {
    families: BTreeMap<String, Family>,
}

fn key(name: &str) -> String {
    name.trim().to_lowercase()
}

impl FamilyRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a family that exists without the player, e.g. from the roster.
    pub fn insert(&mut self, family: Family) {
        self.families.insert(key(&family.name), family);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Family> {
        self.families.get(&key(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Family> {
        self.families.values()
    }

    /// Found a family with the player as boss, paying the creation fee.
    ///
    /// # Errors
    ///
    /// Rejects players already in a family, blank, over-long or taken names,
    /// and players who cannot pay the fee.
    pub fn create(
        &mut self,
        player: &mut Player,
        name: &str,
        now_ms: u64,
        rules: &FamilyRules,
    ) -> GameResult<&Family> {
        if let Some(current) = &player.family_name {
            return Err(GameError::AlreadyInFamily(current.clone()));
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(GameError::EmptyField { field: "family name" });
        }
        if name.chars().count() > rules.max_name_len {
            return Err(GameError::TooLong {
                field: "family name",
                max: rules.max_name_len,
            });
        }
        let k = key(name);
        if self.families.contains_key(&k) {
            return Err(GameError::FamilyExists(name.to_string()));
        }
        if rules.create_cost > 0 {
            player.debit(rules.create_cost)?;
        }
        player.family_name = Some(name.to_string());
        log::debug!("family: {} founded {name}", player.name);
        Ok(self.families.entry(k).or_insert(Family {
            name: name.to_string(),
            boss: player.name.clone(),
            members: vec![player.name.clone()],
            bank: 0,
            founded_at: now_ms,
        }))
    }

    /// # Errors
    ///
    /// Rejects players already in a family and unknown family names.
    pub fn join(&mut self, player: &mut Player, name: &str) -> GameResult<()> {
        if let Some(current) = &player.family_name {
            return Err(GameError::AlreadyInFamily(current.clone()));
        }
        let family = self
            .families
            .get_mut(&key(name))
            .ok_or_else(|| GameError::UnknownFamily(name.to_string()))?;
        family.members.push(player.name.clone());
        player.family_name = Some(family.name.clone());
        Ok(())
    }

    /// Leave the current family. A boss leaving alone disbands it.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotInFamily`], or [`GameError::BossCannotLeave`]
    /// while other members remain.
    pub fn leave(&mut self, player: &mut Player) -> GameResult<()> {
        let name = player.family_name.clone().ok_or(GameError::NotInFamily)?;
        let k = key(&name);
        let Some(family) = self.families.get_mut(&k) else {
            // Dangling reference; nothing to update on the registry side.
            player.family_name = None;
            return Ok(());
        };
        if family.boss == player.name {
            if family.members.len() > 1 {
                return Err(GameError::BossCannotLeave);
            }
            self.families.remove(&k);
        } else {
            family.members.retain(|m| m != &player.name);
        }
        player.family_name = None;
        Ok(())
    }

    /// Move cash from the player into their family's bank.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotInFamily`], [`GameError::UnknownFamily`] or the
    /// errors of [`Player::debit`].
    pub fn deposit(&mut self, player: &mut Player, amount: u64) -> GameResult<u64> {
        let name = player.family_name.as_deref().ok_or(GameError::NotInFamily)?;
        let family = self
            .families
            .get_mut(&key(name))
            .ok_or_else(|| GameError::UnknownFamily(name.to_string()))?;
        player.debit(amount)?;
        family.bank = family.bank.saturating_add(amount);
        Ok(family.bank)
    }
}
