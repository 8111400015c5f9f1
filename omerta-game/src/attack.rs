//! Shootouts against other players in the same city.
//!
//! The roll happens up front; the result carries a timed sequence of
//! animation steps that the UI reveals one countdown at a time.

use crate::error::{GameError, GameResult};
use crate::numbers::clamp_percent;
use crate::player::{MockUser, Player, Rank};
use crate::rng::roll_percent;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const ATTACK_ACTIVITY: &str = "attack";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackRules {
    pub bullets_per_attack: u32,
    pub cooldown_secs: u64,
    pub base_chance: u8,
    /// Percentage points gained per rank above the target.
    pub rank_step: u8,
    pub min_chance: u8,
    pub max_chance: u8,
    pub experience: u64,
    /// Delay between animation steps.
    pub step_ms: u64,
}

impl Default for AttackRules {
    fn default() -> Self {
        Self {
            bullets_per_attack: 5,
            cooldown_secs: 300,
            base_chance: 50,
            rank_step: 10,
            min_chance: 5,
            max_chance: 95,
            experience: 40,
            step_ms: 800,
        }
    }
}

/// Animation steps, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AttackPhase {
    Aim,
    Fire,
    Outcome,
}

impl AttackPhase {
    pub const SEQUENCE: [Self; 3] = [Self::Aim, Self::Fire, Self::Outcome];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Aim => "Taking aim…",
            Self::Fire => "Shots fired!",
            Self::Outcome => "The smoke clears",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackStep {
    pub phase: AttackPhase,
    pub at_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackReport {
    pub target_id: String,
    pub chance: u8,
    pub roll: u8,
    pub success: bool,
    pub steps: Vec<AttackStep>,
}

impl AttackReport {
    /// Latest step already reached at `now_ms`.
    #[must_use]
    pub fn phase_at(&self, now_ms: u64) -> Option<AttackPhase> {
        self.steps
            .iter()
            .rev()
            .find(|step| now_ms >= step.at_ms)
            .map(|step| step.phase)
    }
}

/// Success chance for an attacker of `attacker` rank against `target`.
#[must_use]
pub fn attack_chance(attacker: Rank, target: Rank, rules: &AttackRules) -> u8 {
    let diff = attacker.tier() - target.tier();
    let chance = i64::from(rules.base_chance) + diff * i64::from(rules.rank_step);
    clamp_percent(chance, rules.min_chance, rules.max_chance)
}

/// Attack `target`.
///
/// # Errors
///
/// Rejects jailed or airborne attackers, attacks on cooldown, targets in
/// another city or already down, and attackers short on bullets.
pub fn attack<R: Rng + ?Sized>(
    player: &mut Player,
    target: &mut MockUser,
    rules: &AttackRules,
    now_ms: u64,
    rng: &mut R,
) -> GameResult<AttackReport> {
    player.ensure_free(now_ms)?;
    player.ensure_off_cooldown(ATTACK_ACTIVITY, now_ms)?;
    if target.city != player.location {
        return Err(GameError::TargetElsewhere(target.name.clone()));
    }
    if target.health == 0 {
        return Err(GameError::TargetDown(target.name.clone()));
    }
    if player.bullets < rules.bullets_per_attack {
        return Err(GameError::NotEnoughBullets {
            have: player.bullets,
            need: rules.bullets_per_attack,
        });
    }

    player.bullets -= rules.bullets_per_attack;
    let chance = attack_chance(player.rank(), target.rank, rules);
    let roll = roll_percent(rng);
    let success = roll < chance;
    if success {
        target.health = 0;
        player.experience = player.experience.saturating_add(rules.experience);
    }
    player.start_cooldown(ATTACK_ACTIVITY, now_ms, rules.cooldown_secs);

    let steps = AttackPhase::SEQUENCE
        .iter()
        .zip(1_u64..)
        .map(|(&phase, n)| AttackStep {
            phase,
            at_ms: now_ms.saturating_add(rules.step_ms.saturating_mul(n)),
        })
        .collect();
    log::debug!(
        "attack: {} on {} chance {chance} roll {roll} success {success}",
        player.name,
        target.name
    );
    Ok(AttackReport {
        target_id: target.id.clone(),
        chance,
        roll,
        success,
        steps,
    })
}
