//! Street crimes: a success chance rolled against a percentile draw.
use crate::error::{GameError, GameResult};
use crate::player::Player;
use crate::rng::roll_percent;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One entry in the crime catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrimeDef {
    pub id: String,
    pub name: String,
    /// Chance of success, `0..=100`.
    pub success_pct: u8,
    pub payout_min: u64,
    pub payout_max: u64,
    pub experience: u64,
    pub cooldown_secs: u64,
    pub jail_secs: u64,
}

impl CrimeDef {
    /// Cooldown key stored on the player.
    #[must_use]
    pub fn activity(&self) -> String {
        format!("crime:{}", self.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrimeOutcome {
    Success { payout: u64, experience: u64 },
    Caught { release_at: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrimeReport {
    pub crime_id: String,
    pub roll: u8,
    pub outcome: CrimeOutcome,
}

#[must_use]
pub fn find_crime<'a>(crimes: &'a [CrimeDef], id: &str) -> Option<&'a CrimeDef> {
    crimes.iter().find(|crime| crime.id == id)
}

/// Attempt a crime.
///
/// Success requires the draw to land below `success_pct`. A success pays a
/// uniform amount within the payout range and grants experience; a failure
/// sends the player to prison. Either way the crime goes on cooldown.
///
/// # Errors
///
/// Rejects attempts while jailed, travelling, or while this crime cools down.
pub fn commit_crime<R: Rng + ?Sized>(
    player: &mut Player,
    crime: &CrimeDef,
    now_ms: u64,
    rng: &mut R,
) -> GameResult<CrimeReport> {
    player.ensure_free(now_ms)?;
    let activity = crime.activity();
    player.ensure_off_cooldown(&activity, now_ms)?;

    let roll = roll_percent(rng);
    let outcome = if roll < crime.success_pct {
        let low = crime.payout_min.min(crime.payout_max);
        let high = crime.payout_max.max(crime.payout_min);
        let payout = rng.gen_range(low..=high);
        player.credit(payout);
        player.experience = player.experience.saturating_add(crime.experience);
        CrimeOutcome::Success {
            payout,
            experience: crime.experience,
        }
    } else {
        let release_at = now_ms.saturating_add(crime.jail_secs.saturating_mul(1_000));
        player.prison_until = Some(release_at);
        CrimeOutcome::Caught { release_at }
    };
    player.start_cooldown(&activity, now_ms, crime.cooldown_secs);
    log::debug!("crime {}: rolled {roll} -> {outcome:?}", crime.id);
    Ok(CrimeReport {
        crime_id: crime.id.clone(),
        roll,
        outcome,
    })
}

/// Look the crime up by id and attempt it.
///
/// # Errors
///
/// Returns [`GameError::UnknownCrime`] for an id not in the catalog, otherwise
/// the errors of [`commit_crime`].
pub fn commit_crime_by_id<R: Rng + ?Sized>(
    player: &mut Player,
    crimes: &[CrimeDef],
    id: &str,
    now_ms: u64,
    rng: &mut R,
) -> GameResult<CrimeReport> {
    let crime = find_crime(crimes, id).ok_or_else(|| GameError::UnknownCrime(id.to_string()))?;
    commit_crime(player, crime, now_ms, rng)
}
