//! Player state bag and the roster of other players.
use crate::countdown::{Countdown, CountdownKind};
use crate::error::{GameError, GameResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Rank ladder, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum Rank {
    #[default]
    Thug,
    Associate,
    Soldier,
    Capo,
    Underboss,
    Boss,
    Godfather,
}

impl Rank {
    pub const ALL: [Self; 7] = [
        Self::Thug,
        Self::Associate,
        Self::Soldier,
        Self::Capo,
        Self::Underboss,
        Self::Boss,
        Self::Godfather,
    ];

    /// Experience needed to reach this rank.
    #[must_use]
    pub const fn threshold(self) -> u64 {
        match self {
            Self::Thug => 0,
            Self::Associate => 100,
            Self::Soldier => 400,
            Self::Capo => 1_200,
            Self::Underboss => 3_000,
            Self::Boss => 7_500,
            Self::Godfather => 20_000,
        }
    }

    #[must_use]
    pub fn for_experience(experience: u64) -> Self {
        Self::ALL
            .iter()
            .rev()
            .copied()
            .find(|rank| experience >= rank.threshold())
            .unwrap_or_default()
    }

    /// Position on the ladder, `0` for the lowest rank.
    #[must_use]
    pub const fn tier(self) -> i64 {
        self as i64
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Thug => "Thug",
            Self::Associate => "Associate",
            Self::Soldier => "Soldier",
            Self::Capo => "Capo",
            Self::Underboss => "Underboss",
            Self::Boss => "Boss",
            Self::Godfather => "Godfather",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Flight in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journey {
    pub from: String,
    pub to: String,
    pub depart_at: u64,
    pub arrive_at: u64,
}

/// Starting values for a new player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStart {
    pub cash: u64,
    #[serde(default)]
    pub bank: u64,
    pub bullets: u32,
    pub city: String,
}

impl Default for PlayerStart {
    fn default() -> Self {
        Self {
            cash: 1_000,
            bank: 0,
            bullets: 20,
            city: String::from("palermo"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub cash: u64,
    pub bank: u64,
    pub health: u8,
    pub experience: u64,
    pub bullets: u32,
    pub location: String,
    #[serde(default)]
    pub family_name: Option<String>,
    #[serde(default)]
    pub prison_until: Option<u64>,
    #[serde(default)]
    pub journey: Option<Journey>,
    /// Activity id to the timestamp it becomes available again.
    #[serde(default)]
    pub cooldowns: BTreeMap<String, u64>,
    /// Stock symbol to shares held.
    #[serde(default)]
    pub holdings: BTreeMap<String, u64>,
}

/// What [`Player::settle`] changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettleReport {
    pub arrived: Option<String>,
    pub released: bool,
}

impl Player {
    #[must_use]
    pub fn new(name: impl Into<String>, start: &PlayerStart) -> Self {
        Self {
            name: name.into(),
            cash: start.cash,
            bank: start.bank,
            health: 100,
            experience: 0,
            bullets: start.bullets,
            location: start.city.clone(),
            family_name: None,
            prison_until: None,
            journey: None,
            cooldowns: BTreeMap::new(),
            holdings: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn rank(&self) -> Rank {
        Rank::for_experience(self.experience)
    }

    #[must_use]
    pub fn is_jailed(&self, now_ms: u64) -> bool {
        self.prison_until.is_some_and(|until| now_ms < until)
    }

    #[must_use]
    pub fn is_travelling(&self, now_ms: u64) -> bool {
        self.journey
            .as_ref()
            .is_some_and(|journey| now_ms < journey.arrive_at)
    }

    /// Milliseconds until `activity` is available, `None` when it already is.
    #[must_use]
    pub fn cooldown_remaining(&self, activity: &str, now_ms: u64) -> Option<u64> {
        self.cooldowns
            .get(activity)
            .filter(|&&until| now_ms < until)
            .map(|until| until - now_ms)
    }

    pub fn start_cooldown(&mut self, activity: &str, now_ms: u64, secs: u64) {
        let until = now_ms.saturating_add(secs.saturating_mul(1_000));
        self.cooldowns.insert(activity.to_string(), until);
    }

    /// Reject actions while jailed or in the air.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Jailed`] or [`GameError::Travelling`].
    pub fn ensure_free(&self, now_ms: u64) -> GameResult<()> {
        if let Some(release_at) = self.prison_until.filter(|&until| now_ms < until) {
            return Err(GameError::Jailed { release_at });
        }
        if let Some(journey) = self.journey.as_ref().filter(|j| now_ms < j.arrive_at) {
            return Err(GameError::Travelling {
                arrival_at: journey.arrive_at,
            });
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`GameError::OnCooldown`] while the activity's cooldown runs.
    pub fn ensure_off_cooldown(&self, activity: &str, now_ms: u64) -> GameResult<()> {
        match self.cooldown_remaining(activity, now_ms) {
            Some(remaining_ms) => Err(GameError::OnCooldown {
                activity: activity.to_string(),
                remaining_ms,
            }),
            None => Ok(()),
        }
    }

    /// Take `amount` out of cash. Spending exactly the balance is allowed.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::ZeroAmount`] or [`GameError::InsufficientFunds`].
    pub fn debit(&mut self, amount: u64) -> GameResult<()> {
        if amount == 0 {
            return Err(GameError::ZeroAmount);
        }
        self.cash = self
            .cash
            .checked_sub(amount)
            .ok_or(GameError::InsufficientFunds {
                available: self.cash,
                requested: amount,
            })?;
        Ok(())
    }

    pub fn credit(&mut self, amount: u64) {
        self.cash = self.cash.saturating_add(amount);
    }

    /// Finish an arrived flight and clear an expired sentence.
    pub fn settle(&mut self, now_ms: u64) -> SettleReport {
        let mut report = SettleReport::default();
        if self
            .journey
            .as_ref()
            .is_some_and(|journey| now_ms >= journey.arrive_at)
            && let Some(journey) = self.journey.take()
        {
            self.location.clone_from(&journey.to);
            report.arrived = Some(journey.to);
        }
        if self.prison_until.is_some_and(|until| now_ms >= until) {
            self.prison_until = None;
            report.released = true;
        }
        self.cooldowns.retain(|_, until| now_ms < *until);
        report
    }

    /// Every timer still running for this player, labelled for display.
    #[must_use]
    pub fn countdowns(&self, now_ms: u64) -> Vec<(String, Countdown)> {
        let mut timers = Vec::new();
        if let Some(until) = self.prison_until.filter(|&until| now_ms < until) {
            timers.push((
                String::from("Prison"),
                Countdown::new(until, CountdownKind::Prison),
            ));
        }
        if let Some(journey) = self.journey.as_ref().filter(|j| now_ms < j.arrive_at) {
            timers.push((
                format!("Flight to {}", journey.to),
                Countdown::new(journey.arrive_at, CountdownKind::Travel),
            ));
        }
        timers.extend(
            self.cooldowns
                .iter()
                .filter(|&(_, &until)| now_ms < until)
                .map(|(activity, &until)| {
                    (
                        activity.clone(),
                        Countdown::new(until, CountdownKind::Cooldown),
                    )
                }),
        );
        timers
    }
}

/// Another player in the mock roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockUser {
    pub id: String,
    pub name: String,
    pub rank: Rank,
    #[serde(default)]
    pub family: Option<String>,
    #[serde(default)]
    pub online: bool,
    pub city: String,
    #[serde(default = "full_health")]
    pub health: u8,
}

const fn full_health() -> u8 {
    100
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::new("Vito", &PlayerStart::default())
    }

    #[test]
    fn rank_follows_experience() {
        assert_eq!(Rank::for_experience(0), Rank::Thug);
        assert_eq!(Rank::for_experience(399), Rank::Associate);
        assert_eq!(Rank::for_experience(400), Rank::Soldier);
        assert_eq!(Rank::for_experience(u64::MAX), Rank::Godfather);
        assert!(Rank::Capo.tier() > Rank::Soldier.tier());
    }

    #[test]
    fn debit_allows_exact_balance() {
        let mut p = player();
        p.debit(1_000).unwrap();
        assert_eq!(p.cash, 0);
        assert_eq!(
            p.debit(1),
            Err(GameError::InsufficientFunds {
                available: 0,
                requested: 1
            })
        );
        assert_eq!(p.debit(0), Err(GameError::ZeroAmount));
    }

    #[test]
    fn cooldowns_expire() {
        let mut p = player();
        p.start_cooldown("crime:pickpocket", 1_000, 30);
        assert_eq!(p.cooldown_remaining("crime:pickpocket", 1_000), Some(30_000));
        assert!(p.ensure_off_cooldown("crime:pickpocket", 30_999).is_err());
        assert!(p.ensure_off_cooldown("crime:pickpocket", 31_000).is_ok());
    }

    #[test]
    fn settle_lands_flight_and_releases_prisoner() {
        let mut p = player();
        p.prison_until = Some(5_000);
        p.journey = Some(Journey {
            from: "palermo".into(),
            to: "chicago".into(),
            depart_at: 0,
            arrive_at: 4_000,
        });
        assert!(matches!(p.ensure_free(100), Err(GameError::Jailed { .. })));
        assert_eq!(p.settle(3_000), SettleReport::default());
        let report = p.settle(5_000);
        assert_eq!(report.arrived.as_deref(), Some("chicago"));
        assert!(report.released);
        assert_eq!(p.location, "chicago");
        assert!(p.ensure_free(5_000).is_ok());
    }

    #[test]
    fn countdowns_list_running_timers() {
        let mut p = player();
        p.prison_until = Some(10_000);
        p.start_cooldown("attack", 0, 60);
        let timers = p.countdowns(1_000);
        assert_eq!(timers.len(), 2);
        assert_eq!(timers[0].1.kind, CountdownKind::Prison);
        assert!(p.countdowns(60_000).is_empty());
    }
}
