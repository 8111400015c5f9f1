//! Remaining-time formatting shared by every timer in the game.
//!
//! Cooldowns, flights, prison sentences and attack animations all store an
//! end timestamp and render the time left at one-second resolution.

use serde::{Deserialize, Serialize};

/// Refresh cadence for live countdown displays.
pub const TICK_MS: u32 = 1_000;

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 3_600;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CountdownKind {
    Cooldown,
    Travel,
    Prison,
    Attack,
}

impl CountdownKind {
    /// Text shown once the timer has run out.
    #[must_use]
    pub const fn terminal_label(self) -> &'static str {
        match self {
            Self::Cooldown => "Ready",
            Self::Travel => "Arrived",
            Self::Prison => "Released",
            Self::Attack => "Done",
        }
    }
}

/// Whole seconds left, rounded up so a running timer never reads `0s`.
#[must_use]
pub const fn remaining_secs(remaining_ms: u64) -> u64 {
    remaining_ms.div_ceil(1_000)
}

/// Format a number of seconds by magnitude: `1h 5m`, `2m 5s` or `42s`.
#[must_use]
pub fn format_secs(secs: u64) -> String {
    if secs >= SECS_PER_HOUR {
        let hours = secs / SECS_PER_HOUR;
        let minutes = (secs % SECS_PER_HOUR) / SECS_PER_MINUTE;
        format!("{hours}h {minutes}m")
    } else if secs >= SECS_PER_MINUTE {
        format!("{}m {}s", secs / SECS_PER_MINUTE, secs % SECS_PER_MINUTE)
    } else {
        format!("{secs}s")
    }
}

#[must_use]
pub fn format_remaining(remaining_ms: u64) -> String {
    format_secs(remaining_secs(remaining_ms))
}

/// One observation of a countdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountdownTick {
    Running { remaining_ms: u64, label: String },
    Expired { label: &'static str },
}

impl CountdownTick {
    #[must_use]
    pub const fn is_expired(&self) -> bool {
        matches!(self, Self::Expired { .. })
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Running { label, .. } => label,
            Self::Expired { label } => label,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    pub end_ms: u64,
    pub kind: CountdownKind,
}

impl Countdown {
    #[must_use]
    pub const fn new(end_ms: u64, kind: CountdownKind) -> Self {
        Self { end_ms, kind }
    }

    /// Build a countdown that ends `duration_ms` after `now_ms`.
    #[must_use]
    pub const fn starting_at(now_ms: u64, duration_ms: u64, kind: CountdownKind) -> Self {
        Self::new(now_ms.saturating_add(duration_ms), kind)
    }

    #[must_use]
    pub const fn is_expired(&self, now_ms: u64) -> bool {
        now_ms >= self.end_ms
    }

    #[must_use]
    pub fn tick(&self, now_ms: u64) -> CountdownTick {
        if self.is_expired(now_ms) {
            return CountdownTick::Expired {
                label: self.kind.terminal_label(),
            };
        }
        let remaining_ms = self.end_ms - now_ms;
        CountdownTick::Running {
            remaining_ms,
            label: format_remaining(remaining_ms),
        }
    }
}
