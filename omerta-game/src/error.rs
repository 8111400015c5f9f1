//! Error taxonomy shared by every game operation.
use thiserror::Error;

/// Reasons a player action is rejected.
///
/// Every variant is a validation failure on local state; nothing here is
/// transient, so callers surface the `Display` text and leave state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("amount must be greater than zero")]
    ZeroAmount,
    #[error("insufficient funds: requested ${requested}, available ${available}")]
    InsufficientFunds { available: u64, requested: u64 },
    #[error("you are in prison until {release_at}")]
    Jailed { release_at: u64 },
    #[error("you are travelling until {arrival_at}")]
    Travelling { arrival_at: u64 },
    #[error("{activity} is on cooldown for another {remaining_ms}ms")]
    OnCooldown { activity: String, remaining_ms: u64 },
    #[error("unknown city: {0}")]
    UnknownCity(String),
    #[error("unknown crime: {0}")]
    UnknownCrime(String),
    #[error("unknown player: {0}")]
    UnknownUser(String),
    #[error("unknown family: {0}")]
    UnknownFamily(String),
    #[error("unknown stock: {0}")]
    UnknownStock(String),
    #[error("unknown message: {0}")]
    UnknownMessage(u64),
    #[error("already in {0}")]
    SameCity(String),
    #[error("the round is over")]
    RoundOver,
    #[error("finish the current round first")]
    RoundInProgress,
    #[error("no round in play")]
    NoRound,
    #[error("win at least one guess before cashing out")]
    NothingToCashOut,
    #[error("the deck is empty; cash out to collect")]
    DeckExhausted,
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
    #[error("{field} exceeds {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("already a member of {0}")]
    AlreadyInFamily(String),
    #[error("not in a family")]
    NotInFamily,
    #[error("family {0} already exists")]
    FamilyExists(String),
    #[error("the boss cannot leave while members remain")]
    BossCannotLeave,
    #[error("not enough bullets: need {need}, have {have}")]
    NotEnoughBullets { have: u32, need: u32 },
    #[error("{0} is not in your city")]
    TargetElsewhere(String),
    #[error("{0} is already down")]
    TargetDown(String),
    #[error("not enough shares: requested {requested}, held {held}")]
    InsufficientShares { held: u64, requested: u64 },
}

/// Result alias used by the game operations.
pub type GameResult<T> = Result<T, GameError>;
