//! Moving money between cash in hand and the bank.
use crate::error::{GameError, GameResult};
use crate::player::Player;

/// Clamp a typed amount to what is actually available.
#[must_use]
pub fn clamp_amount(input: u64, available: u64) -> u64 {
    input.min(available)
}

/// Move `amount` from cash into the bank. Depositing all cash is allowed.
///
/// # Errors
///
/// Returns [`GameError::ZeroAmount`] or [`GameError::InsufficientFunds`].
pub fn deposit(player: &mut Player, amount: u64) -> GameResult<()> {
    player.debit(amount)?;
    player.bank = player.bank.saturating_add(amount);
    log::debug!("bank: {} deposited ${amount}", player.name);
    Ok(())
}

/// Move `amount` from the bank into cash.
///
/// # Errors
///
/// Returns [`GameError::ZeroAmount`] or [`GameError::InsufficientFunds`].
pub fn withdraw(player: &mut Player, amount: u64) -> GameResult<()> {
    if amount == 0 {
        return Err(GameError::ZeroAmount);
    }
    player.bank = player
        .bank
        .checked_sub(amount)
        .ok_or(GameError::InsufficientFunds {
            available: player.bank,
            requested: amount,
        })?;
    player.credit(amount);
    log::debug!("bank: {} withdrew ${amount}", player.name);
    Ok(())
}
