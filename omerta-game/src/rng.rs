//! Seeded randomness shared by the resolvers.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Deterministic generator used across the game.
pub type GameRng = ChaCha20Rng;

/// Build a generator from a 64-bit seed.
#[must_use]
pub fn seeded(seed: u64) -> GameRng {
    ChaCha20Rng::seed_from_u64(seed)
}

/// Uniform six-sided die roll in `1..=6`.
pub fn roll_die<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    rng.gen_range(1..=6)
}

/// Uniform percentile draw in `0..100`.
pub fn roll_percent<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    rng.gen_range(0..100)
}
