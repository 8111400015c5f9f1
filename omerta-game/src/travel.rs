//! Flights between cities.
use crate::error::{GameError, GameResult};
use crate::player::{Journey, Player};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityDef {
    pub id: String,
    pub name: String,
    pub ticket_price: u64,
    pub flight_secs: u64,
}

#[must_use]
pub fn find_city<'a>(cities: &'a [CityDef], id: &str) -> Option<&'a CityDef> {
    cities.iter().find(|city| city.id == id)
}

/// Buy a ticket to `destination` and take off.
///
/// # Errors
///
/// Rejects unknown or current cities, jailed or airborne players, and
/// tickets the player cannot afford.
pub fn depart(
    player: &mut Player,
    cities: &[CityDef],
    destination: &str,
    now_ms: u64,
) -> GameResult<Journey> {
    let city = find_city(cities, destination)
        .ok_or_else(|| GameError::UnknownCity(destination.to_string()))?;
    player.ensure_free(now_ms)?;
    player.settle(now_ms);
    if player.location == city.id {
        return Err(GameError::SameCity(city.name.clone()));
    }
    if city.ticket_price > 0 {
        player.debit(city.ticket_price)?;
    }
    let journey = Journey {
        from: player.location.clone(),
        to: city.id.clone(),
        depart_at: now_ms,
        arrive_at: now_ms.saturating_add(city.flight_secs.saturating_mul(1_000)),
    };
    player.journey = Some(journey.clone());
    log::debug!(
        "travel: {} flying {} -> {} until {}",
        player.name,
        journey.from,
        journey.to,
        journey.arrive_at
    );
    Ok(journey)
}
