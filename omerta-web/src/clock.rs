//! Wall clock for the browser. Game logic takes `now_ms` as an argument;
//! this is the only place the front end reads the time.

/// Milliseconds since the Unix epoch.
#[cfg(target_arch = "wasm32")]
#[must_use]
pub fn now_ms() -> u64 {
    omerta_game::numbers::round_f64_to_u64(js_sys::Date::now())
}

/// Milliseconds since the Unix epoch.
#[cfg(not(target_arch = "wasm32"))]
#[must_use]
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |elapsed| {
            u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_is_past_2023() {
        assert!(now_ms() > 1_672_531_200_000);
    }
}
