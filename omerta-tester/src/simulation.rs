//! Seeded simulations of each game system.
//!
//! Every run replays a fixed policy against the pure game logic and checks
//! the rules the UI relies on, recording a failure string per violation.

use anyhow::{Result, bail};
use omerta_game::crime::find_crime;
use omerta_game::odds_evens::{self, resolve};
use omerta_game::numbers::{u64_to_f64, usize_to_f64};
use omerta_game::stocks::HISTORY_LEN;
use omerta_game::{
    CrimeOutcome, GameConfig, Guess, GuessResult, HigherLowerRound, Market, Parity, Player,
    RoundStatus, commit_crime, payout_for_streak,
};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::time::{Duration, Instant};

/// Stake used by the casino simulations.
const STAKE: u64 = 100;
/// Higher-or-Lower policy: bank the pot after this many wins.
const CASH_OUT_STREAK: u32 = 3;
/// Cap on recorded failures per run so a broken rule doesn't flood the report.
const MAX_FAILURES: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameKind {
    Hilo,
    OddsEvens,
    Crimes,
    Stocks,
}

impl GameKind {
    pub const ALL: [Self; 4] = [Self::Hilo, Self::OddsEvens, Self::Crimes, Self::Stocks];

    pub const fn key(self) -> &'static str {
        match self {
            Self::Hilo => "hilo",
            Self::OddsEvens => "odds-evens",
            Self::Crimes => "crimes",
            Self::Stocks => "stocks",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Hilo => "Higher-or-Lower rounds: push rule, doubling payout, no repeated cards",
            Self::OddsEvens => "Odds-or-Evens: parity rule and even-money settlement",
            Self::Crimes => "Every crime in the catalog: payout ranges, prison and cooldowns",
            Self::Stocks => "Market random walk: price floor and bounded history",
        }
    }

    /// Stream id so each game draws independent numbers from the same seed.
    const fn stream(self) -> u64 {
        match self {
            Self::Hilo => 1,
            Self::OddsEvens => 2,
            Self::Crimes => 3,
            Self::Stocks => 4,
        }
    }

    pub fn parse(token: &str) -> Result<Self> {
        match token {
            "hilo" | "higher-lower" => Ok(Self::Hilo),
            "odds-evens" | "oe" => Ok(Self::OddsEvens),
            "crimes" | "crime" => Ok(Self::Crimes),
            "stocks" | "market" => Ok(Self::Stocks),
            other => bail!("unknown game {other:?}"),
        }
    }
}

/// Expand `--games`, accepting `all`.
pub fn resolve_games(tokens: &[String]) -> Result<Vec<GameKind>> {
    let mut games = Vec::new();
    for token in tokens {
        if token == "all" {
            games.extend(GameKind::ALL);
        } else {
            games.push(GameKind::parse(token)?);
        }
    }
    let mut seen = HashSet::new();
    games.retain(|g| seen.insert(*g));
    Ok(games)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    pub game: GameKind,
    pub seed: u64,
    pub iterations: usize,
    pub passed: bool,
    pub failures: Vec<String>,
    /// Named statistics, e.g. win rate or average payout.
    pub metrics: BTreeMap<String, f64>,
    pub elapsed_us: u64,
}

#[derive(Default)]
struct Recorder {
    failures: Vec<String>,
    metrics: BTreeMap<String, f64>,
}

impl Recorder {
    fn check(&mut self, ok: bool, failure: impl FnOnce() -> String) {
        if !ok && self.failures.len() < MAX_FAILURES {
            self.failures.push(failure());
        }
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics.insert(name.to_string(), value);
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        usize_to_f64(part) / usize_to_f64(whole)
    }
}

pub struct Simulator {
    config: GameConfig,
    verbose: bool,
}

impl Simulator {
    pub const fn new(config: GameConfig, verbose: bool) -> Self {
        Self { config, verbose }
    }

    pub fn run(&self, game: GameKind, seed: u64, iterations: usize) -> RunResult {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        rng.set_stream(game.stream());
        let mut rec = Recorder::default();
        let started = Instant::now();
        match game {
            GameKind::Hilo => simulate_hilo(&mut rng, iterations, &mut rec),
            GameKind::OddsEvens => simulate_odds_evens(&mut rng, iterations, &mut rec),
            GameKind::Crimes => self.simulate_crimes(&mut rng, iterations, &mut rec),
            GameKind::Stocks => self.simulate_stocks(&mut rng, iterations, &mut rec),
        }
        let elapsed = started.elapsed();
        if self.verbose {
            log::info!(
                "{} seed {seed}: {} failures in {elapsed:?}",
                game.key(),
                rec.failures.len()
            );
        }
        RunResult {
            game,
            seed,
            iterations,
            passed: rec.failures.is_empty(),
            failures: rec.failures,
            metrics: rec.metrics,
            elapsed_us: u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX),
        }
    }

    fn simulate_crimes(&self, rng: &mut ChaCha20Rng, iterations: usize, rec: &mut Recorder) {
        let mut attempts: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
        let mut player = Player::new("Tester", &self.config.player);
        let mut now: u64 = 0;
        for i in 0..iterations {
            for crime in &self.config.crimes {
                // Step past any prison sentence or cooldown left by the last attempt.
                now = player
                    .countdowns(now)
                    .iter()
                    .map(|(_, c)| c.end_ms)
                    .max()
                    .unwrap_or(now)
                    .max(now);
                player.settle(now);
                let cash_before = player.cash;
                let report = match commit_crime(&mut player, crime, now, rng) {
                    Ok(report) => report,
                    Err(err) => {
                        rec.check(false, || format!("iteration {i}: {} rejected: {err}", crime.id));
                        continue;
                    }
                };
                let entry = attempts.entry(crime.id.as_str()).or_default();
                entry.0 += 1;
                rec.check(find_crime(&self.config.crimes, &report.crime_id).is_some(), || {
                    format!("report names unknown crime {}", report.crime_id)
                });
                match report.outcome {
                    CrimeOutcome::Success { payout, .. } => {
                        entry.1 += 1;
                        rec.check((crime.payout_min..=crime.payout_max).contains(&payout), || {
                            format!("{} paid {payout} outside {}..={}", crime.id, crime.payout_min, crime.payout_max)
                        });
                        rec.check(player.cash == cash_before + payout, || {
                            format!("{} moved cash {cash_before} -> {} on a {payout} payout", crime.id, player.cash)
                        });
                    }
                    CrimeOutcome::Caught { release_at } => {
                        rec.check(player.is_jailed(now), || format!("{} caught but not jailed", crime.id));
                        rec.check(release_at == now + crime.jail_secs * 1_000, || {
                            format!("{} sentence ends at {release_at}, expected {}", crime.id, now + crime.jail_secs * 1_000)
                        });
                        rec.check(commit_crime(&mut player, crime, now, rng).is_err(), || {
                            format!("{} could be repeated from prison", crime.id)
                        });
                    }
                }
                rec.check(player.cooldown_remaining(&crime.activity(), now).is_some() || crime.cooldown_secs == 0, || {
                    format!("{} did not start its cooldown", crime.id)
                });
            }
        }
        for (id, (tried, succeeded)) in attempts {
            rec.metric(&format!("{id}.success_rate"), ratio(succeeded, tried));
        }
        rec.metric("experience", u64_to_f64(player.experience));
    }

    fn simulate_stocks(&self, rng: &mut ChaCha20Rng, iterations: usize, rec: &mut Recorder) {
        let mut market = Market::new(&self.config.stocks);
        for tick in 0..iterations {
            market.tick(rng);
            for stock in market.stocks() {
                rec.check(stock.price >= 1, || format!("tick {tick}: {} fell to zero", stock.symbol));
                rec.check(stock.history.len() <= HISTORY_LEN, || {
                    format!("tick {tick}: {} history grew to {}", stock.symbol, stock.history.len())
                });
                rec.check(stock.history.back() == Some(&stock.price), || {
                    format!("tick {tick}: {} history does not end at the current price", stock.symbol)
                });
            }
        }
        for (def, stock) in self.config.stocks.iter().zip(market.stocks()) {
            let start = u64_to_f64(def.initial_price.max(1));
            let end = u64_to_f64(stock.price);
            rec.metric(&format!("{}.final_ratio", stock.symbol), end / start);
        }
    }
}

fn simulate_hilo(rng: &mut ChaCha20Rng, iterations: usize, rec: &mut Recorder) {
    let (mut cashed, mut busted, mut pushes, mut guesses) = (0_usize, 0_usize, 0_usize, 0_usize);
    let (mut wagered, mut returned) = (0_u64, 0_u64);
    for i in 0..iterations {
        let mut round = match HigherLowerRound::start(STAKE, u64::MAX, rng) {
            Ok(round) => round,
            Err(err) => {
                rec.check(false, || format!("round {i}: start failed: {err}"));
                continue;
            }
        };
        wagered += STAKE;
        while round.status() == RoundStatus::Active {
            if round.streak() >= CASH_OUT_STREAK || !round.can_guess() {
                let expected = payout_for_streak(STAKE, round.streak());
                match round.cash_out() {
                    Ok(payout) => {
                        rec.check(payout == expected, || {
                            format!("round {i}: cashed {payout}, expected {expected}")
                        });
                        returned += payout;
                        cashed += 1;
                    }
                    Err(err) => {
                        rec.check(false, || format!("round {i}: cash out failed: {err}"));
                        break;
                    }
                }
                continue;
            }
            let guess = if round.current().value() <= 8 {
                Guess::Higher
            } else {
                Guess::Lower
            };
            let Ok(outcome) = round.guess(guess) else {
                break;
            };
            guesses += 1;
            let higher = outcome.drawn.value() > outcome.previous.value();
            let lower = outcome.drawn.value() < outcome.previous.value();
            let expected = if !higher && !lower {
                GuessResult::Push
            } else if (higher && guess == Guess::Higher) || (lower && guess == Guess::Lower) {
                GuessResult::Win
            } else {
                GuessResult::Lose
            };
            rec.check(outcome.result == expected, || {
                format!("round {i}: {} then {} called {guess:?} gave {:?}", outcome.previous, outcome.drawn, outcome.result)
            });
            match outcome.result {
                GuessResult::Push => pushes += 1,
                GuessResult::Lose => {
                    busted += 1;
                    rec.check(round.status() == RoundStatus::Busted, || format!("round {i}: miss did not end the round"));
                    rec.check(round.cash_out().is_err(), || format!("round {i}: busted round paid out"));
                }
                GuessResult::Win => {}
            }
        }
        let distinct: HashSet<_> = round.history().iter().collect();
        rec.check(distinct.len() == round.history().len(), || {
            format!("round {i}: a card was dealt twice")
        });
    }
    rec.metric("cash_out_rate", ratio(cashed, iterations));
    rec.metric("bust_rate", ratio(busted, iterations));
    rec.metric("push_rate", ratio(pushes, guesses));
    rec.metric(
        "return_to_player",
        if wagered == 0 {
            0.0
        } else {
            u64_to_f64(returned) / u64_to_f64(wagered)
        },
    );
}

fn simulate_odds_evens(rng: &mut ChaCha20Rng, iterations: usize, rec: &mut Recorder) {
    let mut player = Player::new("Tester", &omerta_game::PlayerStart::default());
    let mut wins = 0_usize;
    for i in 0..iterations {
        player.cash = player.cash.max(STAKE);
        let choice = if i % 2 == 0 { Parity::Even } else { Parity::Odd };
        let before = player.cash;
        match odds_evens::play(&mut player, STAKE, choice, rng) {
            Ok(outcome) => {
                let sum = outcome.roll.sum();
                rec.check((2..=12).contains(&sum), || format!("game {i}: impossible sum {sum}"));
                rec.check(outcome.won == resolve(outcome.roll, choice), || {
                    format!("game {i}: {sum} called {} settled as {}", choice.label(), outcome.won)
                });
                let expected = if outcome.won { before + STAKE } else { before - STAKE };
                rec.check(player.cash == expected, || {
                    format!("game {i}: cash {} after settling, expected {expected}", player.cash)
                });
                if outcome.won {
                    wins += 1;
                }
            }
            Err(err) => rec.check(false, || format!("game {i}: rejected: {err}")),
        }
    }
    let zero = odds_evens::play(&mut player, 0, Parity::Odd, rng);
    rec.check(zero.is_err(), || String::from("zero stake was accepted"));
    rec.metric("win_rate", ratio(wins, iterations));
}

/// Run every game for every seed.
pub fn run_all(sim: &Simulator, games: &[GameKind], seeds: &[u64], iterations: usize) -> Vec<RunResult> {
    games
        .iter()
        .flat_map(|&game| seeds.iter().map(move |&seed| (game, seed)))
        .map(|(game, seed)| sim.run(game, seed, iterations))
        .collect()
}

pub fn average_elapsed(results: &[RunResult]) -> Duration {
    if results.is_empty() {
        return Duration::ZERO;
    }
    let total: u64 = results.iter().map(|r| r.elapsed_us).sum();
    Duration::from_micros(total / u64::try_from(results.len()).unwrap_or(1))
}
