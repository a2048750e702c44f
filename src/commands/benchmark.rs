//! Benchmark command
//!
//! Plays a simulated game against every catalog entry and summarises how the
//! configured variant performs.

use crate::catalog::Catalog;
use crate::game::{GameConfig, GameSession, SessionError, SimulatedPlayer, run_session};
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::time::{Duration, Instant};
use tracing::debug;

/// Configuration for a benchmark run
#[derive(Debug, Clone, Copy)]
pub struct BenchmarkConfig {
    pub game: GameConfig,
    /// Probability that any single answer is a mistake
    pub noise: f64,
    pub seed: u64,
    pub show_progress: bool,
}

impl BenchmarkConfig {
    #[must_use]
    pub const fn new(game: GameConfig) -> Self {
        Self {
            game,
            noise: 0.0,
            seed: 0,
            show_progress: false,
        }
    }
}

/// Result from playing against a single entry
#[derive(Debug, Clone)]
pub struct EntryResult {
    pub name: String,
    pub won: bool,
    pub turns: usize,
    pub questions: usize,
    pub backtracks: usize,
}

/// Result of a benchmark run
pub struct BenchmarkResult {
    pub total_entries: usize,
    pub wins: usize,
    pub losses: usize,
    /// Mean turns over won games
    pub average_turns: f64,
    pub min_turns: usize,
    pub max_turns: usize,
    /// Turns used by won games
    pub distribution: FxHashMap<usize, usize>,
    pub total_backtracks: usize,
    pub lost_entries: Vec<String>,
    pub hardest: Vec<(String, usize)>,
    pub duration: Duration,
    pub games_per_second: f64,
}

impl BenchmarkResult {
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.total_entries == 0 {
            0.0
        } else {
            self.wins as f64 / self.total_entries as f64
        }
    }
}

/// Play one simulated game per catalog entry, in parallel
///
/// Each entry's noise is drawn from its own generator seeded with
/// `seed + entry index`, so results do not depend on thread scheduling.
///
/// # Errors
///
/// Returns `SessionError` if a simulated reply is rejected by the session.
pub fn run_benchmark(
    catalog: &Catalog,
    config: &BenchmarkConfig,
) -> Result<BenchmarkResult, SessionError> {
    let start = Instant::now();
    let tree = config.game.build_tree(catalog);

    let pb = if config.show_progress {
        ProgressBar::new(catalog.entry_count() as u64)
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░"),
    );

    let results: Vec<EntryResult> = (0..catalog.entry_count())
        .into_par_iter()
        .map(|target| -> Result<EntryResult, SessionError> {
            let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(target as u64));
            let mut player = SimulatedPlayer::new(catalog, target, config.game.mode)
                .with_noise(config.noise, &mut rng);
            let mut session = GameSession::new(catalog, &tree, config.game);

            let outcome = run_session(&mut session, &mut player)?;
            pb.inc(1);

            Ok(EntryResult {
                name: catalog.entry(target).name().to_string(),
                won: outcome.won,
                turns: outcome.turns.len(),
                questions: outcome.questions_asked(),
                backtracks: outcome.backtracks,
            })
        })
        .collect::<Result<_, SessionError>>()?;

    pb.finish_with_message("Complete!");

    let duration = start.elapsed();
    let result = summarize(&results, duration);

    debug!(
        entries = result.total_entries,
        wins = result.wins,
        elapsed_ms = duration.as_millis(),
        "benchmark finished"
    );

    Ok(result)
}

fn summarize(results: &[EntryResult], duration: Duration) -> BenchmarkResult {
    let won: Vec<&EntryResult> = results.iter().filter(|r| r.won).collect();

    let mut distribution: FxHashMap<usize, usize> = FxHashMap::default();
    for r in &won {
        *distribution.entry(r.turns).or_insert(0) += 1;
    }

    let total_turns: usize = won.iter().map(|r| r.turns).sum();
    let average_turns = if won.is_empty() {
        0.0
    } else {
        total_turns as f64 / won.len() as f64
    };

    let mut hardest: Vec<(String, usize)> = won.iter().map(|r| (r.name.clone(), r.turns)).collect();
    hardest.sort_by_key(|(_, turns)| std::cmp::Reverse(*turns));
    hardest.truncate(5);

    BenchmarkResult {
        total_entries: results.len(),
        wins: won.len(),
        losses: results.len() - won.len(),
        average_turns,
        min_turns: won.iter().map(|r| r.turns).min().unwrap_or(0),
        max_turns: won.iter().map(|r| r.turns).max().unwrap_or(0),
        distribution,
        total_backtracks: results.iter().map(|r| r.backtracks).sum(),
        lost_entries: results
            .iter()
            .filter(|r| !r.won)
            .map(|r| r.name.clone())
            .collect(),
        hardest,
        duration,
        games_per_second: results.len() as f64 / duration.as_secs_f64().max(f64::EPSILON),
    }
}
