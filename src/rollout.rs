//! Automated play-throughs of the solver against known targets.
//!
//! Each game is a strictly sequential loop of guess → feedback → filter →
//! re-rank, bounded by a hard round cap. Batches fan independent games out
//! over a rayon pool; every game owns its own state and random generator.

use crate::dictionary::Dictionary;
use crate::feedback::evaluate;
use crate::filter::{filter, Observation};
use crate::ranker::{rank, RankerConfig, SortPolicy};
use crate::word::Word;
use fastrand::Rng;
use rayon::prelude::*;
use std::slice;
use tracing::{info, warn};

/// First guess of a rollout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opening {
    Fixed(Word),
    /// Drawn uniformly from the guess pool for every game
    Random,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RolloutConfig {
    /// Hard bound on the number of guesses in one game
    pub max_rounds: usize,
    /// Move count reported for games that were not solved
    pub failure_moves: usize,
    /// Pick randomly among the top candidates in early rounds
    pub explore: bool,
    pub explore_top: usize,
    /// Rounds (zero-based, the opening being round 0) eligible for exploration
    pub explore_rounds: usize,
    pub ranker: RankerConfig,
}

impl Default for RolloutConfig {
    fn default() -> Self {
        Self {
            max_rounds: 12,
            failure_moves: 7,
            explore: false,
            explore_top: 3,
            explore_rounds: 3,
            ranker: RankerConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RolloutOutcome {
    Solved,
    /// The solution set went empty; indicates a filtering bug when the target
    /// comes from the answer pool.
    Contradiction,
    /// The round cap was reached first.
    RoundLimit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RolloutResult {
    pub target: Word,
    pub rounds: Vec<Observation>,
    pub outcome: RolloutOutcome,
    pub move_count: usize,
}

impl RolloutResult {
    pub fn solved(&self) -> bool {
        self.outcome == RolloutOutcome::Solved
    }
}

/// Drives the solver against hidden targets.
#[derive(Debug, Clone)]
pub struct Rollout<'a> {
    guess_pool: &'a [Word],
    answer_pool: &'a [Word],
    config: RolloutConfig,
}

impl<'a> Rollout<'a> {
    pub fn new(guess_pool: &'a [Word], answer_pool: &'a [Word], config: RolloutConfig) -> Self {
        Self {
            guess_pool,
            answer_pool,
            config,
        }
    }

    pub fn from_dictionary(dictionary: &'a Dictionary, config: RolloutConfig) -> Self {
        Self::new(dictionary.guesses(), dictionary.answers(), config)
    }

    /// Play one game from `opening` against `target`.
    pub fn simulate(&self, opening: Word, target: Word, rng: &mut Rng) -> RolloutResult {
        let mut solutions = self.answer_pool.to_vec();
        let mut rounds: Vec<Observation> = Vec::new();
        let mut guess = opening;

        let outcome = loop {
            if rounds.len() >= self.config.max_rounds {
                warn!(%target, rounds = rounds.len(), "rollout hit the round cap");
                break RolloutOutcome::RoundLimit;
            }

            let observation = Observation::new(guess, evaluate(&guess, &target));
            rounds.push(observation);
            solutions = filter(&solutions, slice::from_ref(&observation));

            if guess == target {
                break RolloutOutcome::Solved;
            }
            if solutions.is_empty() {
                warn!(%target, rounds = rounds.len(), "no solutions left during rollout");
                break RolloutOutcome::Contradiction;
            }

            guess = self.next_guess(&solutions, rounds.len(), rng);
        };

        let move_count = match outcome {
            RolloutOutcome::Solved => rounds.len(),
            _ => self.config.failure_moves,
        };
        RolloutResult {
            target,
            rounds,
            outcome,
            move_count,
        }
    }

    /// Play one game, resolving a random opening first.
    pub fn play(&self, opening: Opening, target: Word, rng: &mut Rng) -> RolloutResult {
        let first = match opening {
            Opening::Fixed(word) => word,
            Opening::Random if self.guess_pool.is_empty() => target,
            Opening::Random => self.guess_pool[rng.usize(..self.guess_pool.len())],
        };
        self.simulate(first, target, rng)
    }

    fn next_guess(&self, solutions: &[Word], round: usize, rng: &mut Rng) -> Word {
        let ranked = rank(
            self.guess_pool,
            solutions,
            SortPolicy::ByExpected,
            &self.config.ranker,
        )
        .words();
        if ranked.is_empty() {
            return solutions[0];
        }

        let exploring = self.config.explore && (1..=self.config.explore_rounds).contains(&round);
        if exploring {
            let top = ranked.len().min(self.config.explore_top.max(1));
            ranked[rng.usize(..top)]
        } else {
            ranked[0]
        }
    }

    /// Play `samples` games against targets drawn uniformly, with replacement,
    /// from the answer pool.
    pub fn batch(&self, opening: Opening, samples: usize, seed: Option<u64>) -> BatchReport {
        let mut rng = seed.map_or_else(Rng::new, Rng::with_seed);
        let targets: Vec<Word> = if self.answer_pool.is_empty() {
            Vec::new()
        } else {
            (0..samples)
                .map(|_| self.answer_pool[rng.usize(..self.answer_pool.len())])
                .collect()
        };
        self.run(opening, &targets, &mut rng)
    }

    /// Play one game against every answer.
    pub fn exhaustive(&self, opening: Opening, seed: Option<u64>) -> BatchReport {
        let mut rng = seed.map_or_else(Rng::new, Rng::with_seed);
        self.run(opening, self.answer_pool, &mut rng)
    }

    fn run(&self, opening: Opening, targets: &[Word], rng: &mut Rng) -> BatchReport {
        let base_seed = rng.u64(..);
        let games: Vec<RolloutResult> = targets
            .par_iter()
            .enumerate()
            .map(|(i, &target)| {
                let mut game_rng = Rng::with_seed(base_seed.wrapping_add(i as u64));
                self.play(opening, target, &mut game_rng)
            })
            .collect();

        let report = BatchReport { games };
        info!(
            games = report.games.len(),
            mean = report.mean_moves(),
            failures = report.failures(),
            "batch finished"
        );
        report
    }
}

/// Results of many rollouts, in target order.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    pub games: Vec<RolloutResult>,
}

impl BatchReport {
    /// Mean reported move count; 0 for an empty batch
    pub fn mean_moves(&self) -> f64 {
        if self.games.is_empty() {
            return 0.0;
        }
        let total: usize = self.games.iter().map(|g| g.move_count).sum();
        total as f64 / self.games.len() as f64
    }

    /// Mean move count after each game
    pub fn running_average(&self) -> Vec<f64> {
        let mut total = 0usize;
        self.games
            .iter()
            .enumerate()
            .map(|(i, g)| {
                total += g.move_count;
                total as f64 / (i + 1) as f64
            })
            .collect()
    }

    /// (move count, games) pairs in ascending move count
    pub fn distribution(&self) -> Vec<(usize, usize)> {
        let max_moves = self.games.iter().map(|g| g.move_count).max().unwrap_or(0);
        let mut distribution = vec![0usize; max_moves + 1];
        for game in &self.games {
            distribution[game.move_count] += 1;
        }

        distribution
            .into_iter()
            .enumerate()
            .filter(|(_, count)| *count > 0)
            .collect()
    }

    pub fn failures(&self) -> usize {
        self.games.iter().filter(|g| !g.solved()).count()
    }
}
