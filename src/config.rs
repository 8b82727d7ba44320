use crate::error::{SolverError, SolverResult};
use crate::ranker::{RankerConfig, ScoreWeights};
use crate::rollout::RolloutConfig;
use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct RankerParams {
    /// Guesses kept after frequency scoring for exact scoring
    #[arg(global = true, long, default_value_t = 120)]
    pub shortlist_cap: usize,
    /// Add every remaining answer to the shortlist at or below this count
    #[arg(global = true, long, default_value_t = 80)]
    pub union_threshold: usize,
    /// List remaining answers directly at or below this count
    #[arg(global = true, long, default_value_t = 10)]
    pub endgame_threshold: usize,
    #[arg(global = true, long, default_value_t = 10)]
    pub display_limit: usize,
    #[command(flatten)]
    pub weights: WeightParams,
}

#[derive(Args, Debug, Clone)]
pub struct WeightParams {
    #[arg(global = true, long, default_value_t = 0.6)]
    pub weight_expected: f64,
    #[arg(global = true, long, default_value_t = 0.3)]
    pub weight_entropy: f64,
    #[arg(global = true, long, default_value_t = 0.1)]
    pub weight_frequency: f64,
}

#[derive(Args, Debug, Clone)]
pub struct RolloutParams {
    #[arg(long, default_value_t = 12)]
    pub max_rounds: usize,
    /// Move count charged for an unsolved game
    #[arg(long, default_value_t = 7)]
    pub failure_moves: usize,
    /// Pick randomly among the top candidates in rounds 1..=explore-rounds
    #[arg(long, default_value_t = false)]
    pub explore: bool,
    #[arg(long, default_value_t = 3)]
    pub explore_top: usize,
    #[arg(long, default_value_t = 3)]
    pub explore_rounds: usize,
}

impl WeightParams {
    pub fn to_weights(&self) -> SolverResult<ScoreWeights> {
        let weights = [
            ("expected", self.weight_expected),
            ("entropy", self.weight_entropy),
            ("frequency", self.weight_frequency),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(SolverError::Config(format!(
                    "weight-{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(ScoreWeights {
            expected: self.weight_expected,
            entropy: self.weight_entropy,
            frequency: self.weight_frequency,
        })
    }
}

impl RankerParams {
    pub fn to_config(&self) -> SolverResult<RankerConfig> {
        if self.display_limit == 0 {
            return Err(SolverError::Config(
                "display-limit must be at least 1".to_string(),
            ));
        }
        Ok(RankerConfig {
            shortlist_cap: self.shortlist_cap,
            union_threshold: self.union_threshold,
            endgame_threshold: self.endgame_threshold,
            display_limit: self.display_limit,
            weights: self.weights.to_weights()?,
            ..RankerConfig::default()
        })
    }
}

impl RolloutParams {
    pub fn to_config(&self, ranker: RankerConfig) -> SolverResult<RolloutConfig> {
        if self.max_rounds == 0 {
            return Err(SolverError::Config(
                "max-rounds must be at least 1".to_string(),
            ));
        }
        if self.explore_top == 0 {
            return Err(SolverError::Config(
                "explore-top must be at least 1".to_string(),
            ));
        }
        Ok(RolloutConfig {
            max_rounds: self.max_rounds,
            failure_moves: self.failure_moves,
            explore: self.explore,
            explore_top: self.explore_top,
            explore_rounds: self.explore_rounds,
            ranker,
        })
    }
}
