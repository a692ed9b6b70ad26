//! GA configuration.
//!
//! [`GaConfig`] holds every parameter of the evolutionary loop. Defaults
//! are sensible for small cut requests; `validate` enforces the documented
//! ranges before any engine work begins.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::genotype::Crossover;

/// Hard ceiling on `population × boards²`, the rough per-generation cost.
const MAX_GENERATION_COST: u64 = 1_000_000;

/// Configuration for the genetic algorithm.
///
/// # Builder Pattern
///
/// ```
/// use guillotine::ga::GaConfig;
/// use guillotine::genotype::Crossover;
///
/// let config = GaConfig::default()
///     .with_population_size(100)
///     .with_crossover(Crossover::Uniform)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaConfig {
    /// Recombination strategy.
    pub crossover: Crossover,

    /// Mean number of gene weights replaced per mutation (stddev = mean/5).
    pub weight_mutate_mean: f64,

    /// Mean number of join configs replaced per mutation (stddev = mean/5).
    pub config_mutate_mean: f64,

    /// Number of candidates drawn (with replacement) per tournament.
    pub tournament_size: usize,

    /// Tournament rank-acceptance parameter, in [0, 1).
    ///
    /// A rank is accepted when a uniform draw exceeds it, so lower values
    /// concentrate selection on the fittest candidate. Values at or above
    /// 1 would never accept and loop forever; `validate` rejects them.
    pub selection_p: f64,

    /// Number of individuals per generation.
    pub population_size: usize,

    /// Number of generations; the initial random population counts as the
    /// first.
    pub generations: usize,

    /// Individuals copied unchanged into the next generation.
    pub elite_size: usize,

    /// Random seed; `None` seeds from entropy.
    pub seed: Option<u64>,

    /// Optional wall-clock budget. Checked between generations: the run
    /// stops early when the extrapolated cost of one more generation would
    /// exceed it.
    pub time_limit: Option<Duration>,

    /// Whether to decode and score the population in parallel. Ranking is
    /// a stable sort on fitness, so this does not change results.
    pub parallel: bool,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            crossover: Crossover::TwoPoint,
            weight_mutate_mean: 5.0,
            config_mutate_mean: 5.0,
            tournament_size: 8,
            selection_p: 0.7,
            population_size: 50,
            generations: 200,
            elite_size: 5,
            seed: None,
            time_limit: None,
            parallel: false,
        }
    }
}

impl GaConfig {
    /// Sets the crossover strategy.
    pub fn with_crossover(mut self, crossover: Crossover) -> Self {
        self.crossover = crossover;
        self
    }

    /// Sets the mean weight-mutation count.
    pub fn with_weight_mutate_mean(mut self, mean: f64) -> Self {
        self.weight_mutate_mean = mean;
        self
    }

    /// Sets the mean config-mutation count.
    pub fn with_config_mutate_mean(mut self, mean: f64) -> Self {
        self.config_mutate_mean = mean;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, size: usize) -> Self {
        self.tournament_size = size;
        self
    }

    /// Sets the tournament acceptance parameter.
    pub fn with_selection_p(mut self, p: f64) -> Self {
        self.selection_p = p;
        self
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the generation count.
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    /// Sets the elite size.
    pub fn with_elite_size(mut self, size: usize) -> Self {
        self.elite_size = size;
        self
    }

    /// Sets the random seed for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the wall-clock budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration against a spec of `nboards` boards.
    ///
    /// Checks the documented parameter ranges plus the combined cost bound
    /// `population × nboards² ≤ 1,000,000` that keeps one generation's work
    /// tractable.
    pub fn validate(&self, nboards: usize) -> Result<()> {
        if nboards < 2 {
            return Err(Error::TooFewBoards(nboards));
        }
        if !self.config_mutate_mean.is_finite() || self.config_mutate_mean < 0.0 {
            return Err(Error::ParamOutOfRange {
                name: "config_mutate_mean",
                value: self.config_mutate_mean,
            });
        }
        if !self.weight_mutate_mean.is_finite() || self.weight_mutate_mean < 0.0 {
            return Err(Error::ParamOutOfRange {
                name: "weight_mutate_mean",
                value: self.weight_mutate_mean,
            });
        }
        if self.population_size < 1 || self.population_size > 1000 {
            return Err(Error::ParamOutOfRange {
                name: "population_size",
                value: self.population_size as f64,
            });
        }
        if self.tournament_size < 1 || self.tournament_size > self.population_size {
            return Err(Error::ParamOutOfRange {
                name: "tournament_size",
                value: self.tournament_size as f64,
            });
        }
        if !(0.0..1.0).contains(&self.selection_p) {
            return Err(Error::ParamOutOfRange {
                name: "selection_p",
                value: self.selection_p,
            });
        }
        if self.elite_size > self.population_size {
            return Err(Error::ParamOutOfRange {
                name: "elite_size",
                value: self.elite_size as f64,
            });
        }
        if self.generations < 1 || self.generations > 10_000 {
            return Err(Error::ParamOutOfRange {
                name: "generations",
                value: self.generations as f64,
            });
        }
        let cost = self.population_size as u64 * nboards as u64 * nboards as u64;
        if cost > MAX_GENERATION_COST {
            return Err(Error::ResourceLimit {
                cost,
                limit: MAX_GENERATION_COST,
            });
        }
        Ok(())
    }
}
