//! # SolverOptions
//!
//! The `SolverOptions` struct holds the configuration of the solver: how many
//! independent runs to perform, the population size, whether fitness batches are
//! evaluated in parallel, the mutation probability ramp, and the escape heuristic.
//!
//! ## Example
//!
//! ```rust
//! use queenga::evolution::options::{EscapeBudget, SolverOptions};
//!
//! let options = SolverOptions::builder()
//!     .num_runs(3)
//!     .population_size(100)
//!     .escape_budget(EscapeBudget::WholePopulation)
//!     .build();
//!
//! assert_eq!(options.get_num_runs(), 3);
//! assert!(options.validate().is_ok());
//! ```
//!
//! ## Escape budget
//!
//! The escape budget bounds how many escape mutations a generation performs
//! before escape mode switches itself off. `EscapeBudget::WholePopulation` means
//! it never switches off through the counter, so the rest of the generation is
//! shaken. On the command line the sentinel is written as `-1`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{GeneticError, Result};

/// How long escape mode lasts once triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EscapeBudget {
    /// Escape mode switches off after this many escape mutations.
    Limited(usize),
    /// Escape mode runs until the generation ends.
    WholePopulation,
}

impl EscapeBudget {
    /// Parses the configuration surface value, where `-1` is the whole-population sentinel.
    pub fn from_amount(amount: i64) -> Result<Self> {
        match amount {
            -1 => Ok(Self::WholePopulation),
            a if a >= 0 => Ok(Self::Limited(a as usize)),
            a => Err(GeneticError::Configuration(format!(
                "Escape amount must be -1 or non-negative, got {}",
                a
            ))),
        }
    }

    /// Folds a limit that covers the whole population into the sentinel.
    pub fn normalized(self, population_size: usize) -> Self {
        match self {
            Self::Limited(amount) if amount >= population_size => Self::WholePopulation,
            other => other,
        }
    }
}

/// Which solver events are logged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Verbosity {
    /// Log every produced child with its fitness.
    pub chromosomes: bool,
    /// Log one line per generation.
    pub generations: bool,
    /// Log escape mutations.
    pub escapes: bool,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolverOptions {
    num_runs: usize,
    population_size: usize,
    parallel: bool,
    base_mutation_probability: f64,
    max_mutation_probability: f64,
    escape_budget: EscapeBudget,
    /// Escape mode is triggered on generations divisible by this interval.
    escape_interval: usize,
    reset_cache_between_runs: bool,
    verbosity: Verbosity,
    /// Abort a run after this many generations.
    max_generations: Option<usize>,
    seed: Option<u64>,
}

impl SolverOptions {
    pub fn builder() -> SolverOptionsBuilder {
        SolverOptionsBuilder::default()
    }

    /// Checks that the options describe a search that can run.
    pub fn validate(&self) -> Result<()> {
        if self.num_runs == 0 {
            return Err(GeneticError::Configuration(
                "Number of runs cannot be zero".to_string(),
            ));
        }
        if self.population_size == 0 {
            return Err(GeneticError::Configuration(
                "Population size cannot be zero".to_string(),
            ));
        }
        if self.escape_interval == 0 {
            return Err(GeneticError::Configuration(
                "Escape interval cannot be zero".to_string(),
            ));
        }
        for (name, p) in [
            ("Base mutation probability", self.base_mutation_probability),
            ("Max mutation probability", self.max_mutation_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(GeneticError::Configuration(format!(
                    "{} must lie in [0, 1], got {}",
                    name, p
                )));
            }
        }
        if self.base_mutation_probability > self.max_mutation_probability {
            return Err(GeneticError::Configuration(format!(
                "Base mutation probability {} exceeds the maximum {}",
                self.base_mutation_probability, self.max_mutation_probability
            )));
        }
        Ok(())
    }

    pub fn get_num_runs(&self) -> usize {
        self.num_runs
    }

    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    pub fn get_base_mutation_probability(&self) -> f64 {
        self.base_mutation_probability
    }

    pub fn get_max_mutation_probability(&self) -> f64 {
        self.max_mutation_probability
    }

    /// The escape budget, with limits covering the whole population folded into the sentinel.
    pub fn get_escape_budget(&self) -> EscapeBudget {
        self.escape_budget.normalized(self.population_size)
    }

    pub fn get_escape_interval(&self) -> usize {
        self.escape_interval
    }

    pub fn resets_cache_between_runs(&self) -> bool {
        self.reset_cache_between_runs
    }

    pub fn get_verbosity(&self) -> Verbosity {
        self.verbosity
    }

    pub fn get_max_generations(&self) -> Option<usize> {
        self.max_generations
    }

    pub fn get_seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn set_num_runs(&mut self, num_runs: usize) {
        self.num_runs = num_runs;
    }

    pub fn set_parallel(&mut self, parallel: bool) {
        self.parallel = parallel;
    }

    pub fn set_verbosity(&mut self, verbosity: Verbosity) {
        self.verbosity = verbosity;
    }

    pub fn set_max_generations(&mut self, max_generations: Option<usize>) {
        self.max_generations = max_generations;
    }

    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.seed = seed;
    }
}

impl Default for SolverOptions {
    fn default() -> Self {
        SolverOptionsBuilder::default().build()
    }
}

/// Builder for `SolverOptions`.
#[derive(Debug, Clone, Default)]
pub struct SolverOptionsBuilder {
    num_runs: Option<usize>,
    population_size: Option<usize>,
    parallel: Option<bool>,
    base_mutation_probability: Option<f64>,
    max_mutation_probability: Option<f64>,
    escape_budget: Option<EscapeBudget>,
    escape_interval: Option<usize>,
    reset_cache_between_runs: Option<bool>,
    verbosity: Option<Verbosity>,
    max_generations: Option<usize>,
    seed: Option<u64>,
}

impl SolverOptionsBuilder {
    pub fn num_runs(mut self, value: usize) -> Self {
        self.num_runs = Some(value);
        self
    }

    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    /// Evaluates fitness batches on the rayon thread pool.
    pub fn parallel(mut self, value: bool) -> Self {
        self.parallel = Some(value);
        self
    }

    pub fn base_mutation_probability(mut self, value: f64) -> Self {
        self.base_mutation_probability = Some(value);
        self
    }

    pub fn max_mutation_probability(mut self, value: f64) -> Self {
        self.max_mutation_probability = Some(value);
        self
    }

    pub fn escape_budget(mut self, value: EscapeBudget) -> Self {
        self.escape_budget = Some(value);
        self
    }

    pub fn escape_interval(mut self, value: usize) -> Self {
        self.escape_interval = Some(value);
        self
    }

    pub fn reset_cache_between_runs(mut self, value: bool) -> Self {
        self.reset_cache_between_runs = Some(value);
        self
    }

    pub fn verbosity(mut self, value: Verbosity) -> Self {
        self.verbosity = Some(value);
        self
    }

    pub fn max_generations(mut self, value: usize) -> Self {
        self.max_generations = Some(value);
        self
    }

    pub fn seed(mut self, value: u64) -> Self {
        self.seed = Some(value);
        self
    }

    pub fn build(self) -> SolverOptions {
        SolverOptions {
            num_runs: self.num_runs.unwrap_or(5),
            population_size: self.population_size.unwrap_or(75),
            parallel: self.parallel.unwrap_or(false),
            base_mutation_probability: self.base_mutation_probability.unwrap_or(0.05),
            max_mutation_probability: self.max_mutation_probability.unwrap_or(0.75),
            escape_budget: self.escape_budget.unwrap_or(EscapeBudget::Limited(15)),
            escape_interval: self.escape_interval.unwrap_or(200),
            reset_cache_between_runs: self.reset_cache_between_runs.unwrap_or(true),
            verbosity: self.verbosity.unwrap_or_default(),
            max_generations: self.max_generations,
            seed: self.seed,
        }
    }
}
