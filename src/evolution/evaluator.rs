use rayon::prelude::*;
use tracing::debug;

use crate::{
    caching::CachedChallenge,
    chromosome::Chromosome,
    error::{GeneticError, Result},
};

use super::challenge::{Challenge, QueensChallenge};

/// Scores chromosomes through a memoizing cache.
///
/// The evaluator owns the fitness cache for one board size. Every score it hands
/// out is cached, which is what lets [`FitnessEvaluator::probability`] answer
/// selection lookups without recomputing anything.
#[derive(Debug, Clone)]
pub struct FitnessEvaluator<C = QueensChallenge>
where
    C: Challenge<Chromosome>,
{
    challenge: CachedChallenge<Chromosome, C>,
    max_fitness: usize,
    parallel: bool,
}

impl FitnessEvaluator<QueensChallenge> {
    /// Creates an evaluator for an `n`-queens board.
    pub fn new(n: usize, parallel: bool) -> Self {
        let challenge = QueensChallenge::new(n);
        Self::with_challenge(challenge, challenge.max_fitness(), parallel)
    }
}

impl<C> FitnessEvaluator<C>
where
    C: Challenge<Chromosome> + Send + Sync,
{
    /// Creates an evaluator around any chromosome challenge.
    pub fn with_challenge(challenge: C, max_fitness: usize, parallel: bool) -> Self {
        Self {
            challenge: CachedChallenge::new(challenge),
            max_fitness,
            parallel,
        }
    }

    pub fn max_fitness(&self) -> usize {
        self.max_fitness
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Returns the fitness of `chromosome`, computing and caching it on a miss.
    pub fn fitness(&self, chromosome: &Chromosome) -> usize {
        self.challenge.score(chromosome)
    }

    /// Scores a whole population, index-aligned with the input.
    ///
    /// Runs on the rayon pool when the evaluator is parallel.
    pub fn calculate_fitnesses(&self, population: &[Chromosome]) -> Vec<usize> {
        if self.parallel {
            population
                .par_iter()
                .map(|chromosome| self.fitness(chromosome))
                .collect()
        } else {
            population
                .iter()
                .map(|chromosome| self.fitness(chromosome))
                .collect()
        }
    }

    /// Returns the fitness of a chromosome that was already scored.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::FitnessNotCached` when the chromosome was never scored.
    pub fn cached_fitness(&self, chromosome: &Chromosome) -> Result<usize> {
        self.challenge
            .cached(chromosome)
            .ok_or_else(|| GeneticError::FitnessNotCached(chromosome.to_string()))
    }

    /// Selection probability of an already scored chromosome: fitness over max fitness.
    pub fn probability(&self, chromosome: &Chromosome) -> Result<f64> {
        let fitness = self.cached_fitness(chromosome)?;
        if self.max_fitness == 0 {
            // a one-queen board has no pairs; every placement is perfect
            return Ok(1.0);
        }
        Ok(fitness as f64 / self.max_fitness as f64)
    }

    /// Drops every cached score.
    pub fn reset(&self) {
        debug!(entries = self.challenge.cache_size(), "Clearing fitness cache");
        self.challenge.clear_cache();
    }

    pub fn cache_size(&self) -> usize {
        self.challenge.cache_size()
    }

    /// Returns a reference to the wrapped challenge.
    pub fn challenge(&self) -> &C {
        self.challenge.inner()
    }
}
