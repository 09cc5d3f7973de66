use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};
use crate::evolution::{Challenge, FitnessEvaluator};
use crate::rng::RandomNumberGenerator;

/// Fitness-proportionate (roulette wheel) selection.
///
/// Each chromosome's weight is its selection probability, its cached fitness
/// divided by the maximum fitness. The weight table is computed once per
/// generation and reused for every pick.
///
/// # Examples
///
/// ```
/// use queenga::chromosome::Chromosome;
/// use queenga::evolution::FitnessEvaluator;
/// use queenga::rng::RandomNumberGenerator;
/// use queenga::selection::RouletteWheelSelection;
///
/// let evaluator = FitnessEvaluator::new(4, false);
/// let population = vec![
///     Chromosome::new(vec![2, 4, 1, 3]).unwrap(),
///     Chromosome::new(vec![1, 2, 3, 4]).unwrap(),
/// ];
/// evaluator.calculate_fitnesses(&population);
///
/// let selection = RouletteWheelSelection::new();
/// let weights = selection.weights(&population, &evaluator).unwrap();
/// assert_eq!(weights, vec![1.0, 0.0]);
///
/// let mut rng = RandomNumberGenerator::from_seed(1);
/// let picked = selection.pick(&population, &weights, &mut rng).unwrap();
/// assert_eq!(picked, &population[0]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouletteWheelSelection;

impl RouletteWheelSelection {
    pub fn new() -> Self {
        Self
    }

    /// Computes the selection weight of every chromosome in `population`.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::FitnessNotCached` if any chromosome was never scored.
    pub fn weights<C>(&self, population: &[Chromosome], evaluator: &FitnessEvaluator<C>) -> Result<Vec<f64>>
    where
        C: Challenge<Chromosome> + Send + Sync,
    {
        population
            .iter()
            .map(|chromosome| evaluator.probability(chromosome))
            .collect()
    }

    /// Picks one individual with probability proportional to its weight.
    pub fn pick<'a, T>(
        &self,
        population: &'a [T],
        weights: &[f64],
        rng: &mut RandomNumberGenerator,
    ) -> Result<&'a T> {
        weighted_pick(population, weights, rng)
    }
}

/// Draws `r` uniformly from `[0, total)` and returns the first individual whose
/// cumulative weight reaches `r`.
///
/// When every weight is zero the wheel has no area and the pick is uniform.
///
/// # Errors
///
/// Returns `GeneticError::EmptyPopulation` for an empty population and
/// `GeneticError::Configuration` when the weight table does not match it.
///
/// # Panics
///
/// Panics if the walk passes the total weight without picking anyone, which
/// would mean the cumulative sum disagrees with the total.
pub fn weighted_pick<'a, T>(
    population: &'a [T],
    weights: &[f64],
    rng: &mut RandomNumberGenerator,
) -> Result<&'a T> {
    if population.is_empty() {
        return Err(GeneticError::EmptyPopulation);
    }
    if weights.len() != population.len() {
        return Err(GeneticError::Configuration(format!(
            "Weight table length ({}) doesn't match population length ({})",
            weights.len(),
            population.len()
        )));
    }

    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return Ok(&population[rng.gen_index(population.len())]);
    }

    let r = rng.gen_below(total);
    let mut upto = 0.0;
    for (individual, &weight) in population.iter().zip(weights) {
        if upto + weight >= r {
            return Ok(individual);
        }
        upto += weight;
    }

    unreachable!("roulette wheel walked past total weight {}", total)
}
