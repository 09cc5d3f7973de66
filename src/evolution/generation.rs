use std::collections::HashSet;

use tracing::debug;

use super::{
    challenge::Challenge, controller::AdaptiveController, evaluator::FitnessEvaluator,
    options::SolverOptions,
};
use crate::{
    breeding::reproduce,
    chromosome::Chromosome,
    error::{GeneticError, Result},
    local_search::{EscapeState, Mutation},
    rng::RandomNumberGenerator,
    selection::RouletteWheelSelection,
};

/// Share of the population carried unchanged into the next generation, in percent.
const ELITE_PERCENT: usize = 5;

/// What one call to [`GenerationLoop::evolve_generation`] produced.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOutcome {
    /// The next population, elites first.
    pub population: Vec<Chromosome>,
    /// Mutation probability in force when the generation ended.
    pub mutation_probability: f64,
    /// Whether escape mode was still on when the generation ended.
    pub escape_active: bool,
    /// Whether a child reached maximum fitness and ended the generation early.
    pub solved: bool,
}

/// Number of elites kept from a population of `population_size`, rounded up.
pub fn elite_count(population_size: usize) -> usize {
    (population_size * ELITE_PERCENT).div_ceil(100)
}

/// Builds one generation from the previous one: elitism, roulette selection,
/// single-point crossover, and mutation steered by the adaptive controller.
#[derive(Debug, Clone)]
pub struct GenerationLoop {
    population_size: usize,
    controller: AdaptiveController,
    mutation: Mutation,
    selection: RouletteWheelSelection,
    log_chromosomes: bool,
}

impl GenerationLoop {
    pub fn new(population_size: usize, controller: AdaptiveController, mutation: Mutation) -> Self {
        Self {
            population_size,
            controller,
            mutation,
            selection: RouletteWheelSelection::new(),
            log_chromosomes: false,
        }
    }

    pub fn from_options(options: &SolverOptions) -> Self {
        let verbosity = options.get_verbosity();
        let mutation =
            Mutation::new(options.get_escape_budget()).with_escape_logging(verbosity.escapes);
        let mut generation_loop = Self::new(
            options.get_population_size(),
            AdaptiveController::from_options(options),
            mutation,
        );
        generation_loop.log_chromosomes = verbosity.chromosomes;
        generation_loop
    }

    pub fn population_size(&self) -> usize {
        self.population_size
    }

    /// Breeds the next population from `population`.
    ///
    /// Every chromosome of `population` must already be scored by `evaluator`.
    /// Each child is scored as it is produced, and the generation stops early as
    /// soon as one reaches the evaluator's maximum fitness.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::EmptyPopulation` when `population` is empty, or
    /// `GeneticError::FitnessNotCached` if an incoming chromosome was never scored.
    pub fn evolve_generation<C>(
        &self,
        population: &[Chromosome],
        evaluator: &FitnessEvaluator<C>,
        elapsed_seconds: f64,
        generation: usize,
        escape_active: bool,
        rng: &mut RandomNumberGenerator,
    ) -> Result<GenerationOutcome>
    where
        C: Challenge<Chromosome> + Send + Sync,
    {
        if population.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }
        let max_fitness = evaluator.max_fitness();

        let mut ranked = population
            .iter()
            .map(|chromosome| -> Result<(usize, &Chromosome)> {
                Ok((evaluator.cached_fitness(chromosome)?, chromosome))
            })
            .collect::<Result<Vec<_>>>()?;
        ranked.sort_by(|a, b| b.0.cmp(&a.0));
        let elites: Vec<Chromosome> = ranked
            .iter()
            .take(elite_count(population.len()))
            .map(|(_, chromosome)| (*chromosome).clone())
            .collect();

        let mut next: Vec<Chromosome> = elites.clone();
        let mut seen: HashSet<Chromosome> = elites.iter().cloned().collect();

        let weights = self.selection.weights(population, evaluator)?;
        let mut escape = EscapeState::new(escape_active, 0);
        let mut mutation_probability = self.controller.base_mutation_probability();
        let mut solved = false;

        while next.len() < self.population_size {
            let (active, probability) = self.controller.calculate_parameters(
                elapsed_seconds,
                generation,
                escape,
                mutation_probability,
            );
            escape.active = active;
            mutation_probability = probability;

            let x = self.selection.pick(population, &weights, rng)?;
            let y = self.selection.pick(population, &weights, rng)?;
            let (child, state) = self.breed(x, y, &elites, mutation_probability, escape, rng);
            escape = state;

            let fitness = evaluator.fitness(&child);
            if self.log_chromosomes {
                debug!("Chromosome = {}, Fitness = {}", child, fitness);
            }

            if seen.insert(child.clone()) {
                next.push(child);
            }
            if fitness == max_fitness {
                solved = true;
                break;
            }
        }

        Ok(GenerationOutcome {
            population: next,
            mutation_probability,
            escape_active: escape.active,
            solved,
        })
    }

    /// Crosses `x` with `y` and, with probability `mutation_probability`, mutates
    /// the child. A child equal to one of `elites` is never mutated.
    fn breed(
        &self,
        x: &Chromosome,
        y: &Chromosome,
        elites: &[Chromosome],
        mutation_probability: f64,
        escape: EscapeState,
        rng: &mut RandomNumberGenerator,
    ) -> (Chromosome, EscapeState) {
        let child = reproduce(x, y, rng);
        if rng.gen_probability() < mutation_probability && !elites.contains(&child) {
            self.mutation.mutate(&child, escape, rng)
        } else {
            (child, escape)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evolution::options::EscapeBudget;

    fn generation_loop(population_size: usize) -> GenerationLoop {
        let options = SolverOptions::builder()
            .population_size(population_size)
            .build();
        GenerationLoop::from_options(&options)
    }

    #[test]
    fn test_elite_count_rounds_up() {
        assert_eq!(elite_count(75), 4);
        assert_eq!(elite_count(20), 1);
        assert_eq!(elite_count(21), 2);
        assert_eq!(elite_count(1), 1);
        assert_eq!(elite_count(0), 0);
    }

    #[test]
    fn test_generation_keeps_elites_in_front() {
        let mut rng = RandomNumberGenerator::from_seed(12);
        let evaluator = FitnessEvaluator::new(8, false);
        let population: Vec<Chromosome> = (0..40).map(|_| Chromosome::random(8, &mut rng)).collect();
        let fitnesses = evaluator.calculate_fitnesses(&population);

        let outcome = generation_loop(40)
            .evolve_generation(&population, &evaluator, 0.0, 1, false, &mut rng)
            .unwrap();

        let mut ranked: Vec<(usize, &Chromosome)> = fitnesses.iter().copied().zip(&population).collect();
        ranked.sort_by(|a, b| b.0.cmp(&a.0));
        let expected: Vec<Chromosome> = ranked
            .iter()
            .take(elite_count(40))
            .map(|(_, c)| (*c).clone())
            .collect();

        assert_eq!(elite_count(40), 2);
        assert_eq!(&outcome.population[..2], expected.as_slice());
        if !outcome.solved {
            assert_eq!(outcome.population.len(), 40);
        }
    }

    #[test]
    fn test_generation_stops_at_first_solution() {
        let evaluator = FitnessEvaluator::new(4, false);
        let max_fitness = evaluator.max_fitness();
        let mut solved_runs = 0;

        for seed in 0..50 {
            let mut rng = RandomNumberGenerator::from_seed(seed);
            let population: Vec<Chromosome> = (0..20).map(|_| Chromosome::random(4, &mut rng)).collect();
            let fitnesses = evaluator.calculate_fitnesses(&population);
            if fitnesses.contains(&max_fitness) {
                continue;
            }

            // ten seconds in, the mutation probability sits at its ceiling
            let outcome = generation_loop(20)
                .evolve_generation(&population, &evaluator, 10.0, 1, false, &mut rng)
                .unwrap();
            let solutions: Vec<usize> = outcome
                .population
                .iter()
                .enumerate()
                .filter(|(_, c)| evaluator.fitness(c) == max_fitness)
                .map(|(i, _)| i)
                .collect();

            if outcome.solved {
                solved_runs += 1;
                assert_eq!(solutions, vec![outcome.population.len() - 1]);
                assert!(outcome.population.len() <= 20);
            } else {
                assert!(solutions.is_empty());
                assert_eq!(outcome.population.len(), 20);
            }
        }
        assert!(solved_runs > 0);
    }

    #[test]
    fn test_elite_child_is_never_mutated() {
        let mut rng = RandomNumberGenerator::from_seed(4);
        let generation_loop = generation_loop(20);
        let crowded = Chromosome::new(vec![1, 1, 1, 1]).unwrap();
        let escape = EscapeState::new(true, 0);

        for _ in 0..20 {
            let elites = vec![crowded.clone()];
            let (child, state) = generation_loop.breed(&crowded, &crowded, &elites, 1.0, escape, &mut rng);
            assert_eq!(child, crowded);
            assert_eq!(state, escape);

            let (child, state) =
                generation_loop.breed(&crowded, &crowded, &[], 1.0, EscapeState::default(), &mut rng);
            assert_eq!(child.rows(), &[2, 1, 1, 1]);
            assert_eq!(state, EscapeState::default());
        }
    }

    #[test]
    fn test_empty_population_is_rejected() {
        let mut rng = RandomNumberGenerator::from_seed(1);
        let evaluator = FitnessEvaluator::new(5, false);
        assert!(matches!(
            generation_loop(10).evolve_generation(&[], &evaluator, 0.0, 1, false, &mut rng),
            Err(GeneticError::EmptyPopulation)
        ));
    }

    #[test]
    fn test_generation_has_no_duplicates() {
        let mut rng = RandomNumberGenerator::from_seed(5);
        let evaluator = FitnessEvaluator::new(6, false);
        let population: Vec<Chromosome> = (0..30).map(|_| Chromosome::random(6, &mut rng)).collect();
        evaluator.calculate_fitnesses(&population);

        let outcome = generation_loop(30)
            .evolve_generation(&population, &evaluator, 0.0, 1, false, &mut rng)
            .unwrap();

        // elites come from a random population that may repeat; children never do
        let children = &outcome.population[elite_count(30)..];
        let unique: HashSet<_> = children.iter().collect();
        assert_eq!(unique.len(), children.len());
    }

    #[test]
    fn test_unscored_population_is_rejected() {
        let mut rng = RandomNumberGenerator::from_seed(1);
        let evaluator = FitnessEvaluator::new(5, false);
        let population: Vec<Chromosome> = (0..10).map(|_| Chromosome::random(5, &mut rng)).collect();

        assert!(generation_loop(10)
            .evolve_generation(&population, &evaluator, 0.0, 1, false, &mut rng)
            .is_err());
    }

    #[test]
    fn test_escape_turns_on_at_interval() {
        let mut rng = RandomNumberGenerator::from_seed(9);
        let options = SolverOptions::builder()
            .population_size(20)
            .escape_interval(1)
            .escape_budget(EscapeBudget::WholePopulation)
            .build();
        let evaluator = FitnessEvaluator::new(10, false);
        let population: Vec<Chromosome> = (0..20).map(|_| Chromosome::random(10, &mut rng)).collect();
        evaluator.calculate_fitnesses(&population);

        let outcome = GenerationLoop::from_options(&options)
            .evolve_generation(&population, &evaluator, 0.0, 3, false, &mut rng)
            .unwrap();
        assert!(outcome.escape_active);
    }

    #[test]
    fn test_mutation_probability_follows_elapsed_time() {
        let mut rng = RandomNumberGenerator::from_seed(2);
        let evaluator = FitnessEvaluator::new(10, false);
        let population: Vec<Chromosome> = (0..20).map(|_| Chromosome::random(10, &mut rng)).collect();
        evaluator.calculate_fitnesses(&population);

        let outcome = generation_loop(20)
            .evolve_generation(&population, &evaluator, 10.0, 1, false, &mut rng)
            .unwrap();
        assert_eq!(outcome.mutation_probability, 0.75);
    }
}
