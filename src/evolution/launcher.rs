use std::collections::HashSet;
use std::time::{Duration, Instant};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{
    challenge::Challenge, evaluator::FitnessEvaluator, generation::GenerationLoop,
    options::SolverOptions,
};
use crate::{
    chromosome::Chromosome,
    error::{GeneticError, OptionExt, Result},
    rng::RandomNumberGenerator,
};

/// The outcome of one independent run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RunReport {
    /// 1-based index of the run.
    pub run: usize,
    /// Generations evolved before a solution appeared; zero if the initial population held one.
    pub generations: usize,
    /// The first perfect chromosome of the final population.
    pub solution: Chromosome,
    pub fitness: usize,
    /// Every distinct perfect chromosome of the final population.
    pub solutions: Vec<Chromosome>,
    pub elapsed: Duration,
}

/// Wall-clock durations of the runs completed so far.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunStatistics {
    durations: Vec<Duration>,
}

impl RunStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, elapsed: Duration) {
        self.durations.push(elapsed);
    }

    pub fn completed_runs(&self) -> usize {
        self.durations.len()
    }

    pub fn durations(&self) -> &[Duration] {
        &self.durations
    }

    pub fn total(&self) -> Duration {
        self.durations.iter().sum()
    }

    /// Mean duration over the completed runs, `None` before the first one.
    pub fn average(&self) -> Option<Duration> {
        if self.durations.is_empty() {
            return None;
        }
        Some(self.total().div_f64(self.durations.len() as f64))
    }
}

/// Receives run results as the launcher produces them.
///
/// All methods default to doing nothing.
pub trait RunReporter {
    fn run_started(&mut self, _run: usize, _max_fitness: usize) {}

    fn run_finished(&mut self, _report: &RunReport, _statistics: &RunStatistics) {}

    fn finished(&mut self, _statistics: &RunStatistics) {}
}

/// A reporter that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl RunReporter for SilentReporter {}

/// Rejects board sizes without a solution and populations the board cannot fill.
///
/// Boards of size 2 and 3 admit no placement at all, so a search on them would
/// never end. A generation never holds the same chromosome twice, so the
/// population cannot be larger than the `N^N` distinct boards.
pub fn validate_board_size(n: usize, population_size: usize) -> Result<()> {
    if matches!(n, 0 | 2 | 3) {
        return Err(GeneticError::InvalidBoardSize(n));
    }
    if n == 1 {
        // every one-queen board is already solved, so no generation is ever bred
        return Ok(());
    }
    let distinct_boards = u32::try_from(n).ok().and_then(|exp| n.checked_pow(exp));
    if let Some(boards) = distinct_boards {
        if boards < population_size {
            return Err(GeneticError::Configuration(format!(
                "A {0}x{0} board has only {1} distinct placements, fewer than the population size {2}",
                n, boards, population_size
            )));
        }
    }
    Ok(())
}

/// Runs the genetic search, once or many times.
#[derive(Debug, Clone)]
pub struct SolverLauncher {
    options: SolverOptions,
    generation_loop: GenerationLoop,
}

impl SolverLauncher {
    /// Creates a launcher after validating `options`.
    pub fn new(options: SolverOptions) -> Result<Self> {
        options.validate()?;
        let generation_loop = GenerationLoop::from_options(&options);
        Ok(Self {
            options,
            generation_loop,
        })
    }

    pub fn options(&self) -> &SolverOptions {
        &self.options
    }

    /// Runs the search once on an `n`-queens board and returns the solution.
    pub fn solve(&self, n: usize) -> Result<Chromosome> {
        validate_board_size(n, self.options.get_population_size())?;
        let evaluator = FitnessEvaluator::new(n, self.options.is_parallel());
        let mut rng = RandomNumberGenerator::from_optional_seed(self.options.get_seed());
        self.run(n, 1, &evaluator, &mut rng)
            .map(|report| report.solution)
    }

    /// Runs the configured number of independent runs back to back.
    ///
    /// The fitness cache is cleared before every run when the options ask for it.
    pub fn launch<R>(&self, n: usize, reporter: &mut R) -> Result<RunStatistics>
    where
        R: RunReporter + ?Sized,
    {
        validate_board_size(n, self.options.get_population_size())?;
        let evaluator = FitnessEvaluator::new(n, self.options.is_parallel());
        let mut rng = RandomNumberGenerator::from_optional_seed(self.options.get_seed());
        let mut statistics = RunStatistics::new();

        for run in 1..=self.options.get_num_runs() {
            if self.options.resets_cache_between_runs() {
                evaluator.reset();
            }
            reporter.run_started(run, evaluator.max_fitness());

            let report = self.run(n, run, &evaluator, &mut rng)?;
            statistics.record(report.elapsed);
            reporter.run_finished(&report, &statistics);
        }

        reporter.finished(&statistics);
        Ok(statistics)
    }

    /// Performs a single run with the given evaluator and random source.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::GenerationLimit` when `max_generations` is set and
    /// reached without a solution.
    pub fn run<C>(
        &self,
        n: usize,
        run: usize,
        evaluator: &FitnessEvaluator<C>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<RunReport>
    where
        C: Challenge<Chromosome> + Send + Sync,
    {
        let max_fitness = evaluator.max_fitness();
        let verbosity = self.options.get_verbosity();
        let start = Instant::now();
        info!(run, n, max_fitness, "Starting run");

        let mut population: Vec<Chromosome> = (0..self.generation_loop.population_size())
            .map(|_| Chromosome::random(n, rng))
            .collect();
        let mut fitnesses = evaluator.calculate_fitnesses(&population);
        let mut best = best_of(&fitnesses)?;

        let mut generation = 0;
        let mut mutation_probability = self.options.get_base_mutation_probability();

        while best != max_fitness {
            if let Some(limit) = self.options.get_max_generations() {
                if generation >= limit {
                    return Err(GeneticError::GenerationLimit {
                        generations: generation,
                    });
                }
            }
            generation += 1;

            let elapsed = start.elapsed().as_secs_f64();
            if verbosity.generations {
                info!(
                    "Current Generation: {}, Current Max Fitness: {}, Current Runtime: {:.2}, Mutation Probability: {:.2}%",
                    generation,
                    best,
                    elapsed,
                    mutation_probability * 100.0
                );
            }

            let outcome = self.generation_loop.evolve_generation(
                &population,
                evaluator,
                elapsed,
                generation,
                false,
                rng,
            )?;
            if outcome.escape_active {
                debug!(generation, "Generation ended in escape mode");
            }
            mutation_probability = outcome.mutation_probability;
            population = outcome.population;

            fitnesses = evaluator.calculate_fitnesses(&population);
            best = best_of(&fitnesses)?;
            if verbosity.chromosomes {
                debug!("Maximum Fitness = {}", best);
            }
        }

        let elapsed = start.elapsed();
        let mut seen = HashSet::new();
        let solutions: Vec<Chromosome> = population
            .iter()
            .zip(&fitnesses)
            .filter(|&(chromosome, &fitness)| fitness == max_fitness && seen.insert(chromosome))
            .map(|(chromosome, _)| chromosome.clone())
            .collect();
        let solution = solutions
            .first()
            .cloned()
            .ok_or_else_genetic(|| GeneticError::EmptyPopulation)?;

        info!(
            run,
            generations = generation,
            elapsed_secs = elapsed.as_secs_f64(),
            "Solved in Generation {}!",
            generation
        );

        Ok(RunReport {
            run,
            generations: generation,
            solution,
            fitness: max_fitness,
            solutions,
            elapsed,
        })
    }
}

fn best_of(fitnesses: &[usize]) -> Result<usize> {
    fitnesses
        .iter()
        .max()
        .copied()
        .ok_or_else_genetic(|| GeneticError::EmptyPopulation)
}
