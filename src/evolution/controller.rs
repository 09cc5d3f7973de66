use super::options::{EscapeBudget, SolverOptions};
use crate::local_search::EscapeState;

/// Per-offspring search parameters.
///
/// The mutation probability ramps quadratically with the wall-clock time the
/// current run has spent, from the base probability up to the maximum, where it
/// stays. Escape mode is switched on every `escape_interval` generations as long
/// as the escape budget is not used up.
#[derive(Debug, Clone, PartialEq)]
pub struct AdaptiveController {
    base_mutation_probability: f64,
    max_mutation_probability: f64,
    escape_budget: EscapeBudget,
    escape_interval: usize,
}

impl AdaptiveController {
    pub fn new(
        base_mutation_probability: f64,
        max_mutation_probability: f64,
        escape_budget: EscapeBudget,
        escape_interval: usize,
    ) -> Self {
        Self {
            base_mutation_probability,
            max_mutation_probability,
            escape_budget,
            escape_interval,
        }
    }

    pub fn from_options(options: &SolverOptions) -> Self {
        Self::new(
            options.get_base_mutation_probability(),
            options.get_max_mutation_probability(),
            options.get_escape_budget(),
            options.get_escape_interval(),
        )
    }

    pub fn base_mutation_probability(&self) -> f64 {
        self.base_mutation_probability
    }

    /// Returns the escape flag and mutation probability to use for the next offspring.
    pub fn calculate_parameters(
        &self,
        elapsed_seconds: f64,
        generation: usize,
        escape: EscapeState,
        mutation_probability: f64,
    ) -> (bool, f64) {
        let escape_active = escape.active || self.triggers_escape(generation, escape.counter);

        let mutation_probability = if mutation_probability >= self.max_mutation_probability {
            self.max_mutation_probability
        } else {
            let spread = self.max_mutation_probability - self.base_mutation_probability;
            (self.base_mutation_probability + spread * elapsed_seconds.powi(2))
                .min(self.max_mutation_probability)
        };

        (escape_active, mutation_probability)
    }

    fn triggers_escape(&self, generation: usize, counter: usize) -> bool {
        if generation % self.escape_interval != 0 {
            return false;
        }
        match self.escape_budget {
            EscapeBudget::Limited(amount) => counter < amount + 1,
            EscapeBudget::WholePopulation => true,
        }
    }
}
