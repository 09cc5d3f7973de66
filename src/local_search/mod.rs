//! # Mutation
//!
//! Mutation in this solver is local search rather than random noise. In its
//! normal mode it relocates the most attacked queen to its best row
//! ([`QueenRelocation`]). When the adaptive controller switches on escape mode,
//! it instead shakes the board by moving one random queen to a random row
//! ([`shake`]), which lets a stagnating population leave a local optimum.
//!
//! Escape mode is bounded by an [`EscapeBudget`]: each escape mutation bumps a
//! counter, and once the counter passes the budget the next escape mutation
//! switches the mode off.

pub mod escape;
pub mod hill_climbing;

use tracing::debug;

use crate::chromosome::Chromosome;
use crate::evolution::options::EscapeBudget;
use crate::rng::RandomNumberGenerator;

pub use escape::shake;
pub use hill_climbing::{best_row, most_attacked_column, QueenRelocation};

/// Escape mode flag and the number of escape mutations performed so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EscapeState {
    pub active: bool,
    pub counter: usize,
}

impl EscapeState {
    pub fn new(active: bool, counter: usize) -> Self {
        Self { active, counter }
    }
}

/// Applies escape or hill-climbing mutation depending on the escape state.
#[derive(Debug, Clone)]
pub struct Mutation {
    budget: EscapeBudget,
    relocation: QueenRelocation,
    log_escapes: bool,
}

impl Mutation {
    pub fn new(budget: EscapeBudget) -> Self {
        Self {
            budget,
            relocation: QueenRelocation::new(),
            log_escapes: false,
        }
    }

    /// Emits a debug event for every escape mutation.
    pub fn with_escape_logging(mut self, log_escapes: bool) -> Self {
        self.log_escapes = log_escapes;
        self
    }

    pub fn budget(&self) -> EscapeBudget {
        self.budget
    }

    /// Returns the mutated copy of `chromosome` and the updated escape state.
    pub fn mutate(
        &self,
        chromosome: &Chromosome,
        state: EscapeState,
        rng: &mut RandomNumberGenerator,
    ) -> (Chromosome, EscapeState) {
        if !state.active {
            return (self.relocation.relocate(chromosome), state);
        }

        let shaken = shake(chromosome, rng);
        if self.log_escapes {
            debug!(counter = state.counter, "Escape triggered, shaking {}", chromosome);
        }

        let next = match self.budget {
            EscapeBudget::Limited(amount) if state.counter > amount => EscapeState::new(false, state.counter),
            _ => EscapeState::new(true, state.counter + 1),
        };
        (shaken, next)
    }
}
