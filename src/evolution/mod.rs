pub mod challenge;
pub mod controller;
pub mod evaluator;
pub mod generation;
pub mod launcher;
pub mod options;

pub use challenge::{Challenge, QueensChallenge};
pub use controller::AdaptiveController;
pub use evaluator::FitnessEvaluator;
pub use generation::{elite_count, GenerationLoop, GenerationOutcome};
pub use launcher::{
    validate_board_size, RunReport, RunReporter, RunStatistics, SilentReporter, SolverLauncher,
};
pub use options::{EscapeBudget, SolverOptions, Verbosity};
