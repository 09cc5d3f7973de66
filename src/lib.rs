pub mod board;
pub mod breeding;
pub mod caching;
pub mod chromosome;
pub mod error;
pub mod evolution;
pub mod local_search;
pub mod rng;
pub mod selection;

// Re-export commonly used types for convenience
pub use chromosome::{max_fitness, Chromosome};
pub use error::{GeneticError, OptionExt, Result, ResultExt};
pub use evolution::{SolverLauncher, SolverOptions};
