//! # Breeding
//!
//! Recombination of two parent chromosomes into a child.
pub mod crossover;

pub use crossover::{reproduce, reproduce_at};
