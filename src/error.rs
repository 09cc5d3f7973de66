//! # Error Types
//!
//! This module defines the error types used by the solver. Errors are
//! limited to bad input and bad configuration: once a run has started, the
//! search itself has no recoverable failure modes.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use queenga::error::{GeneticError, Result};
//!
//! fn board_size(n: usize) -> Result<usize> {
//!     if n == 0 {
//!         return Err(GeneticError::InvalidBoardSize(n));
//!     }
//!     Ok(n)
//! }
//!
//! assert!(board_size(0).is_err());
//! assert_eq!(board_size(8).unwrap(), 8);
//! ```
//!
//! Using the `ResultExt` trait to add context to errors:
//!
//! ```rust
//! use queenga::error::{Result, ResultExt};
//!
//! fn parse_queens(input: &str) -> Result<usize> {
//!     input.trim().parse::<usize>().context("Failed to parse number of queens")
//! }
//!
//! assert!(parse_queens("eight").is_err());
//! ```

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Represents errors that can occur while configuring or running the solver.
#[derive(Error, Debug)]
pub enum GeneticError {
    /// The requested board has no N-Queens solution or is empty.
    #[error("Invalid board size {0}: N must be 1 or at least 4")]
    InvalidBoardSize(usize),

    /// Error that occurs when an invalid configuration is provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error that occurs when the user input cannot be understood.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// A selection probability was requested for a chromosome that was never scored.
    #[error("Fitness not cached for chromosome {0}")]
    FitnessNotCached(String),

    /// The configured generation cap was reached before a solution was found.
    #[error("No solution found within {generations} generations")]
    GenerationLimit { generations: usize },

    /// Error that occurs when an I/O operation fails.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for solver operations.
pub type Result<T> = std::result::Result<T, GeneticError>;

/// Extension trait for Result to add context to errors.
///
/// The error is converted into a `GeneticError::InvalidInput` carrying the
/// context and the original message.
pub trait ResultExt<T, E> {
    /// Adds context to an error.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| GeneticError::InvalidInput(format!("{}: {}", context, e)))
    }
}

/// Extension trait for Option to convert to Result with a custom error.
///
/// ```rust
/// use queenga::error::{GeneticError, OptionExt};
///
/// fn best(scores: &[usize]) -> queenga::error::Result<usize> {
///     scores.iter().max().copied().ok_or_else_genetic(|| GeneticError::EmptyPopulation)
/// }
///
/// assert!(best(&[]).is_err());
/// ```
pub trait OptionExt<T> {
    /// Converts an Option to a Result using a closure to generate the error.
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError,
    {
        self.ok_or_else(err_fn)
    }
}
