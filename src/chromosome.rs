//! # Chromosome
//!
//! A `Chromosome` encodes one candidate board: the value at index `i` is the
//! 1-based row of the queen standing in column `i`. Rows may repeat; a repeated
//! row is legal and simply costs fitness.
//!
//! Chromosomes are values. Equality and hashing are structural over the row
//! sequence, which is what the fitness cache and the population deduplication
//! rely on. Operators never modify a chromosome in place; they build a new one.
//!
//! ## Example
//!
//! ```rust
//! use queenga::chromosome::Chromosome;
//!
//! let solution = Chromosome::new(vec![2, 4, 1, 3]).unwrap();
//! assert_eq!(solution.pairwise_collisions(), 0);
//! assert_eq!(solution.to_string(), "[2, 4, 1, 3]");
//! ```

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::caching::CacheKey;
use crate::error::{GeneticError, Result};
use crate::rng::RandomNumberGenerator;

/// Number of distinct queen pairs on an `n`-queens board.
///
/// This is the fitness of a board with no collisions at all.
pub fn max_fitness(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// One candidate board, one row value per column.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<usize>", into = "Vec<usize>"))]
pub struct Chromosome {
    rows: Vec<usize>,
}

impl Chromosome {
    /// Creates a chromosome from explicit row values.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::InvalidInput` when the sequence is empty or any row
    /// lies outside `[1, N]`, where `N` is the sequence length.
    pub fn new(rows: Vec<usize>) -> Result<Self> {
        let n = rows.len();
        if n == 0 {
            return Err(GeneticError::InvalidInput(
                "Chromosome must hold at least one queen".to_string(),
            ));
        }
        if let Some((column, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, &row)| row == 0 || row > n)
        {
            return Err(GeneticError::InvalidInput(format!(
                "Row {} in column {} is outside 1..={}",
                row, column, n
            )));
        }
        Ok(Self { rows })
    }

    /// Builds a chromosome from rows already known to be on the board.
    pub(crate) fn from_rows(rows: Vec<usize>) -> Self {
        debug_assert!(rows.iter().all(|&row| (1..=rows.len()).contains(&row)));
        Self { rows }
    }

    /// Returns `n` independent uniformly random rows in `[1, n]`.
    pub fn random(n: usize, rng: &mut RandomNumberGenerator) -> Self {
        Self {
            rows: (0..n).map(|_| rng.gen_row(n)).collect(),
        }
    }

    /// The row values, indexed by column.
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    /// Board dimension.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The row of the queen in `column`.
    pub fn row(&self, column: usize) -> usize {
        self.rows[column]
    }

    /// Returns a copy of this chromosome with `column` moved to `row`.
    pub fn with_row(&self, column: usize, row: usize) -> Self {
        let mut rows = self.rows.clone();
        rows[column] = row;
        Self::from_rows(rows)
    }

    /// Queens beyond the first in every row.
    pub fn vertical_collisions(&self) -> usize {
        let mut counts = vec![0usize; self.rows.len()];
        for &row in &self.rows {
            counts[row - 1] += 1;
        }
        counts.iter().filter(|&&c| c > 1).map(|c| c - 1).sum()
    }

    /// Unordered column pairs that share a diagonal.
    pub fn diagonal_collisions(&self) -> usize {
        let n = self.rows.len();
        (0..n)
            .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
            .filter(|&(i, j)| on_diagonal(i, self.rows[i], j, self.rows[j]))
            .count()
    }

    /// Whether the queens of columns `i` and `j` attack each other.
    pub fn attacks(&self, i: usize, j: usize) -> bool {
        i != j && attack(i, self.rows[i], j, self.rows[j])
    }

    /// For every column, how many other columns attack it.
    pub fn attack_counts(&self) -> Vec<usize> {
        (0..self.rows.len())
            .map(|column| self.conflicts_at(column, self.rows[column]))
            .collect()
    }

    /// Unordered column pairs that share a row or a diagonal.
    pub fn pairwise_collisions(&self) -> usize {
        let n = self.rows.len();
        (0..n)
            .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
            .filter(|&(i, j)| self.attacks(i, j))
            .count()
    }

    /// How many other columns would attack a queen placed at `row` in `column`.
    pub fn conflicts_at(&self, column: usize, row: usize) -> usize {
        self.rows
            .iter()
            .enumerate()
            .filter(|&(other, &other_row)| other != column && attack(column, row, other, other_row))
            .count()
    }
}

fn on_diagonal(i: usize, row_i: usize, j: usize, row_j: usize) -> bool {
    i.abs_diff(j) == row_i.abs_diff(row_j)
}

fn attack(i: usize, row_i: usize, j: usize, row_j: usize) -> bool {
    row_i == row_j || on_diagonal(i, row_i, j, row_j)
}

impl CacheKey for Chromosome {
    type Key = Chromosome;

    fn cache_key(&self) -> Self::Key {
        self.clone()
    }
}

impl AsRef<[usize]> for Chromosome {
    fn as_ref(&self) -> &[usize] {
        &self.rows
    }
}

impl TryFrom<Vec<usize>> for Chromosome {
    type Error = GeneticError;

    fn try_from(rows: Vec<usize>) -> Result<Self> {
        Self::new(rows)
    }
}

impl From<Chromosome> for Vec<usize> {
    fn from(chromosome: Chromosome) -> Self {
        chromosome.rows
    }
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", row)?;
        }
        write!(f, "]")
    }
}
