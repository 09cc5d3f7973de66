//! # Board rendering
//!
//! Renders a chromosome as an ASCII board: `Q` marks a queen, `x` an empty
//! square, cells are separated by single spaces and each board row is one line.
//! The top printed line is board row `N`, so a queen in row `r` lands on printed
//! line `N - r`.
//!
//! ```rust
//! use queenga::board::Board;
//! use queenga::chromosome::Chromosome;
//!
//! let solution = Chromosome::new(vec![2, 4, 1, 3]).unwrap();
//! let board = Board::from(&solution);
//! assert_eq!(board.to_string(), "x Q x x\nx x x Q\nQ x x x\nx x Q x");
//! ```

use std::fmt;

use crate::chromosome::Chromosome;

const QUEEN: char = 'Q';
const EMPTY: char = 'x';

/// A square grid of cells, top line first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: Vec<Vec<char>>,
}

impl Board {
    /// The grid, top line first.
    pub fn cells(&self) -> &[Vec<char>] {
        &self.cells
    }

    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Queens on printed line `line`.
    pub fn queens_in_line(&self, line: usize) -> usize {
        self.cells[line].iter().filter(|&&c| c == QUEEN).count()
    }

    /// Queens in column `column`.
    pub fn queens_in_column(&self, column: usize) -> usize {
        self.cells.iter().filter(|line| line[column] == QUEEN).count()
    }
}

impl From<&Chromosome> for Board {
    fn from(chromosome: &Chromosome) -> Self {
        let n = chromosome.len();
        let mut cells = vec![vec![EMPTY; n]; n];
        for (column, &row) in chromosome.rows().iter().enumerate() {
            cells[n - row][column] = QUEEN;
        }
        Self { cells }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, cell) in line.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", cell)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_queen_per_line_and_column() {
        let solution = Chromosome::new(vec![2, 4, 1, 3]).unwrap();
        let board = Board::from(&solution);

        assert_eq!(board.size(), 4);
        for i in 0..4 {
            assert_eq!(board.queens_in_line(i), 1);
            assert_eq!(board.queens_in_column(i), 1);
        }
    }

    #[test]
    fn test_queen_positions_follow_rows() {
        let chromosome = Chromosome::new(vec![2, 4, 1, 3]).unwrap();
        let board = Board::from(&chromosome);
        for (column, &row) in chromosome.rows().iter().enumerate() {
            assert_eq!(board.cells()[4 - row][column], 'Q');
        }
    }

    #[test]
    fn test_shared_row_renders_on_one_line() {
        let board = Board::from(&Chromosome::new(vec![1, 1, 1]).unwrap());
        assert_eq!(board.to_string(), "x x x\nx x x\nQ Q Q");
    }
}
