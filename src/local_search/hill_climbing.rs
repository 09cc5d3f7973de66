use crate::chromosome::Chromosome;

/// Greedy single-queen relocation.
///
/// Finds the most attacked queen (the first one on ties) and moves it to the
/// row that leaves the board with the fewest colliding pairs. Ties go to the
/// lowest row, which may be the queen's current row.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueenRelocation;

impl QueenRelocation {
    pub fn new() -> Self {
        Self
    }

    /// Returns the relocated copy of `chromosome`.
    pub fn relocate(&self, chromosome: &Chromosome) -> Chromosome {
        if chromosome.is_empty() {
            return chromosome.clone();
        }
        let column = most_attacked_column(chromosome);
        let row = best_row(chromosome, column);
        chromosome.with_row(column, row)
    }
}

/// Index of the queen attacked by the most other queens, first on ties.
pub fn most_attacked_column(chromosome: &Chromosome) -> usize {
    let counts = chromosome.attack_counts();
    let mut best = 0;
    for (column, &count) in counts.iter().enumerate() {
        if count > counts[best] {
            best = column;
        }
    }
    best
}

/// Row for `column` that minimizes the board's colliding pairs, lowest on ties.
///
/// Only pairs involving `column` change between candidates, so comparing the
/// column's own conflicts ranks candidates exactly as the board totals would.
pub fn best_row(chromosome: &Chromosome, column: usize) -> usize {
    let mut best_row = chromosome.row(column);
    let mut fewest = usize::MAX;
    for row in 1..=chromosome.len() {
        let conflicts = chromosome.conflicts_at(column, row);
        if conflicts < fewest {
            fewest = conflicts;
            best_row = row;
        }
    }
    best_row
}
