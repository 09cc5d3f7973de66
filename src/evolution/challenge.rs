use crate::chromosome::{max_fitness, Chromosome};

/// Scores a candidate. Higher is better.
pub trait Challenge<P> {
    fn score(&self, phenotype: &P) -> usize;
}

/// The N-Queens fitness: the number of queen pairs that do not collide.
///
/// A collision is either an extra queen sharing a row (counted once per queen
/// beyond the first in that row) or a pair of queens on a shared diagonal.
/// A board without collisions scores [`max_fitness`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueensChallenge {
    n: usize,
    max_fitness: usize,
}

impl QueensChallenge {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            max_fitness: max_fitness(n),
        }
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn max_fitness(&self) -> usize {
        self.max_fitness
    }
}

impl Challenge<Chromosome> for QueensChallenge {
    fn score(&self, phenotype: &Chromosome) -> usize {
        let collisions = phenotype.vertical_collisions() + phenotype.diagonal_collisions();
        // Row excess and diagonal pairs never exceed the number of pairs.
        self.max_fitness.saturating_sub(collisions)
    }
}
