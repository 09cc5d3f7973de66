use crate::chromosome::Chromosome;
use crate::rng::RandomNumberGenerator;

/// Moves one random queen to a different random row, ignoring fitness.
///
/// The new row is drawn from the `N - 1` rows other than the current one, so
/// exactly one gene changes. A one-queen board has nowhere to go and is
/// returned unchanged.
pub fn shake(chromosome: &Chromosome, rng: &mut RandomNumberGenerator) -> Chromosome {
    let n = chromosome.len();
    if n < 2 {
        return chromosome.clone();
    }
    let column = rng.gen_index(n);
    let current = chromosome.row(column);
    let mut row = rng.gen_row(n - 1);
    if row >= current {
        row += 1;
    }
    chromosome.with_row(column, row)
}
