use crate::chromosome::Chromosome;
use crate::rng::RandomNumberGenerator;

/// Single-point crossover with a random cut in `[0, N - 1]`.
///
/// The child takes `x` up to the cut and `y` from the cut on. A cut of zero
/// yields a copy of `y`.
///
/// # Panics
///
/// Panics if the parents have different lengths.
pub fn reproduce(x: &Chromosome, y: &Chromosome, rng: &mut RandomNumberGenerator) -> Chromosome {
    let cut = rng.gen_index(x.len());
    reproduce_at(x, y, cut)
}

/// Single-point crossover at a fixed cut: `x[0..cut] ++ y[cut..N]`.
pub fn reproduce_at(x: &Chromosome, y: &Chromosome, cut: usize) -> Chromosome {
    assert_eq!(x.len(), y.len(), "parents must describe the same board");
    let rows = x.rows()[..cut]
        .iter()
        .chain(&y.rows()[cut..])
        .copied()
        .collect();
    Chromosome::from_rows(rows)
}
