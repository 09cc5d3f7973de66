use queenga::{
    breeding::reproduce,
    chromosome::Chromosome,
    evolution::EscapeBudget,
    local_search::{best_row, most_attacked_column, shake, EscapeState, Mutation, QueenRelocation},
    rng::RandomNumberGenerator,
};

#[test]
fn test_crossover_takes_prefix_and_suffix() {
    let mut rng = RandomNumberGenerator::from_seed(10);
    for _ in 0..300 {
        let x = Chromosome::random(8, &mut rng);
        let y = Chromosome::random(8, &mut rng);
        let child = reproduce(&x, &y, &mut rng);

        assert_eq!(child.len(), 8);
        // some cut explains the whole child
        let explained = (0..8).any(|cut| {
            (0..8).all(|i| {
                let parent = if i < cut { &x } else { &y };
                child.row(i) == parent.row(i)
            })
        });
        assert!(explained, "{} is not a crossover of {} and {}", child, x, y);
    }
}

#[test]
fn test_relocation_picks_a_global_minimum_row() {
    let mut rng = RandomNumberGenerator::from_seed(20);
    for _ in 0..300 {
        let chromosome = Chromosome::random(7, &mut rng);
        let column = most_attacked_column(&chromosome);
        let chosen = best_row(&chromosome, column);

        let totals: Vec<usize> = (1..=7)
            .map(|row| chromosome.with_row(column, row).pairwise_collisions())
            .collect();
        let minimum = *totals.iter().min().unwrap();
        assert_eq!(totals[chosen - 1], minimum);
        // lowest row among the minima
        assert_eq!(totals.iter().position(|&t| t == minimum).unwrap() + 1, chosen);

        let relocated = QueenRelocation::new().relocate(&chromosome);
        assert!(relocated.pairwise_collisions() <= chromosome.pairwise_collisions());
    }
}

#[test]
fn test_relocation_targets_most_attacked_queen() {
    let mut rng = RandomNumberGenerator::from_seed(30);
    for _ in 0..100 {
        let chromosome = Chromosome::random(6, &mut rng);
        let counts = chromosome.attack_counts();
        let column = most_attacked_column(&chromosome);
        assert_eq!(counts[column], *counts.iter().max().unwrap());
        assert!(counts[..column].iter().all(|&c| c < counts[column]));

        let relocated = QueenRelocation::new().relocate(&chromosome);
        for i in (0..6).filter(|&i| i != column) {
            assert_eq!(relocated.row(i), chromosome.row(i));
        }
    }
}

#[test]
fn test_escape_mutation_changes_one_column() {
    let mut rng = RandomNumberGenerator::from_seed(40);
    let mutation = Mutation::new(EscapeBudget::Limited(15));
    for _ in 0..300 {
        let chromosome = Chromosome::random(8, &mut rng);
        let (child, state) = mutation.mutate(&chromosome, EscapeState::new(true, 0), &mut rng);
        let changed = (0..8).filter(|&i| child.row(i) != chromosome.row(i)).count();
        assert_eq!(changed, 1);
        assert_eq!(state, EscapeState::new(true, 1));
    }
}

#[test]
fn test_shake_leaves_input_untouched() {
    let mut rng = RandomNumberGenerator::from_seed(50);
    let chromosome = Chromosome::new(vec![1, 2, 3, 4]).unwrap();
    let _ = shake(&chromosome, &mut rng);
    assert_eq!(chromosome.rows(), &[1, 2, 3, 4]);
}
