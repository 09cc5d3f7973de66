use std::time::Duration;

use queenga::{
    board::Board,
    chromosome::{max_fitness, Chromosome},
    error::GeneticError,
    evolution::{
        EscapeBudget, QueensChallenge, Challenge, RunReport, RunReporter, RunStatistics,
        SilentReporter, SolverLauncher, SolverOptions,
    },
};

#[derive(Default)]
struct RecordingReporter {
    started: Vec<(usize, usize)>,
    reports: Vec<RunReport>,
    running_averages: Vec<Option<Duration>>,
    finished_runs: Option<usize>,
}

impl RunReporter for RecordingReporter {
    fn run_started(&mut self, run: usize, max_fitness: usize) {
        self.started.push((run, max_fitness));
    }

    fn run_finished(&mut self, report: &RunReport, statistics: &RunStatistics) {
        assert_eq!(statistics.completed_runs(), report.run);
        self.reports.push(report.clone());
        self.running_averages.push(statistics.average());
    }

    fn finished(&mut self, statistics: &RunStatistics) {
        self.finished_runs = Some(statistics.completed_runs());
    }
}

fn assert_is_solution(solution: &Chromosome, n: usize) {
    assert_eq!(solution.len(), n);
    assert_eq!(solution.pairwise_collisions(), 0);
    assert_eq!(QueensChallenge::new(n).score(solution), max_fitness(n));
}

#[test]
fn test_four_queens_converges() {
    let options = SolverOptions::builder()
        .num_runs(1)
        .seed(2024)
        .max_generations(10_000)
        .build();
    let launcher = SolverLauncher::new(options).unwrap();

    let solution = launcher.solve(4).unwrap();
    assert_is_solution(&solution, 4);
    assert!(solution.rows() == [2, 4, 1, 3] || solution.rows() == [3, 1, 4, 2]);
}

#[test]
fn test_eight_queens_converges() {
    let options = SolverOptions::builder()
        .seed(8)
        .base_mutation_probability(0.3)
        .max_generations(10_000)
        .build();
    let launcher = SolverLauncher::new(options).unwrap();

    let solution = launcher.solve(8).unwrap();
    assert_is_solution(&solution, 8);
}

#[test]
fn test_parallel_evaluation_converges() {
    let options = SolverOptions::builder()
        .parallel(true)
        .seed(17)
        .max_generations(10_000)
        .build();
    let launcher = SolverLauncher::new(options).unwrap();

    assert_is_solution(&launcher.solve(6).unwrap(), 6);
}

#[test]
fn test_whole_population_escape_converges() {
    let options = SolverOptions::builder()
        .escape_budget(EscapeBudget::WholePopulation)
        .escape_interval(5)
        .seed(5)
        .max_generations(10_000)
        .build();
    let launcher = SolverLauncher::new(options).unwrap();

    assert_is_solution(&launcher.solve(5).unwrap(), 5);
}

#[test]
fn test_launch_reports_every_run() {
    let options = SolverOptions::builder()
        .num_runs(3)
        .seed(77)
        .max_generations(10_000)
        .build();
    let launcher = SolverLauncher::new(options).unwrap();
    let mut reporter = RecordingReporter::default();

    let statistics = launcher.launch(5, &mut reporter).unwrap();

    assert_eq!(statistics.completed_runs(), 3);
    assert_eq!(reporter.started, vec![(1, 10), (2, 10), (3, 10)]);
    assert_eq!(reporter.finished_runs, Some(3));
    for (i, report) in reporter.reports.iter().enumerate() {
        assert_eq!(report.run, i + 1);
        assert_eq!(report.fitness, 10);
        assert_is_solution(&report.solution, 5);
        assert_eq!(report.solutions.first(), Some(&report.solution));
        assert!(report.solutions.iter().all(|s| s.pairwise_collisions() == 0));

        let board = Board::from(&report.solution);
        for line in 0..5 {
            assert_eq!(board.queens_in_line(line), 1);
            assert_eq!(board.queens_in_column(line), 1);
        }
    }
    assert!(statistics.average().is_some());

    assert_eq!(reporter.running_averages.len(), 3);
    for (i, average) in reporter.running_averages.iter().enumerate() {
        let elapsed: Duration = reporter.reports[..=i].iter().map(|r| r.elapsed).sum();
        assert_eq!(*average, Some(elapsed.div_f64((i + 1) as f64)));
    }
    assert_eq!(reporter.running_averages.last().copied().flatten(), statistics.average());
}

#[test]
fn test_cache_can_persist_between_runs() {
    let options = SolverOptions::builder()
        .num_runs(2)
        .reset_cache_between_runs(false)
        .seed(4)
        .max_generations(10_000)
        .build();
    let launcher = SolverLauncher::new(options).unwrap();

    let statistics = launcher.launch(4, &mut SilentReporter).unwrap();
    assert_eq!(statistics.completed_runs(), 2);
}

#[test]
fn test_unsolvable_sizes_fail_fast() {
    let launcher = SolverLauncher::new(SolverOptions::default()).unwrap();
    for n in [0, 2, 3] {
        assert!(matches!(
            launcher.solve(n),
            Err(GeneticError::InvalidBoardSize(size)) if size == n
        ));
        assert!(launcher.launch(n, &mut SilentReporter).is_err());
    }
}

#[test]
fn test_single_queen() {
    let launcher = SolverLauncher::new(SolverOptions::builder().seed(1).build()).unwrap();
    let mut reporter = RecordingReporter::default();
    launcher.launch(1, &mut reporter).unwrap();

    assert_eq!(reporter.reports.len(), 5);
    for report in &reporter.reports {
        assert_eq!(report.generations, 0);
        assert_eq!(report.solution.rows(), &[1]);
        assert_eq!(report.solutions.len(), 1);
    }
}
