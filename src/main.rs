//! queenga - N-Queens by genetic search
//!
//! Reads the number of queens (from the command line or, failing that, from
//! stdin), runs the configured number of independent searches, and prints each
//! solution as a board followed by the timing summary.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, Level};

use queenga::board::Board;
use queenga::error::{Result, ResultExt};
use queenga::evolution::{
    EscapeBudget, RunReport, RunReporter, RunStatistics, SolverLauncher, SolverOptions, Verbosity,
};

#[derive(Parser, Debug)]
#[command(name = "queenga")]
#[command(version)]
#[command(about = "Solve the N-Queens problem with a genetic algorithm")]
struct Cli {
    /// Number of queens; prompted for when omitted
    n: Option<usize>,

    /// Number of independent runs
    #[arg(short, long, default_value = "5")]
    runs: usize,

    /// Chromosomes per generation
    #[arg(short, long, default_value = "75")]
    population: usize,

    /// Evaluate fitness batches on a thread pool
    #[arg(long)]
    parallel: bool,

    /// Mutation probability at the start of a run
    #[arg(long, default_value = "0.05")]
    base_mutation: f64,

    /// Ceiling of the mutation probability ramp
    #[arg(long, default_value = "0.75")]
    max_mutation: f64,

    /// Escape mutations per escape phase; -1 shakes the rest of the generation
    #[arg(long, default_value = "15", allow_negative_numbers = true)]
    escape_amount: i64,

    /// Trigger escape mode every this many generations
    #[arg(long, default_value = "200")]
    escape_interval: usize,

    /// Keep the fitness cache between runs
    #[arg(long)]
    keep_cache: bool,

    /// Give up a run after this many generations
    #[arg(long)]
    max_generations: Option<usize>,

    /// Seed for reproducible runs
    #[arg(short, long)]
    seed: Option<u64>,

    /// Log every produced chromosome
    #[arg(long)]
    print_chromosomes: bool,

    /// Log one line per generation
    #[arg(long)]
    print_generations: bool,

    /// Log escape mutations
    #[arg(long)]
    print_escapes: bool,

    /// Show debug events
    #[arg(short, long)]
    verbose: bool,

    /// Show trace events
    #[arg(long)]
    trace: bool,
}

impl Cli {
    fn options(&self) -> Result<SolverOptions> {
        let mut builder = SolverOptions::builder()
            .num_runs(self.runs)
            .population_size(self.population)
            .parallel(self.parallel)
            .base_mutation_probability(self.base_mutation)
            .max_mutation_probability(self.max_mutation)
            .escape_budget(EscapeBudget::from_amount(self.escape_amount)?)
            .escape_interval(self.escape_interval)
            .reset_cache_between_runs(!self.keep_cache)
            .verbosity(Verbosity {
                chromosomes: self.print_chromosomes,
                generations: self.print_generations,
                escapes: self.print_escapes,
            });
        if let Some(limit) = self.max_generations {
            builder = builder.max_generations(limit);
        }
        if let Some(seed) = self.seed {
            builder = builder.seed(seed);
        }
        Ok(builder.build())
    }

    fn log_level(&self) -> Level {
        if self.trace {
            Level::TRACE
        } else if self.verbose || self.print_chromosomes || self.print_escapes {
            Level::DEBUG
        } else {
            Level::INFO
        }
    }
}

/// Prints results to stdout.
struct ConsoleReporter {
    num_runs: usize,
}

impl RunReporter for ConsoleReporter {
    fn run_started(&mut self, _run: usize, max_fitness: usize) {
        println!("\n---------------------------------------------");
        println!("\nMaximum fitness = {}", max_fitness);
    }

    fn run_finished(&mut self, report: &RunReport, statistics: &RunStatistics) {
        println!("Solved in Generation {}!", report.generations);
        println!("\nOne of the solutions: ");
        for solution in &report.solutions {
            println!("Chromosome = {},  Fitness = {}", solution, report.fitness);
        }
        println!("\n{}", Board::from(&report.solution));
        println!("\nTotal runtime: {:.2} seconds", report.elapsed.as_secs_f64());
        if let Some(average) = statistics.average() {
            println!(
                "Average runtime after {} runs: {:.2} seconds",
                statistics.completed_runs(),
                average.as_secs_f64()
            );
        }
    }

    fn finished(&mut self, statistics: &RunStatistics) {
        let average = statistics.average().unwrap_or_default();
        println!("\n---------------------------------\n");
        println!(
            "Average Runtime over {} runs: {:.2} seconds",
            self.num_runs,
            average.as_secs_f64()
        );
    }
}

fn read_queens() -> Result<usize> {
    print!("Enter Number of Queens: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    line.trim()
        .parse::<usize>()
        .context("Number of queens must be a positive integer")
}

fn run(cli: &Cli) -> Result<()> {
    let launcher = SolverLauncher::new(cli.options()?)?;
    let n = match cli.n {
        Some(n) => n,
        None => read_queens()?,
    };
    let mut reporter = ConsoleReporter {
        num_runs: launcher.options().get_num_runs(),
    };
    launcher.launch(n, &mut reporter)?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
