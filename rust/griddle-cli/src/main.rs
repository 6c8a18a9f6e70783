//! Griddle CLI: run the benchmark kernels from the command line.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "griddle", version, about = "CPU-bound benchmark kernels")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count pancake flips over every permutation of {0..n-1}
    Fannkuch {
        /// Permutation size (at most 20)
        #[arg(default_value_t = 7)]
        n: usize,

        /// Number of blocks the permutation space is cut into
        #[arg(long, default_value_t = 24)]
        blocks: usize,
    },
    /// Naive factorial of a number
    Factorial {
        number: u64,
    },
    /// Largest prime at or below a limit
    Primes {
        limit: u32,
    },
}

fn main() {
    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Fannkuch { n, blocks } => run_fannkuch(n, blocks),
        Commands::Factorial { number } => run_factorial(number),
        Commands::Primes { limit } => run_primes(limit),
    };

    if let Err(message) = outcome {
        eprintln!("error: {message}");
        std::process::exit(1);
    }
}

fn run_fannkuch(n: usize, blocks: usize) -> Result<(), String> {
    let summary = griddle_core::run(n, blocks).map_err(|e| e.to_string())?;
    println!("{}", summary.checksum);
    println!("Pfannkuchen({}) = {}", n, summary.max_flips);
    Ok(())
}

fn run_factorial(number: u64) -> Result<(), String> {
    let value = griddle_core::kernels::factorial(number)
        .ok_or_else(|| format!("{number}! overflows a 64-bit integer"))?;
    println!("Factorial of {} is: {}", number, value);
    Ok(())
}

fn run_primes(limit: u32) -> Result<(), String> {
    let prime = griddle_core::kernels::last_prime(limit)
        .ok_or_else(|| format!("no prime at or below {limit}"))?;
    println!("The last prime number up to {} is: {}", limit, prime);
    Ok(())
}
