//! SICP Section 3.5: Streams Demonstration
//!
//! Walks through the stream programs of SICP 3.5, printing the first few
//! terms of each stream.
//!
//! Run with: cargo run --bin streams_demo -- --terms 10 --section all
//! Set `RUST_LOG=debug` to see stream exhaustion and `trace` for every force.

use clap::{Parser, ValueEnum};
use env_logger::Builder;
use log::{LevelFilter, info};
use num_bigint::BigUint;

use sicp_chapter3::section_3_5::*;
use sicp_stream::{Result, Stream};

#[derive(Parser, Debug)]
#[command(name = "streams_demo")]
#[command(version)]
#[command(about = "Walk through the stream programs of SICP section 3.5", long_about = None)]
struct Args {
    /// Number of terms printed for each stream
    #[arg(short, long, default_value_t = 10)]
    terms: usize,

    /// Seed for the random-number stream of the Monte Carlo section
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Section to run
    #[arg(short, long, value_enum, default_value_t = Section::All)]
    section: Section,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Section {
    All,
    #[value(name = "3.5.1")]
    DelayedLists,
    #[value(name = "3.5.2")]
    InfiniteStreams,
    #[value(name = "3.5.3")]
    Paradigm,
    #[value(name = "3.5.4")]
    DelayedEvaluation,
    #[value(name = "3.5.5")]
    Modularity,
}

impl Section {
    fn selected(self, wanted: Section) -> bool {
        self == Section::All || self == wanted
    }
}

fn main() -> Result<()> {
    Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    info!("printing {} terms per stream", args.terms);

    println!("=== SICP Chapter 3.5: Streams ===\n");

    if args.section.selected(Section::DelayedLists) {
        delayed_lists_demo()?;
    }
    if args.section.selected(Section::InfiniteStreams) {
        infinite_streams_demo(args.terms)?;
    }
    if args.section.selected(Section::Paradigm) {
        paradigm_demo(args.terms);
    }
    if args.section.selected(Section::DelayedEvaluation) {
        delayed_evaluation_demo()?;
    }
    if args.section.selected(Section::Modularity) {
        modularity_demo(args.terms, args.seed)?;
    }

    println!("\n=== Demonstration Complete ===");
    Ok(())
}

fn banner(title: &str) {
    info!("running {title}");
    println!("\n{title}");
    println!("{}", "=".repeat(60));
}

fn show<T: std::fmt::Debug + Clone + 'static>(label: &str, stream: &Stream<T>, terms: usize) {
    println!("  {label}: {:?}", stream.take(terms).to_vec());
}

// =========================================================================
// Section 3.5.1: Streams Are Delayed Lists
// =========================================================================
fn delayed_lists_demo() -> Result<()> {
    banner("Section 3.5.1: Streams Are Delayed Lists");

    println!("Finding the 2nd prime in range [10,000 - 1,000,000]:");
    println!("  Only the tails up to the answer are ever forced.");
    let second = delayed_lists::second_prime(10_000, 1_000_000)?;
    println!("  Result: {second}");

    println!("\nSum of squares of first 5 odd numbers:");
    println!("  (1² + 3² + 5² + 7² + 9²)");
    println!("  Result: {}", delayed_lists::sum_of_squares_of_odd_numbers(5));

    println!("\nPrimes in [10, 30]:");
    prime_enumerate_interval(10, 30).display();
    Ok(())
}

// =========================================================================
// Section 3.5.2: Infinite Streams
// =========================================================================
fn infinite_streams_demo(terms: usize) -> Result<()> {
    banner("Section 3.5.2: Infinite Streams");

    show("Integers starting from 1", &integers_starting_from(1), terms);
    show("Integers not divisible by 7", &no_sevens(), terms);
    show(
        "Fibonacci (fibgen)",
        &fibgen(BigUint::from(0u32), BigUint::from(1u32)),
        terms,
    );
    show("Primes (sieve)", &prime_sieve(), terms);
    println!("  50th prime: {}", prime_sieve().at(49)?);

    println!("\nImplicit Stream Definitions");
    show("ones", &ones(), terms);
    show("integers", &integers(), terms);
    show("fibs", &fibs(), terms);
    show("Powers of 2", &doubles(), terms);
    show("factorials", &factorials(), terms);
    show("primes (trial division)", &primes(), terms);
    Ok(())
}

// =========================================================================
// Section 3.5.3: Exploiting the Stream Paradigm
// =========================================================================
fn paradigm_demo(terms: usize) {
    banner("Section 3.5.3: Exploiting the Stream Paradigm");

    show("sqrt(2) guesses", &sqrt_stream(2.0), terms);
    if let Some(root) = sqrt(2.0, 1e-10) {
        println!("  sqrt(2) within 1e-10: {root}");
    }

    println!("\nApproximating pi:");
    show("Partial sums", &pi_stream(), terms);
    show("Euler transform", &euler_transform(&pi_stream()), terms);
    // Later rows run out of floating-point precision.
    show(
        "Accelerated",
        &accelerated_sequence(pi_stream(), euler_transform),
        terms.min(8),
    );
    println!("  Actual pi: {}", std::f64::consts::PI);

    println!("\nInfinite streams of pairs:");
    show("pairs(integers, integers)", &pairs(&integers(), &integers()), terms);
    show(
        "pairs with prime sums",
        &pairs(&integers(), &integers()).select(|(i, j)| is_prime(i + j)),
        terms,
    );
}

// =========================================================================
// Section 3.5.4: Streams and Delayed Evaluation
// =========================================================================
fn delayed_evaluation_demo() -> Result<()> {
    banner("Section 3.5.4: Streams and Delayed Evaluation");

    println!("Solving dy/dt = y, y(0) = 1 with dt = 0.001:");
    let e = solve(|y| y, 1.0, 0.001)?.at(1000).copied()?;
    println!("  y(1) ≈ {e}");
    println!("  e     = {}", std::f64::consts::E);

    println!("\nSolving y'' = y, y(0) = y'(0) = 1:");
    let y = solve_2nd(0.0, 1.0, 0.001, 1.0, 1.0)?;
    println!("  y(1) ≈ {}", y.at(1000)?);
    Ok(())
}

// =========================================================================
// Section 3.5.5: Modularity of Functional Programs
// =========================================================================
fn modularity_demo(terms: usize, seed: u64) -> Result<()> {
    banner("Section 3.5.5: Modularity of Functional Programs");

    show("Random numbers", &monte_carlo::random_numbers(seed), terms);
    show("Cesàro trials", &monte_carlo::cesaro_stream(seed), terms);

    let estimates = monte_carlo::monte_carlo_pi(seed);
    for n in [10, 100, 1_000, 10_000] {
        println!("  pi after {n:>6} trials: {:.6}", estimates.at(n - 1)?);
    }
    Ok(())
}
