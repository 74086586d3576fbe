use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use repair_rs::{
    compress_text_engine, render, synthetic_char, IndexStrategy, Symbol, SYNTHETIC_CAPACITY,
};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Compresses lowercase text by repeatedly merging its most frequent pair.
///
/// Usage: cargo run --example compress -- <text> -k <rounds>
#[derive(Parser)]
#[command(name = "compress")]
#[command(about = "RePair pairwise compression of lowercase text", long_about = None)]
struct Cli {
    /// Text to compress
    text: Option<String>,

    /// Number of merge rounds
    #[arg(short, long, default_value_t = 1)]
    rounds: usize,

    /// Pair index strategy
    #[arg(long, value_enum, default_value_t = Strategy::Rebuild)]
    strategy: Strategy,

    /// Print every executed round
    #[arg(long)]
    trace: bool,

    /// Run the timing harness instead of compressing `text`
    #[arg(long)]
    stress: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Strategy {
    Rebuild,
    Incremental,
}

impl From<Strategy> for IndexStrategy {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Rebuild => IndexStrategy::Rebuild,
            Strategy::Incremental => IndexStrategy::Incremental,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let strategy = IndexStrategy::from(cli.strategy);

    if cli.stress {
        stress(strategy)?;
        return Ok(());
    }

    let Some(text) = cli.text else {
        bail!("missing text to compress (or pass --stress)");
    };

    let repair = compress_text_engine(&text, cli.rounds, strategy)?;

    if cli.trace {
        trace(&text, cli.rounds, strategy)?;
    }

    println!("{}", render(&repair)?);
    Ok(())
}

/// Replays the compression one round at a time, printing every step.
fn trace(text: &str, rounds: usize, strategy: IndexStrategy) -> Result<()> {
    println!("Initial text: {}", text);
    println!("Rounds: {}", rounds);

    let mut step = compress_text_engine(text, 0, strategy)?;
    for _ in 0..rounds {
        if step.compress(1)? == 0 {
            println!("\nNo pair occurs twice, stopped after {} rounds", step.rounds());
            break;
        }

        let Some(report) = step.history().last() else {
            break;
        };
        let (left, right) = &report.pair;
        let token = synthetic_char(report.symbol).unwrap_or('?');

        println!("\nRound {}:", report.round);
        println!(
            "  Best pair: '{}{}' (count={}, pos={})",
            letter(left),
            letter(right),
            report.count,
            report.first_position
        );
        println!("  New token: {}", token);
        println!("  Replacements: {}", report.replacements);
        println!("  Result: {}", render(&step)?);
    }
    println!();

    Ok(())
}

fn letter(symbol: &Symbol<char>) -> char {
    match symbol {
        Symbol::Value(c) => *c,
        Symbol::Synthetic(id) => synthetic_char(*id).unwrap_or('?'),
    }
}

/// Times the compression of large repetitive inputs.
fn stress(strategy: IndexStrategy) -> Result<()> {
    let cases = [
        ("a".repeat(10_000), 10, "10k 'a' characters"),
        ("ab".repeat(5_000), 5, "10k alternating 'ab'"),
        ("abc".repeat(3_333), 3, "~10k 'abc' pattern"),
    ];

    for (text, rounds, description) in cases {
        debug_assert!(rounds <= SYNTHETIC_CAPACITY);

        let start = Instant::now();
        let repair = compress_text_engine(&text, rounds, strategy)?;
        let elapsed = start.elapsed();
        let stats = repair.stats();

        println!("{}:", description);
        println!("  Input length: {}", stats.input_length);
        println!("  Output length: {}", stats.output_length);
        println!("  Time: {:.4}s", elapsed.as_secs_f64());
        println!("  Compression: {:.1}%", 100.0 - stats.compression_ratio());
        println!();
    }

    Ok(())
}
