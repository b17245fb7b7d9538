//! ann CLI - backpropagation and self-organizing map demos
//!
//! Trains each engine on its sample dataset and reports how well it learned.

use ann::datasets::{classification_errors, noisy_ramp_patterns, primes_dataset, ramp_patterns};
use ann::{BackpropConfig, BackpropNetwork, Result, Som, SomConfig};
use clap::{Parser, Subcommand};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use log::error;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "ann")]
#[command(version)]
#[command(about = "Backpropagation and self-organizing map demos", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Learn which integers are prime from their binary digits
    Primes {
        /// Number of hidden units
        #[arg(long, default_value = "19")]
        hidden: usize,

        /// Number of training epochs
        #[arg(short = 'n', long, default_value = "5000")]
        iterations: usize,

        /// Train on the integers below this limit
        #[arg(short, long, default_value = "1000")]
        limit: u32,

        /// Random seed for reproducibility
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Classify noisy ramp patterns with a self-organizing map
    Som {
        /// Grid rows
        #[arg(long, default_value = "12")]
        height: usize,

        /// Grid columns
        #[arg(long, default_value = "12")]
        width: usize,

        /// Number of training iterations
        #[arg(short = 'n', long, default_value = "5000")]
        iterations: usize,

        /// Random seed for reproducibility
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Run both demos with their default settings
    Demo {
        /// Random seed for reproducibility
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let result = match cli.command {
        Commands::Primes {
            hidden,
            iterations,
            limit,
            seed,
        } => run_primes(hidden, iterations, limit, seed),

        Commands::Som {
            height,
            width,
            iterations,
            seed,
        } => run_som(height, width, iterations, seed),

        Commands::Demo { seed } => {
            let som = SomConfig::default();
            let backprop = BackpropConfig::default();
            run_som(som.height, som.width, som.iterations, seed).and_then(|_| {
                println!();
                run_primes(backprop.hidden_count, backprop.iterations, 1000, seed)
            })
        }
    };

    if let Err(e) = result {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_primes(hidden: usize, iterations: usize, limit: u32, seed: Option<u64>) -> Result<()> {
    let start_time = Instant::now();
    let width = bits_needed(limit.saturating_sub(1));

    let config = BackpropConfig {
        input_count: width,
        hidden_count: hidden,
        output_count: 1,
        iterations,
        seed,
        ..Default::default()
    };

    let patterns = primes_dataset(limit, width);
    let mut network = BackpropNetwork::from_config(&config);

    println!("Backpropagation network");
    println!(
        "   {}-{}-1 network, {} integers as {}-digit binary inputs",
        width,
        hidden,
        patterns.len(),
        width
    );
    println!();

    let pb = progress_bar(iterations, "Training...");
    network.train_with_progress(iterations, &patterns, |epoch, _| pb.set_position(epoch as u64))?;
    pb.finish_and_clear();
    println!("✓ Trained for {} epochs", iterations);

    let errors = classification_errors(&patterns, |input| {
        network.predict_class(input).unwrap_or_default()
    });
    let rate = if patterns.is_empty() {
        0.0
    } else {
        100.0 * errors as f64 / patterns.len() as f64
    };

    println!();
    println!("   Misclassified: {} of {} ({:.1}%)", errors, patterns.len(), rate);
    println!("   Mean squared error: {:.5}", network.mean_squared_error(&patterns)?);
    println!("   Time: {}", HumanDuration(start_time.elapsed()));

    Ok(())
}

fn run_som(height: usize, width: usize, iterations: usize, seed: Option<u64>) -> Result<()> {
    let start_time = Instant::now();

    let config = SomConfig {
        height,
        width,
        iterations,
        seed,
        ..Default::default()
    };

    let (features, labels) = ramp_patterns();
    let mut som = Som::from_config(&config);

    println!("Self-Organizing Map");
    println!(
        "   {}x{} = {} nodes, {} training patterns",
        height,
        width,
        som.len(),
        features.len()
    );
    println!();

    let pb = progress_bar(iterations, "Training...");
    som.train_with_progress(iterations, &features, &labels, |i, _| pb.set_position(i as u64))?;
    pb.finish_and_clear();
    println!("✓ Trained for {} iterations", iterations);

    println!();
    println!("Training patterns:");
    for fv in &features {
        print_prediction(&som, fv)?;
    }

    println!();
    println!("Noisy patterns:");
    for fv in &noisy_ramp_patterns() {
        print_prediction(&som, fv)?;
    }

    println!();
    println!("   Time: {}", HumanDuration(start_time.elapsed()));

    Ok(())
}

fn print_prediction(som: &Som, fv: &[f64]) -> Result<()> {
    let percent = som.predict_class(fv)?;
    println!("   {:?} -> {:?}", fv, percent);
    if log::log_enabled!(log::Level::Info) {
        if let Some(node) = som.node(som.best_match(fv)) {
            println!("      {}", node);
        }
    }
    Ok(())
}

fn progress_bar(len: usize, message: &'static str) -> ProgressBar {
    let style = ProgressStyle::default_bar()
        .template("{msg}\n{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) ETA: {eta}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░  ");

    let pb = ProgressBar::new(len as u64);
    pb.set_style(style);
    pb.set_message(message);
    pb
}

/// Number of binary digits needed to write `n` (at least one).
fn bits_needed(n: u32) -> usize {
    ((u32::BITS - n.leading_zeros()) as usize).max(1)
}
