//! Command-line front end for the engine.
//!
//! ## Usage
//!
//! - `polyy-rust play` - Speak the match protocol on stdin/stdout
//! - `polyy-rust demo` - Search the opening position and print the result
//! - `polyy-rust bench` - Measure expansions per second

use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};

use polyy_rust::constants::MEDIUM_DIFFICULTY;
use polyy_rust::engine::{Engine, SearchConfig};
use polyy_rust::proto::MatchSession;

/// A Monte Carlo tree search engine for Poly-Y
#[derive(Parser)]
#[command(name = "polyy-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game over the line-based match protocol
    Play {
        /// Difficulty level, 1 (weakest) to 15 (strongest)
        #[arg(short, long, default_value_t = MEDIUM_DIFFICULTY)]
        difficulty: u32,
    },
    /// Run a quick search of the opening position
    Demo,
    /// Measure search throughput
    Bench {
        /// Benchmark duration in seconds
        #[arg(short, long, default_value_t = 5)]
        seconds: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play { difficulty }) => {
            let config = SearchConfig::from_difficulty(difficulty)?;
            MatchSession::new(Engine::new(), config).run()
        }
        Some(Commands::Demo) | None => run_demo(),
        Some(Commands::Bench { seconds }) => {
            let mut engine = Engine::new();
            let rate = engine.benchmark(Duration::from_secs(seconds));
            println!("{rate:.0} expansions/second");
            Ok(())
        }
    }
}

fn run_demo() -> Result<()> {
    println!("polyy-rust: Poly-Y MCTS engine\n");

    let mut engine = Engine::new();
    let config = SearchConfig::new(1000, false);

    println!("Searching the opening position with {} iterations...", config.iterations);
    let best = engine.find_move(&[], &config, None)?;
    println!("Best opening: {} (win probability {:.1}%)", best.mv, best.win_probability * 100.0);

    // A centre opening is strong enough that the pie rule takes it outright.
    let best = engine.find_move(&[43], &config, None)?;
    println!("Answer to a centre opening: take it over (position {})", best.mv);
    Ok(())
}
