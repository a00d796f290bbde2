//! Hexstead game simulator.
//!
//! Runs batches of random-policy games against the engine crate and
//! reports wins, rounds, and victory points per player.

use clap::Parser;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod simulator;

use simulator::{run_game, GameSummary, SimConfig};

#[derive(Parser)]
#[command(name = "hexstead-sim")]
#[command(about = "Random-policy game simulator for the Hexstead engine")]
struct Args {
    /// Number of games to play
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Players per game (2-4)
    #[arg(short, long, default_value = "3")]
    players: u8,

    /// Round cap per game
    #[arg(long, default_value = "200")]
    max_rounds: u32,

    /// Base seed for reproducible runs (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Shuffle terrains and tokens instead of the standard layout
    #[arg(long)]
    shuffle: bool,

    /// Print one JSON line per game
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let default_filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    anyhow::ensure!(
        (2..=4).contains(&args.players),
        "players must be between 2 and 4"
    );

    let config = SimConfig {
        players: args.players,
        max_rounds: args.max_rounds,
        seed: args.seed.unwrap_or_else(rand::random),
        shuffle_board: args.shuffle,
    };

    info!(
        "Running {} game(s) with {} players (base seed {})",
        args.games, config.players, config.seed
    );

    let start = Instant::now();
    let mut summaries = Vec::new();

    for index in 0..args.games {
        let summary = run_game(index, &config);
        if args.json {
            println!("{}", serde_json::to_string(&summary)?);
        }
        summaries.push(summary);
    }

    print_summary(&summaries, args.players, start.elapsed());
    Ok(())
}

fn print_summary(summaries: &[GameSummary], players: u8, elapsed: std::time::Duration) {
    println!("\n=== Simulation Summary ===");
    println!("Games played: {}", summaries.len());
    println!("Total time: {:?}", elapsed);
    if summaries.is_empty() {
        return;
    }

    let unfinished = summaries.iter().filter(|s| s.winner.is_none()).count();
    if unfinished > 0 {
        println!("Unfinished (round cap): {}", unfinished);
    }

    let total_rounds: u32 = summaries.iter().map(|s| s.rounds).sum();
    println!(
        "Average rounds per game: {:.1}",
        total_rounds as f64 / summaries.len() as f64
    );

    let winning_vp: Vec<u32> = summaries
        .iter()
        .filter_map(|s| {
            s.winner
                .and_then(|w| s.victory_points.get(w as usize).copied())
        })
        .collect();
    if !winning_vp.is_empty() {
        let total: u32 = winning_vp.iter().sum();
        println!(
            "Average winning VP: {:.1}",
            total as f64 / winning_vp.len() as f64
        );
    }

    println!("\n=== Results by Player ===");
    for id in 0..players {
        let wins = summaries.iter().filter(|s| s.winner == Some(id)).count();
        let win_rate = (wins as f64 / summaries.len() as f64) * 100.0;
        let total_vp: u32 = summaries
            .iter()
            .map(|s| s.victory_points.get(id as usize).copied().unwrap_or(0))
            .sum();
        let avg_vp = total_vp as f64 / summaries.len() as f64;
        println!(
            "Player {}: wins={} ({:.1}%), avg VP={:.1}",
            id + 1,
            wins,
            win_rate,
            avg_vp
        );
    }
}
