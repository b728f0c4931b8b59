//! Timeline simulator CLI - whole games in memory through the session service.
//!
//! Every placement goes through the same locking, catalog lookup and commit
//! path a live session uses, so the simulator doubles as a soak test.

mod deck;
mod metrics;
mod output;
mod simulator;
mod strategy;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use metrics::build_game_metrics;
use output::OutputWriter;
use simulator::{GameResult, Simulator};
use strategy::{Strategy, StrategyKind};
use timeline_backend::catalog::InMemoryCatalog;
use timeline_backend::domain::Difficulty;
use timeline_backend::{telemetry, EngineConfig, SessionService};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "timeline-simulator")]
#[command(about = "Fast in-memory timeline game simulator")]
struct Args {
    /// Number of games to simulate
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Seats per game
    #[arg(short, long, default_value = "2", value_parser = clap::value_parser!(u8).range(2..=8))]
    players: u8,

    /// Deck difficulty
    #[arg(long, default_value = "medium")]
    difficulty: DifficultyArg,

    /// Base seed; game N uses seed + N. Random when absent.
    #[arg(long)]
    seed: Option<u64>,

    /// Strategy per seat, repeatable; cycled when there are more seats
    #[arg(long = "strategy", default_value = "oracle")]
    strategies: Vec<StrategyKind>,

    /// Placements before a game is ended and scored externally
    #[arg(long, default_value = "200")]
    max_turns: u32,

    /// Cards per difficulty in the synthetic catalog
    #[arg(long, default_value = "500")]
    deck_size: usize,

    /// JSONL output path (`.gz` compresses); stdout when absent
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Optional CSV summary path
    #[arg(long)]
    summary_csv: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.json_logs {
        telemetry::init_tracing();
    } else {
        telemetry::init_pretty(if args.verbose { "debug" } else { "warn" });
    }

    let base_seed = args.seed.unwrap_or_else(rand::random);
    let catalog = Arc::new(InMemoryCatalog::new(
        deck::build_deck(args.deck_size, base_seed),
        base_seed,
    ));
    let config = EngineConfig::from_env()?;
    let service = SessionService::new(catalog.clone(), config);
    let simulator = Simulator::new(&service, args.difficulty.into(), args.max_turns);

    let seat_kinds: Vec<StrategyKind> = args
        .strategies
        .iter()
        .copied()
        .cycle()
        .take(args.players as usize)
        .collect();
    let built: Vec<Box<dyn Strategy>> = seat_kinds.iter().map(|k| k.build(&catalog)).collect();
    let strategies: Vec<&dyn Strategy> = built.iter().map(|s| s.as_ref()).collect();
    let strategy_names: Vec<String> = strategies.iter().map(|s| s.name().to_string()).collect();

    info!(
        games = args.games,
        players = args.players,
        seed = base_seed,
        strategies = ?strategy_names,
        "Starting simulation"
    );

    let mut output_writer = OutputWriter::new(args.output.as_deref(), args.summary_csv.as_deref())?;

    let start = Instant::now();
    let mut results = Vec::new();
    let mut errors = 0;

    for game_num in 1..=args.games {
        let game_start = Instant::now();
        let game_seed = base_seed.wrapping_add(game_num as u64);

        match simulator.simulate_game(&strategies, game_seed).await {
            Ok(result) => {
                let duration_ms = game_start.elapsed().as_secs_f64() * 1000.0;
                let metrics = build_game_metrics(
                    game_num,
                    game_seed,
                    strategy_names.clone(),
                    args.games,
                    &result,
                    duration_ms,
                );
                if let Err(e) = output_writer.write_game(&metrics) {
                    warn!("Failed to write metrics for game {}: {}", game_num, e);
                }
                results.push(result);
            }
            Err(e) => {
                errors += 1;
                warn!("Game {} failed: {}", game_num, e);
            }
        }
    }

    let elapsed = start.elapsed();
    let (jsonl_path, csv_path) = output_writer.output_paths();
    let jsonl_path = jsonl_path.cloned();
    let csv_path = csv_path.cloned();
    output_writer.finish()?;

    if let Some(path) = jsonl_path {
        info!("Detailed results written to: {}", path.display());
    }
    if let Some(path) = csv_path {
        info!("Summary CSV written to: {}", path.display());
    }

    print_summary(&results, &strategy_names, errors, elapsed, args.games);
    Ok(())
}

#[derive(Default)]
struct StrategyStats {
    seats: u32,
    wins: u32,
    total_score: i64,
}

fn print_summary(
    results: &[GameResult],
    strategy_names: &[String],
    errors: u32,
    elapsed: std::time::Duration,
    total: u32,
) {
    eprintln!("\n=== Simulation Summary ===");
    eprintln!("Games completed: {}/{}", results.len(), total);
    if errors > 0 {
        eprintln!("Errors: {}", errors);
    }
    eprintln!("Total time: {:?}", elapsed);
    if results.is_empty() {
        return;
    }
    eprintln!(
        "Average time per game: {:?}",
        elapsed / results.len() as u32
    );

    let timed_out = results.iter().filter(|r| r.timed_out).count();
    let avg_turns =
        results.iter().map(|r| r.turns as f64).sum::<f64>() / results.len() as f64;
    eprintln!("Average turns: {avg_turns:.1}, ended at turn cap: {timed_out}");

    let mut by_strategy: BTreeMap<&str, StrategyStats> = BTreeMap::new();
    for result in results {
        for (seat, public) in result.final_view.seats.iter().enumerate() {
            let Some(name) = strategy_names.get(seat) else {
                continue;
            };
            let stats = by_strategy.entry(name.as_str()).or_default();
            stats.seats += 1;
            stats.total_score += public.score as i64;
            if result.winner_index == Some(seat) {
                stats.wins += 1;
            }
        }
    }

    eprintln!("\n=== Results by Strategy ===");
    for (name, stats) in by_strategy {
        let avg_score = stats.total_score as f64 / stats.seats as f64;
        let win_rate = stats.wins as f64 / stats.seats as f64 * 100.0;
        eprintln!(
            "{name}: seats={}, avg score={avg_score:.1}, wins={} ({win_rate:.1}% per seat)",
            stats.seats, stats.wins
        );
    }
}
