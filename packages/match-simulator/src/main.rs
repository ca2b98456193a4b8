//! Match simulator CLI - plays full Wizard matches in memory with bots.
//!
//! Useful for soak-testing the engine and comparing bot strategies.

mod bots;
mod simulator;

use std::io::{self, BufWriter, Write};
use std::time::{Duration, Instant};

use bots::{Bot, CountingBot, RandomBot};
use clap::{Parser, ValueEnum};
use rand::Rng;
use simulator::{MatchResult, Simulator};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "match-simulator")]
#[command(about = "Play simulated Wizard matches between bots")]
struct Args {
    /// Number of matches to simulate
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Players at the table
    #[arg(short, long, default_value = "4", value_parser = clap::value_parser!(u8).range(3..=10))]
    players: u8,

    /// Bot type for every seat
    #[arg(long, default_value = "counting", conflicts_with = "seat")]
    bots: BotType,

    /// Bot type per seat, in seating order (repeat once per player)
    #[arg(long)]
    seat: Vec<BotType>,

    /// Base seed; match N uses seed + N
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Show the summary after the run
    #[arg(long)]
    show_output: bool,

    /// Write one JSON result per match to stdout
    #[arg(long)]
    jsonl: bool,

    /// Emit engine logs as JSON (filtered by RUST_LOG)
    #[arg(long)]
    json_logs: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BotType {
    Random,
    Counting,
}

impl BotType {
    fn create(self, seed: u64) -> Box<dyn Bot> {
        match self {
            BotType::Random => Box::new(RandomBot::new(seed)),
            BotType::Counting => Box::new(CountingBot),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.json_logs {
        wizard_engine::telemetry::init_tracing();
    } else {
        let filter = if args.verbose {
            "debug"
        } else if args.show_output {
            "info"
        } else {
            "warn"
        };
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }

    let players = usize::from(args.players);
    let seat_types = if args.seat.is_empty() {
        vec![args.bots; players]
    } else if args.seat.len() == players {
        args.seat.clone()
    } else {
        return Err(format!(
            "--seat given {} times for {players} players",
            args.seat.len()
        )
        .into());
    };

    if args.show_output {
        info!(games = args.games, players, bots = ?seat_types, "Starting match simulator");
    }

    let base_seed = args.seed.unwrap_or_else(|| rand::rng().random());
    let mut out = BufWriter::new(io::stdout().lock());
    let start = Instant::now();
    let mut results = Vec::new();
    let mut errors = 0;

    for match_num in 1..=args.games {
        let seed = base_seed.wrapping_add(u64::from(match_num));
        let mut bots: Vec<Box<dyn Bot>> = seat_types
            .iter()
            .enumerate()
            .map(|(seat, kind)| kind.create(seed ^ seat as u64))
            .collect();

        match Simulator::new(match_num, seed).simulate_match(&mut bots) {
            Ok(result) => {
                if args.jsonl {
                    serde_json::to_writer(&mut out, &result)?;
                    writeln!(out)?;
                }
                if args.verbose {
                    info!(match_num, scores = ?result.final_scores, "Match completed");
                }
                results.push(result);
            }
            Err(e) => {
                errors += 1;
                warn!(match_num, seed, error = %e, "Match failed");
            }
        }
    }
    out.flush()?;

    if args.show_output {
        print_summary(&results, errors, start.elapsed(), args.games, players);
    }
    if errors > 0 {
        return Err(format!("{errors} of {} matches failed", args.games).into());
    }
    Ok(())
}

fn print_summary(
    results: &[MatchResult],
    errors: u32,
    elapsed: Duration,
    total: u32,
    players: usize,
) {
    eprintln!("\n=== Simulation Summary ===");
    eprintln!("Matches completed: {}/{}", results.len(), total);
    if errors > 0 {
        eprintln!("Errors: {errors}");
    }
    eprintln!("Total time: {elapsed:?}");
    if results.is_empty() {
        return;
    }
    eprintln!(
        "Average time per match: {:?}",
        elapsed / results.len() as u32
    );

    let mut wins = vec![0u32; players];
    let mut exact = vec![0u32; players];
    let mut total_scores = vec![0i64; players];
    let mut max_scores = vec![i32::MIN; players];
    let mut min_scores = vec![i32::MAX; players];
    let mut rounds = 0u32;

    for result in results {
        rounds += u32::from(result.rounds);
        for (seat, &score) in result.final_scores.iter().enumerate() {
            total_scores[seat] += i64::from(score);
            max_scores[seat] = max_scores[seat].max(score);
            min_scores[seat] = min_scores[seat].min(score);
            exact[seat] += result.exact_bids[seat];
            if result.winners.contains(&format!("seat{seat}")) {
                wins[seat] += 1;
            }
        }
    }

    let n = results.len() as f64;
    let bots = &results[0].bots;
    eprintln!("\n=== Results by Seat ===");
    for seat in 0..players {
        eprintln!(
            "Seat {seat} ({}): avg={:.1}, min={}, max={}, wins={} ({:.1}%), exact bids={:.1}%",
            bots[seat],
            total_scores[seat] as f64 / n,
            min_scores[seat],
            max_scores[seat],
            wins[seat],
            wins[seat] as f64 / n * 100.0,
            f64::from(exact[seat]) / f64::from(rounds.max(1)) * 100.0,
        );
    }
}
