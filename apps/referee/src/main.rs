use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use referee::domain::{apply_outcome, render, replay, winner, DEFAULT_RATING};
use referee::{
    fight_random_pair, run_match, AgentEndpoint, AgentHandle, InMemoryLeague, LeagueStore,
    MatchRecord, RefereeConfig,
};
use serde::Deserialize;
use tracing::{info, warn};

mod telemetry;

#[derive(Parser)]
#[command(name = "referee")]
#[command(about = "Connect Four match referee for untrusted agents")]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one match and print its record as JSON
    Play {
        /// First agent (moves first): an http(s) URL or a command line
        agent1: String,

        /// Second agent: an http(s) URL or a command line
        agent2: String,

        /// Per-move deadline in milliseconds (overrides REFEREE_MOVE_TIMEOUT_MS)
        #[arg(long)]
        timeout_ms: Option<u64>,

        /// Current rating of the first agent
        #[arg(long, default_value_t = DEFAULT_RATING)]
        rating1: i32,

        /// Current rating of the second agent
        #[arg(long, default_value_t = DEFAULT_RATING)]
        rating2: i32,
    },

    /// Rebuild and print the board for a comma-separated move log
    Replay {
        /// Move log, e.g. "3,0,3,0,3,0,3"
        moves: String,
    },

    /// Register a roster of bots and run random pairings between them
    League {
        /// JSON file: [{"name": "...", "endpoint": "..."}]
        roster: PathBuf,

        /// Number of matches to run
        #[arg(short, long, default_value = "1")]
        fights: u32,

        /// Seed for pairing selection (random if omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Per-move deadline in milliseconds (overrides REFEREE_MOVE_TIMEOUT_MS)
        #[arg(long)]
        timeout_ms: Option<u64>,
    },
}

#[derive(Deserialize)]
struct RosterEntry {
    name: String,
    endpoint: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    telemetry::init_tracing(args.verbose);

    let result = match args.command {
        Commands::Play {
            agent1,
            agent2,
            timeout_ms,
            rating1,
            rating2,
        } => play(&agent1, &agent2, timeout_ms, rating1, rating2).await,
        Commands::Replay { moves } => replay_log(&moves),
        Commands::League {
            roster,
            fights,
            seed,
            timeout_ms,
        } => league(&roster, fights, seed, timeout_ms).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn load_config(timeout_ms: Option<u64>) -> Result<RefereeConfig, Box<dyn std::error::Error>> {
    let mut config = RefereeConfig::from_env()?;
    if let Some(ms) = timeout_ms {
        config = config.with_move_timeout(Duration::from_millis(ms));
        config.validate()?;
    }
    Ok(config)
}

async fn play(
    agent1: &str,
    agent2: &str,
    timeout_ms: Option<u64>,
    rating1: i32,
    rating2: i32,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(timeout_ms)?;
    let first = AgentHandle::new(agent1, AgentEndpoint::parse(agent1)?);
    let second = AgentHandle::new(agent2, AgentEndpoint::parse(agent2)?);

    let report = run_match(&first, &second, &config).await?;
    let record = MatchRecord::from_report(first.name, second.name, &report);
    let ratings = apply_outcome(rating1, rating2, &report.outcome);
    info!(match_id = %record.id, outcome = %report.outcome, "Match finished");

    let output = serde_json::json!({
        "record": record,
        "outcome": report.outcome,
        "ratings": ratings,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn replay_log(raw: &str) -> Result<(), Box<dyn std::error::Error>> {
    let moves = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u8>()
                .map_err(|_| format!("move log entry {s:?} is not a column"))
        })
        .collect::<Result<Vec<u8>, _>>()?;
    let board = replay(&moves)?;
    print!("{}", render(&board));
    match winner(&board) {
        Some(side) => println!("{side} has four in a row after {} moves", moves.len()),
        None if board.is_full() => println!("board full after {} moves: draw", moves.len()),
        None => println!("undecided after {} moves", moves.len()),
    }
    Ok(())
}

async fn league(
    roster: &Path,
    fights: u32,
    seed: Option<u64>,
    timeout_ms: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(timeout_ms)?;
    let raw = std::fs::read_to_string(roster)?;
    let entries: Vec<RosterEntry> = serde_json::from_str(&raw)?;

    let store = InMemoryLeague::new();
    for entry in &entries {
        let bot = store.register(&entry.name, AgentEndpoint::parse(&entry.endpoint)?);
        info!(bot = %bot.name, id = %bot.id, "Bot registered");
    }

    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };
    for fight_no in 1..=fights {
        match fight_random_pair(&store, &config, &mut rng).await {
            Ok(summary) => info!(
                fight_no,
                match_id = %summary.record.id,
                outcome = %summary.outcome,
                delta = summary.change.delta,
                "Fight complete"
            ),
            Err(e) => {
                warn!(fight_no, error = %e, "Fight aborted");
                return Err(e.into());
            }
        }
    }

    let output = serde_json::json!({
        "standings": store.standings(),
        "recent": store.recent_matches(5),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
