//! Tournament CLI
//!
//! Keeps the tournament state in a JSON file and runs one step per call.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use swiss_core::{parse_rating, PairingSystem, PlayerId, SearchBudget};
use tournament::{
    pairings_report, simulate, tournament_report, GameResult, SimulationConfig, Tournament,
    TournamentConfig,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Swiss tournament pairing and scoring")]
struct Cli {
    /// Tournament state file
    #[arg(short, long, default_value = "tournament.json")]
    state: PathBuf,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
#[clap(rename_all = "kebab-case")]
enum Command {
    /// Create a new tournament
    New {
        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        rounds: Option<u32>,
    },
    /// Register a player, or update the rating of a known name
    AddPlayer {
        name: String,
        /// Rating text; the first number found is used, 100 if none
        #[arg(default_value = "")]
        rating: String,
    },
    /// Mark a player present or absent; stays in effect until changed
    Presence {
        /// Player id or name
        player: String,
        #[arg(long)]
        absent: bool,
    },
    /// Pair the next round
    Pair {
        /// random, rating, monrad or dutch
        #[arg(long, default_value = "dutch")]
        system: PairingSystem,
        /// Fixed game as WHITE:BLACK player ids, repeatable
        #[arg(long = "fixed", value_parser = parse_fixed)]
        fixed: Vec<(PlayerId, PlayerId)>,
        /// Give this player id the bye, repeatable
        #[arg(long = "fixed-bye")]
        fixed_byes: Vec<u32>,
    },
    /// Enter a result for a board: 1-0, 0-1 or 1/2-1/2
    Result { board: u32, result: GameResult },
    /// Close the current round
    Complete,
    /// Print the standings
    Standings,
    /// Print the pairings of a round (default: the latest)
    Pairings { round: Option<u32> },
    /// Play a whole tournament with random results
    Simulate {
        #[arg(long, default_value_t = 14)]
        players: usize,
        #[arg(long, default_value_t = 6)]
        rounds: u32,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 0.0)]
        absence_rate: f64,
        /// TOML configuration file for the pairing constants
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn parse_fixed(text: &str) -> Result<(PlayerId, PlayerId), String> {
    let (white, black) = text
        .split_once(':')
        .ok_or_else(|| format!("expected WHITE:BLACK, got '{}'", text))?;
    let id = |s: &str| {
        s.trim()
            .parse::<u32>()
            .map(PlayerId)
            .map_err(|e| format!("invalid player id '{}': {}", s, e))
    };
    Ok((id(white)?, id(black)?))
}

fn resolve_player(tournament: &Tournament, text: &str) -> Result<PlayerId> {
    if let Ok(id) = text.trim().parse::<u32>() {
        return Ok(PlayerId(id));
    }
    tournament
        .standings()
        .find_by_name(text)
        .map(|p| p.id)
        .with_context(|| format!("No player named '{}'", text))
}

fn load(path: &Path) -> Result<Tournament> {
    Tournament::load(path).with_context(|| format!("Failed to load {}", path.display()))
}

fn save(tournament: &Tournament, path: &Path) -> Result<()> {
    tournament
        .save(path)
        .with_context(|| format!("Failed to save {}", path.display()))
}

fn load_config(path: Option<&Path>) -> Result<TournamentConfig> {
    match path {
        Some(path) => TournamentConfig::load(path)
            .with_context(|| format!("Failed to read config {}", path.display())),
        None => Ok(TournamentConfig::default()),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let state = cli.state.as_path();

    match cli.command {
        Command::New {
            config,
            name,
            rounds,
        } => {
            if state.exists() {
                bail!("{} already exists", state.display());
            }
            let mut config = load_config(config.as_deref())?;
            if let Some(name) = name {
                config.name = name;
            }
            if let Some(rounds) = rounds {
                config.rounds = rounds;
            }
            let tournament = Tournament::new(config)?;
            save(&tournament, state)?;
            info!(
                name = %tournament.config().name,
                rounds = tournament.config().rounds,
                "Tournament created"
            );
        }
        Command::AddPlayer { name, rating } => {
            let mut tournament = load(state)?;
            let id = tournament.add_player(&name, parse_rating(&rating));
            save(&tournament, state)?;
            println!("{} {}", id, name);
        }
        Command::Presence { player, absent } => {
            let mut tournament = load(state)?;
            let id = resolve_player(&tournament, &player)?;
            tournament.set_present(id, !absent)?;
            save(&tournament, state)?;
        }
        Command::Pair {
            system,
            fixed,
            fixed_byes,
        } => {
            let mut tournament = load(state)?;
            let budget = SearchBudget::from_millis(tournament.config().pairing.time_limit_ms);
            let byes: Vec<PlayerId> = fixed_byes.into_iter().map(PlayerId).collect();
            tournament.pair_next_round_with(system, &fixed, &byes, &budget)?;
            save(&tournament, state)?;
            if let Some(round) = tournament.current_round() {
                print!("{}", pairings_report(round, tournament.standings()));
            }
        }
        Command::Result { board, result } => {
            let mut tournament = load(state)?;
            tournament.record_result(board, result)?;
            save(&tournament, state)?;
        }
        Command::Complete => {
            let mut tournament = load(state)?;
            tournament.complete_round()?;
            save(&tournament, state)?;
            print!("{}", tournament_report(&tournament));
        }
        Command::Standings => {
            let tournament = load(state)?;
            print!("{}", tournament_report(&tournament));
        }
        Command::Pairings { round } => {
            let tournament = load(state)?;
            let found = tournament
                .current_round()
                .into_iter()
                .chain(tournament.completed_rounds().iter().rev())
                .find(|r| round.map_or(true, |n| r.number == n));
            match found {
                Some(r) => print!("{}", pairings_report(r, tournament.standings())),
                None => bail!("No such round"),
            }
        }
        Command::Simulate {
            players,
            rounds,
            seed,
            absence_rate,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let sim = SimulationConfig {
                players,
                rounds,
                seed,
                absence_rate,
            };
            let tournament = simulate(&sim, config.pairing)?;
            for round in tournament.completed_rounds() {
                println!("{}", pairings_report(round, tournament.standings()));
            }
            print!("{}", tournament_report(&tournament));
        }
    }

    Ok(())
}
