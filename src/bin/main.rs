use std::path::PathBuf;
use std::process::ExitCode;
use clap::{Parser, Subcommand};
use serde_json::json;
use uuid::Uuid;
use judgment::config::Config;
use judgment::session::{Session, SessionError};
use judgment::short_id::uuid_to_short_id;
use judgment::sqlite_store::SqliteStore;
use judgment::{scoring, GameState, Player};

/// Keep score for a game of Judgment. Every command loads the saved game, applies one change
/// and saves it again.
#[derive(Debug, Parser)]
#[command(name = "judgment", version)]
struct Cli {
    /// Snapshot key (overrides JUDGMENT_NAMESPACE).
    #[arg(long, global = true)]
    namespace: Option<String>,
    /// SQLite database file (overrides JUDGMENT_DB).
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start a new game with 3 to 6 players, in seating order.
    New { names: Vec<String> },
    /// Place a bid for a player (name or id).
    Bid { player: String, amount: i32 },
    /// Record the tricks a player won this round.
    Tricks { player: String, count: i32 },
    /// Finish the current round.
    Complete,
    /// Deal the next round.
    Next,
    /// Print the whole game.
    Show,
    /// Print the standings.
    Scores,
    /// Throw the current game away.
    Reset,
}

#[derive(Debug)]
enum CliError {
    Config(String),
    Session(SessionError),
    UnknownPlayer(String),
    NoGame,
}

impl From<SessionError> for CliError {
    fn from(err: SessionError) -> Self {
        CliError::Session(err)
    }
}

impl From<judgment::storage::StorageError> for CliError {
    fn from(err: judgment::storage::StorageError) -> Self {
        CliError::Session(SessionError::Storage(err))
    }
}

fn resolve_player(game: &GameState, key: &str) -> Result<Uuid, CliError> {
    if let Ok(id) = Uuid::parse_str(key) {
        if game.player(id).is_some() {
            return Ok(id);
        }
    }
    game.player_by_name(key)
        .map(|p| p.id)
        .ok_or_else(|| CliError::UnknownPlayer(key.to_string()))
}

fn summary(game: &GameState) -> serde_json::Value {
    json!({
        "game": uuid_to_short_id(game.id),
        "status": game.status,
        "round": game.current_round,
        "max_rounds": game.max_rounds,
        "round_info": game.current(),
        "next_bidder": game.expected_bidder().and_then(|id| game.player(id)).map(|p| p.name.clone()),
        "statistics": game.current().map(scoring::round_statistics),
    })
}

fn run(cli: Cli) -> Result<serde_json::Value, CliError> {
    let config = Config::from_env()
        .and_then(|c| c.with_overrides(cli.namespace, cli.db))
        .map_err(|e| CliError::Config(e.to_string()))?;
    let store = SqliteStore::open(&config.db_path)?;
    let mut session = Session::open(store, &config.namespace)?;

    let current = |session: &Session<SqliteStore>| session.game().cloned().ok_or(CliError::NoGame);

    match cli.command {
        Command::New { names } => {
            let players = names.iter().map(|n| Player::new(n)).collect();
            let game = session.initialize_game(players)?;
            Ok(summary(game))
        },
        Command::Bid { player, amount } => {
            let id = resolve_player(&current(&session)?, &player)?;
            let outcome = session.add_bid(id, amount)?;
            Ok(json!({ "outcome": outcome, "state": summary(&current(&session)?) }))
        },
        Command::Tricks { player, count } => {
            let id = resolve_player(&current(&session)?, &player)?;
            let outcome = session.update_tricks(id, count)?;
            Ok(json!({ "outcome": outcome, "state": summary(&current(&session)?) }))
        },
        Command::Complete => {
            let outcome = session.complete_round()?;
            let game = current(&session)?;
            Ok(json!({ "outcome": outcome, "leaderboard": scoring::leaderboard(&game.players, &game.rounds) }))
        },
        Command::Next => {
            let outcome = session.start_next_round()?;
            Ok(json!({ "outcome": outcome, "state": summary(&current(&session)?) }))
        },
        Command::Show => Ok(json!(current(&session)?)),
        Command::Scores => Ok(json!(scoring::game_statistics(&current(&session)?))),
        Command::Reset => Ok(json!({ "outcome": session.reset_game()? })),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Cli::parse()) {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
            ExitCode::SUCCESS
        },
        Err(err) => {
            let message = match err {
                CliError::Config(msg) => msg,
                CliError::Session(err) => err.to_string(),
                CliError::UnknownPlayer(key) => format!("Error: No player named '{}'.", key),
                CliError::NoGame => "Error: No game is in progress.".to_string(),
            };
            eprintln!("{}", message);
            ExitCode::FAILURE
        },
    }
}
