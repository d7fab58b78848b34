//! Command-line administration for Swiss-system tournaments.
//!
//! Each invocation connects to the database, runs one command through the
//! tournament manager and prints the result.

use std::sync::Arc;

use anyhow::{Context, Error};
use log::info;
use pico_args::Arguments;
use swiss_admin::{
    commands::{Command, parse_command},
    config::AdminConfig,
    output::{render, scope_label},
    runner::execute,
};
use swiss_tournament::{db::Database, tournament::TournamentManager};

const HELP: &str = "\
Manage Swiss-system tournaments

USAGE:
  swiss_admin [OPTIONS] COMMAND

COMMANDS:
  migrate                        Apply the database schema
  new-tournament NAME            Register a tournament and print its ID
  tournaments                    List tournaments
  register TOURNAMENT_ID NAME    Register a player and print its ID
  report WINNER_ID LOSER_ID      Record the result of a match
  standings [TOURNAMENT_ID]      Show standings, sorted by wins
  matches [TOURNAMENT_ID]        Show recorded matches
  pairings TOURNAMENT_ID         Show pairings for the next round
  count [TOURNAMENT_ID]          Print the number of registered players
  reset [TOURNAMENT_ID]          Delete matches and players (and all
                                 tournaments when no ID is given)

OPTIONS:
  --db-url     URL         Database connection string  [default: env DATABASE_URL]
  --json                   Print results as JSON

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  DATABASE_URL             PostgreSQL connection string
  DB_MAX_CONNECTIONS       Maximum pool size [default: 5]
  SWISS_ADMIN_FORMAT       Output format, text or json [default: text]
  RUST_LOG                 Log filter [default: info]
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let database_url: Option<String> = pargs.opt_value_from_str("--db-url")?;
    let json = pargs.contains("--json");
    let free: Vec<String> = pargs
        .finish()
        .into_iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_target(false)
        .init();

    let command = parse_command(&free)?;

    let config = AdminConfig::from_env(database_url, json)?;
    config.validate()?;

    describe(&command);

    let db = Database::new(&config.database)
        .await
        .context("Failed to connect to database")?;

    let manager = TournamentManager::with_pool(Arc::new(db.pool().clone()));
    let outcome = execute(Some(&db), &manager, command).await;

    // Return pooled connections before reporting, on success and failure.
    db.close().await;

    let outcome = outcome?;
    println!("{}", render(&outcome, config.format)?);

    Ok(())
}

fn describe(command: &Command) {
    match command {
        Command::Standings { scope } => info!("Loading standings for {}", scope_label(*scope)),
        Command::Matches { scope } => info!("Loading matches for {}", scope_label(*scope)),
        Command::Count { scope } => info!("Counting players in {}", scope_label(*scope)),
        Command::Reset { scope } => info!("Resetting {}", scope_label(*scope)),
        Command::Pairings { tournament_id } => {
            info!("Pairing next round of tournament {}", tournament_id)
        }
        other => info!("Running {:?}", other),
    }
}
