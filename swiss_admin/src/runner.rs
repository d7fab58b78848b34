//! Executes a parsed command against the store.

use anyhow::{Context, Result};
use serde::Serialize;
use swiss_tournament::db::Database;
use swiss_tournament::pairing::Pairing;
use swiss_tournament::tournament::{
    Match, PlayerId, ResetSummary, Scope, StandingsRow, Tournament, TournamentId,
    TournamentManager,
};

use crate::commands::Command;

/// Result of one command, ready to print
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Outcome {
    Migrated,
    TournamentRegistered { id: TournamentId },
    Tournaments(Vec<Tournament>),
    PlayerRegistered { id: PlayerId },
    MatchReported(Match),
    Standings(Vec<StandingsRow>),
    Matches(Vec<Match>),
    Pairings(Vec<Pairing>),
    PlayerCount { scope: Scope, count: i64 },
    Reset(ResetSummary),
}

/// Run `command`, returning what it produced
///
/// Only [`Command::Migrate`] needs `db`; every other command goes through
/// the manager.
pub async fn execute(
    db: Option<&Database>,
    manager: &TournamentManager,
    command: Command,
) -> Result<Outcome> {
    let outcome = match command {
        Command::Migrate => {
            let db = db.context("No database connection to migrate")?;
            db.migrate().await.context("Failed to apply schema")?;
            Outcome::Migrated
        }
        Command::NewTournament { name } => Outcome::TournamentRegistered {
            id: manager.register_tournament(&name).await?,
        },
        Command::Tournaments => Outcome::Tournaments(manager.list_tournaments().await?),
        Command::Register {
            tournament_id,
            name,
        } => Outcome::PlayerRegistered {
            id: manager.register_player(tournament_id, &name).await?,
        },
        Command::Report { winner, loser } => {
            Outcome::MatchReported(manager.report_match(winner, loser).await?)
        }
        Command::Standings { scope } => Outcome::Standings(manager.player_standings(scope).await?),
        Command::Matches { scope } => Outcome::Matches(manager.list_matches(scope).await?),
        Command::Pairings { tournament_id } => Outcome::Pairings(
            manager
                .swiss_pairings(tournament_id)
                .await
                .with_context(|| format!("Cannot pair tournament {tournament_id}"))?,
        ),
        Command::Count { scope } => Outcome::PlayerCount {
            scope,
            count: manager.count_players(scope).await?,
        },
        Command::Reset { scope } => Outcome::Reset(manager.reset(scope).await?),
    };

    Ok(outcome)
}
