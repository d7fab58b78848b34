//! Repository trait definitions for testability and dependency injection.
//!
//! [`StandingsProvider`] is the only thing the pairing step needs from
//! storage; [`TournamentRepository`] adds the registration, reporting and
//! reset operations around it. Both are implemented for PostgreSQL here and
//! by an in-memory mock for tests.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgConnection, PgPool, Row};

use super::timeouts::{with_default_timeout, with_transaction_timeout};
use crate::tournament::{
    Match, Player, PlayerId, ResetSummary, Scope, StandingsRow, Tournament, TournamentError,
    TournamentId, TournamentResult, match_tournament,
};

/// Source of standings, sorted by wins descending and stable otherwise
#[async_trait]
pub trait StandingsProvider: Send + Sync {
    /// Standings for every player in `scope`
    async fn standings(&self, scope: Scope) -> TournamentResult<Vec<StandingsRow>>;
}

/// Trait for tournament, player and match storage
#[async_trait]
pub trait TournamentRepository: StandingsProvider {
    /// Create a tournament
    async fn create_tournament(&self, name: &str) -> TournamentResult<Tournament>;

    /// Find tournament by ID
    async fn find_tournament(&self, id: TournamentId) -> TournamentResult<Option<Tournament>>;

    /// List all tournaments, oldest first
    async fn list_tournaments(&self) -> TournamentResult<Vec<Tournament>>;

    /// Delete every tournament along with its players and matches
    async fn delete_tournaments(&self) -> TournamentResult<u64>;

    /// Register a player; fails with `NotFound` if the tournament is missing
    async fn create_player(&self, tournament_id: TournamentId, name: &str)
    -> TournamentResult<Player>;

    /// Standings of one tournament, read together with the tournament row;
    /// fails with `NotFound` if the tournament is missing
    async fn tournament_standings(
        &self,
        tournament_id: TournamentId,
    ) -> TournamentResult<Vec<StandingsRow>>;

    /// Count players in scope
    async fn count_players(&self, scope: Scope) -> TournamentResult<i64>;

    /// Delete players (and their matches) in scope
    async fn delete_players(&self, scope: Scope) -> TournamentResult<u64>;

    /// Record a match after checking both players exist and share a tournament
    async fn record_match(&self, winner: PlayerId, loser: PlayerId) -> TournamentResult<Match>;

    /// List matches in scope, in report order
    async fn list_matches(&self, scope: Scope) -> TournamentResult<Vec<Match>>;

    /// Delete matches in scope
    async fn delete_matches(&self, scope: Scope) -> TournamentResult<u64>;

    /// Delete matches and players in scope, and all tournaments when the
    /// scope is [`Scope::All`], as one unit of work
    async fn reset(&self, scope: Scope) -> TournamentResult<ResetSummary>;
}

const SCOPE_FILTER: &str = "($1::BIGINT IS NULL OR id_tournament = $1)";

fn tournament_from_row(row: &PgRow) -> Tournament {
    Tournament {
        id: row.get("id"),
        name: row.get("name"),
        created_at: row.get::<chrono::NaiveDateTime, _>("created_at").and_utc(),
    }
}

fn player_from_row(row: &PgRow) -> Player {
    Player {
        id: row.get("id"),
        tournament_id: row.get("id_tournament"),
        name: row.get("name"),
        registered_at: row
            .get::<chrono::NaiveDateTime, _>("registered_at")
            .and_utc(),
    }
}

fn match_from_row(row: &PgRow) -> Match {
    Match {
        id: row.get("id"),
        tournament_id: row.get("id_tournament"),
        winner_id: row.get("winner"),
        loser_id: row.get("loser"),
        reported_at: row.get::<chrono::NaiveDateTime, _>("reported_at").and_utc(),
    }
}

async fn fetch_player(conn: &mut PgConnection, id: PlayerId) -> TournamentResult<Option<Player>> {
    let row = with_default_timeout(
        sqlx::query(
            "SELECT id, id_tournament, name, registered_at FROM players WHERE id = $1 FOR KEY SHARE",
        )
        .bind(id)
        .fetch_optional(&mut *conn),
    )
    .await?;

    Ok(row.as_ref().map(player_from_row))
}

async fn fetch_standings(conn: &mut PgConnection, scope: Scope) -> TournamentResult<Vec<StandingsRow>> {
    let rows = with_default_timeout(
        sqlx::query(
            r#"
            SELECT id, name, won_matches, played_matches
            FROM standings
            WHERE ($1::BIGINT IS NULL OR id_tournament = $1)
            ORDER BY won_matches DESC, played_matches ASC, id ASC
            "#,
        )
        .bind(scope.tournament_id())
        .fetch_all(&mut *conn),
    )
    .await?;

    Ok(rows
        .iter()
        .map(|row| StandingsRow {
            player_id: row.get("id"),
            name: row.get("name"),
            wins: row.get("won_matches"),
            matches: row.get("played_matches"),
        })
        .collect())
}

async fn delete_in_scope(
    conn: &mut PgConnection,
    table: &'static str,
    scope: Scope,
) -> TournamentResult<u64> {
    // Table names come from this module only; the scope is always bound.
    let sql = format!("DELETE FROM {table} WHERE {SCOPE_FILTER}");
    let result = with_default_timeout(
        sqlx::query(&sql)
            .bind(scope.tournament_id())
            .execute(&mut *conn),
    )
    .await?;

    Ok(result.rows_affected())
}

/// Default PostgreSQL implementation of `TournamentRepository`
#[derive(Clone)]
pub struct PgTournamentRepository {
    pool: Arc<PgPool>,
}

impl PgTournamentRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StandingsProvider for PgTournamentRepository {
    async fn standings(&self, scope: Scope) -> TournamentResult<Vec<StandingsRow>> {
        let mut conn = with_default_timeout(self.pool.acquire()).await?;
        fetch_standings(&mut conn, scope).await
    }
}

#[async_trait]
impl TournamentRepository for PgTournamentRepository {
    async fn create_tournament(&self, name: &str) -> TournamentResult<Tournament> {
        let row = with_default_timeout(
            sqlx::query("INSERT INTO tournaments (name) VALUES ($1) RETURNING id, name, created_at")
                .bind(name)
                .fetch_one(self.pool.as_ref()),
        )
        .await?;

        Ok(tournament_from_row(&row))
    }

    async fn find_tournament(&self, id: TournamentId) -> TournamentResult<Option<Tournament>> {
        let row = with_default_timeout(
            sqlx::query("SELECT id, name, created_at FROM tournaments WHERE id = $1")
                .bind(id)
                .fetch_optional(self.pool.as_ref()),
        )
        .await?;

        Ok(row.as_ref().map(tournament_from_row))
    }

    async fn list_tournaments(&self) -> TournamentResult<Vec<Tournament>> {
        let rows = with_default_timeout(
            sqlx::query("SELECT id, name, created_at FROM tournaments ORDER BY id")
                .fetch_all(self.pool.as_ref()),
        )
        .await?;

        Ok(rows.iter().map(tournament_from_row).collect())
    }

    async fn delete_tournaments(&self) -> TournamentResult<u64> {
        let result = with_default_timeout(
            sqlx::query("DELETE FROM tournaments").execute(self.pool.as_ref()),
        )
        .await?;

        Ok(result.rows_affected())
    }

    async fn create_player(
        &self,
        tournament_id: TournamentId,
        name: &str,
    ) -> TournamentResult<Player> {
        let mut tx = with_transaction_timeout(self.pool.begin()).await?;

        let tournament = with_default_timeout(
            sqlx::query("SELECT id FROM tournaments WHERE id = $1 FOR KEY SHARE")
                .bind(tournament_id)
                .fetch_optional(&mut *tx),
        )
        .await?;

        if tournament.is_none() {
            return Err(TournamentError::NotFound(tournament_id));
        }

        let row = with_default_timeout(
            sqlx::query(
                r#"
                INSERT INTO players (id_tournament, name)
                VALUES ($1, $2)
                RETURNING id, id_tournament, name, registered_at
                "#,
            )
            .bind(tournament_id)
            .bind(name)
            .fetch_one(&mut *tx),
        )
        .await?;

        with_transaction_timeout(tx.commit()).await?;

        Ok(player_from_row(&row))
    }

    async fn tournament_standings(
        &self,
        tournament_id: TournamentId,
    ) -> TournamentResult<Vec<StandingsRow>> {
        let mut tx = with_transaction_timeout(self.pool.begin()).await?;

        // Holds off a concurrent delete of the tournament until the standings are read.
        let tournament = with_default_timeout(
            sqlx::query("SELECT id FROM tournaments WHERE id = $1 FOR KEY SHARE")
                .bind(tournament_id)
                .fetch_optional(&mut *tx),
        )
        .await?;

        if tournament.is_none() {
            return Err(TournamentError::NotFound(tournament_id));
        }

        let standings = fetch_standings(&mut tx, Scope::Tournament(tournament_id)).await?;
        with_transaction_timeout(tx.commit()).await?;

        Ok(standings)
    }

    async fn count_players(&self, scope: Scope) -> TournamentResult<i64> {
        let row = with_default_timeout(
            sqlx::query(
                "SELECT COUNT(*) AS count FROM players WHERE ($1::BIGINT IS NULL OR id_tournament = $1)",
            )
            .bind(scope.tournament_id())
            .fetch_one(self.pool.as_ref()),
        )
        .await?;

        Ok(row.get("count"))
    }

    async fn delete_players(&self, scope: Scope) -> TournamentResult<u64> {
        let mut conn = with_default_timeout(self.pool.acquire()).await?;
        delete_in_scope(&mut conn, "players", scope).await
    }

    async fn record_match(&self, winner: PlayerId, loser: PlayerId) -> TournamentResult<Match> {
        let mut tx = with_transaction_timeout(self.pool.begin()).await?;

        let winner_row = fetch_player(&mut tx, winner).await?;
        let loser_row = if loser == winner {
            None
        } else {
            fetch_player(&mut tx, loser).await?
        };

        let tournament_id = match_tournament(winner, winner_row.as_ref(), loser, loser_row.as_ref())?;

        let row = with_default_timeout(
            sqlx::query(
                r#"
                INSERT INTO matches (id_tournament, winner, loser)
                VALUES ($1, $2, $3)
                RETURNING id, id_tournament, winner, loser, reported_at
                "#,
            )
            .bind(tournament_id)
            .bind(winner)
            .bind(loser)
            .fetch_one(&mut *tx),
        )
        .await?;

        with_transaction_timeout(tx.commit()).await?;

        Ok(match_from_row(&row))
    }

    async fn list_matches(&self, scope: Scope) -> TournamentResult<Vec<Match>> {
        let rows = with_default_timeout(
            sqlx::query(
                r#"
                SELECT id, id_tournament, winner, loser, reported_at
                FROM matches
                WHERE ($1::BIGINT IS NULL OR id_tournament = $1)
                ORDER BY id
                "#,
            )
            .bind(scope.tournament_id())
            .fetch_all(self.pool.as_ref()),
        )
        .await?;

        Ok(rows.iter().map(match_from_row).collect())
    }

    async fn delete_matches(&self, scope: Scope) -> TournamentResult<u64> {
        let mut conn = with_default_timeout(self.pool.acquire()).await?;
        delete_in_scope(&mut conn, "matches", scope).await
    }

    async fn reset(&self, scope: Scope) -> TournamentResult<ResetSummary> {
        let mut tx = with_transaction_timeout(self.pool.begin()).await?;

        let matches = delete_in_scope(&mut tx, "matches", scope).await?;
        let players = delete_in_scope(&mut tx, "players", scope).await?;
        let tournaments = match scope {
            Scope::All => {
                with_default_timeout(sqlx::query("DELETE FROM tournaments").execute(&mut *tx))
                    .await?
                    .rows_affected()
            }
            Scope::Tournament(_) => 0,
        };

        with_transaction_timeout(tx.commit()).await?;

        Ok(ResetSummary {
            matches,
            players,
            tournaments,
        })
    }
}

/// Mock implementation for testing
#[cfg(any(test, feature = "test-util"))]
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct State {
        tournaments: BTreeMap<TournamentId, Tournament>,
        players: BTreeMap<PlayerId, Player>,
        matches: Vec<Match>,
        next_id: i64,
    }

    impl State {
        fn next_id(&mut self) -> i64 {
            self.next_id += 1;
            self.next_id
        }

        fn standings(&self, scope: Scope) -> Vec<StandingsRow> {
            let mut rows: Vec<StandingsRow> = self
                .players
                .values()
                .filter(|p| scope.contains(p.tournament_id))
                .map(|p| {
                    let wins = self.matches.iter().filter(|m| m.winner_id == p.id).count();
                    let played = self
                        .matches
                        .iter()
                        .filter(|m| m.winner_id == p.id || m.loser_id == p.id)
                        .count();
                    StandingsRow::new(p.id, p.name.clone(), wins as i64, played as i64)
                })
                .collect();

            rows.sort_by(|a, b| {
                b.wins
                    .cmp(&a.wins)
                    .then(a.matches.cmp(&b.matches))
                    .then(a.player_id.cmp(&b.player_id))
            });

            rows
        }
    }

    /// In-memory store with the same ordering rules as the PostgreSQL one
    #[derive(Default)]
    pub struct MockTournamentRepository {
        state: Mutex<State>,
    }

    impl MockTournamentRepository {
        pub fn new() -> Self {
            Self::default()
        }
    }

    #[async_trait]
    impl StandingsProvider for MockTournamentRepository {
        async fn standings(&self, scope: Scope) -> TournamentResult<Vec<StandingsRow>> {
            Ok(self.state.lock().unwrap().standings(scope))
        }
    }

    #[async_trait]
    impl TournamentRepository for MockTournamentRepository {
        async fn create_tournament(&self, name: &str) -> TournamentResult<Tournament> {
            let mut state = self.state.lock().unwrap();
            let tournament = Tournament {
                id: state.next_id(),
                name: name.to_string(),
                created_at: chrono::Utc::now(),
            };
            state.tournaments.insert(tournament.id, tournament.clone());
            Ok(tournament)
        }

        async fn find_tournament(&self, id: TournamentId) -> TournamentResult<Option<Tournament>> {
            Ok(self.state.lock().unwrap().tournaments.get(&id).cloned())
        }

        async fn list_tournaments(&self) -> TournamentResult<Vec<Tournament>> {
            Ok(self
                .state
                .lock()
                .unwrap()
                .tournaments
                .values()
                .cloned()
                .collect())
        }

        async fn delete_tournaments(&self) -> TournamentResult<u64> {
            let mut state = self.state.lock().unwrap();
            let removed = state.tournaments.len() as u64;
            *state = State {
                next_id: state.next_id,
                ..State::default()
            };
            Ok(removed)
        }

        async fn create_player(
            &self,
            tournament_id: TournamentId,
            name: &str,
        ) -> TournamentResult<Player> {
            let mut state = self.state.lock().unwrap();
            if !state.tournaments.contains_key(&tournament_id) {
                return Err(TournamentError::NotFound(tournament_id));
            }

            let player = Player {
                id: state.next_id(),
                tournament_id,
                name: name.to_string(),
                registered_at: chrono::Utc::now(),
            };
            state.players.insert(player.id, player.clone());
            Ok(player)
        }

        async fn tournament_standings(
            &self,
            tournament_id: TournamentId,
        ) -> TournamentResult<Vec<StandingsRow>> {
            let state = self.state.lock().unwrap();
            if !state.tournaments.contains_key(&tournament_id) {
                return Err(TournamentError::NotFound(tournament_id));
            }
            Ok(state.standings(Scope::Tournament(tournament_id)))
        }

        async fn count_players(&self, scope: Scope) -> TournamentResult<i64> {
            let state = self.state.lock().unwrap();
            Ok(state
                .players
                .values()
                .filter(|p| scope.contains(p.tournament_id))
                .count() as i64)
        }

        async fn delete_players(&self, scope: Scope) -> TournamentResult<u64> {
            let mut state = self.state.lock().unwrap();
            let before = state.players.len();
            state.players.retain(|_, p| !scope.contains(p.tournament_id));
            state.matches.retain(|m| !scope.contains(m.tournament_id));
            Ok((before - state.players.len()) as u64)
        }

        async fn record_match(&self, winner: PlayerId, loser: PlayerId) -> TournamentResult<Match> {
            let mut state = self.state.lock().unwrap();
            let tournament_id = match_tournament(
                winner,
                state.players.get(&winner),
                loser,
                state.players.get(&loser),
            )?;

            let recorded = Match {
                id: state.next_id(),
                tournament_id,
                winner_id: winner,
                loser_id: loser,
                reported_at: chrono::Utc::now(),
            };
            state.matches.push(recorded.clone());
            Ok(recorded)
        }

        async fn list_matches(&self, scope: Scope) -> TournamentResult<Vec<Match>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .matches
                .iter()
                .filter(|m| scope.contains(m.tournament_id))
                .cloned()
                .collect())
        }

        async fn delete_matches(&self, scope: Scope) -> TournamentResult<u64> {
            let mut state = self.state.lock().unwrap();
            let before = state.matches.len();
            state.matches.retain(|m| !scope.contains(m.tournament_id));
            Ok((before - state.matches.len()) as u64)
        }

        async fn reset(&self, scope: Scope) -> TournamentResult<ResetSummary> {
            let matches = self.delete_matches(scope).await?;
            let players = self.delete_players(scope).await?;
            let tournaments = match scope {
                Scope::All => self.delete_tournaments().await?,
                Scope::Tournament(_) => 0,
            };

            Ok(ResetSummary {
                matches,
                players,
                tournaments,
            })
        }
    }

}
