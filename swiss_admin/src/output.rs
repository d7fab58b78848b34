//! Rendering of command results as text or JSON.

use std::fmt::{self, Write};
use std::str::FromStr;

use swiss_tournament::tournament::Scope;
use thiserror::Error;

use crate::runner::Outcome;

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable tables
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown format '{other}', expected 'text' or 'json'")),
        }
    }
}

/// Errors produced while rendering an outcome
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to format output")]
    Text(#[from] fmt::Error),
}

/// Render an outcome in the requested format
pub fn render(outcome: &Outcome, format: OutputFormat) -> Result<String, RenderError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(outcome)?),
        OutputFormat::Text => {
            let mut out = String::new();
            render_text(&mut out, outcome)?;
            Ok(out.trim_end().to_string())
        }
    }
}

fn render_text(out: &mut impl Write, outcome: &Outcome) -> fmt::Result {
    match outcome {
        Outcome::Migrated => write!(out, "Schema is up to date"),
        Outcome::TournamentRegistered { id } | Outcome::PlayerRegistered { id } => {
            write!(out, "{id}")
        }
        Outcome::Tournaments(tournaments) => {
            writeln!(out, "{:>6}  {:<32}  Created", "ID", "Name")?;
            for t in tournaments {
                writeln!(
                    out,
                    "{:>6}  {:<32}  {}",
                    t.id,
                    t.name,
                    t.created_at.format("%Y-%m-%d %H:%M")
                )?;
            }
            Ok(())
        }
        Outcome::MatchReported(m) => write!(
            out,
            "Recorded match {}: player {} beat player {}",
            m.id, m.winner_id, m.loser_id
        ),
        Outcome::Standings(rows) => {
            writeln!(
                out,
                "{:>4}  {:>6}  {:<32}  {:>4}  {:>6}  {:>7}",
                "Rank", "ID", "Name", "Wins", "Losses", "Matches"
            )?;
            for (rank, row) in rows.iter().enumerate() {
                writeln!(
                    out,
                    "{:>4}  {:>6}  {:<32}  {:>4}  {:>6}  {:>7}",
                    rank + 1,
                    row.player_id,
                    row.name,
                    row.wins,
                    row.losses(),
                    row.matches
                )?;
            }
            Ok(())
        }
        Outcome::Matches(matches) => {
            for m in matches {
                writeln!(
                    out,
                    "#{} (tournament {}): {} beat {}",
                    m.id, m.tournament_id, m.winner_id, m.loser_id
                )?;
            }
            Ok(())
        }
        Outcome::Pairings(pairings) => {
            for (board, pairing) in pairings.iter().enumerate() {
                writeln!(out, "Board {}: {}", board + 1, pairing)?;
            }
            Ok(())
        }
        Outcome::PlayerCount { count, .. } => write!(out, "{count}"),
        Outcome::Reset(summary) => write!(
            out,
            "Removed {} match(es), {} player(s), {} tournament(s)",
            summary.matches, summary.players, summary.tournaments
        ),
    }
}

/// Short label for a scope, used in log lines
pub fn scope_label(scope: Scope) -> String {
    match scope {
        Scope::All => "all tournaments".to_string(),
        Scope::Tournament(id) => format!("tournament {id}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swiss_tournament::pairing::swiss_pairings;
    use swiss_tournament::tournament::{ResetSummary, StandingsRow};

    fn standings() -> Vec<StandingsRow> {
        vec![
            StandingsRow::new(1, "Ada", 1, 1),
            StandingsRow::new(2, "Grace", 0, 1),
        ]
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!(" TEXT ".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_render_registered_id_is_bare() {
        let text = render(&Outcome::PlayerRegistered { id: 42 }, OutputFormat::Text).unwrap();
        assert_eq!(text, "42");
    }

    #[test]
    fn test_render_standings_text() {
        let text = render(&Outcome::Standings(standings()), OutputFormat::Text).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Rank"));
        assert!(lines[0].contains("Losses"));
        assert!(lines[1].contains("Ada"));
        assert!(lines[2].contains("Grace"));
        assert_eq!(
            lines[2].split_whitespace().collect::<Vec<_>>(),
            vec!["2", "2", "Grace", "0", "1", "1"]
        );
    }

    #[test]
    fn test_render_pairings_text() {
        let pairings = swiss_pairings(&standings()).unwrap();
        let text = render(&Outcome::Pairings(pairings), OutputFormat::Text).unwrap();
        assert_eq!(text, "Board 1: Ada (#1) vs Grace (#2)");
    }

    #[test]
    fn test_render_json_is_tagged() {
        let outcome = Outcome::Reset(ResetSummary {
            matches: 1,
            players: 2,
            tournaments: 0,
        });
        let json = render(&outcome, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["kind"], "reset");
        assert_eq!(value["data"]["players"], 2);
    }

    #[test]
    fn test_render_count_json() {
        let outcome = Outcome::PlayerCount {
            scope: Scope::Tournament(3),
            count: 8,
        };
        let json = render(&outcome, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["data"]["count"], 8);
        assert_eq!(value["data"]["scope"]["Tournament"], 3);
    }

    #[test]
    fn test_scope_label() {
        assert_eq!(scope_label(Scope::All), "all tournaments");
        assert_eq!(scope_label(Scope::Tournament(5)), "tournament 5");
    }
}
