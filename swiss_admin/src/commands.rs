//! Command-line command parsing.

use swiss_tournament::tournament::{PlayerId, Scope, TournamentId};
use thiserror::Error;

/// One administrative operation, run per invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Apply the database schema
    Migrate,
    /// Register a tournament
    NewTournament { name: String },
    /// List tournaments
    Tournaments,
    /// Register a player in a tournament
    Register {
        tournament_id: TournamentId,
        name: String,
    },
    /// Record a match result
    Report { winner: PlayerId, loser: PlayerId },
    /// Show standings
    Standings { scope: Scope },
    /// Show recorded matches
    Matches { scope: Scope },
    /// Show next-round pairings
    Pairings { tournament_id: TournamentId },
    /// Count registered players
    Count { scope: Scope },
    /// Delete matches and players (and tournaments, when unscoped)
    Reset { scope: Scope },
}

/// Errors that can occur during command parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No command given.
    #[error("No command given. Run with --help to see available commands")]
    MissingCommand,
    /// Unrecognized command.
    #[error("Unrecognized command '{0}'. Run with --help to see available commands")]
    UnrecognizedCommand(String),
    /// Required argument missing.
    #[error("'{command}' requires {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    /// Argument is not a valid ID.
    #[error("Invalid {argument} '{value}'. Must be a positive integer")]
    InvalidId {
        argument: &'static str,
        value: String,
    },
    /// Too many arguments.
    #[error("Unexpected argument '{0}'")]
    UnexpectedArgument(String),
}

/// Parse the free (non-flag) arguments into a [`Command`].
///
/// # Examples
///
/// ```
/// use swiss_admin::commands::{Command, parse_command};
/// use swiss_tournament::tournament::Scope;
///
/// let args = vec!["standings".to_string(), "3".to_string()];
/// assert_eq!(
///     parse_command(&args),
///     Ok(Command::Standings { scope: Scope::Tournament(3) })
/// );
///
/// let args: Vec<String> = ["register", "1", "Bobby", "Fischer"]
///     .iter()
///     .map(|s| s.to_string())
///     .collect();
/// assert_eq!(
///     parse_command(&args),
///     Ok(Command::Register { tournament_id: 1, name: "Bobby Fischer".to_string() })
/// );
/// ```
pub fn parse_command(args: &[String]) -> Result<Command, ParseError> {
    let (name, rest) = args.split_first().ok_or(ParseError::MissingCommand)?;

    match name.as_str() {
        "migrate" => no_arguments(rest).map(|()| Command::Migrate),
        "tournaments" => no_arguments(rest).map(|()| Command::Tournaments),
        "new-tournament" => Ok(Command::NewTournament {
            name: joined_name(rest, "new-tournament")?,
        }),
        "register" => {
            let (tournament_id, rest) = required_id(rest, "register", "a tournament ID")?;
            Ok(Command::Register {
                tournament_id,
                name: joined_name(rest, "register")?,
            })
        }
        "report" => {
            let (winner, rest) = required_id(rest, "report", "a winner ID")?;
            let (loser, rest) = required_id(rest, "report", "a loser ID")?;
            no_arguments(rest)?;
            Ok(Command::Report { winner, loser })
        }
        "pairings" => {
            let (tournament_id, rest) = required_id(rest, "pairings", "a tournament ID")?;
            no_arguments(rest)?;
            Ok(Command::Pairings { tournament_id })
        }
        "standings" => optional_scope(rest).map(|scope| Command::Standings { scope }),
        "matches" => optional_scope(rest).map(|scope| Command::Matches { scope }),
        "count" => optional_scope(rest).map(|scope| Command::Count { scope }),
        "reset" => optional_scope(rest).map(|scope| Command::Reset { scope }),
        other => Err(ParseError::UnrecognizedCommand(other.to_string())),
    }
}

fn no_arguments(rest: &[String]) -> Result<(), ParseError> {
    match rest.first() {
        Some(extra) => Err(ParseError::UnexpectedArgument(extra.clone())),
        None => Ok(()),
    }
}

fn parse_id(value: &str, argument: &'static str) -> Result<i64, ParseError> {
    value
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| ParseError::InvalidId {
            argument,
            value: value.to_string(),
        })
}

fn required_id<'a>(
    rest: &'a [String],
    command: &'static str,
    argument: &'static str,
) -> Result<(i64, &'a [String]), ParseError> {
    let (value, rest) = rest
        .split_first()
        .ok_or(ParseError::MissingArgument { command, argument })?;
    Ok((parse_id(value, argument)?, rest))
}

fn optional_scope(rest: &[String]) -> Result<Scope, ParseError> {
    match rest {
        [] => Ok(Scope::All),
        [id] => parse_id(id, "tournament ID").map(Scope::Tournament),
        [_, extra, ..] => Err(ParseError::UnexpectedArgument(extra.clone())),
    }
}

/// Names may be passed quoted or as several words
fn joined_name(rest: &[String], command: &'static str) -> Result<String, ParseError> {
    let name = rest.join(" ");
    if name.trim().is_empty() {
        return Err(ParseError::MissingArgument {
            command,
            argument: "a name",
        });
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(input: &str) -> Vec<String> {
        input.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(parse_command(&args("migrate")), Ok(Command::Migrate));
        assert_eq!(parse_command(&args("tournaments")), Ok(Command::Tournaments));
    }

    #[test]
    fn test_new_tournament_joins_words() {
        assert_eq!(
            parse_command(&args("new-tournament Spring Open 2026")),
            Ok(Command::NewTournament {
                name: "Spring Open 2026".to_string()
            })
        );
    }

    #[test]
    fn test_new_tournament_requires_name() {
        assert!(matches!(
            parse_command(&args("new-tournament")),
            Err(ParseError::MissingArgument { .. })
        ));
    }

    #[test]
    fn test_register() {
        assert_eq!(
            parse_command(&args("register 4 Ada Lovelace")),
            Ok(Command::Register {
                tournament_id: 4,
                name: "Ada Lovelace".to_string()
            })
        );
    }

    #[test]
    fn test_register_invalid_tournament_id() {
        assert_eq!(
            parse_command(&args("register four Ada")),
            Err(ParseError::InvalidId {
                argument: "a tournament ID",
                value: "four".to_string()
            })
        );
    }

    #[test]
    fn test_report() {
        assert_eq!(
            parse_command(&args("report 7 9")),
            Ok(Command::Report { winner: 7, loser: 9 })
        );
    }

    #[test]
    fn test_report_missing_loser() {
        assert_eq!(
            parse_command(&args("report 7")),
            Err(ParseError::MissingArgument {
                command: "report",
                argument: "a loser ID"
            })
        );
    }

    #[test]
    fn test_report_rejects_extra_argument() {
        assert_eq!(
            parse_command(&args("report 7 9 11")),
            Err(ParseError::UnexpectedArgument("11".to_string()))
        );
    }

    #[test]
    fn test_scoped_commands() {
        assert_eq!(
            parse_command(&args("standings")),
            Ok(Command::Standings { scope: Scope::All })
        );
        assert_eq!(
            parse_command(&args("count 2")),
            Ok(Command::Count {
                scope: Scope::Tournament(2)
            })
        );
        assert_eq!(
            parse_command(&args("reset 5")),
            Ok(Command::Reset {
                scope: Scope::Tournament(5)
            })
        );
        assert_eq!(
            parse_command(&args("matches")),
            Ok(Command::Matches { scope: Scope::All })
        );
    }

    #[test]
    fn test_ids_must_be_positive() {
        assert!(matches!(
            parse_command(&args("pairings 0")),
            Err(ParseError::InvalidId { .. })
        ));
        assert!(matches!(
            parse_command(&args("standings -3")),
            Err(ParseError::InvalidId { .. })
        ));
    }

    #[test]
    fn test_pairings_requires_tournament() {
        assert!(matches!(
            parse_command(&args("pairings")),
            Err(ParseError::MissingArgument { .. })
        ));
    }

    #[test]
    fn test_missing_and_unknown_commands() {
        assert_eq!(parse_command(&[]), Err(ParseError::MissingCommand));
        assert_eq!(
            parse_command(&args("shuffle")),
            Err(ParseError::UnrecognizedCommand("shuffle".to_string()))
        );
    }

    #[test]
    fn test_parse_error_display() {
        let msg = ParseError::UnrecognizedCommand("shuffle".to_string()).to_string();
        assert!(msg.contains("shuffle"));
        assert!(msg.contains("--help"));
    }
}
