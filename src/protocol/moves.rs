//! Move wire notation.
//!
//! Formats move batches into the single response line the engine
//! expects, and parses the move entries the engine reports in
//! `opponent_moves`. A response with no moves is the literal `No moves`.

use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;

use crate::board::{AttackTransfer, Move, PlaceArmies};

/// The response line for an action command with nothing to do.
pub const NO_MOVES: &str = "No moves";

/// Errors when parsing one comma-slot of an `opponent_moves` report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("move entry too short: '{0}'")]
    TooShort(String),

    #[error("unknown move action '{0}'")]
    UnknownAction(String),

    #[error("{action} entry has {found} fields, expected {expected}")]
    WrongFieldCount {
        action: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("invalid number '{0}' in move entry")]
    InvalidNumber(String),
}

/// Formats a batch of moves into one response line: entries joined by
/// comma-space, or `No moves` for an empty batch.
pub fn format_moves<T: Display>(moves: &[T]) -> String {
    if moves.is_empty() {
        return NO_MOVES.to_string();
    }
    moves
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn parse_number<T: FromStr>(token: &str) -> Result<T, MoveError> {
    token
        .parse()
        .map_err(|_| MoveError::InvalidNumber(token.to_string()))
}

/// Parses one move entry, e.g. `p2 place_armies 7 3` or
/// `p2 attack/transfer 1 2 5`.
pub fn parse_move(entry: &str) -> Result<Move, MoveError> {
    let tokens: Vec<&str> = entry.split_whitespace().collect();
    if tokens.len() < 2 {
        return Err(MoveError::TooShort(entry.trim().to_string()));
    }

    match tokens[1] {
        "place_armies" => {
            if tokens.len() != 4 {
                return Err(MoveError::WrongFieldCount {
                    action: "place_armies",
                    expected: 4,
                    found: tokens.len(),
                });
            }
            let region = parse_number(tokens[2])?;
            let armies = parse_number(tokens[3])?;
            Ok(PlaceArmies::new(tokens[0], region, armies).into())
        }

        "attack/transfer" => {
            if tokens.len() != 5 {
                return Err(MoveError::WrongFieldCount {
                    action: "attack/transfer",
                    expected: 5,
                    found: tokens.len(),
                });
            }
            let source = parse_number(tokens[2])?;
            let target = parse_number(tokens[3])?;
            let armies = parse_number(tokens[4])?;
            Ok(AttackTransfer::new(tokens[0], source, target, armies).into())
        }

        other => Err(MoveError::UnknownAction(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_batch_is_no_moves() {
        let moves: Vec<Move> = Vec::new();
        assert_eq!(format_moves(&moves), "No moves");
    }

    #[test]
    fn single_move_has_no_separator() {
        let moves = vec![PlaceArmies::new("p1", 7, 3)];
        assert_eq!(format_moves(&moves), "p1 place_armies 7 3");
    }

    #[test]
    fn batch_joins_with_comma_space() {
        let moves = vec![
            AttackTransfer::new("p1", 1, 2, 5),
            AttackTransfer::new("p1", 2, 3, 2),
        ];
        assert_eq!(
            format_moves(&moves),
            "p1 attack/transfer 1 2 5, p1 attack/transfer 2 3 2"
        );
    }

    #[test]
    fn parse_place_armies_entry() {
        assert_eq!(
            parse_move("p2 place_armies 7 3"),
            Ok(PlaceArmies::new("p2", 7, 3).into())
        );
    }

    #[test]
    fn parse_attack_transfer_entry() {
        assert_eq!(
            parse_move(" p2 attack/transfer 1 2 5 "),
            Ok(AttackTransfer::new("p2", 1, 2, 5).into())
        );
    }

    #[test]
    fn parse_rejects_unknown_action() {
        assert_eq!(
            parse_move("p2 fortify 7 3"),
            Err(MoveError::UnknownAction("fortify".to_string()))
        );
    }

    #[test]
    fn parse_rejects_wrong_field_count() {
        assert_eq!(
            parse_move("p2 place_armies 7"),
            Err(MoveError::WrongFieldCount {
                action: "place_armies",
                expected: 4,
                found: 3,
            })
        );
        assert_eq!(
            parse_move("p2 attack/transfer 1 2"),
            Err(MoveError::WrongFieldCount {
                action: "attack/transfer",
                expected: 5,
                found: 4,
            })
        );
    }

    #[test]
    fn parse_rejects_bad_numbers() {
        assert_eq!(
            parse_move("p2 place_armies seven 3"),
            Err(MoveError::InvalidNumber("seven".to_string()))
        );
    }

    #[test]
    fn parse_rejects_short_entries() {
        assert_eq!(parse_move(""), Err(MoveError::TooShort(String::new())));
        assert_eq!(parse_move("p2"), Err(MoveError::TooShort("p2".to_string())));
    }

    #[test]
    fn round_trip_through_display() {
        let mv: Move = AttackTransfer::new("p1", 4, 9, 12).into();
        assert_eq!(parse_move(&mv.to_string()), Ok(mv));
    }
}
