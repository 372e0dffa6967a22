//! Protocol command parser.
//!
//! Turns one raw engine line into a typed `Command` the protocol engine
//! dispatches on. Malformed lines (unknown keyword, wrong argument
//! count, bad integer) are logged and yield `None`: the line is
//! abandoned and the read loop moves on. References to unknown region
//! or continent ids are not resolved here; the engine does that per
//! entry so one bad id never sinks the rest of a command.

use crate::log::Logger;

/// One engine-reported `(region, owner, armies)` triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapUpdate {
    pub region: u32,
    pub owner: String,
    pub armies: i32,
}

/// A parsed engine-to-bot command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `settings your_bot NAME`
    YourBot(String),

    /// `settings opponent_bot NAME`
    OpponentBot(String),

    /// `settings starting_armies N`
    StartingArmies(i32),

    /// `setup_map super_regions (ID REWARD)+`
    SetupContinents(Vec<(u32, i32)>),

    /// `setup_map regions (ID CONTINENT_ID)+`
    SetupRegions(Vec<(u32, u32)>),

    /// `setup_map neighbors (ID NID,NID,...)+`
    SetupNeighbors(Vec<(u32, Vec<u32>)>),

    /// `pick_starting_regions TIMEOUT ID...` -- the timeout is ignored.
    PickStartingRegions(Vec<u32>),

    /// `update_map (ID OWNER ARMIES)+`
    UpdateMap(Vec<MapUpdate>),

    /// `opponent_moves CSV` -- raw comma slots, resolved by the engine.
    OpponentMoves(Vec<String>),

    /// `go place_armies [TIMEOUT]`
    GoPlaceArmies,

    /// `go attack/transfer [TIMEOUT]`
    GoAttackTransfer,
}

/// Parses a single input line into a `Command`.
///
/// Returns `None` for empty lines and for protocol errors, which are
/// reported through `log`.
pub fn parse_command(line: &str, log: &Logger) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    match tokens[0] {
        "settings" => parse_settings(&tokens, log),
        "setup_map" => parse_setup_map(&tokens, log),
        "pick_starting_regions" => parse_pick(&tokens, log),
        "update_map" => parse_update_map(&tokens, log),
        "opponent_moves" => parse_opponent_moves(trimmed),
        "go" => parse_go(&tokens, log),

        other => {
            log.error(&format!("unknown command: {}", other));
            None
        }
    }
}

fn parse_int<T: std::str::FromStr>(token: &str, log: &Logger) -> Option<T> {
    match token.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            log.error(&format!("invalid number: '{}'", token));
            None
        }
    }
}

/// Parses `settings <your_bot|opponent_bot|starting_armies> <value>`.
fn parse_settings(tokens: &[&str], log: &Logger) -> Option<Command> {
    if tokens.len() != 3 {
        log.error(&format!(
            "wrong argument count for settings: expected 3, was {}",
            tokens.len()
        ));
        return None;
    }

    match tokens[1] {
        "your_bot" => Some(Command::YourBot(tokens[2].to_string())),
        "opponent_bot" => Some(Command::OpponentBot(tokens[2].to_string())),
        "starting_armies" => Some(Command::StartingArmies(parse_int(tokens[2], log)?)),
        other => {
            log.error(&format!("unknown command: settings {}", other));
            None
        }
    }
}

/// Parses the three `setup_map` sub-commands, each a repeated group.
fn parse_setup_map(tokens: &[&str], log: &Logger) -> Option<Command> {
    if tokens.len() < 4 {
        log.error(&format!(
            "wrong argument count for setup_map: expected at least 4, was {}",
            tokens.len()
        ));
        return None;
    }

    match tokens[1] {
        "super_regions" => {
            let pairs = parse_pairs(&tokens[2..], log)?;
            Some(Command::SetupContinents(pairs))
        }
        "regions" => {
            let pairs = parse_pairs(&tokens[2..], log)?;
            Some(Command::SetupRegions(pairs))
        }
        "neighbors" => {
            if tokens[2..].len() % 2 != 0 {
                log.error("setup_map neighbors: odd token count");
                return None;
            }
            let mut entries = Vec::new();
            for pair in tokens[2..].chunks_exact(2) {
                let id = parse_int(pair[0], log)?;
                let mut neighbors = Vec::new();
                for part in pair[1].split(',').filter(|p| !p.is_empty()) {
                    neighbors.push(parse_int(part, log)?);
                }
                entries.push((id, neighbors));
            }
            Some(Command::SetupNeighbors(entries))
        }
        other => {
            log.error(&format!("unknown command: setup_map {}", other));
            None
        }
    }
}

/// Parses a flat `(A B)+` token run into typed pairs.
fn parse_pairs<A, B>(tokens: &[&str], log: &Logger) -> Option<Vec<(A, B)>>
where
    A: std::str::FromStr,
    B: std::str::FromStr,
{
    if tokens.len() % 2 != 0 {
        log.error("setup_map: odd token count in pair list");
        return None;
    }
    let mut pairs = Vec::with_capacity(tokens.len() / 2);
    for pair in tokens.chunks_exact(2) {
        pairs.push((parse_int(pair[0], log)?, parse_int(pair[1], log)?));
    }
    Some(pairs)
}

/// Parses `pick_starting_regions TIMEOUT ID...`.
///
/// The timeout token is accepted and ignored; the core enforces no
/// time budget. Candidate tokens that are not numbers are skipped with
/// a warning, like any other bad entry reference.
fn parse_pick(tokens: &[&str], log: &Logger) -> Option<Command> {
    if tokens.len() < 2 {
        log.error(&format!(
            "wrong argument count for pick_starting_regions: expected at least 2, was {}",
            tokens.len()
        ));
        return None;
    }

    let mut ids = Vec::new();
    for token in &tokens[2..] {
        match token.parse() {
            Ok(id) => ids.push(id),
            Err(_) => log.warn(&format!("skipping malformed candidate id '{}'", token)),
        }
    }
    Some(Command::PickStartingRegions(ids))
}

/// Parses `update_map (ID OWNER ARMIES)+`.
fn parse_update_map(tokens: &[&str], log: &Logger) -> Option<Command> {
    if (tokens.len() - 1) % 3 != 0 {
        log.error(&format!(
            "update_map arguments not in triples: {} tokens",
            tokens.len() - 1
        ));
        return None;
    }

    let mut updates = Vec::new();
    for triple in tokens[1..].chunks_exact(3) {
        updates.push(MapUpdate {
            region: parse_int(triple[0], log)?,
            owner: triple[1].to_string(),
            armies: parse_int(triple[2], log)?,
        });
    }
    Some(Command::UpdateMap(updates))
}

/// Splits `opponent_moves CSV` into raw comma slots. Each slot is a
/// whole move entry with internal spaces; the engine parses and
/// resolves them one by one.
fn parse_opponent_moves(line: &str) -> Option<Command> {
    let rest = line.strip_prefix("opponent_moves").unwrap_or("").trim();
    let slots: Vec<String> = rest
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    Some(Command::OpponentMoves(slots))
}

/// Parses `go <place_armies|attack/transfer> [TIMEOUT]`.
fn parse_go(tokens: &[&str], log: &Logger) -> Option<Command> {
    if tokens.len() < 2 || tokens.len() > 3 {
        log.error(&format!(
            "wrong argument count for go: expected 2 or 3, was {}",
            tokens.len()
        ));
        return None;
    }

    match tokens[1] {
        "place_armies" => Some(Command::GoPlaceArmies),
        "attack/transfer" => Some(Command::GoAttackTransfer),
        other => {
            log.error(&format!("unknown command: go {}", other));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Option<Command> {
        parse_command(line, &Logger::null())
    }

    #[test]
    fn parse_empty_line_returns_none() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("   "), None);
        assert_eq!(parse("\t"), None);
    }

    #[test]
    fn parse_unknown_command_returns_none() {
        assert_eq!(parse("frobnicate 1 2"), None);
    }

    #[test]
    fn parse_settings_identities() {
        assert_eq!(
            parse("settings your_bot player1"),
            Some(Command::YourBot("player1".to_string()))
        );
        assert_eq!(
            parse("settings opponent_bot player2"),
            Some(Command::OpponentBot("player2".to_string()))
        );
    }

    #[test]
    fn parse_settings_starting_armies() {
        assert_eq!(
            parse("settings starting_armies 7"),
            Some(Command::StartingArmies(7))
        );
        assert_eq!(parse("settings starting_armies many"), None);
    }

    #[test]
    fn parse_settings_malformed_returns_none() {
        assert_eq!(parse("settings your_bot"), None);
        assert_eq!(parse("settings your_bot a b"), None);
        assert_eq!(parse("settings time_bank 10000"), None);
    }

    #[test]
    fn parse_setup_super_regions() {
        assert_eq!(
            parse("setup_map super_regions 1 5 2 3"),
            Some(Command::SetupContinents(vec![(1, 5), (2, 3)]))
        );
    }

    #[test]
    fn parse_setup_regions() {
        assert_eq!(
            parse("setup_map regions 1 1 2 1 3 2"),
            Some(Command::SetupRegions(vec![(1, 1), (2, 1), (3, 2)]))
        );
    }

    #[test]
    fn parse_setup_neighbors() {
        assert_eq!(
            parse("setup_map neighbors 1 2,3 2 3"),
            Some(Command::SetupNeighbors(vec![
                (1, vec![2, 3]),
                (2, vec![3]),
            ]))
        );
    }

    #[test]
    fn parse_setup_map_malformed_returns_none() {
        assert_eq!(parse("setup_map"), None);
        assert_eq!(parse("setup_map super_regions 1"), None);
        assert_eq!(parse("setup_map super_regions 1 5 2"), None);
        assert_eq!(parse("setup_map oceans 1 5"), None);
        assert_eq!(parse("setup_map neighbors 1 two,3"), None);
    }

    #[test]
    fn parse_pick_starting_regions_ignores_timeout() {
        assert_eq!(
            parse("pick_starting_regions 2000 1 7 12 13 18 15 20 25 29 37 42 41"),
            Some(Command::PickStartingRegions(vec![
                1, 7, 12, 13, 18, 15, 20, 25, 29, 37, 42, 41
            ]))
        );
    }

    #[test]
    fn parse_pick_skips_malformed_ids() {
        assert_eq!(
            parse("pick_starting_regions 2000 1 x 3"),
            Some(Command::PickStartingRegions(vec![1, 3]))
        );
    }

    #[test]
    fn parse_update_map_triples() {
        assert_eq!(
            parse("update_map 1 player1 2 2 player1 4 3 neutral 2"),
            Some(Command::UpdateMap(vec![
                MapUpdate {
                    region: 1,
                    owner: "player1".to_string(),
                    armies: 2,
                },
                MapUpdate {
                    region: 2,
                    owner: "player1".to_string(),
                    armies: 4,
                },
                MapUpdate {
                    region: 3,
                    owner: "neutral".to_string(),
                    armies: 2,
                },
            ]))
        );
    }

    #[test]
    fn parse_update_map_incomplete_triple_returns_none() {
        assert_eq!(parse("update_map 1 player1"), None);
        assert_eq!(parse("update_map 1 player1 two"), None);
    }

    #[test]
    fn parse_opponent_moves_splits_slots() {
        assert_eq!(
            parse("opponent_moves player2 place_armies 7 3, player2 attack/transfer 7 6 5"),
            Some(Command::OpponentMoves(vec![
                "player2 place_armies 7 3".to_string(),
                "player2 attack/transfer 7 6 5".to_string(),
            ]))
        );
    }

    #[test]
    fn parse_opponent_moves_empty_report() {
        assert_eq!(parse("opponent_moves"), Some(Command::OpponentMoves(vec![])));
        assert_eq!(parse("opponent_moves  "), Some(Command::OpponentMoves(vec![])));
    }

    #[test]
    fn parse_go_subcommands() {
        assert_eq!(parse("go place_armies 2000"), Some(Command::GoPlaceArmies));
        assert_eq!(
            parse("go attack/transfer 2000"),
            Some(Command::GoAttackTransfer)
        );
        // The timeout is optional; the core never enforces one.
        assert_eq!(parse("go place_armies"), Some(Command::GoPlaceArmies));
    }

    #[test]
    fn parse_go_malformed_returns_none() {
        assert_eq!(parse("go"), None);
        assert_eq!(parse("go conquer 2000"), None);
        assert_eq!(parse("go place_armies 2000 extra"), None);
    }

    #[test]
    fn parse_with_leading_trailing_whitespace() {
        assert_eq!(parse("  go place_armies 2000  "), Some(Command::GoPlaceArmies));
    }
}
