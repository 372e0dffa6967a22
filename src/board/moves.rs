//! Move types.
//!
//! The engine understands two move kinds: placing new armies on an
//! owned region, and moving armies between neighboring regions (the
//! engine decides whether that is an attack or a transfer from the
//! target's ownership). Moves carry region ids, not references. Each
//! move displays as exactly the line fragment the engine parses;
//! batch formatting and the inverse parse live in `protocol::moves`.

use std::fmt;

/// Placement of new armies on a region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceArmies {
    pub player: String,
    pub region: u32,
    pub armies: i32,
}

impl PlaceArmies {
    pub fn new(player: impl Into<String>, region: u32, armies: i32) -> Self {
        PlaceArmies {
            player: player.into(),
            region,
            armies,
        }
    }
}

impl fmt::Display for PlaceArmies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} place_armies {} {}", self.player, self.region, self.armies)
    }
}

/// Movement of armies from a region to a neighboring region.
///
/// Combat, if any, is resolved remotely by the game engine; the true
/// outcome is only observed through the next `update_map` report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackTransfer {
    pub player: String,
    pub source: u32,
    pub target: u32,
    pub armies: i32,
}

impl AttackTransfer {
    pub fn new(player: impl Into<String>, source: u32, target: u32, armies: i32) -> Self {
        AttackTransfer {
            player: player.into(),
            source,
            target,
            armies,
        }
    }
}

impl fmt::Display for AttackTransfer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} attack/transfer {} {} {}",
            self.player, self.source, self.target, self.armies
        )
    }
}

/// Either move kind, as reported in an `opponent_moves` batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Move {
    PlaceArmies(PlaceArmies),
    AttackTransfer(AttackTransfer),
}

impl Move {
    pub fn player(&self) -> &str {
        match self {
            Move::PlaceArmies(m) => &m.player,
            Move::AttackTransfer(m) => &m.player,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::PlaceArmies(m) => fmt::Display::fmt(m, f),
            Move::AttackTransfer(m) => fmt::Display::fmt(m, f),
        }
    }
}

impl From<PlaceArmies> for Move {
    fn from(m: PlaceArmies) -> Self {
        Move::PlaceArmies(m)
    }
}

impl From<AttackTransfer> for Move {
    fn from(m: AttackTransfer) -> Self {
        Move::AttackTransfer(m)
    }
}
