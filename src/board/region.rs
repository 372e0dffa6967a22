//! Region records and ownership.
//!
//! A region is the atomic territory of the board. Regions live in the
//! `Map` arena and refer to their continent and neighbors by id, never
//! by reference, so the board graph has no ownership cycles.

use std::collections::BTreeSet;
use std::fmt;

/// Armies a region holds at creation, before any engine report.
pub const INITIAL_ARMIES: i32 = 2;

/// Owner of a region or continent.
///
/// `Unknown` is the single indeterminate sentinel: a region the engine
/// has never reported on, or a continent whose members disagree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Owner {
    Unknown,
    Player(String),
}

impl Owner {
    /// The player name, or `None` for the unknown sentinel.
    pub fn as_player(&self) -> Option<&str> {
        match self {
            Owner::Unknown => None,
            Owner::Player(name) => Some(name.as_str()),
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Owner::Unknown)
    }

    /// True when this owner is the named player.
    pub fn is_player(&self, name: &str) -> bool {
        self.as_player() == Some(name)
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Owner::Unknown => f.write_str("unknown"),
            Owner::Player(name) => f.write_str(name),
        }
    }
}

impl From<&str> for Owner {
    fn from(name: &str) -> Self {
        Owner::Player(name.to_string())
    }
}

/// A single territory: static topology plus mutable owner/army state.
///
/// Topology (id, continent, neighbors) is fixed once setup completes;
/// only `owner` and `armies` change during play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    id: u32,
    continent: u32,
    neighbors: BTreeSet<u32>,
    pub owner: Owner,
    pub armies: i32,
}

impl Region {
    /// Creates a region in the given continent, unowned with the
    /// initial garrison.
    pub fn new(id: u32, continent: u32) -> Self {
        Region {
            id,
            continent,
            neighbors: BTreeSet::new(),
            owner: Owner::Unknown,
            armies: INITIAL_ARMIES,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Id of the continent this region belongs to. Immutable after
    /// creation.
    pub fn continent(&self) -> u32 {
        self.continent
    }

    /// Neighbor ids in ascending order.
    pub fn neighbors(&self) -> impl Iterator<Item = u32> + '_ {
        self.neighbors.iter().copied()
    }

    pub fn is_neighbor(&self, id: u32) -> bool {
        self.neighbors.contains(&id)
    }

    /// Records `id` as a neighbor. Half of an edge; `Map::link` is the
    /// only caller and maintains symmetry and the border sets.
    pub(crate) fn insert_neighbor(&mut self, id: u32) -> bool {
        self.neighbors.insert(id)
    }
}
