//! Board representation.
//!
//! Contains the region/continent arena, the move types, and the optional
//! name table used for readable log output.

pub mod continent;
pub mod map;
pub mod moves;
pub mod names;
pub mod region;

pub use continent::{Cached, Continent};
pub use map::{Map, MapError};
pub use moves::{AttackTransfer, Move, PlaceArmies};
pub use names::NameTable;
pub use region::{Owner, Region, INITIAL_ARMIES};
