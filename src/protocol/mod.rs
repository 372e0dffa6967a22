//! Protocol handling.
//!
//! Implements the line-oriented Conquest engine protocol: command
//! parsing for the read loop and the wire notation for move responses.

pub mod moves;
pub mod parser;

pub use moves::{format_moves, parse_move, MoveError, NO_MOVES};
pub use parser::{parse_command, Command, MapUpdate};
