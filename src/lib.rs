//! Hegemon bot framework library.
//!
//! Exposes the board model, game state, protocol handling, strategy
//! contract, and logging for use by integration tests and the binary
//! entry point.

pub mod board;
pub mod engine;
pub mod log;
pub mod protocol;
pub mod state;
pub mod strategy;
