//! Strategy capability.
//!
//! The protocol engine drives the game; a `Strategy` answers the three
//! questions the engine asks: where to start, where to place armies,
//! and what to attack or transfer. Strategies receive resolved
//! `Region` records and the current `State`, never raw ids, and are
//! called synchronously with no time budget enforced here.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::board::{AttackTransfer, PlaceArmies, Region};
use crate::state::State;

/// Starting regions a strategy must return when asked to pick.
pub const STARTING_PICKS: usize = 6;

/// Decision logic plugged into the protocol engine.
pub trait Strategy {
    /// Picks starting regions from the engine's candidates. The
    /// contract is exactly `STARTING_PICKS` entries, each drawn from
    /// `candidates`; returning fewer is reported as an error by the
    /// engine but still answered.
    fn pick_starting_regions<'a>(
        &mut self,
        state: &'a State,
        candidates: &[&'a Region],
    ) -> Vec<&'a Region>;

    /// Distributes this turn's production. The total is not validated
    /// by the framework; the game engine is the arbiter.
    fn place_armies(&mut self, state: &State, allowance: i32) -> Vec<PlaceArmies>;

    /// Chooses attacks and transfers for this turn.
    fn attack_or_transfer(&mut self, state: &State) -> Vec<AttackTransfer>;
}

/// Regions on the visible map currently held by us.
fn owned_regions<'a>(state: &'a State) -> Vec<&'a Region> {
    state
        .visible_map()
        .regions()
        .filter(|r| r.owner.is_player(state.my_name()))
        .collect()
}

/// The reference strategy the framework ships with: deterministic and
/// minimal, so a new bot compiles and plays before any real logic
/// exists. First candidates win, all armies pile on one region,
/// nothing ever attacks.
#[derive(Debug, Default)]
pub struct Baseline;

impl Strategy for Baseline {
    fn pick_starting_regions<'a>(
        &mut self,
        _state: &'a State,
        candidates: &[&'a Region],
    ) -> Vec<&'a Region> {
        candidates.iter().take(STARTING_PICKS).copied().collect()
    }

    fn place_armies(&mut self, state: &State, allowance: i32) -> Vec<PlaceArmies> {
        match owned_regions(state).first() {
            Some(region) => vec![PlaceArmies::new(state.my_name(), region.id(), allowance)],
            None => Vec::new(),
        }
    }

    fn attack_or_transfer(&mut self, _state: &State) -> Vec<AttackTransfer> {
        Vec::new()
    }
}

/// Sparring strategy: uniformly random but structurally legal moves.
/// Useful for integration tests and as a punching bag.
pub struct Random {
    rng: SmallRng,
}

impl Random {
    pub fn new(seed: u64) -> Self {
        Random {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Random {
            rng: SmallRng::from_entropy(),
        }
    }
}

impl Strategy for Random {
    fn pick_starting_regions<'a>(
        &mut self,
        _state: &'a State,
        candidates: &[&'a Region],
    ) -> Vec<&'a Region> {
        let mut shuffled: Vec<&Region> = candidates.to_vec();
        shuffled.shuffle(&mut self.rng);
        shuffled.truncate(STARTING_PICKS);
        shuffled
    }

    fn place_armies(&mut self, state: &State, allowance: i32) -> Vec<PlaceArmies> {
        let owned = owned_regions(state);
        match owned.as_slice() {
            [] => Vec::new(),
            regions => {
                let target = regions[self.rng.gen_range(0..regions.len())];
                vec![PlaceArmies::new(state.my_name(), target.id(), allowance)]
            }
        }
    }

    fn attack_or_transfer(&mut self, state: &State) -> Vec<AttackTransfer> {
        let mut moves = Vec::new();
        for region in owned_regions(state) {
            // One army must stay behind; no surplus, no move.
            if region.armies < 2 {
                continue;
            }
            let neighbors: Vec<u32> = region.neighbors().collect();
            if neighbors.is_empty() {
                continue;
            }
            let target = neighbors[self.rng.gen_range(0..neighbors.len())];
            moves.push(AttackTransfer::new(
                state.my_name(),
                region.id(),
                target,
                region.armies - 1,
            ));
        }
        moves
    }
}
