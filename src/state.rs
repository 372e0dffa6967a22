//! Game state tracking.
//!
//! Owns the two board views: the complete map, built once during setup,
//! and the visible map, revealed region by region as the engine reports
//! owner and army counts. Also keeps the per-turn production totals for
//! both players, the continent ownership ledger behind them, and the
//! opponent's most recent move batch.

use std::collections::BTreeMap;

use crate::board::{
    AttackTransfer, Continent, Map, MapError, Move, Owner, PlaceArmies, Region,
};
use crate::log::Logger;

/// Armies each player may place per turn before any continent bonus.
pub const DEFAULT_PRODUCTION: i32 = 5;

/// Everything the framework knows about the game in progress.
#[derive(Clone)]
pub struct State {
    my_name: String,
    opponent_name: String,
    complete: Map,
    visible: Map,
    my_production: i32,
    opponent_production: i32,
    /// Continent id -> player currently credited with its reward.
    owned_continents: BTreeMap<u32, String>,
    /// The opponent's last reported batch, replaced wholesale each turn.
    opponent_moves: Vec<Move>,
    log: Logger,
}

impl State {
    pub fn new(log: Logger) -> Self {
        State {
            my_name: String::new(),
            opponent_name: String::new(),
            complete: Map::new(),
            visible: Map::new(),
            my_production: DEFAULT_PRODUCTION,
            opponent_production: DEFAULT_PRODUCTION,
            owned_continents: BTreeMap::new(),
            opponent_moves: Vec::new(),
            log,
        }
    }

    pub fn my_name(&self) -> &str {
        &self.my_name
    }

    pub fn opponent_name(&self) -> &str {
        &self.opponent_name
    }

    pub fn set_my_name(&mut self, name: impl Into<String>) {
        self.my_name = name.into();
    }

    pub fn set_opponent_name(&mut self, name: impl Into<String>) {
        self.opponent_name = name.into();
    }

    /// Armies we may place this turn.
    pub fn my_production(&self) -> i32 {
        self.my_production
    }

    /// Armies the opponent may place this turn, as far as we can tell.
    pub fn opponent_production(&self) -> i32 {
        self.opponent_production
    }

    /// Applies `settings starting_armies`. Touches only our own
    /// allowance; the opponent is tracked through continent rewards.
    pub fn set_starting_armies(&mut self, armies: i32) {
        self.my_production = armies;
    }

    pub fn complete_map(&self) -> &Map {
        &self.complete
    }

    pub fn visible_map(&self) -> &Map {
        &self.visible
    }

    pub fn opponent_moves(&self) -> &[Move] {
        &self.opponent_moves
    }

    /// Replaces the stored opponent batch. Previous entries are gone;
    /// callers wanting trends must track them elsewhere.
    pub fn set_opponent_moves(&mut self, moves: Vec<Move>) {
        self.opponent_moves = moves;
    }

    /// Creates a continent on the complete map. Duplicate ids are a
    /// no-op, matching the idempotent setup contract.
    pub fn define_continent(&mut self, id: u32, reward: i32) {
        self.complete.add_continent(Continent::new(id, reward));
    }

    /// Creates a region on the complete map.
    pub fn define_region(&mut self, id: u32, continent: u32) -> Result<(), MapError> {
        self.complete.add_region(Region::new(id, continent))
    }

    /// Links two regions on the complete map, symmetrically.
    pub fn link_regions(&mut self, a: u32, b: u32) -> Result<(), MapError> {
        self.complete.link(a, b)
    }

    /// Applies one engine-reported `(region, owner, armies)` triple.
    ///
    /// First sighting of a region materializes it into the visible map:
    /// continent id, reward, and full membership are copied from the
    /// complete map, and the region is linked to those of its neighbors
    /// that have themselves already been revealed. The rest of the
    /// neighborhood appears as later reports arrive. This is the only
    /// write path for engine-reported owner and army state.
    pub fn update_map(&mut self, region_id: u32, owner: &str, armies: i32) -> Result<(), MapError> {
        let complete_region = self
            .complete
            .region(region_id)
            .ok_or(MapError::UnknownRegion(region_id))?;
        let continent_id = complete_region.continent();

        if self.visible.region(region_id).is_none() {
            if self.visible.continent(continent_id).is_none() {
                let source = self
                    .complete
                    .continent(continent_id)
                    .ok_or(MapError::UnknownContinent(continent_id))?;
                let mut copy = Continent::new(continent_id, source.reward());
                for member in source.regions() {
                    copy.insert_region(member);
                }
                self.visible.add_continent(copy);
            }

            let known_neighbors: Vec<u32> = complete_region
                .neighbors()
                .filter(|n| self.visible.region(*n).is_some())
                .collect();
            self.visible.add_region(Region::new(region_id, continent_id))?;
            for neighbor in known_neighbors {
                self.visible.link(region_id, neighbor)?;
            }
        }

        // Verified or created above.
        if let Some(region) = self.visible.region_mut(region_id) {
            region.owner = Owner::from(owner);
            region.armies = armies;
        }

        if self.log.is_debug() {
            self.log.debug(&format!(
                "state: region {} now held by {} with {} armies",
                region_id, owner, armies
            ));
        }
        Ok(())
    }

    /// Reconciles continent rewards against the current visible map.
    ///
    /// Must run exactly once per `update_map` batch, after the whole
    /// batch, so a continent that changes hands mid-batch is not
    /// mistaken for a stable transition. A second call with no
    /// intervening update changes nothing.
    pub fn check_rewards(&mut self) {
        let snapshot: Vec<(u32, i32, Owner)> = self
            .visible
            .continents()
            .map(|c| (c.id(), c.reward(), self.visible.owned_by(c.id())))
            .collect();

        for (continent_id, reward, owner) in snapshot {
            let current = owner.as_player().map(str::to_string);
            let previous = self.owned_continents.get(&continent_id).cloned();

            match (previous, current) {
                (Some(prev), None) => {
                    self.adjust_production(&prev, -reward);
                    self.owned_continents.remove(&continent_id);
                    if self.log.is_debug() {
                        self.log.debug(&format!(
                            "state: {} lost continent {}",
                            prev, continent_id
                        ));
                    }
                }
                (None, Some(cur)) => {
                    self.adjust_production(&cur, reward);
                    self.owned_continents.insert(continent_id, cur.clone());
                    if self.log.is_debug() {
                        self.log.debug(&format!(
                            "state: {} gained continent {}",
                            cur, continent_id
                        ));
                    }
                }
                (Some(prev), Some(cur)) if prev != cur => {
                    // Changed hands between batches: loss and gain at once.
                    self.adjust_production(&prev, -reward);
                    self.adjust_production(&cur, reward);
                    self.owned_continents.insert(continent_id, cur.clone());
                    if self.log.is_debug() {
                        self.log.debug(&format!(
                            "state: continent {} passed from {} to {}",
                            continent_id, prev, cur
                        ));
                    }
                }
                _ => {}
            }
        }
    }

    /// Player credited with a continent's reward, if any.
    pub fn continent_owner(&self, continent_id: u32) -> Option<&str> {
        self.owned_continents.get(&continent_id).map(String::as_str)
    }

    /// Adds placed armies to the target region. Reflects our own or the
    /// opponent's reported placements; regions not yet visible are
    /// skipped (nothing to update).
    pub fn process_place_armies(&mut self, mv: &PlaceArmies) {
        if let Some(region) = self.visible.region_mut(mv.region) {
            region.armies += mv.armies;
        }
    }

    /// Moves armies from source to target. No combat resolution: the
    /// engine reports the true outcome in the next update batch.
    pub fn process_attack_transfer(&mut self, mv: &AttackTransfer) {
        if let Some(source) = self.visible.region_mut(mv.source) {
            source.armies -= mv.armies;
        }
        if let Some(target) = self.visible.region_mut(mv.target) {
            target.armies += mv.armies;
        }
    }

    /// Applies either move kind.
    pub fn process_move(&mut self, mv: &Move) {
        match mv {
            Move::PlaceArmies(m) => self.process_place_armies(m),
            Move::AttackTransfer(m) => self.process_attack_transfer(m),
        }
    }

    /// Only self and opponent have production buckets; any other owner
    /// (the engine's "neutral", typically) adjusts nothing.
    fn adjust_production(&mut self, player: &str, delta: i32) {
        if player == self.my_name {
            self.my_production += delta;
        } else if player == self.opponent_name {
            self.opponent_production += delta;
        }
    }
}

impl Default for State {
    fn default() -> Self {
        State::new(Logger::null())
    }
}
