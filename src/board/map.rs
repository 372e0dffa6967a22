//! The board arena.
//!
//! A `Map` owns every region and continent, keyed by id, and is the only
//! place edges are created. Two instances exist at runtime: the complete
//! map built during setup and the visible map revealed progressively by
//! `update_map` reports. BTreeMaps keep iteration deterministic, which
//! the reward bookkeeping and the logs both rely on.

use std::collections::BTreeMap;

use super::continent::Continent;
use super::region::{Owner, Region};

/// Errors from board construction and lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error("unknown region id {0}")]
    UnknownRegion(u32),

    #[error("unknown continent id {0}")]
    UnknownContinent(u32),

    #[error("region {0} cannot neighbor itself")]
    SelfNeighbor(u32),
}

/// Id-keyed arena of regions and continents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Map {
    regions: BTreeMap<u32, Region>,
    continents: BTreeMap<u32, Continent>,
}

impl Map {
    pub fn new() -> Self {
        Map::default()
    }

    /// Adds a continent. A duplicate id is a no-op.
    pub fn add_continent(&mut self, continent: Continent) {
        self.continents.entry(continent.id()).or_insert(continent);
    }

    /// Adds a region and registers it with its continent.
    ///
    /// A duplicate region id is a no-op. The continent must already
    /// exist; setup input referencing an unknown continent is rejected
    /// here so the caller can skip the entry and keep going.
    pub fn add_region(&mut self, region: Region) -> Result<(), MapError> {
        if self.regions.contains_key(&region.id()) {
            return Ok(());
        }
        let continent = self
            .continents
            .get_mut(&region.continent())
            .ok_or(MapError::UnknownContinent(region.continent()))?;
        continent.insert_region(region.id());
        self.regions.insert(region.id(), region);
        Ok(())
    }

    /// Links two regions as neighbors, symmetrically and idempotently.
    ///
    /// Rejects self-reference. When the new edge crosses a continent
    /// boundary, both endpoints become border regions of their
    /// continents and any cached continent priorities are invalidated.
    pub fn link(&mut self, a: u32, b: u32) -> Result<(), MapError> {
        if a == b {
            return Err(MapError::SelfNeighbor(a));
        }
        if !self.regions.contains_key(&a) {
            return Err(MapError::UnknownRegion(a));
        }
        if !self.regions.contains_key(&b) {
            return Err(MapError::UnknownRegion(b));
        }

        let continent_a = self.regions[&a].continent();
        let continent_b = self.regions[&b].continent();

        // Both lookups were verified above.
        let inserted = match self.regions.get_mut(&a) {
            Some(r) => r.insert_neighbor(b),
            None => false,
        };
        if let Some(r) = self.regions.get_mut(&b) {
            r.insert_neighbor(a);
        }

        if inserted && continent_a != continent_b {
            if let Some(ca) = self.continents.get_mut(&continent_a) {
                ca.insert_border(a);
                ca.priority.invalidate();
            }
            if let Some(cb) = self.continents.get_mut(&continent_b) {
                cb.insert_border(b);
                cb.priority.invalidate();
            }
        }

        Ok(())
    }

    pub fn region(&self, id: u32) -> Option<&Region> {
        self.regions.get(&id)
    }

    pub fn region_mut(&mut self, id: u32) -> Option<&mut Region> {
        self.regions.get_mut(&id)
    }

    pub fn continent(&self, id: u32) -> Option<&Continent> {
        self.continents.get(&id)
    }

    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.regions.values()
    }

    pub fn continents(&self) -> impl Iterator<Item = &Continent> {
        self.continents.values()
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    pub fn continent_count(&self) -> usize {
        self.continents.len()
    }

    /// The sole owner of a continent, or `Owner::Unknown` when the
    /// continent is empty or its members disagree.
    ///
    /// A member id without a region record counts as `Unknown`. On the
    /// visible map this keeps a partially revealed continent
    /// indeterminate even when every revealed member agrees.
    pub fn owned_by(&self, continent_id: u32) -> Owner {
        let continent = match self.continents.get(&continent_id) {
            Some(c) => c,
            None => return Owner::Unknown,
        };

        static UNKNOWN: Owner = Owner::Unknown;
        let mut members = continent
            .regions()
            .map(|id| self.regions.get(&id).map_or(&UNKNOWN, |r| &r.owner));
        let first = match members.next() {
            Some(owner) => owner,
            None => return Owner::Unknown,
        };
        if members.all(|owner| owner == first) {
            first.clone()
        } else {
            Owner::Unknown
        }
    }

    /// Neighbors of a region held by someone other than its owner.
    /// On the visible map, unrevealed neighbors are not counted.
    pub fn enemy_neighbor_count(&self, region_id: u32) -> usize {
        let region = match self.regions.get(&region_id) {
            Some(r) => r,
            None => return 0,
        };
        region
            .neighbors()
            .filter(|n| {
                self.regions
                    .get(n)
                    .map(|r| r.owner != region.owner)
                    .unwrap_or(false)
            })
            .count()
    }

    pub fn has_enemy_neighbors(&self, region_id: u32) -> bool {
        self.enemy_neighbor_count(region_id) > 0
    }

    /// Edges from this continent's members into other continents.
    /// Each crossing edge counts once per direction of origin.
    pub fn invasion_paths(&self, continent_id: u32) -> u32 {
        let continent = match self.continents.get(&continent_id) {
            Some(c) => c,
            None => return 0,
        };

        let mut paths = 0;
        for id in continent.regions() {
            if let Some(region) = self.regions.get(&id) {
                paths += region
                    .neighbors()
                    .filter(|n| {
                        self.regions
                            .get(n)
                            .map(|r| r.continent() != continent_id)
                            .unwrap_or(false)
                    })
                    .count() as u32;
            }
        }
        paths
    }

    /// How contested a continent is: invasion paths times border
    /// regions. Cached per continent; topology is immutable after
    /// setup, so the cache effectively never invalidates during play.
    pub fn priority(&self, continent_id: u32) -> Option<u32> {
        let continent = self.continents.get(&continent_id)?;
        let value = continent
            .priority
            .get_or_compute(|| self.invasion_paths(continent_id) * continent.border_count() as u32);
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two continents of two regions each: 1,2 in continent 1 and
    /// 3,4 in continent 2, linked 1-2, 2-3, 3-4.
    fn two_continent_map() -> Map {
        let mut map = Map::new();
        map.add_continent(Continent::new(1, 5));
        map.add_continent(Continent::new(2, 3));
        for (region, continent) in [(1, 1), (2, 1), (3, 2), (4, 2)] {
            map.add_region(Region::new(region, continent)).unwrap();
        }
        map.link(1, 2).unwrap();
        map.link(2, 3).unwrap();
        map.link(3, 4).unwrap();
        map
    }

    #[test]
    fn add_continent_is_idempotent() {
        let mut map = Map::new();
        map.add_continent(Continent::new(1, 5));
        map.add_continent(Continent::new(1, 99));
        assert_eq!(map.continent_count(), 1);
        assert_eq!(map.continent(1).unwrap().reward(), 5);
    }

    #[test]
    fn add_region_requires_known_continent() {
        let mut map = Map::new();
        assert_eq!(
            map.add_region(Region::new(1, 9)),
            Err(MapError::UnknownContinent(9))
        );
        map.add_continent(Continent::new(9, 2));
        assert_eq!(map.add_region(Region::new(1, 9)), Ok(()));
        assert!(map.continent(9).unwrap().contains(1));
    }

    #[test]
    fn duplicate_region_is_noop() {
        let mut map = Map::new();
        map.add_continent(Continent::new(1, 5));
        map.add_region(Region::new(1, 1)).unwrap();
        let mut dup = Region::new(1, 1);
        dup.armies = 50;
        map.add_region(dup).unwrap();
        assert_eq!(map.region(1).unwrap().armies, 2);
    }

    #[test]
    fn link_is_symmetric_and_idempotent() {
        let mut map = two_continent_map();
        assert!(map.region(1).unwrap().is_neighbor(2));
        assert!(map.region(2).unwrap().is_neighbor(1));
        map.link(2, 1).unwrap();
        assert_eq!(map.region(1).unwrap().neighbors().count(), 1);
    }

    #[test]
    fn link_rejects_self_reference() {
        let mut map = two_continent_map();
        assert_eq!(map.link(1, 1), Err(MapError::SelfNeighbor(1)));
        assert!(!map.region(1).unwrap().is_neighbor(1));
    }

    #[test]
    fn link_rejects_unknown_region() {
        let mut map = two_continent_map();
        assert_eq!(map.link(1, 42), Err(MapError::UnknownRegion(42)));
    }

    #[test]
    fn crossing_edge_marks_border_regions() {
        let map = two_continent_map();
        // Edge 2-3 crosses the boundary; 1-2 and 3-4 do not.
        assert_eq!(
            map.continent(1).unwrap().border_regions().collect::<Vec<_>>(),
            vec![2]
        );
        assert_eq!(
            map.continent(2).unwrap().border_regions().collect::<Vec<_>>(),
            vec![3]
        );
    }

    #[test]
    fn owned_by_requires_unanimity() {
        let mut map = two_continent_map();
        assert_eq!(map.owned_by(1), Owner::Unknown);

        map.region_mut(1).unwrap().owner = Owner::from("p1");
        map.region_mut(2).unwrap().owner = Owner::from("p1");
        assert_eq!(map.owned_by(1), Owner::from("p1"));

        map.region_mut(2).unwrap().owner = Owner::from("p2");
        assert_eq!(map.owned_by(1), Owner::Unknown);
    }

    #[test]
    fn owned_by_empty_or_missing_continent_is_unknown() {
        let mut map = Map::new();
        map.add_continent(Continent::new(1, 5));
        assert_eq!(map.owned_by(1), Owner::Unknown);
        assert_eq!(map.owned_by(7), Owner::Unknown);
    }

    #[test]
    fn enemy_neighbors_count_differing_owners() {
        let mut map = two_continent_map();
        map.region_mut(1).unwrap().owner = Owner::from("p1");
        map.region_mut(2).unwrap().owner = Owner::from("p1");
        map.region_mut(3).unwrap().owner = Owner::from("p2");
        assert!(!map.has_enemy_neighbors(1));
        assert_eq!(map.enemy_neighbor_count(2), 1);
        // Region 4 is still Unknown, which differs from p2.
        assert_eq!(map.enemy_neighbor_count(3), 2);
        assert_eq!(map.enemy_neighbor_count(99), 0);
    }

    #[test]
    fn priority_is_paths_times_borders() {
        let map = two_continent_map();
        // Continent 1: one crossing edge (2->3), one border region.
        assert_eq!(map.invasion_paths(1), 1);
        assert_eq!(map.priority(1), Some(1));
        assert_eq!(map.priority(42), None);
    }

    #[test]
    fn priority_cache_survives_repeat_queries() {
        let map = two_continent_map();
        assert_eq!(map.priority(2), map.priority(2));
    }

    #[test]
    fn new_crossing_edge_invalidates_priority() {
        let mut map = two_continent_map();
        assert_eq!(map.priority(1), Some(1));
        // A second crossing edge: 1-4.
        map.link(1, 4).unwrap();
        // Continent 1 now has two border regions and two paths out.
        assert_eq!(map.invasion_paths(1), 2);
        assert_eq!(map.priority(1), Some(4));
    }
}
