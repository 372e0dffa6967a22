//! Continent records and the cached-priority wrapper.
//!
//! A continent groups regions and pays its reward to a player owning
//! every member. Membership and border sets are id sets maintained by
//! the `Map` arena as regions and edges are added.

use std::cell::Cell;
use std::collections::BTreeSet;

/// Lazily computed value tied to board topology.
///
/// Topology only changes during setup, so in practice a value is
/// computed once and then read for the rest of the run. `Map::link`
/// invalidates it when a new edge lands.
#[derive(Debug, Clone, Default)]
pub struct Cached<T: Copy>(Cell<Option<T>>);

impl<T: Copy> Cached<T> {
    pub fn new() -> Self {
        Cached(Cell::new(None))
    }

    /// Returns the cached value, computing and storing it on first use.
    pub fn get_or_compute(&self, compute: impl FnOnce() -> T) -> T {
        match self.0.get() {
            Some(v) => v,
            None => {
                let v = compute();
                self.0.set(Some(v));
                v
            }
        }
    }

    pub fn invalidate(&self) {
        self.0.set(None);
    }
}

impl<T: Copy + PartialEq> PartialEq for Cached<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0.get() == other.0.get()
    }
}

impl<T: Copy + Eq> Eq for Cached<T> {}

/// A group of regions with a production reward for full ownership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Continent {
    id: u32,
    reward: i32,
    regions: BTreeSet<u32>,
    borders: BTreeSet<u32>,
    pub(crate) priority: Cached<u32>,
}

impl Continent {
    pub fn new(id: u32, reward: i32) -> Self {
        Continent {
            id,
            reward,
            regions: BTreeSet::new(),
            borders: BTreeSet::new(),
            priority: Cached::new(),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Production bonus paid per turn for owning every member region.
    pub fn reward(&self) -> i32 {
        self.reward
    }

    /// Member region ids in ascending order.
    pub fn regions(&self) -> impl Iterator<Item = u32> + '_ {
        self.regions.iter().copied()
    }

    pub fn contains(&self, region: u32) -> bool {
        self.regions.contains(&region)
    }

    /// Regions with at least one neighbor outside this continent.
    /// Maintained incrementally by `Map::link`.
    pub fn border_regions(&self) -> impl Iterator<Item = u32> + '_ {
        self.borders.iter().copied()
    }

    pub fn border_count(&self) -> usize {
        self.borders.len()
    }

    pub(crate) fn insert_region(&mut self, region: u32) -> bool {
        self.regions.insert(region)
    }

    pub(crate) fn insert_border(&mut self, region: u32) {
        self.borders.insert(region);
    }
}
