//! Optional id-to-name lookup for log output.
//!
//! The protocol only ever speaks numeric ids; names exist purely to make
//! diagnostics readable. The table is swappable per board layout, with a
//! built-in table for the classic 42-region map the competition usually
//! runs. Core logic must never depend on a particular layout.

use std::collections::BTreeMap;

/// Region names for the classic layout, keyed by protocol id.
const CLASSIC_REGIONS: [(u32, &str); 42] = [
    (1, "Alaska"),
    (2, "Northwest Territory"),
    (3, "Greenland"),
    (4, "Alberta"),
    (5, "Ontario"),
    (6, "Quebec"),
    (7, "Western United States"),
    (8, "Eastern United States"),
    (9, "Central America"),
    (10, "Venezuela"),
    (11, "Peru"),
    (12, "Brazil"),
    (13, "Argentina"),
    (14, "Iceland"),
    (15, "Great Britain"),
    (16, "Scandinavia"),
    (17, "Ukraine"),
    (18, "Western Europe"),
    (19, "Northern Europe"),
    (20, "Southern Europe"),
    (21, "North Africa"),
    (22, "Egypt"),
    (23, "East Africa"),
    (24, "Congo"),
    (25, "South Africa"),
    (26, "Madagascar"),
    (27, "Ural"),
    (28, "Siberia"),
    (29, "Yakutsk"),
    (30, "Kamchatka"),
    (31, "Irkutsk"),
    (32, "Kazakhstan"),
    (33, "China"),
    (34, "Mongolia"),
    (35, "Japan"),
    (36, "Middle East"),
    (37, "India"),
    (38, "Siam"),
    (39, "Indonesia"),
    (40, "New Guinea"),
    (41, "Western Australia"),
    (42, "Eastern Australia"),
];

/// Continent names for the classic layout.
const CLASSIC_CONTINENTS: [(u32, &str); 6] = [
    (1, "North America"),
    (2, "South America"),
    (3, "Europe"),
    (4, "Africa"),
    (5, "Asia"),
    (6, "Australia"),
];

/// Swappable id-to-name table for regions and continents.
#[derive(Debug, Clone, Default)]
pub struct NameTable {
    regions: BTreeMap<u32, String>,
    continents: BTreeMap<u32, String>,
}

impl NameTable {
    /// An empty table: every lookup misses, logs fall back to raw ids.
    pub fn empty() -> Self {
        NameTable::default()
    }

    /// The classic 42-region, 6-continent layout.
    pub fn classic() -> Self {
        let mut table = NameTable::default();
        for (id, name) in CLASSIC_REGIONS {
            table.set_region(id, name);
        }
        for (id, name) in CLASSIC_CONTINENTS {
            table.set_continent(id, name);
        }
        table
    }

    pub fn set_region(&mut self, id: u32, name: impl Into<String>) {
        self.regions.insert(id, name.into());
    }

    pub fn set_continent(&mut self, id: u32, name: impl Into<String>) {
        self.continents.insert(id, name.into());
    }

    pub fn region(&self, id: u32) -> Option<&str> {
        self.regions.get(&id).map(String::as_str)
    }

    pub fn continent(&self, id: u32) -> Option<&str> {
        self.continents.get(&id).map(String::as_str)
    }

    /// The region name, or the id rendered as text on a miss.
    pub fn region_label(&self, id: u32) -> String {
        match self.region(id) {
            Some(name) => format!("{} ({})", id, name),
            None => id.to_string(),
        }
    }

    /// The continent name, or the id rendered as text on a miss.
    pub fn continent_label(&self, id: u32) -> String {
        match self.continent(id) {
            Some(name) => format!("{} ({})", id, name),
            None => id.to_string(),
        }
    }
}
