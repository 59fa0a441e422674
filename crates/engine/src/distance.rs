//! Symmetric distance table between location identifiers
//!
//! Pairs are unordered: `(A, B)` and `(B, A)` resolve to the same entry.
//! A missing pair is not an error; the engine falls back to injected noise
//! (see [`crate::rules::resolve_distance`]).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::EngineResult;

/// One row of a serialized distance table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceEntry {
    pub from: String,
    pub to: String,
    pub km: u32,
}

/// Distances in km keyed by an unordered location pair
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<DistanceEntry>", into = "Vec<DistanceEntry>")]
pub struct DistanceTable {
    entries: BTreeMap<(String, String), u32>,
}

/// Order the pair so both directions share one key
fn pair_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

impl DistanceTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// The town pairs the dashboard shipped with
    pub fn kenya_defaults() -> Self {
        Self::from_entries([
            ("Nairobi", "Mombasa", 480),
            ("Nairobi", "Kisumu", 350),
            ("Nairobi", "Eldoret", 310),
            ("Nairobi", "Nakuru", 160),
            ("Nairobi", "Thika", 45),
            ("Mombasa", "Kisumu", 580),
            ("Eldoret", "Kisumu", 65),
            ("Eldoret", "Mombasa", 620),
            ("Nakuru", "Kisumu", 190),
            ("Nakuru", "Mombasa", 320),
            ("Thika", "Mombasa", 435),
            ("Thika", "Kisumu", 305),
        ])
    }

    /// Build from `(a, b, km)` triples. Later duplicates win.
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str, u32)>) -> Self {
        let mut table = Self::new();
        for (a, b, km) in entries {
            table.insert(a, b, km);
        }
        table
    }

    /// Load a JSON array of `{ "from", "to", "km" }` rows
    pub fn from_file(path: &Path) -> EngineResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let table: DistanceTable = serde_json::from_str(&content)?;
        tracing::debug!(path = %path.display(), pairs = table.len(), "Loaded distance table");
        Ok(table)
    }

    /// Insert or replace the distance for an unordered pair
    pub fn insert(&mut self, a: &str, b: &str, km: u32) {
        self.entries.insert(pair_key(a, b), km);
    }

    /// Look up a pair in either order. Identical locations are 0 km.
    pub fn lookup(&self, a: &str, b: &str) -> Option<u32> {
        if a == b {
            return Some(0);
        }
        self.entries.get(&pair_key(a, b)).copied()
    }

    /// Number of stored pairs
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All pairs, sorted by location name
    pub fn entries(&self) -> impl Iterator<Item = DistanceEntry> + '_ {
        self.entries.iter().map(|((from, to), km)| DistanceEntry {
            from: from.clone(),
            to: to.clone(),
            km: *km,
        })
    }
}

impl From<Vec<DistanceEntry>> for DistanceTable {
    fn from(rows: Vec<DistanceEntry>) -> Self {
        let mut table = Self::new();
        for row in rows {
            table.insert(&row.from, &row.to, row.km);
        }
        table
    }
}

impl From<DistanceTable> for Vec<DistanceEntry> {
    fn from(table: DistanceTable) -> Self {
        table.entries().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_lookup_is_symmetric() {
        let table = DistanceTable::kenya_defaults();

        assert_eq!(table.lookup("Nairobi", "Mombasa"), Some(480));
        assert_eq!(table.lookup("Mombasa", "Nairobi"), Some(480));
        assert_eq!(table.lookup("Kisumu", "Eldoret"), Some(65));
    }

    #[test]
    fn test_missing_pair() {
        let table = DistanceTable::kenya_defaults();
        assert_eq!(table.lookup("Nakuru", "Eldoret"), None);
        assert_eq!(table.lookup("Nairobi", "Kampala"), None);
    }

    #[test]
    fn test_same_location_is_zero() {
        let table = DistanceTable::new();
        assert_eq!(table.lookup("Nairobi", "Nairobi"), Some(0));
    }

    #[test]
    fn test_insert_replaces_reverse_pair() {
        let mut table = DistanceTable::new();
        table.insert("A", "B", 10);
        table.insert("B", "A", 20);

        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup("A", "B"), Some(20));
    }

    #[test]
    fn test_defaults_size() {
        let table = DistanceTable::kenya_defaults();
        assert_eq!(table.len(), 12);
        assert!(!table.is_empty());
        assert!(DistanceTable::new().is_empty());
    }

    #[test]
    fn test_json_rows() {
        let json = r#"[
            { "from": "Nairobi", "to": "Mombasa", "km": 480 },
            { "from": "Kisumu", "to": "Eldoret", "km": 65 }
        ]"#;
        let table: DistanceTable = serde_json::from_str(json).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup("Eldoret", "Kisumu"), Some(65));

        let out = serde_json::to_string(&table).unwrap();
        assert!(out.contains("\"km\":480"));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{ "from": "Thika", "to": "Nairobi", "km": 45 }}]"#).unwrap();

        let table = DistanceTable::from_file(file.path()).unwrap();
        assert_eq!(table.lookup("Nairobi", "Thika"), Some(45));
    }
}
