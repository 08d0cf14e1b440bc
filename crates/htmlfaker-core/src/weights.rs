use std::collections::BTreeMap;
use std::fmt;

/// Order-preserving table of relative weights.
///
/// Iteration follows insertion order: registry defaults first, then keys
/// introduced by overrides. Weighted selection walks the table in this order,
/// so a fixed random sequence always selects the same key.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightTable<K> {
    name: &'static str,
    entries: Vec<(K, f64)>,
}

impl<K: Copy + PartialEq> WeightTable<K> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: Vec::new(),
        }
    }

    pub fn from_entries(name: &'static str, entries: impl IntoIterator<Item = (K, f64)>) -> Self {
        let mut table = Self::new(name);
        for (key, weight) in entries {
            table.set(key, weight);
        }
        table
    }

    /// Name used in error messages and logs.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Replace the weight of an existing key in place, or append a new key.
    pub fn set(&mut self, key: K, weight: f64) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = weight,
            None => self.entries.push((key, weight)),
        }
    }

    pub fn remove(&mut self, key: K) {
        self.entries.retain(|(existing, _)| *existing != key);
    }

    pub fn get(&self, key: K) -> Option<f64> {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == key)
            .map(|(_, weight)| *weight)
    }

    pub fn entries(&self) -> &[(K, f64)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, weight)| weight).sum()
    }

    /// Number of keys that can actually be selected.
    pub fn positive_count(&self) -> usize {
        self.entries.iter().filter(|(_, weight)| *weight > 0.0).count()
    }

    /// Copy of the table with `key` dropped, keeping the remaining order.
    pub fn without(&self, key: K) -> Self {
        let mut table = self.clone();
        table.remove(key);
        table
    }
}

impl<K: Copy + PartialEq + fmt::Display> WeightTable<K> {
    /// String-keyed view used when exporting a resolved configuration.
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        self.entries
            .iter()
            .map(|(key, weight)| (key.to_string(), *weight))
            .collect()
    }
}
