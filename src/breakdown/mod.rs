//! Descriptive breakdowns computed from the loaded documents.

use serde::{ser::SerializeMap, Serialize, Serializer};

pub mod agency;
pub mod corrections;
pub mod title;
pub mod workforce;

pub use agency::agency_breakdown;
pub use corrections::{corrections_breakdown, CorrectionsBreakdown};
pub use title::title_breakdown;
pub use workforce::{load_workforce, read_workforce_sheet, WorkforceBreakdown, WorkforceRow};

/// Insertion-ordered map. Re-inserting a key replaces its value but keeps
/// the position it was first inserted at. Serializes as a JSON object in
/// that order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<K, V> {
    entries: Vec<(K, V)>,
}

/// Key → fraction of some total.
pub type Shares<K> = OrderedMap<K, f64>;

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: PartialEq, V> OrderedMap<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, key: &K) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    /// Returns the previous value, if any.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.position(&key) {
            Some(idx) => Some(std::mem::replace(&mut self.entries[idx].1, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.position(key).map(|idx| &self.entries[idx].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: PartialEq> OrderedMap<K, f64> {
    /// Add `amount` to the running total for `key`.
    pub fn add(&mut self, key: K, amount: f64) {
        match self.position(&key) {
            Some(idx) => self.entries[idx].1 += amount,
            None => self.entries.push((key, amount)),
        }
    }

    /// Largest first. Stable, so ties keep insertion order.
    pub fn sort_descending(&mut self) {
        self.entries.sort_by(|a, b| b.1.total_cmp(&a.1));
    }

    pub fn sum(&self) -> f64 {
        self.entries.iter().map(|(_, v)| v).sum()
    }
}

impl<K: Serialize, V: Serialize> Serialize for OrderedMap<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reinsert_keeps_first_position() {
        let mut m = OrderedMap::new();
        m.insert("b", 1);
        m.insert("a", 2);
        assert_eq!(m.insert("b", 3), Some(1));
        assert_eq!(m.iter().collect::<Vec<_>>(), vec![(&"b", &3), (&"a", &2)]);
    }

    #[test]
    fn add_accumulates_and_sorts_stably() {
        let mut s: Shares<&str> = Shares::new();
        s.add("x", 0.25);
        s.add("y", 0.5);
        s.add("z", 0.25);
        s.add("x", 0.5);
        s.sort_descending();
        assert_eq!(s.keys().copied().collect::<Vec<_>>(), vec!["x", "y", "z"]);
        assert_eq!(s.get(&"x"), Some(&0.75));
        assert!((s.sum() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn serializes_in_order() {
        let mut s: Shares<String> = Shares::new();
        s.insert("zeta".into(), 0.5);
        s.insert("alpha".into(), 0.25);
        assert_eq!(
            serde_json::to_string(&s).unwrap(),
            r#"{"zeta":0.5,"alpha":0.25}"#
        );
    }
}
