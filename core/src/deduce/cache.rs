use hashbrown::HashMap;

use crate::*;

/// Verdicts computed against the current knowledge base.
///
/// Entries are only valid until the next fact; [`QueryCache::invalidate`] must run on every
/// mutation of the knowledge base.
#[derive(Clone, Debug, Default)]
pub struct QueryCache {
    provably_mine: HashMap<Coord2, bool>,
    provably_safe: HashMap<Coord2, bool>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn provably_mine(&self, coords: Coord2) -> Option<bool> {
        self.provably_mine.get(&coords).copied()
    }

    pub fn provably_safe(&self, coords: Coord2) -> Option<bool> {
        self.provably_safe.get(&coords).copied()
    }

    pub fn record_mine(&mut self, coords: Coord2, verdict: bool) {
        self.provably_mine.insert(coords, verdict);
    }

    pub fn record_safe(&mut self, coords: Coord2, verdict: bool) {
        self.provably_safe.insert(coords, verdict);
    }

    pub fn invalidate(&mut self) {
        self.provably_mine.clear();
        self.provably_safe.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.provably_mine.is_empty() && self.provably_safe.is_empty()
    }

    /// Number of cached entries as `(provably_mine, provably_safe)`.
    pub fn len(&self) -> (usize, usize) {
        (self.provably_mine.len(), self.provably_safe.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalidate_clears_both_maps() {
        let mut cache = QueryCache::new();
        cache.record_mine((0, 0), true);
        cache.record_safe((0, 1), false);
        assert_eq!(cache.len(), (1, 1));

        cache.invalidate();

        assert!(cache.is_empty());
        assert_eq!(cache.provably_mine((0, 0)), None);
        assert_eq!(cache.provably_safe((0, 1)), None);
    }

    #[test]
    fn maps_are_independent() {
        let mut cache = QueryCache::new();
        cache.record_mine((2, 3), false);

        assert_eq!(cache.provably_mine((2, 3)), Some(false));
        assert_eq!(cache.provably_safe((2, 3)), None);
    }
}
