//! The persistent-collections interface used throughout every IR (§3, §9).
//!
//! The design notes are explicit that these containers are abstract:
//! "semantic containers with structural equality and cheap functional
//! update... specifics do not affect correctness so long as equality is
//! value-based and iteration over ordered maps preserves insertion order."
//! We pick one concrete realization and keep it behind these aliases so a
//! different backing structure can be swapped in without touching the IRs.
//!
//! - [`PersistentList`] — an ordered sequence (`im::Vector`, structural
//!   sharing, O(log n) update).
//! - [`PersistentSet`] — an unordered set (`im::HashSet`).
//! - [`PersistentMap`] — an unordered keyed mapping (`im::HashMap`), used
//!   for the package-level `Map<Symbol, AccessRecord>` and the preamble.
//! - [`OrderedMap`] — a keyed mapping that preserves insertion order on
//!   iteration (`indexmap::IndexMap` behind an `Arc` for cheap clones),
//!   used for struct fields and enum variants.

use std::hash::Hash;
use std::sync::Arc;

pub type PersistentList<T> = im::Vector<T>;
pub type PersistentSet<T> = im::HashSet<T>;
pub type PersistentMap<K, V> = im::HashMap<K, V>;

/// An insertion-order-preserving map with cheap (`Arc`-backed) clones.
///
/// Equality is structural and, per `indexmap`'s own contract, independent of
/// insertion order: two `OrderedMap`s are equal iff they hold the same
/// key-value pairs. Iteration order is always insertion order.
#[derive(Debug, Clone)]
pub struct OrderedMap<K, V>(Arc<indexmap::IndexMap<K, V>>);

impl<K, V> OrderedMap<K, V>
where
    K: Hash + Eq,
{
    #[must_use]
    pub fn new() -> Self {
        Self(Arc::new(indexmap::IndexMap::new()))
    }

    #[must_use]
    pub fn from_iter(entries: impl IntoIterator<Item = (K, V)>) -> Self {
        Self(Arc::new(entries.into_iter().collect()))
    }

    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, K, V> {
        self.0.iter()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, K, V> {
        self.0.keys()
    }

    /// Functional update: returns a new map with `key` bound to `value`,
    /// leaving `self` untouched. Clones the backing map's spine; cheap
    /// relative to the deep-cloned IR nodes that typically hold it.
    #[must_use]
    pub fn inserted(&self, key: K, value: V) -> Self
    where
        K: Clone,
        V: Clone,
    {
        let mut next = (*self.0).clone();
        next.insert(key, value);
        Self(Arc::new(next))
    }
}

impl<K, V> Default for OrderedMap<K, V>
where
    K: Hash + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> PartialEq for OrderedMap<K, V>
where
    K: Hash + Eq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<K, V> Eq for OrderedMap<K, V>
where
    K: Hash + Eq,
    V: Eq,
{
}

impl<K, V> FromIterator<(K, V)> for OrderedMap<K, V>
where
    K: Hash + Eq,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_iter(iter)
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedMap<K, V>
where
    K: Hash + Eq,
{
    type Item = (&'a K, &'a V);
    type IntoIter = indexmap::map::Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_insertion_order() {
        let a = OrderedMap::from_iter([("x", 1), ("y", 2)]);
        let b = OrderedMap::from_iter([("y", 2), ("x", 1)]);
        assert_eq!(a, b);
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let m = OrderedMap::from_iter([("b", 1), ("a", 2)]);
        let keys: Vec<_> = m.keys().copied().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn inserted_leaves_the_original_untouched() {
        let a = OrderedMap::from_iter([("x", 1)]);
        let b = a.inserted("y", 2);
        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 2);
    }
}
