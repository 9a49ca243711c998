//! HashMap: unique keys to values over the same bucket engine as `HashSet`.
//!
//! Entries are `(key, value)` pairs placed and matched by the key alone;
//! the operations value `O` hashes and compares keys, and is also asked
//! for value equality (`==` between maps) and copies (`clone`).
//!
//! `put` is first-insert-wins. `replace` only overwrites.

use crate::bucket_table::{BucketTable, SlotKey, Values, ValuesMut};
use crate::config::LoadPolicy;
use crate::element::{Copier, Equality, Hashing, Natural};
use crate::error::{CollectionError, Result};
use crate::hash_set::DefaultHashBuilder;
use core::fmt;
use core::hash::{BuildHasher, Hash, Hasher};
use std::collections::hash_map::DefaultHasher;

struct Entry<K, V> {
    key: K,
    value: V,
}

pub struct HashMap<K, V, O = Natural, S = DefaultHashBuilder> {
    table: BucketTable<Entry<K, V>>,
    ops: O,
    hasher: S,
}

impl<K, V> HashMap<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_policy(LoadPolicy::DEFAULT)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(Natural, Default::default(), LoadPolicy::DEFAULT, capacity)
    }

    pub fn with_policy(policy: LoadPolicy) -> Self {
        Self::with_config(Natural, Default::default(), policy, 0)
    }
}

impl<K, V, O> HashMap<K, V, O>
where
    O: Hashing<K>,
{
    pub fn with_ops(ops: O) -> Self {
        Self::with_config(ops, Default::default(), LoadPolicy::DEFAULT, 0)
    }
}

impl<K, V, O, S> HashMap<K, V, O, S> {
    pub fn len(&self) -> usize {
        self.table.len()
    }
    pub fn is_empty(&self) -> bool {
        self.table.len() == 0
    }
    pub fn bucket_count(&self) -> usize {
        self.table.bucket_count()
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.table.iter(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            inner: self.table.iter_mut(),
        }
    }

    pub fn keys(&self) -> impl ExactSizeIterator<Item = &K> + Clone + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl ExactSizeIterator<Item = &V> + Clone + '_ {
        self.iter().map(|(_, v)| v)
    }

    /// Drop every entry; the map stays usable.
    pub fn purge(&mut self) {
        self.table.clear();
    }

    pub fn drain(&mut self) -> impl Iterator<Item = (K, V)> + '_ {
        self.table.drain().map(|e| (e.key, e.value))
    }
}

impl<K, V, O, S> HashMap<K, V, O, S>
where
    O: Hashing<K>,
    S: BuildHasher,
{
    pub fn with_ops_and_hasher(ops: O, hasher: S) -> Self {
        Self::with_config(ops, hasher, LoadPolicy::DEFAULT, 0)
    }

    pub fn with_config(ops: O, hasher: S, policy: LoadPolicy, capacity: usize) -> Self {
        Self {
            table: BucketTable::with_capacity(policy, capacity),
            ops,
            hasher,
        }
    }

    fn locate(&self, key: &K) -> (u64, Option<SlotKey>) {
        let mut state = self.hasher.build_hasher();
        self.ops.hash(key, &mut state);
        let hash = state.finish();
        let ops = &self.ops;
        (hash, self.table.find(hash, |e| ops.equal(&e.key, key)))
    }

    /// Insert `key -> value` unless `key` is already mapped; an existing
    /// mapping is left untouched. Returns whether the entry went in.
    pub fn put(&mut self, key: K, value: V) -> bool {
        match self.locate(&key) {
            (_, Some(_)) => false,
            (hash, None) => {
                self.table.insert_unique(hash, Entry { key, value });
                true
            }
        }
    }

    /// Overwrite the value of an existing key. Returns false, and drops
    /// `value`, when `key` is absent.
    pub fn replace(&mut self, key: &K, value: V) -> bool {
        match self.locate(key).1.and_then(|k| self.table.get_mut(k)) {
            Some(entry) => {
                entry.value = value;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, key: &K) -> Result<&V> {
        self.locate(key)
            .1
            .and_then(|k| self.table.get(k))
            .map(|e| &e.value)
            .ok_or(CollectionError::NotFound)
    }

    pub fn get_mut(&mut self, key: &K) -> Result<&mut V> {
        let slot = self.locate(key).1.ok_or(CollectionError::NotFound)?;
        self.table
            .get_mut(slot)
            .map(|e| &mut e.value)
            .ok_or(CollectionError::NotFound)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.locate(key).1.is_some()
    }

    pub fn remove(&mut self, key: &K) -> bool {
        self.take(key).is_some()
    }

    /// Remove the entry for `key` and hand back the stored pair.
    pub fn take(&mut self, key: &K) -> Option<(K, V)> {
        let slot = self.locate(key).1?;
        self.table.remove(slot).map(|e| (e.key, e.value))
    }

    pub fn rehash(&mut self) {
        self.table.rehash();
    }
}

impl<K, V, O, S> Clone for HashMap<K, V, O, S>
where
    O: Copier<K> + Copier<V> + Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        let ops = &self.ops;
        Self {
            table: self.table.duplicate(|e| Entry {
                key: Copier::<K>::copy(ops, &e.key),
                value: Copier::<V>::copy(ops, &e.value),
            }),
            ops: self.ops.clone(),
            hasher: self.hasher.clone(),
        }
    }
}

/// Same keys mapping to equal values. Equal sizes plus one direction of
/// containment covers both directions since keys are unique.
impl<K, V, O, S> PartialEq for HashMap<K, V, O, S>
where
    O: Hashing<K> + Equality<V>,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.iter().all(|(k, v)| match other.get(k) {
                Ok(w) => Equality::<V>::equal(&self.ops, v, w),
                Err(_) => false,
            })
    }
}

impl<K, V, O, S> Eq for HashMap<K, V, O, S>
where
    O: Hashing<K> + Equality<V>,
    S: BuildHasher,
{
}

/// Hashes the key set only, order-independently. Maps equal under `==`
/// always share their key set, so they hash alike.
impl<K, V, O, S> Hash for HashMap<K, V, O, S>
where
    O: Hashing<K>,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        let sum = self.keys().fold(0u64, |acc, k| {
            let mut h = DefaultHasher::new();
            self.ops.hash(k, &mut h);
            acc.wrapping_add(h.finish())
        });
        state.write_usize(self.len());
        state.write_u64(sum);
    }
}

impl<K: fmt::Debug, V: fmt::Debug, O, S> fmt::Debug for HashMap<K, V, O, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, O, S> Default for HashMap<K, V, O, S>
where
    O: Hashing<K> + Default,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::with_config(O::default(), S::default(), LoadPolicy::DEFAULT, 0)
    }
}

impl<K, V, O, S> Extend<(K, V)> for HashMap<K, V, O, S>
where
    O: Hashing<K>,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl<K, V, O, S> FromIterator<(K, V)> for HashMap<K, V, O, S>
where
    O: Hashing<K> + Default,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<'a, K, V, O, S> IntoIterator for &'a HashMap<K, V, O, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Borrowing iterator over `(key, value)` pairs, in unspecified order.
pub struct Iter<'a, K, V> {
    inner: Values<'a, Entry<K, V>>,
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|e| (&e.key, &e.value))
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

/// Keys stay immutable; only values are handed out mutably.
pub struct IterMut<'a, K, V> {
    inner: ValuesMut<'a, Entry<K, V>>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|e| (&e.key, &mut e.value))
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers() -> HashMap<i32, String> {
        [(0, "zero"), (1, "one"), (2, "two")]
            .into_iter()
            .map(|(k, v)| (k, v.to_string()))
            .collect()
    }

    /// Invariant: `put` never overwrites; `replace` does.
    #[test]
    fn first_insert_wins() {
        let mut m = HashMap::new();
        assert!(m.put("k", 1));
        assert!(!m.put("k", 2));
        assert_eq!(m.get(&"k"), Ok(&1));
        assert!(m.replace(&"k", 2));
        assert_eq!(m.get(&"k"), Ok(&2));
        assert!(!m.replace(&"absent", 3));
        assert!(!m.contains_key(&"absent"));
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn removal_scenario() {
        let mut m = numbers();
        assert_eq!(m.len(), 3);
        assert!(m.remove(&0));
        assert!(!m.remove(&0));
        assert_eq!(m.take(&2), Some((2, "two".to_string())));
        assert!(!m.contains_key(&2));
        assert_eq!(m.len(), 1);
        assert_eq!(m.get(&2), Err(CollectionError::NotFound));
    }

    /// Invariant: equality needs the same keys and equal values.
    #[test]
    fn equality_checks_values() {
        let a = numbers();
        let mut b = numbers();
        assert_eq!(a, b);
        b.replace(&1, "uno".to_string());
        assert_ne!(a, b);
        b.replace(&1, "one".to_string());
        b.put(3, "three".to_string());
        assert_ne!(a, b);
        assert_ne!(b, a);
    }

    /// Invariant: a clone is independent of its source.
    #[test]
    fn clone_is_deep() {
        let a = numbers();
        let mut b = a.clone();
        assert_eq!(a, b);
        if let Ok(v) = b.get_mut(&0) {
            v.push('!');
        }
        assert_eq!(a.get(&0).map(String::as_str), Ok("zero"));
        assert_eq!(b.get(&0).map(String::as_str), Ok("zero!"));
    }

    #[test]
    fn iteration_views() {
        let mut m = numbers();
        let mut keys: Vec<i32> = m.keys().copied().collect();
        keys.sort_unstable();
        assert_eq!(keys, vec![0, 1, 2]);
        assert_eq!(m.values().len(), 3);
        for (_, v) in m.iter_mut() {
            v.make_ascii_uppercase();
        }
        assert_eq!(m.get(&1).map(String::as_str), Ok("ONE"));
        let mut pairs: Vec<(i32, String)> = m.drain().collect();
        pairs.sort();
        assert_eq!(pairs[2], (2, "TWO".to_string()));
        assert!(m.is_empty());
    }

    #[test]
    fn many_keys_survive_resizes() {
        let mut m = HashMap::new();
        for k in 0..5000u32 {
            assert!(m.put(k, k * 2));
        }
        for k in (0..5000u32).step_by(2) {
            assert!(m.remove(&k));
        }
        assert_eq!(m.len(), 2500);
        for k in 0..5000u32 {
            assert_eq!(m.contains_key(&k), k % 2 == 1);
        }
        m.purge();
        assert_eq!(m.bucket_count(), LoadPolicy::DEFAULT.min_buckets());
    }
}
