//! HashSet: unordered unique elements with in-place set algebra.
//!
//! Uniqueness, placement and lookup all go through the set's element
//! operations (`Hashing`), not through `T`'s own `Eq`/`Hash`, so a set
//! can treat elements as equal on a subset of their fields. `get` then
//! recovers the full stored element from such a partial probe.
//!
//! The four algebra operations (`retain`, `include`, `exclude`, `invert`)
//! mutate `self` and only read `other`. Their value forms (`intersection`,
//! `union`, `difference`, `symmetric_difference`, and `&a op &b`) build a
//! new set from a copy of `self` and leave both inputs alone.

use crate::bucket_table::{BucketTable, SlotKey, Values};
use crate::config::LoadPolicy;
use crate::element::{Copier, Hashing, Identify, Identity, Natural};
use crate::error::{CollectionError, Result};
use core::fmt;
use core::hash::{BuildHasher, Hash, Hasher};
use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Sub, SubAssign};
use std::collections::hash_map::DefaultHasher;

/// Hasher used when none is given.
pub type DefaultHashBuilder = hashbrown::hash_map::DefaultHashBuilder;

pub struct HashSet<T, O = Natural, S = DefaultHashBuilder> {
    table: BucketTable<T>,
    ops: O,
    hasher: S,
}

impl<T> HashSet<T>
where
    T: Eq + Hash,
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

impl<T, O> HashSet<T, O>
where
    O: Hashing<T>,
{
    pub fn with_ops(ops: O) -> Self {
        Self::with_config(ops, Default::default(), LoadPolicy::DEFAULT, 0)
    }
}

impl<T, O, S> HashSet<T, O, S> {
    pub fn len(&self) -> usize {
        self.table.len()
    }
    pub fn is_empty(&self) -> bool {
        self.table.len() == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.table.bucket_count()
    }

    pub fn policy(&self) -> LoadPolicy {
        self.table.policy()
    }

    pub fn ops(&self) -> &O {
        &self.ops
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Drop every element; the set stays usable.
    pub fn purge(&mut self) {
        self.table.clear();
    }

    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.table.drain()
    }

    #[cfg(test)]
    pub(crate) fn chain_lengths(&self) -> Vec<usize> {
        self.table.chain_lengths()
    }
}

impl<T, O, S> HashSet<T, O, S>
where
    O: Hashing<T>,
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

    fn hash_of(&self, value: &T) -> u64 {
        let mut state = self.hasher.build_hasher();
        self.ops.hash(value, &mut state);
        state.finish()
    }

    fn locate(&self, value: &T) -> (u64, Option<SlotKey>) {
        let hash = self.hash_of(value);
        let ops = &self.ops;
        (hash, self.table.find(hash, |stored| ops.equal(stored, value)))
    }

    pub fn contains(&self, value: &T) -> bool {
        self.locate(value).1.is_some()
    }

    /// The stored element equal to `probe`.
    pub fn get(&self, probe: &T) -> Result<&T> {
        self.locate(probe)
            .1
            .and_then(|k| self.table.get(k))
            .ok_or(CollectionError::NotFound)
    }

    /// Insert `value` unless an equal element is already stored; the stored
    /// one is kept in that case. Returns whether `value` went in.
    pub fn put(&mut self, value: T) -> bool {
        match self.locate(&value) {
            (_, Some(_)) => false,
            (hash, None) => {
                self.table.insert_unique(hash, value);
                true
            }
        }
    }

    /// Insert `value`, overwriting an equal stored element if there is one.
    /// Returns whether an element was overwritten.
    pub fn replace(&mut self, value: T) -> bool {
        match self.locate(&value) {
            (_, Some(k)) => {
                if let Some(slot) = self.table.get_mut(k) {
                    *slot = value;
                }
                true
            }
            (hash, None) => {
                self.table.insert_unique(hash, value);
                false
            }
        }
    }

    pub fn remove(&mut self, value: &T) -> bool {
        self.take(value).is_some()
    }

    /// Remove and hand back the stored element equal to `value`.
    pub fn take(&mut self, value: &T) -> Option<T> {
        let k = self.locate(value).1?;
        self.table.remove(k)
    }

    /// Resize the bucket array to suit the current size.
    pub fn rehash(&mut self) {
        self.table.rehash();
    }

    pub fn is_subset<S2: BuildHasher>(&self, other: &HashSet<T, O, S2>) -> bool {
        self.len() <= other.len() && self.iter().all(|v| other.contains(v))
    }

    pub fn is_disjoint<S2: BuildHasher>(&self, other: &HashSet<T, O, S2>) -> bool {
        if self.len() <= other.len() {
            self.iter().all(|v| !other.contains(v))
        } else {
            other.iter().all(|v| !self.contains(v))
        }
    }

    /// Intersection: keep only elements also present in `other`.
    pub fn retain<S2: BuildHasher>(&mut self, other: &HashSet<T, O, S2>) {
        self.table.retain(|v| other.contains(v));
    }

    /// Difference: drop every element present in `other`.
    pub fn exclude<S2: BuildHasher>(&mut self, other: &HashSet<T, O, S2>) {
        if other.len() < self.len() {
            for v in other.iter() {
                self.remove(v);
            }
        } else {
            self.table.retain(|v| !other.contains(v));
        }
    }
}

impl<T, O, S> HashSet<T, O, S>
where
    O: Hashing<T> + Copier<T>,
    S: BuildHasher,
{
    /// Union: add a copy of every element of `other` not already present.
    pub fn include<S2: BuildHasher>(&mut self, other: &HashSet<T, O, S2>) {
        for v in other.iter() {
            if let (hash, None) = self.locate(v) {
                let copy = self.ops.copy(v);
                self.table.insert_unique(hash, copy);
            }
        }
    }

    /// Symmetric difference: keep what is in exactly one of the two sets.
    pub fn invert<S2: BuildHasher>(&mut self, other: &HashSet<T, O, S2>) {
        for v in other.iter() {
            match self.locate(v) {
                (_, Some(k)) => drop(self.table.remove(k)),
                (hash, None) => {
                    let copy = self.ops.copy(v);
                    self.table.insert_unique(hash, copy);
                }
            }
        }
    }
}

impl<T, O, S> HashSet<T, O, S>
where
    O: Hashing<T> + Copier<T> + Clone,
    S: BuildHasher + Clone,
{
    pub fn intersection<S2: BuildHasher>(&self, other: &HashSet<T, O, S2>) -> Self {
        let mut out = self.clone();
        out.retain(other);
        out
    }

    pub fn union<S2: BuildHasher>(&self, other: &HashSet<T, O, S2>) -> Self {
        let mut out = self.clone();
        out.include(other);
        out
    }

    pub fn difference<S2: BuildHasher>(&self, other: &HashSet<T, O, S2>) -> Self {
        let mut out = self.clone();
        out.exclude(other);
        out
    }

    pub fn symmetric_difference<S2: BuildHasher>(&self, other: &HashSet<T, O, S2>) -> Self {
        let mut out = self.clone();
        out.invert(other);
        out
    }
}

impl<T, O, S> HashSet<T, O, S>
where
    O: Hashing<T> + Identify<T>,
    S: BuildHasher,
{
    /// Identity of the stored element equal to `probe`.
    pub fn identify(&self, probe: &T) -> Result<Identity> {
        self.get(probe).map(|v| self.ops.identify(v))
    }
}

impl<T, O, S> Clone for HashSet<T, O, S>
where
    O: Copier<T> + Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        let ops = &self.ops;
        Self {
            table: self.table.duplicate(|v| ops.copy(v)),
            ops: self.ops.clone(),
            hasher: self.hasher.clone(),
        }
    }
}

impl<T, O, S> PartialEq for HashSet<T, O, S>
where
    O: Hashing<T>,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|v| other.contains(v))
    }
}

impl<T, O, S> Eq for HashSet<T, O, S>
where
    O: Hashing<T>,
    S: BuildHasher,
{
}

/// Order-independent: a wrapping sum of per-element hashes from a
/// fixed-key hasher, so equal sets hash alike whatever their seeds.
impl<T, O, S> Hash for HashSet<T, O, S>
where
    O: Hashing<T>,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        let sum = self.iter().fold(0u64, |acc, v| {
            let mut h = DefaultHasher::new();
            self.ops.hash(v, &mut h);
            acc.wrapping_add(h.finish())
        });
        state.write_usize(self.len());
        state.write_u64(sum);
    }
}

impl<T: fmt::Debug, O, S> fmt::Debug for HashSet<T, O, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, O, S> Default for HashSet<T, O, S>
where
    O: Hashing<T> + Default,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::with_config(O::default(), S::default(), LoadPolicy::DEFAULT, 0)
    }
}

impl<T, O, S> Extend<T> for HashSet<T, O, S>
where
    O: Hashing<T>,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for v in iter {
            self.put(v);
        }
    }
}

impl<T, O, S> FromIterator<T> for HashSet<T, O, S>
where
    O: Hashing<T> + Default,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

impl<'a, T, O, S> IntoIterator for &'a HashSet<T, O, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, O, S, S2> BitAndAssign<&HashSet<T, O, S2>> for HashSet<T, O, S>
where
    O: Hashing<T>,
    S: BuildHasher,
    S2: BuildHasher,
{
    fn bitand_assign(&mut self, other: &HashSet<T, O, S2>) {
        self.retain(other);
    }
}

impl<T, O, S, S2> BitOrAssign<&HashSet<T, O, S2>> for HashSet<T, O, S>
where
    O: Hashing<T> + Copier<T>,
    S: BuildHasher,
    S2: BuildHasher,
{
    fn bitor_assign(&mut self, other: &HashSet<T, O, S2>) {
        self.include(other);
    }
}

impl<T, O, S, S2> SubAssign<&HashSet<T, O, S2>> for HashSet<T, O, S>
where
    O: Hashing<T>,
    S: BuildHasher,
    S2: BuildHasher,
{
    fn sub_assign(&mut self, other: &HashSet<T, O, S2>) {
        self.exclude(other);
    }
}

impl<T, O, S, S2> BitXorAssign<&HashSet<T, O, S2>> for HashSet<T, O, S>
where
    O: Hashing<T> + Copier<T>,
    S: BuildHasher,
    S2: BuildHasher,
{
    fn bitxor_assign(&mut self, other: &HashSet<T, O, S2>) {
        self.invert(other);
    }
}

impl<T, O, S, S2> BitAnd<&HashSet<T, O, S2>> for &HashSet<T, O, S>
where
    O: Hashing<T> + Copier<T> + Clone,
    S: BuildHasher + Clone,
    S2: BuildHasher,
{
    type Output = HashSet<T, O, S>;
    fn bitand(self, other: &HashSet<T, O, S2>) -> HashSet<T, O, S> {
        self.intersection(other)
    }
}

impl<T, O, S, S2> BitOr<&HashSet<T, O, S2>> for &HashSet<T, O, S>
where
    O: Hashing<T> + Copier<T> + Clone,
    S: BuildHasher + Clone,
    S2: BuildHasher,
{
    type Output = HashSet<T, O, S>;
    fn bitor(self, other: &HashSet<T, O, S2>) -> HashSet<T, O, S> {
        self.union(other)
    }
}

impl<T, O, S, S2> Sub<&HashSet<T, O, S2>> for &HashSet<T, O, S>
where
    O: Hashing<T> + Copier<T> + Clone,
    S: BuildHasher + Clone,
    S2: BuildHasher,
{
    type Output = HashSet<T, O, S>;
    fn sub(self, other: &HashSet<T, O, S2>) -> HashSet<T, O, S> {
        self.difference(other)
    }
}

impl<T, O, S, S2> BitXor<&HashSet<T, O, S2>> for &HashSet<T, O, S>
where
    O: Hashing<T> + Copier<T> + Clone,
    S: BuildHasher + Clone,
    S2: BuildHasher,
{
    type Output = HashSet<T, O, S>;
    fn bitxor(self, other: &HashSet<T, O, S2>) -> HashSet<T, O, S> {
        self.symmetric_difference(other)
    }
}

/// Borrowing iterator over a `HashSet`, in unspecified order.
pub struct Iter<'a, T> {
    inner: Values<'a, T>,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Equality;

    fn set(xs: &[i32]) -> HashSet<i32> {
        xs.iter().copied().collect()
    }

    /// Invariant: `put` never duplicates; the second put is a no-op.
    #[test]
    fn put_is_idempotent() {
        let mut s = HashSet::new();
        assert!(s.put(0));
        assert!(s.put(-1));
        assert!(s.put(1));
        assert!(!s.put(1));
        assert!(!s.put(0));
        assert_eq!(s.len(), 3);
        assert!(s.contains(&1));
    }

    /// Invariant: equality ignores insertion order.
    #[test]
    fn equality_is_order_free() {
        let a = set(&[3, -3, 0]);
        let b = set(&[-3, 0, 3]);
        assert_eq!(a, b);
        assert_ne!(a, set(&[3, -3]));
        assert_eq!(HashSet::<i32>::new(), HashSet::new());
    }

    #[test]
    fn algebra_scenarios() {
        let mut r = set(&[1, 2, 3]);
        r.retain(&set(&[2, 3, 4]));
        assert_eq!(r, set(&[2, 3]));

        let mut u = set(&[1, 2, 3]);
        u.include(&set(&[2, 3, 4]));
        assert_eq!(u, set(&[1, 2, 3, 4]));

        let mut x = set(&[1, 2, 3]);
        x.invert(&set(&[2, 3, 4]));
        assert_eq!(x, set(&[1, 4]));

        let mut d = set(&[1, 2, 3]);
        d.exclude(&set(&[2, 3, 4]));
        assert_eq!(d, set(&[1]));

        let mut e = set(&[1, 2, 3]);
        e.exclude(&set(&[1, 2, 3, 4]));
        assert!(e.is_empty());
    }

    /// Invariant: the right-hand operand is never modified.
    #[test]
    fn algebra_leaves_other_untouched() {
        let other = set(&[2, 3, 4]);
        let mut a = set(&[1, 2, 3]);
        a ^= &other;
        a |= &other;
        a -= &other;
        a &= &other;
        assert_eq!(other, set(&[2, 3, 4]));
    }

    /// Entries equal on the first field only: `put` keeps the original
    /// payload, `replace` overwrites it and `get` recovers it.
    #[test]
    fn partial_equality_payloads() {
        #[derive(Default, Clone, Copy)]
        struct ByKey;
        impl Equality<(u32, &'static str)> for ByKey {
            fn equal(&self, a: &(u32, &'static str), b: &(u32, &'static str)) -> bool {
                a.0 == b.0
            }
        }
        impl Hashing<(u32, &'static str)> for ByKey {
            fn hash<H: Hasher>(&self, v: &(u32, &'static str), state: &mut H) {
                v.0.hash(state)
            }
        }

        let mut s = HashSet::with_ops(ByKey);
        assert!(s.put((1, "one")));
        assert!(!s.put((1, "uno")));
        assert_eq!(s.get(&(1, "")), Ok(&(1, "one")));
        assert!(s.replace((1, "uno")));
        assert_eq!(s.get(&(1, "")), Ok(&(1, "uno")));
        assert!(!s.replace((2, "two")));
        assert_eq!(s.len(), 2);
        assert_eq!(s.get(&(3, "")), Err(CollectionError::NotFound));
    }

    #[test]
    fn subset_and_disjoint() {
        let a = set(&[1, 2]);
        let b = set(&[1, 2, 3]);
        assert!(a.is_subset(&b));
        assert!(!b.is_subset(&a));
        assert!(a.is_disjoint(&set(&[7, 8, 9])));
        assert!(!b.is_disjoint(&set(&[3])));
    }

    /// Invariant: a clone is deep; mutating it leaves the source alone.
    #[test]
    fn clone_is_independent() {
        let a = set(&[1, 2, 3]);
        let mut b = a.clone();
        assert_eq!(a, b);
        b.remove(&1);
        assert_ne!(a, b);
        assert!(a.contains(&1));
    }

    /// Invariant: equal sets hash equally even when built in another order.
    #[test]
    fn container_hash_is_order_free() {
        let h = |s: &HashSet<i32>| {
            let mut st = DefaultHasher::new();
            s.hash(&mut st);
            st.finish()
        };
        let a: HashSet<i32> = (0..100).collect();
        let b: HashSet<i32> = (0..100).rev().collect();
        assert_eq!(h(&a), h(&b));
    }

    /// Invariant: user equality that reaches back into the set it is
    /// probing trips the debug guard.
    #[cfg(debug_assertions)]
    #[test]
    fn reentrant_lookup_panics_in_debug() {
        use std::cell::Cell;
        use std::rc::Rc;

        #[derive(Clone)]
        struct Nosy(Rc<Cell<*const HashSet<u8, Nosy>>>);
        impl Equality<u8> for Nosy {
            fn equal(&self, a: &u8, b: &u8) -> bool {
                let set = self.0.get();
                if !set.is_null() {
                    // SAFETY: the set outlives the probe and is only read.
                    unsafe { (*set).contains(a) };
                }
                a == b
            }
        }
        impl Hashing<u8> for Nosy {
            fn hash<H: Hasher>(&self, v: &u8, state: &mut H) {
                v.hash(state)
            }
        }

        let target = Rc::new(Cell::new(core::ptr::null()));
        let mut s = HashSet::with_ops(Nosy(target.clone()));
        s.put(1);
        target.set(&s as *const _);
        let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| s.contains(&1)));
        assert!(res.is_err(), "nested probe must panic in debug builds");
    }

    /// Invariant: user hashing runs before the table is entered, so it may
    /// read the set it is probing.
    #[test]
    fn hashing_may_read_the_set() {
        use std::cell::Cell;
        use std::rc::Rc;

        #[derive(Clone)]
        struct Peek(Rc<Cell<*const HashSet<u8, Peek>>>);
        impl Equality<u8> for Peek {
            fn equal(&self, a: &u8, b: &u8) -> bool {
                a == b
            }
        }
        impl Hashing<u8> for Peek {
            fn hash<H: Hasher>(&self, v: &u8, state: &mut H) {
                let set = self.0.get();
                if !set.is_null() {
                    // SAFETY: the set outlives the probe and is only read.
                    let _ = unsafe { (*set).len() };
                }
                v.hash(state)
            }
        }

        let target = Rc::new(Cell::new(core::ptr::null()));
        let mut s = HashSet::with_ops(Peek(target.clone()));
        s.put(1);
        target.set(&s as *const _);
        assert!(s.contains(&1));
        assert!(!s.contains(&2));
    }

    #[test]
    fn value_forms_copy_the_left_operand() {
        let a = set(&[1, 2, 3]);
        let b = set(&[3, 4]);
        let u = a.union(&b);
        assert_eq!(u.len(), 4);
        assert_eq!(u.policy(), a.policy());
        assert_eq!(&a ^ &b, set(&[1, 2, 4]));
        assert_eq!(a.len(), 3);
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn grows_and_shrinks_with_content() {
        let mut s: HashSet<u64> = HashSet::new();
        for v in 0..1000 {
            s.put(v);
        }
        assert!(s.bucket_count() >= 1000 * 100 / 80);
        for v in 0..1000 {
            assert!(s.remove(&v));
        }
        assert_eq!(s.bucket_count(), LoadPolicy::DEFAULT.min_buckets());
        assert!(!s.remove(&3));
    }
}
