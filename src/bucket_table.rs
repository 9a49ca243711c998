//! BucketTable: the chained-bucket engine shared by `HashSet` and `HashMap`.
//!
//! Elements live in a generational slot arena; each bucket is a chain of
//! slot keys. Every stored element keeps the `u64` hash computed when it
//! was inserted, and placement always uses that stored hash, so resizing
//! never calls back into user hashing. Probing calls user equality only
//! through the closure handed to `find`.
//!
//! Resizes are full rehashes into a fresh bucket array, driven by the
//! table's `LoadPolicy`: inserts may grow the table, removals may grow or
//! shrink it. Nothing partial is ever observable.

use crate::config::LoadPolicy;
use crate::reentrancy::ReentryCheck;
use slotmap::{DefaultKey, SlotMap};

pub(crate) type SlotKey = DefaultKey;

#[derive(Clone, Debug)]
struct Stored<T> {
    value: T,
    hash: u64,
}

#[derive(Clone, Debug)]
pub(crate) struct BucketTable<T> {
    slots: SlotMap<SlotKey, Stored<T>>,
    buckets: Vec<Vec<SlotKey>>,
    policy: LoadPolicy,
    reentry: ReentryCheck,
}

impl<T> BucketTable<T> {
    pub(crate) fn with_capacity(policy: LoadPolicy, capacity: usize) -> Self {
        Self {
            slots: SlotMap::with_capacity_and_key(capacity),
            buckets: vec![Vec::new(); policy.buckets_for(capacity)],
            policy,
            reentry: ReentryCheck::new(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub(crate) fn policy(&self) -> LoadPolicy {
        self.policy
    }

    #[inline]
    fn bucket_of(&self, hash: u64) -> usize {
        (hash % self.buckets.len() as u64) as usize
    }

    /// Slot of the first element in `hash`'s chain accepted by `eq`.
    pub(crate) fn find<F>(&self, hash: u64, mut eq: F) -> Option<SlotKey>
    where
        F: FnMut(&T) -> bool,
    {
        let _s = self.reentry.enter();
        self.buckets[self.bucket_of(hash)]
            .iter()
            .copied()
            .find(|&k| {
                let stored = &self.slots[k];
                stored.hash == hash && eq(&stored.value)
            })
    }

    /// Append `value` to its chain. The caller has already established
    /// that no equal element is present.
    pub(crate) fn insert_unique(&mut self, hash: u64, value: T) -> SlotKey {
        let key = {
            let _s = self.reentry.enter();
            let key = self.slots.insert(Stored { value, hash });
            let b = self.bucket_of(hash);
            self.buckets[b].push(key);
            key
        };
        if let Some(next) = self.policy.target(self.len(), self.bucket_count()) {
            if next > self.bucket_count() {
                self.resize_to(next);
            }
        }
        key
    }

    pub(crate) fn remove(&mut self, key: SlotKey) -> Option<T> {
        let value = self.unlink(key)?;
        self.rehash();
        Some(value)
    }

    /// Remove every element rejected by `keep`, then resize once.
    pub(crate) fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        let doomed: Vec<SlotKey> = {
            let _s = self.reentry.enter();
            self.slots
                .iter()
                .filter(|(_, s)| !keep(&s.value))
                .map(|(k, _)| k)
                .collect()
        };
        for k in doomed {
            drop(self.unlink(k));
        }
        self.rehash();
    }

    fn unlink(&mut self, key: SlotKey) -> Option<T> {
        let _s = self.reentry.enter();
        let stored = self.slots.remove(key)?;
        let b = self.bucket_of(stored.hash);
        let chain = &mut self.buckets[b];
        let pos = chain
            .iter()
            .position(|&k| k == key)
            .expect("live slot must be linked into its bucket");
        chain.swap_remove(pos);
        Some(stored.value)
    }

    pub(crate) fn get(&self, key: SlotKey) -> Option<&T> {
        self.slots.get(key).map(|s| &s.value)
    }

    pub(crate) fn get_mut(&mut self, key: SlotKey) -> Option<&mut T> {
        self.slots.get_mut(key).map(|s| &mut s.value)
    }

    /// Drop every element and fall back to the minimum bucket count.
    pub(crate) fn clear(&mut self) {
        let _s = self.reentry.enter();
        self.slots.clear();
        self.buckets = vec![Vec::new(); self.policy.min_buckets()];
    }

    /// Bring the bucket count in line with the policy for the current size.
    pub(crate) fn rehash(&mut self) {
        if let Some(next) = self.policy.target(self.len(), self.bucket_count()) {
            self.resize_to(next);
        }
    }

    fn resize_to(&mut self, count: usize) {
        let _s = self.reentry.enter();
        log::trace!(
            "rehash {} -> {} buckets ({} elements)",
            self.buckets.len(),
            count,
            self.slots.len()
        );
        let mut buckets = vec![Vec::new(); count];
        for (k, s) in self.slots.iter() {
            buckets[(s.hash % count as u64) as usize].push(k);
        }
        self.buckets = buckets;
    }

    /// Rebuild with every element passed through `copy`, keeping hashes
    /// and bucket count.
    pub(crate) fn duplicate<F>(&self, mut copy: F) -> Self
    where
        F: FnMut(&T) -> T,
    {
        let _s = self.reentry.enter();
        let mut out = BucketTable {
            slots: SlotMap::with_capacity_and_key(self.len()),
            buckets: vec![Vec::new(); self.bucket_count()],
            policy: self.policy,
            reentry: ReentryCheck::new(),
        };
        for s in self.slots.values() {
            let k = out.slots.insert(Stored {
                value: copy(&s.value),
                hash: s.hash,
            });
            let b = out.bucket_of(s.hash);
            out.buckets[b].push(k);
        }
        out
    }

    /// Stored elements with their insertion hashes.
    #[cfg(test)]
    pub(crate) fn hashed(&self) -> impl Iterator<Item = (u64, &T)> + '_ {
        self.slots.values().map(|s| (s.hash, &s.value))
    }

    pub(crate) fn iter(&self) -> Values<'_, T> {
        Values {
            it: self.slots.values(),
            remaining: self.slots.len(),
        }
    }

    pub(crate) fn iter_mut(&mut self) -> ValuesMut<'_, T> {
        let remaining = self.slots.len();
        ValuesMut {
            it: self.slots.values_mut(),
            remaining,
        }
    }

    pub(crate) fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.buckets = vec![Vec::new(); self.policy.min_buckets()];
        self.slots.drain().map(|(_, s)| s.value)
    }

    #[cfg(test)]
    pub(crate) fn chain_lengths(&self) -> Vec<usize> {
        self.buckets.iter().map(Vec::len).collect()
    }
}

pub(crate) struct Values<'a, T> {
    it: slotmap::basic::Values<'a, SlotKey, Stored<T>>,
    remaining: usize,
}

impl<T> Clone for Values<'_, T> {
    fn clone(&self) -> Self {
        Values {
            it: self.it.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Values<'a, T> {
    type Item = &'a T;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let v = self.it.next()?;
        self.remaining -= 1;
        Some(&v.value)
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

pub(crate) struct ValuesMut<'a, T> {
    it: slotmap::basic::ValuesMut<'a, SlotKey, Stored<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for ValuesMut<'a, T> {
    type Item = &'a mut T;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let v = self.it.next()?;
        self.remaining -= 1;
        Some(&mut v.value)
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
