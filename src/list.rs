//! List: a doubly linked sequence over a generational node arena.
//!
//! Nodes live in a `SlotMap` and link to each other by generational key;
//! a stale key never aliases a newer node.
//! Searches (`contains`, `find`, `remove`, `replace` and their `_all`
//! forms) walk from the head and match through the list's `Equality`.

use crate::element::{Copier, Equality, Hashing, Natural};
use crate::error::{CollectionError, Result};
use crate::vector::Direction;
use core::fmt;
use core::hash::{Hash, Hasher};
use slotmap::{new_key_type, SecondaryMap, SlotMap};

new_key_type! {
    struct NodeKey;
}

#[derive(Clone, Debug)]
struct Node<T> {
    value: T,
    prev: Option<NodeKey>,
    next: Option<NodeKey>,
}

pub struct List<T, O = Natural> {
    nodes: SlotMap<NodeKey, Node<T>>,
    head: Option<NodeKey>,
    tail: Option<NodeKey>,
    ops: O,
}

impl<T> List<T> {
    pub fn new() -> Self {
        Self::with_ops(Natural)
    }
}

impl<T, O> List<T, O> {
    pub fn with_ops(ops: O) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            head: None,
            tail: None,
            ops,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn ops(&self) -> &O {
        &self.ops
    }

    /// Append at the tail.
    pub fn push(&mut self, value: T) {
        let key = self.nodes.insert(Node {
            value,
            prev: self.tail,
            next: None,
        });
        match self.tail {
            Some(t) => self.nodes[t].next = Some(key),
            None => self.head = Some(key),
        }
        self.tail = Some(key);
    }

    /// Insert at the head.
    pub fn prepend(&mut self, value: T) {
        let key = self.nodes.insert(Node {
            value,
            prev: None,
            next: self.head,
        });
        match self.head {
            Some(h) => self.nodes[h].prev = Some(key),
            None => self.tail = Some(key),
        }
        self.head = Some(key);
    }

    pub fn front(&self) -> Result<&T> {
        self.head
            .map(|k| &self.nodes[k].value)
            .ok_or(CollectionError::EmptyCollection)
    }

    pub fn back(&self) -> Result<&T> {
        self.tail
            .map(|k| &self.nodes[k].value)
            .ok_or(CollectionError::EmptyCollection)
    }

    pub fn front_mut(&mut self) -> Result<&mut T> {
        match self.head {
            Some(k) => Ok(&mut self.nodes[k].value),
            None => Err(CollectionError::EmptyCollection),
        }
    }

    pub fn back_mut(&mut self) -> Result<&mut T> {
        match self.tail {
            Some(k) => Ok(&mut self.nodes[k].value),
            None => Err(CollectionError::EmptyCollection),
        }
    }

    /// Drop the tail element.
    pub fn chop(&mut self) -> Result<()> {
        self.detach_tail()
            .map(drop)
            .ok_or(CollectionError::EmptyCollection)
    }

    /// Drop the head element.
    pub fn prune_first(&mut self) -> Result<()> {
        self.detach_head()
            .map(drop)
            .ok_or(CollectionError::EmptyCollection)
    }

    pub(crate) fn detach_head(&mut self) -> Option<T> {
        self.head.and_then(|k| self.unlink(k))
    }

    pub(crate) fn detach_tail(&mut self) -> Option<T> {
        self.tail.and_then(|k| self.unlink(k))
    }

    fn unlink(&mut self, key: NodeKey) -> Option<T> {
        let node = self.nodes.remove(key)?;
        match node.prev {
            Some(p) => self.nodes[p].next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(n) => self.nodes[n].prev = node.prev,
            None => self.tail = node.prev,
        }
        Some(node.value)
    }

    /// Drop every element.
    pub fn purge(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.iter_in(Direction::Forward)
    }

    pub fn iter_in(&self, direction: Direction) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            head: self.head,
            tail: self.tail,
            front: self.head,
            back: self.tail,
            remaining: self.nodes.len(),
            direction,
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let mut rank = SecondaryMap::with_capacity(self.nodes.len());
        for (i, k) in self.keys().enumerate() {
            rank.insert(k, i);
        }
        let mut slots: Vec<Option<&mut T>> = Vec::new();
        slots.resize_with(self.nodes.len(), || None);
        for (k, node) in self.nodes.iter_mut() {
            slots[rank[k]] = Some(&mut node.value);
        }
        IterMut {
            inner: slots.into_iter().flatten().collect::<Vec<_>>().into_iter(),
        }
    }

    /// Keys of nodes, head to tail.
    fn keys(&self) -> Keys<'_, T> {
        Keys {
            nodes: &self.nodes,
            cursor: self.head,
        }
    }
}

impl<T, O: Equality<T>> List<T, O> {
    fn position(&self, what: &T) -> Option<NodeKey> {
        self.keys()
            .find(|&k| self.ops.equal(&self.nodes[k].value, what))
    }

    fn positions(&self, what: &T) -> Vec<NodeKey> {
        self.keys()
            .filter(|&k| self.ops.equal(&self.nodes[k].value, what))
            .collect()
    }

    pub fn contains(&self, what: &T) -> bool {
        self.position(what).is_some()
    }

    /// First element equal to `what`.
    pub fn find(&self, what: &T) -> Result<&T> {
        self.position(what)
            .map(|k| &self.nodes[k].value)
            .ok_or(CollectionError::NotFound)
    }

    /// Remove the first element equal to `what`.
    pub fn remove(&mut self, what: &T) -> bool {
        match self.position(what) {
            Some(k) => self.unlink(k).is_some(),
            None => false,
        }
    }

    /// Remove every element equal to `what`; returns how many went.
    pub fn remove_all(&mut self, what: &T) -> usize {
        self.positions(what)
            .into_iter()
            .filter_map(|k| self.unlink(k))
            .count()
    }

    /// Overwrite the first element equal to `what` with `with`, in place.
    pub fn replace(&mut self, what: &T, with: T) -> bool {
        match self.position(what) {
            Some(k) => {
                self.nodes[k].value = with;
                true
            }
            None => false,
        }
    }
}

impl<T, O: Equality<T> + Copier<T>> List<T, O> {
    /// Overwrite every element equal to `what` with a copy of `with`.
    pub fn replace_all(&mut self, what: &T, with: &T) -> usize {
        let hits = self.positions(what);
        for &k in &hits {
            self.nodes[k].value = self.ops.copy(with);
        }
        hits.len()
    }
}

impl<T, O: Default> Default for List<T, O> {
    fn default() -> Self {
        Self::with_ops(O::default())
    }
}

impl<T, O> Clone for List<T, O>
where
    O: Copier<T> + Clone,
{
    fn clone(&self) -> Self {
        let mut out = List::with_ops(self.ops.clone());
        for v in self.iter() {
            out.push(self.ops.copy(v));
        }
        out
    }
}

impl<T, O: Equality<T>> PartialEq for List<T, O> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| self.ops.equal(a, b))
    }
}

impl<T, O: Equality<T>> Eq for List<T, O> {}

impl<T, O: Hashing<T>> Hash for List<T, O> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for v in self.iter() {
            self.ops.hash(v, state);
        }
    }
}

impl<T: fmt::Debug, O> fmt::Debug for List<T, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, O> Extend<T> for List<T, O> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for v in iter {
            self.push(v);
        }
    }
}

impl<T, O: Default> FromIterator<T> for List<T, O> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::default();
        list.extend(iter);
        list
    }
}

impl<'a, T, O> IntoIterator for &'a List<T, O> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, O> IntoIterator for List<T, O> {
    type Item = T;
    type IntoIter = IntoIter<T, O>;
    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

struct Keys<'a, T> {
    nodes: &'a SlotMap<NodeKey, Node<T>>,
    cursor: Option<NodeKey>,
}

impl<T> Iterator for Keys<'_, T> {
    type Item = NodeKey;
    fn next(&mut self) -> Option<NodeKey> {
        let k = self.cursor?;
        self.cursor = self.nodes[k].next;
        Some(k)
    }
}

/// Bidirectional cursor over a list.
///
/// `next` walks in the cursor's direction and `next_back` from the other
/// end; the two meet without overlap. `restart` rewinds to the full list.
pub struct Iter<'a, T> {
    nodes: &'a SlotMap<NodeKey, Node<T>>,
    head: Option<NodeKey>,
    tail: Option<NodeKey>,
    front: Option<NodeKey>,
    back: Option<NodeKey>,
    remaining: usize,
    direction: Direction,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            nodes: self.nodes,
            head: self.head,
            tail: self.tail,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
            direction: self.direction,
        }
    }
}

impl<'a, T> Iter<'a, T> {
    pub fn has_next(&self) -> bool {
        self.remaining > 0
    }

    pub fn restart(&mut self) {
        self.front = self.head;
        self.back = self.tail;
        self.remaining = self.nodes.len();
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    fn take_front(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let nodes = self.nodes;
        let node = &nodes[self.front?];
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn take_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let nodes = self.nodes;
        let node = &nodes[self.back?];
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.value)
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    fn next(&mut self) -> Option<Self::Item> {
        match self.direction {
            Direction::Forward => self.take_front(),
            Direction::Reverse => self.take_back(),
        }
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        match self.direction {
            Direction::Forward => self.take_back(),
            Direction::Reverse => self.take_front(),
        }
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> core::iter::FusedIterator for Iter<'_, T> {}

/// Head-to-tail iterator handing out mutable elements.
pub struct IterMut<'a, T> {
    inner: std::vec::IntoIter<&'a mut T>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

/// Owning iterator, head to tail.
pub struct IntoIter<T, O> {
    list: List<T, O>,
}

impl<T, O> Iterator for IntoIter<T, O> {
    type Item = T;
    fn next(&mut self) -> Option<T> {
        self.list.detach_head()
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T, O> DoubleEndedIterator for IntoIter<T, O> {
    fn next_back(&mut self) -> Option<T> {
        self.list.detach_tail()
    }
}

impl<T, O> ExactSizeIterator for IntoIter<T, O> {}
