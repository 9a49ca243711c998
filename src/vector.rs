//! Vector: a contiguous, index-addressable sequence with a fixed logical
//! length that changes only through `resize`.
//!
//! Growth fills new slots through `Construct`; shrinking drops the
//! trailing elements. Checked access (`get`, `get_mut`, `set`) reports
//! `OutOfBounds`; `Index`/`IndexMut` panic instead, like slices.

use crate::element::{Construct, Copier, Equality, Hashing, Natural, Ordering};
use crate::error::{CollectionError, Result};
use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::{Index, IndexMut};

/// Iteration direction for sequence cursors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Forward,
    Reverse,
}

pub struct Vector<T, O = Natural> {
    items: Vec<T>,
    ops: O,
}

impl<T: Default> Vector<T> {
    /// `len` default-constructed elements.
    pub fn new(len: usize) -> Self {
        Self::with_ops(len, Natural)
    }
}

impl<T: Clone> Vector<T> {
    /// `len` copies of `value`.
    pub fn with_value(len: usize, value: &T) -> Self {
        let mut items = Vec::with_capacity(len);
        items.resize(len, value.clone());
        Self {
            items,
            ops: Natural,
        }
    }
}

impl<T, O: Construct<T>> Vector<T, O> {
    pub fn with_ops(len: usize, ops: O) -> Self {
        let mut v = Self {
            items: Vec::new(),
            ops,
        };
        v.resize(len);
        v
    }

    /// Set the length to `len`, constructing new trailing slots or
    /// dropping surplus ones.
    pub fn resize(&mut self, len: usize) {
        let ops = &self.ops;
        self.items.resize_with(len, || ops.construct());
    }
}

impl<T, O> Vector<T, O> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether `index` addresses an element.
    pub fn within(&self, index: usize) -> bool {
        index < self.items.len()
    }

    fn out_of_bounds(&self, index: usize) -> CollectionError {
        CollectionError::OutOfBounds {
            index,
            len: self.items.len(),
        }
    }

    pub fn get(&self, index: usize) -> Result<&T> {
        self.items.get(index).ok_or_else(|| self.out_of_bounds(index))
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.items.len();
        self.items
            .get_mut(index)
            .ok_or(CollectionError::OutOfBounds { index, len })
    }

    /// Store `value` at `index`, dropping the previous occupant.
    pub fn set(&mut self, index: usize, value: T) -> Result<()> {
        *self.get_mut(index)? = value;
        Ok(())
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items
    }

    pub fn ops(&self) -> &O {
        &self.ops
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.iter_in(Direction::Forward)
    }

    pub fn iter_in(&self, direction: Direction) -> Iter<'_, T> {
        Iter {
            items: &self.items,
            front: 0,
            back: self.items.len(),
            direction,
        }
    }
}

impl<T, O: Ordering<T>> Vector<T, O> {
    /// Sort ascending in place by the element ordering. Not stable.
    pub fn sort(&mut self) {
        self.sort_in(Direction::Forward);
    }

    /// Sort in place; `Reverse` puts the greatest element first.
    pub fn sort_in(&mut self, direction: Direction) {
        let ops = &self.ops;
        match direction {
            Direction::Forward => self.items.sort_unstable_by(|a, b| ops.compare(a, b)),
            Direction::Reverse => self.items.sort_unstable_by(|a, b| ops.compare(b, a)),
        }
    }
}

impl<T, O> Index<usize> for Vector<T, O> {
    type Output = T;
    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T, O> IndexMut<usize> for Vector<T, O> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.items[index]
    }
}

impl<T, O> Clone for Vector<T, O>
where
    O: Copier<T> + Clone,
{
    fn clone(&self) -> Self {
        Self {
            items: self.items.iter().map(|v| self.ops.copy(v)).collect(),
            ops: self.ops.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.items.clear();
        self.items
            .extend(source.items.iter().map(|v| source.ops.copy(v)));
        self.ops = source.ops.clone();
    }
}

impl<T, O: Equality<T>> PartialEq for Vector<T, O> {
    fn eq(&self, other: &Self) -> bool {
        self.items.len() == other.items.len()
            && self
                .items
                .iter()
                .zip(&other.items)
                .all(|(a, b)| self.ops.equal(a, b))
    }
}

impl<T, O: Equality<T>> Eq for Vector<T, O> {}

impl<T, O: Hashing<T>> Hash for Vector<T, O> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.items.len());
        for v in &self.items {
            self.ops.hash(v, state);
        }
    }
}

impl<T: fmt::Debug, O> fmt::Debug for Vector<T, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.items).finish()
    }
}

impl<T, O: Default> Default for Vector<T, O> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            ops: O::default(),
        }
    }
}

impl<T, O: Default> FromIterator<T> for Vector<T, O> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
            ops: O::default(),
        }
    }
}

impl<T, O: Default> From<Vec<T>> for Vector<T, O> {
    fn from(items: Vec<T>) -> Self {
        Self {
            items,
            ops: O::default(),
        }
    }
}

impl<'a, T, O> IntoIterator for &'a Vector<T, O> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, O> IntoIterator for Vector<T, O> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;
    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Cursor over a vector in either direction.
///
/// `next` walks in the cursor's direction; `next_back` walks the other
/// way from the opposite end. `restart` rewinds to the full range.
#[derive(Debug)]
pub struct Iter<'a, T> {
    items: &'a [T],
    front: usize,
    back: usize,
    direction: Direction,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}

impl<'a, T> Iter<'a, T> {
    pub fn has_next(&self) -> bool {
        self.front < self.back
    }

    pub fn restart(&mut self) {
        self.front = 0;
        self.back = self.items.len();
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    fn take_front(&mut self) -> Option<&'a T> {
        if !self.has_next() {
            return None;
        }
        self.front += 1;
        self.items.get(self.front - 1)
    }

    fn take_back(&mut self) -> Option<&'a T> {
        if !self.has_next() {
            return None;
        }
        self.back -= 1;
        self.items.get(self.back)
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
        let n = self.back - self.front;
        (n, Some(n))
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
