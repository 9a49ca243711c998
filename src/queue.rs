//! Queue: a `List` with peek and pop at both ends.
//!
//! Every `List` operation stays available through `Deref`/`DerefMut`.
//! Plain `peek` and `pop` act on the tail.

use crate::element::{Copier, Equality, Hashing, Natural};
use crate::error::{CollectionError, Result};
use crate::list::List;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::{Deref, DerefMut};

pub struct Queue<T, O = Natural> {
    list: List<T, O>,
}

impl<T> Queue<T> {
    pub fn new() -> Self {
        Self::with_ops(Natural)
    }
}

impl<T, O> Queue<T, O> {
    pub fn with_ops(ops: O) -> Self {
        Self {
            list: List::with_ops(ops),
        }
    }

    pub fn push_head(&mut self, value: T) {
        self.list.prepend(value);
    }

    pub fn push_tail(&mut self, value: T) {
        self.list.push(value);
    }

    pub fn peek_head(&self) -> Result<&T> {
        self.list.front()
    }

    pub fn peek_tail(&self) -> Result<&T> {
        self.list.back()
    }

    pub fn pop_head(&mut self) -> Result<T> {
        self.list
            .detach_head()
            .ok_or(CollectionError::EmptyCollection)
    }

    pub fn pop_tail(&mut self) -> Result<T> {
        self.list
            .detach_tail()
            .ok_or(CollectionError::EmptyCollection)
    }

    #[inline]
    pub fn peek(&self) -> Result<&T> {
        self.peek_tail()
    }

    #[inline]
    pub fn pop(&mut self) -> Result<T> {
        self.pop_tail()
    }

    pub fn into_list(self) -> List<T, O> {
        self.list
    }
}

impl<T, O> Deref for Queue<T, O> {
    type Target = List<T, O>;
    fn deref(&self) -> &List<T, O> {
        &self.list
    }
}

impl<T, O> DerefMut for Queue<T, O> {
    fn deref_mut(&mut self) -> &mut List<T, O> {
        &mut self.list
    }
}

impl<T, O> From<List<T, O>> for Queue<T, O> {
    fn from(list: List<T, O>) -> Self {
        Self { list }
    }
}

impl<T, O: Default> Default for Queue<T, O> {
    fn default() -> Self {
        Self {
            list: List::default(),
        }
    }
}

impl<T, O: Copier<T> + Clone> Clone for Queue<T, O> {
    fn clone(&self) -> Self {
        Self {
            list: self.list.clone(),
        }
    }
}

impl<T, O: Equality<T>> PartialEq for Queue<T, O> {
    fn eq(&self, other: &Self) -> bool {
        self.list == other.list
    }
}

impl<T, O: Equality<T>> Eq for Queue<T, O> {}

impl<T, O: Hashing<T>> Hash for Queue<T, O> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.list.hash(state);
    }
}

impl<T: fmt::Debug, O> fmt::Debug for Queue<T, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.list, f)
    }
}

impl<T, O> Extend<T> for Queue<T, O> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.list.extend(iter);
    }
}

impl<T, O: Default> FromIterator<T> for Queue<T, O> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            list: iter.into_iter().collect(),
        }
    }
}

impl<T, O> IntoIterator for Queue<T, O> {
    type Item = T;
    type IntoIter = crate::list::IntoIter<T, O>;
    fn into_iter(self) -> Self::IntoIter {
        self.list.into_iter()
    }
}

impl<'a, T, O> IntoIterator for &'a Queue<T, O> {
    type Item = &'a T;
    type IntoIter = crate::list::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.list.iter()
    }
}
