//! RefCounted: a single-threaded shared-ownership handle.
//!
//! One heap block holds the count and the value. `share` (and `Clone`)
//! bumps the count and hands back another handle to the same value;
//! `release` (and `Drop`) lowers it, and the handle that takes it from
//! one to zero drops the value and frees the block. Nothing else ever
//! drops the value, so it is dropped exactly once.
//!
//! Handles are `!Send` and `!Sync`; the count is a plain `Cell`.
//!
//! Overflow of the count aborts the process, like `Rc`. Underflow can only
//! come from a bug in this module and trips an assertion.

use crate::element::Identity;
use core::cell::Cell;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use core::mem::ManuallyDrop;
use core::ops::Deref;
use core::ptr::NonNull;

struct Shared<T> {
    count: Cell<usize>,
    value: T,
}

pub struct RefCounted<T> {
    ptr: NonNull<Shared<T>>,
    // Owns a `Shared<T>` for drop-check purposes.
    _owns: PhantomData<Shared<T>>,
    _nosend: PhantomData<*mut ()>,
}

impl<T> RefCounted<T> {
    /// Allocate `value` with a count of one.
    pub fn new(value: T) -> Self {
        let block = Box::new(Shared {
            count: Cell::new(1),
            value,
        });
        Self {
            ptr: NonNull::from(Box::leak(block)),
            _owns: PhantomData,
            _nosend: PhantomData,
        }
    }

    #[inline]
    fn shared(&self) -> &Shared<T> {
        // SAFETY: the block stays allocated while any handle exists, and
        // this handle exists.
        unsafe { self.ptr.as_ref() }
    }

    /// Another handle to the same value.
    #[inline]
    pub fn share(&self) -> Self {
        let count = &self.shared().count;
        let n = count.get().wrapping_add(1);
        count.set(n);
        if n == 0 {
            std::process::abort();
        }
        Self {
            ptr: self.ptr,
            _owns: PhantomData,
            _nosend: PhantomData,
        }
    }

    /// Give up this handle. Drops the value if it was the last one.
    pub fn release(self) {
        drop(self);
    }

    pub fn strong_count(this: &Self) -> usize {
        this.shared().count.get()
    }

    /// Whether both handles point at the same value.
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        this.ptr == other.ptr
    }

    /// Address of the shared value; equal for every handle to it.
    pub fn identity(this: &Self) -> Identity {
        Identity::of(&this.shared().value)
    }

    /// Take the value out if this is the only handle.
    pub fn try_unwrap(this: Self) -> Result<T, Self> {
        if Self::strong_count(&this) != 1 {
            return Err(this);
        }
        let this = ManuallyDrop::new(this);
        // SAFETY: the count is one, so this handle is the sole owner of a
        // block allocated by `Box` in `new`; `ManuallyDrop` keeps `Drop`
        // from freeing it a second time.
        let block = unsafe { Box::from_raw(this.ptr.as_ptr()) };
        Ok(block.value)
    }

    /// Mutable access when no other handle exists.
    pub fn get_mut(this: &mut Self) -> Option<&mut T> {
        if Self::strong_count(this) == 1 {
            // SAFETY: sole handle, and `&mut Self` rules out other borrows
            // through it.
            Some(unsafe { &mut this.ptr.as_mut().value })
        } else {
            None
        }
    }
}

impl<T> Drop for RefCounted<T> {
    fn drop(&mut self) {
        let count = &self.shared().count;
        let c = count.get();
        assert!(c > 0, "RefCounted underflow");
        count.set(c - 1);
        if c == 1 {
            // SAFETY: the count just reached zero, so no other handle can
            // reach the block; it came from `Box::leak` in `new`.
            drop(unsafe { Box::from_raw(self.ptr.as_ptr()) });
        }
    }
}

impl<T> Clone for RefCounted<T> {
    #[inline]
    fn clone(&self) -> Self {
        self.share()
    }
}

impl<T> Deref for RefCounted<T> {
    type Target = T;
    #[inline]
    fn deref(&self) -> &T {
        &self.shared().value
    }
}

impl<T> AsRef<T> for RefCounted<T> {
    fn as_ref(&self) -> &T {
        self
    }
}

impl<T> From<T> for RefCounted<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: Default> Default for RefCounted<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: PartialEq> PartialEq for RefCounted<T> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: Eq> Eq for RefCounted<T> {}

impl<T: PartialOrd> PartialOrd for RefCounted<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        (**self).partial_cmp(&**other)
    }
}

impl<T: Ord> Ord for RefCounted<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (**self).cmp(&**other)
    }
}

impl<T: Hash> Hash for RefCounted<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (**self).hash(state)
    }
}

impl<T: fmt::Debug> fmt::Debug for RefCounted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

impl<T: fmt::Display> fmt::Display for RefCounted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&**self, f)
    }
}
