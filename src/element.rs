//! Element operations: the per-type capabilities a container needs.
//!
//! Each container carries an operations value `O` (much like a
//! `BuildHasher`) and asks only for the capabilities its methods use:
//! a vector needs `Construct` to grow, `Copier` to clone and `Ordering`
//! to sort; a hash set needs `Hashing` to place and find elements.
//!
//! Destruction is `Drop`. A container drops exactly the elements it owns,
//! once, when they leave it or when the container itself goes away.
//!
//! Laws every implementation must keep:
//! - `equal(a, b) == equal(b, a)`
//! - `equal(a, b)` implies `hash(a) == hash(b)`
//! - `compare(a, b) == Equal` iff `equal(a, b)`
//! - `copy(v)` is independent of `v` unless `T` is itself a shared
//!   handle, in which case copying duplicates the handle.

use core::fmt;
use core::hash::{Hash, Hasher};

/// Default construction of a fresh element.
pub trait Construct<T> {
    fn construct(&self) -> T;
}

/// Duplication of an element.
pub trait Copier<T> {
    fn copy(&self, value: &T) -> T;
}

/// Equivalence between elements.
pub trait Equality<T> {
    fn equal(&self, a: &T, b: &T) -> bool;
}

/// Hashing consistent with `Equality`.
pub trait Hashing<T>: Equality<T> {
    fn hash<H: Hasher>(&self, value: &T, state: &mut H);
}

/// Total order consistent with `Equality`.
pub trait Ordering<T>: Equality<T> {
    fn compare(&self, a: &T, b: &T) -> core::cmp::Ordering;
}

/// Diagnostic identity of an element. Defaults to its address.
pub trait Identify<T> {
    fn identify(&self, value: &T) -> Identity {
        Identity::of(value)
    }
}

/// The full operation table. Blanket-implemented for any `O` that
/// provides every capability.
pub trait ElementOps<T>:
    Construct<T> + Copier<T> + Hashing<T> + Ordering<T> + Identify<T>
{
}

impl<T, O> ElementOps<T> for O where
    O: Construct<T> + Copier<T> + Hashing<T> + Ordering<T> + Identify<T>
{
}

/// Operations backed by the element type's own std traits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Natural;

impl<T: Default> Construct<T> for Natural {
    #[inline]
    fn construct(&self) -> T {
        T::default()
    }
}

impl<T: Clone> Copier<T> for Natural {
    #[inline]
    fn copy(&self, value: &T) -> T {
        value.clone()
    }
}

impl<T: Eq> Equality<T> for Natural {
    #[inline]
    fn equal(&self, a: &T, b: &T) -> bool {
        a == b
    }
}

impl<T: Eq + Hash> Hashing<T> for Natural {
    #[inline]
    fn hash<H: Hasher>(&self, value: &T, state: &mut H) {
        value.hash(state)
    }
}

impl<T: Ord> Ordering<T> for Natural {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> core::cmp::Ordering {
        a.cmp(b)
    }
}

impl<T> Identify<T> for Natural {}

/// Opaque diagnostic handle for an element: the address it lives at.
///
/// Stable only while the element is not moved. Containers that keep
/// elements in place (list nodes, table slots) hand out stable identities
/// until the element is removed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identity(usize);

impl Identity {
    pub fn of<T: ?Sized>(value: &T) -> Self {
        Identity(value as *const T as *const () as usize)
    }

    pub fn addr(self) -> usize {
        self.0
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({:#x})", self.0)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_with<O: Hashing<T>, T>(ops: &O, v: &T) -> u64 {
        let mut h = DefaultHasher::new();
        ops.hash(v, &mut h);
        h.finish()
    }

    /// ASCII case-insensitive strings: a custom table that disagrees with
    /// `String`'s own `Eq`.
    struct Folded;
    impl Equality<String> for Folded {
        fn equal(&self, a: &String, b: &String) -> bool {
            a.eq_ignore_ascii_case(b)
        }
    }
    impl Hashing<String> for Folded {
        fn hash<H: Hasher>(&self, value: &String, state: &mut H) {
            for b in value.bytes() {
                state.write_u8(b.to_ascii_lowercase());
            }
        }
    }
    impl Ordering<String> for Folded {
        fn compare(&self, a: &String, b: &String) -> core::cmp::Ordering {
            a.to_ascii_lowercase().cmp(&b.to_ascii_lowercase())
        }
    }

    /// Invariant: `Natural` mirrors the std traits of the element type.
    #[test]
    fn natural_delegates_to_std_traits() {
        let n = Natural;
        let z: i32 = n.construct();
        assert_eq!(z, 0);
        let s = String::from("abc");
        let c = n.copy(&s);
        assert_eq!(c, s);
        assert!(Equality::<i32>::equal(&n, &3, &3));
        assert_eq!(Ordering::<i32>::compare(&n, &1, &2), core::cmp::Ordering::Less);
        assert_eq!(hash_with(&n, &5u8), hash_with(&n, &5u8));
    }

    /// Invariant: equal elements hash equally and compare as `Equal`,
    /// including under a custom table.
    #[test]
    fn custom_ops_keep_the_laws() {
        let f = Folded;
        let a = "Hello".to_string();
        let b = "hELLO".to_string();
        assert!(f.equal(&a, &b) && f.equal(&b, &a));
        assert_eq!(hash_with(&f, &a), hash_with(&f, &b));
        assert_eq!(f.compare(&a, &b), core::cmp::Ordering::Equal);
        assert!(!f.equal(&a, &"world".to_string()));
    }

    /// Invariant: `Natural` satisfies the umbrella trait for ordinary types.
    #[test]
    fn natural_is_full_element_ops() {
        fn needs_all<T, O: ElementOps<T>>(_: &O) {}
        needs_all::<String, _>(&Natural);
        needs_all::<(u8, i64), _>(&Natural);
    }

    /// Boxed values identified by their heap block, which survives moves
    /// of the box itself.
    struct Heaped;
    impl Identify<Box<u32>> for Heaped {
        fn identify(&self, value: &Box<u32>) -> Identity {
            Identity::of(&**value)
        }
    }

    #[test]
    fn identify_defaults_to_address_and_can_be_overridden() {
        let x = 9u32;
        assert_eq!(Natural.identify(&x), Identity::of(&x));

        let b = Box::new(4u32);
        let before = Heaped.identify(&b);
        let moved = vec![b];
        assert_eq!(Heaped.identify(&moved[0]), before);
        assert_ne!(Natural.identify(&moved[0]), before);
    }

    #[test]
    fn identity_is_address() {
        let x = 1u64;
        let y = 1u64;
        assert_eq!(Identity::of(&x), Identity::of(&x));
        assert_ne!(Identity::of(&x), Identity::of(&y));
        assert!(Identity::of(&x).to_string().starts_with("0x"));
    }
}
