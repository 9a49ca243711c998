//! value-collections: generic value-semantics containers with pluggable
//! element operations.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small family of single-threaded containers (Vector, List,
//!   Queue, HashSet, HashMap) whose equality, hashing, ordering,
//!   construction and copying come from an explicit operations value
//!   rather than being fixed by the element type.
//! - Layers:
//!   - element: capability traits (`Construct`, `Copier`, `Equality`,
//!     `Hashing`, `Ordering`, `Identify`) and `Natural`, which maps them
//!     onto std traits.
//!   - BucketTable<T>: chained-bucket engine shared by HashSet and
//!     HashMap. Elements sit in a generational slot arena and carry their
//!     insertion hash; buckets are chains of slot keys.
//!   - HashSet<T, O, S> / HashMap<K, V, O, S>: public hash containers on
//!     top of BucketTable. HashMap stores `(key, value)` entries probed by
//!     key only.
//!   - Vector<T, O>, List<T, O>, Queue<T, O>: sequences. Queue derefs to
//!     List and adds peek/pop at both ends.
//!   - RefCounted<T>: shared-ownership handle, usable as an element.
//!
//! Constraints
//! - Single-threaded: no internal locking. The hash containers and
//!   RefCounted are `!Send`/`!Sync`.
//! - Containers own their elements. Values move in; `clone` deep-copies
//!   through `Copier`.
//! - Iterators borrow their container, so structural mutation while
//!   iterating is rejected at compile time.
//!
//! Element operations
//! - Each container asks only for what its methods use: `sort` needs
//!   `Ordering`, hash containers need `Hashing`, `resize` needs
//!   `Construct`, `clone` needs `Copier`.
//! - A custom operations value may treat elements as equal on part of
//!   their content. `HashSet::get` and `HashSet::replace` then read and
//!   overwrite the full stored element from a partial probe.
//!
//! Hashing and rehashing invariants
//! - Each stored element keeps the `u64` hash computed at insertion and
//!   placement always uses it; user hashing never runs during a resize.
//! - `LoadPolicy` bounds the fill between a minimum and maximum
//!   percentage. Inserts grow the bucket array past the maximum, removals
//!   shrink it under the minimum, never below `min_buckets`. Each resize
//!   is a full rehash within the call that triggered it.
//!
//! Reentrancy
//! - BucketTable calls user `equal` while probing. A debug-only guard
//!   panics if that code reenters the same table.
//!
//! Errors
//! - Expected absence comes back as `CollectionError` (out of bounds,
//!   empty, not found) or as a `bool`/`Option`. Broken preconditions
//!   (`Index` past the end, count overflow) panic or abort.
//!
//! Set algebra
//! - `retain`, `include`, `exclude` and `invert` mutate the receiver and
//!   only read their argument. Borrowing rules rule out passing a set to
//!   itself; callers clone first when they want that.
//! - `intersection`, `union`, `difference` and `symmetric_difference`
//!   (and `&`, `|`, `-`, `^` on borrowed sets) return a new set built
//!   from a copy of the left operand.

mod bucket_table;
pub mod config;
pub mod element;
pub mod error;
pub mod hash_map;
pub mod hash_set;
mod hash_set_proptest;
pub mod list;
pub mod queue;
pub mod ref_counted;
mod reentrancy;
pub mod vector;

// Public surface
pub use config::LoadPolicy;
pub use element::{
    Construct, Copier, ElementOps, Equality, Hashing, Identify, Identity, Natural, Ordering,
};
pub use error::{CollectionError, ConfigError, Result};
pub use hash_map::HashMap;
pub use hash_set::{DefaultHashBuilder, HashSet};
pub use list::List;
pub use queue::Queue;
pub use ref_counted::RefCounted;
pub use vector::{Direction, Vector};
