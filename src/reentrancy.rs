//! Debug-only detection of reentry into a bucket table.
//!
//! Probes call user `equal` while the table is mid-operation. If that
//! user code finds its way back into the same table (through a raw
//! pointer or interior mutability), debug builds panic at the nested
//! entry. User `hash` runs in the container before the table is entered,
//! so it is outside any section. Release builds compile the check away.

#[cfg(debug_assertions)]
use core::cell::Cell;
use core::marker::PhantomData;

/// Per-table open flag: set while a `Section` is live. Each table
/// operation opens one with `let _s = self.reentry.enter();`.
#[derive(Debug)]
pub(crate) struct ReentryCheck {
    #[cfg(debug_assertions)]
    open: Cell<bool>,
    // single-threaded like the containers that embed it
    _unsync: PhantomData<*mut ()>,
}

impl ReentryCheck {
    pub(crate) const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            open: Cell::new(false),
            _unsync: PhantomData,
        }
    }

    #[inline]
    pub(crate) fn enter(&self) -> Section<'_> {
        #[cfg(debug_assertions)]
        {
            assert!(
                !self.open.replace(true),
                "reentrant call into a bucket table during a probe"
            );
            Section { owner: self }
        }
        #[cfg(not(debug_assertions))]
        {
            Section { _owner: PhantomData }
        }
    }
}

impl Default for ReentryCheck {
    fn default() -> Self {
        Self::new()
    }
}

// A fresh table never inherits an open section.
impl Clone for ReentryCheck {
    fn clone(&self) -> Self {
        Self::new()
    }
}

/// Open section; closes on drop.
pub(crate) struct Section<'a> {
    #[cfg(debug_assertions)]
    owner: &'a ReentryCheck,
    #[cfg(not(debug_assertions))]
    _owner: PhantomData<&'a ()>,
}

impl Drop for Section<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        self.owner.open.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::ReentryCheck;

    #[test]
    fn sequential_sections_are_fine() {
        let r = ReentryCheck::new();
        drop(r.enter());
        let _s = r.enter();
    }

    #[cfg(debug_assertions)]
    #[test]
    fn nested_section_panics_in_debug() {
        let r = ReentryCheck::new();
        let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _outer = r.enter();
            let _inner = r.enter();
        }));
        assert!(res.is_err(), "nested entry must panic in debug builds");
    }

    /// Invariant: the flag clears when a section unwinds.
    #[cfg(debug_assertions)]
    #[test]
    fn flag_clears_after_panic() {
        let r = ReentryCheck::new();
        let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _s = r.enter();
            panic!("user code failed");
        }));
        assert!(res.is_err());
        assert!(!r.open.get());
        let _again = r.enter();
    }

    #[cfg(not(debug_assertions))]
    #[test]
    fn nested_section_is_noop_in_release() {
        let r = ReentryCheck::new();
        let _outer = r.enter();
        let _inner = r.enter();
    }
}
