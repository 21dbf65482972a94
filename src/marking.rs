//! The marking: the only mutable state of the kernel (C1).
//!
//! Guarded by a single net-wide [`Mutex`] rather than per-place locks (spec.md §9: "A
//! reimplementation may collapse to a single guard around the whole marking; the performance
//! cost is negligible for nets of this size and the reasoning is simpler"). `fire` in
//! [`crate::kernel`] relies on this: it re-checks enablement and mutates under one lock
//! acquisition, so no other fire, snapshot, or injection can observe a half-applied firing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Per-place token counts plus a coalescing "dirty since last snapshot" flag.
pub struct Marking {
    counts: Mutex<Vec<u32>>,
    dirty: AtomicBool,
}

impl Marking {
    #[must_use]
    pub fn new(initial: Vec<u32>) -> Self {
        Self { counts: Mutex::new(initial), dirty: AtomicBool::new(false) }
    }

    /// A consistent instantaneous read of one place's token count.
    ///
    /// Never a torn read: the value returned corresponds to some real past state of the
    /// marking, taken and released entirely within the net-wide guard.
    #[must_use]
    pub fn tokens_of(&self, index: usize) -> u32 {
        self.counts.lock().expect("marking mutex poisoned").get(index).copied().unwrap_or(0)
    }

    /// Acquires the net-wide guard. Held for the duration of an enablement check, a full
    /// firing, or a snapshot — never released in the middle of one.
    pub(crate) fn lock(&self) -> MutexGuard<'_, Vec<u32>> {
        self.counts.lock().expect("marking mutex poisoned")
    }

    pub(crate) fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::Release);
    }

    /// Reads and clears the dirty flag in one step, for callers that want to coalesce polls.
    pub(crate) fn take_dirty(&self) -> bool {
        self.dirty.swap(false, Ordering::AcqRel)
    }
}
