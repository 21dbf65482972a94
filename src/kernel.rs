//! The transition kernel (C3): `is_enabled` and `fire`, plus the snapshot (C6) and external
//! injection (C7) operations that share its marking guard.
//!
//! `fire`'s contract (spec.md §4.3) is the one property every caller depends on:
//!
//! 1. Acquire the net-wide marking guard.
//! 2. Re-evaluate enabledness under the guard; if not enabled, release and return `false`.
//! 3. Otherwise debit every input arc, then credit every output arc, all before releasing.
//! 4. Release the guard, mark the dirty flag, return `true`.
//!
//! Steps 2 and 3 happen under one lock acquisition — no other fire, snapshot, or injection
//! ever observes a marking with inputs debited but outputs not yet credited.

use serde::Serialize;

use crate::error::NetError;
use crate::marking::Marking;
use crate::net::{Net, PlaceId, TransitionId};

/// One place's entry in a [`Snapshot`].
#[derive(Debug, Clone, Serialize)]
pub struct PlaceSnapshot {
    pub name: String,
    pub tokens: u32,
}

/// A read-only, internally consistent view of the full marking, ordered by place index
/// (spec.md §6: registration order).
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub places: Vec<PlaceSnapshot>,
}

/// Owns the frozen [`Net`] and the mutable [`Marking`] behind it; the single object workers,
/// the snapshot service, and operator input all share.
pub struct PetriNetKernel {
    net: Net,
    marking: Marking,
}

impl PetriNetKernel {
    #[must_use]
    pub fn new(net: Net) -> Self {
        let marking = Marking::new(net.initial_marking());
        Self { net, marking }
    }

    #[must_use]
    pub fn net(&self) -> &Net {
        &self.net
    }

    /// A consistent instantaneous read of one place's token count (C1).
    #[must_use]
    pub fn tokens_of(&self, place: PlaceId) -> u32 {
        self.marking.tokens_of(place.index())
    }

    /// Snapshot test: true iff every input arc of `t` is currently satisfied. May become
    /// stale the instant it returns — callers that need a decision to stick must fire, not
    /// branch on this (spec.md §4.3, §9's TOCTOU note).
    #[must_use]
    pub fn is_enabled(&self, t: TransitionId) -> bool {
        let counts = self.marking.lock();
        Self::enabled_under(&self.net, &counts, t)
    }

    fn enabled_under(net: &Net, counts: &[u32], t: TransitionId) -> bool {
        net.transition(t)
            .inputs()
            .iter()
            .all(|arc| counts.get(arc.place.index()).copied().unwrap_or(0) >= arc.weight)
    }

    /// Attempts to fire `t` atomically. Returns `false` (no mutation at all) if `t` was not
    /// enabled at the moment the guard was taken.
    pub fn fire(&self, t: TransitionId) -> bool {
        let mut counts = self.marking.lock();
        if !Self::enabled_under(&self.net, &counts, t) {
            return false;
        }
        let transition = self.net.transition(t);
        for arc in transition.inputs() {
            counts[arc.place.index()] -= arc.weight;
        }
        for arc in transition.outputs() {
            counts[arc.place.index()] += arc.weight;
        }
        drop(counts);
        self.marking.mark_dirty();
        true
    }

    /// Operator action (C7): injects `amount` tokens into `place`. The only failure mode is
    /// an unknown place index.
    pub fn inject(&self, place: PlaceId, amount: u32) -> Result<(), NetError> {
        if place.index() >= self.net.num_places() {
            return Err(NetError::UnknownPlace(place));
        }
        {
            let mut counts = self.marking.lock();
            counts[place.index()] += amount;
        }
        self.marking.mark_dirty();
        Ok(())
    }

    /// Produces an internally consistent snapshot of the whole marking and clears the dirty
    /// flag (C6). All counts are read within one guard scope, even if that means a brief
    /// serialization with concurrent firings.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let places = {
            let counts = self.marking.lock();
            self.net
                .places()
                .iter()
                .enumerate()
                .map(|(i, place)| PlaceSnapshot {
                    name: place.name().to_string(),
                    tokens: counts.get(i).copied().unwrap_or(0),
                })
                .collect()
        };
        self.marking.take_dirty();
        Snapshot { places }
    }
}
