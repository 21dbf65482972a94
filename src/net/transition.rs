//! Transitions and their weighted arcs.

use derive_more::Display;

use super::place::{truncate_name, PlaceId};

/// Maximum input arcs (and, separately, maximum output arcs) a single transition may carry.
pub const MAX_ARCS_PER_DIRECTION: usize = 5;

/// Stable index of a transition within a [`Net`](super::Net), assigned at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "T{}", _0)]
pub struct TransitionId(pub usize);

impl TransitionId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A directed, weighted edge between a transition and one of its places.
///
/// The direction (input vs. output) is not stored on the arc itself — it is implied by
/// which of [`Transition::inputs`] / [`Transition::outputs`] holds it.
#[derive(Debug, Clone, Copy)]
pub struct Arc {
    pub place: PlaceId,
    pub weight: u32,
}

/// A transition's static attributes: name and its weighted input/output arcs.
///
/// Multiple arcs between the same place and transition are permitted and behave additively
/// (the reference topology does not exercise this, but nothing here forbids it).
#[derive(Debug, Clone)]
pub struct Transition {
    pub(crate) name: String,
    pub(crate) inputs: Vec<Arc>,
    pub(crate) outputs: Vec<Arc>,
}

impl Transition {
    pub(crate) fn new(name: &str) -> Self {
        Self { name: truncate_name(name), inputs: Vec::new(), outputs: Vec::new() }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn inputs(&self) -> &[Arc] {
        &self.inputs
    }

    #[must_use]
    pub fn outputs(&self) -> &[Arc] {
        &self.outputs
    }
}
