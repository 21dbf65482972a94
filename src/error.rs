//! Error types.
//!
//! Builder-time failures (`NetError`) are signal, not panics: the caller decides whether to
//! abort. Startup failures (`StartupError`) are fatal by convention — `main` turns the first
//! one it sees into a single logged line and exits. Steady-state failures never reach here;
//! workers and the snapshot service log and continue (see `worker` and `snapshot_service`).

use thiserror::Error;

use crate::net::{PlaceId, TransitionId};

/// What kind of registration exceeded its capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityKind {
    Place,
    Transition,
}

/// Which side of a transition an arc overflow happened on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcDirection {
    Input,
    Output,
}

/// Errors raised while building a [`crate::net::Net`].
#[derive(Error, Debug)]
pub enum NetError {
    #[error("capacity exceeded: cannot register another {kind:?} (limit is {limit})")]
    CapacityExceeded { kind: CapacityKind, limit: usize },

    #[error("transition {transition} already has {limit} {direction:?} arcs")]
    TooManyArcs { transition: TransitionId, direction: ArcDirection, limit: usize },

    #[error("arc weight must be positive, got {0}")]
    NonPositiveWeight(u32),

    #[error("no such place: {0}")]
    UnknownPlace(PlaceId),

    #[error("no such transition: {0}")]
    UnknownTransition(TransitionId),
}

/// Fatal errors during process startup. Surfacing one of these aborts the process.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("failed to create synchronization primitive: {0}")]
    GuardCreationFailure(String),

    #[error("failed to start worker '{worker}': {source}")]
    WorkerStartFailure { worker: &'static str, #[source] source: std::io::Error },
}
