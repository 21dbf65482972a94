//! Concurrent weighted Place/Transition Petri-net engine driving a simulated manufacturing
//! line.
//!
//! The core — `net`, `marking`, and `kernel` — implements a bounded, weighted P/T net and its
//! atomic firing protocol; it runs any topology of comparable size, not just the reference
//! manufacturing line built by `topology`. `worker`, `snapshot_service`, and `input` are the
//! collaborators that drive it concurrently and expose it to the outside world.

pub mod error;
pub mod input;
pub mod kernel;
pub mod marking;
pub mod net;
pub mod rng;
pub mod snapshot_service;
pub mod topology;
pub mod worker;
