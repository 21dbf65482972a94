//! Operator input (C7 transport): a `'+'` keystroke injects one token into the raw-material
//! place; every other byte is ignored.
//!
//! Grounded in spec.md §6 ("A hook invoked on a keystroke event: the character `+` injects
//! one token into the raw-material place. Other keys are ignored"). True single-keystroke
//! (unbuffered, no-Enter-required) capture needs a raw-terminal-mode crate the rest of this
//! corpus does not reach for; this reads stdin byte-by-byte, which still satisfies the
//! contract for piped or line-buffered input and keeps the dependency stack unchanged.

use std::io::Read;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{info, warn};

use crate::kernel::PetriNetKernel;
use crate::net::PlaceId;

/// Reads stdin until EOF or `running` flips to false, injecting one token into `target` for
/// every `'+'` byte seen.
pub fn watch_stdin(kernel: Arc<PetriNetKernel>, target: PlaceId, running: Arc<AtomicBool>) {
    let stdin = std::io::stdin();
    let mut byte = [0u8; 1];
    let mut lock = stdin.lock();
    while running.load(Ordering::Relaxed) {
        match lock.read(&mut byte) {
            Ok(0) => break, // EOF
            Ok(_) => {
                if byte[0] == b'+' {
                    match kernel.inject(target, 1) {
                        Ok(()) => info!(place = %target, "operator injected 1 token"),
                        Err(err) => warn!(error = %err, "operator injection rejected"),
                    }
                }
            }
            Err(err) => {
                warn!(error = %err, "stdin read failed, stopping operator input watcher");
                break;
            }
        }
    }
}
