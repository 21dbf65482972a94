//! Worker tasks (C4): long-lived cooperative loops that propose firings against a shared
//! kernel. A worker is not part of the net — it is an agent that drives it.
//!
//! Every timed activity here holds its token in an in-progress place through a successful
//! start-fire *before* delaying (spec.md §4.4/§9, pattern (a)): check enabledness only to
//! skip a probably-useless attempt, never as the basis for a decision made across a delay.
//! Grounded in `original_source/tasks.c`'s `task_painter_router`/`task_quality_control`,
//! whose comment literally reads "FIXED VERSION: Eliminates TOCTOU race condition" — the
//! same fix this module applies throughout.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::StartupError;
use crate::kernel::PetriNetKernel;
use crate::net::TransitionId;
use crate::rng::UniformRng;
use crate::topology::Topology;

/// Shared context every worker loop closes over.
#[derive(Clone)]
pub struct WorkerCtx {
    pub kernel: Arc<PetriNetKernel>,
    pub topology: Arc<Topology>,
    pub rng: Arc<UniformRng>,
    pub running: Arc<AtomicBool>,
    /// Scales every worker's cadence/delay. `1.0` reproduces the reference timings of
    /// spec.md §4.4 exactly; values below `1.0` speed up the simulated line, above `1.0` slow
    /// it down. Additive runtime knob, not a topology change.
    pub cadence_multiplier: f64,
}

impl WorkerCtx {
    fn running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Sleeps in short slices so a worker notices `running` flip to false promptly instead of
    /// riding out a multi-second activity delay (spec.md §5: "workers should observe [cancellation]
    /// at their delay points").
    fn sleep(&self, duration: Duration) {
        const SLICE: Duration = Duration::from_millis(50);
        let mut remaining = duration.mul_f64(self.cadence_multiplier.max(0.0));
        while remaining > Duration::ZERO && self.running() {
            let step = remaining.min(SLICE);
            thread::sleep(step);
            remaining -= step;
        }
    }

    fn fire(&self, t: TransitionId) -> bool {
        self.kernel.fire(t)
    }

    fn is_enabled(&self, t: TransitionId) -> bool {
        self.kernel.is_enabled(t)
    }
}

/// Spawns the seven reference workers as native threads. Any spawn failure is fatal
/// (spec.md §7: `WorkerStartFailure`); earlier threads already spawned keep running since
/// there is no cancellation path — startup simply reports the first failure and the process
/// exits.
pub fn spawn_workers(ctx: WorkerCtx) -> Result<Vec<JoinHandle<()>>, StartupError> {
    let loops: [(&'static str, fn(WorkerCtx)); 7] = [
        ("material-loader", material_loader),
        ("processor", processor),
        ("assembler", assembler),
        ("painter-router", painter_router),
        ("qc-worker", qc_worker),
        ("reworker", reworker),
        ("packager", packager),
    ];

    loops
        .into_iter()
        .map(|(name, run)| {
            let ctx = ctx.clone();
            thread::Builder::new()
                .name(name.to_string())
                .spawn(move || run(ctx))
                .map_err(|source| StartupError::WorkerStartFailure { worker: name, source })
        })
        .collect()
}

fn material_loader(ctx: WorkerCtx) {
    while ctx.running() {
        if ctx.fire(ctx.topology.load_material) {
            info!(worker = "material-loader", "loaded raw material -> Ready to Process");
        }
        ctx.sleep(Duration::from_millis(800));
    }
}

fn processor(ctx: WorkerCtx) {
    let mut processed_count = 0u64;
    while ctx.running() {
        if ctx.fire(ctx.topology.start_processing) {
            processed_count += 1;
            info!(worker = "processor", item = processed_count, "started processing");
            ctx.sleep(Duration::from_millis(1500));
            if ctx.fire(ctx.topology.finish_processing) {
                info!(worker = "processor", item = processed_count, "finished processing");
            }
        }
        ctx.sleep(Duration::from_millis(300));
    }
}

fn assembler(ctx: WorkerCtx) {
    let mut assembled_count = 0u64;
    while ctx.running() {
        if ctx.fire(ctx.topology.start_assembly) {
            assembled_count += 1;
            info!(worker = "assembler", unit = assembled_count, "started assembly of 2 processed items");
            ctx.sleep(Duration::from_millis(1200));
            if ctx.fire(ctx.topology.finish_assembly) {
                info!(worker = "assembler", unit = assembled_count, "finished assembly");
            }
        }
        ctx.sleep(Duration::from_millis(300));
    }
}

/// Routes a post-QC1 item to paint (30% chance) or straight to packaging.
///
/// The probabilistic choice is made *before* firing, and the choice only commits by firing
/// the transition for that choice — never by checking enabledness, delaying, then firing.
fn painter_router(ctx: WorkerCtx) {
    const PAINT_CHANCE_PERCENT: u8 = 30;
    let mut paint_count = 0u64;
    while ctx.running() {
        if ctx.is_enabled(ctx.topology.select_to_paint) {
            if ctx.rng.uniform_0_100() < PAINT_CHANCE_PERCENT {
                if ctx.fire(ctx.topology.select_to_paint) {
                    paint_count += 1;
                    info!(worker = "painter-router", item = paint_count, "selected for custom paint");
                    ctx.sleep(Duration::from_millis(1500));
                    info!(worker = "painter-router", item = paint_count, "finished painting -> QC2");
                } else {
                    debug!(worker = "painter-router", "lost the race to select for paint, retrying next tick");
                }
            } else if ctx.is_enabled(ctx.topology.skip_paint) {
                if ctx.fire(ctx.topology.skip_paint) {
                    debug!(worker = "painter-router", "skipped paint -> direct to packaging");
                }
            }
        }
        ctx.sleep(Duration::from_millis(400));
    }
}

/// QC2 takes priority over QC1 whenever both are enabled (spec.md §4.4: "pick QC₂ over QC₁
/// when both enabled"). Priority lives entirely in this worker's selection rule; the kernel
/// itself has no notion of priority among enabled transitions.
fn qc_worker(ctx: WorkerCtx) {
    const FAIL_CHANCE_PERCENT: u8 = 5;
    let mut qc_count = 0u64;
    while ctx.running() {
        let stage = if ctx.is_enabled(ctx.topology.start_qc2) {
            Some((ctx.topology.start_qc2, ctx.topology.pass_qc2, ctx.topology.fail_qc2))
        } else if ctx.is_enabled(ctx.topology.start_qc1) {
            Some((ctx.topology.start_qc1, ctx.topology.pass_qc1, ctx.topology.fail_qc1))
        } else {
            None
        };

        let Some((start, pass, fail)) = stage else {
            ctx.sleep(Duration::from_millis(500));
            continue;
        };

        if !ctx.fire(start) {
            ctx.sleep(Duration::from_millis(500));
            continue;
        }

        qc_count += 1;
        info!(worker = "qc-worker", check = qc_count, "performing check");
        ctx.sleep(Duration::from_millis(1000));

        let result = if ctx.rng.uniform_0_100() < FAIL_CHANCE_PERCENT { fail } else { pass };
        if ctx.fire(result) {
            if result == fail {
                warn!(worker = "qc-worker", check = qc_count, "check FAILED -> Rework Bin");
            } else {
                info!(worker = "qc-worker", check = qc_count, "check PASSED -> next stage");
            }
        } else {
            warn!(worker = "qc-worker", check = qc_count, "failed to complete check");
        }

        ctx.sleep(Duration::from_millis(200));
    }
}

fn reworker(ctx: WorkerCtx) {
    let mut rework_count = 0u64;
    while ctx.running() {
        if ctx.fire(ctx.topology.rework_process) {
            rework_count += 1;
            info!(worker = "reworker", unit = rework_count, "started rework -> back to Processed");
            ctx.sleep(Duration::from_millis(2500));
            info!(worker = "reworker", unit = rework_count, "finished rework");
        }
        ctx.sleep(Duration::from_millis(1000));
    }
}

fn packager(ctx: WorkerCtx) {
    let mut individual_count = 0u64;
    let mut bulk_count = 0u64;
    while ctx.running() {
        let worked = if ctx.fire(ctx.topology.bulk_package) {
            bulk_count += 1;
            info!(worker = "packager", unit = bulk_count, "bulk-packaged 5 individual units");
            true
        } else if ctx.fire(ctx.topology.individual_package) {
            individual_count += 1;
            debug!(worker = "packager", unit = individual_count, "individually packaged 1 unit");
            true
        } else {
            false
        };
        ctx.sleep(Duration::from_millis(if worked { 300 } else { 600 }));
    }
}
