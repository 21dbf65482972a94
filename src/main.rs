//! Process entry point: builds the reference net, spawns the seven workers and the operator
//! input watcher, then serves the snapshot endpoint on the main thread until the process is
//! killed (spec.md §1: "no teardown path in normal operation").

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::error;

use line_kernel::kernel::PetriNetKernel;
use line_kernel::rng::UniformRng;
use line_kernel::worker::{spawn_workers, WorkerCtx};
use line_kernel::{input, snapshot_service, topology};

/// Runtime configuration. The topology itself stays compile-time (spec.md §6); only the
/// transport-level knob a deployment actually varies is exposed here, grounded in the
/// corpus-wide `clap::Parser` + `env` pattern.
#[derive(Parser, Debug)]
#[command(about = "Concurrent Petri-net manufacturing line simulator")]
struct Args {
    /// Port the snapshot endpoint listens on.
    #[arg(long, env = "LINE_KERNEL_PORT", default_value_t = 8080)]
    port: u16,

    /// Scales every worker's cadence/delay; 1.0 reproduces the reference timings exactly.
    #[arg(long, env = "LINE_KERNEL_CADENCE_MULTIPLIER", default_value_t = 1.0)]
    cadence_multiplier: f64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let (net, topology) = topology::build().context("failed to build manufacturing net")?;
    let raw_material = topology.raw_material;

    let kernel = Arc::new(PetriNetKernel::new(net));
    let topology = Arc::new(topology);
    let rng = Arc::new(UniformRng::new());
    let running = Arc::new(AtomicBool::new(true));

    let ctx = WorkerCtx {
        kernel: Arc::clone(&kernel),
        topology,
        rng,
        running: Arc::clone(&running),
        cadence_multiplier: args.cadence_multiplier,
    };
    spawn_workers(ctx).context("failed to start worker threads")?;

    let input_kernel = Arc::clone(&kernel);
    let input_running = Arc::clone(&running);
    std::thread::Builder::new()
        .name("operator-input".into())
        .spawn(move || input::watch_stdin(input_kernel, raw_material, input_running))
        .context("failed to start operator input watcher")?;

    if let Err(err) = snapshot_service::serve(kernel, args.port) {
        error!(error = %err, port = args.port, "snapshot endpoint failed to bind");
        return Err(err).context("snapshot endpoint failed to bind");
    }
    Ok(())
}
