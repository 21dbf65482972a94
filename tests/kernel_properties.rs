//! End-to-end scenarios against the reference manufacturing topology, driven directly through
//! the public `fire`/`is_enabled`/`inject`/`snapshot` surface rather than the worker threads,
//! so each scenario is deterministic.

use std::sync::Arc;
use std::thread;

use line_kernel::kernel::PetriNetKernel;
use line_kernel::net::PlaceId;
use line_kernel::topology;

fn fresh_kernel() -> (PetriNetKernel, topology::Topology) {
    let (net, topology) = topology::build().expect("reference topology must build");
    (PetriNetKernel::new(net), topology)
}

/// One item flowing load -> process -> assemble (x2) -> QC1 -> skip paint -> individual
/// package, never touching the paint/QC2 path.
#[test]
fn single_item_completes_the_no_paint_path() {
    let (kernel, t) = fresh_kernel();

    assert!(kernel.fire(t.load_material));
    assert!(kernel.fire(t.start_processing));
    assert!(kernel.fire(t.finish_processing));

    // Assembly needs two processed items.
    assert!(kernel.fire(t.load_material));
    assert!(kernel.fire(t.start_processing));
    assert!(kernel.fire(t.finish_processing));

    assert!(kernel.fire(t.start_assembly));
    assert!(kernel.fire(t.finish_assembly));

    assert!(kernel.fire(t.start_qc1));
    assert_eq!(kernel.tokens_of(t.worker), 2, "QC1 holds one Worker token while active");
    assert!(kernel.fire(t.pass_qc1));
    assert_eq!(kernel.tokens_of(t.worker), 3, "Worker token returns once QC1 resolves");

    assert!(kernel.fire(t.skip_paint));
    assert!(kernel.fire(t.individual_package));
    assert_eq!(kernel.tokens_of(t.individually_packaged), 1);
}

#[test]
fn assembly_is_not_enabled_with_only_one_processed_item() {
    let (kernel, t) = fresh_kernel();
    assert!(kernel.fire(t.load_material));
    assert!(kernel.fire(t.start_processing));
    assert!(kernel.fire(t.finish_processing));

    assert!(!kernel.is_enabled(t.start_assembly));
    assert!(!kernel.fire(t.start_assembly));
    assert_eq!(kernel.tokens_of(t.processed), 1);
}

#[test]
fn qc_occupies_one_of_three_worker_tokens() {
    let (kernel, t) = fresh_kernel();
    assert_eq!(kernel.tokens_of(t.worker), 3);

    kernel.inject(t.assembled, 1).unwrap();
    assert!(kernel.fire(t.start_qc1));
    assert_eq!(kernel.tokens_of(t.worker), 2);

    kernel.inject(t.assembled, 1).unwrap();
    assert!(kernel.fire(t.start_qc1));
    assert_eq!(kernel.tokens_of(t.worker), 1);

    kernel.inject(t.assembled, 1).unwrap();
    assert!(kernel.fire(t.start_qc1));
    assert_eq!(kernel.tokens_of(t.worker), 0);

    // A fourth concurrent QC/rework attempt has no Worker token left to claim.
    kernel.inject(t.assembled, 1).unwrap();
    assert!(!kernel.fire(t.start_qc1));
}

#[test]
fn fail_qc1_routes_to_rework_bin_and_rework_returns_a_processed_item() {
    let (kernel, t) = fresh_kernel();
    kernel.inject(t.assembled, 1).unwrap();
    assert!(kernel.fire(t.start_qc1));
    assert!(kernel.fire(t.fail_qc1));
    assert_eq!(kernel.tokens_of(t.rework_bin), 1);

    let worker_before = kernel.tokens_of(t.worker);
    assert!(kernel.fire(t.rework_process));
    assert_eq!(kernel.tokens_of(t.rework_bin), 0);
    assert_eq!(kernel.tokens_of(t.processed), 1);
    assert_eq!(kernel.tokens_of(t.worker), worker_before, "rework both takes and returns a Worker token");
}

#[test]
fn paint_path_runs_through_qc2_before_packaging() {
    let (kernel, t) = fresh_kernel();
    kernel.inject(t.post_qc1_buffer, 1).unwrap();
    assert!(kernel.fire(t.select_to_paint));
    assert_eq!(kernel.tokens_of(t.painted), 1);

    assert!(kernel.fire(t.start_qc2));
    assert!(kernel.fire(t.pass_qc2));
    assert_eq!(kernel.tokens_of(t.ready_for_individual_package), 1);
}

#[test]
fn bulk_package_requires_five_individually_packaged_units() {
    let (kernel, t) = fresh_kernel();
    kernel.inject(t.individually_packaged, 4).unwrap();
    assert!(!kernel.fire(t.bulk_package));

    kernel.inject(t.individually_packaged, 1).unwrap();
    assert!(kernel.fire(t.bulk_package));
    assert_eq!(kernel.tokens_of(t.individually_packaged), 0);
    assert_eq!(kernel.tokens_of(t.final_packaged), 1);
}

#[test]
fn operator_injection_adds_raw_material_without_disturbing_other_places() {
    let (kernel, t) = fresh_kernel();
    let before = kernel.tokens_of(t.raw_material);
    kernel.inject(t.raw_material, 5).unwrap();
    assert_eq!(kernel.tokens_of(t.raw_material), before + 5);
    assert_eq!(kernel.tokens_of(t.worker), 3);
}

#[test]
fn snapshot_reflects_injected_tokens_and_clears_dirty_state() {
    let (kernel, t) = fresh_kernel();
    kernel.inject(t.raw_material, 1).unwrap();
    let snapshot = kernel.snapshot();
    let raw = snapshot
        .places
        .iter()
        .find(|p| p.name == kernel.net().place_name(t.raw_material))
        .expect("raw material place present in snapshot");
    assert_eq!(raw.tokens, 21);
}

/// This sequence only fires transitions whose input and output arc weights sum equal
/// (Load/Start/Finish Processing), so the total token count across all places is conserved.
/// That is not true of the topology as a whole — Finish Assembly (2 in / 1 out) and Bulk
/// Package (5 in / 1 out) both reduce it.
#[test]
fn total_token_count_is_conserved_across_a_mixed_firing_sequence() {
    let (kernel, t) = fresh_kernel();
    let total = |k: &PetriNetKernel| -> u32 {
        (0..k.net().num_places()).map(|i| k.tokens_of(PlaceId(i))).sum()
    };
    let total_before = total(&kernel);

    for _ in 0..3 {
        kernel.fire(t.load_material);
    }
    kernel.fire(t.start_processing);
    kernel.fire(t.finish_processing);

    assert_eq!(total_before, total(&kernel));
}

/// Many threads hammering the same kernel concurrently: every successful fire is atomic, so
/// the final marking must equal the result of applying the successful fires in *some*
/// sequential order, and the Worker place must never go negative or above its capacity.
#[test]
fn concurrent_firings_never_oversubscribe_the_worker_pool() {
    let (net, t) = topology::build().expect("reference topology must build");
    let kernel = Arc::new(PetriNetKernel::new(net));
    kernel.inject(t.assembled, 20).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let kernel = Arc::clone(&kernel);
            let start_qc1 = t.start_qc1;
            thread::spawn(move || {
                for _ in 0..50 {
                    kernel.fire(start_qc1);
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    let worker_tokens = kernel.tokens_of(t.worker);
    assert!(worker_tokens <= 3, "Worker place must never exceed its capacity of 3");
}
