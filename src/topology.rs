//! The reference manufacturing-line topology.
//!
//! Grounded directly in `original_source/manufacturing_process.c`'s `setup_manufacturing_process`
//! — same 15 places (registered in the same order, so the same stable indices) and the same
//! 16 transitions, adopting the later Worker-consuming rework variant and the canonical
//! Worker=3 / Assembly 2-in-2-out topology per spec.md §9. This is one example input; the
//! kernel in `net`/`marking`/`kernel` runs any weighted net of comparable size, not just
//! this one.

use crate::error::NetError;
use crate::net::{Net, NetBuilder, PlaceId, TransitionId};

/// Named handles into the reference topology, so workers can refer to
/// `topology.start_processing` instead of a bare numeric index. Deliberately holds no `Net`
/// of its own — the net is owned by the [`crate::kernel::PetriNetKernel`] it was built for.
pub struct Topology {
    // Places.
    pub raw_material: PlaceId,
    pub ready_to_process: PlaceId,
    pub processing: PlaceId,
    pub processed: PlaceId,
    pub ready_to_assemble: PlaceId,
    pub assembled: PlaceId,
    pub qc_active_1: PlaceId,
    pub post_qc1_buffer: PlaceId,
    pub ready_for_individual_package: PlaceId,
    pub individually_packaged: PlaceId,
    pub final_packaged: PlaceId,
    pub painted: PlaceId,
    pub qc_active_2: PlaceId,
    pub worker: PlaceId,
    pub rework_bin: PlaceId,

    // Transitions.
    pub load_material: TransitionId,
    pub start_processing: TransitionId,
    pub finish_processing: TransitionId,
    pub start_assembly: TransitionId,
    pub finish_assembly: TransitionId,
    pub start_qc1: TransitionId,
    pub pass_qc1: TransitionId,
    pub fail_qc1: TransitionId,
    pub select_to_paint: TransitionId,
    pub skip_paint: TransitionId,
    pub start_qc2: TransitionId,
    pub pass_qc2: TransitionId,
    pub fail_qc2: TransitionId,
    pub individual_package: TransitionId,
    pub bulk_package: TransitionId,
    pub rework_process: TransitionId,
}

/// Builds the reference manufacturing line: load -> process -> assemble -> QC1 ->
/// paint?/skip -> QC2 -> individual pack -> bulk pack, with a rework loop feeding failed QC
/// items back to `Processed` and a three-token `Worker` place limiting concurrent QC/rework
/// activity. Returns the frozen [`Net`] alongside the named handles into it.
pub fn build() -> Result<(Net, Topology), NetError> {
    let mut b = NetBuilder::new();

    let raw_material = b.add_place("Raw Material", 20)?;
    let ready_to_process = b.add_place("Ready to Process", 0)?;
    let processing = b.add_place("Processing", 0)?;
    let processed = b.add_place("Processed", 0)?;
    let ready_to_assemble = b.add_place("Ready to Assemble", 0)?;
    let assembled = b.add_place("Assembled", 0)?;
    let qc_active_1 = b.add_place("QC Active 1", 0)?;
    let post_qc1_buffer = b.add_place("Passed QC1 / Decision", 0)?;
    let ready_for_individual_package = b.add_place("Ready for Individual Package", 0)?;
    let individually_packaged = b.add_place("Individually Packaged", 0)?;
    let final_packaged = b.add_place("Final Packaged", 0)?;
    let painted = b.add_place("Painted", 0)?;
    let qc_active_2 = b.add_place("QC Active 2", 0)?;
    let worker = b.add_place("Worker", 3)?;
    let rework_bin = b.add_place("Rework Bin", 0)?;

    let load_material = b.add_transition("Load Material")?;
    b.add_input_arc(load_material, raw_material, 1)?;
    b.add_output_arc(load_material, ready_to_process, 1)?;

    let start_processing = b.add_transition("Start Processing")?;
    b.add_input_arc(start_processing, ready_to_process, 1)?;
    b.add_output_arc(start_processing, processing, 1)?;

    let finish_processing = b.add_transition("Finish Processing")?;
    b.add_input_arc(finish_processing, processing, 1)?;
    b.add_output_arc(finish_processing, processed, 1)?;

    let start_assembly = b.add_transition("Start Assembly")?;
    b.add_input_arc(start_assembly, processed, 2)?;
    b.add_output_arc(start_assembly, ready_to_assemble, 2)?;

    let finish_assembly = b.add_transition("Finish Assembly")?;
    b.add_input_arc(finish_assembly, ready_to_assemble, 2)?;
    b.add_output_arc(finish_assembly, assembled, 1)?;

    let start_qc1 = b.add_transition("Start QC 1")?;
    b.add_input_arc(start_qc1, assembled, 1)?;
    b.add_input_arc(start_qc1, worker, 1)?;
    b.add_output_arc(start_qc1, qc_active_1, 1)?;

    let pass_qc1 = b.add_transition("Pass QC 1")?;
    b.add_input_arc(pass_qc1, qc_active_1, 1)?;
    b.add_output_arc(pass_qc1, post_qc1_buffer, 1)?;
    b.add_output_arc(pass_qc1, worker, 1)?;

    let fail_qc1 = b.add_transition("Fail QC 1")?;
    b.add_input_arc(fail_qc1, qc_active_1, 1)?;
    b.add_output_arc(fail_qc1, rework_bin, 1)?;
    b.add_output_arc(fail_qc1, worker, 1)?;

    let select_to_paint = b.add_transition("Select to Paint")?;
    b.add_input_arc(select_to_paint, post_qc1_buffer, 1)?;
    b.add_output_arc(select_to_paint, painted, 1)?;

    let skip_paint = b.add_transition("Skip Paint")?;
    b.add_input_arc(skip_paint, post_qc1_buffer, 1)?;
    b.add_output_arc(skip_paint, ready_for_individual_package, 1)?;

    let start_qc2 = b.add_transition("Start QC 2")?;
    b.add_input_arc(start_qc2, painted, 1)?;
    b.add_input_arc(start_qc2, worker, 1)?;
    b.add_output_arc(start_qc2, qc_active_2, 1)?;

    let pass_qc2 = b.add_transition("Pass QC 2")?;
    b.add_input_arc(pass_qc2, qc_active_2, 1)?;
    b.add_output_arc(pass_qc2, ready_for_individual_package, 1)?;
    b.add_output_arc(pass_qc2, worker, 1)?;

    let fail_qc2 = b.add_transition("Fail QC 2")?;
    b.add_input_arc(fail_qc2, qc_active_2, 1)?;
    b.add_output_arc(fail_qc2, rework_bin, 1)?;
    b.add_output_arc(fail_qc2, worker, 1)?;

    let individual_package = b.add_transition("Individual Package")?;
    b.add_input_arc(individual_package, ready_for_individual_package, 1)?;
    b.add_output_arc(individual_package, individually_packaged, 1)?;

    let bulk_package = b.add_transition("Bulk Package")?;
    b.add_input_arc(bulk_package, individually_packaged, 5)?;
    b.add_output_arc(bulk_package, final_packaged, 1)?;

    let rework_process = b.add_transition("Rework Process")?;
    b.add_input_arc(rework_process, rework_bin, 1)?;
    b.add_input_arc(rework_process, worker, 1)?;
    b.add_output_arc(rework_process, processed, 1)?;
    b.add_output_arc(rework_process, worker, 1)?;

    let net = b.build();
    let topology = Topology {
        raw_material,
        ready_to_process,
        processing,
        processed,
        ready_to_assemble,
        assembled,
        qc_active_1,
        post_qc1_buffer,
        ready_for_individual_package,
        individually_packaged,
        final_packaged,
        painted,
        qc_active_2,
        worker,
        rework_bin,
        load_material,
        start_processing,
        finish_processing,
        start_assembly,
        finish_assembly,
        start_qc1,
        pass_qc1,
        fail_qc1,
        select_to_paint,
        skip_paint,
        start_qc2,
        pass_qc2,
        fail_qc2,
        individual_package,
        bulk_package,
        rework_process,
    };
    Ok((net, topology))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_topology_has_fifteen_places_and_sixteen_transitions() {
        let (net, _topology) = build().unwrap();
        assert_eq!(net.num_places(), 15);
        assert_eq!(net.num_transitions(), 16);
    }

    #[test]
    fn worker_starts_with_three_tokens() {
        let (net, topology) = build().unwrap();
        assert_eq!(net.initial_marking()[topology.worker.index()], 3);
    }

    #[test]
    fn rework_consumes_and_returns_a_worker_token() {
        let (net, topology) = build().unwrap();
        let rework = net.transition(topology.rework_process);
        let consumes_worker =
            rework.inputs().iter().any(|arc| arc.place == topology.worker && arc.weight == 1);
        let returns_worker =
            rework.outputs().iter().any(|arc| arc.place == topology.worker && arc.weight == 1);
        assert!(consumes_worker && returns_worker, "rework must both take and give back a Worker token");
    }
}
