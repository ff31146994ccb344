//! Integration test: a 3-D pipe circuit with elbow joints.
//!
//! An inlet (vertical pipe, 90° torus elbow, short horizontal pipe)
//! feeds a long straight run; the outlet is the inlet mirrored about the
//! run's midplane, and a solid fluid cylinder fills the run. The elbow
//! reuses the pipe's ring count so the joints line up, and the rings it
//! shares with the mating pipes are removed with `subtract` before the
//! union — the standard workflow for butting revolved components.

use approx::assert_relative_eq;
use granule_core::ops::union_named;
use granule_core::sizing::ring_count;
use granule_core::{AngleRange, Axis, Plane};
use granule_shapes::revolved::{cylinder_side, filled_cylinder, torus_surface};

const DL: f64 = 2e-4;
const R_PIPE: f64 = 0.002;
const R_BEND: f64 = 0.008;
const L_VERT: f64 = 0.004;
const L_HRZ: f64 = 0.002;
const L_RUN: f64 = 0.02 - DL;

/// Points per pipe cross-section ring.
fn n_ring() -> usize {
    ring_count(std::f64::consts::TAU * R_PIPE, DL).0
}

fn build_inlet() -> granule_core::Geometry {
    let vert = cylinder_side(R_PIPE, L_VERT, DL, Axis::Z)
        .unwrap()
        .shift(-R_BEND - L_HRZ, 0.0, R_BEND);
    let hrz = cylinder_side(R_PIPE, L_HRZ - DL, DL, Axis::X)
        .unwrap()
        .shift(-L_HRZ, 0.0, 0.0);
    let elbow = torus_surface(
        R_BEND,
        R_PIPE,
        DL,
        Plane::Xoz,
        Some(AngleRange::new(180.0, 270.0).unwrap()),
        Some(n_ring()),
    )
    .unwrap()
    .shift(-L_HRZ, 0.0, R_BEND)
    // The elbow's endpoint rings sit on the same circles as the mating
    // pipes' end rings; drop them in favour of the pipes' particles.
    .subtract(&vert, 0.6 * DL)
    .unwrap()
    .subtract(&hrz, 0.6 * DL)
    .unwrap();
    union_named(&[&vert, &elbow, &hrz], "inlet")
}

#[test]
fn pipe_and_elbow_ring_counts_line_up() {
    assert_eq!(n_ring(), 63);
    let vert = cylinder_side(R_PIPE, L_VERT, DL, Axis::Z).unwrap();
    assert_eq!(vert.size() % n_ring(), 0);
    assert_eq!(vert.size() / n_ring(), 21); // rows along the axis

    // The realised axial extent is recoverable from the cloud itself.
    assert_relative_eq!(vert.extent(Axis::Z), L_VERT, max_relative = 1e-12);

    let elbow = torus_surface(
        R_BEND,
        R_PIPE,
        DL,
        Plane::Xoz,
        Some(AngleRange::new(180.0, 270.0).unwrap()),
        Some(n_ring()),
    )
    .unwrap();
    assert_eq!(elbow.size() % n_ring(), 0);
}

#[test]
fn elbow_junction_rings_are_subtracted_exactly_once() {
    let vert = cylinder_side(R_PIPE, L_VERT, DL, Axis::Z)
        .unwrap()
        .shift(-R_BEND - L_HRZ, 0.0, R_BEND);
    let hrz = cylinder_side(R_PIPE, L_HRZ - DL, DL, Axis::X)
        .unwrap()
        .shift(-L_HRZ, 0.0, 0.0);
    let elbow = torus_surface(
        R_BEND,
        R_PIPE,
        DL,
        Plane::Xoz,
        Some(AngleRange::new(180.0, 270.0).unwrap()),
        Some(n_ring()),
    )
    .unwrap()
    .shift(-L_HRZ, 0.0, R_BEND);

    // Each junction removes exactly one endpoint ring of the elbow.
    let trimmed = elbow
        .subtract(&vert, 0.6 * DL)
        .unwrap()
        .subtract(&hrz, 0.6 * DL)
        .unwrap();
    assert_eq!(trimmed.size(), elbow.size() - 2 * n_ring());
}

#[test]
fn outlet_is_the_mirrored_inlet() {
    let inlet = build_inlet();
    let outlet = inlet.mirror(Plane::Yoz, L_RUN / 2.0);
    assert_eq!(outlet.size(), inlet.size());

    // Mirroring twice about the same plane restores the inlet.
    let back = outlet.mirror(Plane::Yoz, L_RUN / 2.0);
    for (p, q) in inlet.points().iter().zip(back.points()) {
        for k in 0..3 {
            assert_relative_eq!(p[k], q[k], epsilon = 1e-12);
        }
    }

    // The outlet lands on the far side of the run.
    let (lo, _) = inlet.bounds().unwrap();
    let (_, hi) = outlet.bounds().unwrap();
    assert_relative_eq!(hi[0], L_RUN - lo[0], max_relative = 1e-9);
}

#[test]
fn fluid_fits_inside_the_run_with_one_spacing_clearance() {
    let run = cylinder_side(R_PIPE, L_RUN, DL, Axis::X).unwrap();
    let fluid = filled_cylinder(R_PIPE - DL, L_RUN, DL, Axis::X).unwrap();

    let both = &run + &fluid;
    assert_eq!(both.size(), run.size() + fluid.size());
    let sep = both.min_separation().unwrap();
    assert!(sep >= 0.95 * DL && sep <= 1.05 * DL, "sep = {sep}");
}

#[test]
fn full_circuit_passes_the_overlap_gate() {
    let inlet = build_inlet();
    let run = cylinder_side(R_PIPE, L_RUN, DL, Axis::X).unwrap();
    let outlet = inlet.mirror(Plane::Yoz, L_RUN / 2.0);
    let fluid = filled_cylinder(R_PIPE - DL, L_RUN, DL, Axis::X).unwrap();

    let circuit = union_named(&[&inlet, &run, &outlet, &fluid], "circuit");
    assert_eq!(
        circuit.size(),
        2 * inlet.size() + run.size() + fluid.size()
    );
    assert_eq!(circuit.region_ids().len(), circuit.size());

    // No coincident particles anywhere in the assembly.
    assert_eq!(circuit.overlap_count(1e-6).unwrap(), 0);

    // The bend compresses spacing on its inner side (radius ratio 3/4),
    // so the gate here is proportionally looser than for straight runs.
    let sep = circuit.min_separation().unwrap();
    assert!(sep >= 0.7 * DL, "min separation {sep} too small");
}
