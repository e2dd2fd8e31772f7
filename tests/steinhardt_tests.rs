/*
MIT License with freud Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: freud
Copyright (c) 2010-2019 The Regents of the University of Michigan.
All rights reserved.
*/

//! Integration tests for the Steinhardt order-parameter engine
//!
//! The perfect-FCC reference values are the ones published with freud's
//! Steinhardt test-suite.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use rstest::rstest;
use steinhardt_rs::geometry::{SimulationBox, Vector3D};
use steinhardt_rs::locality::NeighborList;
use steinhardt_rs::order::{Steinhardt, SteinhardtParams, Variant};

const PERFECT_FCC_Q6: f64 = 0.57452416;
const PERFECT_FCC_W6: f64 = -0.00262604;

/// Perfect FCC crystal of n x n x n conventional cells with lattice constant
/// `a`, in a fully periodic box
fn make_fcc(n: usize, a: f64) -> (SimulationBox, Vec<Vector3D>) {
    let l = n as f64 * a;
    let sim_box = SimulationBox::cube(l).unwrap();
    let basis = [
        (0.0, 0.0, 0.0),
        (0.0, 0.5, 0.5),
        (0.5, 0.0, 0.5),
        (0.5, 0.5, 0.0),
    ];

    let mut points = Vec::with_capacity(4 * n * n * n);
    for i in 0..n {
        for j in 0..n {
            for k in 0..n {
                for &(bx, by, bz) in &basis {
                    points.push(Vector3D::new(
                        (i as f64 + bx) * a - l / 2.0,
                        (j as f64 + by) * a - l / 2.0,
                        (k as f64 + bz) * a - l / 2.0,
                    ));
                }
            }
        }
    }
    (sim_box, points)
}

/// Deterministic pseudo-random cluster of `n` points within a sphere of
/// radius `radius`
fn make_cluster(n: usize, radius: f64) -> Vec<Vector3D> {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        (state >> 11) as f64 / (1u64 << 53) as f64
    };

    let mut points = Vec::with_capacity(n);
    while points.len() < n {
        let p = Vector3D::new(
            radius * (2.0 * next() - 1.0),
            radius * (2.0 * next() - 1.0),
            radius * (2.0 * next() - 1.0),
        );
        if p.length() <= radius {
            points.push(p);
        }
    }
    points
}

/// Rotate `v` by `angle` around the unit vector `axis` (Rodrigues formula)
fn rotate(v: Vector3D, axis: Vector3D, angle: f64) -> Vector3D {
    let (sin, cos) = angle.sin_cos();
    let cross = axis.cross(&v);
    let dot = axis.dot(&v);
    Vector3D::new(
        v.x * cos + cross.x * sin + axis.x * dot * (1.0 - cos),
        v.y * cos + cross.y * sin + axis.y * dot * (1.0 - cos),
        v.z * cos + cross.z * sin + axis.z * dot * (1.0 - cos),
    )
}

#[test]
fn test_perfect_fcc_q6() {
    // Cutoff between the first (a/sqrt(2)) and second (a) neighbor shells
    let (sim_box, points) = make_fcc(3, 2.0);
    let nlist = NeighborList::all_pairs(&sim_box, &points, 1.5).unwrap();
    assert_eq!(nlist.num_bonds(), 12 * points.len());

    let mut engine = Steinhardt::new(SteinhardtParams::new(6, 1.5)).unwrap();
    engine.compute(&sim_box, &nlist, &points);

    assert_eq!(engine.particle_count(), points.len());
    for &ql in engine.ql() {
        assert_relative_eq!(ql, PERFECT_FCC_Q6, epsilon = 1e-5);
    }
}

#[test]
fn test_perfect_fcc_w6() {
    let (sim_box, points) = make_fcc(3, 2.0);
    let nlist = NeighborList::all_pairs(&sim_box, &points, 1.5).unwrap();

    let mut engine =
        Steinhardt::new(SteinhardtParams::new(6, 1.5).with_wl(true)).unwrap();
    engine.compute(&sim_box, &nlist, &points);

    for wl in engine.wl() {
        assert_abs_diff_eq!(wl.re, PERFECT_FCC_W6, epsilon = 1e-5);
        assert_abs_diff_eq!(wl.im, 0.0, epsilon = 1e-8);
    }
}

#[test]
fn test_perfect_crystal_variants_agree() {
    // Every particle of a perfect crystal has the same environment, so
    // neighbor-shell averaging and system-mean normalization change nothing
    let (sim_box, points) = make_fcc(3, 2.0);
    let nlist = NeighborList::all_pairs(&sim_box, &points, 1.5).unwrap();

    for (average, norm) in [(false, false), (true, false), (false, true), (true, true)] {
        let mut engine = Steinhardt::new(
            SteinhardtParams::new(6, 1.5)
                .with_average(average)
                .with_norm(norm),
        )
        .unwrap();
        engine.compute(&sim_box, &nlist, &points);
        for &ql in engine.ql() {
            assert_relative_eq!(ql, PERFECT_FCC_Q6, epsilon = 1e-5);
        }
    }
}

#[rstest]
#[case(Vector3D::new(1.0, 0.0, 0.0))]
#[case(Vector3D::new(0.0, 1.0, 0.0))]
#[case(Vector3D::new(0.0, 0.0, 1.0))]
fn test_single_bond_gives_unit_ql(#[case] offset: Vector3D) {
    // One bond saturates Ql at 1 regardless of its direction
    let sim_box = SimulationBox::cube(20.0).unwrap();
    let points = [Vector3D::origin(), offset];
    let nlist = NeighborList::all_pairs(&sim_box, &points, 1.5).unwrap();

    let mut engine = Steinhardt::new(SteinhardtParams::new(6, 1.5)).unwrap();
    engine.compute(&sim_box, &nlist, &points);

    for &ql in engine.ql() {
        assert_relative_eq!(ql, 1.0, epsilon = 1e-12);
    }
}

#[rstest]
#[case(2)]
#[case(4)]
#[case(6)]
#[case(8)]
fn test_single_bond_unit_ql_for_any_degree(#[case] l: usize) {
    let sim_box = SimulationBox::cube(20.0).unwrap();
    let points = [Vector3D::origin(), Vector3D::new(0.4, -0.7, 0.2)];
    let nlist = NeighborList::all_pairs(&sim_box, &points, 1.5).unwrap();

    let mut engine = Steinhardt::new(SteinhardtParams::new(l, 1.5)).unwrap();
    engine.compute(&sim_box, &nlist, &points);

    for &ql in engine.ql() {
        assert_relative_eq!(ql, 1.0, epsilon = 1e-12);
    }
}

#[test]
fn test_zero_neighbor_particles_are_zero() {
    let sim_box = SimulationBox::cube(50.0).unwrap();
    let points = [
        Vector3D::origin(),
        Vector3D::new(10.0, 0.0, 0.0),
        Vector3D::new(0.0, 10.0, 0.0),
    ];
    let nlist = NeighborList::all_pairs(&sim_box, &points, 1.5).unwrap();
    assert_eq!(nlist.num_bonds(), 0);

    let mut engine = Steinhardt::new(
        SteinhardtParams::new(6, 1.5).with_wl(true).with_average(true),
    )
    .unwrap();
    engine.compute(&sim_box, &nlist, &points);

    for &ql in engine.ql() {
        assert!(ql.is_finite());
        assert_eq!(ql, 0.0);
    }
    for wl in engine.wl() {
        assert!(wl.re.is_finite() && wl.im.is_finite());
        assert_eq!(wl.norm(), 0.0);
    }
}

#[test]
fn test_rmin_shell_excludes_close_bonds() {
    let sim_box = SimulationBox::cube(20.0).unwrap();
    // Particle 1 sits inside rmin of particle 0, particle 2 inside the shell
    let points = [
        Vector3D::origin(),
        Vector3D::new(0.5, 0.0, 0.0),
        Vector3D::new(0.0, 1.2, 0.0),
    ];
    let nlist = NeighborList::all_pairs(&sim_box, &points, 1.5).unwrap();

    let mut engine =
        Steinhardt::new(SteinhardtParams::new(6, 1.5).with_rmin(1.0)).unwrap();
    engine.compute(&sim_box, &nlist, &points);

    let ql = engine.ql();
    // 0 and 2 share the one in-shell bond; 1 has none left
    assert_relative_eq!(ql[0], 1.0, epsilon = 1e-12);
    assert_eq!(ql[1], 0.0);
    assert_relative_eq!(ql[2], 1.0, epsilon = 1e-12);
}

#[test]
fn test_rotational_invariance() {
    let sim_box = SimulationBox::cube(100.0).unwrap();
    let points = make_cluster(24, 2.0);
    let nlist = NeighborList::all_pairs(&sim_box, &points, 1.5).unwrap();
    assert!(nlist.num_bonds() > 0);

    let mut engine =
        Steinhardt::new(SteinhardtParams::new(6, 1.5).with_wl(true)).unwrap();
    engine.compute(&sim_box, &nlist, &points);
    let ql_before = engine.ql().to_vec();
    let wl_before = engine.wl().to_vec();

    let axis = Vector3D::new(1.0, 2.0, 3.0).normalize();
    let rotated: Vec<Vector3D> = points.iter().map(|&p| rotate(p, axis, 1.1)).collect();
    let nlist_rotated = NeighborList::all_pairs(&sim_box, &rotated, 1.5).unwrap();
    assert_eq!(nlist_rotated.num_bonds(), nlist.num_bonds());

    engine.compute(&sim_box, &nlist_rotated, &rotated);
    for (before, after) in ql_before.iter().zip(engine.ql()) {
        assert_relative_eq!(before, after, epsilon = 1e-9);
    }
    for (before, after) in wl_before.iter().zip(engine.wl()) {
        assert_abs_diff_eq!(before.re, after.re, epsilon = 1e-9);
        assert_abs_diff_eq!(before.im, after.im, epsilon = 1e-9);
    }
}

#[test]
fn test_thread_count_invariance() {
    let (sim_box, points) = make_fcc(2, 2.0);
    let nlist = NeighborList::all_pairs(&sim_box, &points, 1.5).unwrap();
    let params = SteinhardtParams::new(6, 1.5).with_average(true).with_wl(true);

    let mut results = Vec::new();
    for threads in [1usize, 2, 4] {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .unwrap();
        let mut engine = Steinhardt::new(params.clone()).unwrap();
        pool.install(|| engine.compute(&sim_box, &nlist, &points));
        results.push((engine.ql().to_vec(), engine.wl().to_vec()));
    }

    let (ql_ref, wl_ref) = &results[0];
    for (ql, wl) in &results[1..] {
        for (a, b) in ql_ref.iter().zip(ql) {
            assert_relative_eq!(a, b, epsilon = 1e-12);
        }
        for (a, b) in wl_ref.iter().zip(wl) {
            assert_abs_diff_eq!(a.re, b.re, epsilon = 1e-12);
            assert_abs_diff_eq!(a.im, b.im, epsilon = 1e-12);
        }
    }
}

#[test]
fn test_qlm_conjugate_symmetry() {
    let sim_box = SimulationBox::cube(100.0).unwrap();
    let points = make_cluster(16, 1.8);
    let nlist = NeighborList::all_pairs(&sim_box, &points, 1.5).unwrap();

    let mut engine = Steinhardt::new(SteinhardtParams::new(6, 1.5)).unwrap();
    engine.compute(&sim_box, &nlist, &points);

    let qlm = engine.qlm();
    let l = engine.l();
    for i in 0..engine.particle_count() {
        for m in 1..=l {
            let sign = if m % 2 == 0 { 1.0 } else { -1.0 };
            let expected = sign * qlm[(i, l + m)].conj();
            assert_abs_diff_eq!(qlm[(i, l - m)].re, expected.re, epsilon = 1e-12);
            assert_abs_diff_eq!(qlm[(i, l - m)].im, expected.im, epsilon = 1e-12);
        }
    }
}

#[test]
fn test_degenerate_average_falls_back_to_base() {
    // Without any bonds the averaged row is the base row for every particle
    let sim_box = SimulationBox::cube(50.0).unwrap();
    let points = [Vector3D::origin(), Vector3D::new(20.0, 0.0, 0.0)];
    let nlist = NeighborList::all_pairs(&sim_box, &points, 1.5).unwrap();

    let mut base = Steinhardt::new(SteinhardtParams::new(6, 1.5)).unwrap();
    base.compute(&sim_box, &nlist, &points);
    let mut averaged =
        Steinhardt::new(SteinhardtParams::new(6, 1.5).with_average(true)).unwrap();
    averaged.compute(&sim_box, &nlist, &points);

    assert_eq!(averaged.variant(), Variant::Averaged);
    assert_eq!(base.ql(), averaged.ql());
}

#[test]
fn test_averaged_pair_keeps_unit_ql_for_even_degree() {
    // The two particles of a single bond see mirrored environments, which for
    // even l have identical Qlm, so second-shell averaging changes nothing
    let sim_box = SimulationBox::cube(20.0).unwrap();
    let points = [Vector3D::origin(), Vector3D::new(0.0, 0.0, 1.0)];
    let nlist = NeighborList::all_pairs(&sim_box, &points, 1.5).unwrap();

    let mut engine =
        Steinhardt::new(SteinhardtParams::new(6, 1.5).with_average(true)).unwrap();
    engine.compute(&sim_box, &nlist, &points);

    for &ql in engine.ql() {
        assert_relative_eq!(ql, 1.0, epsilon = 1e-12);
    }
}

#[test]
fn test_uniform_weights_match_unweighted() {
    let (sim_box, points) = make_fcc(2, 2.0);
    let nlist = NeighborList::all_pairs(&sim_box, &points, 1.5).unwrap();
    // Same bonds with every weight doubled; averaging divides it back out
    let weighted_nlist = NeighborList::from_arrays_with_weights(
        points.len(),
        points.len(),
        nlist.query_point_indices().to_vec(),
        nlist.point_indices().to_vec(),
        nlist.distances().to_vec(),
        vec![2.0; nlist.num_bonds()],
    )
    .unwrap();

    let mut plain = Steinhardt::new(SteinhardtParams::new(6, 1.5)).unwrap();
    plain.compute(&sim_box, &nlist, &points);
    let mut weighted =
        Steinhardt::new(SteinhardtParams::new(6, 1.5).with_weighted(true)).unwrap();
    weighted.compute(&sim_box, &weighted_nlist, &points);

    for (a, b) in plain.ql().iter().zip(weighted.ql()) {
        assert_relative_eq!(a, b, epsilon = 1e-12);
    }
}

#[test]
fn test_perturbed_weights_change_the_result() {
    let (sim_box, points) = make_fcc(2, 2.0);
    let nlist = NeighborList::all_pairs(&sim_box, &points, 1.5).unwrap();
    // Double the weight of every third bond, breaking the shell symmetry
    let weights: Vec<f64> = (0..nlist.num_bonds())
        .map(|b| if b % 3 == 0 { 2.0 } else { 1.0 })
        .collect();
    let perturbed_nlist = NeighborList::from_arrays_with_weights(
        points.len(),
        points.len(),
        nlist.query_point_indices().to_vec(),
        nlist.point_indices().to_vec(),
        nlist.distances().to_vec(),
        weights,
    )
    .unwrap();

    let mut weighted =
        Steinhardt::new(SteinhardtParams::new(6, 1.5).with_weighted(true)).unwrap();
    weighted.compute(&sim_box, &perturbed_nlist, &points);

    let moved = weighted
        .ql()
        .iter()
        .any(|&ql| (ql - PERFECT_FCC_Q6).abs() > 1e-4);
    assert!(moved);
    assert!(weighted.ql().iter().all(|ql| ql.is_finite()));
}

#[test]
fn test_recompute_is_deterministic() {
    let (sim_box, points) = make_fcc(2, 2.0);
    let nlist = NeighborList::all_pairs(&sim_box, &points, 1.5).unwrap();

    let mut engine =
        Steinhardt::new(SteinhardtParams::new(6, 1.5).with_wl(true)).unwrap();
    engine.compute(&sim_box, &nlist, &points);
    let first_ql = engine.ql().to_vec();
    let first_wl = engine.wl().to_vec();

    // Buffers are reused in place; values must come out identical
    engine.compute(&sim_box, &nlist, &points);
    assert_eq!(first_ql, engine.ql());
    assert_eq!(first_wl, engine.wl());

    // The normalized variant runs its own global reduction; it must be just
    // as repeatable
    let mut normed =
        Steinhardt::new(SteinhardtParams::new(6, 1.5).with_norm(true)).unwrap();
    normed.compute(&sim_box, &nlist, &points);
    let first_norm = normed.ql().to_vec();
    normed.compute(&sim_box, &nlist, &points);
    assert_eq!(first_norm, normed.ql());
    assert!(first_norm.iter().all(|&ql| ql > 0.0));
}

#[test]
fn test_particle_count_change_reallocates() {
    let sim_box = SimulationBox::cube(20.0).unwrap();
    let pair = [Vector3D::origin(), Vector3D::new(0.0, 0.0, 1.0)];
    let pair_nlist = NeighborList::all_pairs(&sim_box, &pair, 1.5).unwrap();

    let mut engine = Steinhardt::new(SteinhardtParams::new(6, 1.5)).unwrap();
    engine.compute(&sim_box, &pair_nlist, &pair);
    assert_eq!(engine.particle_count(), 2);
    assert_eq!(engine.ql().len(), 2);

    let (fcc_box, fcc_points) = make_fcc(2, 2.0);
    let fcc_nlist = NeighborList::all_pairs(&fcc_box, &fcc_points, 1.5).unwrap();
    engine.compute(&fcc_box, &fcc_nlist, &fcc_points);
    assert_eq!(engine.particle_count(), fcc_points.len());
    assert_eq!(engine.ql().len(), fcc_points.len());
    for &ql in engine.ql() {
        assert_relative_eq!(ql, PERFECT_FCC_Q6, epsilon = 1e-5);
    }

    // And back down again
    engine.compute(&sim_box, &pair_nlist, &pair);
    assert_eq!(engine.ql().len(), 2);
    assert_relative_eq!(engine.ql()[0], 1.0, epsilon = 1e-12);
}
