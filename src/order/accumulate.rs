/*
MIT License with freud Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: freud
Copyright (c) 2010-2019 The Regents of the University of Michigan.
All rights reserved.
*/

//! Thread-parallel bond accumulation and reduction
//!
//! The accumulation phase walks each particle's bonds and sums spherical
//! harmonic contributions into worker-private buffers. The particle range is
//! split into one contiguous chunk per worker slot, and each slot's buffer is
//! touched only by the task that owns that chunk, so the phase needs no
//! synchronization. The reduction phase runs after the parallel iterator
//! joins; it is a second parallel pass, this time over particles, that sums
//! across slots in fixed slot order and divides each row by its accumulated
//! bond weight. Fixed slot order keeps the floating-point result reproducible
//! for a given worker count.

use num_complex::Complex64;
use rayon::prelude::*;

use crate::geometry::{SimulationBox, Vector3D};
use crate::harmonics::HarmonicBasis;
use crate::locality::NeighborList;

/// One worker's private accumulation state
#[derive(Debug)]
struct WorkerSlot {
    /// Flat (particle, m) harmonic sums, row stride 2l+1
    qlm: Vec<Complex64>,
    /// Per-particle accumulated bond weight (bond count when unweighted)
    weight: Vec<f64>,
}

/// Worker-slot array for one engine instance
///
/// Slots are reset rather than freed between computes of identical shape, so
/// repeated calls on the same system do not reallocate.
#[derive(Debug)]
pub(crate) struct BondAccumulator {
    num_coefficients: usize,
    num_particles: usize,
    slots: Vec<WorkerSlot>,
}

impl BondAccumulator {
    pub(crate) fn new(num_coefficients: usize) -> Self {
        Self {
            num_coefficients,
            num_particles: 0,
            slots: Vec::new(),
        }
    }

    /// Prepare `workers` zeroed slots for `num_particles`, reusing the
    /// existing allocations when the shape is unchanged
    pub(crate) fn reset(&mut self, num_particles: usize, workers: usize) {
        let workers = workers.max(1);
        if self.num_particles == num_particles && self.slots.len() == workers {
            for slot in &mut self.slots {
                slot.qlm.fill(Complex64::new(0.0, 0.0));
                slot.weight.fill(0.0);
            }
            return;
        }

        self.num_particles = num_particles;
        self.slots = (0..workers)
            .map(|_| WorkerSlot {
                qlm: vec![Complex64::new(0.0, 0.0); num_particles * self.num_coefficients],
                weight: vec![0.0; num_particles],
            })
            .collect();
    }

    /// Accumulate harmonic contributions of every in-range bond
    ///
    /// Bonds are filtered to the half-open shell [rmin, rmax) on the wrapped
    /// displacement length, and self bonds are skipped. In weighted mode each
    /// contribution is scaled by the bond's neighbor-list weight; otherwise
    /// every bond counts as 1.
    pub(crate) fn accumulate<B: HarmonicBasis>(
        &mut self,
        basis: &B,
        sim_box: &SimulationBox,
        nlist: &NeighborList,
        points: &[Vector3D],
        rmin: f64,
        rmax: f64,
        weighted: bool,
    ) {
        let n = self.num_particles;
        if n == 0 {
            return;
        }
        let num_coefficients = self.num_coefficients;
        let workers = self.slots.len();
        let chunk_size = (n + workers - 1) / workers;

        self.slots
            .par_iter_mut()
            .enumerate()
            .for_each(|(slot_index, slot)| {
                let start = slot_index * chunk_size;
                let end = ((slot_index + 1) * chunk_size).min(n);
                if start >= end {
                    return;
                }

                let mut ylm = vec![Complex64::new(0.0, 0.0); num_coefficients];
                for i in start..end {
                    let row =
                        &mut slot.qlm[i * num_coefficients..(i + 1) * num_coefficients];
                    for bond in nlist.bonds(i) {
                        let j = bond.point_index;
                        if j == i {
                            continue;
                        }
                        debug_assert!(
                            j < points.len(),
                            "neighbor list references point {} but only {} points were given",
                            j,
                            points.len()
                        );
                        let delta = sim_box.separation(&points[i], &points[j]);
                        let r = delta.length();
                        if r < rmin || r >= rmax {
                            continue;
                        }
                        let w = if weighted { bond.weight } else { 1.0 };
                        basis.evaluate_into(
                            delta.polar_angle(),
                            delta.azimuthal_angle(),
                            &mut ylm,
                        );
                        for (q, y) in row.iter_mut().zip(ylm.iter()) {
                            *q += w * *y;
                        }
                        slot.weight[i] += w;
                    }
                }
            });
    }

    /// Merge the slots into canonical per-particle rows
    ///
    /// `qlm` receives the weight-averaged harmonic row of each particle and
    /// `weights` its total bond weight. Particles with zero accumulated
    /// weight get an all-zero row rather than NaN.
    pub(crate) fn reduce_into(&self, qlm: &mut [Complex64], weights: &mut [f64]) {
        let num_coefficients = self.num_coefficients;
        debug_assert_eq!(qlm.len(), self.num_particles * num_coefficients);
        debug_assert_eq!(weights.len(), self.num_particles);

        qlm.par_chunks_mut(num_coefficients)
            .zip(weights.par_iter_mut())
            .enumerate()
            .for_each(|(i, (row, weight))| {
                row.fill(Complex64::new(0.0, 0.0));
                *weight = 0.0;
                for slot in &self.slots {
                    *weight += slot.weight[i];
                    let src = &slot.qlm[i * num_coefficients..(i + 1) * num_coefficients];
                    for (dst, s) in row.iter_mut().zip(src.iter()) {
                        *dst += *s;
                    }
                }
                if *weight > 0.0 {
                    let inv = 1.0 / *weight;
                    for q in row.iter_mut() {
                        *q *= inv;
                    }
                }
            });
    }
}
