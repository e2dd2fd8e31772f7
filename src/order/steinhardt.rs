/*
MIT License with freud Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: freud
Copyright (c) 2010-2019 The Regents of the University of Michigan.
All rights reserved.
*/

//! Steinhardt bond-orientational order parameters
//!
//! For a particle i with bonds r_ij inside the shell [rmin, rmax), the local
//! harmonic expansion is the weighted bond average
//!
//! Qlm(i) = (1/W) Σ_j w_ij · Y_lm(θ(r_ij), φ(r_ij))
//!
//! combined into the rotationally invariant second-order parameter
//!
//! Ql(i) = sqrt(4π/(2l+1) · Σ_m |Qlm(i)|²)
//!
//! and, on request, the third-order invariant
//!
//! Wl(i) = Σ_{m1+m2+m3=0} (l l l; m1 m2 m3) · Qlm(i,m1) · Qlm(i,m2) · Qlm(i,m3)
//!
//! which separates FCC, HCP and BCC environments better than Ql alone.
//! The averaged variant smooths each particle's Qlm over its neighbor shell
//! before forming invariants (Lechner & Dellago); the normalized variant
//! reports the invariant of the system-averaged Qlm, one value broadcast to
//! every particle.
//!
//! See PJ Steinhardt (1983), DOI 10.1103/PhysRevB.28.784, and W Lechner
//! (2008), DOI 10.1063/1.2977970.

use log::debug;
use ndarray::ArrayView2;
use num_complex::Complex64;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::sync::Arc;
use std::time::Instant;

use super::accumulate::BondAccumulator;
use super::errors::{OrderError, Result};
use crate::geometry::{SimulationBox, Vector3D};
use crate::harmonics::{HarmonicBasis, SphericalHarmonics, Wigner3jTable};
use crate::locality::NeighborList;

/// Which member of the order-parameter family an engine reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Variant {
    /// Plain per-particle invariants
    Raw,
    /// Invariants of the neighbor-shell averaged Qlm
    Averaged,
    /// Invariant of the system-mean Qlm, broadcast to all particles
    Normalized,
    /// Neighbor-shell averaging followed by system-mean normalization
    AveragedNormalized,
}

impl Variant {
    fn from_flags(average: bool, norm: bool) -> Self {
        match (average, norm) {
            (false, false) => Variant::Raw,
            (true, false) => Variant::Averaged,
            (false, true) => Variant::Normalized,
            (true, true) => Variant::AveragedNormalized,
        }
    }

    /// Whether this variant smooths Qlm over the neighbor shell
    pub fn is_averaged(&self) -> bool {
        matches!(self, Variant::Averaged | Variant::AveragedNormalized)
    }

    /// Whether this variant reports the system-mean invariant
    pub fn is_normalized(&self) -> bool {
        matches!(self, Variant::Normalized | Variant::AveragedNormalized)
    }
}

/// Construction-time configuration for the order-parameter engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteinhardtParams {
    /// Spherical harmonic degree, at least 2
    pub l: usize,
    /// Outer shell radius; bonds at or beyond it are ignored
    pub rmax: f64,
    /// Inner shell radius; bonds below it are ignored (default 0)
    #[serde(default)]
    pub rmin: f64,
    /// Smooth Qlm over the neighbor shell before forming invariants
    #[serde(default)]
    pub average: bool,
    /// Report the invariant of the system-mean Qlm
    #[serde(default)]
    pub norm: bool,
    /// Also compute the third-order invariant Wl
    #[serde(default)]
    pub wl: bool,
    /// Scale bond contributions by neighbor-list weights
    #[serde(default)]
    pub weighted: bool,
}

impl SteinhardtParams {
    /// Parameters for degree `l` with outer cutoff `rmax` and all options off
    pub fn new(l: usize, rmax: f64) -> Self {
        Self {
            l,
            rmax,
            rmin: 0.0,
            average: false,
            norm: false,
            wl: false,
            weighted: false,
        }
    }

    /// Set the inner shell radius
    pub fn with_rmin(mut self, rmin: f64) -> Self {
        self.rmin = rmin;
        self
    }

    /// Enable or disable neighbor-shell averaging
    pub fn with_average(mut self, average: bool) -> Self {
        self.average = average;
        self
    }

    /// Enable or disable system-mean normalization
    pub fn with_norm(mut self, norm: bool) -> Self {
        self.norm = norm;
        self
    }

    /// Enable or disable the third-order invariant
    pub fn with_wl(mut self, wl: bool) -> Self {
        self.wl = wl;
        self
    }

    /// Enable or disable weighted bond contributions
    pub fn with_weighted(mut self, weighted: bool) -> Self {
        self.weighted = weighted;
        self
    }

    /// Check the construction invariants: finite 0 <= rmin < rmax and l >= 2
    pub fn validate(&self) -> Result<()> {
        if !self.rmax.is_finite()
            || !self.rmin.is_finite()
            || self.rmax <= 0.0
            || self.rmin < 0.0
            || self.rmin >= self.rmax
        {
            return Err(OrderError::InvalidCutoffs(self.rmin, self.rmax));
        }
        if self.l < 2 {
            return Err(OrderError::InvalidDegree(self.l));
        }
        Ok(())
    }
}

/// Second-order invariant of one harmonic row
fn invariant_from_row(prefactor: f64, row: &[Complex64]) -> f64 {
    let sum: f64 = row.iter().map(|q| q.norm_sqr()).sum();
    (prefactor * sum).sqrt()
}

/// Steinhardt order-parameter engine
///
/// One engine holds the configuration, the harmonic basis and all result
/// buffers. `compute` recomputes everything from scratch for the given
/// points; accessors borrow the buffers of the variant fixed at
/// construction, so a live result slice blocks the next `compute` call.
pub struct Steinhardt<B: HarmonicBasis = SphericalHarmonics> {
    params: SteinhardtParams,
    variant: Variant,
    basis: B,
    wigner: Option<Arc<Wigner3jTable>>,
    accumulator: BondAccumulator,
    num_particles: usize,
    /// Base bond-averaged harmonic rows, stride 2l+1
    qlm: Vec<Complex64>,
    /// Per-particle total bond weight from the base pass
    bond_weights: Vec<f64>,
    /// Neighbor-shell averaged rows, allocated when averaging
    qlm_ave: Vec<Complex64>,
    /// System-mean row of the active Qlm source, allocated when normalizing
    qlm_mean: Vec<Complex64>,
    ql: Vec<f64>,
    ql_ave: Vec<f64>,
    ql_norm: Vec<f64>,
    wl: Vec<Complex64>,
    wl_norm: Vec<Complex64>,
}

impl Steinhardt<SphericalHarmonics> {
    /// Create an engine with the default spherical-harmonic basis
    pub fn new(params: SteinhardtParams) -> Result<Self> {
        let basis = SphericalHarmonics::new(params.l);
        Self::with_basis(params, basis)
    }
}

impl<B: HarmonicBasis> Steinhardt<B> {
    /// Create an engine with a caller-supplied harmonic basis
    ///
    /// The basis degree must match `params.l`.
    pub fn with_basis(params: SteinhardtParams, basis: B) -> Result<Self> {
        params.validate()?;
        if basis.degree() != params.l {
            return Err(OrderError::BasisDegreeMismatch(basis.degree(), params.l));
        }

        let variant = Variant::from_flags(params.average, params.norm);
        let wigner = if params.wl {
            Some(Wigner3jTable::cached(params.l))
        } else {
            None
        };
        let accumulator = BondAccumulator::new(basis.num_coefficients());

        debug!(
            "Steinhardt engine: l = {}, shell = [{}, {}), variant = {:?}, wl = {}, weighted = {}",
            params.l, params.rmin, params.rmax, variant, params.wl, params.weighted
        );

        Ok(Self {
            params,
            variant,
            basis,
            wigner,
            accumulator,
            num_particles: 0,
            qlm: Vec::new(),
            bond_weights: Vec::new(),
            qlm_ave: Vec::new(),
            qlm_mean: Vec::new(),
            ql: Vec::new(),
            ql_ave: Vec::new(),
            ql_norm: Vec::new(),
            wl: Vec::new(),
            wl_norm: Vec::new(),
        })
    }

    /// Compute the order parameters for `points`
    ///
    /// Every enabled result buffer is fully recomputed; previous contents are
    /// discarded. The neighbor list must cover all of `points`: every query
    /// index below `points.len()` and every point index within it.
    pub fn compute(
        &mut self,
        sim_box: &SimulationBox,
        nlist: &NeighborList,
        points: &[Vector3D],
    ) {
        debug_assert!(
            nlist.num_query_points() >= points.len(),
            "neighbor list covers {} query points but {} were given",
            nlist.num_query_points(),
            points.len()
        );
        debug_assert!(
            nlist.num_points() <= points.len(),
            "neighbor list references up to {} points but only {} were given",
            nlist.num_points(),
            points.len()
        );

        let timer = Instant::now();
        self.reallocate(points.len());

        let workers = rayon::current_num_threads();
        self.accumulator.reset(self.num_particles, workers);

        self.base_compute(sim_box, nlist, points);
        if self.params.average {
            self.compute_average(sim_box, nlist, points);
        }
        if self.params.norm {
            self.compute_system_mean();
        }
        if self.params.wl {
            self.compute_wl();
        }

        debug!(
            "Computed {:?} order parameters for {} particles over {} bonds in {:?}",
            self.variant,
            self.num_particles,
            nlist.num_bonds(),
            timer.elapsed()
        );
    }

    /// Resize result buffers when the particle count changes
    fn reallocate(&mut self, num_particles: usize) {
        if self.num_particles == num_particles && !self.ql.is_empty() {
            return;
        }
        self.num_particles = num_particles;
        let nc = self.basis.num_coefficients();
        let zero = Complex64::new(0.0, 0.0);

        self.qlm = vec![zero; num_particles * nc];
        self.bond_weights = vec![0.0; num_particles];
        self.ql = vec![0.0; num_particles];
        if self.params.average {
            self.qlm_ave = vec![zero; num_particles * nc];
            self.ql_ave = vec![0.0; num_particles];
        }
        if self.params.norm {
            self.qlm_mean = vec![zero; nc];
            self.ql_norm = vec![0.0; num_particles];
        }
        if self.params.wl {
            self.wl = vec![zero; num_particles];
            if self.params.norm {
                self.wl_norm = vec![zero; num_particles];
            }
        }
    }

    /// Accumulate, reduce and form the base per-particle invariants
    fn base_compute(
        &mut self,
        sim_box: &SimulationBox,
        nlist: &NeighborList,
        points: &[Vector3D],
    ) {
        self.accumulator.accumulate(
            &self.basis,
            sim_box,
            nlist,
            points,
            self.params.rmin,
            self.params.rmax,
            self.params.weighted,
        );
        self.accumulator
            .reduce_into(&mut self.qlm, &mut self.bond_weights);

        let nc = self.basis.num_coefficients();
        let prefactor = self.prefactor();
        self.ql
            .par_iter_mut()
            .zip(self.qlm.par_chunks(nc))
            .for_each(|(ql, row)| {
                *ql = invariant_from_row(prefactor, row);
            });
    }

    /// Smooth Qlm over the neighbor shell and form the averaged invariants
    ///
    /// Each particle's averaged row is its own row plus the rows of its
    /// in-range neighbors, divided by one plus the neighbor count. A particle
    /// without in-range neighbors keeps its base row.
    fn compute_average(
        &mut self,
        sim_box: &SimulationBox,
        nlist: &NeighborList,
        points: &[Vector3D],
    ) {
        let nc = self.basis.num_coefficients();
        let rmin = self.params.rmin;
        let rmax = self.params.rmax;
        let base = &self.qlm;
        let prefactor = self.prefactor();

        self.qlm_ave
            .par_chunks_mut(nc)
            .zip(self.ql_ave.par_iter_mut())
            .enumerate()
            .for_each(|(i, (row, ql_ave))| {
                row.copy_from_slice(&base[i * nc..(i + 1) * nc]);
                let mut count = 1usize;
                for bond in nlist.bonds(i) {
                    let j = bond.point_index;
                    if j == i {
                        continue;
                    }
                    let delta = sim_box.separation(&points[i], &points[j]);
                    let r = delta.length();
                    if r < rmin || r >= rmax {
                        continue;
                    }
                    let src = &base[j * nc..(j + 1) * nc];
                    for (dst, s) in row.iter_mut().zip(src.iter()) {
                        *dst += *s;
                    }
                    count += 1;
                }
                let inv = 1.0 / count as f64;
                for q in row.iter_mut() {
                    *q *= inv;
                }
                *ql_ave = invariant_from_row(prefactor, row);
            });
    }

    /// Average the active Qlm source over all particles and broadcast its
    /// invariant
    ///
    /// The reduction is sequential in particle order, so the normalized
    /// values are bit-identical across worker counts.
    fn compute_system_mean(&mut self) {
        let nc = self.basis.num_coefficients();
        let n = self.num_particles;
        let source = if self.params.average {
            &self.qlm_ave
        } else {
            &self.qlm
        };

        self.qlm_mean.fill(Complex64::new(0.0, 0.0));
        for row in source.chunks(nc) {
            for (mean, q) in self.qlm_mean.iter_mut().zip(row.iter()) {
                *mean += *q;
            }
        }
        if n > 0 {
            let inv = 1.0 / n as f64;
            for mean in self.qlm_mean.iter_mut() {
                *mean *= inv;
            }
        }

        let value = invariant_from_row(self.prefactor(), &self.qlm_mean);
        self.ql_norm.fill(value);
    }

    /// Form the third-order invariants from the active Qlm source
    fn compute_wl(&mut self) {
        let Some(table) = self.wigner.as_ref() else {
            return;
        };
        let nc = self.basis.num_coefficients();
        let couplings = table.couplings();
        let source = if self.params.average {
            &self.qlm_ave
        } else {
            &self.qlm
        };

        self.wl
            .par_iter_mut()
            .enumerate()
            .for_each(|(i, wl)| {
                let row = &source[i * nc..(i + 1) * nc];
                let mut acc = Complex64::new(0.0, 0.0);
                for c in couplings {
                    acc += c.value * row[c.u1] * row[c.u2] * row[c.u3];
                }
                *wl = acc;
            });

        if self.params.norm {
            let row = &self.qlm_mean;
            let mut acc = Complex64::new(0.0, 0.0);
            for c in couplings {
                acc += c.value * row[c.u1] * row[c.u2] * row[c.u3];
            }
            self.wl_norm.fill(acc);
        }
    }

    fn prefactor(&self) -> f64 {
        4.0 * PI / (2.0 * self.params.l as f64 + 1.0)
    }

    /// Active Ql variant, one value per particle; empty before any compute
    pub fn ql(&self) -> &[f64] {
        match self.variant {
            Variant::Raw => &self.ql,
            Variant::Averaged => &self.ql_ave,
            Variant::Normalized | Variant::AveragedNormalized => &self.ql_norm,
        }
    }

    /// Active Wl variant; empty before any compute or when wl is disabled
    pub fn wl(&self) -> &[Complex64] {
        if self.params.norm {
            &self.wl_norm
        } else {
            &self.wl
        }
    }

    /// Base bond-averaged harmonic rows as a (particles, 2l+1) view
    pub fn qlm(&self) -> ArrayView2<'_, Complex64> {
        let nc = self.basis.num_coefficients();
        ArrayView2::from_shape((self.num_particles, nc), &self.qlm)
            .expect("qlm buffer is num_particles x (2l+1)")
    }

    /// Number of particles in the last compute, 0 before any compute
    pub fn particle_count(&self) -> usize {
        self.num_particles
    }

    /// Spherical harmonic degree
    pub fn l(&self) -> usize {
        self.params.l
    }

    /// Outer shell radius
    pub fn rmax(&self) -> f64 {
        self.params.rmax
    }

    /// Inner shell radius
    pub fn rmin(&self) -> f64 {
        self.params.rmin
    }

    /// Whether neighbor-shell averaging is enabled
    pub fn uses_average(&self) -> bool {
        self.params.average
    }

    /// Whether system-mean normalization is enabled
    pub fn uses_norm(&self) -> bool {
        self.params.norm
    }

    /// Whether the third-order invariant is computed
    pub fn uses_wl(&self) -> bool {
        self.params.wl
    }

    /// Whether bond contributions are weighted
    pub fn uses_weights(&self) -> bool {
        self.params.weighted
    }

    /// The variant selected by the construction flags
    pub fn variant(&self) -> Variant {
        self.variant
    }
}
