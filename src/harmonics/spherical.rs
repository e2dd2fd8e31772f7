/*
MIT License with freud Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: freud
Copyright (c) 2010-2019 The Regents of the University of Michigan.
All rights reserved.
*/

//! Spherical harmonic evaluation for bond directions
//!
//! Harmonics follow the orthonormal quantum-mechanics convention with the
//! Condon-Shortley phase:
//!
//! Y_lm(θ, φ) = sqrt((2l+1)/(4π) · (l-m)!/(l+m)!) · P_l^m(cos θ) · e^(imφ)
//!
//! The accumulation pipeline relies on two properties of this convention: the
//! conjugate symmetry Y_l,-m = (-1)^m conj(Y_lm), and the addition theorem
//! Σ_m |Y_lm|² = (2l+1)/(4π). Evaluation runs the normalized associated
//! Legendre recurrence, whose coefficients depend only on l and are
//! precomputed at construction; no factorials or heap allocations appear on
//! the per-bond path.

use num_complex::Complex64;
use std::f64::consts::PI;

/// A fixed-degree basis mapping a bond direction to 2l+1 complex coefficients
///
/// The trait is the seam for substituting alternate harmonic conventions;
/// the order-parameter engine is generic over it.
pub trait HarmonicBasis: Send + Sync {
    /// Spherical harmonic degree l of this basis
    fn degree(&self) -> usize;

    /// Number of coefficients per evaluation, 2l + 1
    fn num_coefficients(&self) -> usize {
        2 * self.degree() + 1
    }

    /// Evaluate the basis at polar angle `theta` and azimuth `phi`,
    /// filling `out[m + l]` with Y_lm for m = -l..=l
    ///
    /// `out.len()` must equal `num_coefficients()`; the implementation is
    /// entitled to panic otherwise. Called concurrently from worker threads,
    /// so implementations must not hold per-call mutable state.
    fn evaluate_into(&self, theta: f64, phi: f64, out: &mut [Complex64]);
}

/// Orthonormal spherical harmonics of fixed degree with precomputed
/// recurrence coefficients
#[derive(Debug, Clone)]
pub struct SphericalHarmonics {
    l: usize,
    // diagonal[m]: P_m^m from P_{m-1}^{m-1}, Condon-Shortley phase folded in
    diagonal: Vec<f64>,
    // offdiagonal[m]: P_{m+1}^m from P_m^m
    offdiagonal: Vec<f64>,
    // chain[m][k]: (a, b) lifting P from degree m+1+k to m+2+k at fixed m
    chain: Vec<Vec<(f64, f64)>>,
}

impl SphericalHarmonics {
    /// Create an evaluator for degree `l`
    pub fn new(l: usize) -> Self {
        let mut diagonal = vec![0.0; l + 1];
        for (m, d) in diagonal.iter_mut().enumerate().skip(1) {
            let mf = m as f64;
            *d = -((2.0 * mf + 1.0) / (2.0 * mf)).sqrt();
        }

        let mut offdiagonal = vec![0.0; l + 1];
        for (m, c) in offdiagonal.iter_mut().enumerate() {
            *c = (2.0 * m as f64 + 3.0).sqrt();
        }

        // For each order m, coefficients of the three-term recurrence
        // P_k^m = a (x P_{k-1}^m - b P_{k-2}^m) for k = m+2 ..= l
        let mut chain = Vec::with_capacity(l + 1);
        for m in 0..=l {
            let mf = m as f64;
            let mut links = Vec::new();
            for k in (m + 2)..=l {
                let kf = k as f64;
                let a = ((4.0 * kf * kf - 1.0) / (kf * kf - mf * mf)).sqrt();
                let b = (((kf - 1.0) * (kf - 1.0) - mf * mf)
                    / (4.0 * (kf - 1.0) * (kf - 1.0) - 1.0))
                    .sqrt();
                links.push((a, b));
            }
            chain.push(links);
        }

        Self {
            l,
            diagonal,
            offdiagonal,
            chain,
        }
    }

    /// Evaluate into a freshly allocated vector; convenience for callers
    /// outside the accumulation hot path
    pub fn evaluate(&self, theta: f64, phi: f64) -> Vec<Complex64> {
        let mut out = vec![Complex64::new(0.0, 0.0); self.num_coefficients()];
        self.evaluate_into(theta, phi, &mut out);
        out
    }
}

impl HarmonicBasis for SphericalHarmonics {
    fn degree(&self) -> usize {
        self.l
    }

    fn evaluate_into(&self, theta: f64, phi: f64, out: &mut [Complex64]) {
        assert_eq!(
            out.len(),
            2 * self.l + 1,
            "harmonic output buffer must hold 2l+1 coefficients"
        );

        let x = theta.cos();
        let sin_theta = theta.sin();
        let e_iphi = Complex64::new(phi.cos(), phi.sin());

        // Seed P_0^0 = sqrt(1/4π), then walk each order m up to degree l
        let mut p_mm = 0.5 / PI.sqrt();
        let mut e_imphi = Complex64::new(1.0, 0.0);

        for m in 0..=self.l {
            if m > 0 {
                p_mm *= self.diagonal[m] * sin_theta;
                e_imphi *= e_iphi;
            }

            let p_lm = if m == self.l {
                p_mm
            } else {
                let mut p_prev = p_mm;
                let mut p_curr = self.offdiagonal[m] * x * p_mm;
                for &(a, b) in &self.chain[m] {
                    let p_next = a * (x * p_curr - b * p_prev);
                    p_prev = p_curr;
                    p_curr = p_next;
                }
                p_curr
            };

            out[self.l + m] = p_lm * e_imphi;
            if m > 0 {
                // Y_l,-m = (-1)^m conj(Y_lm)
                let sign = if m % 2 == 0 { 1.0 } else { -1.0 };
                out[self.l - m] = sign * out[self.l + m].conj();
            }
        }
    }
}
