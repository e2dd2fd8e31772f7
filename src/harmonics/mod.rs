/*
MIT License with freud Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: freud
Copyright (c) 2010-2019 The Regents of the University of Michigan.
All rights reserved.
*/

//! Spherical harmonics and angular-momentum coupling coefficients
//!
//! The pieces of angular-momentum machinery the order parameters are built
//! from: a fixed-degree spherical-harmonic evaluator for bond directions and
//! the Wigner 3-j coupling table behind the third-order invariant.

mod spherical;
mod wigner;

pub use spherical::{HarmonicBasis, SphericalHarmonics};
pub use wigner::{Coupling, Wigner3jTable};
