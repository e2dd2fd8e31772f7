/*
MIT License with freud Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: freud
Copyright (c) 2010-2019 The Regents of the University of Michigan.
All rights reserved.
*/

//! Orthorhombic simulation box with minimum-image wrapping
//!
//! The box is centered at the origin. Displacement vectors between particles
//! are wrapped on each periodic axis so that bond lengths follow the
//! minimum-image convention. Triclinic cells and image counting are outside
//! the scope of this crate; callers with skewed cells should pre-wrap their
//! coordinates.

use super::errors::{GeometryError, Result};
use super::vector::Vector3D;

/// An orthorhombic simulation box with per-axis periodicity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationBox {
    lx: f64,
    ly: f64,
    lz: f64,
    periodic: [bool; 3],
}

impl SimulationBox {
    /// Create a fully periodic orthorhombic box with the given extents
    ///
    /// # Arguments
    ///
    /// * `lx`, `ly`, `lz` - Box edge lengths along x, y, z
    ///
    /// # Returns
    ///
    /// The box, or an error if any periodic extent is non-positive or
    /// non-finite
    pub fn new(lx: f64, ly: f64, lz: f64) -> Result<Self> {
        Self::with_periodicity(lx, ly, lz, [true, true, true])
    }

    /// Create a cubic, fully periodic box with edge length `l`
    pub fn cube(l: f64) -> Result<Self> {
        Self::new(l, l, l)
    }

    /// Create a box with explicit per-axis periodic flags
    ///
    /// Extents on periodic axes must be positive and finite; non-periodic
    /// extents are stored but never used for wrapping.
    pub fn with_periodicity(lx: f64, ly: f64, lz: f64, periodic: [bool; 3]) -> Result<Self> {
        for (axis, (&extent, &is_periodic)) in
            [lx, ly, lz].iter().zip(periodic.iter()).enumerate()
        {
            if is_periodic && !(extent.is_finite() && extent > 0.0) {
                let name = ['x', 'y', 'z'][axis];
                return Err(GeometryError::InvalidBoxExtent(name, extent));
            }
        }
        Ok(Self {
            lx,
            ly,
            lz,
            periodic,
        })
    }

    /// Box extent along x
    pub fn lx(&self) -> f64 {
        self.lx
    }

    /// Box extent along y
    pub fn ly(&self) -> f64 {
        self.ly
    }

    /// Box extent along z
    pub fn lz(&self) -> f64 {
        self.lz
    }

    /// Per-axis periodic flags
    pub fn periodic(&self) -> [bool; 3] {
        self.periodic
    }

    /// Wrap a displacement vector under the minimum-image convention
    ///
    /// Each periodic component is shifted by an integer number of box lengths
    /// so that it lies in [-L/2, L/2). Non-periodic components pass through
    /// unchanged.
    pub fn wrap(&self, v: Vector3D) -> Vector3D {
        let mut out = v;
        if self.periodic[0] {
            out.x -= self.lx * (out.x / self.lx).round();
        }
        if self.periodic[1] {
            out.y -= self.ly * (out.y / self.ly).round();
        }
        if self.periodic[2] {
            out.z -= self.lz * (out.z / self.lz).round();
        }
        out
    }

    /// Minimum-image displacement from `from` to `to`
    pub fn separation(&self, from: &Vector3D, to: &Vector3D) -> Vector3D {
        self.wrap(*to - *from)
    }
}
