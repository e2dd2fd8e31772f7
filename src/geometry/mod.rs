/*
MIT License with freud Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: freud
Copyright (c) 2010-2019 The Regents of the University of Michigan.
All rights reserved.
*/

//! Geometry primitives for particle analysis
//!
//! This module provides the position/displacement vector type and the
//! orthorhombic simulation box used to wrap bond vectors under periodic
//! boundary conditions.

mod errors;
mod sim_box;
mod vector;

pub use errors::{GeometryError, Result};
pub use sim_box::SimulationBox;
pub use vector::Vector3D;
