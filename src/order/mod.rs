/*
MIT License with freud Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: freud
Copyright (c) 2010-2019 The Regents of the University of Michigan.
All rights reserved.
*/

//! Bond-orientational order parameters
//!
//! This module holds the Steinhardt Ql/Wl engine: the parallel bond
//! accumulation pipeline and the cascade of derived variants (neighbor-shell
//! averaging, system-mean normalization, third-order Wigner combination).

mod accumulate;
mod errors;
mod steinhardt;

pub use errors::{OrderError, Result};
pub use steinhardt::{Steinhardt, SteinhardtParams, Variant};
