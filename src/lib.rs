/*
MIT License with freud Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: freud
Copyright (c) 2010-2019 The Regents of the University of Michigan.
All rights reserved.
*/

//! # steinhardt-rs
//!
//! A Rust implementation of the Steinhardt bond-orientational order
//! parameters (Ql, Wl and their averaged and normalized variants) for
//! analyzing local structure in particle simulations.
//!
//! The engine consumes particle positions, a periodic simulation box and a
//! caller-built neighbor list, and produces one rotationally invariant order
//! parameter per particle. Accumulation over bonds runs in parallel across
//! worker-private buffers and reduces deterministically.
//!
//! ```no_run
//! use steinhardt_rs::geometry::{SimulationBox, Vector3D};
//! use steinhardt_rs::locality::NeighborList;
//! use steinhardt_rs::order::{Steinhardt, SteinhardtParams};
//!
//! # fn main() -> anyhow::Result<()> {
//! let sim_box = SimulationBox::cube(8.0)?;
//! let points = vec![Vector3D::origin(), Vector3D::new(0.0, 0.0, 1.0)];
//! let nlist = NeighborList::all_pairs(&sim_box, &points, 1.5)?;
//!
//! let mut engine = Steinhardt::new(SteinhardtParams::new(6, 1.5).with_wl(true))?;
//! engine.compute(&sim_box, &nlist, &points);
//! println!("q6 = {:?}", engine.ql());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod geometry;
pub mod harmonics;
pub mod locality;
pub mod order;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");

pub use geometry::{SimulationBox, Vector3D};
pub use locality::NeighborList;
pub use order::{Steinhardt, SteinhardtParams, Variant};
