/*
MIT License with freud Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: freud
Copyright (c) 2010-2019 The Regents of the University of Michigan.
All rights reserved.
*/

//! Neighbor-list plumbing
//!
//! Order-parameter computations consume bonds, not raw positions. This module
//! holds the bond container those computations iterate over. Building the
//! bonds efficiently (cell lists, trees) is deliberately left to the caller.

mod errors;
mod neighbor_list;

pub use errors::{LocalityError, Result};
pub use neighbor_list::{Bond, NeighborList};
