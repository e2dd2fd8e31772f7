/*
MIT License with freud Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: freud
Copyright (c) 2010-2019 The Regents of the University of Michigan.
All rights reserved.
*/

//! Error types for the geometry module

use thiserror::Error;

/// Error types for the geometry module
#[derive(Error, Debug)]
pub enum GeometryError {
    /// A periodic axis was given a non-positive or non-finite extent
    #[error("Invalid box extent on {0} axis: {1} (periodic extents must be positive and finite)")]
    InvalidBoxExtent(char, f64),
}

/// A specialized Result type for geometry operations
pub type Result<T> = std::result::Result<T, GeometryError>;
