/*
MIT License with freud Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: freud
Copyright (c) 2010-2019 The Regents of the University of Michigan.
All rights reserved.
*/

//! Error types for the locality module

use thiserror::Error;

/// Error types for the locality module
#[derive(Error, Debug)]
pub enum LocalityError {
    /// The parallel bond arrays have different lengths
    #[error("Bond array length mismatch: {0} query indices, {1} point indices, {2} distances")]
    LengthMismatch(usize, usize, usize),

    /// The weight array does not match the bond count
    #[error("Weight array length mismatch: {0} bonds but {1} weights")]
    WeightLengthMismatch(usize, usize),

    /// Query indices must come grouped per particle
    #[error("Query point indices must be non-decreasing: bond {0} breaks the order")]
    UnsortedQueryPoints(usize),

    /// A bond queries from a particle outside the declared range
    #[error("Bond {0} references query point {1}, but only {2} query points exist")]
    QueryPointOutOfRange(usize, usize, usize),

    /// A bond points at a particle outside the declared range
    #[error("Bond {0} references point {1}, but only {2} points exist")]
    PointOutOfRange(usize, usize, usize),

    /// A bond carries a negative or non-finite length
    #[error("Bond {0} has invalid distance {1} (must be finite and non-negative)")]
    InvalidDistance(usize, f64),

    /// A bond carries a negative or non-finite weight
    #[error("Bond {0} has invalid weight {1} (must be finite and non-negative)")]
    InvalidWeight(usize, f64),
}

/// A specialized Result type for locality operations
pub type Result<T> = std::result::Result<T, LocalityError>;
