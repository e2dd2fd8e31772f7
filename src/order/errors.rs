/*
MIT License with freud Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: freud
Copyright (c) 2010-2019 The Regents of the University of Michigan.
All rights reserved.
*/

//! Error types for the order module

use thiserror::Error;

/// Error types for the order module
#[derive(Error, Debug)]
pub enum OrderError {
    /// The cutoff radii do not form a valid shell
    #[error("Invalid cutoff radii: rmin = {0}, rmax = {1} (need 0 <= rmin < rmax, both finite)")]
    InvalidCutoffs(f64, f64),

    /// The spherical harmonic degree is below the supported minimum
    #[error("Invalid spherical harmonic degree l = {0} (need l >= 2)")]
    InvalidDegree(usize),

    /// A caller-supplied basis disagrees with the configured degree
    #[error("Harmonic basis has degree {0} but parameters request l = {1}")]
    BasisDegreeMismatch(usize, usize),
}

/// A specialized Result type for order-parameter operations
pub type Result<T> = std::result::Result<T, OrderError>;
