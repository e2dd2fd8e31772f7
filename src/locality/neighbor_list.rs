/*
MIT License with freud Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: freud
Copyright (c) 2010-2019 The Regents of the University of Michigan.
All rights reserved.
*/

//! Neighbor-list container for particle bonds
//!
//! A `NeighborList` stores directed bonds (query point, point) in
//! struct-of-arrays form, grouped by query point so that all bonds of one
//! particle occupy a contiguous segment. Lists are built from caller-supplied
//! arrays, in the manner of freud's `NeighborList.from_arrays`; constructing
//! them with a spatial index (cell lists, BVH) is the caller's concern. An
//! O(N^2) `all_pairs` builder is provided for small systems and tests.

use log::debug;
use std::ops::Range;

use super::errors::{LocalityError, Result};
use crate::geometry::{SimulationBox, Vector3D};

/// One directed bond from a query point to a neighboring point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bond {
    /// Index of the particle whose environment is being described
    pub query_point_index: usize,
    /// Index of the neighboring particle
    pub point_index: usize,
    /// Bond length as recorded at construction
    pub distance: f64,
    /// Bond weight (1.0 unless the caller supplied weights)
    pub weight: f64,
}

/// Directed bonds between particles, grouped by query point
#[derive(Debug, Clone)]
pub struct NeighborList {
    num_query_points: usize,
    num_points: usize,
    query_point_indices: Vec<usize>,
    point_indices: Vec<usize>,
    distances: Vec<f64>,
    weights: Vec<f64>,
    // CSR-style offsets: bonds of query point i are segments[i]..segments[i+1]
    segments: Vec<usize>,
}

impl NeighborList {
    /// Build a neighbor list from parallel bond arrays with unit weights
    ///
    /// # Arguments
    ///
    /// * `num_query_points` - Number of particles bonds may query from
    /// * `num_points` - Number of particles bonds may point to
    /// * `query_point_indices` - Per-bond query particle, non-decreasing
    /// * `point_indices` - Per-bond neighbor particle
    /// * `distances` - Per-bond length
    ///
    /// # Returns
    ///
    /// The validated list, or an error describing the first malformed bond
    pub fn from_arrays(
        num_query_points: usize,
        num_points: usize,
        query_point_indices: Vec<usize>,
        point_indices: Vec<usize>,
        distances: Vec<f64>,
    ) -> Result<Self> {
        let weights = vec![1.0; query_point_indices.len()];
        Self::from_arrays_with_weights(
            num_query_points,
            num_points,
            query_point_indices,
            point_indices,
            distances,
            weights,
        )
    }

    /// Build a neighbor list from parallel bond arrays with explicit weights
    pub fn from_arrays_with_weights(
        num_query_points: usize,
        num_points: usize,
        query_point_indices: Vec<usize>,
        point_indices: Vec<usize>,
        distances: Vec<f64>,
        weights: Vec<f64>,
    ) -> Result<Self> {
        if query_point_indices.len() != point_indices.len()
            || query_point_indices.len() != distances.len()
        {
            return Err(LocalityError::LengthMismatch(
                query_point_indices.len(),
                point_indices.len(),
                distances.len(),
            ));
        }
        if weights.len() != query_point_indices.len() {
            return Err(LocalityError::WeightLengthMismatch(
                query_point_indices.len(),
                weights.len(),
            ));
        }

        for (bond, &q) in query_point_indices.iter().enumerate() {
            if bond > 0 && q < query_point_indices[bond - 1] {
                return Err(LocalityError::UnsortedQueryPoints(bond));
            }
            if q >= num_query_points {
                return Err(LocalityError::QueryPointOutOfRange(
                    bond,
                    q,
                    num_query_points,
                ));
            }
        }
        for (bond, &p) in point_indices.iter().enumerate() {
            if p >= num_points {
                return Err(LocalityError::PointOutOfRange(bond, p, num_points));
            }
        }
        for (bond, &d) in distances.iter().enumerate() {
            if !d.is_finite() || d < 0.0 {
                return Err(LocalityError::InvalidDistance(bond, d));
            }
        }
        for (bond, &w) in weights.iter().enumerate() {
            if !w.is_finite() || w < 0.0 {
                return Err(LocalityError::InvalidWeight(bond, w));
            }
        }

        // Counting-sort offsets; valid because query indices are non-decreasing
        let mut segments = vec![0usize; num_query_points + 1];
        for &q in &query_point_indices {
            segments[q + 1] += 1;
        }
        for i in 0..num_query_points {
            segments[i + 1] += segments[i];
        }

        debug!(
            "Built neighbor list: {} bonds over {} query points",
            query_point_indices.len(),
            num_query_points
        );

        Ok(Self {
            num_query_points,
            num_points,
            query_point_indices,
            point_indices,
            distances,
            weights,
            segments,
        })
    }

    /// Build the quadratic all-pairs neighbor list for `points` in `sim_box`
    ///
    /// Every directed pair (i, j) with i != j whose minimum-image separation
    /// is below `rmax` becomes a bond, ordered by (i, j). Intended for small
    /// systems, demos and tests; production neighbor finding belongs to a
    /// spatial index maintained by the caller.
    pub fn all_pairs(sim_box: &SimulationBox, points: &[Vector3D], rmax: f64) -> Result<Self> {
        let n = points.len();
        let mut query_point_indices = Vec::new();
        let mut point_indices = Vec::new();
        let mut distances = Vec::new();

        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let r = sim_box.separation(&points[i], &points[j]).length();
                if r < rmax {
                    query_point_indices.push(i);
                    point_indices.push(j);
                    distances.push(r);
                }
            }
        }

        Self::from_arrays(n, n, query_point_indices, point_indices, distances)
    }

    /// Number of bonds in the list
    pub fn num_bonds(&self) -> usize {
        self.query_point_indices.len()
    }

    /// Number of query points the list was built for
    pub fn num_query_points(&self) -> usize {
        self.num_query_points
    }

    /// Number of points the list was built for
    pub fn num_points(&self) -> usize {
        self.num_points
    }

    /// Per-bond query point indices, non-decreasing
    pub fn query_point_indices(&self) -> &[usize] {
        &self.query_point_indices
    }

    /// Per-bond neighbor point indices
    pub fn point_indices(&self) -> &[usize] {
        &self.point_indices
    }

    /// Per-bond distances
    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    /// Per-bond weights
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Range of bond indices belonging to query point `i`
    pub fn segment(&self, i: usize) -> Range<usize> {
        self.segments[i]..self.segments[i + 1]
    }

    /// Iterate the bonds of query point `i`
    pub fn bonds(&self, i: usize) -> impl Iterator<Item = Bond> + '_ {
        self.segment(i).map(move |b| Bond {
            query_point_index: i,
            point_index: self.point_indices[b],
            distance: self.distances[b],
            weight: self.weights[b],
        })
    }
}
