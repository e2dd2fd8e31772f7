/*
MIT License with freud Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: freud
Copyright (c) 2010-2019 The Regents of the University of Michigan.
All rights reserved.
*/

//! Wigner 3-j coupling coefficients for third-order invariants
//!
//! The W_l order parameter couples three harmonic coefficients of one
//! particle through the Wigner 3-j symbols (l l l; m1 m2 m3) with
//! m1 + m2 + m3 = 0. For a fixed degree these form a small table that never
//! changes, so it is computed once per degree and shared process-wide.
//!
//! Coefficients come from the Racah formula evaluated in log-factorial space,
//! which stays finite for any degree of practical interest.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

// Tables are tiny ((2l+1)^2 bound) but repeatedly requested by short-lived
// engines, so share them by degree
static WIGNER_TABLE_CACHE: Lazy<RwLock<HashMap<usize, Arc<Wigner3jTable>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// One non-trivial coupling (m1, m2, m3 = -m1-m2) expressed in buffer
/// coordinates u = m + l
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coupling {
    /// First harmonic index, u1 = m1 + l
    pub u1: usize,
    /// Second harmonic index, u2 = m2 + l
    pub u2: usize,
    /// Third harmonic index, u3 = m3 + l
    pub u3: usize,
    /// Wigner 3-j value (l l l; m1 m2 m3)
    pub value: f64,
}

/// Immutable table of all (l l l; m1 m2 m3) couplings for one degree
#[derive(Debug, Clone)]
pub struct Wigner3jTable {
    l: usize,
    couplings: Vec<Coupling>,
}

impl Wigner3jTable {
    /// Compute the full coupling table for degree `l`
    ///
    /// Couplings are stored with u1 ascending and u2 ascending within the
    /// admissible band, the order the W_l combination loop consumes them in.
    pub fn new(l: usize) -> Self {
        let li = l as i32;
        let ln_fact = ln_factorials(3 * l + 1);

        let mut couplings = Vec::with_capacity(3 * l * l + 3 * l + 1);
        for u1 in 0..=(2 * l) {
            let lower = l.saturating_sub(u1);
            let upper = (2 * l).min(3 * l - u1);
            for u2 in lower..=upper {
                let u3 = 3 * l - u1 - u2;
                let m1 = u1 as i32 - li;
                let m2 = u2 as i32 - li;
                let value = wigner_3j_equal_degrees(li, m1, m2, &ln_fact);
                couplings.push(Coupling { u1, u2, u3, value });
            }
        }

        Self { l, couplings }
    }

    /// Fetch the table for `l` from the process-wide cache, computing it on
    /// first use
    pub fn cached(l: usize) -> Arc<Self> {
        if let Some(table) = WIGNER_TABLE_CACHE.read().unwrap().get(&l) {
            return Arc::clone(table);
        }
        let mut cache = WIGNER_TABLE_CACHE.write().unwrap();
        Arc::clone(cache.entry(l).or_insert_with(|| Arc::new(Self::new(l))))
    }

    /// Degree the table was built for
    pub fn degree(&self) -> usize {
        self.l
    }

    /// All couplings in canonical order
    pub fn couplings(&self) -> &[Coupling] {
        &self.couplings
    }

    /// Number of stored couplings, 3l² + 3l + 1
    pub fn len(&self) -> usize {
        self.couplings.len()
    }

    /// True only for an impossible empty table; present for API completeness
    pub fn is_empty(&self) -> bool {
        self.couplings.is_empty()
    }

    /// Look up the coupling value for magnetic numbers (m1, m2),
    /// m3 = -m1 - m2; None if any |m| exceeds l
    pub fn coefficient(&self, m1: i32, m2: i32) -> Option<f64> {
        let li = self.l as i32;
        if m1.abs() > li || m2.abs() > li || (m1 + m2).abs() > li {
            return None;
        }
        let u1 = (m1 + li) as usize;
        let u2 = (m2 + li) as usize;
        self.couplings
            .iter()
            .find(|c| c.u1 == u1 && c.u2 == u2)
            .map(|c| c.value)
    }
}

/// ln(n!) for n = 0..=n_max, built by running sum
fn ln_factorials(n_max: usize) -> Vec<f64> {
    let mut table = vec![0.0; n_max + 1];
    for n in 1..=n_max {
        table[n] = table[n - 1] + (n as f64).ln();
    }
    table
}

/// Racah formula for (l l l; m1 m2 m3) with m3 = -m1 - m2, evaluated in log
/// space to avoid factorial overflow
fn wigner_3j_equal_degrees(l: i32, m1: i32, m2: i32, ln_fact: &[f64]) -> f64 {
    let m3 = -m1 - m2;
    debug_assert!(m1.abs() <= l && m2.abs() <= l && m3.abs() <= l);

    let lf = |n: i32| ln_fact[n as usize];

    // sqrt of the triangle factor (l!)³/(3l+1)! times Π (l±m_i)!
    let ln_prefactor = 0.5
        * (3.0 * lf(l) - lf(3 * l + 1)
            + lf(l + m1)
            + lf(l - m1)
            + lf(l + m2)
            + lf(l - m2)
            + lf(l + m3)
            + lf(l - m3));

    let k_min = 0.max(-m1).max(m2);
    let k_max = l.min(l - m1).min(l + m2);

    let mut sum = 0.0;
    for k in k_min..=k_max {
        let ln_denominator =
            lf(k) + lf(l - k) + lf(l - m1 - k) + lf(l + m2 - k) + lf(m1 + k) + lf(k - m2);
        let term = (ln_prefactor - ln_denominator).exp();
        sum += if k % 2 == 0 { term } else { -term };
    }

    // Leading phase (-1)^(j1 - j2 - m3) reduces to (-1)^m3 here
    if m3.rem_euclid(2) == 0 {
        sum
    } else {
        -sum
    }
}
