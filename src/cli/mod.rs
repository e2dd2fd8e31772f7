/*
MIT License with freud Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: freud
Copyright (c) 2010-2019 The Regents of the University of Michigan.
All rights reserved.
*/

//! Command Line Interface (CLI) module
//!
//! Reads a JSON file with box extents and particle positions, builds the
//! all-pairs neighbor list at the outer cutoff, runs the order-parameter
//! engine and writes the per-particle results as JSON to a file or stdout.
//! Intended for quick analysis of small systems; large trajectories should
//! drive the library directly with a proper neighbor list.

use anyhow::Context;
use clap::Parser;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::geometry::{SimulationBox, Vector3D};
use crate::locality::NeighborList;
use crate::order::{Steinhardt, SteinhardtParams};

/// Steinhardt bond-orientational order parameters for particle systems
#[derive(Parser, Debug)]
#[command(name = "steinhardt-rs", version, about)]
pub struct Cli {
    /// Input JSON file with "box" extents and "points" coordinates
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output JSON file; stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Spherical harmonic degree (at least 2)
    #[arg(short, long, default_value_t = 6)]
    pub l: usize,

    /// Outer cutoff radius for bonds
    #[arg(long)]
    pub rmax: f64,

    /// Inner cutoff radius for bonds
    #[arg(long, default_value_t = 0.0)]
    pub rmin: f64,

    /// Smooth Qlm over the neighbor shell before forming invariants
    #[arg(long)]
    pub average: bool,

    /// Report the invariant of the system-mean Qlm
    #[arg(long)]
    pub norm: bool,

    /// Also compute the third-order invariant Wl
    #[arg(long)]
    pub wl: bool,
}

/// On-disk input: box extents and particle coordinates
#[derive(Debug, Deserialize)]
struct InputFile {
    /// Orthorhombic box edge lengths [lx, ly, lz]
    #[serde(rename = "box")]
    box_extents: [f64; 3],
    /// Particle positions as [x, y, z] triples
    points: Vec<[f64; 3]>,
}

/// On-disk output: the parameters echoed back plus the per-particle results
#[derive(Debug, Serialize, Deserialize)]
pub struct OutputFile {
    pub params: SteinhardtParams,
    pub num_particles: usize,
    pub num_bonds: usize,
    pub ql: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wl_real: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wl_imag: Option<Vec<f64>>,
}

/// Run one analysis as described by the parsed arguments
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let text = fs::read_to_string(&cli.input)
        .with_context(|| format!("Failed to read input file {}", cli.input.display()))?;
    let input: InputFile = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse input file {}", cli.input.display()))?;

    let [lx, ly, lz] = input.box_extents;
    let sim_box = SimulationBox::new(lx, ly, lz)?;
    let points: Vec<Vector3D> = input
        .points
        .iter()
        .map(|&[x, y, z]| Vector3D::new(x, y, z))
        .collect();

    let params = SteinhardtParams::new(cli.l, cli.rmax)
        .with_rmin(cli.rmin)
        .with_average(cli.average)
        .with_norm(cli.norm)
        .with_wl(cli.wl);
    let mut engine = Steinhardt::new(params.clone())?;

    let nlist = NeighborList::all_pairs(&sim_box, &points, cli.rmax)?;
    info!(
        "Analyzing {} particles with {} bonds",
        points.len(),
        nlist.num_bonds()
    );
    engine.compute(&sim_box, &nlist, &points);

    let (wl_real, wl_imag) = if cli.wl {
        let wl = engine.wl();
        (
            Some(wl.iter().map(|w| w.re).collect()),
            Some(wl.iter().map(|w| w.im).collect()),
        )
    } else {
        (None, None)
    };
    let output = OutputFile {
        params,
        num_particles: engine.particle_count(),
        num_bonds: nlist.num_bonds(),
        ql: engine.ql().to_vec(),
        wl_real,
        wl_imag,
    };

    let rendered = serde_json::to_string_pretty(&output)?;
    match &cli.output {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("Failed to write output file {}", path.display()))?,
        None => println!("{rendered}"),
    }
    Ok(())
}
