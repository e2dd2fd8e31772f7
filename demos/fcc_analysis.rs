/*
MIT License with freud Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: freud
Copyright (c) 2010-2019 The Regents of the University of Michigan.
All rights reserved.
*/

//! Example order-parameter analysis
//!
//! This example builds a perfect FCC crystal, computes the q6 and w6
//! order parameters for every particle and prints the system averages.

use steinhardt_rs::geometry::{SimulationBox, Vector3D};
use steinhardt_rs::locality::NeighborList;
use steinhardt_rs::order::{Steinhardt, SteinhardtParams};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // 3 x 3 x 3 conventional FCC cells with lattice constant 2
    let cells = 3;
    let a = 2.0;
    let box_length = cells as f64 * a;
    let sim_box = SimulationBox::cube(box_length)?;

    let basis = [
        (0.0, 0.0, 0.0),
        (0.0, 0.5, 0.5),
        (0.5, 0.0, 0.5),
        (0.5, 0.5, 0.0),
    ];
    let mut points = Vec::new();
    for i in 0..cells {
        for j in 0..cells {
            for k in 0..cells {
                for &(bx, by, bz) in &basis {
                    points.push(Vector3D::new(
                        (i as f64 + bx) * a - box_length / 2.0,
                        (j as f64 + by) * a - box_length / 2.0,
                        (k as f64 + bz) * a - box_length / 2.0,
                    ));
                }
            }
        }
    }
    println!("Built {} particles in a {:.1} box", points.len(), box_length);

    // Cutoff between the first and second neighbor shells: 12 bonds each
    let rmax = 1.5;
    let nlist = NeighborList::all_pairs(&sim_box, &points, rmax)?;
    println!("Neighbor list: {} bonds", nlist.num_bonds());

    let params = SteinhardtParams::new(6, rmax).with_wl(true);
    let mut engine = Steinhardt::new(params)?;
    engine.compute(&sim_box, &nlist, &points);

    let n = engine.particle_count() as f64;
    let mean_q6: f64 = engine.ql().iter().sum::<f64>() / n;
    let mean_w6: f64 = engine.wl().iter().map(|w| w.re).sum::<f64>() / n;

    println!("Mean q6 = {mean_q6:.8} (perfect FCC: 0.57452416)");
    println!("Mean w6 = {mean_w6:.8} (perfect FCC: -0.00262604)");

    Ok(())
}
