//! Graphene flake with a strained edge and a next-nearest-neighbour hopping family
//!
//! Builds a circular honeycomb flake, applies a radial position modifier and a
//! generated hopping family, and prints the resulting Hamiltonian report.

use std::sync::Arc;

use nalgebra::Vector2;
use tight_binding::prelude::*;
use tight_binding::lattice::honeycomb_lattice;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let lattice = honeycomb_lattice(0.246, -2.8)?;
    let mut model = Model::new(lattice);
    model.set_shape(Circle::new(Vector2::zeros(), 1.2));

    println!("1. Plain flake:");
    model.hamiltonian()?;
    println!("{}\n", model.report());

    println!("2. Radially stretched by 2%:");
    model.add_position_modifier(Arc::new(PositionModifier::new(|positions, _| {
        for position in positions.iter_mut() {
            *position *= 1.02;
        }
    })));
    model.hamiltonian()?;
    println!("{}\n", model.report());

    println!("3. With second neighbours from a generator:");
    let second_neighbours = HoppingGenerator::new("t2", -0.1, |positions, _| {
        let mut result = HoppingGeneratorResult::default();
        for i in 0..positions.len() {
            for j in (i + 1)..positions.len() {
                let distance = (positions[j] - positions[i]).norm();
                if (distance - 0.246 * 1.02).abs() < 1e-3 {
                    result.from.push(i as i32);
                    result.to.push(j as i32);
                }
            }
        }
        result
    });
    model.add_hopping_family(Arc::new(second_neighbours))?;
    model.hamiltonian()?;
    println!("{}", model.report());

    Ok(())
}
