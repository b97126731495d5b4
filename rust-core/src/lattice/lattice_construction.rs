use nalgebra::Vector3;

use crate::error::Error;
use crate::interfaces::Index3D;
use crate::lattice::Lattice;

// Standard tight-binding lattices with nearest-neighbour hopping `t`

/// Create a 1D chain with lattice constant `a`
pub fn chain_lattice(a: f64, t: f64) -> Result<Lattice, Error> {
    let mut lattice = Lattice::new(vec![Vector3::new(a, 0.0, 0.0)])?;
    let s = lattice.add_sublattice("A", Vector3::zeros(), 0.0)?;
    lattice.add_hopping(Index3D::new(1, 0, 0), s, s, t)?;
    Ok(lattice)
}

/// Create a single-site square lattice with lattice constant `a`
pub fn square_lattice(a: f64, t: f64) -> Result<Lattice, Error> {
    let mut lattice = Lattice::new(vec![Vector3::new(a, 0.0, 0.0), Vector3::new(0.0, a, 0.0)])?;
    let s = lattice.add_sublattice("A", Vector3::zeros(), 0.0)?;
    lattice.add_hopping(Index3D::new(1, 0, 0), s, s, t)?;
    lattice.add_hopping(Index3D::new(0, 1, 0), s, s, t)?;
    Ok(lattice)
}

/// Create a honeycomb (graphene-like) lattice with lattice constant `a`
///
/// The carbon-carbon distance is `a / sqrt(3)`; every A site has three B neighbours.
pub fn honeycomb_lattice(a: f64, t: f64) -> Result<Lattice, Error> {
    let a_cc = a / 3.0_f64.sqrt();
    let mut lattice = Lattice::new(vec![
        Vector3::new(a / 2.0, a * 3.0_f64.sqrt() / 2.0, 0.0),
        Vector3::new(-a / 2.0, a * 3.0_f64.sqrt() / 2.0, 0.0),
    ])?;

    let sub_a = lattice.add_sublattice("A", Vector3::new(0.0, -a_cc / 2.0, 0.0), 0.0)?;
    let sub_b = lattice.add_sublattice("B", Vector3::new(0.0, a_cc / 2.0, 0.0), 0.0)?;
    let t_id = lattice.register_hopping_energy("t", t)?;

    // inside the unit cell, then towards the two lower neighbouring cells
    lattice.add_registered_hopping(Index3D::new(0, 0, 0), sub_a, sub_b, t_id)?;
    lattice.add_registered_hopping(Index3D::new(-1, 0, 0), sub_a, sub_b, t_id)?;
    lattice.add_registered_hopping(Index3D::new(0, -1, 0), sub_a, sub_b, t_id)?;
    Ok(lattice)
}

/// Create a simple cubic lattice with lattice constant `a`
pub fn simple_cubic_lattice(a: f64, t: f64) -> Result<Lattice, Error> {
    let mut lattice = Lattice::new(vec![
        Vector3::new(a, 0.0, 0.0),
        Vector3::new(0.0, a, 0.0),
        Vector3::new(0.0, 0.0, a),
    ])?;
    let s = lattice.add_sublattice("A", Vector3::zeros(), 0.0)?;
    lattice.add_hopping(Index3D::new(1, 0, 0), s, s, t)?;
    lattice.add_hopping(Index3D::new(0, 1, 0), s, s, t)?;
    lattice.add_hopping(Index3D::new(0, 0, 1), s, s, t)?;
    Ok(lattice)
}
