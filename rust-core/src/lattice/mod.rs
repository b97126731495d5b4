// Lattice module: the tight-binding unit cell description
// Primitive vectors, sublattices, registered hopping energies and the hoppings between sublattices

// ======================== MODULE DECLARATIONS ========================
pub mod lattice_construction;
pub mod lattice_model;
pub mod sublattice;

#[cfg(test)]
mod _tests_lattice_model;

// ======================== LATTICE DATA MODEL ========================
pub use lattice_model::{
    HoppingEnergy,                  // struct - named complex hopping amplitude
    Lattice,                        // struct - primitive vectors + sublattices + hopping energies
    MAX_HOPPING_ENERGIES,           // const - 127, the HopId limit
    MAX_SUBLATTICES,                // const - 127, the SubId limit
};
// Lattice impl methods:
//   new(vectors: Vec<Cartesian>) -> Result<Self>                              - 1 to 3 primitive vectors
//   add_sublattice(&mut self, name, offset, onsite_energy) -> Result<SubId>   - unique name, id < 127
//   register_hopping_energy(&mut self, name, value) -> Result<HopId>          - unique name, id < 127
//   add_registered_hopping(&mut self, rel_index, from, to, id) -> Result<()>  - records both directions
//   add_hopping(&mut self, rel_index, from, to, value) -> Result<HopId>       - reuses equal energies
//   calc_position(&self, index, origin, sub) -> Cartesian                     - site position in space
//   max_hoppings(&self) -> usize                                              - longest hopping list
//   has_complex_hoppings(&self) -> bool / has_onsite_energy(&self) -> bool    - derived queries
//   lattice_matrix(&self) -> DMatrix<f64>                                     - primitive vectors as columns
//   sub_id / hop_id / sublattice / hopping_energy / hoppings / vectors / ndim - lookups

// ======================== SUBLATTICES ========================
pub use sublattice::{
    Hopping,                        // struct - (relative_index, to_sublattice, id, is_conjugate)
    Sublattice,                     // struct - (id, name, offset, onsite_energy, hoppings)
};

// ======================== LATTICE CONSTRUCTION UTILITIES ========================
pub use lattice_construction::{
    chain_lattice,                  // fn(a: f64, t: f64) -> Result<Lattice> - 1D chain
    honeycomb_lattice,              // fn(a: f64, t: f64) -> Result<Lattice> - two-sublattice honeycomb
    simple_cubic_lattice,           // fn(a: f64, t: f64) -> Result<Lattice> - 3D simple cubic
    square_lattice,                 // fn(a: f64, t: f64) -> Result<Lattice> - single-site square
};
