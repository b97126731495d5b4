// System module: from lattice + region to a finalized set of sites and bonds
// Foundation enumerates and trims candidate sites, System compacts them and collects the bonds

// ======================== MODULE DECLARATIONS ========================
pub mod foundation;
pub mod system;
pub mod system_modifiers;


// ======================== FOUNDATION ========================
pub use foundation::{
    Foundation, // struct - dense block of candidate sites with validity and neighbour counts
    Neighbour,  // struct - (site, periodic image) reached through a hopping
    Site,       // struct - (unit cell index, sublattice, flat idx) cursor
};
// Foundation impl methods:
//   from_primitive(lattice: &Arc<Lattice>, primitive: &Primitive) -> Result<Self> - centered block, all valid
//   from_shape(lattice: &Arc<Lattice>, shape: &dyn Shape) -> Result<Self>         - bounded, masked, trimmed
//   with_symmetry(self, symmetry: TranslationalSymmetry) -> Self                  - periodic wrap-around
//   trim_edges(&mut self)                                                         - work-list erosion, idempotent
//   finalize(&mut self) -> usize                                                  - dense Hamiltonian indices
//   for_each_neighbour(&self, site: Site, f: FnMut(Neighbour, &Hopping))          - hopping targets in the block
//   positions / sublattice_ids / is_valid / neighbour_count / hamiltonian_indices - flat per-site arrays

// ======================== MODIFIERS ========================
pub use system_modifiers::{
    PositionModifier,  // struct - Fn(&mut [Cartesian], &[SubId])
    SiteStateModifier, // struct - Fn(&mut [bool], &[Cartesian], &[SubId])
    SystemModifiers,   // struct - ordered, identity-deduplicated modifier lists
};

// ======================== SYSTEM ========================
pub use system::{
    Boundary,    // struct - (image, shift, hoppings) bonds towards one periodic image
    HoppingLink, // struct - (hopping id, conjugate) stored per bond
    System,      // struct - compacted positions, sublattice ids, bonds and boundaries
};
// System impl methods:
//   new(foundation: Foundation, modifiers: &SystemModifiers) -> Result<Self> - modify, finalize, compact
//   num_sites(&self) -> usize                                               - number of valid sites
//   find_nearest(&self, target: Cartesian, sublattice: Option<SubId>) -> Option<usize>
