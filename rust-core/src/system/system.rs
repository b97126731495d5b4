use std::collections::BTreeMap;
use std::sync::Arc;

use nalgebra_sparse::CsrMatrix;

use crate::error::Error;
use crate::interfaces::{Cartesian, HopId, Index3D, SubId};
use crate::lattice::Lattice;
use crate::support::RowAccumulator;
use crate::system::foundation::Foundation;
use crate::system::system_modifiers::SystemModifiers;

/// Reference from a stored bond to its registered hopping energy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoppingLink {
    pub id: HopId,
    /// The bond was recorded against the direction of its lattice hopping
    pub conjugate: bool,
}

/// Bonds that cross the block edge towards one periodic image
///
/// Row `i`, column `j` connects site `i` to the image of site `j` displaced by `shift`.
/// The opposite image carries the Hermitian conjugate and is not stored.
#[derive(Debug, Clone)]
pub struct Boundary {
    /// Integer image vector, in units of the block size along each lattice vector
    pub image: Index3D,
    pub shift: Cartesian,
    pub hoppings: CsrMatrix<HoppingLink>,
}

/// Finalized tight-binding system: compacted sites and the bonds between them
#[derive(Debug, Clone)]
pub struct System {
    pub lattice: Arc<Lattice>,
    pub positions: Vec<Cartesian>,
    pub sublattice_ids: Vec<SubId>,
    /// Upper triangle of the in-block bonds
    pub hoppings: CsrMatrix<HoppingLink>,
    pub boundaries: Vec<Boundary>,
}

impl System {
    /// Apply system modifiers to `foundation`, compact the valid sites and collect bonds
    pub fn new(mut foundation: Foundation, modifiers: &SystemModifiers) -> Result<Self, Error> {
        for modifier in &modifiers.state {
            let (is_valid, positions, sublattices) = foundation.state_mut();
            let before = is_valid.to_vec();
            modifier.apply(is_valid, positions, sublattices);

            let mut revived = 0;
            for (valid, &was_valid) in is_valid.iter_mut().zip(&before) {
                if *valid && !was_valid {
                    *valid = false;
                    revived += 1;
                }
            }
            if revived > 0 {
                log::warn!(
                    "site state modifier tried to re-validate {} removed sites; ignored",
                    revived
                );
            }
        }

        for modifier in &modifiers.position {
            let (positions, sublattices) = foundation.positions_mut();
            modifier.apply(positions, sublattices);
        }

        let num_sites = foundation.finalize();
        let indices = foundation.hamiltonian_indices();

        let mut positions = Vec::with_capacity(num_sites);
        let mut sublattice_ids = Vec::with_capacity(num_sites);
        for (idx, &h) in indices.iter().enumerate() {
            if h >= 0 {
                positions.push(foundation.positions()[idx]);
                sublattice_ids.push(foundation.sublattice_ids()[idx]);
            }
        }

        let mut main = RowAccumulator::new(num_sites, num_sites);
        let mut images: BTreeMap<[i32; 3], RowAccumulator<HoppingLink>> = BTreeMap::new();

        for site in foundation.sites() {
            let i = indices[site.idx];
            if i < 0 {
                continue;
            }

            foundation.for_each_neighbour(site, |neighbour, hopping| {
                let j = indices[neighbour.site.idx];
                if j < 0 {
                    return;
                }
                let link = HoppingLink {
                    id: hopping.id,
                    conjugate: hopping.is_conjugate,
                };

                if neighbour.image == Index3D::zeros() {
                    // each bond once, from its lower endpoint
                    if i < j {
                        main.insert_first(i as usize, j as usize, link);
                    }
                } else if is_forward_image(&neighbour.image) {
                    images
                        .entry([neighbour.image.x, neighbour.image.y, neighbour.image.z])
                        .or_insert_with(|| RowAccumulator::new(num_sites, num_sites))
                        .insert_first(i as usize, j as usize, link);
                }
            });
        }

        let size = foundation.size();
        let vectors = foundation.lattice().vectors();
        let mut boundaries = Vec::with_capacity(images.len());
        for (image, links) in images {
            let image = Index3D::from(image);
            let mut shift = Cartesian::zeros();
            for (i, vector) in vectors.iter().enumerate() {
                shift += (image[i] * size[i]) as f64 * vector;
            }
            boundaries.push(Boundary {
                image,
                shift,
                hoppings: links.into_csr()?,
            });
        }

        let system = System {
            lattice: Arc::clone(foundation.lattice()),
            positions,
            sublattice_ids,
            hoppings: main.into_csr()?,
            boundaries,
        };

        log::debug!(
            "system: {} sites, {} bonds, {} boundaries",
            system.num_sites(),
            system.hoppings.nnz(),
            system.boundaries.len()
        );
        Ok(system)
    }

    pub fn num_sites(&self) -> usize {
        self.positions.len()
    }

    /// Find the index of the site nearest to `target`, optionally restricted to one sublattice
    pub fn find_nearest(&self, target: Cartesian, sublattice: Option<SubId>) -> Option<usize> {
        self.positions
            .iter()
            .zip(&self.sublattice_ids)
            .enumerate()
            .filter(|(_, (_, sub))| sublattice.map_or(true, |s| s == **sub))
            .map(|(i, (position, _))| (i, (position - target).norm_squared()))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }
}

/// Only images whose first non-zero component is positive are stored
fn is_forward_image(image: &Index3D) -> bool {
    image
        .iter()
        .find(|&&w| w != 0)
        .map_or(false, |&w| w > 0)
}
