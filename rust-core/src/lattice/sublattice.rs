use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::interfaces::{Cartesian, HopId, Index3D, SubId};

/// A directed hopping from the owning sublattice to `to_sublattice` in the unit cell at
/// `relative_index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hopping {
    /// Relative unit cell index of the destination site.
    pub relative_index: Index3D,
    /// Destination sublattice.
    pub to_sublattice: SubId,
    /// Registered hopping energy.
    pub id: HopId,
    /// True for the mirrored half of a hopping pair: the energy must be complex conjugated.
    pub is_conjugate: bool,
}

/// One inequivalent site of the unit cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sublattice {
    pub id: SubId,
    pub name: String,
    /// Position relative to the unit cell origin.
    pub offset: Cartesian,
    pub onsite_energy: f64,
    pub hoppings: Vec<Hopping>,
}

impl Sublattice {
    pub fn new(id: SubId, name: impl Into<String>, offset: Cartesian, onsite_energy: f64) -> Self {
        Self {
            id,
            name: name.into(),
            offset,
            onsite_energy,
            hoppings: Vec::new(),
        }
    }

    /// Check if a hopping towards `to_sublattice` at `relative_index` is already recorded
    pub fn has_hopping(&self, relative_index: Index3D, to_sublattice: SubId) -> bool {
        self.hoppings
            .iter()
            .any(|h| h.relative_index == relative_index && h.to_sublattice == to_sublattice)
    }

    /// Record a hopping, rejecting an exact duplicate (same relative index and destination)
    pub fn add_hopping(
        &mut self,
        relative_index: Index3D,
        to_sublattice: SubId,
        id: HopId,
        is_conjugate: bool,
    ) -> Result<(), Error> {
        if self.has_hopping(relative_index, to_sublattice) {
            return Err(Error::DuplicateHopping {
                x: relative_index.x,
                y: relative_index.y,
                z: relative_index.z,
                from: self.id as i32,
                to: to_sublattice as i32,
            });
        }

        self.hoppings.push(Hopping {
            relative_index,
            to_sublattice,
            id,
            is_conjugate,
        });
        Ok(())
    }
}
