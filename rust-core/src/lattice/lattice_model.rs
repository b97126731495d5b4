use nalgebra::DMatrix;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::config::{ANONYMOUS_HOPPING_PREFIX, DEFAULT_MIN_NEIGHBOURS, ENERGY_TOLERANCE};
use crate::error::Error;
use crate::interfaces::{Cartesian, HopId, Index3D, SubId};
use crate::lattice::sublattice::{Hopping, Sublattice};

/// Largest number of sublattices a lattice may hold.
pub const MAX_SUBLATTICES: usize = SubId::MAX as usize;
/// Largest number of hopping energies a lattice may hold.
pub const MAX_HOPPING_ENERGIES: usize = HopId::MAX as usize;

/// A named hopping amplitude which hoppings refer to by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoppingEnergy {
    pub name: String,
    pub value: Complex64,
}

/// Tight-binding lattice: primitive vectors, sublattices and the hoppings between them.
///
/// A lattice is assembled once and then only read. Foundations, systems and models
/// share it through `Arc<Lattice>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lattice {
    /// Primitive vectors (1 to 3).
    vectors: Vec<Cartesian>,
    sublattices: Vec<Sublattice>,
    hopping_energies: Vec<HoppingEnergy>,
    /// Sites with fewer neighbours than this are removed by trimming.
    min_neighbours: i32,
}

impl Lattice {
    /// Construct a lattice from 1, 2 or 3 primitive vectors.
    pub fn new(vectors: Vec<Cartesian>) -> Result<Self, Error> {
        if vectors.is_empty() || vectors.len() > 3 {
            return Err(Error::InvalidDimensions(format!(
                "a lattice needs 1 to 3 primitive vectors, got {}",
                vectors.len()
            )));
        }

        Ok(Lattice {
            vectors,
            sublattices: Vec::new(),
            hopping_energies: Vec::new(),
            min_neighbours: DEFAULT_MIN_NEIGHBOURS,
        })
    }

    /// Add a sublattice and return its id.
    pub fn add_sublattice(
        &mut self,
        name: &str,
        offset: Cartesian,
        onsite_energy: f64,
    ) -> Result<SubId, Error> {
        if self.sub_id(name).is_some() {
            return Err(Error::DuplicateName {
                kind: "sublattice",
                name: name.to_string(),
            });
        }
        if self.sublattices.len() >= MAX_SUBLATTICES {
            return Err(Error::IdOverflow {
                kind: "sublattice",
                name: name.to_string(),
                limit: MAX_SUBLATTICES,
            });
        }

        let id = self.sublattices.len() as SubId;
        self.sublattices
            .push(Sublattice::new(id, name, offset, onsite_energy));
        Ok(id)
    }

    /// Register a named hopping energy and return its id.
    pub fn register_hopping_energy(
        &mut self,
        name: &str,
        value: impl Into<Complex64>,
    ) -> Result<HopId, Error> {
        if self.hop_id(name).is_some() {
            return Err(Error::DuplicateName {
                kind: "hopping",
                name: name.to_string(),
            });
        }
        if self.hopping_energies.len() >= MAX_HOPPING_ENERGIES {
            return Err(Error::IdOverflow {
                kind: "hopping",
                name: name.to_string(),
                limit: MAX_HOPPING_ENERGIES,
            });
        }

        let id = self.hopping_energies.len() as HopId;
        self.hopping_energies.push(HoppingEnergy {
            name: name.to_string(),
            value: value.into(),
        });
        Ok(id)
    }

    /// Connect sublattice `from` in the origin cell to sublattice `to` in cell `relative_index`.
    ///
    /// The opposite direction `(-relative_index, to -> from)` is recorded as well, flagged
    /// as conjugate. Nothing is recorded unless both directions are acceptable.
    pub fn add_registered_hopping(
        &mut self,
        relative_index: Index3D,
        from: SubId,
        to: SubId,
        id: HopId,
    ) -> Result<(), Error> {
        self.check_sub_id(from)?;
        self.check_sub_id(to)?;
        if id < 0 || id as usize >= self.hopping_energies.len() {
            return Err(Error::HoppingOutOfRange {
                id: id as i32,
                count: self.hopping_energies.len(),
            });
        }
        if from == to && relative_index == Index3D::zeros() {
            return Err(Error::SelfHopping {
                sublattice: from as i32,
            });
        }

        let mirror_index = -relative_index;
        let duplicate = self.sublattices[from as usize].has_hopping(relative_index, to)
            || self.sublattices[to as usize].has_hopping(mirror_index, from);
        if duplicate {
            return Err(Error::DuplicateHopping {
                x: relative_index.x,
                y: relative_index.y,
                z: relative_index.z,
                from: from as i32,
                to: to as i32,
            });
        }

        self.sublattices[from as usize].add_hopping(relative_index, to, id, false)?;
        self.sublattices[to as usize].add_hopping(mirror_index, from, id, true)?;
        Ok(())
    }

    /// Add a hopping by value. An already registered energy with the same value is reused.
    pub fn add_hopping(
        &mut self,
        relative_index: Index3D,
        from: SubId,
        to: SubId,
        value: impl Into<Complex64>,
    ) -> Result<HopId, Error> {
        let value = value.into();
        let existing = self
            .hopping_energies
            .iter()
            .position(|e| (e.value - value).norm() < ENERGY_TOLERANCE);

        let id = match existing {
            Some(position) => position as HopId,
            None => {
                let name = format!("{}{}", ANONYMOUS_HOPPING_PREFIX, self.hopping_energies.len());
                self.register_hopping_energy(&name, value)?
            }
        };

        self.add_registered_hopping(relative_index, from, to, id)?;
        Ok(id)
    }

    /// Position of `sublattice` in the unit cell `index`, relative to `origin`.
    pub fn calc_position(&self, index: Index3D, origin: Cartesian, sublattice: SubId) -> Cartesian {
        let mut position = origin;
        // + unit cell position (Bravais lattice)
        for (i, vector) in self.vectors.iter().enumerate() {
            position += index[i] as f64 * vector;
        }
        // + sublattice offset
        position + self.sublattices[sublattice as usize].offset
    }

    /// Longest hopping list over all sublattices.
    pub fn max_hoppings(&self) -> usize {
        self.sublattices
            .iter()
            .map(|s| s.hoppings.len())
            .max()
            .unwrap_or(0)
    }

    /// True if any registered hopping energy has a non-zero imaginary part.
    pub fn has_complex_hoppings(&self) -> bool {
        self.hopping_energies.iter().any(|e| e.value.im != 0.0)
    }

    pub fn has_onsite_energy(&self) -> bool {
        self.sublattices.iter().any(|s| s.onsite_energy != 0.0)
    }

    /// `ndim x ndim` matrix with the primitive vectors as columns.
    pub fn lattice_matrix(&self) -> DMatrix<f64> {
        let ndim = self.ndim();
        DMatrix::from_fn(ndim, ndim, |row, col| self.vectors[col][row])
    }

    pub fn sub_id(&self, name: &str) -> Option<SubId> {
        self.sublattices
            .iter()
            .position(|s| s.name == name)
            .map(|i| i as SubId)
    }

    pub fn hop_id(&self, name: &str) -> Option<HopId> {
        self.hopping_energies
            .iter()
            .position(|e| e.name == name)
            .map(|i| i as HopId)
    }

    pub fn sublattice(&self, id: SubId) -> &Sublattice {
        &self.sublattices[id as usize]
    }

    pub fn sublattices(&self) -> &[Sublattice] {
        &self.sublattices
    }

    pub fn hopping_energy(&self, id: HopId) -> Complex64 {
        self.hopping_energies[id as usize].value
    }

    pub fn hopping_energies(&self) -> &[HoppingEnergy] {
        &self.hopping_energies
    }

    /// Hoppings that start on sublattice `id`.
    pub fn hoppings(&self, id: SubId) -> &[Hopping] {
        &self.sublattices[id as usize].hoppings
    }

    pub fn vectors(&self) -> &[Cartesian] {
        &self.vectors
    }

    pub fn ndim(&self) -> usize {
        self.vectors.len()
    }

    pub fn min_neighbours(&self) -> i32 {
        self.min_neighbours
    }

    pub fn set_min_neighbours(&mut self, min_neighbours: i32) {
        self.min_neighbours = min_neighbours;
    }

    fn check_sub_id(&self, id: SubId) -> Result<(), Error> {
        if id < 0 || id as usize >= self.sublattices.len() {
            return Err(Error::SublatticeOutOfRange {
                id: id as i32,
                count: self.sublattices.len(),
            });
        }
        Ok(())
    }
}
