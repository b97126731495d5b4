use nalgebra_sparse::{CooMatrix, CsrMatrix};
use num_complex::Complex64;
use num_traits::Zero;

use crate::config::ENERGY_TOLERANCE;
use crate::error::Error;
use crate::hamiltonian::hamiltonian_modifiers::HamiltonianModifiers;
use crate::hamiltonian::scalar::Scalar;
use crate::interfaces::{Cartesian, HopId};
use crate::support::{nonzeros_per_row, DenseURefMut, RowAccumulator, SparseURef};
use crate::system::{HoppingLink, System};

/// Hopping entries gathered before the hopping modifiers run
struct HoppingEntries<S> {
    rows: Vec<usize>,
    cols: Vec<usize>,
    energies: Vec<S>,
    ids: Vec<HopId>,
}

impl<S: Scalar> HoppingEntries<S> {
    fn from_accumulator(accumulator: RowAccumulator<(HopId, S)>) -> Self {
        let nnz = accumulator.nnz();
        let mut entries = Self {
            rows: Vec::with_capacity(nnz),
            cols: Vec::with_capacity(nnz),
            energies: Vec::with_capacity(nnz),
            ids: Vec::with_capacity(nnz),
        };
        for (row, col, &(id, energy)) in accumulator.iter() {
            entries.rows.push(row);
            entries.cols.push(col);
            entries.energies.push(energy);
            entries.ids.push(id);
        }
        entries
    }

    /// Run the hopping modifiers, `positions2` displaced by `shift`
    fn modify(&mut self, system: &System, modifiers: &HamiltonianModifiers, shift: Cartesian) {
        if modifiers.hopping.is_empty() || self.energies.is_empty() {
            return;
        }
        let positions1: Vec<Cartesian> = self.rows.iter().map(|&i| system.positions[i]).collect();
        let positions2: Vec<Cartesian> = self
            .cols
            .iter()
            .map(|&j| system.positions[j] + shift)
            .collect();

        for modifier in &modifiers.hopping {
            let mut view = DenseURefMut::from_slice(&mut self.energies);
            modifier.apply(&mut view, &positions1, &positions2, &self.ids);
        }
    }
}

/// Tight-binding Hamiltonian with a concrete scalar type
///
/// The main matrix stores the upper triangle (diagonal included) of the in-block
/// Hamiltonian; the lower triangle is its Hermitian conjugate. Each boundary matrix
/// holds the bonds towards one periodic image and is weighted by its Bloch phase.
#[derive(Debug, Clone)]
pub struct HamiltonianT<S: Scalar> {
    matrix: CsrMatrix<S>,
    boundary_matrices: Vec<CsrMatrix<S>>,
    boundary_lengths: Vec<Cartesian>,
    boundary_phases: Vec<S>,
    k_vector: Cartesian,
    report: String,
}

impl<S: Scalar> HamiltonianT<S> {
    pub fn new(
        system: &System,
        modifiers: &HamiltonianModifiers,
        k_vector: Cartesian,
    ) -> Result<Self, Error> {
        let matrix = build_main(system, modifiers)?;

        let mut boundary_matrices = Vec::with_capacity(system.boundaries.len());
        let mut boundary_lengths = Vec::with_capacity(system.boundaries.len());
        for boundary in &system.boundaries {
            boundary_matrices.push(build_boundary(system, modifiers, &boundary.hoppings, boundary.shift)?);
            boundary_lengths.push(boundary.shift);
        }

        let mut hamiltonian = Self {
            matrix,
            boundary_matrices,
            boundary_lengths,
            boundary_phases: Vec::new(),
            k_vector,
            report: String::new(),
        };
        hamiltonian.set_wave_vector(k_vector)?;

        let per_row = nonzeros_per_row(&hamiltonian.matrix, true);
        hamiltonian.report = format!(
            "Hamiltonian ({}): {} x {}, {} non-zeros, {} boundaries, at most {} entries per row",
            S::SCALAR_TYPE,
            hamiltonian.matrix.nrows(),
            hamiltonian.matrix.ncols(),
            hamiltonian.non_zeros(),
            hamiltonian.boundary_matrices.len(),
            per_row.iter().max().copied().unwrap_or(0)
        );
        log::info!("{}", hamiltonian.report);
        Ok(hamiltonian)
    }

    /// Recompute the Bloch phases `exp(i k·L)` of the boundary matrices
    pub fn set_wave_vector(&mut self, k_vector: Cartesian) -> Result<(), Error> {
        let phases = self
            .boundary_lengths
            .iter()
            .map(|length| S::try_phase(Complex64::new(0.0, k_vector.dot(length)).exp()))
            .collect::<Result<Vec<_>, _>>()?;
        self.boundary_phases = phases;
        self.k_vector = k_vector;
        Ok(())
    }

    /// Hermitian Bloch matrix `U + U^H - diag(U) + sum(phase * B + (phase * B)^H)`
    pub fn full_matrix(&self) -> CsrMatrix<S> {
        let n = self.matrix.nrows();
        let mut full = CooMatrix::new(n, n);

        for (i, j, &value) in self.matrix.triplet_iter() {
            full.push(i, j, value);
            if i != j {
                full.push(j, i, value.conj());
            }
        }
        for (boundary, &phase) in self.boundary_matrices.iter().zip(&self.boundary_phases) {
            for (i, j, &value) in boundary.triplet_iter() {
                let weighted = phase * value;
                full.push(i, j, weighted);
                full.push(j, i, weighted.conj());
            }
        }
        // duplicate entries are summed by the conversion
        CsrMatrix::from(&full)
    }

    pub fn matrix(&self) -> &CsrMatrix<S> {
        &self.matrix
    }

    pub fn boundary_matrices(&self) -> &[CsrMatrix<S>] {
        &self.boundary_matrices
    }

    pub fn boundary_lengths(&self) -> &[Cartesian] {
        &self.boundary_lengths
    }

    pub fn boundary_phases(&self) -> &[S] {
        &self.boundary_phases
    }

    pub fn k_vector(&self) -> Cartesian {
        self.k_vector
    }

    pub fn non_zeros(&self) -> usize {
        self.matrix.nnz()
    }

    pub fn matrix_union(&self) -> SparseURef<'_> {
        SparseURef::from(&self.matrix)
    }

    pub fn report(&self) -> &str {
        &self.report
    }
}

/// Hopping energy of a stored bond, conjugated if it runs against its lattice hopping
fn link_energy<S: Scalar>(system: &System, link: HoppingLink) -> Result<S, Error> {
    let energy = system.lattice.hopping_energy(link.id);
    let energy = if link.conjugate { energy.conj() } else { energy };
    S::check_representable(energy)
}

fn build_main<S: Scalar>(system: &System, modifiers: &HamiltonianModifiers) -> Result<CsrMatrix<S>, Error> {
    let num_sites = system.num_sites();

    // on-site energies
    let mut onsite = system
        .sublattice_ids
        .iter()
        .map(|&sub| S::check_representable(Complex64::from(system.lattice.sublattice(sub).onsite_energy)))
        .collect::<Result<Vec<S>, _>>()?;
    for modifier in &modifiers.onsite {
        let mut view = DenseURefMut::from_slice(&mut onsite);
        modifier.apply(&mut view, &system.positions, &system.sublattice_ids);
    }

    // structural bonds first, then generated ones: the first writer of an entry wins
    let mut hoppings: RowAccumulator<(HopId, S)> = RowAccumulator::new(num_sites, num_sites);
    for (i, j, &link) in system.hoppings.triplet_iter() {
        hoppings.insert_first(i, j, (link.id, link_energy(system, link)?));
    }
    for generator in &modifiers.hopping_generators {
        let id = system.lattice.hop_id(&generator.name).ok_or_else(|| Error::UnknownName {
            kind: "hopping",
            name: generator.name.clone(),
        })?;
        let energy = system.lattice.hopping_energy(id);
        if (generator.energy - energy).norm() > ENERGY_TOLERANCE {
            return Err(Error::invalid_generator(
                &generator.name,
                format!(
                    "energy {} differs from the lattice's registered value {}",
                    generator.energy, energy
                ),
            ));
        }
        let result = generator.generate(&system.positions, &system.sublattice_ids);
        if result.from.len() != result.to.len() {
            return Err(Error::invalid_generator(
                &generator.name,
                format!(
                    "'from' has {} entries but 'to' has {}",
                    result.from.len(),
                    result.to.len()
                ),
            ));
        }

        let mut skipped = 0;
        for (&from, &to) in result.from.iter().zip(&result.to) {
            let in_range = |index: i32| index >= 0 && (index as usize) < num_sites;
            if !in_range(from) || !in_range(to) {
                return Err(Error::invalid_generator(
                    &generator.name,
                    format!("site pair ({}, {}) is out of range for {} sites", from, to, num_sites),
                ));
            }
            if from == to {
                return Err(Error::invalid_generator(
                    &generator.name,
                    format!("site {} cannot hop onto itself", from),
                ));
            }

            let (row, col, value) = if from < to {
                (from as usize, to as usize, energy)
            } else {
                (to as usize, from as usize, energy.conj())
            };
            if !hoppings.insert_first(row, col, (id, S::check_representable(value)?)) {
                skipped += 1;
            }
        }
        if skipped > 0 {
            log::debug!(
                "hopping generator '{}': {} bonds already present, kept the earlier energy",
                generator.name,
                skipped
            );
        }
    }

    let mut entries = HoppingEntries::from_accumulator(hoppings);
    entries.modify(system, modifiers, Cartesian::zeros());

    let mut matrix: RowAccumulator<S> = RowAccumulator::new(num_sites, num_sites);
    for (i, value) in onsite.into_iter().enumerate() {
        if !value.is_zero() {
            matrix.insert_first(i, i, value);
        }
    }
    for ((&i, &j), &value) in entries.rows.iter().zip(&entries.cols).zip(&entries.energies) {
        if !value.is_zero() {
            matrix.insert_first(i, j, value);
        }
    }
    matrix.into_csr()
}

fn build_boundary<S: Scalar>(
    system: &System,
    modifiers: &HamiltonianModifiers,
    links: &CsrMatrix<HoppingLink>,
    shift: Cartesian,
) -> Result<CsrMatrix<S>, Error> {
    let num_sites = system.num_sites();
    let mut hoppings: RowAccumulator<(HopId, S)> = RowAccumulator::new(num_sites, num_sites);
    for (i, j, &link) in links.triplet_iter() {
        hoppings.insert_first(i, j, (link.id, link_energy(system, link)?));
    }

    let mut entries = HoppingEntries::from_accumulator(hoppings);
    entries.modify(system, modifiers, shift);

    let mut matrix: RowAccumulator<S> = RowAccumulator::new(num_sites, num_sites);
    for ((&i, &j), &value) in entries.rows.iter().zip(&entries.cols).zip(&entries.energies) {
        if !value.is_zero() {
            matrix.insert_first(i, j, value);
        }
    }
    matrix.into_csr()
}
