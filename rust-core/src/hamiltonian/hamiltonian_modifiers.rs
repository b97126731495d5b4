use std::fmt;
use std::sync::Arc;

use num_complex::Complex64;

use crate::interfaces::{Cartesian, HopId, SubId};
use crate::support::DenseURefMut;
use crate::system::system_modifiers::add_unique;

type OnsiteFn = dyn Fn(&mut DenseURefMut<'_>, &[Cartesian], &[SubId]) + Send + Sync;
type HoppingFn = dyn Fn(&mut DenseURefMut<'_>, &[Cartesian], &[Cartesian], &[HopId]) + Send + Sync;
type GeneratorFn = dyn Fn(&[Cartesian], &[SubId]) -> HoppingGeneratorResult + Send + Sync;

/// Modifies the on-site energy of every site: `(energy, positions, sublattice_ids)`
pub struct OnsiteModifier {
    apply: Box<OnsiteFn>,
    /// May produce complex energies
    pub is_complex: bool,
    /// Requires double precision
    pub is_double: bool,
}

impl OnsiteModifier {
    pub fn new<F>(apply: F) -> Self
    where
        F: Fn(&mut DenseURefMut<'_>, &[Cartesian], &[SubId]) + Send + Sync + 'static,
    {
        Self {
            apply: Box::new(apply),
            is_complex: false,
            is_double: false,
        }
    }

    pub fn complex(mut self) -> Self {
        self.is_complex = true;
        self
    }

    pub fn double(mut self) -> Self {
        self.is_double = true;
        self
    }

    pub fn apply(&self, energy: &mut DenseURefMut<'_>, positions: &[Cartesian], sublattices: &[SubId]) {
        (self.apply)(energy, positions, sublattices)
    }
}

impl fmt::Debug for OnsiteModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnsiteModifier")
            .field("is_complex", &self.is_complex)
            .field("is_double", &self.is_double)
            .finish_non_exhaustive()
    }
}

/// Add a constant `potential` to every on-site energy
pub fn constant_potential(potential: f64) -> OnsiteModifier {
    OnsiteModifier::new(move |energy, _, _| energy.apply(|_, e| e + potential))
}

/// No-op modifier whose only effect is selecting a double precision Hamiltonian
pub fn force_double_precision() -> OnsiteModifier {
    OnsiteModifier::new(|_, _, _| {}).double()
}

/// Modifies every hopping energy: `(energy, positions1, positions2, hopping_ids)`
///
/// Entry `n` is the bond from `positions1[n]` to `positions2[n]`. For periodic
/// boundaries, `positions2` is already shifted to the neighbouring image.
pub struct HoppingModifier {
    apply: Box<HoppingFn>,
    pub is_complex: bool,
    pub is_double: bool,
}

impl HoppingModifier {
    pub fn new<F>(apply: F) -> Self
    where
        F: Fn(&mut DenseURefMut<'_>, &[Cartesian], &[Cartesian], &[HopId]) + Send + Sync + 'static,
    {
        Self {
            apply: Box::new(apply),
            is_complex: false,
            is_double: false,
        }
    }

    pub fn complex(mut self) -> Self {
        self.is_complex = true;
        self
    }

    pub fn double(mut self) -> Self {
        self.is_double = true;
        self
    }

    pub fn apply(
        &self,
        energy: &mut DenseURefMut<'_>,
        positions1: &[Cartesian],
        positions2: &[Cartesian],
        hopping_ids: &[HopId],
    ) {
        (self.apply)(energy, positions1, positions2, hopping_ids)
    }
}

impl fmt::Debug for HoppingModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HoppingModifier")
            .field("is_complex", &self.is_complex)
            .field("is_double", &self.is_double)
            .finish_non_exhaustive()
    }
}

/// Extra bonds produced by a [`HoppingGenerator`], as site index pairs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoppingGeneratorResult {
    pub from: Vec<i32>,
    pub to: Vec<i32>,
}

impl HoppingGeneratorResult {
    pub fn new(from: Vec<i32>, to: Vec<i32>) -> Self {
        Self { from, to }
    }
}

/// Adds bonds which are not part of the lattice, all with the energy registered as `name`
///
/// `energy` must match the registered value; assembly rejects the generator otherwise.
pub struct HoppingGenerator {
    pub name: String,
    pub energy: Complex64,
    make: Box<GeneratorFn>,
}

impl HoppingGenerator {
    pub fn new<F>(name: impl Into<String>, energy: impl Into<Complex64>, make: F) -> Self
    where
        F: Fn(&[Cartesian], &[SubId]) -> HoppingGeneratorResult + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            energy: energy.into(),
            make: Box::new(make),
        }
    }

    pub fn generate(&self, positions: &[Cartesian], sublattices: &[SubId]) -> HoppingGeneratorResult {
        (self.make)(positions, sublattices)
    }
}

impl fmt::Debug for HoppingGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HoppingGenerator")
            .field("name", &self.name)
            .field("energy", &self.energy)
            .finish_non_exhaustive()
    }
}

/// Ordered modifiers applied while a Hamiltonian is built
#[derive(Debug, Clone, Default)]
pub struct HamiltonianModifiers {
    pub onsite: Vec<Arc<OnsiteModifier>>,
    pub hopping: Vec<Arc<HoppingModifier>>,
    pub hopping_generators: Vec<Arc<HoppingGenerator>>,
}

impl HamiltonianModifiers {
    pub fn add_onsite(&mut self, modifier: Arc<OnsiteModifier>) -> bool {
        add_unique(&mut self.onsite, modifier)
    }

    pub fn add_hopping(&mut self, modifier: Arc<HoppingModifier>) -> bool {
        add_unique(&mut self.hopping, modifier)
    }

    pub fn add_generator(&mut self, generator: Arc<HoppingGenerator>) -> bool {
        add_unique(&mut self.hopping_generators, generator)
    }

    /// Any modifier may produce complex values, or a generator energy is complex
    pub fn any_complex(&self) -> bool {
        self.onsite.iter().any(|m| m.is_complex)
            || self.hopping.iter().any(|m| m.is_complex)
            || self.hopping_generators.iter().any(|g| g.energy.im != 0.0)
    }

    pub fn any_double(&self) -> bool {
        self.onsite.iter().any(|m| m.is_double) || self.hopping.iter().any(|m| m.is_double)
    }

    pub fn is_empty(&self) -> bool {
        self.onsite.is_empty() && self.hopping.is_empty() && self.hopping_generators.is_empty()
    }

    pub fn clear(&mut self) {
        self.onsite.clear();
        self.hopping.clear();
        self.hopping_generators.clear();
    }
}
