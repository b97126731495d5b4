//! Model: the front object tying a lattice, a region and modifiers to a cached
//! system and Hamiltonian.

use std::sync::Arc;

use crate::error::Error;
use crate::geometries::{Primitive, Shape, TranslationalSymmetry};
use crate::hamiltonian::{
    Hamiltonian, HamiltonianModifiers, HoppingGenerator, HoppingModifier, OnsiteModifier,
};
use crate::interfaces::{Cartesian, ScalarType};
use crate::lattice::Lattice;
use crate::system::{Foundation, PositionModifier, SiteStateModifier, System, SystemModifiers};

/// Tight-binding model built lazily from its parts
///
/// The system and Hamiltonian are built on first access and cached. Changing any
/// part drops the caches that depend on it; changing only the wave vector re-phases
/// a cached Hamiltonian in place when its scalar type stays the same.
#[derive(Debug, Clone)]
pub struct Model {
    lattice: Arc<Lattice>,
    primitive: Primitive,
    shape: Option<Arc<dyn Shape>>,
    symmetry: Option<TranslationalSymmetry>,
    wave_vector: Cartesian,
    system_modifiers: SystemModifiers,
    hamiltonian_modifiers: HamiltonianModifiers,
    system: Option<Arc<System>>,
    hamiltonian: Option<Hamiltonian>,
}

impl Model {
    pub fn new(lattice: impl Into<Arc<Lattice>>) -> Self {
        Self {
            lattice: lattice.into(),
            primitive: Primitive::default(),
            shape: None,
            symmetry: None,
            wave_vector: Cartesian::zeros(),
            system_modifiers: SystemModifiers::default(),
            hamiltonian_modifiers: HamiltonianModifiers::default(),
            system: None,
            hamiltonian: None,
        }
    }

    /// Select a primitive block, replacing any shape
    pub fn set_primitive(&mut self, primitive: Primitive) {
        self.primitive = primitive;
        self.shape = None;
        self.invalidate_system();
    }

    /// Select sites inside `shape` instead of a primitive block
    pub fn set_shape(&mut self, shape: impl Shape + 'static) {
        self.shape = Some(Arc::new(shape));
        self.invalidate_system();
    }

    pub fn set_symmetry(&mut self, symmetry: TranslationalSymmetry) {
        self.symmetry = Some(symmetry);
        self.invalidate_system();
    }

    pub fn set_wave_vector(&mut self, k_vector: Cartesian) -> Result<(), Error> {
        self.wave_vector = k_vector;
        let scalar_type = self.scalar_type();
        if let Some(hamiltonian) = &mut self.hamiltonian {
            if hamiltonian.scalar_type() == scalar_type {
                return hamiltonian.set_wave_vector(k_vector);
            }
            self.hamiltonian = None;
        }
        Ok(())
    }

    pub fn add_state_modifier(&mut self, modifier: Arc<SiteStateModifier>) -> bool {
        let added = self.system_modifiers.add_state(modifier);
        if added {
            self.invalidate_system();
        }
        added
    }

    pub fn add_position_modifier(&mut self, modifier: Arc<PositionModifier>) -> bool {
        let added = self.system_modifiers.add_position(modifier);
        if added {
            self.invalidate_system();
        }
        added
    }

    pub fn add_onsite_modifier(&mut self, modifier: Arc<OnsiteModifier>) -> bool {
        let added = self.hamiltonian_modifiers.add_onsite(modifier);
        if added {
            self.hamiltonian = None;
        }
        added
    }

    pub fn add_hopping_modifier(&mut self, modifier: Arc<HoppingModifier>) -> bool {
        let added = self.hamiltonian_modifiers.add_hopping(modifier);
        if added {
            self.hamiltonian = None;
        }
        added
    }

    /// Add a hopping generator and register its energy in the lattice under its name
    ///
    /// Returns `Ok(false)` if this generator handle was already added.
    pub fn add_hopping_family(&mut self, generator: Arc<HoppingGenerator>) -> Result<bool, Error> {
        if self
            .hamiltonian_modifiers
            .hopping_generators
            .iter()
            .any(|g| Arc::ptr_eq(g, &generator))
        {
            return Ok(false);
        }

        Arc::make_mut(&mut self.lattice).register_hopping_energy(&generator.name, generator.energy)?;
        self.hamiltonian_modifiers.add_generator(generator);
        // the cached system still refers to the previous lattice
        self.invalidate_system();
        Ok(true)
    }

    /// Complex scalars are needed for complex lattice hoppings, complex modifiers,
    /// complex generator energies, or a non-zero wave vector on a periodic system
    pub fn is_complex(&self) -> bool {
        let periodic = self.symmetry.map_or(false, |s| s.is_periodic());
        self.lattice.has_complex_hoppings()
            || self.hamiltonian_modifiers.any_complex()
            || (periodic && self.wave_vector != Cartesian::zeros())
    }

    pub fn is_double(&self) -> bool {
        self.hamiltonian_modifiers.any_double()
    }

    pub fn scalar_type(&self) -> ScalarType {
        ScalarType::select(self.is_complex(), self.is_double())
    }

    pub fn system(&mut self) -> Result<&System, Error> {
        let system = self.shared_system()?;
        Ok(&**self.system.insert(system))
    }

    pub fn hamiltonian(&mut self) -> Result<&Hamiltonian, Error> {
        let hamiltonian = match self.hamiltonian.take() {
            Some(hamiltonian) => hamiltonian,
            None => {
                let system = self.shared_system()?;
                Hamiltonian::new(
                    &system,
                    &self.hamiltonian_modifiers,
                    self.wave_vector,
                    self.scalar_type(),
                )?
            }
        };
        Ok(self.hamiltonian.insert(hamiltonian))
    }

    /// Summary of the cached system and Hamiltonian, if built
    pub fn report(&self) -> String {
        let mut report = match &self.system {
            Some(system) => format!(
                "System: {} sites, {} bonds, {} boundaries",
                system.num_sites(),
                system.hoppings.nnz(),
                system.boundaries.len()
            ),
            None => "System: not built".to_string(),
        };
        if let Some(hamiltonian) = &self.hamiltonian {
            report.push('\n');
            report.push_str(hamiltonian.report());
        }
        report
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn wave_vector(&self) -> Cartesian {
        self.wave_vector
    }

    pub fn system_modifiers(&self) -> &SystemModifiers {
        &self.system_modifiers
    }

    pub fn hamiltonian_modifiers(&self) -> &HamiltonianModifiers {
        &self.hamiltonian_modifiers
    }

    fn shared_system(&mut self) -> Result<Arc<System>, Error> {
        if let Some(system) = &self.system {
            return Ok(Arc::clone(system));
        }

        let foundation = match &self.shape {
            Some(shape) => Foundation::from_shape(&self.lattice, shape.as_ref())?,
            None => Foundation::from_primitive(&self.lattice, &self.primitive)?,
        };
        let foundation = match self.symmetry {
            Some(symmetry) => foundation.with_symmetry(symmetry),
            None => foundation,
        };

        let system = Arc::new(System::new(foundation, &self.system_modifiers)?);
        self.system = Some(Arc::clone(&system));
        Ok(system)
    }

    fn invalidate_system(&mut self) {
        self.system = None;
        self.hamiltonian = None;
    }
}
