// Hamiltonian module: sparse tight-binding matrices assembled from a finalized System
// Generic over the scalar type, with a runtime-tagged wrapper for callers that choose it dynamically

// ======================== MODULE DECLARATIONS ========================
pub mod hamiltonian;
pub mod hamiltonian_modifiers;
pub mod hamiltonian_t;
pub mod scalar;

// Test modules
#[cfg(test)]
mod _tests_hamiltonian;
#[cfg(test)]
mod _tests_hamiltonian_modifiers;

// ======================== SCALAR ABSTRACTION ========================
pub use scalar::Scalar; // trait - f32, f64, Complex32, Complex64
// Scalar trait methods:
//   conj(self) -> Self                                       - complex conjugate (identity for reals)
//   try_phase(phase: Complex64) -> Result<Self>              - Bloch phase, ComplexPhase for reals
//   check_representable(value: Complex64) -> Result<Self>    - TypeMismatch for complex values in reals

// ======================== MODIFIERS ========================
pub use hamiltonian_modifiers::{
    constant_potential,      // fn(potential: f64) -> OnsiteModifier - shifts every on-site energy
    force_double_precision,  // fn() -> OnsiteModifier - no-op that selects double precision
    HamiltonianModifiers,    // struct - ordered, identity-deduplicated modifier and generator lists
    HoppingGenerator,        // struct - (name, energy, Fn(&[Cartesian], &[SubId]) -> HoppingGeneratorResult)
    HoppingGeneratorResult,  // struct - (from, to) site index pairs
    HoppingModifier,         // struct - Fn(&mut DenseURefMut, &[Cartesian], &[Cartesian], &[HopId])
    OnsiteModifier,          // struct - Fn(&mut DenseURefMut, &[Cartesian], &[SubId])
};

// ======================== HAMILTONIAN ========================
pub use hamiltonian_t::HamiltonianT; // struct - upper-triangular main matrix + boundary matrices
// HamiltonianT impl methods:
//   new(system: &System, modifiers: &HamiltonianModifiers, k: Cartesian) -> Result<Self>
//   set_wave_vector(&mut self, k: Cartesian) -> Result<()>   - recompute Bloch phases only
//   full_matrix(&self) -> CsrMatrix<S>                       - Hermitian Bloch matrix
//   matrix / boundary_matrices / boundary_lengths / boundary_phases / k_vector / non_zeros / report

pub use hamiltonian::Hamiltonian; // enum - F32 | Cf32 | F64 | Cf64
// Hamiltonian impl methods:
//   new(system, modifiers, k, scalar_type: ScalarType) -> Result<Self>  - runtime scalar selection
//   build_for_k_points(system, modifiers, k_points, scalar_type) -> Result<Vec<Self>>
//   as_t::<S>(&self) -> Result<&HamiltonianT<S>>             - checked downcast, TypeMismatch otherwise
//   matrix_union(&self) -> SparseURef                        - type-erased main matrix
