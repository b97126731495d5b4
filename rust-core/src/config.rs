// Constants

// Tolerances
pub const GEOMETRY_TOLERANCE: f64 = 1e-10; // Singularity threshold for det(A) / prod(|a_i|) in the bounding solve
pub const PHASE_TOLERANCE: f64 = 1e-6; // Largest imaginary part a real Hamiltonian accepts in a Bloch phase
pub const ENERGY_TOLERANCE: f64 = 1e-12; // For deduplicating registered hopping energies

// Defaults
pub const DEFAULT_MIN_NEIGHBOURS: i32 = 1;
pub const ANONYMOUS_HOPPING_PREFIX: &str = "__anonymous__";
