//! Error types for model construction.
//!
//! Every failure in this crate is a precondition violation detected once, at
//! the point where it happens. Nothing here is transient, so nothing is retried.

use thiserror::Error;

use crate::interfaces::ScalarType;

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The lattice or modifier definition is inconsistent and must be fixed by the caller.
    Configuration,
    /// A type-erased view was read back with the wrong scalar type.
    TypeMismatch,
    /// The lattice geometry cannot be inverted (e.g. collinear primitive vectors).
    GeometryDegeneracy,
}

/// Errors that can occur while building a lattice, system or Hamiltonian.
#[derive(Debug, Error)]
pub enum Error {
    /// A sublattice or hopping energy name was registered twice.
    #[error("{kind} name '{name}' is already in use")]
    DuplicateName { kind: &'static str, name: String },

    /// The small-integer id space of sublattices or hopping energies is exhausted.
    #[error("cannot register {kind} '{name}': at most {limit} entries are supported")]
    IdOverflow {
        kind: &'static str,
        name: String,
        limit: usize,
    },

    #[error("sublattice id {id} is out of range (the lattice has {count} sublattices)")]
    SublatticeOutOfRange { id: i32, count: usize },

    #[error("hopping id {id} is out of range (the lattice has {count} hopping energies)")]
    HoppingOutOfRange { id: i32, count: usize },

    /// A zero-offset hopping from a sublattice onto itself would double count the on-site term.
    #[error("hopping from sublattice {sublattice} onto itself requires a non-zero relative index")]
    SelfHopping { sublattice: i32 },

    #[error("hopping [{x}, {y}, {z}] from sublattice {from} to sublattice {to} already exists")]
    DuplicateHopping {
        x: i32,
        y: i32,
        z: i32,
        from: i32,
        to: i32,
    },

    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    #[error("unknown {kind} name '{name}'")]
    UnknownName { kind: &'static str, name: String },

    /// A hopping generator returned edges that do not fit the finalized system.
    #[error("hopping generator '{name}' is invalid: {detail}")]
    InvalidGenerator { name: String, detail: String },

    /// A real-valued Hamiltonian was asked to carry a complex Bloch phase.
    #[error("Bloch phase {re} + {im}i cannot be represented by a real Hamiltonian")]
    ComplexPhase { re: f64, im: f64 },

    /// A type-erased view was accessed as the wrong concrete type.
    #[error("scalar type mismatch: requested {expected}, but the data is {found}")]
    TypeMismatch {
        expected: ScalarType,
        found: ScalarType,
    },

    #[error("degenerate lattice geometry: {0}")]
    GeometryDegeneracy(String),

    /// Internal compressed sparse row construction failed.
    #[error("sparse matrix construction failed: {0}")]
    SparseFormat(String),
}

// `SparseFormatError` boxes a non-`Send` source, so only its message is kept
impl From<nalgebra_sparse::SparseFormatError> for Error {
    fn from(error: nalgebra_sparse::SparseFormatError) -> Self {
        Error::SparseFormat(error.to_string())
    }
}

impl Error {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::TypeMismatch { .. } => ErrorCategory::TypeMismatch,
            Error::GeometryDegeneracy(_) => ErrorCategory::GeometryDegeneracy,
            _ => ErrorCategory::Configuration,
        }
    }

    pub(crate) fn invalid_generator(name: &str, detail: impl Into<String>) -> Self {
        Self::InvalidGenerator {
            name: name.to_string(),
            detail: detail.into(),
        }
    }
}
