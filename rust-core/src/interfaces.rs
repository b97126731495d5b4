// Definitions that are used throughout all modules

use nalgebra::Vector3;
use std::fmt;

/// A point in real space.
pub type Cartesian = Vector3<f64>;

/// Integer unit-cell index (one component per lattice vector, unused ones are zero).
pub type Index3D = Vector3<i32>;

/// Sublattice identifier. Kept deliberately small: a handful of sites per unit cell.
pub type SubId = i8;

/// Registered hopping energy identifier.
pub type HopId = i8;

// Enumeration of the element types a type-erased view can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    F32,
    Cf32,
    F64,
    Cf64,
    I32,
}

impl ScalarType {
    /// Narrowest floating point representation that can hold the model.
    pub fn select(is_complex: bool, is_double: bool) -> Self {
        match (is_complex, is_double) {
            (false, false) => ScalarType::F32,
            (true, false) => ScalarType::Cf32,
            (false, true) => ScalarType::F64,
            (true, true) => ScalarType::Cf64,
        }
    }

    pub fn is_complex(&self) -> bool {
        matches!(self, ScalarType::Cf32 | ScalarType::Cf64)
    }

    pub fn is_double(&self) -> bool {
        matches!(self, ScalarType::F64 | ScalarType::Cf64)
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalarType::F32 => "real32",
            ScalarType::Cf32 => "complex32",
            ScalarType::F64 => "real64",
            ScalarType::Cf64 => "complex64",
            ScalarType::I32 => "int32",
        };
        f.write_str(name)
    }
}
