//! Tight-binding model construction library
//!
//! This library builds sparse tight-binding Hamiltonians from a lattice description:
//! sites are enumerated inside a primitive block or an arbitrary shape, dangling sites
//! are trimmed, periodic images become boundary blocks, and the Hamiltonian is
//! assembled for a chosen scalar type and wave vector.

pub mod config;
pub mod error;
pub mod geometries;
pub mod hamiltonian;
pub mod interfaces;
pub mod lattice;
pub mod model;
pub mod support;
pub mod system;

pub use error::{Error, ErrorCategory};

/// Common result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The types needed to describe and build a model
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::geometries::{Circle, Polygon, Primitive, Rectangle, Shape, TranslationalSymmetry};
    pub use crate::hamiltonian::{
        constant_potential, force_double_precision, Hamiltonian, HamiltonianT, HoppingGenerator,
        HoppingGeneratorResult, HoppingModifier, OnsiteModifier,
    };
    pub use crate::interfaces::{Cartesian, Index3D, ScalarType};
    pub use crate::lattice::Lattice;
    pub use crate::model::Model;
    pub use crate::system::{PositionModifier, SiteStateModifier, System};
}
