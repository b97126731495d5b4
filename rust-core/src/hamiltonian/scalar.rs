use std::ops::{Add, AddAssign, Mul};

use num_complex::{Complex32, Complex64};
use num_traits::Zero;

use crate::config::PHASE_TOLERANCE;
use crate::error::Error;
use crate::hamiltonian::hamiltonian::Hamiltonian;
use crate::hamiltonian::hamiltonian_t::HamiltonianT;
use crate::support::Element;

/// Matrix element type of a Hamiltonian: `f32`, `f64`, `Complex32` or `Complex64`
pub trait Scalar:
    Element + nalgebra::Scalar + Zero + Add<Output = Self> + AddAssign + Mul<Output = Self> + Send + Sync
{
    /// Complex conjugate (identity for real types)
    fn conj(self) -> Self;

    /// Bloch phase factor in this type. Real types only accept phases of ±1.
    fn try_phase(phase: Complex64) -> Result<Self, Error>;

    /// Check that `value` is representable, e.g. no imaginary part for real types
    fn check_representable(value: Complex64) -> Result<Self, Error>;

    fn into_hamiltonian(hamiltonian: HamiltonianT<Self>) -> Hamiltonian;
    fn from_hamiltonian(hamiltonian: &Hamiltonian) -> Option<&HamiltonianT<Self>>;
    fn from_hamiltonian_mut(hamiltonian: &mut Hamiltonian) -> Option<&mut HamiltonianT<Self>>;
}

macro_rules! impl_real_scalar {
    ($t:ty, $variant:ident) => {
        impl Scalar for $t {
            fn conj(self) -> Self {
                self
            }

            fn try_phase(phase: Complex64) -> Result<Self, Error> {
                if phase.im.abs() > PHASE_TOLERANCE {
                    return Err(Error::ComplexPhase {
                        re: phase.re,
                        im: phase.im,
                    });
                }
                Ok(phase.re as $t)
            }

            fn check_representable(value: Complex64) -> Result<Self, Error> {
                if value.im != 0.0 {
                    return Err(Error::TypeMismatch {
                        expected: Self::SCALAR_TYPE,
                        found: <Complex64 as Element>::SCALAR_TYPE,
                    });
                }
                Ok(value.re as $t)
            }

            fn into_hamiltonian(hamiltonian: HamiltonianT<Self>) -> Hamiltonian {
                Hamiltonian::$variant(hamiltonian)
            }

            fn from_hamiltonian(hamiltonian: &Hamiltonian) -> Option<&HamiltonianT<Self>> {
                match hamiltonian {
                    Hamiltonian::$variant(h) => Some(h),
                    _ => None,
                }
            }

            fn from_hamiltonian_mut(hamiltonian: &mut Hamiltonian) -> Option<&mut HamiltonianT<Self>> {
                match hamiltonian {
                    Hamiltonian::$variant(h) => Some(h),
                    _ => None,
                }
            }
        }
    };
}

macro_rules! impl_complex_scalar {
    ($t:ty, $variant:ident) => {
        impl Scalar for $t {
            fn conj(self) -> Self {
                num_complex::Complex::conj(&self)
            }

            fn try_phase(phase: Complex64) -> Result<Self, Error> {
                Ok(<$t as Element>::from_complex(phase))
            }

            fn check_representable(value: Complex64) -> Result<Self, Error> {
                Ok(<$t as Element>::from_complex(value))
            }

            fn into_hamiltonian(hamiltonian: HamiltonianT<Self>) -> Hamiltonian {
                Hamiltonian::$variant(hamiltonian)
            }

            fn from_hamiltonian(hamiltonian: &Hamiltonian) -> Option<&HamiltonianT<Self>> {
                match hamiltonian {
                    Hamiltonian::$variant(h) => Some(h),
                    _ => None,
                }
            }

            fn from_hamiltonian_mut(hamiltonian: &mut Hamiltonian) -> Option<&mut HamiltonianT<Self>> {
                match hamiltonian {
                    Hamiltonian::$variant(h) => Some(h),
                    _ => None,
                }
            }
        }
    };
}

impl_real_scalar!(f32, F32);
impl_real_scalar!(f64, F64);
impl_complex_scalar!(Complex32, Cf32);
impl_complex_scalar!(Complex64, Cf64);
