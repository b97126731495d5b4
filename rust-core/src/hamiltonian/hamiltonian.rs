use crate::error::Error;
use crate::hamiltonian::hamiltonian_modifiers::HamiltonianModifiers;
use crate::hamiltonian::hamiltonian_t::HamiltonianT;
use crate::hamiltonian::scalar::Scalar;
use crate::interfaces::{Cartesian, ScalarType};
use crate::support::SparseURef;
use crate::system::System;
use num_complex::{Complex32, Complex64};

/// Hamiltonian with its scalar type chosen at runtime
#[derive(Debug, Clone)]
pub enum Hamiltonian {
    F32(HamiltonianT<f32>),
    Cf32(HamiltonianT<Complex32>),
    F64(HamiltonianT<f64>),
    Cf64(HamiltonianT<Complex64>),
}

macro_rules! dispatch {
    ($self:expr, $h:ident => $body:expr) => {
        match $self {
            Hamiltonian::F32($h) => $body,
            Hamiltonian::Cf32($h) => $body,
            Hamiltonian::F64($h) => $body,
            Hamiltonian::Cf64($h) => $body,
        }
    };
}

impl Hamiltonian {
    pub fn new(
        system: &System,
        modifiers: &HamiltonianModifiers,
        k_vector: Cartesian,
        scalar_type: ScalarType,
    ) -> Result<Self, Error> {
        match scalar_type {
            ScalarType::F32 => Self::build::<f32>(system, modifiers, k_vector),
            ScalarType::Cf32 => Self::build::<Complex32>(system, modifiers, k_vector),
            ScalarType::F64 => Self::build::<f64>(system, modifiers, k_vector),
            ScalarType::Cf64 => Self::build::<Complex64>(system, modifiers, k_vector),
            ScalarType::I32 => Err(Error::TypeMismatch {
                expected: ScalarType::Cf64,
                found: ScalarType::I32,
            }),
        }
    }

    fn build<S: Scalar>(
        system: &System,
        modifiers: &HamiltonianModifiers,
        k_vector: Cartesian,
    ) -> Result<Self, Error> {
        HamiltonianT::<S>::new(system, modifiers, k_vector).map(S::into_hamiltonian)
    }

    /// One Hamiltonian per k-point, sharing the same system and modifiers
    ///
    /// The matrices are assembled once and only the Bloch phases differ between
    /// k-points. With the `parallel` feature the phases are set on the rayon pool.
    pub fn build_for_k_points(
        system: &System,
        modifiers: &HamiltonianModifiers,
        k_points: &[Cartesian],
        scalar_type: ScalarType,
    ) -> Result<Vec<Self>, Error> {
        let base = Self::new(system, modifiers, Cartesian::zeros(), scalar_type)?;
        let at_k = |k: &Cartesian| -> Result<Self, Error> {
            let mut hamiltonian = base.clone();
            hamiltonian.set_wave_vector(*k)?;
            Ok(hamiltonian)
        };

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            k_points.par_iter().map(at_k).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            k_points.iter().map(at_k).collect()
        }
    }

    /// Typed access; asking for the wrong scalar type is a `TypeMismatch`
    pub fn as_t<S: Scalar>(&self) -> Result<&HamiltonianT<S>, Error> {
        S::from_hamiltonian(self).ok_or(Error::TypeMismatch {
            expected: S::SCALAR_TYPE,
            found: self.scalar_type(),
        })
    }

    pub fn as_t_mut<S: Scalar>(&mut self) -> Result<&mut HamiltonianT<S>, Error> {
        let found = self.scalar_type();
        S::from_hamiltonian_mut(self).ok_or(Error::TypeMismatch {
            expected: S::SCALAR_TYPE,
            found,
        })
    }

    pub fn scalar_type(&self) -> ScalarType {
        match self {
            Hamiltonian::F32(_) => ScalarType::F32,
            Hamiltonian::Cf32(_) => ScalarType::Cf32,
            Hamiltonian::F64(_) => ScalarType::F64,
            Hamiltonian::Cf64(_) => ScalarType::Cf64,
        }
    }

    pub fn set_wave_vector(&mut self, k_vector: Cartesian) -> Result<(), Error> {
        dispatch!(self, h => h.set_wave_vector(k_vector))
    }

    pub fn k_vector(&self) -> Cartesian {
        dispatch!(self, h => h.k_vector())
    }

    pub fn non_zeros(&self) -> usize {
        dispatch!(self, h => h.non_zeros())
    }

    pub fn rows(&self) -> usize {
        dispatch!(self, h => h.matrix().nrows())
    }

    pub fn matrix_union(&self) -> SparseURef<'_> {
        dispatch!(self, h => h.matrix_union())
    }

    pub fn report(&self) -> &str {
        dispatch!(self, h => h.report())
    }
}
