#[cfg(test)]
mod _tests_hamiltonian {
    use super::super::hamiltonian::Hamiltonian;
    use super::super::hamiltonian_modifiers::{
        constant_potential, HamiltonianModifiers, HoppingModifier,
    };
    use super::super::hamiltonian_t::HamiltonianT;
    use crate::error::Error;
    use crate::geometries::{Primitive, TranslationalSymmetry};
    use crate::interfaces::{Cartesian, Index3D, ScalarType};
    use crate::lattice::{chain_lattice, Lattice};
    use crate::system::{Foundation, System, SystemModifiers};
    use approx::assert_relative_eq;
    use nalgebra::Vector3;
    use num_complex::Complex64;
    use std::sync::Arc;

    fn two_site_square_lattice() -> Arc<Lattice> {
        let mut lattice =
            Lattice::new(vec![Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0)]).unwrap();
        let a = lattice.add_sublattice("A", Cartesian::zeros(), 0.0).unwrap();
        let b = lattice
            .add_sublattice("B", Vector3::new(0.5, 0.5, 0.0), 0.0)
            .unwrap();
        let t1 = lattice.register_hopping_energy("t1", 1.0).unwrap();
        let t2 = lattice.register_hopping_energy("t2", 2.0).unwrap();
        lattice.add_registered_hopping(Index3D::new(0, 0, 0), a, b, t1).unwrap();
        lattice.add_registered_hopping(Index3D::new(1, 1, 0), a, b, t1).unwrap();
        lattice.add_registered_hopping(Index3D::new(1, 0, 0), a, a, t2).unwrap();
        Arc::new(lattice)
    }

    fn square_system() -> System {
        let foundation =
            Foundation::from_primitive(&two_site_square_lattice(), &Primitive::default()).unwrap();
        System::new(foundation, &SystemModifiers::default()).unwrap()
    }

    fn periodic_chain(cells: i32) -> System {
        let lattice = Arc::new(chain_lattice(1.0, -1.0).unwrap());
        let foundation = Foundation::from_primitive(&lattice, &Primitive::new(cells, 1, 1))
            .unwrap()
            .with_symmetry(TranslationalSymmetry::along(&[0]));
        System::new(foundation, &SystemModifiers::default()).unwrap()
    }

    fn entries<S: Copy>(matrix: &nalgebra_sparse::CsrMatrix<S>) -> Vec<(usize, usize, S)> {
        matrix.triplet_iter().map(|(i, j, &v)| (i, j, v)).collect()
    }

    #[test]
    fn test_main_matrix_is_upper_triangular() {
        let system = square_system();
        let hamiltonian =
            HamiltonianT::<f64>::new(&system, &HamiltonianModifiers::default(), Cartesian::zeros())
                .unwrap();

        assert_eq!(hamiltonian.non_zeros(), 1);
        assert_eq!(entries(hamiltonian.matrix()), vec![(0, 1, 1.0)]);
        assert!(hamiltonian.boundary_matrices().is_empty());
        assert!(hamiltonian.report().contains("1 non-zeros"));
    }

    #[test]
    fn test_onsite_modifier_adds_diagonal() {
        let system = square_system();
        let mut modifiers = HamiltonianModifiers::default();
        modifiers.add_onsite(Arc::new(constant_potential(1.0)));

        let hamiltonian = HamiltonianT::<f32>::new(&system, &modifiers, Cartesian::zeros()).unwrap();
        assert_eq!(hamiltonian.non_zeros(), 3);
        assert_eq!(
            entries(hamiltonian.matrix()),
            vec![(0, 0, 1.0), (0, 1, 1.0), (1, 1, 1.0)]
        );
    }

    #[test]
    fn test_zero_hoppings_are_dropped() {
        let system = square_system();
        let mut modifiers = HamiltonianModifiers::default();
        modifiers.add_hopping(Arc::new(HoppingModifier::new(|energy, _, _, _| energy.set_zero())));

        let hamiltonian = HamiltonianT::<f64>::new(&system, &modifiers, Cartesian::zeros()).unwrap();
        assert_eq!(hamiltonian.non_zeros(), 0);
    }

    #[test]
    fn test_hopping_modifier_sees_positions_and_ids() {
        let system = square_system();
        let mut modifiers = HamiltonianModifiers::default();
        modifiers.add_hopping(Arc::new(HoppingModifier::new(
            |energy, positions1, positions2, ids| {
                assert_eq!(ids, &[0]);
                let distance = (positions2[0] - positions1[0]).norm();
                energy.apply(|_, e| e * distance);
            },
        )));

        let hamiltonian = HamiltonianT::<f64>::new(&system, &modifiers, Cartesian::zeros()).unwrap();
        let (_, _, value) = entries(hamiltonian.matrix())[0];
        assert_relative_eq!(value, 0.5_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_complex_hopping_rejected_by_real_scalar() {
        let mut lattice = Lattice::new(vec![Vector3::new(1.0, 0.0, 0.0)]).unwrap();
        let a = lattice.add_sublattice("A", Cartesian::zeros(), 0.0).unwrap();
        lattice
            .add_hopping(Index3D::new(1, 0, 0), a, a, Complex64::new(0.0, 1.0))
            .unwrap();
        let lattice = Arc::new(lattice);
        let foundation = Foundation::from_primitive(&lattice, &Primitive::new(2, 1, 1)).unwrap();
        let system = System::new(foundation, &SystemModifiers::default()).unwrap();

        let real = HamiltonianT::<f64>::new(&system, &HamiltonianModifiers::default(), Cartesian::zeros());
        assert!(matches!(real, Err(Error::TypeMismatch { .. })));

        let complex =
            HamiltonianT::<Complex64>::new(&system, &HamiltonianModifiers::default(), Cartesian::zeros())
                .unwrap();
        assert_eq!(entries(complex.matrix()), vec![(0, 1, Complex64::new(0.0, 1.0))]);
    }

    #[test]
    fn test_bloch_phases() {
        let system = periodic_chain(4);
        let modifiers = HamiltonianModifiers::default();

        // k L = pi gives a real phase of -1
        let k = Vector3::new(std::f64::consts::PI / 4.0, 0.0, 0.0);
        let real = HamiltonianT::<f64>::new(&system, &modifiers, k).unwrap();
        assert_eq!(real.boundary_lengths(), &[Vector3::new(4.0, 0.0, 0.0)]);
        assert_relative_eq!(real.boundary_phases()[0], -1.0, epsilon = 1e-12);

        let k = Vector3::new(0.1, 0.0, 0.0);
        let result = HamiltonianT::<f64>::new(&system, &modifiers, k);
        assert!(matches!(result, Err(Error::ComplexPhase { .. })));

        let mut complex = HamiltonianT::<Complex64>::new(&system, &modifiers, k).unwrap();
        assert_relative_eq!(complex.boundary_phases()[0].re, 0.4_f64.cos(), epsilon = 1e-12);
        assert_relative_eq!(complex.boundary_phases()[0].im, 0.4_f64.sin(), epsilon = 1e-12);

        let matrix_before = entries(complex.matrix());
        complex.set_wave_vector(Cartesian::zeros()).unwrap();
        assert_eq!(entries(complex.matrix()), matrix_before);
        assert_relative_eq!(complex.boundary_phases()[0].re, 1.0, epsilon = 1e-12);
        assert_eq!(complex.k_vector(), Cartesian::zeros());
    }

    #[test]
    fn test_full_matrix_is_hermitian() {
        let system = periodic_chain(4);
        let k = Vector3::new(0.3, 0.0, 0.0);
        let hamiltonian =
            HamiltonianT::<Complex64>::new(&system, &HamiltonianModifiers::default(), k).unwrap();
        let full = hamiltonian.full_matrix();

        assert_eq!(full.nnz(), 8);
        let all = entries(&full);
        for &(i, j, value) in &all {
            let (_, _, mirror) = all
                .iter()
                .copied()
                .find(|&(r, c, _)| r == j && c == i)
                .unwrap();
            assert_relative_eq!(mirror.re, value.re, epsilon = 1e-12);
            assert_relative_eq!(mirror.im, -value.im, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_single_cell_chain_band() {
        // one site wrapped onto itself: H(k) = 2 t cos(k a)
        let system = periodic_chain(1);
        let k = 0.3;
        let hamiltonian = HamiltonianT::<Complex64>::new(
            &system,
            &HamiltonianModifiers::default(),
            Vector3::new(k, 0.0, 0.0),
        )
        .unwrap();
        assert_eq!(hamiltonian.non_zeros(), 0);

        let full = hamiltonian.full_matrix();
        let (_, _, value) = entries(&full)[0];
        assert_relative_eq!(value.re, -2.0 * k.cos(), epsilon = 1e-12);
        assert_relative_eq!(value.im, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_runtime_scalar_selection() {
        let system = square_system();
        let modifiers = HamiltonianModifiers::default();
        let hamiltonian = Hamiltonian::new(&system, &modifiers, Cartesian::zeros(), ScalarType::F64).unwrap();

        assert_eq!(hamiltonian.scalar_type(), ScalarType::F64);
        assert_eq!(hamiltonian.non_zeros(), 1);
        assert_eq!(hamiltonian.rows(), 2);
        assert!(hamiltonian.as_t::<f64>().is_ok());
        match hamiltonian.as_t::<f32>() {
            Err(Error::TypeMismatch { expected, found }) => {
                assert_eq!(expected, ScalarType::F32);
                assert_eq!(found, ScalarType::F64);
            }
            other => panic!("unexpected {:?}", other.map(|_| ())),
        }

        let view = hamiltonian.matrix_union();
        assert_eq!(view.scalar_type(), ScalarType::F64);
        assert_eq!(view.nnz(), 1);
        assert!(view.values.as_slice::<Complex64>().is_err());

        let integer = Hamiltonian::new(&system, &modifiers, Cartesian::zeros(), ScalarType::I32);
        assert!(matches!(integer, Err(Error::TypeMismatch { .. })));
    }

    #[test]
    fn test_build_for_k_points() {
        let system = periodic_chain(2);
        let k_points: Vec<Cartesian> = (0..4).map(|i| Vector3::new(0.2 * i as f64, 0.0, 0.0)).collect();
        let hamiltonians = Hamiltonian::build_for_k_points(
            &system,
            &HamiltonianModifiers::default(),
            &k_points,
            ScalarType::Cf32,
        )
        .unwrap();

        assert_eq!(hamiltonians.len(), 4);
        for (hamiltonian, k) in hamiltonians.iter().zip(&k_points) {
            assert_eq!(hamiltonian.k_vector(), *k);
            assert_eq!(hamiltonian.non_zeros(), 1);
        }
    }
}
