#[cfg(test)]
mod _tests_hamiltonian_modifiers {
    use super::super::hamiltonian_modifiers::*;
    use super::super::hamiltonian_t::HamiltonianT;
    use crate::error::Error;
    use crate::geometries::Primitive;
    use crate::interfaces::Cartesian;
    use crate::lattice::{chain_lattice, Lattice};
    use crate::system::{Foundation, System, SystemModifiers};
    use num_complex::Complex64;
    use std::sync::Arc;

    // Open three-site chain with bonds (0, 1) and (1, 2), plus a registered "t2"
    fn chain_system(t2: Complex64) -> System {
        let mut lattice: Lattice = chain_lattice(1.0, -1.0).unwrap();
        lattice.register_hopping_energy("t2", t2).unwrap();
        let lattice = Arc::new(lattice);
        let foundation = Foundation::from_primitive(&lattice, &Primitive::new(3, 1, 1)).unwrap();
        System::new(foundation, &SystemModifiers::default()).unwrap()
    }

    fn generator(name: &str, energy: Complex64, from: Vec<i32>, to: Vec<i32>) -> Arc<HoppingGenerator> {
        Arc::new(HoppingGenerator::new(name, energy, move |_, _| {
            HoppingGeneratorResult::new(from.clone(), to.clone())
        }))
    }

    fn entries<S: Copy>(matrix: &nalgebra_sparse::CsrMatrix<S>) -> Vec<(usize, usize, S)> {
        matrix.triplet_iter().map(|(i, j, &v)| (i, j, v)).collect()
    }

    #[test]
    fn test_generator_adds_bonds() {
        let system = chain_system(Complex64::new(0.5, 0.0));
        let mut modifiers = HamiltonianModifiers::default();
        modifiers.add_generator(generator("t2", Complex64::new(0.5, 0.0), vec![0], vec![2]));

        let hamiltonian = HamiltonianT::<f64>::new(&system, &modifiers, Cartesian::zeros()).unwrap();
        assert_eq!(
            entries(hamiltonian.matrix()),
            vec![(0, 1, -1.0), (0, 2, 0.5), (1, 2, -1.0)]
        );
    }

    #[test]
    fn test_reversed_generator_pair_collapses_to_one_entry() {
        let t2 = Complex64::new(0.5, 0.25);
        let system = chain_system(t2);
        let mut modifiers = HamiltonianModifiers::default();
        modifiers.add_generator(generator("t2", t2, vec![2, 0], vec![0, 2]));
        assert!(modifiers.any_complex());

        let hamiltonian =
            HamiltonianT::<Complex64>::new(&system, &modifiers, Cartesian::zeros()).unwrap();
        assert_eq!(hamiltonian.non_zeros(), 3);
        // (2 -> 0) came first and is stored conjugated in the upper triangle
        let (_, _, value) = entries(hamiltonian.matrix())[1];
        assert_eq!(value, t2.conj());
    }

    #[test]
    fn test_structural_bond_wins_over_generator() {
        let system = chain_system(Complex64::new(0.5, 0.0));
        let mut modifiers = HamiltonianModifiers::default();
        modifiers.add_generator(generator("t2", Complex64::new(0.5, 0.0), vec![1], vec![0]));

        let hamiltonian = HamiltonianT::<f64>::new(&system, &modifiers, Cartesian::zeros()).unwrap();
        assert_eq!(entries(hamiltonian.matrix()), vec![(0, 1, -1.0), (1, 2, -1.0)]);
    }

    #[test]
    fn test_invalid_generators() {
        let system = chain_system(Complex64::new(0.5, 0.0));
        let energy = Complex64::new(0.5, 0.0);
        let cases = vec![
            generator("t2", energy, vec![0, 1], vec![2]),
            generator("t2", energy, vec![0], vec![3]),
            generator("t2", energy, vec![-1], vec![0]),
            generator("t2", energy, vec![1], vec![1]),
        ];

        for case in cases {
            let mut modifiers = HamiltonianModifiers::default();
            modifiers.add_generator(case);
            let result = HamiltonianT::<f64>::new(&system, &modifiers, Cartesian::zeros());
            assert!(matches!(result, Err(Error::InvalidGenerator { .. })));
        }

        let mut modifiers = HamiltonianModifiers::default();
        modifiers.add_generator(generator("t3", energy, vec![0], vec![2]));
        let result = HamiltonianT::<f64>::new(&system, &modifiers, Cartesian::zeros());
        assert!(matches!(result, Err(Error::UnknownName { .. })));
    }

    #[test]
    fn test_generator_energy_must_match_lattice() {
        let system = chain_system(Complex64::new(0.5, 0.0));
        let mut modifiers = HamiltonianModifiers::default();
        modifiers.add_generator(generator("t2", Complex64::new(0.0, 7.0), vec![0], vec![2]));

        let result = HamiltonianT::<Complex64>::new(&system, &modifiers, Cartesian::zeros());
        assert!(matches!(result, Err(Error::InvalidGenerator { .. })));
    }

    #[test]
    fn test_modifier_flags() {
        let mut modifiers = HamiltonianModifiers::default();
        assert!(!modifiers.any_complex());
        assert!(!modifiers.any_double());

        let onsite = Arc::new(OnsiteModifier::new(|_, _, _| {}).complex());
        assert!(modifiers.add_onsite(Arc::clone(&onsite)));
        assert!(!modifiers.add_onsite(onsite));
        assert!(modifiers.any_complex());

        modifiers.add_hopping(Arc::new(HoppingModifier::new(|_, _, _, _| {}).double()));
        assert!(modifiers.any_double());

        modifiers.clear();
        assert!(modifiers.is_empty());
        modifiers.add_onsite(Arc::new(force_double_precision()));
        assert!(modifiers.any_double());
        assert!(!modifiers.any_complex());
    }
}
