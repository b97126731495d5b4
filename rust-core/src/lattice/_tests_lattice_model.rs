#[cfg(test)]
mod _tests_lattice_model {
    use super::super::lattice_model::{Lattice, MAX_HOPPING_ENERGIES, MAX_SUBLATTICES};
    use crate::error::Error;
    use crate::interfaces::{Cartesian, Index3D};
    use approx::assert_relative_eq;
    use nalgebra::Vector3;
    use num_complex::Complex64;

    fn plane_lattice() -> Lattice {
        Lattice::new(vec![Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0)]).unwrap()
    }

    #[test]
    fn test_vector_count_is_checked() {
        assert!(Lattice::new(vec![]).is_err());
        assert!(Lattice::new(vec![Vector3::x(); 4]).is_err());
        assert_eq!(Lattice::new(vec![Vector3::x(); 3]).unwrap().ndim(), 3);
    }

    #[test]
    fn test_add_sublattice() {
        let mut lattice = plane_lattice();
        assert_eq!(lattice.add_sublattice("A", Cartesian::zeros(), 0.0).unwrap(), 0);
        assert_eq!(lattice.add_sublattice("B", Cartesian::zeros(), 0.0).unwrap(), 1);

        let duplicate = lattice.add_sublattice("A", Cartesian::zeros(), 0.0);
        assert!(matches!(duplicate, Err(Error::DuplicateName { .. })));
        assert_eq!(lattice.sublattices().len(), 2);
        assert_eq!(lattice.sub_id("B"), Some(1));
        assert_eq!(lattice.sub_id("C"), None);
    }

    #[test]
    fn test_sublattice_id_overflow() {
        let mut lattice = plane_lattice();
        for i in 0..MAX_SUBLATTICES {
            lattice
                .add_sublattice(&i.to_string(), Cartesian::zeros(), 0.0)
                .unwrap();
        }
        assert_eq!(lattice.sublattices().len(), 127);

        let overflow = lattice.add_sublattice("overflow", Cartesian::zeros(), 0.0);
        assert!(matches!(overflow, Err(Error::IdOverflow { .. })));
    }

    #[test]
    fn test_hopping_energy_id_overflow() {
        let mut lattice = plane_lattice();
        for i in 0..MAX_HOPPING_ENERGIES {
            lattice.register_hopping_energy(&i.to_string(), 0.0).unwrap();
        }
        let overflow = lattice.register_hopping_energy("overflow", 0.0);
        assert!(matches!(overflow, Err(Error::IdOverflow { .. })));
    }

    #[test]
    fn test_register_hopping_energy() {
        let mut lattice = plane_lattice();
        assert_eq!(lattice.register_hopping_energy("t1", 1.0).unwrap(), 0);
        assert!(!lattice.has_complex_hoppings());

        assert_eq!(
            lattice
                .register_hopping_energy("t2", Complex64::new(1.0, 1.0))
                .unwrap(),
            1
        );
        assert!(lattice.has_complex_hoppings());

        assert!(lattice.register_hopping_energy("t1", 2.0).is_err());
        assert_eq!(lattice.hop_id("t2"), Some(1));
    }

    #[test]
    fn test_add_registered_hopping_records_both_directions() {
        let mut lattice = plane_lattice();
        let a = lattice.add_sublattice("a", Cartesian::zeros(), 0.0).unwrap();
        let b = lattice.add_sublattice("b", Cartesian::zeros(), 0.0).unwrap();
        let t = lattice.register_hopping_energy("t", 1.0).unwrap();

        lattice
            .add_registered_hopping(Index3D::new(1, 0, 0), a, a, t)
            .unwrap();
        assert!(lattice
            .add_registered_hopping(Index3D::new(1, 0, 0), a, a, t)
            .is_err());
        assert_eq!(lattice.hoppings(a)[1].relative_index, Index3D::new(-1, 0, 0));
        assert!(lattice.hoppings(a)[1].is_conjugate);
        assert_eq!(lattice.max_hoppings(), 2);

        lattice
            .add_registered_hopping(Index3D::new(1, 0, 0), a, b, t)
            .unwrap();
        assert_eq!(lattice.hoppings(b)[0].relative_index, Index3D::new(-1, 0, 0));
        assert_eq!(lattice.hoppings(b)[0].to_sublattice, a);
        assert_eq!(lattice.max_hoppings(), 3);

        lattice
            .add_registered_hopping(Index3D::new(1, 0, 0), b, b, t)
            .unwrap();
        assert_eq!(lattice.max_hoppings(), 3);
    }

    #[test]
    fn test_add_registered_hopping_validation() {
        let mut lattice = plane_lattice();
        let a = lattice.add_sublattice("a", Cartesian::zeros(), 0.0).unwrap();
        let t = lattice.register_hopping_energy("t", 1.0).unwrap();

        let self_hop = lattice.add_registered_hopping(Index3D::zeros(), a, a, t);
        assert!(matches!(self_hop, Err(Error::SelfHopping { .. })));

        let bad_sub = lattice.add_registered_hopping(Index3D::new(1, 0, 0), a, 1, t);
        assert!(matches!(bad_sub, Err(Error::SublatticeOutOfRange { .. })));

        let bad_id = lattice.add_registered_hopping(Index3D::new(1, 0, 0), a, a, 1);
        assert!(matches!(bad_id, Err(Error::HoppingOutOfRange { .. })));

        // Failed calls leave nothing behind
        assert_eq!(lattice.max_hoppings(), 0);
    }

    #[test]
    fn test_mirrored_duplicate_is_rejected_without_partial_mutation() {
        let mut lattice = plane_lattice();
        let a = lattice.add_sublattice("a", Cartesian::zeros(), 0.0).unwrap();
        let b = lattice.add_sublattice("b", Cartesian::zeros(), 0.0).unwrap();
        let t = lattice.register_hopping_energy("t", 1.0).unwrap();

        lattice
            .add_registered_hopping(Index3D::new(1, 0, 0), a, b, t)
            .unwrap();
        // (-1, b -> a) is the mirror that already exists
        assert!(lattice
            .add_registered_hopping(Index3D::new(-1, 0, 0), b, a, t)
            .is_err());
        assert_eq!(lattice.hoppings(a).len(), 1);
        assert_eq!(lattice.hoppings(b).len(), 1);
    }

    #[test]
    fn test_add_hopping_by_value_reuses_energy() {
        let mut lattice = plane_lattice();
        let a = lattice.add_sublattice("a", Cartesian::zeros(), 0.0).unwrap();
        let b = lattice.add_sublattice("b", Cartesian::zeros(), 0.0).unwrap();

        let first = lattice.add_hopping(Index3D::new(1, 0, 0), a, a, 1.0).unwrap();
        let second = lattice.add_hopping(Index3D::new(0, 1, 0), a, b, 1.0).unwrap();
        let third = lattice.add_hopping(Index3D::new(0, 1, 0), b, b, 2.0).unwrap();

        assert_eq!(first, second);
        assert_ne!(first, third);
        assert_eq!(lattice.hopping_energies().len(), 2);
        assert!(lattice.hopping_energies()[0].name.starts_with("__anonymous__"));
    }

    #[test]
    fn test_calc_position() {
        let mut lattice = plane_lattice();
        lattice
            .add_sublattice("a", Vector3::new(0.0, 0.0, 0.5), 0.0)
            .unwrap();

        let position = lattice.calc_position(Index3D::new(1, 2, 0), Vector3::new(0.5, 0.0, 0.0), 0);
        assert_relative_eq!(position, Vector3::new(1.5, 2.0, 0.5), epsilon = 1e-12);
    }

    #[test]
    fn test_derived_queries() {
        let mut lattice = plane_lattice();
        lattice.add_sublattice("a", Cartesian::zeros(), 0.0).unwrap();
        assert!(!lattice.has_onsite_energy());
        lattice.add_sublattice("b", Cartesian::zeros(), 0.5).unwrap();
        assert!(lattice.has_onsite_energy());

        let m = lattice.lattice_matrix();
        assert_eq!(m.shape(), (2, 2));
        assert_relative_eq!(m[(0, 0)], 1.0);
        assert_relative_eq!(m[(1, 1)], 1.0);
        assert_relative_eq!(m[(0, 1)], 0.0);
    }
}
