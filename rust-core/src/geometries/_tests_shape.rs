#[cfg(test)]
mod _tests_shape {
    use super::super::shape::*;
    use super::super::shape_2d::*;
    use crate::interfaces::Cartesian;
    use nalgebra::Vector2;

    fn points(xy: &[(f64, f64)]) -> Vec<Cartesian> {
        xy.iter().map(|&(x, y)| Cartesian::new(x, y, 0.0)).collect()
    }

    #[test]
    fn test_circle_contains() {
        let circle = Circle::new(Vector2::new(0.0, 0.0), 5.0);
        let inside = circle.contains(&points(&[(0.0, 0.0), (3.0, 4.0), (5.1, 0.0), (4.0, 4.0)]));
        assert_eq!(inside, vec![true, true, false, false]);
        assert_eq!(circle.vertices().len(), 4);
    }

    #[test]
    fn test_rectangle_contains_with_rotation() {
        let rectangle = Rectangle::new(Vector2::zeros(), Vector2::new(4.0, 2.0));
        assert_eq!(
            rectangle.contains(&points(&[(1.9, 0.9), (0.0, 1.5)])),
            vec![true, false]
        );

        let rotated = rectangle.with_rotation(std::f64::consts::FRAC_PI_2);
        assert_eq!(
            rotated.contains(&points(&[(1.9, 0.9), (0.0, 1.5)])),
            vec![false, true]
        );
    }

    #[test]
    fn test_polygon_ray_casting() {
        let triangle = Polygon::new(vec![
            Vector2::new(0.0, 0.0),
            Vector2::new(4.0, 0.0),
            Vector2::new(0.0, 4.0),
        ]);
        assert_eq!(
            triangle.contains(&points(&[(1.0, 1.0), (3.0, 3.0), (-0.5, 1.0)])),
            vec![true, false, false]
        );

        let hexagon = Polygon::regular(Vector2::zeros(), 1.0, 6);
        assert_eq!(hexagon.vertices().len(), 6);
        assert_eq!(hexagon.contains(&points(&[(0.0, 0.0), (0.0, 0.95)])), vec![true, false]);
    }

    #[test]
    fn test_line_and_freeform() {
        let line = Line::new(Cartesian::new(-1.0, 0.0, 0.0), Cartesian::new(1.0, 0.0, 0.0));
        assert_eq!(
            line.contains(&points(&[(0.0, 0.0), (1.5, 0.0)])),
            vec![true, false]
        );

        let half_plane = FreeformShape::with_bounding_box(
            |positions| positions.iter().map(|p| p.x > 0.0).collect(),
            Cartesian::new(2.0, 2.0, 0.0),
            Cartesian::zeros(),
        )
        .with_offset(Cartesian::new(0.5, 0.0, 0.0));
        assert_eq!(half_plane.vertices().len(), 8);
        assert_eq!(half_plane.offset(), Cartesian::new(0.5, 0.0, 0.0));
        assert_eq!(
            half_plane.contains(&points(&[(0.5, 0.0), (-0.5, 0.0)])),
            vec![true, false]
        );
    }

    #[test]
    fn test_symmetry_axes() {
        let symmetry = TranslationalSymmetry::along(&[1]);
        assert_eq!(symmetry.periodic, [false, true, false]);
        assert!(symmetry.is_periodic());
        assert!(!TranslationalSymmetry::default().is_periodic());
        assert_eq!(Primitive::default().size, [1, 1, 1]);
    }
}
