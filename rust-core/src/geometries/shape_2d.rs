use nalgebra::{Rotation2, Vector2};

use crate::geometries::shape::Shape;
use crate::interfaces::Cartesian;

// Planar shapes ignore the z coordinate of positions

/// Circle geometry
#[derive(Debug, Clone)]
pub struct Circle {
    pub center: Vector2<f64>,
    pub radius: f64,
    pub offset: Cartesian,
}

impl Circle {
    pub fn new(center: Vector2<f64>, radius: f64) -> Self {
        Self {
            center,
            radius,
            offset: Cartesian::zeros(),
        }
    }

    pub fn with_offset(mut self, offset: Cartesian) -> Self {
        self.offset = offset;
        self
    }
}

impl Shape for Circle {
    fn contains(&self, positions: &[Cartesian]) -> Vec<bool> {
        positions
            .iter()
            .map(|p| (p.xy() - self.center).norm() <= self.radius)
            .collect()
    }

    fn vertices(&self) -> Vec<Cartesian> {
        let r = self.radius;
        [(-r, -r), (r, -r), (r, r), (-r, r)]
            .iter()
            .map(|&(x, y)| Cartesian::new(self.center.x + x, self.center.y + y, 0.0))
            .collect()
    }

    fn offset(&self) -> Cartesian {
        self.offset
    }
}

/// Rectangle geometry (axis-aligned before rotation)
#[derive(Debug, Clone)]
pub struct Rectangle {
    pub center: Vector2<f64>,
    pub size: Vector2<f64>,
    pub rotation: f64,
    pub offset: Cartesian,
}

impl Rectangle {
    pub fn new(center: Vector2<f64>, size: Vector2<f64>) -> Self {
        Self {
            center,
            size,
            rotation: 0.0,
            offset: Cartesian::zeros(),
        }
    }

    pub fn with_rotation(mut self, angle: f64) -> Self {
        self.rotation = angle;
        self
    }

    pub fn with_offset(mut self, offset: Cartesian) -> Self {
        self.offset = offset;
        self
    }
}

impl Shape for Rectangle {
    fn contains(&self, positions: &[Cartesian]) -> Vec<bool> {
        let inverse = Rotation2::new(-self.rotation);
        let half_size = self.size / 2.0;
        positions
            .iter()
            .map(|p| {
                // Transform point to local coordinates
                let local = inverse * (p.xy() - self.center);
                local.x.abs() <= half_size.x && local.y.abs() <= half_size.y
            })
            .collect()
    }

    fn vertices(&self) -> Vec<Cartesian> {
        let rotation = Rotation2::new(self.rotation);
        let half_size = self.size / 2.0;
        [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)]
            .iter()
            .map(|&(sx, sy)| {
                let corner = rotation * Vector2::new(sx * half_size.x, sy * half_size.y) + self.center;
                Cartesian::new(corner.x, corner.y, 0.0)
            })
            .collect()
    }

    fn offset(&self) -> Cartesian {
        self.offset
    }
}

/// Polygon geometry
#[derive(Debug, Clone)]
pub struct Polygon {
    pub vertices: Vec<Vector2<f64>>,
    pub offset: Cartesian,
}

impl Polygon {
    pub fn new(vertices: Vec<Vector2<f64>>) -> Self {
        Self {
            vertices,
            offset: Cartesian::zeros(),
        }
    }

    /// Create a regular polygon
    pub fn regular(center: Vector2<f64>, radius: f64, sides: usize) -> Self {
        let angle_step = 2.0 * std::f64::consts::PI / sides as f64;
        let vertices = (0..sides)
            .map(|i| {
                let angle = i as f64 * angle_step;
                center + Vector2::new(radius * angle.cos(), radius * angle.sin())
            })
            .collect();
        Self::new(vertices)
    }

    pub fn with_offset(mut self, offset: Cartesian) -> Self {
        self.offset = offset;
        self
    }

    fn contains_point(&self, point: Vector2<f64>) -> bool {
        // Use ray casting algorithm
        let mut inside = false;
        let n = self.vertices.len();

        for i in 0..n {
            let v1 = self.vertices[i];
            let v2 = self.vertices[(i + 1) % n];

            if ((v1.y > point.y) != (v2.y > point.y))
                && (point.x < (v2.x - v1.x) * (point.y - v1.y) / (v2.y - v1.y) + v1.x)
            {
                inside = !inside;
            }
        }

        inside
    }
}

impl Shape for Polygon {
    fn contains(&self, positions: &[Cartesian]) -> Vec<bool> {
        positions.iter().map(|p| self.contains_point(p.xy())).collect()
    }

    fn vertices(&self) -> Vec<Cartesian> {
        self.vertices
            .iter()
            .map(|v| Cartesian::new(v.x, v.y, 0.0))
            .collect()
    }

    fn offset(&self) -> Cartesian {
        self.offset
    }
}
