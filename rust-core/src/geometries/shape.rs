use std::fmt;

use crate::interfaces::Cartesian;

/// Region of space which selects the sites of a finite system
///
/// `vertices` only need to enclose the shape: they bound the lattice-space search
/// for candidate sites. `contains` then decides per site.
pub trait Shape: fmt::Debug + Send + Sync {
    /// Containment test for every position, in order
    fn contains(&self, positions: &[Cartesian]) -> Vec<bool>;

    /// Points enclosing the shape
    fn vertices(&self) -> Vec<Cartesian>;

    /// Shift applied to the lattice origin when sites are enumerated inside this shape
    fn offset(&self) -> Cartesian {
        Cartesian::zeros()
    }
}

type ContainsFn = dyn Fn(&[Cartesian]) -> Vec<bool> + Send + Sync;

/// Shape defined by an arbitrary containment function
pub struct FreeformShape {
    contains: Box<ContainsFn>,
    vertices: Vec<Cartesian>,
    offset: Cartesian,
}

impl FreeformShape {
    pub fn new<F>(contains: F, vertices: Vec<Cartesian>) -> Self
    where
        F: Fn(&[Cartesian]) -> Vec<bool> + Send + Sync + 'static,
    {
        Self {
            contains: Box::new(contains),
            vertices,
            offset: Cartesian::zeros(),
        }
    }

    /// Axis-aligned box of `width` centered on `center` as the enclosing vertices
    pub fn with_bounding_box<F>(contains: F, width: Cartesian, center: Cartesian) -> Self
    where
        F: Fn(&[Cartesian]) -> Vec<bool> + Send + Sync + 'static,
    {
        let half = width / 2.0;
        let vertices = (0..8)
            .map(|corner| {
                let sign = |bit: usize| if corner & (1 << bit) != 0 { 1.0 } else { -1.0 };
                center + Cartesian::new(sign(0) * half.x, sign(1) * half.y, sign(2) * half.z)
            })
            .collect();
        Self::new(contains, vertices)
    }

    pub fn with_offset(mut self, offset: Cartesian) -> Self {
        self.offset = offset;
        self
    }
}

impl fmt::Debug for FreeformShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FreeformShape")
            .field("vertices", &self.vertices)
            .field("offset", &self.offset)
            .finish_non_exhaustive()
    }
}

impl Shape for FreeformShape {
    fn contains(&self, positions: &[Cartesian]) -> Vec<bool> {
        (self.contains)(positions)
    }

    fn vertices(&self) -> Vec<Cartesian> {
        self.vertices.clone()
    }

    fn offset(&self) -> Cartesian {
        self.offset
    }
}

/// Segment between two points, for 1D lattices
#[derive(Debug, Clone)]
pub struct Line {
    pub start: Cartesian,
    pub end: Cartesian,
}

impl Line {
    pub fn new(start: Cartesian, end: Cartesian) -> Self {
        Self { start, end }
    }
}

impl Shape for Line {
    fn contains(&self, positions: &[Cartesian]) -> Vec<bool> {
        let direction = self.end - self.start;
        let length_squared = direction.norm_squared();
        positions
            .iter()
            .map(|p| {
                // projection onto the segment; the perpendicular distance is not checked
                let t = (p - self.start).dot(&direction) / length_squared;
                (0.0..=1.0).contains(&t)
            })
            .collect()
    }

    fn vertices(&self) -> Vec<Cartesian> {
        vec![self.start, self.end]
    }
}

/// Block of unit cells centered on the origin: `size[i]` cells along lattice vector `i`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Primitive {
    pub size: [i32; 3],
}

impl Primitive {
    pub fn new(a1: i32, a2: i32, a3: i32) -> Self {
        Self { size: [a1, a2, a3] }
    }
}

impl Default for Primitive {
    fn default() -> Self {
        Self::new(1, 1, 1)
    }
}

/// Lattice directions along which the system repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TranslationalSymmetry {
    pub periodic: [bool; 3],
}

impl TranslationalSymmetry {
    pub fn new(a1: bool, a2: bool, a3: bool) -> Self {
        Self {
            periodic: [a1, a2, a3],
        }
    }

    /// Periodic along the given lattice vector indices
    pub fn along(axes: &[usize]) -> Self {
        let mut periodic = [false; 3];
        for &axis in axes.iter().filter(|&&axis| axis < 3) {
            periodic[axis] = true;
        }
        Self { periodic }
    }

    pub fn is_periodic(&self) -> bool {
        self.periodic.iter().any(|&p| p)
    }
}
