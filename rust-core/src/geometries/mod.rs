// Geometries module: regions of space that select the sites of a finite system
// Also holds the block (Primitive) and periodicity (TranslationalSymmetry) descriptions

// ======================== MODULE DECLARATIONS ========================
pub mod shape;
pub mod shape_2d;

// Test modules
#[cfg(test)]
mod _tests_shape;

// ======================== SHAPE CONTRACT ========================
pub use shape::Shape; // trait - base trait for all site-selecting shapes
// Shape trait methods:
//   contains(&self, positions: &[Cartesian]) -> Vec<bool>    - containment test, one flag per position
//   vertices(&self) -> Vec<Cartesian>                         - points enclosing the shape (bounds the search)
//   offset(&self) -> Cartesian                                - lattice origin shift (default zero)

// ======================== SHAPE TYPES ========================
pub use shape::{
    FreeformShape, // struct - shape from an arbitrary containment closure
    Line,          // struct - 1D segment
};
pub use shape_2d::{
    Circle,    // struct - 2D circle
    Polygon,   // struct - 2D polygon (arbitrary vertices + regular polygon constructor)
    Rectangle, // struct - 2D rectangle (with rotation support)
};

// FreeformShape impl methods:
//   new(contains: F, vertices: Vec<Cartesian>) -> Self                   - closure + enclosing vertices
//   with_bounding_box(contains: F, width: Cartesian, center: Cartesian) -> Self - box corners as vertices
//   with_offset(self, offset: Cartesian) -> Self                         - builder, lattice origin shift

// Polygon impl methods:
//   new(vertices: Vec<Vector2<f64>>) -> Self                             - creates polygon from vertex list
//   regular(center: Vector2<f64>, radius: f64, sides: usize) -> Self     - creates regular polygon

// ======================== BLOCK & PERIODICITY ========================
pub use shape::{
    Primitive,              // struct - size in unit cells along each lattice vector
    TranslationalSymmetry,  // struct - periodic flags per lattice vector
};
