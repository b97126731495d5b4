// Support module: type-erased views and sparse matrix helpers shared by the system and Hamiltonian builders

// ======================== MODULE DECLARATIONS ========================
pub mod sparse;
pub mod uref;

// Test modules
#[cfg(test)]
mod _tests_sparse;

// ======================== TYPE-ERASED VIEWS ========================
pub use uref::{
    DenseData,    // enum - borrowed slice tagged with its ScalarType
    DenseDataMut, // enum - mutably borrowed slice tagged with its ScalarType
    DenseURef,    // struct - read-only dense view (data, rows, cols, is_row_major)
    DenseURefMut, // struct - mutable dense view handed to onsite/hopping modifiers
    Element,      // trait - f32, Complex32, f64, Complex64, i32
    SparseURef,   // struct - CSR view (values, inner_indices, outer_starts, rows, cols)
};
// DenseURef impl methods:
//   as_slice::<T>(&self) -> Result<&[T]>                     - checked downcast, TypeMismatch otherwise
//   get(&self, i: usize) -> Complex64                        - element widened to complex
// DenseURefMut impl methods:
//   as_slice_mut::<T>(&mut self) -> Result<&mut [T]>         - checked downcast
//   apply(&mut self, f: FnMut(usize, Complex64) -> Complex64) - type-agnostic in-place update
//   set_constant(&mut self, value) / set_zero(&mut self)     - fill helpers

// ======================== SPARSE HELPERS ========================
pub use sparse::{
    nonzeros_per_row, // fn(matrix: &CsrMatrix<T>, mirrored: bool) -> Vec<usize> - per-row entry counts
    RowAccumulator,   // struct - first-writer-wins row-wise CSR builder
};
