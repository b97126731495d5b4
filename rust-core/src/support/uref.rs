//! Type-erased views over dense and sparse data.
//!
//! A view carries a [`ScalarType`] tag next to borrowed data, so code that does not
//! know the concrete scalar can still pass it around. Reading it back as a concrete
//! slice is checked: asking for the wrong type is an [`Error::TypeMismatch`].

use nalgebra_sparse::CsrMatrix;
use num_complex::{Complex32, Complex64};

use crate::error::Error;
use crate::interfaces::ScalarType;

/// Scalar types that can sit behind a type-erased view
pub trait Element: Copy + Send + Sync + 'static {
    const SCALAR_TYPE: ScalarType;

    fn wrap(data: &[Self]) -> DenseData<'_>;
    fn wrap_mut(data: &mut [Self]) -> DenseDataMut<'_>;
    fn unwrap<'a>(data: &DenseData<'a>) -> Option<&'a [Self]>;
    fn unwrap_mut<'b>(data: &'b mut DenseDataMut<'_>) -> Option<&'b mut [Self]>;

    fn to_complex(self) -> Complex64;
    /// Narrowing conversion: real types keep the real part
    fn from_complex(value: Complex64) -> Self;
}

/// Borrowed data tagged with its scalar type
#[derive(Debug, Clone, Copy)]
pub enum DenseData<'a> {
    F32(&'a [f32]),
    Cf32(&'a [Complex32]),
    F64(&'a [f64]),
    Cf64(&'a [Complex64]),
    I32(&'a [i32]),
}

/// Mutably borrowed data tagged with its scalar type
#[derive(Debug)]
pub enum DenseDataMut<'a> {
    F32(&'a mut [f32]),
    Cf32(&'a mut [Complex32]),
    F64(&'a mut [f64]),
    Cf64(&'a mut [Complex64]),
    I32(&'a mut [i32]),
}

macro_rules! impl_element {
    ($t:ty, $variant:ident, |$c:ident| $narrow:expr, |$v:ident| $widen:expr) => {
        impl Element for $t {
            const SCALAR_TYPE: ScalarType = ScalarType::$variant;

            fn wrap(data: &[Self]) -> DenseData<'_> {
                DenseData::$variant(data)
            }

            fn wrap_mut(data: &mut [Self]) -> DenseDataMut<'_> {
                DenseDataMut::$variant(data)
            }

            fn unwrap<'a>(data: &DenseData<'a>) -> Option<&'a [Self]> {
                match *data {
                    DenseData::$variant(slice) => Some(slice),
                    _ => None,
                }
            }

            fn unwrap_mut<'b>(data: &'b mut DenseDataMut<'_>) -> Option<&'b mut [Self]> {
                match data {
                    DenseDataMut::$variant(slice) => Some(&mut **slice),
                    _ => None,
                }
            }

            fn to_complex(self) -> Complex64 {
                let $v = self;
                $widen
            }

            fn from_complex(value: Complex64) -> Self {
                let $c = value;
                $narrow
            }
        }
    };
}

impl_element!(f32, F32, |c| c.re as f32, |v| Complex64::new(v as f64, 0.0));
impl_element!(
    Complex32,
    Cf32,
    |c| Complex32::new(c.re as f32, c.im as f32),
    |v| Complex64::new(v.re as f64, v.im as f64)
);
impl_element!(f64, F64, |c| c.re, |v| Complex64::new(v, 0.0));
impl_element!(Complex64, Cf64, |c| c, |v| v);
impl_element!(i32, I32, |c| c.re.round() as i32, |v| Complex64::new(v as f64, 0.0));

impl<'a> DenseData<'a> {
    pub fn scalar_type(&self) -> ScalarType {
        match self {
            DenseData::F32(_) => ScalarType::F32,
            DenseData::Cf32(_) => ScalarType::Cf32,
            DenseData::F64(_) => ScalarType::F64,
            DenseData::Cf64(_) => ScalarType::Cf64,
            DenseData::I32(_) => ScalarType::I32,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            DenseData::F32(s) => s.len(),
            DenseData::Cf32(s) => s.len(),
            DenseData::F64(s) => s.len(),
            DenseData::Cf64(s) => s.len(),
            DenseData::I32(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a> DenseDataMut<'a> {
    pub fn scalar_type(&self) -> ScalarType {
        match self {
            DenseDataMut::F32(_) => ScalarType::F32,
            DenseDataMut::Cf32(_) => ScalarType::Cf32,
            DenseDataMut::F64(_) => ScalarType::F64,
            DenseDataMut::Cf64(_) => ScalarType::Cf64,
            DenseDataMut::I32(_) => ScalarType::I32,
        }
    }
}

/// Read-only dense view: `rows x cols` elements in row- or column-major order
#[derive(Debug, Clone, Copy)]
pub struct DenseURef<'a> {
    pub data: DenseData<'a>,
    pub rows: usize,
    pub cols: usize,
    pub is_row_major: bool,
}

impl<'a> DenseURef<'a> {
    /// Column vector view over a slice
    pub fn from_slice<T: Element>(data: &'a [T]) -> Self {
        Self {
            data: T::wrap(data),
            rows: data.len(),
            cols: 1,
            is_row_major: false,
        }
    }

    pub fn scalar_type(&self) -> ScalarType {
        self.data.scalar_type()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Concrete slice, or `TypeMismatch` if `T` is not the stored type
    pub fn as_slice<T: Element>(&self) -> Result<&'a [T], Error> {
        T::unwrap(&self.data).ok_or(Error::TypeMismatch {
            expected: T::SCALAR_TYPE,
            found: self.scalar_type(),
        })
    }

    /// Element `i` widened to complex double precision
    pub fn get(&self, i: usize) -> Complex64 {
        match self.data {
            DenseData::F32(s) => s[i].to_complex(),
            DenseData::Cf32(s) => s[i].to_complex(),
            DenseData::F64(s) => s[i].to_complex(),
            DenseData::Cf64(s) => s[i],
            DenseData::I32(s) => s[i].to_complex(),
        }
    }
}

/// Mutable dense view handed to modifiers
///
/// Modifiers that do not care about the scalar type go through [`DenseURefMut::apply`];
/// those that do can ask for the concrete slice.
#[derive(Debug)]
pub struct DenseURefMut<'a> {
    pub data: DenseDataMut<'a>,
    pub rows: usize,
    pub cols: usize,
    pub is_row_major: bool,
}

impl<'a> DenseURefMut<'a> {
    pub fn from_slice<T: Element>(data: &'a mut [T]) -> Self {
        let rows = data.len();
        Self {
            data: T::wrap_mut(data),
            rows,
            cols: 1,
            is_row_major: false,
        }
    }

    pub fn scalar_type(&self) -> ScalarType {
        self.data.scalar_type()
    }

    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_slice_mut<T: Element>(&mut self) -> Result<&mut [T], Error> {
        let found = self.scalar_type();
        T::unwrap_mut(&mut self.data).ok_or(Error::TypeMismatch {
            expected: T::SCALAR_TYPE,
            found,
        })
    }

    /// Replace every element with `f(index, value)`
    ///
    /// Values are widened to `Complex64` and narrowed back to the stored type, so a
    /// real view keeps only the real part of the result.
    pub fn apply<F>(&mut self, f: F)
    where
        F: FnMut(usize, Complex64) -> Complex64,
    {
        match &mut self.data {
            DenseDataMut::F32(s) => apply_slice(s, f),
            DenseDataMut::Cf32(s) => apply_slice(s, f),
            DenseDataMut::F64(s) => apply_slice(s, f),
            DenseDataMut::Cf64(s) => apply_slice(s, f),
            DenseDataMut::I32(s) => apply_slice(s, f),
        }
    }

    pub fn set_constant(&mut self, value: impl Into<Complex64>) {
        let value = value.into();
        self.apply(|_, _| value);
    }

    pub fn set_zero(&mut self) {
        self.set_constant(0.0);
    }

    /// Element `i` widened to complex double precision
    pub fn get(&self, i: usize) -> Complex64 {
        match &self.data {
            DenseDataMut::F32(s) => s[i].to_complex(),
            DenseDataMut::Cf32(s) => s[i].to_complex(),
            DenseDataMut::F64(s) => s[i].to_complex(),
            DenseDataMut::Cf64(s) => s[i],
            DenseDataMut::I32(s) => s[i].to_complex(),
        }
    }
}

fn apply_slice<T: Element, F>(data: &mut [T], mut f: F)
where
    F: FnMut(usize, Complex64) -> Complex64,
{
    for (i, value) in data.iter_mut().enumerate() {
        *value = T::from_complex(f(i, value.to_complex()));
    }
}

/// Type-erased view of a compressed sparse row matrix
///
/// `inner_indices` are column indices and `outer_starts` the `rows + 1` row offsets.
#[derive(Debug, Clone, Copy)]
pub struct SparseURef<'a> {
    pub values: DenseURef<'a>,
    pub inner_indices: &'a [usize],
    pub outer_starts: &'a [usize],
    pub rows: usize,
    pub cols: usize,
}

impl<'a> SparseURef<'a> {
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    pub fn scalar_type(&self) -> ScalarType {
        self.values.scalar_type()
    }
}

impl<'a, T: Element> From<&'a CsrMatrix<T>> for SparseURef<'a> {
    fn from(matrix: &'a CsrMatrix<T>) -> Self {
        Self {
            values: DenseURef::from_slice(matrix.values()),
            inner_indices: matrix.col_indices(),
            outer_starts: matrix.row_offsets(),
            rows: matrix.nrows(),
            cols: matrix.ncols(),
        }
    }
}
