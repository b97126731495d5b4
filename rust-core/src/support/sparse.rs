use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use nalgebra_sparse::CsrMatrix;

use crate::error::Error;

/// Number of stored entries in each row
///
/// With `mirrored`, the matrix is read as the upper triangle of a Hermitian matrix:
/// every off-diagonal entry `(i, j)` also counts towards row `j`. Diagonal entries
/// are counted once.
pub fn nonzeros_per_row<T>(matrix: &CsrMatrix<T>, mirrored: bool) -> Vec<usize> {
    let mut counts = vec![0; matrix.nrows()];
    for (row, col, _) in matrix.triplet_iter() {
        counts[row] += 1;
        if mirrored && row != col && col < counts.len() {
            counts[col] += 1;
        }
    }
    counts
}

/// Row-wise accumulator for building a CSR matrix where the first write to an entry wins
#[derive(Debug, Clone)]
pub struct RowAccumulator<T> {
    rows: Vec<BTreeMap<usize, T>>,
    ncols: usize,
}

impl<T> RowAccumulator<T> {
    pub fn new(nrows: usize, ncols: usize) -> Self {
        Self {
            rows: (0..nrows).map(|_| BTreeMap::new()).collect(),
            ncols,
        }
    }

    /// Insert `value` at `(row, col)` unless the entry is already taken.
    /// Returns `true` if the value was inserted.
    pub fn insert_first(&mut self, row: usize, col: usize, value: T) -> bool {
        match self.rows[row].entry(col) {
            Entry::Vacant(entry) => {
                entry.insert(value);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    pub fn nnz(&self) -> usize {
        self.rows.iter().map(BTreeMap::len).sum()
    }

    /// Entries in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(row, entries)| entries.iter().map(move |(&col, value)| (row, col, value)))
    }

    pub fn into_csr(self) -> Result<CsrMatrix<T>, Error> {
        let nrows = self.rows.len();
        let nnz = self.nnz();
        let mut row_offsets = Vec::with_capacity(nrows + 1);
        let mut col_indices = Vec::with_capacity(nnz);
        let mut values = Vec::with_capacity(nnz);

        row_offsets.push(0);
        for row in self.rows {
            for (col, value) in row {
                col_indices.push(col);
                values.push(value);
            }
            row_offsets.push(col_indices.len());
        }

        let matrix =
            CsrMatrix::try_from_csr_data(nrows, self.ncols, row_offsets, col_indices, values)?;
        Ok(matrix)
    }
}
