#[cfg(test)]
mod _tests_sparse {
    use super::super::sparse::*;
    use nalgebra_sparse::{CooMatrix, CsrMatrix};

    fn fixture() -> CsrMatrix<f64> {
        let coo = CooMatrix::try_from_triplets(
            5,
            5,
            vec![0, 0, 2],
            vec![3, 4, 0],
            vec![1.0, 1.0, 1.0],
        )
        .unwrap();
        CsrMatrix::from(&coo)
    }

    // Counts stored entries only. A variant that also reserves a slot for the
    // diagonal of every row would give [3, 0, 1, 1, 1] and [4, 1, 2, 2, 2] here.
    #[test]
    fn test_nonzeros_per_row() {
        let matrix = fixture();
        assert_eq!(nonzeros_per_row(&matrix, false), vec![2, 0, 1, 0, 0]);
        assert_eq!(nonzeros_per_row(&matrix, true), vec![3, 0, 1, 1, 1]);
    }

    #[test]
    fn test_diagonal_is_counted_once_when_mirrored() {
        let coo = CooMatrix::try_from_triplets(2, 2, vec![0, 0], vec![0, 1], vec![1.0, 2.0]).unwrap();
        let matrix = CsrMatrix::from(&coo);
        assert_eq!(nonzeros_per_row(&matrix, true), vec![2, 1]);
    }

    #[test]
    fn test_row_accumulator_first_writer_wins() {
        let mut rows = RowAccumulator::new(3, 3);
        assert!(rows.insert_first(0, 2, 1.0));
        assert!(rows.insert_first(0, 1, 2.0));
        assert!(!rows.insert_first(0, 2, 5.0));
        assert!(rows.insert_first(2, 0, 3.0));
        assert_eq!(rows.nnz(), 3);

        let matrix = rows.into_csr().unwrap();
        assert_eq!(matrix.nnz(), 3);
        assert_eq!(matrix.row_offsets(), &[0, 2, 2, 3]);
        // columns come out sorted within each row
        assert_eq!(matrix.col_indices(), &[1, 2, 0]);
        assert_eq!(matrix.values(), &[2.0, 1.0, 3.0]);
    }
}
