//! Integration tests for conversions from CSR into the derived formats

use spmv_formats::{
    convert_all, to_sprs_csr, ConversionConfig, CooMatrix, CsrMatrix, EllLayout, EllMatrix,
    EllOverflow, Error, ScooMatrix, SparseFormat, SystemParameters,
};

/// Creates a test matrix with a specific pattern
fn create_test_matrix_csr() -> CsrMatrix<f64> {
    // Create a 5x5 matrix with a specific pattern:
    // [ 1.0  0.0  2.0  0.0  0.0 ]
    // [ 0.0  3.0  0.0  0.0  4.0 ]
    // [ 0.0  0.0  5.0  0.0  0.0 ]
    // [ 6.0  0.0  0.0  7.0  0.0 ]
    // [ 0.0  0.0  8.0  0.0  9.0 ]
    CsrMatrix::from_raw_parts(
        5,
        5,
        vec![0, 2, 4, 5, 7, 9],
        vec![0, 2, 1, 4, 2, 0, 3, 2, 4],
        vec![1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0],
    )
    .unwrap()
}

/// Creates a tridiagonal matrix in CSR format
fn create_tridiagonal_csr(n: usize) -> CsrMatrix<f64> {
    let mut row_ptr = Vec::with_capacity(n + 1);
    let mut columns = Vec::new();
    let mut data = Vec::new();

    row_ptr.push(0);

    for i in 0..n {
        // Lower diagonal
        if i > 0 {
            columns.push(i - 1);
            data.push(1.0f64);
        }

        // Diagonal
        columns.push(i);
        data.push(2.0f64);

        // Upper diagonal
        if i < n - 1 {
            columns.push(i + 1);
            data.push(1.0f64);
        }

        row_ptr.push(columns.len());
    }

    CsrMatrix::from_raw_parts(n, n, row_ptr, columns, data).unwrap()
}

fn sorted<T: PartialOrd + Copy>(mut triplets: Vec<(usize, usize, T)>) -> Vec<(usize, usize, T)> {
    triplets.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
    triplets
}

#[test]
fn test_ell_two_row_padding() {
    let csr = CsrMatrix::from_raw_parts(2, 3, vec![0, 2, 3], vec![0, 2, 1], vec![1.0, 2.0, 3.0])
        .unwrap();
    let ell = EllMatrix::with_width(&csr, 2, EllLayout::RowMajor, EllOverflow::Reject).unwrap();

    let data = ell.data_view().unwrap();
    let columns = ell.columns_view().unwrap();
    assert_eq!(data.row(0).to_vec(), vec![1.0, 2.0]);
    assert_eq!(data.row(1).to_vec(), vec![3.0, 0.0]);
    assert_eq!(columns.row(0).to_vec(), vec![0, 2]);
    assert_eq!(columns.row(1).to_vec(), vec![1, 3]);
}

#[test]
fn test_ell_preserves_triplets() {
    let csr = create_test_matrix_csr();

    for layout in [EllLayout::RowMajor, EllLayout::ColumnMajor] {
        let ell = EllMatrix::from_csr(&csr, layout).unwrap();

        assert_eq!(ell.elements_in_rows, 2);
        assert_eq!(ell.stored_elements(), 10);
        assert_eq!(ell.triplets(), csr.triplets());
    }
}

#[test]
fn test_ell_memory_estimate() {
    let csr = create_tridiagonal_csr(100);

    assert_eq!(EllMatrix::estimate_size(&csr).unwrap(), 300);
    let ell = EllMatrix::from_csr(&csr, EllLayout::ColumnMajor).unwrap();
    assert_eq!(ell.data.len(), 300);
    // First and last rows carry one padded slot each
    assert_eq!(ell.stored_nonzeros(), csr.nnz());
    assert_eq!(ell.get(0, 2), (100, 0.0));
    assert_eq!(ell.get(99, 2), (100, 0.0));
}

#[test]
fn test_coo_matches_sprs() {
    let csr = create_test_matrix_csr();
    let coo = CooMatrix::from_csr(&csr).unwrap();

    let via_coo: sprs::CsMat<f64> = spmv_formats::coo_to_sprs_triplets(&coo).to_csr();
    let direct = to_sprs_csr(&csr).unwrap();

    assert_eq!(via_coo.to_dense(), direct.to_dense());
}

#[test]
fn test_scoo_concatenation_is_csr_order() {
    let csr = create_tridiagonal_csr(50);

    for slice_size in [1, 3, 7, 32, 50, 64] {
        let scoo = ScooMatrix::from_csr(&csr, slice_size).unwrap();

        assert_eq!(scoo.elements_count(), csr.nnz());
        assert_eq!(scoo.slices_count(), 50usize.div_ceil(slice_size));
        assert_eq!(scoo.triplets(), csr.triplets());

        for slice in scoo.slices() {
            assert!(slice
                .r_index
                .iter()
                .all(|&r| r >= slice.first_row && r < slice.first_row + slice.row_count));
        }
    }
}

#[test]
fn test_convert_all_serial_and_parallel_agree() {
    let csr = create_tridiagonal_csr(5000);

    let serial = ConversionConfig {
        system_params: SystemParameters::serial(),
        ..ConversionConfig::column_major()
    };
    let parallel = ConversionConfig {
        system_params: SystemParameters {
            n_threads: 4,
            parallel_threshold: 0,
        },
        ..ConversionConfig::column_major()
    };

    let a = convert_all(&csr, &serial).unwrap();
    let b = convert_all(&csr, &parallel).unwrap();

    assert_eq!(a.ell.data, b.ell.data);
    assert_eq!(a.ell.columns, b.ell.columns);
    assert_eq!(a.coo.triplets(), b.coo.triplets());
    assert_eq!(sorted(a.hybrid.triplets()), sorted(csr.triplets()));
}

#[test]
fn test_convert_all_rejects_bad_config() {
    let csr = create_test_matrix_csr();
    let config = ConversionConfig {
        hybrid_percent: -5.0,
        ..ConversionConfig::default()
    };

    assert!(convert_all(&csr, &config).is_err());
}

#[test]
fn test_convert_all_fixed_width_overflow() {
    let csr = create_test_matrix_csr();

    for system_params in [
        SystemParameters::serial(),
        SystemParameters {
            n_threads: 2,
            parallel_threshold: 0,
        },
    ] {
        let reject = ConversionConfig {
            ell_width: Some(1),
            system_params: system_params.clone(),
            ..ConversionConfig::default()
        };
        assert!(matches!(
            convert_all(&csr, &reject),
            Err(Error::RowOverflow {
                row: 0,
                length: 2,
                width: 1
            })
        ));

        let truncate = ConversionConfig {
            ell_overflow: EllOverflow::Truncate,
            ..reject
        };
        let formats = convert_all(&csr, &truncate).unwrap();
        assert_eq!(formats.ell.elements_in_rows, 1);
        assert_eq!(formats.ell.stored_nonzeros(), 5);
        assert_eq!(formats.coo.elements_count(), csr.nnz());
    }
}

#[test]
fn test_footprints() {
    let csr = create_test_matrix_csr();
    let formats = convert_all(&csr, &ConversionConfig::default()).unwrap();

    let word = std::mem::size_of::<usize>();
    assert_eq!(csr.storage_bytes(), 9 * 8 + (9 + 6) * word);
    assert_eq!(formats.coo.storage_bytes(), 9 * 8 + 18 * word);
    assert_eq!(formats.ell.storage_bytes(), 10 * 8 + 10 * word);
    assert_eq!(formats.scoo.format_name(), "SCOO");
}
