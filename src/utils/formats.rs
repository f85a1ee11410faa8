//! Utilities for converting between our matrix formats and sprs

use num_traits::Num;
use sprs::{CsMat, TriMat};

use crate::error::Result;
use crate::matrix::format::SparseFormat;
use crate::matrix::{CooMatrix, CsrMatrix};

/// Converts our CSR matrix to sprs CsMat format
///
/// sprs requires sorted column indices within each row while our CSR keeps
/// producer order, so the matrix goes through a triplet builder.
pub fn to_sprs_csr<T>(matrix: &CsrMatrix<T>) -> Result<CsMat<T>>
where
    T: Copy + Num + Default,
{
    matrix.require_payload()?;

    let mut triplets = TriMat::with_capacity((matrix.meta.rows, matrix.meta.cols), matrix.nnz());
    for (row, col, val) in matrix.triplets() {
        triplets.add_triplet(row, col, val);
    }

    Ok(triplets.to_csr())
}

/// Converts sprs CsMat (CSR or CSC) to our CSR format
pub fn from_sprs_csr<T>(matrix: CsMat<T>) -> Result<CsrMatrix<T>>
where
    T: Copy + Num + Default,
{
    // Ensure matrix is in CSR format
    let matrix = if matrix.is_csr() {
        matrix
    } else {
        matrix.to_csr()
    };

    let (rows, cols) = matrix.shape();
    let (indptr, indices, data) = matrix.into_raw_storage();

    CsrMatrix::from_raw_parts(rows, cols, indptr, indices, data)
}

/// Copies a COO matrix into a sprs triplet matrix
pub fn coo_to_sprs_triplets<T>(coo: &CooMatrix<T>) -> TriMat<T>
where
    T: Copy + Num,
{
    TriMat::from_triplets(
        (coo.meta.rows, coo.meta.cols),
        coo.rows.clone(),
        coo.cols.clone(),
        coo.data.clone(),
    )
}
