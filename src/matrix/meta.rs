//! Matrix descriptor shared by every storage format

use crate::error::{Error, Result};

/// Dimensions and nonzero count of a sparse matrix
///
/// Every representation holds its own copy, so each format is
/// self-describing and can be dropped independently of the CSR it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixMeta {
    /// Number of rows in the matrix
    pub rows: usize,
    /// Number of columns in the matrix
    pub cols: usize,
    /// Number of stored nonzeros
    pub non_zero_count: usize,
}

impl MatrixMeta {
    /// Creates a descriptor, checking `non_zero_count <= rows * cols`
    pub fn new(rows: usize, cols: usize, non_zero_count: usize) -> Result<Self> {
        // An overflowing product is larger than any representable nnz.
        if let Some(capacity) = rows.checked_mul(cols) {
            if non_zero_count > capacity {
                return Err(Error::invalid(
                    "non_zero_count",
                    format!(
                        "{} nonzeros do not fit a {} × {} matrix",
                        non_zero_count, rows, cols
                    ),
                ));
            }
        }

        Ok(Self {
            rows,
            cols,
            non_zero_count,
        })
    }

    /// Fraction of cells that hold a nonzero
    pub fn density(&self) -> f64 {
        if self.rows == 0 || self.cols == 0 {
            return 0.0;
        }
        self.non_zero_count as f64 / (self.rows as f64 * self.cols as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_rejects_too_many_nonzeros() {
        assert!(MatrixMeta::new(2, 2, 4).is_ok());
        assert!(matches!(
            MatrixMeta::new(2, 2, 5),
            Err(Error::InvalidParameter { name: "non_zero_count", .. })
        ));
    }

    #[test]
    fn test_density() {
        let meta = MatrixMeta::new(4, 5, 5).unwrap();
        assert!((meta.density() - 0.25).abs() < 1e-12);
        assert_eq!(MatrixMeta::new(0, 3, 0).unwrap().density(), 0.0);
    }
}
