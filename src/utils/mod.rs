//! Utility functions and helpers

pub mod formats;

pub use formats::{coo_to_sprs_triplets, from_sprs_csr, to_sprs_csr};

use crate::error::{Error, Result};

/// Computes an exclusive prefix sum (scan) for a vector
///
/// The result has `input.len() + 1` entries; the last one is the total.
/// The output buffer is reserved fallibly, like [`try_filled`].
pub fn exclusive_scan(input: &[usize]) -> Result<Vec<usize>> {
    let len = input.len().checked_add(1).ok_or(Error::Allocation {
        elements: usize::MAX,
    })?;
    let mut result = Vec::new();
    result
        .try_reserve_exact(len)
        .map_err(|_| Error::Allocation { elements: len })?;
    let mut sum = 0;

    result.push(0); // First element is always 0

    for &val in input {
        sum += val;
        result.push(sum);
    }

    Ok(result)
}

/// Multiplies two buffer dimensions, failing with `Allocation` on overflow
pub fn checked_slots(rows: usize, width: usize) -> Result<usize> {
    rows.checked_mul(width).ok_or(Error::Allocation {
        elements: usize::MAX,
    })
}

/// Allocates a buffer of exactly `len` copies of `fill`
///
/// The reservation is attempted before anything is written so an oversized
/// request surfaces as `Error::Allocation` instead of an abort.
pub fn try_filled<T: Clone>(len: usize, fill: T) -> Result<Vec<T>> {
    let bytes = len.checked_mul(std::mem::size_of::<T>().max(1));
    if bytes.map_or(true, |b| b > isize::MAX as usize) {
        return Err(Error::Allocation { elements: len });
    }

    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| Error::Allocation { elements: len })?;
    buffer.resize(len, fill);
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exclusive_scan() {
        let input = vec![1, 2, 3, 4];
        let expected = vec![0, 1, 3, 6, 10];
        assert_eq!(exclusive_scan(&input).unwrap(), expected);

        let input = vec![0, 0, 5, 0];
        let expected = vec![0, 0, 0, 5, 5];
        assert_eq!(exclusive_scan(&input).unwrap(), expected);

        assert_eq!(exclusive_scan(&[]).unwrap(), vec![0]);
    }

    #[test]
    fn test_checked_slots_overflow() {
        assert_eq!(checked_slots(4, 3).unwrap(), 12);
        assert!(matches!(
            checked_slots(usize::MAX, 2),
            Err(Error::Allocation { .. })
        ));
    }

    #[test]
    fn test_try_filled_rejects_huge_request() {
        let small = try_filled(3, 7u32).unwrap();
        assert_eq!(small, vec![7, 7, 7]);

        let huge = try_filled::<f64>(usize::MAX / 4, 0.0);
        assert!(matches!(huge, Err(Error::Allocation { .. })));
    }

    #[test]
    fn test_huge_declared_row_count_is_allocation_error() {
        use crate::matrix::{CsrMatrix, CsrPayload, MatrixDescription};

        for rows in [usize::MAX, usize::MAX / 2, isize::MAX as usize] {
            let desc = MatrixDescription::<f64>::new(rows, 1, vec![]);
            for payload in [CsrPayload::RowPtrOnly, CsrPayload::Full] {
                let built = CsrMatrix::from_description(&desc, payload);
                assert!(matches!(built, Err(Error::Allocation { .. })));
            }
        }

        let raw = CsrMatrix::<f64>::from_raw_parts(usize::MAX, 1, vec![0], vec![], vec![]);
        assert!(matches!(raw, Err(Error::Allocation { .. })));
    }
}
