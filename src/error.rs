//! Error types for format conversion

use thiserror::Error;

/// Result type alias using the crate's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Which index of an entry violated its bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Row => write!(f, "row"),
            Axis::Column => write!(f, "column"),
        }
    }
}

/// Errors that can occur while building or converting a sparse matrix
#[derive(Error, Debug)]
pub enum Error {
    /// A row or column index exceeds the declared dimensions
    #[error("{axis} index {index} out of range (bound {bound})")]
    OutOfRange {
        /// Offending axis
        axis: Axis,
        /// The index as supplied, before base normalisation
        index: usize,
        /// Declared dimension along that axis
        bound: usize,
    },

    /// A conversion parameter is outside its valid domain
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// The parameter name
        name: &'static str,
        /// Why it was rejected
        reason: String,
    },

    /// A buffer of the requested size cannot be allocated
    #[error("Cannot allocate buffer of {elements} elements")]
    Allocation {
        /// Requested element count, saturated at usize::MAX on overflow
        elements: usize,
    },

    /// A row does not fit a fixed ELL width and the policy forbids truncation
    #[error("Row {row} holds {length} entries but the ELL width is {width}")]
    RowOverflow {
        row: usize,
        length: usize,
        width: usize,
    },

    /// The CSR was built in row_ptr-only mode
    #[error("CSR matrix carries no column/value payload")]
    MissingPayload,

    /// Malformed Matrix Market input
    #[error("Parse error at line {line}: {reason}")]
    Parse {
        /// One-based line number
        line: usize,
        reason: String,
    },

    /// I/O failure while reading or writing a matrix file
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
