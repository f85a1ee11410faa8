// Matrix data structures and format converters

pub mod config;
pub mod coo;
pub mod csr;
pub mod description;
pub mod ell;
pub mod format;
pub mod hybrid;
pub mod meta;
pub mod scoo;
pub mod statistics;

pub use config::{ConversionConfig, SystemParameters};
pub use coo::CooMatrix;
pub use csr::{CsrMatrix, CsrPayload};
pub use description::{IndexBase, MatrixDescription};
pub use ell::{EllLayout, EllMatrix, EllOverflow};
pub use format::SparseFormat;
pub use hybrid::{select_ell_width, HybridMatrix};
pub use meta::MatrixMeta;
pub use scoo::{ScooMatrix, ScooSlice};
pub use statistics::RowStatistics;
