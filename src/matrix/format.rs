//! Behaviour shared by all storage formats

use crate::matrix::meta::MatrixMeta;

/// A sparse storage format that can report its footprint and enumerate its
/// nonzeros
///
/// `triplets` lists real nonzeros only (never ELL padding) in the order the
/// format stores them, which lets callers compare formats entry by entry.
pub trait SparseFormat<T> {
    /// Dimensions and nonzero count of the represented matrix
    fn meta(&self) -> &MatrixMeta;

    /// Short human readable format name
    fn format_name(&self) -> &'static str;

    /// Number of value slots held, padding included
    fn stored_elements(&self) -> usize;

    /// Bytes occupied by all index and value buffers
    fn storage_bytes(&self) -> usize;

    /// Every real `(row, col, value)` entry in storage order
    fn triplets(&self) -> Vec<(usize, usize, T)>;
}
