//! Centralized constants for the conversion engine
//!
//! All tunable defaults live here rather than scattered through the
//! converters.

// ============================================================================
// HYBRID SPLIT
// ============================================================================

/// Default share (in percent) of nonzeros captured by the ELL head of a
/// hybrid matrix
pub const DEFAULT_HYBRID_PERCENT: f64 = 90.0;

/// Largest accepted hybrid percent
pub const MAX_HYBRID_PERCENT: f64 = 100.0;

// ============================================================================
// SLICED COO
// ============================================================================

/// Default number of rows grouped into one SCOO slice (one warp worth of rows)
pub const DEFAULT_SCOO_SLICE_SIZE: usize = 32;

// ============================================================================
// PARALLELISM
// ============================================================================

/// Minimum number of ELL slots (rows × width) before the parallel fill pays off
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1 << 16;

/// Rows handled by one rayon task in the row-major ELL fill
pub const PARALLEL_ROW_CHUNK: usize = 1024;

// ============================================================================
// MATRIX MARKET
// ============================================================================

/// Banner that opens every Matrix Market file
pub const MATRIX_MARKET_BANNER: &str = "%%MatrixMarket";

/// Upper bound on the entries reserved up front from a size line; larger
/// files grow the buffer as entries are actually read
pub const MATRIX_MARKET_MAX_RESERVE: usize = 1 << 20;
