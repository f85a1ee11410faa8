//! Configuration and system parameters for format conversion

use crate::constants::{DEFAULT_HYBRID_PERCENT, DEFAULT_PARALLEL_THRESHOLD, DEFAULT_SCOO_SLICE_SIZE};
use crate::error::{Error, Result};
use crate::matrix::ell::{EllLayout, EllOverflow};
use crate::matrix::hybrid::validate_percent;

/// System parameters for performance tuning
#[derive(Debug, Clone)]
pub struct SystemParameters {
    /// Number of threads to use
    pub n_threads: usize,
    /// ELL slot count (rows × width) from which the parallel fill is used
    pub parallel_threshold: usize,
}

impl Default for SystemParameters {
    fn default() -> Self {
        Self {
            n_threads: num_cpus::get(), // Use all available cores
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl SystemParameters {
    /// Single-threaded parameters
    pub fn serial() -> Self {
        Self {
            n_threads: 1,
            parallel_threshold: usize::MAX,
        }
    }

    /// Whether an ELL of `slots` slots should be filled in parallel
    pub fn use_parallel(&self, slots: usize) -> bool {
        self.n_threads > 1 && slots >= self.parallel_threshold
    }
}

/// Parameters of a conversion pass
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Slot ordering of ELL buffers, including the hybrid head
    pub ell_layout: EllLayout,

    /// Policy of the fixed-width ELL conversion
    pub ell_overflow: EllOverflow,

    /// Fixed ELL width; None uses the longest row
    pub ell_width: Option<usize>,

    /// Share of nonzeros the hybrid ELL head should capture, in percent
    pub hybrid_percent: f64,

    /// Rows per SCOO slice
    pub scoo_slice_size: usize,

    /// System parameters for performance tuning
    pub system_params: SystemParameters,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            ell_layout: EllLayout::RowMajor,
            ell_overflow: EllOverflow::Reject,
            ell_width: None,
            hybrid_percent: DEFAULT_HYBRID_PERCENT,
            scoo_slice_size: DEFAULT_SCOO_SLICE_SIZE,
            system_params: SystemParameters::default(),
        }
    }
}

impl ConversionConfig {
    /// Checks every parameter before any conversion starts
    pub fn validate(&self) -> Result<()> {
        validate_percent(self.hybrid_percent)?;
        if self.scoo_slice_size == 0 {
            return Err(Error::invalid("scoo_slice_size", "must be at least one row"));
        }
        if self.system_params.n_threads == 0 {
            return Err(Error::invalid("n_threads", "must be at least one thread"));
        }
        Ok(())
    }

    /// Config with column-major ELL buffers
    pub fn column_major() -> Self {
        Self {
            ell_layout: EllLayout::ColumnMajor,
            ..Self::default()
        }
    }
}
