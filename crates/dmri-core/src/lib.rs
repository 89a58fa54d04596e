//! Numeric and I/O helpers for diffusion MRI analysis pipelines.
//!
//! Tensor fitting, tractography, connectivity graphs and classifiers are
//! provided by external libraries; this crate supplies the small, careful
//! routines such pipelines lean on between those stages.
//!
//! # Modules
//!
//! - [`config`]: Sectioned key/value configuration files
//! - [`error`]: Error type and result alias
//! - [`fs`]: Directory creation
//! - [`numerical`]: Safe division, normalization, SNR, statistics, masks
//! - [`profiling`]: Wall-clock timing and resident memory
//! - [`progress`]: Text progress bars
//! - [`types`]: Scalar trait and numerical constants

pub mod config;
pub mod error;
pub mod fs;
pub mod numerical;
pub mod profiling;
pub mod progress;
pub mod types;

// Re-export commonly used items at the crate root
pub use config::{load_config, Configuration};
pub use error::{DmriError, Result};
pub use fs::ensure_directory;
pub use numerical::{
    compute_snr, compute_snr_with_noise, normalize, normalize_data, safe_divide,
    validate_data_shape, NormalizationMethod,
};
pub use profiling::{memory_usage, time_operation, timed};
pub use progress::progress_bar;

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use dmri_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{load_config, Configuration, DEFAULT_SECTION};
    pub use crate::error::{DmriError, Result};
    pub use crate::fs::ensure_directory;
    pub use crate::numerical::{
        compute_snr, compute_snr_with_noise, count_true, is_finite_array, mean, median,
        median_absolute_deviation, normalize, normalize_data, percentile,
        percentile_threshold_mask, replace_non_finite, safe_divide, std_dev, validate_data_shape,
        validate_dwi_shape, NormalizationMethod,
    };
    pub use crate::profiling::{
        memory_usage, memory_usage_with, time_operation, time_operation_with, timed, timed_with,
        InMemorySink, LogSink, MemoryProbe, ProcStatusProbe, TimingSink, UnavailableProbe,
    };
    pub use crate::progress::{progress_bar, ProgressBar};
    pub use crate::types::{constants, Scalar};
}
