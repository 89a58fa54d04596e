//! Diffusion MRI analysis utilities.
//!
//! This crate is the user-facing entry point. It re-exports the helpers
//! from `dmri-core` under stable paths; the imaging stages themselves
//! (tensor fitting, tractography, connectivity, classification) are
//! expected to come from dedicated external libraries.
//!
//! # Example
//! ```
//! use dmri_analysis::prelude::*;
//! use ndarray::array;
//!
//! let ratio = safe_divide(&array![1.0, 4.0], &array![0.0, 2.0], 0.0).unwrap();
//! assert_eq!(ratio, array![0.0, 2.0]);
//!
//! let config = load_config("does-not-exist.ini").unwrap();
//! assert!(config.is_empty());
//! ```

pub use dmri_core::{config, error, fs, numerical, profiling, progress, types};
pub use dmri_core::{
    compute_snr, compute_snr_with_noise, ensure_directory, load_config, memory_usage, normalize,
    normalize_data, progress_bar, safe_divide, time_operation, timed, validate_data_shape,
    Configuration, DmriError, NormalizationMethod, Result,
};

// Re-export the array crate so callers use the same version
pub use ndarray;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use dmri_core::prelude::*;
}
