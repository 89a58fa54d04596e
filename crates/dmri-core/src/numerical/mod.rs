//! Numerical routines over n-dimensional arrays.

pub mod masking;
pub mod normalization;
pub mod signal;
pub mod stability;
pub mod statistics;
pub mod validation;

// Re-export numerical utilities
pub use masking::{count_true, percentile_threshold_mask};
pub use normalization::{normalize, normalize_data, NormalizationMethod};
pub use signal::{compute_snr, compute_snr_with_noise};
pub use stability::{is_finite_array, replace_non_finite, safe_divide};
pub use statistics::{mean, median, median_absolute_deviation, min_max, percentile, std_dev};
pub use validation::{validate_data_shape, validate_dwi_shape};
