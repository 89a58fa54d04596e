//! Array normalization schemes.
//!
//! Three mutually exclusive methods are supported:
//!
//! - **minmax**: `(x - min) / (max - min)`, mapping the data onto `[0, 1]`
//! - **zscore**: `(x - mean) / std`, using the population standard deviation
//! - **robust**: `(x - median) / (1.4826 * MAD)`, where MAD is the median
//!   absolute deviation from the median
//!
//! When the dispersion measure of the chosen method is zero (constant data)
//! the result is an all-zero array of the input's shape.

use crate::{
    error::{DmriError, Result},
    numerical::statistics::{mean, median, median_absolute_deviation, min_max, std_dev},
    types::Scalar,
};
use ndarray::{Array, ArrayBase, Data, Dimension};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Normalization algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum NormalizationMethod {
    /// Rescale onto `[0, 1]` using the data range.
    #[default]
    MinMax,
    /// Center on the mean and divide by the standard deviation.
    ZScore,
    /// Center on the median and divide by the scaled MAD.
    Robust,
}

impl NormalizationMethod {
    /// All supported methods.
    pub const ALL: [NormalizationMethod; 3] = [Self::MinMax, Self::ZScore, Self::Robust];

    /// Canonical lower-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MinMax => "minmax",
            Self::ZScore => "zscore",
            Self::Robust => "robust",
        }
    }
}

impl fmt::Display for NormalizationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NormalizationMethod {
    type Err = DmriError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "minmax" => Ok(Self::MinMax),
            "zscore" => Ok(Self::ZScore),
            "robust" => Ok(Self::Robust),
            other => Err(DmriError::unsupported_method(other)),
        }
    }
}

/// Normalizes `data` with the method named by `method`.
///
/// # Errors
///
/// Returns [`DmriError::UnsupportedMethod`] for any name other than
/// `"minmax"`, `"zscore"` or `"robust"`; the data is never returned
/// unchanged in that case.
///
/// # Example
/// ```
/// use dmri_core::numerical::normalize_data;
/// use ndarray::array;
///
/// let scaled = normalize_data(&array![2.0, 4.0, 6.0], "minmax").unwrap();
/// assert_eq!(scaled, array![0.0, 0.5, 1.0]);
/// assert!(normalize_data(&array![1.0], "bogus").is_err());
/// ```
pub fn normalize_data<T, S, D>(data: &ArrayBase<S, D>, method: &str) -> Result<Array<T, D>>
where
    T: Scalar,
    S: Data<Elem = T>,
    D: Dimension,
{
    let method = method.parse::<NormalizationMethod>()?;
    Ok(normalize(data, method))
}

/// Normalizes `data` with an already validated method.
///
/// Empty input produces an empty array of the same shape.
pub fn normalize<T, S, D>(data: &ArrayBase<S, D>, method: NormalizationMethod) -> Array<T, D>
where
    T: Scalar,
    S: Data<Elem = T>,
    D: Dimension,
{
    if data.is_empty() {
        return Array::zeros(data.raw_dim());
    }

    match method {
        NormalizationMethod::MinMax => {
            let (lo, hi) = min_max(data).unwrap_or((T::zero(), T::zero()));
            rescale(data, lo, hi - lo)
        }
        NormalizationMethod::ZScore => {
            let center = mean(data).unwrap_or_else(T::zero);
            let scale = std_dev(data).unwrap_or_else(T::zero);
            rescale(data, center, scale)
        }
        NormalizationMethod::Robust => {
            let center = median(data).unwrap_or_else(T::zero);
            let mad = median_absolute_deviation(data).unwrap_or_else(T::zero);
            rescale(data, center, T::ROBUST_SCALE * mad)
        }
    }
}

/// `(x - center) / scale`, or zeros when `scale` is exactly zero.
fn rescale<T, S, D>(data: &ArrayBase<S, D>, center: T, scale: T) -> Array<T, D>
where
    T: Scalar,
    S: Data<Elem = T>,
    D: Dimension,
{
    if scale == T::zero() {
        return Array::zeros(data.raw_dim());
    }
    data.mapv(|x| (x - center) / scale)
}
