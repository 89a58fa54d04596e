//! Intensity-threshold masks for imaging volumes.

use crate::{
    error::{DmriError, Result},
    numerical::statistics::percentile,
    types::Scalar,
};
use ndarray::{Array, Array1, ArrayBase, Data, Dimension};
use tracing::debug;

/// Boolean mask of voxels brighter than a percentile of the positive voxels.
///
/// The threshold is the `q`-th percentile (0..=100) computed over the
/// strictly positive elements only, so zero-filled background does not
/// drag it down. The mask keeps the volume's shape and marks
/// `volume > threshold`.
///
/// # Errors
///
/// - [`DmriError::InvalidParameter`] if `q` is outside `[0, 100]`.
/// - [`DmriError::EmptyInput`] if no element is positive.
pub fn percentile_threshold_mask<T, S, D>(volume: &ArrayBase<S, D>, q: T) -> Result<Array<bool, D>>
where
    T: Scalar,
    S: Data<Elem = T>,
    D: Dimension,
{
    let hundred = <T as Scalar>::from_f64(100.0);
    if !(q >= T::zero() && q <= hundred) {
        return Err(DmriError::invalid_parameter(format!(
            "percentile must lie in [0, 100], got {}",
            q
        )));
    }
    let positive: Array1<T> = volume.iter().copied().filter(|&x| x > T::zero()).collect();
    if positive.is_empty() {
        return Err(DmriError::empty_input("percentile_threshold_mask"));
    }
    let threshold = percentile(&positive, q)?;
    let mask = volume.mapv(|x| x > threshold);
    debug!(
        threshold = Scalar::to_f64(threshold),
        voxels = count_true(&mask),
        "threshold mask computed"
    );
    Ok(mask)
}

/// Number of `true` elements in a mask.
pub fn count_true<S, D>(mask: &ArrayBase<S, D>) -> usize
where
    S: Data<Elem = bool>,
    D: Dimension,
{
    mask.iter().filter(|&&m| m).count()
}
