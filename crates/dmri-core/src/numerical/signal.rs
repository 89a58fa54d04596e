//! Signal quality measures.

use crate::{
    numerical::statistics::{mean, std_dev},
    types::Scalar,
};
use ndarray::{ArrayBase, Data, Dimension};

/// Signal-to-noise ratio using the signal's own spread as the noise level.
///
/// Returns `mean(signal) / std(signal)`, or positive infinity when the
/// standard deviation is exactly zero. An empty signal yields NaN.
pub fn compute_snr<T, S, D>(signal: &ArrayBase<S, D>) -> T
where
    T: Scalar,
    S: Data<Elem = T>,
    D: Dimension,
{
    snr_from_level(signal, std_dev(signal))
}

/// Signal-to-noise ratio against a separate noise sample.
///
/// Returns `mean(signal) / std(noise)`, or positive infinity when the
/// noise standard deviation is exactly zero. The two arrays need not share
/// a shape; a background region is typically much smaller than the signal.
pub fn compute_snr_with_noise<T, S1, S2, D1, D2>(
    signal: &ArrayBase<S1, D1>,
    noise: &ArrayBase<S2, D2>,
) -> T
where
    T: Scalar,
    S1: Data<Elem = T>,
    S2: Data<Elem = T>,
    D1: Dimension,
    D2: Dimension,
{
    snr_from_level(signal, std_dev(noise))
}

fn snr_from_level<T, S, D>(signal: &ArrayBase<S, D>, noise_level: Option<T>) -> T
where
    T: Scalar,
    S: Data<Elem = T>,
    D: Dimension,
{
    let noise_level = noise_level.unwrap_or_else(T::nan);
    if noise_level == T::zero() {
        return T::infinity();
    }
    mean(signal).unwrap_or_else(T::nan) / noise_level
}
