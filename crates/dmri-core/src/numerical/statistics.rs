//! Descriptive statistics over n-dimensional arrays.
//!
//! All reductions flatten the array in logical order and ignore its shape.
//! Empty input yields `None` rather than a NaN so callers can tell "no data"
//! apart from "data contained NaN". NaN elements propagate into the result.
//!
//! The mean uses Neumaier-compensated summation, so the error does not grow
//! with the element count (an `f32` volume larger than 2^24 voxels still
//! averages correctly). The standard deviation uses Welford's online update,
//! which yields exactly zero for constant data.

use crate::{
    error::{DmriError, Result},
    types::Scalar,
};
use ndarray::{ArrayBase, Data, Dimension};
use std::cmp::Ordering;

/// Arithmetic mean of all elements.
pub fn mean<T, S, D>(data: &ArrayBase<S, D>) -> Option<T>
where
    T: Scalar,
    S: Data<Elem = T>,
    D: Dimension,
{
    if data.is_empty() {
        return None;
    }
    Some(compensated_sum(data.iter().copied()) / <T as Scalar>::from_usize(data.len()))
}

/// Population standard deviation (divisor `n`).
pub fn std_dev<T, S, D>(data: &ArrayBase<S, D>) -> Option<T>
where
    T: Scalar,
    S: Data<Elem = T>,
    D: Dimension,
{
    if data.is_empty() {
        return None;
    }
    let mut acc = Welford::default();
    for &x in data.iter() {
        acc.update(x);
    }
    Some(acc.population_variance().sqrt())
}

/// Smallest and largest element.
///
/// Returns `(NaN, NaN)` when any element is NaN.
pub fn min_max<T, S, D>(data: &ArrayBase<S, D>) -> Option<(T, T)>
where
    T: Scalar,
    S: Data<Elem = T>,
    D: Dimension,
{
    let mut iter = data.iter();
    let first = *iter.next()?;
    let mut lo = first;
    let mut hi = first;
    for &x in iter {
        if x.is_nan() {
            return Some((T::nan(), T::nan()));
        }
        if x < lo {
            lo = x;
        }
        if x > hi {
            hi = x;
        }
    }
    if first.is_nan() {
        return Some((T::nan(), T::nan()));
    }
    Some((lo, hi))
}

/// Median; the two middle values are averaged for an even count.
pub fn median<T, S, D>(data: &ArrayBase<S, D>) -> Option<T>
where
    T: Scalar,
    S: Data<Elem = T>,
    D: Dimension,
{
    let sorted = sorted_values(data)?;
    Some(median_sorted(&sorted))
}

/// Median of `|x - median(x)|`.
pub fn median_absolute_deviation<T, S, D>(data: &ArrayBase<S, D>) -> Option<T>
where
    T: Scalar,
    S: Data<Elem = T>,
    D: Dimension,
{
    let center = median(data)?;
    let deviations = data.mapv(|x| (x - center).abs());
    median(&deviations)
}

/// Percentile in `[0, 100]` with linear interpolation between closest ranks.
///
/// For sorted values `x[0..n]` the position is `h = (n - 1) * q / 100`;
/// the result interpolates between `x[floor(h)]` and `x[floor(h) + 1]`.
pub fn percentile<T, S, D>(data: &ArrayBase<S, D>, q: T) -> Result<T>
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
    let sorted = sorted_values(data).ok_or_else(|| DmriError::empty_input("percentile"))?;
    Ok(percentile_sorted(&sorted, q / hundred))
}

/// Interpolated quantile `p ∈ [0, 1]` of already sorted values.
pub(crate) fn percentile_sorted<T: Scalar>(sorted: &[T], p: T) -> T {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let h = <T as Scalar>::from_usize(n - 1) * p;
    let j = h.floor().to_usize().unwrap_or(0);
    if j + 1 >= n {
        return sorted[n - 1];
    }
    let g = h - h.floor();
    sorted[j] + g * (sorted[j + 1] - sorted[j])
}

fn median_sorted<T: Scalar>(sorted: &[T]) -> T {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / <T as Scalar>::from_f64(2.0)
    }
}

/// Neumaier's variant of Kahan summation.
fn compensated_sum<T: Scalar>(values: impl Iterator<Item = T>) -> T {
    let mut sum = T::zero();
    let mut c = T::zero();
    for x in values {
        let t = sum + x;
        if sum.abs() >= x.abs() {
            c = c + ((sum - t) + x);
        } else {
            c = c + ((x - t) + sum);
        }
        sum = t;
    }
    // an infinite partial sum turns the compensation into NaN
    if sum.is_finite() {
        sum + c
    } else {
        sum
    }
}

/// Running mean and sum of squared deviations.
#[derive(Default)]
struct Welford<T> {
    count: usize,
    mean: T,
    m2: T,
}

impl<T: Scalar> Welford<T> {
    fn update(&mut self, x: T) {
        self.count += 1;
        let delta = x - self.mean;
        self.mean = self.mean + delta / <T as Scalar>::from_usize(self.count);
        self.m2 = self.m2 + delta * (x - self.mean);
    }

    fn population_variance(&self) -> T {
        self.m2 / <T as Scalar>::from_usize(self.count)
    }
}

/// Flattened, ascending copy of the data. A NaN anywhere yields a single NaN.
fn sorted_values<T, S, D>(data: &ArrayBase<S, D>) -> Option<Vec<T>>
where
    T: Scalar,
    S: Data<Elem = T>,
    D: Dimension,
{
    if data.is_empty() {
        return None;
    }
    if data.iter().any(|x| x.is_nan()) {
        return Some(vec![T::nan()]);
    }
    let mut values: Vec<T> = data.iter().copied().collect();
    values.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    Some(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{array, Array1, Array3};

    #[test]
    fn test_mean_and_std() {
        let x = array![[1.0, 2.0], [3.0, 4.0]];
        assert_relative_eq!(mean(&x).unwrap(), 2.5);
        // population std of 1..=4
        assert_relative_eq!(std_dev(&x).unwrap(), 1.25_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_constant_data_has_zero_std() {
        let x = Array1::from_elem(3, 0.1_f64);
        assert_eq!(std_dev(&x).unwrap(), 0.0);
        let x = Array1::from_elem(10, 184_285.475_209_589_93_f64);
        assert_eq!(std_dev(&x).unwrap(), 0.0);
    }

    #[test]
    fn test_mean_beyond_f32_mantissa() {
        // a naive f32 running sum stalls at 2^24
        let x = Array1::from_elem(20_000_000, 1.0_f32);
        assert_eq!(mean(&x).unwrap(), 1.0);
        assert_eq!(std_dev(&x).unwrap(), 0.0);
    }

    #[test]
    fn test_compensated_sum_cancellation() {
        let x = array![1e16, 1.0, -1e16];
        assert_eq!(compensated_sum(x.iter().copied()), 1.0);
        assert!(compensated_sum([f64::INFINITY, 1.0].into_iter()).is_infinite());
        assert!(mean(&array![1.0, f64::NAN]).unwrap().is_nan());
        assert!(std_dev(&array![1.0, f64::NAN]).unwrap().is_nan());
    }

    #[test]
    fn test_empty_reductions() {
        let x = Array1::<f64>::zeros(0);
        assert!(mean(&x).is_none());
        assert!(std_dev(&x).is_none());
        assert!(median(&x).is_none());
        assert!(min_max(&x).is_none());
        assert!(matches!(
            percentile(&x, 50.0),
            Err(DmriError::EmptyInput { .. })
        ));
    }

    #[test]
    fn test_median_odd_even() {
        assert_eq!(median(&array![3.0, 1.0, 2.0]).unwrap(), 2.0);
        assert_eq!(median(&array![4.0, 1.0, 3.0, 2.0]).unwrap(), 2.5);
    }

    #[test]
    fn test_median_absolute_deviation() {
        // median = 2, deviations = [1, 1, 0, 2, 4] -> MAD = 1
        let x = array![1.0, 3.0, 2.0, 4.0, 6.0];
        assert_eq!(median_absolute_deviation(&x).unwrap(), 1.0);
    }

    #[test]
    fn test_percentile_interpolation() {
        let x = array![1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(percentile(&x, 0.0).unwrap(), 1.0);
        assert_eq!(percentile(&x, 100.0).unwrap(), 5.0);
        assert_eq!(percentile(&x, 50.0).unwrap(), 3.0);
        assert_relative_eq!(percentile(&x, 20.0).unwrap(), 1.8, epsilon = 1e-12);
    }

    #[test]
    fn test_percentile_out_of_range() {
        let x = array![1.0, 2.0];
        assert!(matches!(
            percentile(&x, 101.0),
            Err(DmriError::InvalidParameter { .. })
        ));
        assert!(percentile(&x, -1.0).is_err());
        assert!(percentile(&x, f64::NAN).is_err());
    }

    #[test]
    fn test_min_max_nan() {
        let (lo, hi) = min_max(&array![1.0, f64::NAN, 3.0]).unwrap();
        assert!(lo.is_nan() && hi.is_nan());

        let (lo, hi) = min_max(&array![2.0, -1.0, 7.5]).unwrap();
        assert_eq!((lo, hi), (-1.0, 7.5));
    }

    #[test]
    fn test_reductions_ignore_shape() {
        let volume = Array3::from_shape_fn((2, 3, 4), |(i, j, k)| (i * 12 + j * 4 + k) as f32);
        assert_relative_eq!(mean(&volume).unwrap(), 11.5_f32);
        assert_relative_eq!(median(&volume).unwrap(), 11.5_f32);
    }
}
