//! Numerically safe elementwise operations.
//!
//! Division by zero arising from the data is replaced with a caller-chosen
//! value instead of propagating NaN or infinity.

use crate::{
    error::{DmriError, Result},
    types::Scalar,
};
use ndarray::{Array, ArrayBase, Data, DataMut, Dimension, Zip};
use num_traits::ToPrimitive;

#[cfg(feature = "parallel")]
use crate::types::constants::PARALLEL_THRESHOLD;

/// Elementwise `numerator / denominator` with `default` wherever the
/// denominator is exactly zero.
///
/// The output has the numerator's shape and is always `f64`, whatever the
/// input element types. The denominator may be any shape that broadcasts
/// onto the numerator (equal shapes, a scalar-shaped array, a row, ...).
///
/// Non-zero positions hold the plain quotient, so NaN in either operand
/// still yields NaN there; only zero denominators are masked.
///
/// # Errors
///
/// Returns [`DmriError::DimensionMismatch`] when the denominator cannot be
/// broadcast to the numerator's shape.
///
/// # Example
/// ```
/// use dmri_core::numerical::safe_divide;
/// use ndarray::array;
///
/// let q = safe_divide(&array![1, 2, 3], &array![2, 0, 4], -1.0).unwrap();
/// assert_eq!(q, array![0.5, -1.0, 0.75]);
/// ```
pub fn safe_divide<A, B, S1, S2, D, E>(
    numerator: &ArrayBase<S1, D>,
    denominator: &ArrayBase<S2, E>,
    default: f64,
) -> Result<Array<f64, D>>
where
    A: ToPrimitive + Copy + Send + Sync,
    B: ToPrimitive + Copy + Send + Sync,
    S1: Data<Elem = A>,
    S2: Data<Elem = B>,
    D: Dimension,
    E: Dimension,
{
    let denominator = denominator
        .broadcast(numerator.raw_dim())
        .ok_or_else(|| {
            DmriError::dimension_mismatch(
                format!("{:?}", numerator.shape()),
                format!("{:?}", denominator.shape()),
            )
        })?;

    let divide = |n: &A, d: &B| {
        let d = d.to_f64().unwrap_or(f64::NAN);
        if d == 0.0 {
            default
        } else {
            n.to_f64().unwrap_or(f64::NAN) / d
        }
    };

    let zip = Zip::from(numerator).and(&denominator);

    #[cfg(feature = "parallel")]
    {
        if numerator.len() >= PARALLEL_THRESHOLD && rayon::current_num_threads() > 1 {
            return Ok(zip.par_map_collect(divide));
        }
    }
    Ok(zip.map_collect(divide))
}

/// Replaces every NaN and ±infinity in place, returning how many were hit.
///
/// Typical use is zeroing undefined voxels of an anisotropy map before
/// summarising it.
pub fn replace_non_finite<T, S, D>(data: &mut ArrayBase<S, D>, value: T) -> usize
where
    T: Scalar,
    S: DataMut<Elem = T>,
    D: Dimension,
{
    let mut replaced = 0;
    data.map_inplace(|x| {
        if !x.is_finite() {
            *x = value;
            replaced += 1;
        }
    });
    replaced
}

/// True when no element is NaN or infinite.
pub fn is_finite_array<T, S, D>(data: &ArrayBase<S, D>) -> bool
where
    T: Scalar,
    S: Data<Elem = T>,
    D: Dimension,
{
    data.iter().all(|x| x.is_finite())
}
