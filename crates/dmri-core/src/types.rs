//! Scalar trait and numerical constants.
//!
//! Floating-point routines in this crate are generic over [`Scalar`],
//! which is implemented for `f32` and `f64`.

use num_traits::{Float, FromPrimitive, ToPrimitive};
use std::fmt::{Debug, Display};

/// Trait for floating-point element types (f32 or f64).
pub trait Scalar:
    Float + FromPrimitive + ToPrimitive + Display + Debug + Default + Send + Sync + 'static
{
    /// Machine epsilon for this scalar type.
    const EPSILON: Self;

    /// Consistency constant turning the median absolute deviation into a
    /// standard-deviation estimate for normally distributed data.
    const ROBUST_SCALE: Self;

    /// Convert from f64 (for constants).
    ///
    /// # Panics
    ///
    /// Panics if the conversion fails, which cannot happen for f32/f64.
    fn from_f64(v: f64) -> Self {
        <Self as FromPrimitive>::from_f64(v).expect("Failed to convert from f64")
    }

    /// Convert from usize (for element counts).
    fn from_usize(v: usize) -> Self {
        <Self as FromPrimitive>::from_usize(v).expect("Failed to convert from usize")
    }

    /// Convert to f64 (for logging/display).
    fn to_f64(self) -> f64 {
        num_traits::cast(self).expect("Failed to convert to f64")
    }
}

impl Scalar for f32 {
    const EPSILON: Self = f32::EPSILON;
    const ROBUST_SCALE: Self = constants::MAD_TO_STD as f32;
}

impl Scalar for f64 {
    const EPSILON: Self = f64::EPSILON;
    const ROBUST_SCALE: Self = constants::MAD_TO_STD;
}

/// Numerical constants shared across modules.
pub mod constants {
    /// MAD-to-standard-deviation factor, 1 / Φ⁻¹(3/4) rounded to four places.
    pub const MAD_TO_STD: f64 = 1.4826;

    /// Rank of a diffusion-weighted series: x, y, z, volumes.
    pub const DWI_DIMS: usize = 4;

    /// Element count above which elementwise kernels run on the rayon pool.
    pub const PARALLEL_THRESHOLD: usize = 1 << 16;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_constants() {
        assert_eq!(<f64 as Scalar>::ROBUST_SCALE, 1.4826);
        assert!((<f32 as Scalar>::ROBUST_SCALE - 1.4826_f32).abs() < 1e-6);
        assert_eq!(<f64 as Scalar>::EPSILON, f64::EPSILON);
    }

    #[test]
    fn test_conversions() {
        assert_eq!(<f32 as Scalar>::from_f64(0.5), 0.5_f32);
        assert_eq!(<f64 as Scalar>::from_usize(12), 12.0);
        assert_eq!(Scalar::to_f64(2.5_f32), 2.5);
    }
}
