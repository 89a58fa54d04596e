//! Shape checks for imaging arrays.

use crate::types::constants::DWI_DIMS;
use ndarray::{ArrayBase, Dimension, RawData};

/// True iff `data` has exactly `expected_dims` axes.
pub fn validate_data_shape<S, D>(data: &ArrayBase<S, D>, expected_dims: usize) -> bool
where
    S: RawData,
    D: Dimension,
{
    data.ndim() == expected_dims
}

/// True iff `data` is shaped like a diffusion-weighted series (x, y, z, volumes).
pub fn validate_dwi_shape<S, D>(data: &ArrayBase<S, D>) -> bool
where
    S: RawData,
    D: Dimension,
{
    validate_data_shape(data, DWI_DIMS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array, Array3, Array4, IxDyn};

    #[test]
    fn test_validate_data_shape() {
        let dwi = Array4::<f32>::zeros((4, 4, 3, 10));
        assert!(validate_data_shape(&dwi, 4));
        assert!(!validate_data_shape(&dwi, 3));
        assert!(validate_dwi_shape(&dwi));

        let b0 = Array3::<f32>::zeros((4, 4, 3));
        assert!(!validate_dwi_shape(&b0));
        assert!(validate_data_shape(&b0.view(), 3));
    }

    #[test]
    fn test_dynamic_rank() {
        let x = Array::<f64, _>::zeros(IxDyn(&[2, 2, 2, 2, 2]));
        assert!(validate_data_shape(&x, 5));
        assert!(!validate_dwi_shape(&x));
    }
}
