//! Tests for timing, memory reporting and directory handling as a pipeline
//! would use them.

use dmri_core::prelude::*;
use dmri_core::profiling::memory::UNAVAILABLE_MESSAGE;
use ndarray::Array4;
use rand::{rngs::SmallRng, SeedableRng};
use rand_distr::{Distribution, Normal};
use std::time::Duration;

fn synthetic_dwi(seed: u64) -> Array4<f64> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let noise = Normal::<f64>::new(0.0, 5.0).unwrap();
    Array4::from_shape_fn((6, 6, 4, 5), |(x, y, z, v)| {
        let inside = (1..5).contains(&x) && (1..5).contains(&y) && z > 0;
        let base = if inside { 400.0 / (1.0 + v as f64) } else { 0.0 };
        base + noise.sample(&mut rng).abs()
    })
}

#[test]
fn test_timed_stage_passes_result_through() {
    let subscriber = tracing_subscriber::fmt().with_test_writer().finish();
    tracing::subscriber::with_default(subscriber, || {
        let dwi = synthetic_dwi(7);
        let normalized = time_operation("normalize", || normalize_data(&dwi, "zscore"));
        let normalized = normalized.unwrap();
        assert_eq!(normalized.shape(), dwi.shape());

        let failed = time_operation("normalize", || normalize_data(&dwi, "bogus"));
        assert!(failed.is_err());
    });
}

#[test]
fn test_collected_stage_timings() {
    let sink = InMemorySink::new();
    let dwi = synthetic_dwi(11);
    assert!(validate_dwi_shape(&dwi));

    let b0 = dwi.index_axis(ndarray::Axis(3), 0).to_owned();
    let mask = time_operation_with(&sink, "mask", || percentile_threshold_mask(&b0, 20.0)).unwrap();
    assert!(count_true(&mask) > 0);

    let mut snr = timed_with(&sink, "snr", |v: &Array4<f64>| compute_snr(v));
    let value = snr(&dwi);
    assert!(value.is_finite() && value > 0.0);

    let summary = sink.summary();
    assert_eq!(summary["mask"].count, 1);
    assert_eq!(summary["snr"].count, 1);
    assert!(summary.values().all(|s| s.total >= Duration::ZERO));
}

#[test]
fn test_memory_report_is_never_an_error() {
    let report = memory_usage();
    assert!(report.starts_with("Memory usage: ") || report == UNAVAILABLE_MESSAGE);
    assert_eq!(memory_usage_with(&UnavailableProbe), UNAVAILABLE_MESSAGE);
}

#[test]
fn test_fa_cleanup_then_summary() {
    let mut fa = ndarray::array![[0.1, f64::NAN, 0.9], [0.4, 0.5, f64::NAN]];
    assert!(!is_finite_array(&fa));
    assert_eq!(replace_non_finite(&mut fa, 0.0), 2);
    assert!(is_finite_array(&fa));
    assert!((mean(&fa).unwrap() - 1.9 / 6.0).abs() < 1e-12);
}
