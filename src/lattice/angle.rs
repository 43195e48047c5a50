//! Angle quantization
//!
//! Maps continuous headings onto a uniform angular lattice of `num_bins`
//! bins and back. Bin `i` is represented by the heading `i * 2pi / n` and
//! covers the half-open interval `[(i - 1/2) * 2pi / n, (i + 1/2) * 2pi / n)`,
//! so [`AngleQuantizer::discretize`] rounds to the nearest representative.
//! A heading exactly half-way between two representatives goes to the
//! counter-clockwise (higher) bin.

use std::f64::consts::TAU;

use crate::common::error::{DesignerError, DesignerResult};

/// Number of angle bins used when nothing else is configured
pub const DEFAULT_NUM_ANGLE_BINS: usize = 16;

/// Slack (in bins) applied before truncation so that headings sitting on a
/// half-bin boundary up to floating point noise resolve to the higher bin.
const TIE_TOLERANCE: f64 = 1e-9;

/// Reduce `angle` into `[0, 2pi)`.
///
/// Magnitudes above `2pi` are reduced with a truncating remainder, then a
/// single `2pi` is added to negative values. Non-finite input yields NaN.
pub fn normalize_angle(angle: f64) -> f64 {
    let mut a = angle;

    // get to the range (-2pi, 2pi)
    if a.abs() > TAU {
        a %= TAU;
    }

    // get to the range [0, 2pi]
    if a < 0.0 {
        a += TAU;
    }

    // exactly 2pi, or a tiny negative value rounded up onto 2pi
    if a >= TAU {
        a = 0.0;
    }

    a
}

/// Quantizer for a fixed number of angle bins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AngleQuantizer {
    num_bins: usize,
}

impl AngleQuantizer {
    /// Create a quantizer; `num_bins` must be at least 1
    pub fn new(num_bins: usize) -> DesignerResult<Self> {
        if num_bins < 1 {
            return Err(DesignerError::InvalidConfiguration(format!(
                "angle bin count must be >= 1, got {}",
                num_bins
            )));
        }
        Ok(Self { num_bins })
    }

    pub fn num_bins(&self) -> usize {
        self.num_bins
    }

    /// Angular width of one bin [rad]
    pub fn bin_size(&self) -> f64 {
        TAU / self.num_bins as f64
    }

    /// Index of the bin nearest to `angle`, always in `[0, num_bins)`
    pub fn discretize(&self, angle: f64) -> usize {
        let n = self.num_bins as f64;
        let fraction = normalize_angle(angle + self.bin_size() / 2.0) / TAU * n;
        let bin = (fraction + TIE_TOLERANCE).floor() as usize;

        // headings within half a bin below 2pi land on `num_bins`
        bin % self.num_bins
    }

    /// Representative heading of `bin` (taken modulo `num_bins`), in `[0, 2pi)`
    pub fn realize(&self, bin: usize) -> f64 {
        (bin % self.num_bins) as f64 * TAU / self.num_bins as f64
    }

    /// Snap a heading onto its bin representative
    pub fn snap(&self, angle: f64) -> f64 {
        self.realize(self.discretize(angle))
    }

    /// Smallest number of bins separating two bin indices around the circle
    pub fn bin_distance(&self, a: usize, b: usize) -> usize {
        let a = a % self.num_bins;
        let b = b % self.num_bins;
        let d = if a > b { a - b } else { b - a };
        d.min(self.num_bins - d)
    }
}

impl Default for AngleQuantizer {
    fn default() -> Self {
        Self {
            num_bins: DEFAULT_NUM_ANGLE_BINS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f64::consts::PI;

    /// Distance between two angles on the circle
    fn circular_gap(a: f64, b: f64) -> f64 {
        let d = (a - b).rem_euclid(TAU);
        d.min(TAU - d)
    }

    #[test]
    fn test_normalize_angle_negative() {
        assert!((normalize_angle(-PI / 2.0) - 3.0 * PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_angle_large_magnitude() {
        let a = normalize_angle(100.0 * PI);
        assert!((0.0..TAU).contains(&a));
        assert!(circular_gap(a, 0.0) < 1e-9);

        let b = normalize_angle(-101.0 * PI);
        assert!((0.0..TAU).contains(&b));
        assert!(circular_gap(b, PI) < 1e-9);
    }

    #[test]
    fn test_normalize_angle_full_turn_maps_to_zero() {
        assert_eq!(normalize_angle(TAU), 0.0);
        assert_eq!(normalize_angle(-TAU), 0.0);
        assert_eq!(normalize_angle(-1e-18), 0.0);
    }

    #[test]
    fn test_zero_bins_rejected() {
        assert!(matches!(
            AngleQuantizer::new(0),
            Err(DesignerError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_half_bin_tie_goes_to_higher_bin() {
        // 11.25 degrees is exactly half of a 22.5 degree bin
        let q = AngleQuantizer::new(16).unwrap();
        assert_eq!(q.discretize(PI / 16.0), 1);
        assert_eq!(q.discretize(11.25_f64.to_radians()), 1);
        assert_eq!(q.discretize(0.19635), 1);
        assert_eq!(q.discretize(PI / 16.0 - 1e-6), 0);
    }

    #[test]
    fn test_discretize_wraps_near_full_turn() {
        let q = AngleQuantizer::new(16).unwrap();
        assert_eq!(q.discretize(TAU - 1e-12), 0);
        assert_eq!(q.discretize(TAU - q.bin_size() / 2.0), 0);
        assert_eq!(q.discretize(TAU - q.bin_size() / 2.0 - 1e-6), 15);
        assert_eq!(q.discretize(-1e-12), 0);
    }

    #[test]
    fn test_discretize_non_divisor_bin_count() {
        let q = AngleQuantizer::new(7).unwrap();
        for k in 0..1000 {
            let angle = TAU - k as f64 * 1e-4;
            assert!(q.discretize(angle) < 7);
        }
    }

    #[test]
    fn test_single_bin() {
        let q = AngleQuantizer::new(1).unwrap();
        assert_eq!(q.discretize(3.0), 0);
        assert_eq!(q.discretize(-3.0), 0);
        assert_eq!(q.realize(0), 0.0);
    }

    #[test]
    fn test_realize_wraps_bin_index() {
        let q = AngleQuantizer::new(8).unwrap();
        assert_eq!(q.realize(9), q.realize(1));
        assert!((q.realize(2) - PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_bin_distance() {
        let q = AngleQuantizer::new(16).unwrap();
        assert_eq!(q.bin_distance(0, 15), 1);
        assert_eq!(q.bin_distance(3, 11), 8);
        assert_eq!(q.bin_distance(5, 5), 0);
    }

    proptest! {
        #[test]
        fn prop_normalize_in_range(angle in -1.0e6f64..1.0e6) {
            let a = normalize_angle(angle);
            prop_assert!(a >= 0.0 && a < TAU);
        }

        #[test]
        fn prop_realize_discretize_round_trip(n in 1usize..=512, seed in 0usize..512) {
            let q = AngleQuantizer::new(n).unwrap();
            let i = seed % n;
            prop_assert_eq!(q.discretize(q.realize(i)), i);
        }

        #[test]
        fn prop_discretize_in_range(n in 1usize..=512, angle in -100.0f64..100.0) {
            let q = AngleQuantizer::new(n).unwrap();
            prop_assert!(q.discretize(angle) < n);
        }

        #[test]
        fn prop_discretize_near_full_turn_in_range(n in 1usize..=512, frac in 0.0f64..=1.0) {
            let q = AngleQuantizer::new(n).unwrap();
            let angle = TAU - frac * q.bin_size() / 2.0;
            prop_assert!(q.discretize(angle) < n);
        }

        #[test]
        fn prop_snap_is_nearest_representative(n in 1usize..=64, angle in -10.0f64..10.0) {
            let q = AngleQuantizer::new(n).unwrap();
            prop_assert!(circular_gap(q.snap(angle), angle) <= q.bin_size() / 2.0 + 1e-9);
        }
    }
}
