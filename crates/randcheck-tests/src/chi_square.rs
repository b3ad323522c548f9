//! Binned chi-square goodness of fit against a uniform histogram.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::TestResult;
use crate::distribution::chi_square_p_value;
use crate::tester::ValueRange;

/// Smallest usable bin count; lower requests are clamped up to it.
pub const MIN_BINS: usize = 2;

/// Raw chi-square outcome for one bin count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChiSquareOutcome {
    /// Effective bin count after clamping.
    pub bins: usize,
    pub statistic: f64,
    pub p_value: f64,
    pub degrees_of_freedom: usize,
    /// Observed frequency of each occupied bin, keyed by bin index. Bins absent
    /// from the map are empty. Always sums to the sample count.
    pub observed: BTreeMap<usize, u64>,
    /// Expected frequency per bin under the uniform null hypothesis.
    pub expected: f64,
}

impl ChiSquareOutcome {
    /// Observed frequency of bin `index`, zero for empty or out-of-range bins.
    pub fn count(&self, index: usize) -> u64 {
        self.observed.get(&index).copied().unwrap_or(0)
    }

    pub fn passes(&self, alpha: f64) -> bool {
        TestResult::pass_from_p(Some(self.p_value), alpha)
    }

    pub fn to_test_result(&self, alpha: f64) -> TestResult {
        let p = Some(self.p_value);
        TestResult {
            name: "Chi-Square".to_string(),
            passed: self.passes(alpha),
            p_value: p,
            statistic: self.statistic,
            details: format!(
                "bins={}, df={}, expected_per_bin={:.1}",
                self.bins, self.degrees_of_freedom, self.expected
            ),
            grade: TestResult::grade_from_p(p),
        }
    }
}

/// Clamp a requested bin count to the supported minimum.
pub fn effective_bins(bins: usize) -> usize {
    bins.max(MIN_BINS)
}

/// Histogram of `samples` over `bins` equal-width cells of `[min, max]`.
///
/// Each integer owns a unit cell, so bin width is `(max - min + 1) / bins`. Bins are
/// half-open except the last, which is closed at `max`. Samples outside the declared
/// range land in the first or last bin. Only occupied bins are stored, so memory is
/// bounded by the sample count whatever `bins` is.
pub fn bin_counts(samples: &[i64], range: ValueRange, bins: usize) -> BTreeMap<usize, u64> {
    let bins = effective_bins(bins);
    let width = range.span() / bins as f64;
    let mut observed = BTreeMap::new();
    for &value in samples {
        let offset = value as f64 - range.min as f64;
        let bin = ((offset / width).floor().max(0.0) as usize).min(bins - 1);
        *observed.entry(bin).or_insert(0u64) += 1;
    }
    observed
}

/// Run the chi-square test with `bins` cells (clamped to at least [`MIN_BINS`]).
///
/// Every empty bin contributes exactly `expected` to the statistic, so those are
/// added in one step rather than visited.
pub fn chi_square(samples: &[i64], range: ValueRange, bins: usize) -> ChiSquareOutcome {
    let bins = effective_bins(bins);
    let observed = bin_counts(samples, range, bins);
    let expected = samples.len() as f64 / bins as f64;
    let occupied: f64 = observed
        .values()
        .map(|&c| {
            let diff = c as f64 - expected;
            diff * diff / expected
        })
        .sum();
    let empty = (bins - observed.len()) as f64;
    let statistic = occupied + empty * expected;
    let degrees_of_freedom = bins - 1;
    ChiSquareOutcome {
        bins,
        statistic,
        p_value: chi_square_p_value(statistic, degrees_of_freedom as f64),
        degrees_of_freedom,
        observed,
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::pseudo_random;

    fn byte_range() -> ValueRange {
        ValueRange::new(0, 255).unwrap()
    }

    #[test]
    fn test_bins_clamped_to_two() {
        let outcome = chi_square(&[1, 2, 200], byte_range(), 0);
        assert_eq!(outcome.bins, 2);
        assert_eq!(outcome.degrees_of_freedom, 1);
        assert_eq!(outcome.observed, BTreeMap::from([(0, 2), (1, 1)]));
    }

    #[test]
    fn test_bin_boundaries() {
        // 16 bins of width 16 over [0, 255].
        let counts = bin_counts(&[0, 15, 16, 31, 240, 255], byte_range(), 16);
        assert_eq!(counts[&0], 2);
        assert_eq!(counts[&1], 2);
        assert_eq!(counts[&15], 2);
        assert_eq!(counts.len(), 3);
    }

    #[test]
    fn test_observed_sums_to_n_for_any_bin_count() {
        let mut data = pseudo_random(1000);
        data.extend([-5, 300, 255, 0]);
        for bins in [0, 1, 2, 3, 7, 16, 100, 256, 1000] {
            let counts = bin_counts(&data, byte_range(), bins);
            assert_eq!(counts.values().sum::<u64>(), data.len() as u64, "bins={bins}");
        }
    }

    #[test]
    fn test_uneven_width_keeps_max_in_last_bin() {
        let range = ValueRange::new(1, 10).unwrap();
        let counts = bin_counts(&[1, 10], range, 3);
        assert_eq!(counts, BTreeMap::from([(0, 1), (2, 1)]));
    }

    #[test]
    fn test_empty_bins_add_expected() {
        // Two samples in bin 0 of 4: (2 - 0.5)^2 / 0.5 + 3 * 0.5 = 6.
        let outcome = chi_square(&[0, 1], byte_range(), 4);
        assert_eq!(outcome.count(0), 2);
        assert_eq!(outcome.count(3), 0);
        assert!((outcome.statistic - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_huge_bin_count_does_not_allocate_per_bin() {
        let outcome = chi_square(&[1, 2, 3], byte_range(), usize::MAX);
        assert_eq!(outcome.bins, usize::MAX);
        assert_eq!(outcome.degrees_of_freedom, usize::MAX - 1);
        assert_eq!(outcome.observed.values().sum::<u64>(), 3);
        assert!(outcome.observed.keys().all(|&bin| bin < outcome.bins));
        assert!(outcome.statistic.is_finite());
        assert!((0.0..=1.0).contains(&outcome.p_value), "p={}", outcome.p_value);
    }

    #[test]
    fn test_pseudo_random_passes_sixteen_bins() {
        let data = pseudo_random(2048);
        let outcome = chi_square(&data, byte_range(), 16);
        assert!(outcome.statistic < 24.996, "chi2={}", outcome.statistic);
        assert!(outcome.passes(0.05), "p={}", outcome.p_value);
        assert!((outcome.expected - 128.0).abs() < 1e-12);
    }

    #[test]
    fn test_constant_sequence_fails() {
        let data = vec![42i64; 100];
        let outcome = chi_square(&data, byte_range(), 16);
        assert!(outcome.p_value < 1e-10, "p={}", outcome.p_value);
        assert!(!outcome.passes(0.05));
        let result = outcome.to_test_result(0.05);
        assert!(!result.passed);
        assert_eq!(result.grade, 'F');
    }
}
