//! Wald-Wolfowitz runs test around the sample median.
//!
//! Samples at or above the median are classified `1`, below it `0`, keeping the
//! original order. Too few runs means clustering, too many means oscillation.

use serde::Serialize;

use crate::TestResult;
use crate::distribution::normal_two_tailed;

/// Raw runs-test outcome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunsOutcome {
    /// Number of maximal blocks of identical classification.
    pub runs: usize,
    /// Samples at or above the median.
    pub above: usize,
    /// Samples below the median.
    pub below: usize,
    pub median: f64,
    pub expected_runs: f64,
    pub variance: f64,
    /// `|runs - E[R]| / sqrt(Var[R])`, `+inf` when one class is empty.
    pub z_score: f64,
    pub p_value: f64,
}

impl RunsOutcome {
    pub fn passes(&self, alpha: f64) -> bool {
        TestResult::pass_from_p(Some(self.p_value), alpha)
    }

    pub fn to_test_result(&self, alpha: f64) -> TestResult {
        let p = Some(self.p_value);
        TestResult {
            name: "Runs Test".to_string(),
            passed: self.passes(alpha),
            p_value: p,
            statistic: self.z_score,
            details: format!(
                "runs={}, expected={:.1}, above={}, below={}",
                self.runs, self.expected_runs, self.above, self.below
            ),
            grade: TestResult::grade_from_p(p),
        }
    }
}

/// Twice the median of an ascending-sorted slice, exact in `i128`.
///
/// Classification compares `2 * v` against this, so samples above 2^53 that
/// `f64` cannot tell apart still fall on the right side.
fn doubled_median(sorted: &[i64]) -> Option<i128> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    let hi = sorted[n / 2] as i128;
    let lo = if n % 2 == 0 { sorted[n / 2 - 1] as i128 } else { hi };
    Some(lo + hi)
}

/// Median of an ascending-sorted, non-empty slice, for reporting.
///
/// Even lengths average the two central values. NaN when empty.
pub fn median(sorted: &[i64]) -> f64 {
    doubled_median(sorted).map_or(f64::NAN, |doubled| doubled as f64 / 2.0)
}

/// Run the test over `samples` in their original order.
///
/// `sorted` must be the same samples in ascending order; it is only used for the
/// median.
pub fn runs_test(samples: &[i64], sorted: &[i64]) -> RunsOutcome {
    let doubled = doubled_median(sorted);
    let median = median(sorted);
    let mut runs = 0usize;
    let mut above = 0usize;
    let mut prev: Option<bool> = None;
    for &value in samples {
        let is_above = doubled.is_some_and(|m| 2 * value as i128 >= m);
        if is_above {
            above += 1;
        }
        if prev != Some(is_above) {
            runs += 1;
        }
        prev = Some(is_above);
    }
    let n = samples.len();
    let below = n - above;

    let nf = n as f64;
    let product = 2.0 * above as f64 * below as f64;
    let expected_runs = if n > 0 { product / nf + 1.0 } else { 0.0 };

    if above == 0 || below == 0 {
        // Every sample on one side of the median: maximal non-randomness.
        return RunsOutcome {
            runs,
            above,
            below,
            median,
            expected_runs,
            variance: 0.0,
            z_score: f64::INFINITY,
            p_value: 0.0,
        };
    }

    let variance = product * (product - nf) / (nf * nf * (nf - 1.0));
    let deviation = (runs as f64 - expected_runs).abs();
    let z_score = if variance > 0.0 {
        deviation / variance.sqrt()
    } else if deviation == 0.0 {
        // n = 2 with one sample per class: exactly the expected two runs.
        0.0
    } else {
        f64::INFINITY
    };
    RunsOutcome {
        runs,
        above,
        below,
        median,
        expected_runs,
        variance,
        z_score,
        p_value: normal_two_tailed(z_score),
    }
}
