//! One-shot summary of every check on a tester.

use serde::Serialize;

use crate::tester::RandomnessTester;
use crate::{
    DEFAULT_ALPHA, DEFAULT_AUTOCORRELATION_LAG, DEFAULT_CHI_SQUARE_BINS, TestResult,
    calculate_quality_score,
};

/// Parameters for [`RandomnessTester::report`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReportConfig {
    /// Significance level for pass/fail verdicts.
    pub alpha: f64,
    pub chi_square_bins: usize,
    pub autocorrelation_lag: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            chi_square_bins: DEFAULT_CHI_SQUARE_BINS,
            autocorrelation_lag: DEFAULT_AUTOCORRELATION_LAG,
        }
    }
}

/// Everything a caller needs to render or summarize one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequenceReport {
    pub count: usize,
    pub min: i64,
    pub max: i64,
    pub out_of_range: usize,
    pub crc32: u32,
    pub alpha: f64,
    pub ks: TestResult,
    pub chi_square: TestResult,
    /// Effective bin count used for `chi_square`.
    pub chi_square_bins: usize,
    pub runs: TestResult,
    pub autocorrelation_lag: usize,
    /// `None` when the lag is not in `1..n` for this sequence.
    pub autocorrelation: Option<f64>,
    pub longest_repeat_run: usize,
    /// Distinct values that occur two or more times.
    pub duplicate_values: usize,
    pub tests_passed: usize,
    /// Grade average over the three hypothesis tests (0-100).
    pub quality_score: f64,
}

impl SequenceReport {
    /// The hypothesis tests in display order.
    pub fn tests(&self) -> [&TestResult; 3] {
        [&self.ks, &self.chi_square, &self.runs]
    }

    pub fn all_passed(&self) -> bool {
        self.tests_passed == self.tests().len()
    }
}

impl RandomnessTester {
    /// Build a [`SequenceReport`] from the cached statistics.
    pub fn report(&self, config: &ReportConfig) -> SequenceReport {
        let range = self.range();
        let ks = self.ks_test(config.alpha);
        let chi = self.chi_square(config.chi_square_bins);
        let chi_square = chi.to_test_result(config.alpha);
        let runs = self.runs_test(config.alpha);
        let autocorrelation = self.autocorrelation(config.autocorrelation_lag).ok();
        if autocorrelation.is_none() {
            log::debug!(
                "report: lag {} out of range for n={}, autocorrelation omitted",
                config.autocorrelation_lag,
                self.len()
            );
        }

        let tests = [ks.clone(), chi_square.clone(), runs.clone()];
        let tests_passed = tests.iter().filter(|t| t.passed).count();
        let quality_score = calculate_quality_score(&tests);

        SequenceReport {
            count: self.len(),
            min: range.min,
            max: range.max,
            out_of_range: self.out_of_range_count(),
            crc32: self.crc32(),
            alpha: config.alpha,
            ks,
            chi_square,
            chi_square_bins: chi.bins,
            runs,
            autocorrelation_lag: config.autocorrelation_lag,
            autocorrelation,
            longest_repeat_run: self.longest_repeat_run(),
            duplicate_values: self.duplicate_positions().len(),
            tests_passed,
            quality_score,
        }
    }
}
