//! Randomness test battery for integer sample sequences.
//!
//! A [`RandomnessTester`] is built once per `(sequence, min, max)` triple and then
//! queried for hypothesis tests and fingerprints:
//!
//! - Kolmogorov-Smirnov against the uniform distribution over the declared range
//! - Binned chi-square goodness of fit
//! - Wald-Wolfowitz runs test around the median
//! - Serial autocorrelation at an arbitrary lag
//! - CRC-32 fingerprint, pattern search, duplicate index, longest repeat run
//!
//! The three hypothesis tests are memoized per instance. Each can be read as a raw
//! outcome (statistic, p-value, intermediate counts) or as a uniform [`TestResult`]
//! with a pass/fail verdict and a letter grade (A through F).
//!
//! ```
//! use randcheck_tests::RandomnessTester;
//!
//! let samples: Vec<i64> = (0..256).collect();
//! let tester = RandomnessTester::new(&samples, 0, 255).unwrap();
//! assert!(tester.ks().p_value > 0.99);
//! assert_eq!(tester.find_pattern(&[3, 4, 5]).unwrap(), Some(3));
//! ```

use serde::Serialize;

pub mod chi_square;
pub mod correlation;
pub mod distribution;
pub mod error;
pub mod ks;
pub mod pattern;
pub mod report;
pub mod runs;
pub mod tester;

pub use chi_square::ChiSquareOutcome;
pub use error::{RandomnessError, Result};
pub use ks::KsOutcome;
pub use report::{ReportConfig, SequenceReport};
pub use runs::RunsOutcome;
pub use tester::{RandomnessTester, ValueRange};

/// Default significance level for pass/fail verdicts.
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Default number of equal-width bins for the chi-square test.
pub const DEFAULT_CHI_SQUARE_BINS: usize = 8;

/// Default lag for the serial autocorrelation in reports.
pub const DEFAULT_AUTOCORRELATION_LAG: usize = 1;

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ═══════════════════════════════════════════════════════════════════════════════
// Core types
// ═══════════════════════════════════════════════════════════════════════════════

/// Result of a single randomness test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestResult {
    pub name: String,
    pub passed: bool,
    pub p_value: Option<f64>,
    pub statistic: f64,
    pub details: String,
    pub grade: char,
}

impl TestResult {
    /// Assign a letter grade based on p-value.
    ///
    /// - A: p >= 0.1
    /// - B: p >= 0.01
    /// - C: p >= 0.001
    /// - D: p >= 0.0001
    /// - F: otherwise or None
    pub fn grade_from_p(p: Option<f64>) -> char {
        match p {
            Some(p) if p >= 0.1 => 'A',
            Some(p) if p >= 0.01 => 'B',
            Some(p) if p >= 0.001 => 'C',
            Some(p) if p >= 0.0001 => 'D',
            _ => 'F',
        }
    }

    /// Pass when the p-value strictly exceeds the significance level.
    pub fn pass_from_p(p: Option<f64>, alpha: f64) -> bool {
        match p {
            Some(p) => p > alpha,
            None => false,
        }
    }
}

/// Calculate overall quality score (0-100) from test results.
///
/// Each grade maps to a score: A=100, B=75, C=50, D=25, F=0.
/// Returns the average across all tests.
pub fn calculate_quality_score(results: &[TestResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    let total: f64 = results
        .iter()
        .map(|r| match r.grade {
            'A' => 100.0,
            'B' => 75.0,
            'C' => 50.0,
            'D' => 25.0,
            _ => 0.0,
        })
        .sum();
    total / results.len() as f64
}

#[cfg(test)]
pub(crate) mod test_support {
    /// Pseudo-random bytes widened to samples (simple LCG), range [0, 255].
    pub fn pseudo_random(n: usize) -> Vec<i64> {
        let mut data = Vec::with_capacity(n);
        let mut state: u64 = 0xDEAD_BEEF_CAFE_BABE;
        for _ in 0..n {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            data.push(((state >> 33) as u8) as i64);
        }
        data
    }
}
