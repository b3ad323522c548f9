//! The validated sequence and its per-instance result cache.

use std::collections::BTreeMap;
use std::sync::{Mutex, OnceLock, PoisonError};

use log::{debug, trace};
use serde::Serialize;

use crate::chi_square::{self, ChiSquareOutcome};
use crate::error::{RandomnessError, Result};
use crate::ks::{self, KsOutcome};
use crate::runs::{self, RunsOutcome};
use crate::{TestResult, correlation, pattern};

/// Closed interval `[min, max]` the samples are declared to be drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValueRange {
    pub min: i64,
    pub max: i64,
}

impl ValueRange {
    pub fn new(min: i64, max: i64) -> Result<Self> {
        if min >= max {
            return Err(RandomnessError::InvalidInput(format!(
                "min ({min}) must be less than max ({max})"
            )));
        }
        Ok(Self { min, max })
    }

    /// Number of integer cells in the range, `max - min + 1`.
    pub fn span(&self) -> f64 {
        self.max as f64 - self.min as f64 + 1.0
    }

    /// Continuous uniform CDF at the left edge of `x`'s cell, clamped to `[0, 1]`.
    pub fn uniform_cdf(&self, x: i64) -> f64 {
        ((x as f64 - self.min as f64) / self.span()).clamp(0.0, 1.0)
    }

    pub fn contains(&self, x: i64) -> bool {
        (self.min..=self.max).contains(&x)
    }
}

/// Lazily filled statistics. Each slot is written at most once per key.
#[derive(Debug, Default)]
struct StatCache {
    sorted: OnceLock<Vec<i64>>,
    ks: OnceLock<KsOutcome>,
    runs: OnceLock<RunsOutcome>,
    /// Keyed by effective bin count; a different count replaces the entry.
    chi_square: Mutex<Option<ChiSquareOutcome>>,
}

/// Randomness checks over one fixed sample sequence and declared range.
///
/// Construction copies the samples, so later changes to the caller's buffer never
/// affect results. Queries take `&self`; the KS, chi-square and runs statistics
/// are computed on first use and served from cache afterwards. The tester is
/// `Send + Sync` and may be queried from several threads.
#[derive(Debug)]
pub struct RandomnessTester {
    samples: Vec<i64>,
    range: ValueRange,
    cache: StatCache,
}

impl RandomnessTester {
    /// Validate and copy the input.
    ///
    /// Fails with [`RandomnessError::InvalidInput`] when `samples` is empty or
    /// `min >= max`. Samples outside the range are accepted.
    pub fn new(samples: &[i64], min: i64, max: i64) -> Result<Self> {
        if samples.is_empty() {
            return Err(RandomnessError::InvalidInput(
                "sequence must not be empty".to_string(),
            ));
        }
        let range = ValueRange::new(min, max)?;
        debug!(
            "tester created: n={}, range=[{min}, {max}]",
            samples.len()
        );
        Ok(Self {
            samples: samples.to_vec(),
            range,
            cache: StatCache::default(),
        })
    }

    pub fn samples(&self) -> &[i64] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; construction rejects empty sequences.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn range(&self) -> ValueRange {
        self.range
    }

    /// Number of samples outside the declared range.
    pub fn out_of_range_count(&self) -> usize {
        self.samples
            .iter()
            .filter(|&&v| !self.range.contains(v))
            .count()
    }

    fn sorted(&self) -> &[i64] {
        self.cache.sorted.get_or_init(|| {
            let mut sorted = self.samples.clone();
            sorted.sort_unstable();
            sorted
        })
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Kolmogorov-Smirnov
    // ═══════════════════════════════════════════════════════════════════════════

    /// Cached KS outcome against the uniform distribution over the range.
    pub fn ks(&self) -> KsOutcome {
        if let Some(hit) = self.cache.ks.get() {
            trace!("ks: cache hit");
            return *hit;
        }
        *self.cache.ks.get_or_init(|| {
            let outcome = ks::kolmogorov_smirnov(self.sorted(), self.range);
            debug!(
                "ks computed: D={:.6}, p={:.6}",
                outcome.statistic, outcome.p_value
            );
            outcome
        })
    }

    pub fn ks_statistic(&self) -> f64 {
        self.ks().statistic
    }

    pub fn ks_p_value(&self) -> f64 {
        self.ks().p_value
    }

    pub fn ks_passes(&self, alpha: f64) -> bool {
        self.ks().passes(alpha)
    }

    pub fn ks_test(&self, alpha: f64) -> TestResult {
        self.ks().to_test_result(alpha)
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Chi-square
    // ═══════════════════════════════════════════════════════════════════════════

    /// Cached chi-square outcome for `bins` cells (clamped to at least 2).
    ///
    /// The cache holds one bin count at a time; asking for another count
    /// recomputes and replaces it.
    pub fn chi_square(&self, bins: usize) -> ChiSquareOutcome {
        let bins = chi_square::effective_bins(bins);
        let mut slot = self
            .cache
            .chi_square
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        match slot.as_ref() {
            Some(cached) if cached.bins == bins => {
                trace!("chi-square: cache hit (bins={bins})");
                return cached.clone();
            }
            Some(cached) => {
                debug!("chi-square: bins changed {} -> {bins}", cached.bins);
            }
            None => {}
        }
        let outcome = chi_square::chi_square(&self.samples, self.range, bins);
        debug!(
            "chi-square computed: bins={bins}, chi2={:.4}, p={:.6}",
            outcome.statistic, outcome.p_value
        );
        *slot = Some(outcome.clone());
        outcome
    }

    pub fn chi_square_statistic(&self, bins: usize) -> f64 {
        self.chi_square(bins).statistic
    }

    pub fn chi_square_p_value(&self, bins: usize) -> f64 {
        self.chi_square(bins).p_value
    }

    pub fn chi_square_passes(&self, bins: usize, alpha: f64) -> bool {
        self.chi_square(bins).passes(alpha)
    }

    /// `(statistic, p_value, passed)` for `bins` cells at significance `alpha`.
    pub fn chi_square_verdict(&self, bins: usize, alpha: f64) -> (f64, f64, bool) {
        let outcome = self.chi_square(bins);
        (outcome.statistic, outcome.p_value, outcome.passes(alpha))
    }

    pub fn chi_square_test(&self, bins: usize, alpha: f64) -> TestResult {
        self.chi_square(bins).to_test_result(alpha)
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Runs
    // ═══════════════════════════════════════════════════════════════════════════

    /// Cached Wald-Wolfowitz runs outcome around the median.
    pub fn runs(&self) -> RunsOutcome {
        if let Some(hit) = self.cache.runs.get() {
            trace!("runs: cache hit");
            return *hit;
        }
        *self.cache.runs.get_or_init(|| {
            let outcome = runs::runs_test(&self.samples, self.sorted());
            debug!(
                "runs computed: runs={}, z={:.4}, p={:.6}",
                outcome.runs, outcome.z_score, outcome.p_value
            );
            outcome
        })
    }

    pub fn median(&self) -> f64 {
        runs::median(self.sorted())
    }

    pub fn runs_z_score(&self) -> f64 {
        self.runs().z_score
    }

    pub fn runs_p_value(&self) -> f64 {
        self.runs().p_value
    }

    pub fn runs_passes(&self, alpha: f64) -> bool {
        self.runs().passes(alpha)
    }

    pub fn runs_test(&self, alpha: f64) -> TestResult {
        self.runs().to_test_result(alpha)
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Correlation, fingerprint, patterns
    // ═══════════════════════════════════════════════════════════════════════════

    /// Autocorrelation at `lag`; [`RandomnessError::InvalidArgument`] unless
    /// `1 <= lag < n`.
    pub fn autocorrelation(&self, lag: usize) -> Result<f64> {
        correlation::autocorrelation(&self.samples, lag)
    }

    pub fn crc32(&self) -> u32 {
        pattern::crc32(&self.samples)
    }

    /// First index of `query` as a contiguous run; `None` if absent.
    pub fn find_pattern(&self, query: &[i64]) -> Result<Option<usize>> {
        pattern::find_pattern(&self.samples, query)
    }

    pub fn duplicate_positions(&self) -> BTreeMap<i64, Vec<usize>> {
        pattern::duplicate_positions(&self.samples)
    }

    pub fn longest_repeat_run(&self) -> usize {
        pattern::longest_repeat_run(&self.samples)
    }
}
