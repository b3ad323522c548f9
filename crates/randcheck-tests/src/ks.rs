//! Kolmogorov-Smirnov test against the uniform distribution over the declared range.
//!
//! Sample `x` is placed on the continuous scale at `F(x) = (x - min) / (max - min + 1)`,
//! i.e. every integer owns a unit cell and the CDF is read at the left edge of that
//! cell. The statistic is the rigorous two-sided form, taking both the step before
//! and after each order statistic:
//!
//! `D = max_i max(i/n - F(x_(i)), F(x_(i)) - (i-1)/n)`

use serde::Serialize;

use crate::TestResult;
use crate::distribution::ks_p_value;
use crate::tester::ValueRange;

/// Raw KS outcome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KsOutcome {
    pub n: usize,
    /// Maximum deviation between empirical and theoretical CDF.
    pub statistic: f64,
    pub p_value: f64,
}

impl KsOutcome {
    pub fn passes(&self, alpha: f64) -> bool {
        TestResult::pass_from_p(Some(self.p_value), alpha)
    }

    pub fn to_test_result(&self, alpha: f64) -> TestResult {
        let p = Some(self.p_value);
        TestResult {
            name: "Kolmogorov-Smirnov".to_string(),
            passed: self.passes(alpha),
            p_value: p,
            statistic: self.statistic,
            details: format!("D={:.6}, n={}", self.statistic, self.n),
            grade: TestResult::grade_from_p(p),
        }
    }
}

/// KS statistic `D` for an ascending-sorted sample.
pub fn ks_statistic(sorted: &[i64], range: ValueRange) -> f64 {
    let nf = sorted.len() as f64;
    let mut d_max = 0.0f64;
    for (i, &x) in sorted.iter().enumerate() {
        let f_x = range.uniform_cdf(x);
        let d_plus = (i + 1) as f64 / nf - f_x;
        let d_minus = f_x - i as f64 / nf;
        d_max = d_max.max(d_plus).max(d_minus);
    }
    d_max
}

/// Run the KS test on an ascending-sorted sample.
pub fn kolmogorov_smirnov(sorted: &[i64], range: ValueRange) -> KsOutcome {
    let n = sorted.len();
    let statistic = ks_statistic(sorted, range);
    KsOutcome {
        n,
        statistic,
        p_value: ks_p_value(statistic, n),
    }
}
