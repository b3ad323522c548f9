//! Tail probabilities of the reference distributions used by the tests.

use statrs::distribution::{ChiSquared, ContinuousCDF};
use statrs::function::erf::erfc;

/// Maximum number of terms summed for the Kolmogorov series.
const KOLMOGOROV_TERMS: i32 = 100;

/// Asymptotic p-value for a two-sided KS statistic `d` over `n` samples.
///
/// Uses Stephens' correction `lambda = (sqrt(n) + 0.12 + 0.11 / sqrt(n)) * d`,
/// then the Kolmogorov tail `Q(lambda) = 2 * sum_{k>=1} (-1)^(k-1) exp(-2 k^2 lambda^2)`.
pub fn ks_p_value(d: f64, n: usize) -> f64 {
    if n == 0 {
        return 1.0;
    }
    let sqrt_n = (n as f64).sqrt();
    let lambda = (sqrt_n + 0.12 + 0.11 / sqrt_n) * d;
    kolmogorov_tail(lambda)
}

/// Kolmogorov distribution survival function `Q(lambda)`.
///
/// Returns 1.0 when the series does not converge, which only happens for small
/// lambda where the true tail is indistinguishable from 1.
pub fn kolmogorov_tail(lambda: f64) -> f64 {
    if !lambda.is_finite() {
        return if lambda > 0.0 { 0.0 } else { 1.0 };
    }
    let a2 = -2.0 * lambda * lambda;
    let mut sign = 2.0;
    let mut sum = 0.0;
    let mut prev_term = 0.0f64;
    for k in 1..=KOLMOGOROV_TERMS {
        let kf = k as f64;
        let term = sign * (a2 * kf * kf).exp();
        sum += term;
        if term.abs() <= 1e-6 * prev_term || term.abs() <= 1e-16 * sum.abs() {
            return sum.clamp(0.0, 1.0);
        }
        sign = -sign;
        prev_term = term.abs();
    }
    1.0
}

/// Above this many degrees of freedom the incomplete gamma series in `statrs`
/// stops converging in reasonable time, so the Wilson-Hilferty cube-root normal
/// approximation is used instead.
const WILSON_HILFERTY_MIN_DF: f64 = 1e7;

/// Upper tail of the chi-square distribution with `df` degrees of freedom.
pub fn chi_square_p_value(statistic: f64, df: f64) -> f64 {
    if df > WILSON_HILFERTY_MIN_DF && statistic.is_finite() {
        return wilson_hilferty_tail(statistic, df);
    }
    match ChiSquared::new(df) {
        Ok(dist) => dist.sf(statistic).clamp(0.0, 1.0),
        Err(_) => {
            log::warn!("chi-square distribution undefined for df={df}");
            f64::NAN
        }
    }
}

fn wilson_hilferty_tail(statistic: f64, df: f64) -> f64 {
    let cube_root = (statistic.max(0.0) / df).cbrt();
    let variance = 2.0 / (9.0 * df);
    let z = (cube_root - (1.0 - variance)) / variance.sqrt();
    (0.5 * erfc(z / 2.0_f64.sqrt())).clamp(0.0, 1.0)
}

/// Two-tailed standard normal tail probability at `|z|`.
pub fn normal_two_tailed(z: f64) -> f64 {
    if z.is_nan() {
        return f64::NAN;
    }
    let z = z.abs();
    if z.is_infinite() {
        return 0.0;
    }
    erfc(z / 2.0_f64.sqrt()).clamp(0.0, 1.0)
}
