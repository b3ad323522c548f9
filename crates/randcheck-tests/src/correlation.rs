//! Serial autocorrelation.

use crate::error::{RandomnessError, Result};

/// Lag-`lag` autocorrelation of `samples`.
///
/// `r_k = sum_{i < n-k} (x_i - mean)(x_{i+k} - mean) / sum_i (x_i - mean)^2`
///
/// Normalizing by the full sum of squares keeps the result inside `[-1, 1]`.
/// A constant sequence has zero variance and yields `0.0`.
pub fn autocorrelation(samples: &[i64], lag: usize) -> Result<f64> {
    let n = samples.len();
    if lag == 0 || lag >= n {
        return Err(RandomnessError::InvalidArgument(format!(
            "lag must be in 1..={}, got {lag}",
            n.saturating_sub(1)
        )));
    }
    let arr: Vec<f64> = samples.iter().map(|&x| x as f64).collect();
    let mean: f64 = arr.iter().sum::<f64>() / n as f64;
    let sum_sq: f64 = arr.iter().map(|x| (x - mean) * (x - mean)).sum();
    if sum_sq == 0.0 {
        return Ok(0.0);
    }
    let covariance: f64 = arr
        .iter()
        .zip(&arr[lag..])
        .map(|(a, b)| (a - mean) * (b - mean))
        .sum();
    Ok((covariance / sum_sq).clamp(-1.0, 1.0))
}
