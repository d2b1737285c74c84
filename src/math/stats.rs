//! Summary statistics over small samples.
//!
//! Conventions are fixed rather than inherited from any data-frame library:
//!
//! ```text
//! mean     = Σ x / n                       (0 for an empty sample)
//! stddev   = sqrt(Σ (x - mean)² / (n - 1))  (0 when n < 2)
//! ```

/// Arithmetic mean; `0.0` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (N-1 denominator); `0.0` with fewer than two values.
pub fn sample_stddev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let n = values.len() as f64;
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}
