//! Simple moving average.
//!
//! Rolling mean over a window; first defined value at index `period - 1`.

/// SMA of `values` over `period`. Output is aligned to the input; warm-up
/// rows are `None`.
pub fn sma(values: &[f64], period: usize) -> Vec<Option<f64>> {
    assert!(period >= 1, "SMA period must be >= 1");
    let n = values.len();
    let mut result = vec![None; n];
    if n < period {
        return result;
    }

    let mut sum: f64 = values[..period].iter().sum();
    result[period - 1] = Some(sum / period as f64);

    for i in period..n {
        sum += values[i] - values[i - period];
        result[i] = Some(sum / period as f64);
    }

    result
}
