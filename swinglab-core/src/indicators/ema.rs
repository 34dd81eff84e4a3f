//! Exponential moving average.
//!
//! Recursive form with `alpha = 2 / (period + 1)`, seeded by the first
//! value. The recursion runs from index 0, but the first `period - 1`
//! outputs are reported as undefined so the warm-up policy matches the
//! other indicators.

/// EMA of `values` over `period`. Warm-up rows (before `period - 1`) are
/// `None`.
pub fn ema(values: &[f64], period: usize) -> Vec<Option<f64>> {
    assert!(period >= 1, "EMA period must be >= 1");
    let n = values.len();
    let mut result = vec![None; n];
    if n == 0 {
        return result;
    }

    let alpha = 2.0 / (period as f64 + 1.0);
    let mut prev = values[0];
    for (i, &value) in values.iter().enumerate() {
        if i > 0 {
            prev = alpha * value + (1.0 - alpha) * prev;
        }
        if i + 1 >= period {
            result[i] = Some(prev);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::testutil::{assert_approx, assert_defined_from, DEFAULT_EPSILON};

    #[test]
    fn ema_3_known_values() {
        // alpha = 0.5, seeded at 10:
        // 10, 10.5, 11.25, 12.125, 13.0625 — reported from index 2
        let values = [10.0, 11.0, 12.0, 13.0, 14.0];
        let result = ema(&values, 3);

        assert_defined_from(&result, 2);
        assert_approx(result[2].unwrap(), 11.25, DEFAULT_EPSILON);
        assert_approx(result[3].unwrap(), 12.125, DEFAULT_EPSILON);
        assert_approx(result[4].unwrap(), 13.0625, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_1_is_identity() {
        let values = [5.0, 7.0, 9.0];
        let result = ema(&values, 1);
        assert_approx(result[0].unwrap(), 5.0, DEFAULT_EPSILON);
        assert_approx(result[1].unwrap(), 7.0, DEFAULT_EPSILON);
        assert_approx(result[2].unwrap(), 9.0, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_of_constant_series_is_constant() {
        let values = [42.0; 50];
        let result = ema(&values, 10);
        assert_defined_from(&result, 9);
        for v in result.into_iter().flatten() {
            assert_approx(v, 42.0, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn ema_shorter_than_period_is_all_none() {
        let result = ema(&[1.0, 2.0], 5);
        assert!(result.iter().all(|v| v.is_none()));
    }
}
