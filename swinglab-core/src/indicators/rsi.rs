//! Relative Strength Index.
//!
//! Wilder smoothing of average gains and losses over close-to-close deltas.
//! `RSI = 100 - 100 / (1 + avg_gain / avg_loss)`. First defined value at
//! index `period` (the first `period` deltas seed the averages).
//! Edge cases: avg_loss == 0 → 100, avg_gain == 0 → 0, both zero → 50.

/// RSI of `closes` over `period`. Warm-up rows are `None`.
pub fn rsi(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    assert!(period >= 1, "RSI period must be >= 1");
    let n = closes.len();
    let mut result = vec![None; n];
    if n < period + 1 {
        return result;
    }

    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;
    for i in 1..=period {
        let change = closes[i] - closes[i - 1];
        if change > 0.0 {
            avg_gain += change;
        } else {
            avg_loss -= change;
        }
    }
    avg_gain /= period as f64;
    avg_loss /= period as f64;
    result[period] = Some(rsi_value(avg_gain, avg_loss));

    let alpha = 1.0 / period as f64;
    for i in (period + 1)..n {
        let change = closes[i] - closes[i - 1];
        let gain = change.max(0.0);
        let loss = (-change).max(0.0);
        avg_gain = alpha * gain + (1.0 - alpha) * avg_gain;
        avg_loss = alpha * loss + (1.0 - alpha) * avg_loss;
        result[i] = Some(rsi_value(avg_gain, avg_loss));
    }

    result
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 && avg_gain == 0.0 {
        50.0 // no movement either way
    } else if avg_loss == 0.0 {
        100.0
    } else if avg_gain == 0.0 {
        0.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}
