//! Moving Average Convergence Divergence.
//!
//! `macd = EMA(close, fast) - EMA(close, slow)`, defined where both EMAs
//! are. The signal line is an EMA of the defined macd values, seeded at the
//! first one; it becomes defined `signal_period - 1` rows later. The
//! histogram is `macd - signal` wherever both exist.

use super::ema::ema;

/// The three MACD series, aligned to the input closes.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdOutput {
    pub macd: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
    pub hist: Vec<Option<f64>>,
}

/// MACD over `closes`. `fast < slow` is enforced at config validation.
pub fn macd(closes: &[f64], fast: usize, slow: usize, signal_period: usize) -> MacdOutput {
    assert!(fast < slow, "macd fast period must be below slow period");
    let n = closes.len();
    let fast_ema = ema(closes, fast);
    let slow_ema = ema(closes, slow);

    let mut macd_line = vec![None; n];
    for i in 0..n {
        if let (Some(f), Some(s)) = (fast_ema[i], slow_ema[i]) {
            macd_line[i] = Some(f - s);
        }
    }

    // Signal line: EMA over the defined tail of the macd line, seeded at
    // the first defined value.
    let mut signal = vec![None; n];
    let alpha = 2.0 / (signal_period as f64 + 1.0);
    let mut smoothed: Option<f64> = None;
    let mut defined_count = 0usize;
    for i in 0..n {
        let Some(m) = macd_line[i] else { continue };
        smoothed = Some(match smoothed {
            None => m,
            Some(prev) => alpha * m + (1.0 - alpha) * prev,
        });
        defined_count += 1;
        if defined_count >= signal_period {
            signal[i] = smoothed;
        }
    }

    let mut hist = vec![None; n];
    for i in 0..n {
        if let (Some(m), Some(s)) = (macd_line[i], signal[i]) {
            hist[i] = Some(m - s);
        }
    }

    // The macd line is only reported where the signal exists, so the three
    // series share one warm-up boundary.
    for i in 0..n {
        if signal[i].is_none() {
            macd_line[i] = None;
        }
    }

    MacdOutput {
        macd: macd_line,
        signal,
        hist,
    }
}
