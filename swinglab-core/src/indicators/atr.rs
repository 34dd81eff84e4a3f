//! Average True Range with Wilder smoothing.
//!
//! True range: `max(high - low, |high - prev_close|, |low - prev_close|)`,
//! undefined at index 0 (no previous close). The ATR seed is the mean of
//! the first `period` true ranges, so the first defined ATR sits at index
//! `period`; after that, `atr = (prev * (period - 1) + tr) / period`.

use crate::domain::Bar;

/// True range series. Index 0 is `None`.
pub fn true_range(bars: &[Bar]) -> Vec<Option<f64>> {
    let n = bars.len();
    let mut tr = vec![None; n];
    for i in 1..n {
        let h = bars[i].high;
        let l = bars[i].low;
        let pc = bars[i - 1].close;
        tr[i] = Some((h - l).max((h - pc).abs()).max((l - pc).abs()));
    }
    tr
}

/// Wilder smoothing (`alpha = 1/period`) over an optionally-undefined
/// series. The seed is the mean of the first `period` consecutive defined
/// values; everything before the seed stays `None`.
pub fn wilder_smooth(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    assert!(period >= 1, "smoothing period must be >= 1");
    let n = values.len();
    let mut result = vec![None; n];

    let Some(first_defined) = values.iter().position(|v| v.is_some()) else {
        return result;
    };
    let seed_end = first_defined + period;
    if seed_end > n {
        return result;
    }

    let seed = values[first_defined..seed_end]
        .iter()
        .map(|v| v.unwrap_or(0.0))
        .sum::<f64>()
        / period as f64;
    result[seed_end - 1] = Some(seed);

    let alpha = 1.0 / period as f64;
    let mut prev = seed;
    for i in seed_end..n {
        if let Some(v) = values[i] {
            prev = alpha * v + (1.0 - alpha) * prev;
            result[i] = Some(prev);
        }
    }

    result
}

/// ATR of `bars` over `period`. First defined value at index `period`.
pub fn atr(bars: &[Bar], period: usize) -> Vec<Option<f64>> {
    wilder_smooth(&true_range(bars), period)
}
