//! Technical indicators.
//!
//! Every indicator is a pure function over slices: bars (or extracted
//! columns) in, `Vec<Option<f64>>` out, aligned one-to-one with the input.
//! Warm-up rows are `None`; there are no NaN sentinels. Inputs are assumed
//! validated (finite, ordered) by `data::validate_bars`.

pub mod atr;
pub mod ema;
pub mod macd;
pub mod pipeline;
pub mod rsi;
pub mod sma;
pub mod supertrend;

pub use atr::{atr, true_range, wilder_smooth};
pub use ema::ema;
pub use macd::{macd, MacdOutput};
pub use pipeline::compute_frames;
pub use rsi::rsi;
pub use sma::sma;
pub use supertrend::{supertrend, SupertrendOutput};

#[cfg(test)]
pub(crate) mod testutil {
    use crate::domain::Bar;
    use chrono::NaiveDate;

    pub const DEFAULT_EPSILON: f64 = 1e-10;

    /// Bars from close prices alone; open/high/low hug the close.
    pub fn make_bars(closes: &[f64]) -> Vec<Bar> {
        let base = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar {
                timestamp: base + chrono::Duration::days(i as i64),
                open: close,
                high: close + 0.5,
                low: close - 0.5,
                close,
                volume: 1_000,
            })
            .collect()
    }

    /// Bars from explicit (open, high, low, close) tuples.
    pub fn make_ohlc_bars(data: &[(f64, f64, f64, f64)]) -> Vec<Bar> {
        let base = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        data.iter()
            .enumerate()
            .map(|(i, &(open, high, low, close))| Bar {
                timestamp: base + chrono::Duration::days(i as i64),
                open,
                high,
                low,
                close,
                volume: 1_000,
            })
            .collect()
    }

    pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
        assert!(
            (actual - expected).abs() < epsilon,
            "expected {expected}, got {actual} (epsilon {epsilon})"
        );
    }

    /// Assert the leading `n` entries are `None` and the rest are `Some`.
    pub fn assert_defined_from(series: &[Option<f64>], n: usize) {
        for (i, v) in series.iter().enumerate() {
            if i < n {
                assert!(v.is_none(), "expected None at index {i}, got {v:?}");
            } else {
                assert!(v.is_some(), "expected Some at index {i}");
            }
        }
    }
}
