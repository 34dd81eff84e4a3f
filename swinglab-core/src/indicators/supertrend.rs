//! Supertrend — ATR bands with direction state.
//!
//! Basic bands sit at `hl2 ± multiplier * ATR`. The final bands ratchet
//! toward price: the upper band may only fall while the previous close is
//! below it, the lower band may only rise while the previous close is above
//! it. Direction starts up at the first defined index and flips when the
//! close crosses the prevailing band; the output line is the band on the
//! active side (support below price in an uptrend, resistance above in a
//! downtrend).

use crate::domain::{Bar, TrendDirection};

use super::atr::atr;

/// Supertrend line and direction, aligned to the input bars.
#[derive(Debug, Clone, PartialEq)]
pub struct SupertrendOutput {
    pub line: Vec<Option<f64>>,
    pub direction: Vec<Option<TrendDirection>>,
}

/// Supertrend over `bars` with the given ATR `period` and band `multiplier`.
pub fn supertrend(bars: &[Bar], period: usize, multiplier: f64) -> SupertrendOutput {
    let n = bars.len();
    let mut line = vec![None; n];
    let mut direction = vec![None; n];

    let atr_series = atr(bars, period);
    let Some(start) = atr_series.iter().position(|v| v.is_some()) else {
        return SupertrendOutput { line, direction };
    };

    let hl2 = bars[start].hl2();
    let mut upper = hl2 + multiplier * atr_series[start].unwrap_or(0.0);
    let mut lower = hl2 - multiplier * atr_series[start].unwrap_or(0.0);
    let mut dir = TrendDirection::Up;
    line[start] = Some(lower);
    direction[start] = Some(dir);

    for i in (start + 1)..n {
        let Some(atr_i) = atr_series[i] else {
            continue;
        };

        let hl2 = bars[i].hl2();
        let basic_upper = hl2 + multiplier * atr_i;
        let basic_lower = hl2 - multiplier * atr_i;
        let prev_close = bars[i - 1].close;

        // Resistance may only tighten downward while price stays under it.
        upper = if prev_close <= upper {
            basic_upper.min(upper)
        } else {
            basic_upper
        };
        // Support may only tighten upward while price stays above it.
        lower = if prev_close >= lower {
            basic_lower.max(lower)
        } else {
            basic_lower
        };

        let close = bars[i].close;
        if dir == TrendDirection::Up && close < lower {
            dir = TrendDirection::Down;
        } else if dir == TrendDirection::Down && close > upper {
            dir = TrendDirection::Up;
        }

        line[i] = Some(match dir {
            TrendDirection::Up => lower,
            TrendDirection::Down => upper,
        });
        direction[i] = Some(dir);
    }

    SupertrendOutput { line, direction }
}
