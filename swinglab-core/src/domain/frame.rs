//! IndicatorFrame — one bar enriched with derived indicator columns.
//!
//! Warm-up rows carry `None` in the derived fields. There are no NaN
//! sentinels anywhere downstream of the indicator pipeline: a value is
//! either defined or absent.

use serde::{Deserialize, Serialize};

use super::bar::Bar;

/// Trend direction reported by the supertrend indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrendDirection {
    Up,
    Down,
}

impl TrendDirection {
    /// +1 for up, -1 for down.
    pub fn sign(&self) -> i8 {
        match self {
            TrendDirection::Up => 1,
            TrendDirection::Down => -1,
        }
    }

    pub fn flipped(&self) -> Self {
        match self {
            TrendDirection::Up => TrendDirection::Down,
            TrendDirection::Down => TrendDirection::Up,
        }
    }
}

/// One bar plus every derived indicator value for that bar.
///
/// A frame is *ready* once all derived fields are defined; the signal
/// generator only ever looks at ready frames.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorFrame {
    pub bar: Bar,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_hist: Option<f64>,
    pub atr: Option<f64>,
    pub supertrend: Option<f64>,
    pub supertrend_direction: Option<TrendDirection>,
    pub ema_fast: Option<f64>,
    pub ema_trend: Option<f64>,
    pub volume_ma: Option<f64>,
}

impl IndicatorFrame {
    /// A bare frame with every derived column undefined.
    pub fn warmup(bar: Bar) -> Self {
        Self {
            bar,
            rsi: None,
            macd: None,
            macd_signal: None,
            macd_hist: None,
            atr: None,
            supertrend: None,
            supertrend_direction: None,
            ema_fast: None,
            ema_trend: None,
            volume_ma: None,
        }
    }

    /// True once every derived field is defined.
    pub fn is_ready(&self) -> bool {
        self.rsi.is_some()
            && self.macd.is_some()
            && self.macd_signal.is_some()
            && self.macd_hist.is_some()
            && self.atr.is_some()
            && self.supertrend.is_some()
            && self.supertrend_direction.is_some()
            && self.ema_fast.is_some()
            && self.ema_trend.is_some()
            && self.volume_ma.is_some()
    }

    pub fn close(&self) -> f64 {
        self.bar.close
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn frame() -> IndicatorFrame {
        IndicatorFrame::warmup(Bar {
            timestamp: NaiveDate::from_ymd_opt(2024, 1, 2)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            open: 100.0,
            high: 101.0,
            low: 99.0,
            close: 100.5,
            volume: 1_000,
        })
    }

    #[test]
    fn warmup_frame_is_not_ready() {
        assert!(!frame().is_ready());
    }

    #[test]
    fn ready_requires_every_field() {
        let mut f = frame();
        f.rsi = Some(50.0);
        f.macd = Some(0.1);
        f.macd_signal = Some(0.05);
        f.macd_hist = Some(0.05);
        f.atr = Some(1.2);
        f.supertrend = Some(98.0);
        f.supertrend_direction = Some(TrendDirection::Up);
        f.ema_fast = Some(100.0);
        f.ema_trend = Some(99.0);
        assert!(!f.is_ready(), "volume_ma still undefined");
        f.volume_ma = Some(1_000.0);
        assert!(f.is_ready());
    }

    #[test]
    fn direction_sign_and_flip() {
        assert_eq!(TrendDirection::Up.sign(), 1);
        assert_eq!(TrendDirection::Down.sign(), -1);
        assert_eq!(TrendDirection::Up.flipped(), TrendDirection::Down);
    }
}
