//! Indicator pipeline — bars in, frames out.

use crate::config::{IndicatorParams, MaType};
use crate::domain::{Bar, IndicatorFrame};
use crate::error::InsufficientDataError;

use super::{atr, ema, macd, rsi, sma, supertrend};

/// Compute one [`IndicatorFrame`] per bar.
///
/// Fails when the series is shorter than the largest configured period, in
/// which case not a single ready frame could exist. Warm-up rows come back
/// with `None` in the still-undefined columns.
pub fn compute_frames(
    bars: &[Bar],
    params: &IndicatorParams,
) -> Result<Vec<IndicatorFrame>, InsufficientDataError> {
    let required = params.largest_period();
    if bars.len() < required {
        return Err(InsufficientDataError {
            required,
            actual: bars.len(),
        });
    }

    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let volumes: Vec<f64> = bars.iter().map(|b| b.volume as f64).collect();

    let rsi_series = rsi::rsi(&closes, params.rsi_period);
    let macd_out = macd::macd(
        &closes,
        params.macd_fast,
        params.macd_slow,
        params.macd_signal,
    );
    let atr_series = atr::atr(bars, params.atr_period);
    let st_out = supertrend::supertrend(
        bars,
        params.supertrend_period,
        params.supertrend_multiplier,
    );
    let ema_fast_series = ema::ema(&closes, params.ema_fast_period);
    let ema_trend_series = match params.trend_ma_type {
        MaType::Ema => ema::ema(&closes, params.ema_trend_period),
        MaType::Sma => sma::sma(&closes, params.ema_trend_period),
    };
    let volume_ma_series = sma::sma(&volumes, params.volume_ma_period);

    let frames = bars
        .iter()
        .enumerate()
        .map(|(i, &bar)| IndicatorFrame {
            bar,
            rsi: rsi_series[i],
            macd: macd_out.macd[i],
            macd_signal: macd_out.signal[i],
            macd_hist: macd_out.hist[i],
            atr: atr_series[i],
            supertrend: st_out.line[i],
            supertrend_direction: st_out.direction[i],
            ema_fast: ema_fast_series[i],
            ema_trend: ema_trend_series[i],
            volume_ma: volume_ma_series[i],
        })
        .collect();

    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::testutil::make_ohlc_bars;

    fn small_params() -> IndicatorParams {
        IndicatorParams {
            rsi_period: 2,
            macd_fast: 2,
            macd_slow: 4,
            macd_signal: 2,
            atr_period: 2,
            supertrend_period: 2,
            supertrend_multiplier: 3.0,
            ema_fast_period: 2,
            ema_trend_period: 3,
            volume_ma_period: 2,
            trend_ma_type: MaType::Ema,
        }
    }

    fn wavy_bars(n: usize) -> Vec<crate::domain::Bar> {
        let data: Vec<(f64, f64, f64, f64)> = (0..n)
            .map(|i| {
                let c = 100.0 + (i as f64 * 0.7).sin() * 5.0;
                (c - 0.2, c + 1.0, c - 1.0, c)
            })
            .collect();
        make_ohlc_bars(&data)
    }

    #[test]
    fn too_short_series_is_rejected() {
        let bars = wavy_bars(3);
        let err = compute_frames(&bars, &small_params()).unwrap_err();
        assert_eq!(
            err,
            InsufficientDataError {
                required: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn one_frame_per_bar() {
        let bars = wavy_bars(30);
        let frames = compute_frames(&bars, &small_params()).unwrap();
        assert_eq!(frames.len(), 30);
        for (frame, bar) in frames.iter().zip(&bars) {
            assert_eq!(frame.bar.timestamp, bar.timestamp);
        }
    }

    #[test]
    fn readiness_starts_after_the_slowest_warmup() {
        // macd: slow 4 + signal 2 → defined from index 4; everything else
        // is defined earlier, so frames are ready from index 4 onward.
        let bars = wavy_bars(30);
        let frames = compute_frames(&bars, &small_params()).unwrap();
        for (i, frame) in frames.iter().enumerate() {
            if i < 4 {
                assert!(!frame.is_ready(), "frame {i} should still be warming up");
            } else {
                assert!(frame.is_ready(), "frame {i} should be ready");
            }
        }
    }

    #[test]
    fn default_params_need_200_bars() {
        let bars = wavy_bars(150);
        let err = compute_frames(&bars, &IndicatorParams::default()).unwrap_err();
        assert_eq!(err.required, 200);
        assert_eq!(err.actual, 150);
    }
}
