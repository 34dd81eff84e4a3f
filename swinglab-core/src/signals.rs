//! Signal generation — pure rules over two consecutive ready frames.
//!
//! The generator owns no state: each verdict is a function of the previous
//! frame, the current frame, and the thresholds. Entries require a trend
//! filter, a fresh MACD crossover, an RSI band condition, and liquidity /
//! shock gates all at once; exits fire on any single opposite condition.
//! Stop, target, and trailing levels are the simulator's business, not
//! evaluated here.

use crate::config::SignalParams;
use crate::domain::{Direction, IndicatorFrame, Side, Signal, TrendDirection};

/// Entry verdict plus the tie-break flag.
///
/// `conflict` is raised when the long and short rules somehow both fire; the
/// verdict is then `Flat` and the simulator records a warning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalEval {
    pub signal: Signal,
    pub conflict: bool,
}

/// All derived fields of a ready frame, unwrapped once.
struct ReadyFrame {
    close: f64,
    rsi: f64,
    macd: f64,
    macd_signal: f64,
    macd_hist: f64,
    atr: f64,
    direction: TrendDirection,
    ema_trend: f64,
    volume_ma: f64,
}

impl ReadyFrame {
    fn of(frame: &IndicatorFrame) -> Option<Self> {
        Some(Self {
            close: frame.bar.close,
            rsi: frame.rsi?,
            macd: frame.macd?,
            macd_signal: frame.macd_signal?,
            macd_hist: frame.macd_hist?,
            atr: frame.atr?,
            direction: frame.supertrend_direction?,
            ema_trend: frame.ema_trend?,
            volume_ma: frame.volume_ma?,
        })
    }
}

/// Evaluate the entry verdict for the bar at `cur`.
///
/// Returns a `Flat` signal while either frame is still warming up.
pub fn evaluate_entry(
    prev: &IndicatorFrame,
    cur: &IndicatorFrame,
    params: &SignalParams,
) -> SignalEval {
    let timestamp = cur.bar.timestamp;
    let (Some(p), Some(c)) = (ReadyFrame::of(prev), ReadyFrame::of(cur)) else {
        return SignalEval {
            signal: Signal::flat(timestamp),
            conflict: false,
        };
    };

    let gates_open = entry_gates(&p, &c, params);
    let long_ok = gates_open && long_entry(&p, &c, params);
    let short_ok = gates_open && short_entry(&p, &c, params);
    let (direction, conflict) = resolve_direction(long_ok, short_ok);

    let strength = match direction {
        Direction::Flat => 0.0,
        _ => entry_strength(direction, &c, params),
    };

    SignalEval {
        signal: Signal {
            timestamp,
            direction,
            strength,
        },
        conflict,
    }
}

/// True when the generator wants the open position on `side` closed.
/// Triggers on any of: RSI at the opposite extreme, an opposing MACD
/// crossover, or the trend filter flipping.
pub fn should_exit(
    prev: &IndicatorFrame,
    cur: &IndicatorFrame,
    side: Side,
    params: &SignalParams,
) -> bool {
    let (Some(p), Some(c)) = (ReadyFrame::of(prev), ReadyFrame::of(cur)) else {
        return false;
    };

    match side {
        Side::Long => {
            c.rsi > params.rsi_overbought
                || bearish_cross(&p, &c)
                || c.close < c.ema_trend
                || c.direction == TrendDirection::Down
        }
        Side::Short => {
            c.rsi < params.rsi_oversold
                || bullish_cross(&p, &c)
                || c.close > c.ema_trend
                || c.direction == TrendDirection::Up
        }
    }
}

/// Liquidity and shock gates shared by both entry directions.
fn entry_gates(prev: &ReadyFrame, cur: &ReadyFrame, params: &SignalParams) -> bool {
    let bar_move = (cur.close / prev.close - 1.0).abs();
    cur.volume_ma >= params.min_volume_avg && bar_move < params.shock_threshold
}

fn long_entry(prev: &ReadyFrame, cur: &ReadyFrame, params: &SignalParams) -> bool {
    let trend_bullish = cur.close > cur.ema_trend && cur.direction == TrendDirection::Up;
    let rsi_in_band = cur.rsi < params.rsi_oversold
        || (prev.rsi < params.rsi_oversold && cur.rsi >= params.rsi_oversold);
    trend_bullish && bullish_cross(prev, cur) && rsi_in_band
}

fn short_entry(prev: &ReadyFrame, cur: &ReadyFrame, params: &SignalParams) -> bool {
    let trend_bearish = cur.close < cur.ema_trend && cur.direction == TrendDirection::Down;
    let rsi_in_band = cur.rsi > params.rsi_overbought
        || (prev.rsi > params.rsi_overbought && cur.rsi <= params.rsi_overbought);
    trend_bearish && bearish_cross(prev, cur) && rsi_in_band
}

fn bullish_cross(prev: &ReadyFrame, cur: &ReadyFrame) -> bool {
    prev.macd <= prev.macd_signal && cur.macd > cur.macd_signal
}

fn bearish_cross(prev: &ReadyFrame, cur: &ReadyFrame) -> bool {
    prev.macd >= prev.macd_signal && cur.macd < cur.macd_signal
}

/// Tie-break: simultaneous long and short verdicts cancel to `Flat`.
fn resolve_direction(long_ok: bool, short_ok: bool) -> (Direction, bool) {
    match (long_ok, short_ok) {
        (true, true) => (Direction::Flat, true),
        (true, false) => (Direction::Long, false),
        (false, true) => (Direction::Short, false),
        (false, false) => (Direction::Flat, false),
    }
}

/// Sizing hint in `[0, 1]`: how deep the RSI sits in its band (up to 0.4),
/// how decisive the MACD histogram is relative to its signal line (up to
/// 0.4), and how calm the volatility regime is (up to 0.2).
fn entry_strength(direction: Direction, cur: &ReadyFrame, params: &SignalParams) -> f64 {
    let rsi_depth = match direction {
        Direction::Long => (params.rsi_oversold - cur.rsi) / params.rsi_oversold,
        Direction::Short => (cur.rsi - params.rsi_overbought) / (100.0 - params.rsi_overbought),
        Direction::Flat => return 0.0,
    };
    let rsi_term = 0.4 * rsi_depth.clamp(0.0, 1.0);

    let favorable_hist = match direction {
        Direction::Long => cur.macd_hist,
        Direction::Short => -cur.macd_hist,
        Direction::Flat => 0.0,
    };
    let macd_term = if cur.macd_signal == 0.0 {
        0.0
    } else {
        (10.0 * favorable_hist / cur.macd_signal.abs()).clamp(0.0, 0.4)
    };

    let vol_ratio = (cur.atr / cur.close) / params.shock_threshold;
    let calm_term = 0.2 * (1.0 - vol_ratio).clamp(0.0, 1.0);

    (rsi_term + macd_term + calm_term).clamp(0.0, 1.0)
}
