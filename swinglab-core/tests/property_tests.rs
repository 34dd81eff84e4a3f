//! Property tests for simulator invariants.
//!
//! Uses proptest to verify, over random price walks:
//! 1. Determinism — identical input produces byte-identical output
//! 2. Conservation — initial capital + total pnl == final equity
//! 3. Single position — no two trades overlap in time
//! 4. Curve shape — exactly one equity point per bar, all finite
//! 5. Ratchet monotonicity — stops only tighten, never loosen
//! 6. Sizing bounds — quantity respects both the risk and exposure caps

use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use swinglab_core::config::{
    CostParams, IndicatorParams, MaType, MetricsParams, RiskParams, SignalParams, StrategyParams,
};
use swinglab_core::domain::{Bar, Side};
use swinglab_core::engine::ratchet::tighten;
use swinglab_core::engine::run_backtest;
use swinglab_core::sizing::position_size;

fn ts(days: i64) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        + Duration::days(days)
}

/// Turn a start price and per-bar fractional moves into a gapless daily
/// series. Bounded moves keep every bar inside the shock gate.
fn walk_bars(start: f64, moves: &[f64]) -> Vec<Bar> {
    let mut bars = Vec::with_capacity(moves.len());
    let mut prev_close = start;
    for (i, m) in moves.iter().enumerate() {
        let close = prev_close * (1.0 + m);
        let open = prev_close;
        let high = open.max(close) * 1.01;
        let low = open.min(close) * 0.99;
        bars.push(Bar {
            timestamp: ts(i as i64),
            open,
            high,
            low,
            close,
            volume: 2_000_000,
        });
        prev_close = close;
    }
    bars
}

/// Short lookbacks so random walks leave warm-up quickly and actually trade.
fn walk_params() -> StrategyParams {
    StrategyParams {
        indicators: IndicatorParams {
            rsi_period: 3,
            macd_fast: 3,
            macd_slow: 6,
            macd_signal: 3,
            atr_period: 3,
            supertrend_period: 3,
            supertrend_multiplier: 3.0,
            ema_fast_period: 5,
            ema_trend_period: 8,
            volume_ma_period: 3,
            trend_ma_type: MaType::Ema,
        },
        signals: SignalParams {
            rsi_oversold: 40.0,
            rsi_overbought: 60.0,
            min_volume_avg: 1_000_000.0,
            shock_threshold: 0.08,
        },
        risk: RiskParams::default(),
        costs: CostParams::default(),
        metrics: MetricsParams::default(),
    }
}

fn arb_moves() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-0.03..0.03_f64, 40..120)
}

fn arb_start_price() -> impl Strategy<Value = f64> {
    20.0..200.0_f64
}

// ── 1. Determinism ───────────────────────────────────────────────────

proptest! {
    /// Two runs over the same bars and parameters serialize identically.
    #[test]
    fn runs_are_deterministic(start in arb_start_price(), moves in arb_moves()) {
        let bars = walk_bars(start, &moves);
        let params = walk_params();

        let first = run_backtest(&bars, &params, 100_000.0).unwrap();
        let second = run_backtest(&bars, &params, 100_000.0).unwrap();

        let a = serde_json::to_string(&first).unwrap();
        let b = serde_json::to_string(&second).unwrap();
        prop_assert_eq!(a, b, "identical inputs must serialize identically");
    }
}

// ── 2. Conservation ──────────────────────────────────────────────────

proptest! {
    /// initial + sum(pnl) == final equity, to 1e-6 relative.
    #[test]
    fn capital_is_conserved(
        start in arb_start_price(),
        moves in arb_moves(),
        initial in 10_000.0..1_000_000.0_f64,
    ) {
        let bars = walk_bars(start, &moves);
        let outcome = run_backtest(&bars, &walk_params(), initial).unwrap();

        let total_pnl: f64 = outcome.trades.iter().map(|t| t.pnl).sum();
        let final_equity = outcome.equity_curve.last().unwrap().equity;
        let drift = (initial + total_pnl - final_equity).abs();
        prop_assert!(
            drift < 1e-6 * initial,
            "conservation violated by {drift}: {initial} + {total_pnl} vs {final_equity}"
        );
    }
}

// ── 3. Single position ───────────────────────────────────────────────

proptest! {
    /// Trades never overlap and never run backwards in time.
    #[test]
    fn at_most_one_open_position(start in arb_start_price(), moves in arb_moves()) {
        let bars = walk_bars(start, &moves);
        let outcome = run_backtest(&bars, &walk_params(), 100_000.0).unwrap();

        for trade in &outcome.trades {
            prop_assert!(trade.exit_time >= trade.entry_time);
            prop_assert!(trade.quantity > 0);
        }
        for pair in outcome.trades.windows(2) {
            prop_assert!(
                pair[0].exit_time <= pair[1].entry_time,
                "overlapping trades: exit {} after next entry {}",
                pair[0].exit_time,
                pair[1].entry_time
            );
        }
    }
}

// ── 4. Curve shape ───────────────────────────────────────────────────

proptest! {
    /// One equity point per bar, timestamps aligned, every number finite.
    #[test]
    fn equity_curve_tracks_bars(start in arb_start_price(), moves in arb_moves()) {
        let bars = walk_bars(start, &moves);
        let outcome = run_backtest(&bars, &walk_params(), 100_000.0).unwrap();

        prop_assert_eq!(outcome.equity_curve.len(), bars.len());
        for (point, bar) in outcome.equity_curve.iter().zip(&bars) {
            prop_assert_eq!(point.timestamp, bar.timestamp);
            prop_assert!(point.equity.is_finite());
        }
        for trade in &outcome.trades {
            prop_assert!(trade.pnl.is_finite());
            prop_assert!(trade.entry_price.is_finite());
            prop_assert!(trade.exit_price.is_finite());
        }
    }
}

// ── 5. Ratchet monotonicity ──────────────────────────────────────────

proptest! {
    /// Long stops never decrease through the ratchet.
    #[test]
    fn ratchet_long_never_loosens(
        initial_stop in 50.0..200.0_f64,
        deltas in prop::collection::vec(-10.0..10.0_f64, 1..20),
    ) {
        let mut current = initial_stop;
        for delta in deltas {
            let next = tighten(Side::Long, current, current + delta);
            prop_assert!(next >= current, "long ratchet loosened: {next} < {current}");
            current = next;
        }
    }

    /// Short stops never increase through the ratchet.
    #[test]
    fn ratchet_short_never_loosens(
        initial_stop in 50.0..200.0_f64,
        deltas in prop::collection::vec(-10.0..10.0_f64, 1..20),
    ) {
        let mut current = initial_stop;
        for delta in deltas {
            let next = tighten(Side::Short, current, current + delta);
            prop_assert!(next <= current, "short ratchet loosened: {next} > {current}");
            current = next;
        }
    }
}

// ── 6. Sizing bounds ─────────────────────────────────────────────────

proptest! {
    /// The sized quantity respects both the risk budget and the exposure cap.
    #[test]
    fn sizing_respects_both_caps(
        equity in 1_000.0..1_000_000.0_f64,
        entry in 5.0..500.0_f64,
        stop_off in 0.01..0.3_f64,
        risk_fraction in 0.001..0.1_f64,
        max_position in 0.05..1.0_f64,
    ) {
        let stop = entry * (1.0 - stop_off);
        let qty = position_size(entry, stop, equity, risk_fraction, max_position).unwrap();

        let notional = qty as f64 * entry;
        prop_assert!(
            notional <= equity * max_position + 1e-6,
            "exposure cap violated: {notional} > {}",
            equity * max_position
        );
        let risked = qty as f64 * (entry - stop);
        prop_assert!(
            risked <= equity * risk_fraction + 1e-6,
            "risk budget violated: {risked} > {}",
            equity * risk_fraction
        );
    }
}
