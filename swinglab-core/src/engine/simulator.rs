//! Position simulator — the per-bar state machine.
//!
//! States: flat, open long, open short; at most one position at a time.
//! Per-bar order is fixed:
//!
//! 1. With a position open, evaluate exits in priority order
//!    stop loss > take profit > trailing stop > signal exit. Level exits
//!    compare the bar's range against levels committed on earlier bars and
//!    execute at the level itself; signal exits execute at the close.
//!    If the position survives, the trailing stop then ratchets from this
//!    bar's favorable extreme.
//! 2. When flat, evaluate the entry verdict; a qualifying signal opens a
//!    position at the close if the sized quantity is nonzero and free cash
//!    covers the notional.
//! 3. Mark equity at the close — exactly one equity point per bar.
//!
//! Cash accounting is exact: entries debit principal and commission, exits
//! credit proceeds net of commission, and
//! `initial_capital + sum(pnl) == final equity` holds to float precision.
//! A position still open after the last bar is force-closed at that bar's
//! close with `ExitReason::EndOfData`.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::config::StrategyParams;
use crate::data::validate_bars;
use crate::domain::{Bar, Direction, EquityPoint, ExitReason, Position, Side, Trade};
use crate::error::{BacktestError, ZeroRiskError};
use crate::indicators::compute_frames;
use crate::signals;
use crate::sizing::position_size;

use super::costs::CostModel;
use super::ratchet::tighten;

/// Everything a single run produces. Warnings are diagnostics-as-data;
/// nothing in the engine writes to a log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestOutcome {
    pub trades: Vec<Trade>,
    pub equity_curve: Vec<EquityPoint>,
    pub warnings: Vec<String>,
}

/// Run the whole pipeline over one symbol's bars.
///
/// Validates the parameter object and the series first, computes indicator
/// frames, then replays the simulation bar by bar. The equity curve always
/// has exactly `bars.len()` points.
pub fn run_backtest(
    bars: &[Bar],
    params: &StrategyParams,
    initial_capital: f64,
) -> Result<BacktestOutcome, BacktestError> {
    params.validate()?;
    validate_bars(bars)?;
    let frames = compute_frames(bars, &params.indicators)?;

    let costs = CostModel::new(&params.costs);
    let mut state = SimState::new(initial_capital);
    let mut equity_curve = Vec::with_capacity(bars.len());

    for i in 0..frames.len() {
        let bar = frames[i].bar;

        if state.position.is_some() {
            let closed = state.try_level_exits(&bar, &costs);
            if !closed && i > 0 {
                if let Some(side) = state.position.map(|p| p.side) {
                    if signals::should_exit(&frames[i - 1], &frames[i], side, &params.signals) {
                        let exec = costs.exit_price(side, bar.close);
                        state.close(exec, bar.timestamp, ExitReason::Signal, &costs);
                    }
                }
            }
            if let Some(pos) = state.position.as_mut() {
                advance_trailing(pos, &bar, params.risk.trailing_stop_pct);
            }
        }

        if state.position.is_none() && i > 0 {
            let eval = signals::evaluate_entry(&frames[i - 1], &frames[i], &params.signals);
            if eval.conflict {
                state.warnings.push(format!(
                    "{}: long and short entry rules fired together; staying flat",
                    bar.timestamp
                ));
            }
            match eval.signal.direction {
                Direction::Long => {
                    state.try_enter(Side::Long, eval.signal.strength, &bar, params, &costs)
                }
                Direction::Short => {
                    state.try_enter(Side::Short, eval.signal.strength, &bar, params, &costs)
                }
                Direction::Flat => {}
            }
        }

        equity_curve.push(EquityPoint {
            timestamp: bar.timestamp,
            equity: state.equity(bar.close),
        });
    }

    // Force-close any survivor at the last close. The final equity point is
    // rewritten so it reflects the realized exit costs.
    if state.position.is_some() {
        // compute_frames rejects empty input, so a last frame exists here
        if let Some(last) = frames.last() {
            let bar = last.bar;
            if let Some(side) = state.position.map(|p| p.side) {
                let exec = costs.exit_price(side, bar.close);
                state.close(exec, bar.timestamp, ExitReason::EndOfData, &costs);
            }
            if let Some(point) = equity_curve.last_mut() {
                point.equity = state.cash;
            }
        }
    }

    Ok(BacktestOutcome {
        trades: state.trades,
        equity_curve,
        warnings: state.warnings,
    })
}

/// Mutable simulation state: cash, the single optional position, and the
/// accumulating outputs.
struct SimState {
    cash: f64,
    position: Option<Position>,
    trades: Vec<Trade>,
    warnings: Vec<String>,
}

impl SimState {
    fn new(initial_capital: f64) -> Self {
        Self {
            cash: initial_capital,
            position: None,
            trades: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn equity(&self, close: f64) -> f64 {
        match &self.position {
            Some(pos) => self.cash + pos.market_value(close),
            None => self.cash,
        }
    }

    /// Check stop, target, and trailing levels against the bar's range, in
    /// that priority. The first hit closes the position at its level and
    /// nothing else is evaluated this bar. Returns true if an exit fired.
    fn try_level_exits(&mut self, bar: &Bar, costs: &CostModel) -> bool {
        let Some(pos) = self.position else {
            return false;
        };
        let trigger = match pos.side {
            Side::Long => {
                if bar.low <= pos.stop_loss {
                    Some((ExitReason::StopLoss, pos.stop_loss))
                } else if bar.high >= pos.take_profit {
                    Some((ExitReason::TakeProfit, pos.take_profit))
                } else if bar.low <= pos.trailing_stop {
                    Some((ExitReason::TrailingStop, pos.trailing_stop))
                } else {
                    None
                }
            }
            Side::Short => {
                if bar.high >= pos.stop_loss {
                    Some((ExitReason::StopLoss, pos.stop_loss))
                } else if bar.low <= pos.take_profit {
                    Some((ExitReason::TakeProfit, pos.take_profit))
                } else if bar.high >= pos.trailing_stop {
                    Some((ExitReason::TrailingStop, pos.trailing_stop))
                } else {
                    None
                }
            }
        };

        match trigger {
            Some((reason, level)) => {
                let exec = costs.exit_price(pos.side, level);
                self.close(exec, bar.timestamp, reason, costs);
                true
            }
            None => false,
        }
    }

    /// Close the open position at `exec_price`, settle cash, and record the
    /// trade. No-op when flat.
    fn close(&mut self, exec_price: f64, time: NaiveDateTime, reason: ExitReason, costs: &CostModel) {
        let Some(pos) = self.position.take() else {
            return;
        };
        let qty = pos.quantity as f64;
        let exit_commission = costs.commission_on(qty * exec_price);
        match pos.side {
            Side::Long => self.cash += qty * exec_price - exit_commission,
            Side::Short => self.cash -= qty * exec_price + exit_commission,
        }

        let commission = pos.entry_commission + exit_commission;
        let pnl = pos.side.sign() * qty * (exec_price - pos.entry_price) - commission;
        let entry_notional = qty * pos.entry_price;
        let return_pct = if entry_notional > 0.0 {
            pnl / entry_notional * 100.0
        } else {
            0.0
        };

        self.trades.push(Trade {
            side: pos.side,
            entry_time: pos.entry_time,
            exit_time: time,
            entry_price: pos.entry_price,
            exit_price: exec_price,
            quantity: pos.quantity,
            pnl,
            return_pct,
            exit_reason: reason,
            commission,
        });
    }

    /// Size and open a position at the bar close. Signal strength scales
    /// the risk fraction; a zero quantity or insufficient free cash is a
    /// silent no-op, a zero-distance stop is recorded as a warning.
    fn try_enter(
        &mut self,
        side: Side,
        strength: f64,
        bar: &Bar,
        params: &StrategyParams,
        costs: &CostModel,
    ) {
        let entry_exec = costs.entry_price(side, bar.close);
        let stop_loss = protective_stop(side, entry_exec, params.risk.stop_loss_pct);
        let scaled_risk = params.risk.risk_fraction * strength;

        let qty = match position_size(
            entry_exec,
            stop_loss,
            self.cash,
            scaled_risk,
            params.risk.max_position_fraction,
        ) {
            Ok(q) => q,
            Err(ZeroRiskError) => {
                self.warnings
                    .push(format!("{}: zero risk distance, entry skipped", bar.timestamp));
                return;
            }
        };
        if qty == 0 {
            return;
        }

        let notional = qty as f64 * entry_exec;
        if notional > self.cash {
            return;
        }

        let entry_commission = costs.commission_on(notional);
        match side {
            Side::Long => self.cash -= notional + entry_commission,
            Side::Short => self.cash += notional - entry_commission,
        }

        self.position = Some(Position {
            side,
            entry_time: bar.timestamp,
            entry_price: entry_exec,
            quantity: qty,
            stop_loss,
            take_profit: profit_target(side, entry_exec, params.risk.take_profit_pct),
            trailing_stop: trail_level(side, entry_exec, params.risk.trailing_stop_pct),
            highest_favorable: entry_exec,
            entry_commission,
        });
    }
}

fn protective_stop(side: Side, entry: f64, pct: f64) -> f64 {
    match side {
        Side::Long => entry * (1.0 - pct),
        Side::Short => entry * (1.0 + pct),
    }
}

fn profit_target(side: Side, entry: f64, pct: f64) -> f64 {
    match side {
        Side::Long => entry * (1.0 + pct),
        Side::Short => entry * (1.0 - pct),
    }
}

fn trail_level(side: Side, anchor: f64, pct: f64) -> f64 {
    match side {
        Side::Long => anchor * (1.0 - pct),
        Side::Short => anchor * (1.0 + pct),
    }
}

/// Advance the favorable extreme from this bar and tighten the trailing
/// stop behind it. Runs only on bars the position survives.
fn advance_trailing(pos: &mut Position, bar: &Bar, pct: f64) {
    match pos.side {
        Side::Long => pos.highest_favorable = pos.highest_favorable.max(bar.high),
        Side::Short => pos.highest_favorable = pos.highest_favorable.min(bar.low),
    }
    let proposed = trail_level(pos.side, pos.highest_favorable, pct);
    pos.trailing_stop = tighten(pos.side, pos.trailing_stop, proposed);
}
