//! Performance metrics — pure functions that reduce a finished run to
//! summary statistics.
//!
//! Every metric is a pure function: equity curve and/or trade list in,
//! scalar out. Degenerate inputs (empty curves, zero denominators) resolve
//! to 0.0 or the documented profit-factor sentinel; nothing here returns an
//! error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::MetricsParams;
use crate::domain::{EquityPoint, Trade};

/// Profit factor reported when there are gross profits but no gross losses.
pub const PROFIT_FACTOR_CAP: f64 = 100.0;

/// Aggregate statistics for a single run.
///
/// Percent fields (`*_pct`, `cagr`) are expressed in percent points;
/// `win_rate` is a fraction in `[0, 1]`; `avg_loss` and `max_drawdown_pct`
/// are positive magnitudes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub total_return_pct: f64,
    pub cagr: f64,
    pub sharpe_ratio: f64,
    pub sortino_ratio: f64,
    pub max_drawdown_pct: f64,
    pub win_rate: f64,
    pub profit_factor: f64,
    pub total_trades: usize,
    pub avg_win: f64,
    pub avg_loss: f64,
    pub max_consecutive_wins: usize,
    pub max_consecutive_losses: usize,
    pub avg_holding_days: f64,
}

impl PerformanceReport {
    /// Compute all metrics from an equity curve and trade list.
    pub fn compute(
        equity_curve: &[EquityPoint],
        trades: &[Trade],
        initial_capital: f64,
        params: &MetricsParams,
    ) -> Self {
        Self {
            total_return_pct: total_return_pct(equity_curve, initial_capital),
            cagr: cagr(equity_curve, initial_capital),
            sharpe_ratio: sharpe_ratio(
                equity_curve,
                params.risk_free_rate,
                params.periods_per_year,
            ),
            sortino_ratio: sortino_ratio(
                equity_curve,
                params.risk_free_rate,
                params.periods_per_year,
            ),
            max_drawdown_pct: max_drawdown_pct(equity_curve),
            win_rate: win_rate(trades),
            profit_factor: profit_factor(trades),
            total_trades: trades.len(),
            avg_win: avg_win(trades),
            avg_loss: avg_loss(trades),
            max_consecutive_wins: max_consecutive_wins(trades),
            max_consecutive_losses: max_consecutive_losses(trades),
            avg_holding_days: avg_holding_days(trades),
        }
    }

    /// The report as a flat name → number mapping, for tabular consumers.
    pub fn as_map(&self) -> BTreeMap<&'static str, f64> {
        let mut map = BTreeMap::new();
        map.insert("total_return_pct", self.total_return_pct);
        map.insert("cagr", self.cagr);
        map.insert("sharpe_ratio", self.sharpe_ratio);
        map.insert("sortino_ratio", self.sortino_ratio);
        map.insert("max_drawdown_pct", self.max_drawdown_pct);
        map.insert("win_rate", self.win_rate);
        map.insert("profit_factor", self.profit_factor);
        map.insert("total_trades", self.total_trades as f64);
        map.insert("avg_win", self.avg_win);
        map.insert("avg_loss", self.avg_loss);
        map.insert("max_consecutive_wins", self.max_consecutive_wins as f64);
        map.insert("max_consecutive_losses", self.max_consecutive_losses as f64);
        map.insert("avg_holding_days", self.avg_holding_days);
        map
    }
}

// ─── Individual metric functions ────────────────────────────────────

/// Total return in percent: `(final / initial − 1) · 100`.
pub fn total_return_pct(equity_curve: &[EquityPoint], initial_capital: f64) -> f64 {
    let Some(last) = equity_curve.last() else {
        return 0.0;
    };
    if initial_capital <= 0.0 {
        return 0.0;
    }
    (last.equity / initial_capital - 1.0) * 100.0
}

/// Compound annual growth rate in percent.
///
/// Years are taken from the curve's first and last timestamps as
/// `days / 365.25`, so the figure does not depend on bar frequency.
/// Returns 0.0 when the span is zero or either endpoint is non-positive.
pub fn cagr(equity_curve: &[EquityPoint], initial_capital: f64) -> f64 {
    if equity_curve.len() < 2 {
        return 0.0;
    }
    let first = equity_curve[0];
    let Some(last) = equity_curve.last() else {
        return 0.0;
    };
    if initial_capital <= 0.0 || last.equity <= 0.0 {
        return 0.0;
    }
    let days = (last.timestamp - first.timestamp).num_days();
    let years = days as f64 / 365.25;
    if years <= 0.0 {
        return 0.0;
    }
    ((last.equity / initial_capital).powf(1.0 / years) - 1.0) * 100.0
}

/// Annualized Sharpe ratio from per-bar simple returns.
///
/// `sqrt(periods_per_year) · mean(excess) / std(excess)` with
/// `excess = return − risk_free_rate / periods_per_year` and the sample
/// standard deviation. Returns 0.0 when the variance vanishes or fewer
/// than two returns exist.
pub fn sharpe_ratio(equity_curve: &[EquityPoint], risk_free_rate: f64, periods_per_year: f64) -> f64 {
    let returns = bar_returns(equity_curve);
    if returns.len() < 2 || periods_per_year <= 0.0 {
        return 0.0;
    }
    let per_bar_rf = risk_free_rate / periods_per_year;
    let excess: Vec<f64> = returns.iter().map(|r| r - per_bar_rf).collect();
    let mean = mean_f64(&excess);
    let std = std_dev(&excess);
    if std < 1e-15 {
        return 0.0;
    }
    (mean / std) * periods_per_year.sqrt()
}

/// Annualized Sortino ratio: Sharpe numerator over downside deviation.
///
/// Downside deviation is the root mean square of the negative excess
/// returns, normalized by the full return count. Returns 0.0 when no
/// negative excess return exists.
pub fn sortino_ratio(
    equity_curve: &[EquityPoint],
    risk_free_rate: f64,
    periods_per_year: f64,
) -> f64 {
    let returns = bar_returns(equity_curve);
    if returns.len() < 2 || periods_per_year <= 0.0 {
        return 0.0;
    }
    let per_bar_rf = risk_free_rate / periods_per_year;
    let excess: Vec<f64> = returns.iter().map(|r| r - per_bar_rf).collect();
    let mean = mean_f64(&excess);

    let downside_sq: Vec<f64> = excess.iter().filter(|&&r| r < 0.0).map(|r| r * r).collect();
    if downside_sq.is_empty() {
        return 0.0;
    }
    let downside_std = (downside_sq.iter().sum::<f64>() / returns.len() as f64).sqrt();
    if downside_std < 1e-15 {
        return 0.0;
    }
    (mean / downside_std) * periods_per_year.sqrt()
}

/// Maximum peak-to-trough drawdown as a positive percentage.
///
/// A curve that never falls below its running peak reports 0.0.
pub fn max_drawdown_pct(equity_curve: &[EquityPoint]) -> f64 {
    if equity_curve.len() < 2 {
        return 0.0;
    }
    let mut peak = equity_curve[0].equity;
    let mut worst = 0.0_f64;
    for point in equity_curve {
        if point.equity > peak {
            peak = point.equity;
        }
        if peak > 0.0 {
            let dd = (point.equity - peak) / peak;
            if dd < worst {
                worst = dd;
            }
        }
    }
    -worst * 100.0
}

/// Fraction of trades with positive pnl, in `[0, 1]`.
pub fn win_rate(trades: &[Trade]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    let winners = trades.iter().filter(|t| t.is_winner()).count();
    winners as f64 / trades.len() as f64
}

/// Profit factor: gross profits over gross losses.
///
/// With profits but no losses the ratio is reported as
/// [`PROFIT_FACTOR_CAP`] instead of infinity; the same cap bounds the
/// ratio from above.
pub fn profit_factor(trades: &[Trade]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    let gross_profit: f64 = trades.iter().filter(|t| t.pnl > 0.0).map(|t| t.pnl).sum();
    let gross_loss: f64 = trades
        .iter()
        .filter(|t| t.pnl < 0.0)
        .map(|t| t.pnl.abs())
        .sum();

    if gross_loss < 1e-10 {
        return if gross_profit > 0.0 {
            PROFIT_FACTOR_CAP
        } else {
            0.0
        };
    }
    (gross_profit / gross_loss).min(PROFIT_FACTOR_CAP)
}

/// Mean pnl of winning trades; 0.0 when there are none.
pub fn avg_win(trades: &[Trade]) -> f64 {
    let wins: Vec<f64> = trades.iter().filter(|t| t.pnl > 0.0).map(|t| t.pnl).collect();
    mean_f64(&wins)
}

/// Mean loss magnitude of losing trades, as a positive number; 0.0 when
/// there are none.
pub fn avg_loss(trades: &[Trade]) -> f64 {
    let losses: Vec<f64> = trades
        .iter()
        .filter(|t| t.pnl < 0.0)
        .map(|t| t.pnl.abs())
        .collect();
    mean_f64(&losses)
}

/// Longest run of consecutive winning trades.
pub fn max_consecutive_wins(trades: &[Trade]) -> usize {
    max_consecutive(trades, true)
}

/// Longest run of consecutive losing trades.
pub fn max_consecutive_losses(trades: &[Trade]) -> usize {
    max_consecutive(trades, false)
}

/// Mean holding period across trades, in days; 0.0 when there are none.
pub fn avg_holding_days(trades: &[Trade]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    trades.iter().map(|t| t.holding_days()).sum::<f64>() / trades.len() as f64
}

// ─── Helpers ────────────────────────────────────────────────────────

/// Per-bar simple returns from the equity curve.
pub fn bar_returns(equity_curve: &[EquityPoint]) -> Vec<f64> {
    if equity_curve.len() < 2 {
        return Vec::new();
    }
    equity_curve
        .windows(2)
        .map(|w| {
            if w[0].equity > 0.0 {
                (w[1].equity - w[0].equity) / w[0].equity
            } else {
                0.0
            }
        })
        .collect()
}

pub(crate) fn mean_f64(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub(crate) fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = mean_f64(values);
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

fn max_consecutive(trades: &[Trade], winners: bool) -> usize {
    let mut max_streak = 0;
    let mut current = 0;
    for trade in trades {
        if trade.is_winner() == winners {
            current += 1;
            if current > max_streak {
                max_streak = current;
            }
        } else {
            current = 0;
        }
    }
    max_streak
}
