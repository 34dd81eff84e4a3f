//! Strategy parameters — one explicit, immutable value object.
//!
//! Every tunable of the pipeline lives here: indicator periods, signal
//! thresholds, risk and cost fractions, and metric conventions. There is no
//! global configuration; callers construct (or deserialize) a
//! [`StrategyParams`] and pass it down. `Default` reproduces the stock
//! swing-trading setup.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Which moving average family drives the long-horizon trend filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaType {
    Ema,
    Sma,
}

/// Lookback periods for the indicator pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorParams {
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub atr_period: usize,
    pub supertrend_period: usize,
    pub supertrend_multiplier: f64,
    pub ema_fast_period: usize,
    pub ema_trend_period: usize,
    pub volume_ma_period: usize,
    pub trend_ma_type: MaType,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            atr_period: 14,
            supertrend_period: 10,
            supertrend_multiplier: 3.0,
            ema_fast_period: 50,
            ema_trend_period: 200,
            volume_ma_period: 20,
            trend_ma_type: MaType::Ema,
        }
    }
}

impl IndicatorParams {
    /// The largest configured lookback. A series shorter than this cannot
    /// produce a single ready frame.
    pub fn largest_period(&self) -> usize {
        [
            self.rsi_period,
            self.macd_fast,
            self.macd_slow,
            self.macd_signal,
            self.atr_period,
            self.supertrend_period,
            self.ema_fast_period,
            self.ema_trend_period,
            self.volume_ma_period,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }
}

/// Thresholds for the entry/exit rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalParams {
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
    /// Minimum rolling average volume for an entry to qualify.
    pub min_volume_avg: f64,
    /// Single-bar close-to-close move above this fraction blocks entries.
    pub shock_threshold: f64,
}

impl Default for SignalParams {
    fn default() -> Self {
        Self {
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            min_volume_avg: 100_000.0,
            shock_threshold: 0.04,
        }
    }
}

/// Sizing and protective-level fractions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskParams {
    /// Fraction of equity put at risk per trade, scaled by signal strength.
    pub risk_fraction: f64,
    /// Cap on position notional as a fraction of equity.
    pub max_position_fraction: f64,
    pub stop_loss_pct: f64,
    pub take_profit_pct: f64,
    pub trailing_stop_pct: f64,
}

impl Default for RiskParams {
    fn default() -> Self {
        Self {
            risk_fraction: 0.02,
            max_position_fraction: 0.20,
            stop_loss_pct: 0.02,
            take_profit_pct: 0.04,
            trailing_stop_pct: 0.01,
        }
    }
}

/// Proportional execution costs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostParams {
    /// Commission as a fraction of executed notional, charged each side.
    pub commission: f64,
    /// Slippage as a fraction of price, applied against the fill.
    pub slippage: f64,
}

impl Default for CostParams {
    fn default() -> Self {
        Self {
            commission: 0.001,
            slippage: 0.0005,
        }
    }
}

/// Conventions for the metrics reducer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsParams {
    /// Annual risk-free rate used for Sharpe/Sortino excess returns.
    pub risk_free_rate: f64,
    /// Bars per year for annualization.
    pub periods_per_year: f64,
}

impl Default for MetricsParams {
    fn default() -> Self {
        Self {
            risk_free_rate: 0.06,
            periods_per_year: 252.0,
        }
    }
}

/// The complete parameter object for one strategy evaluation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyParams {
    pub indicators: IndicatorParams,
    pub signals: SignalParams,
    pub risk: RiskParams,
    pub costs: CostParams,
    pub metrics: MetricsParams,
}

impl StrategyParams {
    /// Reject invalid combinations before any bar is touched.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ind = &self.indicators;
        for (name, period) in [
            ("rsi_period", ind.rsi_period),
            ("macd_fast", ind.macd_fast),
            ("macd_slow", ind.macd_slow),
            ("macd_signal", ind.macd_signal),
            ("atr_period", ind.atr_period),
            ("supertrend_period", ind.supertrend_period),
            ("ema_fast_period", ind.ema_fast_period),
            ("ema_trend_period", ind.ema_trend_period),
            ("volume_ma_period", ind.volume_ma_period),
        ] {
            if period == 0 {
                return Err(ConfigError::ZeroPeriod { name });
            }
        }
        if ind.macd_fast >= ind.macd_slow {
            return Err(ConfigError::MacdPeriods {
                fast: ind.macd_fast,
                slow: ind.macd_slow,
            });
        }
        if !(ind.supertrend_multiplier > 0.0 && ind.supertrend_multiplier.is_finite()) {
            return Err(ConfigError::OutOfRange {
                name: "supertrend_multiplier",
                value: ind.supertrend_multiplier,
            });
        }

        let sig = &self.signals;
        if !(sig.rsi_oversold > 0.0 && sig.rsi_oversold < 100.0) {
            return Err(ConfigError::OutOfRange {
                name: "rsi_oversold",
                value: sig.rsi_oversold,
            });
        }
        if !(sig.rsi_overbought > 0.0 && sig.rsi_overbought < 100.0) {
            return Err(ConfigError::OutOfRange {
                name: "rsi_overbought",
                value: sig.rsi_overbought,
            });
        }
        if sig.rsi_oversold >= sig.rsi_overbought {
            return Err(ConfigError::OutOfRange {
                name: "rsi_oversold",
                value: sig.rsi_oversold,
            });
        }
        if !(sig.min_volume_avg >= 0.0) {
            return Err(ConfigError::OutOfRange {
                name: "min_volume_avg",
                value: sig.min_volume_avg,
            });
        }
        if !(sig.shock_threshold > 0.0) {
            return Err(ConfigError::OutOfRange {
                name: "shock_threshold",
                value: sig.shock_threshold,
            });
        }

        let risk = &self.risk;
        if !(risk.risk_fraction > 0.0 && risk.risk_fraction <= 0.1) {
            return Err(ConfigError::OutOfRange {
                name: "risk_fraction",
                value: risk.risk_fraction,
            });
        }
        if !(risk.max_position_fraction > 0.0 && risk.max_position_fraction <= 1.0) {
            return Err(ConfigError::OutOfRange {
                name: "max_position_fraction",
                value: risk.max_position_fraction,
            });
        }
        for (name, value) in [
            ("stop_loss_pct", risk.stop_loss_pct),
            ("take_profit_pct", risk.take_profit_pct),
            ("trailing_stop_pct", risk.trailing_stop_pct),
        ] {
            if !(value > 0.0 && value < 1.0) {
                return Err(ConfigError::OutOfRange { name, value });
            }
        }

        let costs = &self.costs;
        for (name, value) in [
            ("commission", costs.commission),
            ("slippage", costs.slippage),
        ] {
            if !(value >= 0.0 && value < 1.0) {
                return Err(ConfigError::OutOfRange { name, value });
            }
        }

        let metrics = &self.metrics;
        if !(metrics.periods_per_year > 0.0) {
            return Err(ConfigError::OutOfRange {
                name: "periods_per_year",
                value: metrics.periods_per_year,
            });
        }
        if !metrics.risk_free_rate.is_finite() {
            return Err(ConfigError::OutOfRange {
                name: "risk_free_rate",
                value: metrics.risk_free_rate,
            });
        }

        Ok(())
    }
}
