//! Error taxonomy for the engine.
//!
//! Three tiers: data integrity problems are fatal for the run and surface
//! before any simulation state exists; insufficient data is recoverable at
//! batch level (skip the symbol); zero-risk sizing is recoverable within a
//! run (no trade that bar). Degenerate metric ratios never error — each
//! statistic documents its fallback value instead.

use thiserror::Error;

/// The input series is unusable. Raised by validation before the simulator
/// touches any state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataIntegrityError {
    #[error("timestamps not strictly increasing at row {index}")]
    NonMonotonicTimestamps { index: usize },
    #[error("duplicate timestamp at row {index}")]
    DuplicateTimestamp { index: usize },
    #[error("high below low at row {index}")]
    InvertedRange { index: usize },
    #[error("non-finite price at row {index}")]
    NonFinitePrice { index: usize },
}

/// Fewer bars than the largest configured indicator period.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("insufficient data: {required} bars required by the configured periods, got {actual}")]
pub struct InsufficientDataError {
    pub required: usize,
    pub actual: usize,
}

/// Stop price coincides with entry price, so risk per share is zero and no
/// meaningful quantity exists. Callers treat this as "no trade".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("stop price equals entry price; risk per share is zero")]
pub struct ZeroRiskError;

/// The parameter object is invalid. Checked up front, before any symbol is
/// processed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("macd_fast ({fast}) must be strictly less than macd_slow ({slow})")]
    MacdPeriods { fast: usize, slow: usize },
    #[error("{name} must be at least 1")]
    ZeroPeriod { name: &'static str },
    #[error("{name} out of range: {value}")]
    OutOfRange { name: &'static str, value: f64 },
}

/// Top-level error for a single backtest run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BacktestError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("data integrity error: {0}")]
    Data(#[from] DataIntegrityError),
    #[error(transparent)]
    InsufficientData(#[from] InsufficientDataError),
}

impl BacktestError {
    /// True when a batch should skip the symbol and keep going rather than
    /// abort the whole run.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, BacktestError::InsufficientData(_))
    }
}
