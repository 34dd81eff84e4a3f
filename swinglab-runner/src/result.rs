//! Result types for single runs and batches.

use serde::{Deserialize, Serialize};
use swinglab_core::domain::{Bar, EquityPoint, Trade};
use swinglab_core::engine::BacktestOutcome;
use swinglab_core::metrics::PerformanceReport;

use crate::config::{RunConfig, RunId};

/// Current schema version for persisted artifacts.
pub const SCHEMA_VERSION: u32 = 1;

/// Default schema version for deserializing older JSON without the field.
fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Complete result of one symbol's run.
///
/// Everything the run produced plus enough metadata to reproduce it:
/// the config fingerprint, the date span, and the starting capital.
/// Warnings are carried verbatim from the engine; nothing here prints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolOutcome {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub run_id: RunId,
    pub symbol: String,
    pub start_date: String,
    pub end_date: String,
    pub initial_capital: f64,
    pub bar_count: usize,
    pub report: PerformanceReport,
    pub trades: Vec<Trade>,
    pub equity_curve: Vec<EquityPoint>,
    pub warnings: Vec<String>,
}

impl SymbolOutcome {
    /// Assemble the persisted result from a finished engine run.
    pub fn from_run(
        symbol: &str,
        config: &RunConfig,
        bars: &[Bar],
        outcome: BacktestOutcome,
    ) -> Self {
        let report = PerformanceReport::compute(
            &outcome.equity_curve,
            &outcome.trades,
            config.initial_capital,
            &config.strategy.metrics,
        );
        let start_date = bars
            .first()
            .map(|b| b.timestamp.date().to_string())
            .unwrap_or_default();
        let end_date = bars
            .last()
            .map(|b| b.timestamp.date().to_string())
            .unwrap_or_default();

        Self {
            schema_version: SCHEMA_VERSION,
            run_id: config.run_id(),
            symbol: symbol.to_string(),
            start_date,
            end_date,
            initial_capital: config.initial_capital,
            bar_count: bars.len(),
            report,
            trades: outcome.trades,
            equity_curve: outcome.equity_curve,
            warnings: outcome.warnings,
        }
    }

    /// Final account equity; the starting capital when the curve is empty.
    pub fn final_equity(&self) -> f64 {
        self.equity_curve
            .last()
            .map(|p| p.equity)
            .unwrap_or(self.initial_capital)
    }
}

/// Record of a symbol that could not be processed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolFailure {
    pub symbol: String,
    pub error: String,
    /// True when the error class allows the batch to keep going (it always
    /// does — this records whether the error was the recoverable kind, e.g.
    /// too few bars, as opposed to corrupt data).
    pub recoverable: bool,
}

/// Aggregate of a whole batch: per-symbol outcomes, failures, and symbols
/// skipped by cancellation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub run_id: RunId,
    pub outcomes: Vec<SymbolOutcome>,
    pub failures: Vec<SymbolFailure>,
    pub skipped: Vec<String>,
}

impl BatchSummary {
    /// Total symbols the batch was asked to process.
    pub fn total(&self) -> usize {
        self.outcomes.len() + self.failures.len() + self.skipped.len()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty() && self.skipped.is_empty()
    }

    /// Outcomes sorted by total return, best first.
    pub fn ranked(&self) -> Vec<&SymbolOutcome> {
        let mut sorted: Vec<_> = self.outcomes.iter().collect();
        sorted.sort_by(|a, b| {
            b.report
                .total_return_pct
                .partial_cmp(&a.report.total_return_pct)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        sorted
    }
}
