//! Batch execution — one run per symbol over a worker pool.
//!
//! A batch validates the config once up front (an invalid config aborts
//! before any symbol is touched), then fans the symbols out with rayon.
//! Per-symbol failures never abort the batch: the symbol is recorded as a
//! failure and the rest keep going. Cancellation is cooperative — a shared
//! flag checked before each symbol starts, never mid-bar — so a cancelled
//! batch still reports completed symbols and lists the rest as skipped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rayon::prelude::*;
use swinglab_core::domain::Bar;
use swinglab_core::engine::run_backtest;
use swinglab_core::error::{BacktestError, ConfigError};

use crate::config::RunConfig;
use crate::result::{BatchSummary, SymbolFailure, SymbolOutcome, SCHEMA_VERSION};

/// Run one symbol end to end: simulate, reduce to metrics, package.
pub fn run_symbol(
    symbol: &str,
    bars: &[Bar],
    config: &RunConfig,
) -> Result<SymbolOutcome, BacktestError> {
    let outcome = run_backtest(bars, &config.strategy, config.initial_capital)?;
    Ok(SymbolOutcome::from_run(symbol, config, bars, outcome))
}

/// Batch executor over `(symbol, bars)` pairs.
pub struct Batch {
    parallel: bool,
    cancel: Arc<AtomicBool>,
}

impl Batch {
    pub fn new() -> Self {
        Self {
            parallel: true,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Enables or disables parallel execution.
    pub fn with_parallelism(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Handle another thread can set to stop the batch between symbols.
    pub fn cancel_token(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Execute the batch. Fails fast on an invalid config; everything after
    /// that is skip-and-continue.
    pub fn run(
        &self,
        series: &[(String, Vec<Bar>)],
        config: &RunConfig,
    ) -> Result<BatchSummary, ConfigError> {
        config.validate()?;

        let items: Vec<Item> = if self.parallel {
            series
                .par_iter()
                .map(|(symbol, bars)| self.run_one(symbol, bars, config))
                .collect()
        } else {
            series
                .iter()
                .map(|(symbol, bars)| self.run_one(symbol, bars, config))
                .collect()
        };

        let mut outcomes = Vec::new();
        let mut failures = Vec::new();
        let mut skipped = Vec::new();
        for item in items {
            match item {
                Item::Done(outcome) => outcomes.push(outcome),
                Item::Failed(failure) => failures.push(failure),
                Item::Skipped(symbol) => skipped.push(symbol),
            }
        }

        Ok(BatchSummary {
            schema_version: SCHEMA_VERSION,
            run_id: config.run_id(),
            outcomes,
            failures,
            skipped,
        })
    }

    fn run_one(&self, symbol: &str, bars: &[Bar], config: &RunConfig) -> Item {
        if self.cancel.load(Ordering::Relaxed) {
            return Item::Skipped(symbol.to_string());
        }
        match run_symbol(symbol, bars, config) {
            Ok(outcome) => Item::Done(outcome),
            Err(err) => Item::Failed(SymbolFailure {
                symbol: symbol.to_string(),
                error: err.to_string(),
                recoverable: err.is_recoverable(),
            }),
        }
    }
}

impl Default for Batch {
    fn default() -> Self {
        Self::new()
    }
}

enum Item {
    Done(SymbolOutcome),
    Failed(SymbolFailure),
    Skipped(String),
}
