//! Trade simulation: execution costs, stop ratcheting, and the bar loop.

pub mod costs;
pub mod ratchet;
pub mod simulator;

pub use costs::CostModel;
pub use simulator::{run_backtest, BacktestOutcome};
