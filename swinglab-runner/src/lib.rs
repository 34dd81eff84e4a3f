//! SwingLab Runner — run orchestration around the engine.
//!
//! This crate builds on `swinglab-core` to provide:
//! - TOML run configs with deterministic BLAKE3 run IDs
//! - CSV bar loading with validation
//! - A seeded synthetic bar generator for demos and tests
//! - Batch execution over a rayon pool with skip-and-continue failures
//!   and cooperative cancellation
//! - Artifact export (JSON manifest, trade and equity CSVs) and plain-text
//!   report rendering

pub mod batch;
pub mod config;
pub mod data;
pub mod export;
pub mod report;
pub mod result;
pub mod synthetic;

pub use batch::{run_symbol, Batch};
pub use config::{RunConfig, RunId};
pub use data::{bars_to_csv, load_bars_csv, parse_bars_csv};
pub use export::{
    export_equity_csv, export_json, export_trades_csv, import_json, load_artifacts,
    save_artifacts,
};
pub use report::{render_batch_table, render_report};
pub use result::{BatchSummary, SymbolFailure, SymbolOutcome, SCHEMA_VERSION};
pub use synthetic::{generate_bars, generate_default_bars, symbol_seed, WalkParams};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn run_config_is_send_sync() {
        assert_send::<RunConfig>();
        assert_sync::<RunConfig>();
    }

    #[test]
    fn symbol_outcome_is_send_sync() {
        assert_send::<SymbolOutcome>();
        assert_sync::<SymbolOutcome>();
    }

    #[test]
    fn batch_summary_is_send_sync() {
        assert_send::<BatchSummary>();
        assert_sync::<BatchSummary>();
    }

    #[test]
    fn batch_is_send_sync() {
        assert_send::<Batch>();
        assert_sync::<Batch>();
    }
}
