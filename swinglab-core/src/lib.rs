//! SwingLab Core — indicators, entry/exit rules, and the trade simulator.
//!
//! This crate contains the heart of the backtesting pipeline:
//! - Domain types (bars, indicator frames, signals, positions, trades)
//! - Indicator pipeline (RSI, MACD, ATR, Supertrend, moving averages)
//! - Entry/exit rule evaluation with signal strength scoring
//! - Risk-based position sizing
//! - Single-position bar-by-bar simulator with exact cash accounting
//! - Performance metrics reducer
//!
//! The core crosses no file, network, or process boundary; callers feed it
//! bars and a parameter object and receive trades, an equity curve, and
//! warnings as plain data.

pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod error;
pub mod indicators;
pub mod metrics;
pub mod signals;
pub mod sizing;
