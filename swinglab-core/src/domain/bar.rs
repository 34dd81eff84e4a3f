//! Bar — the fundamental market data unit.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// OHLCV bar at a single timestamp.
///
/// Bars are immutable once ingested; every downstream stage reads them by
/// reference and produces new values. Ordering and sanity are enforced by
/// [`crate::data::validate_bars`] before any simulation state exists.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl Bar {
    /// Returns true if every price field is finite.
    pub fn prices_finite(&self) -> bool {
        self.open.is_finite()
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite()
    }

    /// Midpoint of the bar's range, used by band-based indicators.
    pub fn hl2(&self) -> f64 {
        (self.high + self.low) / 2.0
    }
}
