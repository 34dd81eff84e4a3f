//! EquityPoint — one mark-to-market observation per bar.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Account equity (cash plus open-position mark) at a bar's close.
/// The simulator emits exactly one of these per input bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub timestamp: NaiveDateTime,
    pub equity: f64,
}
