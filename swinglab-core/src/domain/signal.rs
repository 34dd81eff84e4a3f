//! Signal — the per-bar verdict handed from the generator to the simulator.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Trade direction for a bar. `Flat` means "do nothing".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Long,
    Short,
    Flat,
}

/// Entry verdict for one bar.
///
/// `strength` is a sizing hint in `[0, 1]`; it scales the risk fraction at
/// sizing time and never gates the entry itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub timestamp: NaiveDateTime,
    pub direction: Direction,
    pub strength: f64,
}

impl Signal {
    pub fn flat(timestamp: NaiveDateTime) -> Self {
        Self {
            timestamp,
            direction: Direction::Flat,
            strength: 0.0,
        }
    }
}
