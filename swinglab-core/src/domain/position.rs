//! Position — the single open holding the simulator may carry.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Which side of the market a position is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Side {
    Long,
    Short,
}

impl Side {
    /// +1.0 for long, -1.0 for short. Multiplies price moves into pnl.
    pub fn sign(&self) -> f64 {
        match self {
            Side::Long => 1.0,
            Side::Short => -1.0,
        }
    }
}

/// An open position. The simulator holds at most one at a time.
///
/// `entry_price` already includes slippage. `highest_favorable` tracks the
/// best price seen since entry on the profitable side and drives the
/// trailing stop; `trailing_stop` itself only ever tightens.
/// `entry_commission` is carried so the round-trip cost lands in the trade's
/// pnl at exit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub side: Side,
    pub entry_time: NaiveDateTime,
    pub entry_price: f64,
    pub quantity: u64,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub trailing_stop: f64,
    pub highest_favorable: f64,
    pub entry_commission: f64,
}

impl Position {
    /// Signed mark-to-market value at `price`: positive for longs,
    /// negative (a liability to buy back) for shorts.
    pub fn market_value(&self, price: f64) -> f64 {
        self.side.sign() * self.quantity as f64 * price
    }
}
