//! Trade — a completed round trip, entry to exit.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::position::Side;

/// Why a position was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitReason {
    /// The signal generator flipped against the position.
    Signal,
    StopLoss,
    TrailingStop,
    TakeProfit,
    /// Force-closed at the last bar of the series.
    EndOfData,
}

impl ExitReason {
    /// Stable lowercase name used in CSV exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExitReason::Signal => "signal",
            ExitReason::StopLoss => "stop_loss",
            ExitReason::TrailingStop => "trailing_stop",
            ExitReason::TakeProfit => "take_profit",
            ExitReason::EndOfData => "end_of_data",
        }
    }
}

/// A complete round-trip trade. Immutable once recorded.
///
/// Prices are execution prices (slippage included). `pnl` is net of the
/// round-trip commission; `return_pct` is pnl over the entry notional,
/// in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub side: Side,
    pub entry_time: NaiveDateTime,
    pub exit_time: NaiveDateTime,
    pub entry_price: f64,
    pub exit_price: f64,
    pub quantity: u64,
    pub pnl: f64,
    pub return_pct: f64,
    pub exit_reason: ExitReason,
    pub commission: f64,
}

impl Trade {
    pub fn is_winner(&self) -> bool {
        self.pnl > 0.0
    }

    /// Holding period in days, fractional for intraday timestamps.
    pub fn holding_days(&self) -> f64 {
        (self.exit_time - self.entry_time).num_seconds() as f64 / 86_400.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_trade() -> Trade {
        let entry = NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let exit = NaiveDate::from_ymd_opt(2024, 1, 11)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        Trade {
            side: Side::Long,
            entry_time: entry,
            exit_time: exit,
            entry_price: 100.0,
            exit_price: 110.0,
            quantity: 50,
            pnl: 485.0,
            return_pct: 9.7,
            exit_reason: ExitReason::TakeProfit,
            commission: 15.0,
        }
    }

    #[test]
    fn winner_and_holding_days() {
        let trade = sample_trade();
        assert!(trade.is_winner());
        assert!((trade.holding_days() - 6.0).abs() < 1e-12);
    }

    #[test]
    fn exit_reason_names_are_stable() {
        assert_eq!(ExitReason::StopLoss.as_str(), "stop_loss");
        assert_eq!(ExitReason::EndOfData.as_str(), "end_of_data");
        // serde uses the same snake_case names
        assert_eq!(
            serde_json::to_string(&ExitReason::TrailingStop).unwrap(),
            "\"trailing_stop\""
        );
    }

    #[test]
    fn trade_serialization_roundtrip() {
        let trade = sample_trade();
        let json = serde_json::to_string(&trade).unwrap();
        let deser: Trade = serde_json::from_str(&json).unwrap();
        assert_eq!(trade, deser);
    }
}
