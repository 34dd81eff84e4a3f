//! Risk-based position sizing.
//!
//! Classic fixed-fraction sizing against the stop distance: risk a fraction
//! of equity per trade, with the stop defining the per-share risk. The
//! returned quantity is a whole number of shares and may be zero — zero
//! means "no trade", never an error.

use crate::error::ZeroRiskError;

/// Shares to buy (or sell short) for one entry.
///
/// `risk_fraction` is the fraction of `equity` put at risk if the stop is
/// hit (callers scale it by signal strength first). The position notional
/// is additionally capped at `equity * max_position_fraction`.
///
/// # Formula
/// ```text
/// risk_per_share = |entry_price - stop_price|
/// quantity = floor(equity * risk_fraction / risk_per_share)
/// quantity = min(quantity, floor(equity * max_position_fraction / entry_price))
/// ```
///
/// A stop sitting exactly on the entry price makes the risk per share zero
/// and no finite quantity exists; that is the one error case.
pub fn position_size(
    entry_price: f64,
    stop_price: f64,
    equity: f64,
    risk_fraction: f64,
    max_position_fraction: f64,
) -> Result<u64, ZeroRiskError> {
    let risk_per_share = (entry_price - stop_price).abs();
    if risk_per_share <= 0.0 || !risk_per_share.is_finite() {
        return Err(ZeroRiskError);
    }
    if equity <= 0.0 || entry_price <= 0.0 {
        return Ok(0);
    }

    let risk_budget = equity * risk_fraction;
    let by_risk = (risk_budget / risk_per_share).floor() as u64;
    let by_notional = (equity * max_position_fraction / entry_price).floor() as u64;

    Ok(by_risk.min(by_notional))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_budget_drives_the_size() {
        // 100k equity, 1% risk = 1000 at risk; 2.0 per share → 500 shares,
        // well under the 50% notional cap (50k / 100 = 500... exactly at it).
        let qty = position_size(100.0, 98.0, 100_000.0, 0.01, 0.5).unwrap();
        assert_eq!(qty, 500);
    }

    #[test]
    fn notional_cap_binds() {
        // Risk alone would allow 2000 shares; 20% of equity caps at 200.
        let qty = position_size(100.0, 99.0, 100_000.0, 0.02, 0.2).unwrap();
        assert_eq!(qty, 200);
    }

    #[test]
    fn fractional_shares_floor_to_zero() {
        // Risk budget 10, risk per share 15 → 0 shares, not an error.
        let qty = position_size(100.0, 85.0, 1_000.0, 0.01, 1.0).unwrap();
        assert_eq!(qty, 0);
    }

    #[test]
    fn zero_risk_distance_is_an_error() {
        assert_eq!(
            position_size(100.0, 100.0, 100_000.0, 0.02, 0.2),
            Err(ZeroRiskError)
        );
    }

    #[test]
    fn short_side_stop_above_entry() {
        // Same distance, stop above entry (short): |98 - 100| = 2.
        let qty = position_size(98.0, 100.0, 100_000.0, 0.01, 0.5).unwrap();
        assert_eq!(qty, 500);
    }

    #[test]
    fn depleted_equity_sizes_zero() {
        assert_eq!(position_size(100.0, 98.0, 0.0, 0.02, 0.2).unwrap(), 0);
        assert_eq!(position_size(100.0, 98.0, -50.0, 0.02, 0.2).unwrap(), 0);
    }
}
