//! Execution cost model: proportional slippage and commission.
//!
//! Slippage always moves the fill against the trader: buys pay up, sells
//! receive less. Commission is a fraction of the executed notional, charged
//! separately on entry and on exit.

use crate::config::CostParams;
use crate::domain::Side;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostModel {
    slippage: f64,
    commission: f64,
}

impl CostModel {
    pub fn new(params: &CostParams) -> Self {
        Self {
            slippage: params.slippage,
            commission: params.commission,
        }
    }

    fn buy(&self, price: f64) -> f64 {
        price * (1.0 + self.slippage)
    }

    fn sell(&self, price: f64) -> f64 {
        price * (1.0 - self.slippage)
    }

    /// Execution price for opening a position on `side` at a quoted `price`.
    pub fn entry_price(&self, side: Side, price: f64) -> f64 {
        match side {
            Side::Long => self.buy(price),
            Side::Short => self.sell(price),
        }
    }

    /// Execution price for closing a position on `side` at a quoted `price`.
    pub fn exit_price(&self, side: Side, price: f64) -> f64 {
        match side {
            Side::Long => self.sell(price),
            Side::Short => self.buy(price),
        }
    }

    /// Commission owed on an executed notional.
    pub fn commission_on(&self, notional: f64) -> f64 {
        notional * self.commission
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> CostModel {
        CostModel::new(&CostParams {
            commission: 0.001,
            slippage: 0.0005,
        })
    }

    #[test]
    fn slippage_is_always_adverse() {
        let m = model();
        assert!(m.entry_price(Side::Long, 100.0) > 100.0);
        assert!(m.exit_price(Side::Long, 100.0) < 100.0);
        assert!(m.entry_price(Side::Short, 100.0) < 100.0);
        assert!(m.exit_price(Side::Short, 100.0) > 100.0);
    }

    #[test]
    fn known_fill_prices() {
        let m = model();
        assert!((m.entry_price(Side::Long, 100.0) - 100.05).abs() < 1e-12);
        assert!((m.exit_price(Side::Long, 100.0) - 99.95).abs() < 1e-12);
    }

    #[test]
    fn commission_scales_with_notional() {
        let m = model();
        assert!((m.commission_on(10_000.0) - 10.0).abs() < 1e-12);
        assert_eq!(m.commission_on(0.0), 0.0);
    }

    #[test]
    fn zero_cost_model_is_identity() {
        let m = CostModel::new(&CostParams {
            commission: 0.0,
            slippage: 0.0,
        });
        assert_eq!(m.entry_price(Side::Long, 123.45), 123.45);
        assert_eq!(m.exit_price(Side::Short, 123.45), 123.45);
        assert_eq!(m.commission_on(5_000.0), 0.0);
    }
}
