//! Domain types for the backtest pipeline.

pub mod bar;
pub mod equity;
pub mod frame;
pub mod position;
pub mod signal;
pub mod trade;

pub use bar::Bar;
pub use equity::EquityPoint;
pub use frame::{IndicatorFrame, TrendDirection};
pub use position::{Position, Side};
pub use signal::{Direction, Signal};
pub use trade::{ExitReason, Trade};
