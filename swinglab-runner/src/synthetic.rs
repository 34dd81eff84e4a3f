//! Seeded synthetic bar generator.
//!
//! Produces a deterministic random-walk OHLCV series for demo runs, benches,
//! and tests. The walk is seeded explicitly, so the same seed always yields
//! the same series; [`symbol_seed`] derives a stable seed from a symbol name
//! so multi-symbol demo batches differ per symbol but reproduce across runs.
//! Weekends are skipped to mimic a daily equity series.

use chrono::{Datelike, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use swinglab_core::domain::Bar;

/// Shape of the generated walk.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkParams {
    /// First bar's open.
    pub start_price: f64,
    /// Expected per-bar return.
    pub drift: f64,
    /// Half-range of the uniform per-bar return noise.
    pub volatility: f64,
}

impl Default for WalkParams {
    fn default() -> Self {
        Self {
            start_price: 100.0,
            drift: 0.0005,
            volatility: 0.015,
        }
    }
}

/// Stable seed derived from a symbol name.
pub fn symbol_seed(symbol: &str) -> u64 {
    let hash = blake3::hash(symbol.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(bytes)
}

/// Generate `n` daily bars starting at `start`, skipping weekends.
pub fn generate_bars(start: NaiveDate, n: usize, seed: u64, params: &WalkParams) -> Vec<Bar> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut bars = Vec::with_capacity(n);
    let mut price = params.start_price;
    let mut current = start;

    while bars.len() < n {
        let weekday = current.weekday();
        if weekday == Weekday::Sat || weekday == Weekday::Sun {
            current += chrono::Duration::days(1);
            continue;
        }

        let daily_return: f64 =
            params.drift + rng.gen_range(-params.volatility..params.volatility);
        let open = price;
        let close = price * (1.0 + daily_return);
        let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.01));
        let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.01));
        let volume = rng.gen_range(500_000..5_000_000u64);

        bars.push(Bar {
            timestamp: current.and_hms_opt(0, 0, 0).expect("midnight always exists"),
            open,
            high,
            low,
            close,
            volume,
        });

        price = close;
        current += chrono::Duration::days(1);
    }

    bars
}

/// Generate `n` bars with the stock walk shape.
pub fn generate_default_bars(start: NaiveDate, n: usize, seed: u64) -> Vec<Bar> {
    generate_bars(start, n, seed, &WalkParams::default())
}
