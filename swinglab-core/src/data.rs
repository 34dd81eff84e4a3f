//! Series-level validation, run before any simulation state exists.

use crate::domain::Bar;
use crate::error::DataIntegrityError;

/// Check the whole series for integrity: strictly increasing timestamps,
/// no duplicates, `high >= low`, finite prices.
///
/// The first violation is returned with its row index; an empty slice is
/// trivially valid. Downstream stages assume a validated series and carry
/// no per-bar guards of their own.
pub fn validate_bars(bars: &[Bar]) -> Result<(), DataIntegrityError> {
    for (index, bar) in bars.iter().enumerate() {
        if !bar.prices_finite() {
            return Err(DataIntegrityError::NonFinitePrice { index });
        }
        if bar.high < bar.low {
            return Err(DataIntegrityError::InvertedRange { index });
        }
        if index > 0 {
            use std::cmp::Ordering;
            match bar.timestamp.cmp(&bars[index - 1].timestamp) {
                Ordering::Greater => {}
                Ordering::Equal => {
                    return Err(DataIntegrityError::DuplicateTimestamp { index });
                }
                Ordering::Less => {
                    return Err(DataIntegrityError::NonMonotonicTimestamps { index });
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bars(n: usize) -> Vec<Bar> {
        let base = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        (0..n)
            .map(|i| Bar {
                timestamp: base + chrono::Duration::days(i as i64),
                open: 100.0,
                high: 101.0,
                low: 99.0,
                close: 100.0,
                volume: 1_000,
            })
            .collect()
    }

    #[test]
    fn valid_series_passes() {
        assert!(validate_bars(&bars(10)).is_ok());
        assert!(validate_bars(&[]).is_ok());
    }

    #[test]
    fn duplicate_timestamp_detected() {
        let mut series = bars(5);
        series[3].timestamp = series[2].timestamp;
        assert_eq!(
            validate_bars(&series),
            Err(DataIntegrityError::DuplicateTimestamp { index: 3 })
        );
    }

    #[test]
    fn out_of_order_timestamp_detected() {
        let mut series = bars(5);
        series.swap(1, 2);
        assert_eq!(
            validate_bars(&series),
            Err(DataIntegrityError::NonMonotonicTimestamps { index: 2 })
        );
    }

    #[test]
    fn inverted_range_detected() {
        let mut series = bars(5);
        series[4].high = 90.0;
        assert_eq!(
            validate_bars(&series),
            Err(DataIntegrityError::InvertedRange { index: 4 })
        );
    }

    #[test]
    fn non_finite_price_detected() {
        let mut series = bars(5);
        series[0].close = f64::NAN;
        assert_eq!(
            validate_bars(&series),
            Err(DataIntegrityError::NonFinitePrice { index: 0 })
        );
    }
}
