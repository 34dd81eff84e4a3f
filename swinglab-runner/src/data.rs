//! CSV bar loading.
//!
//! Reads OHLCV series from local CSV files with the header
//! `timestamp,open,high,low,close,volume`. Timestamps are accepted as plain
//! dates (`2024-01-02`, midnight assumed) or datetimes
//! (`2024-01-02 09:15:00` or `2024-01-02T09:15:00`). The parsed series is
//! passed through [`swinglab_core::data::validate_bars`] before it is
//! returned, so downstream stages never see an unordered or non-finite
//! series.

use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use swinglab_core::data::validate_bars;
use swinglab_core::domain::Bar;

const EXPECTED_HEADER: [&str; 6] = ["timestamp", "open", "high", "low", "close", "volume"];

/// Load and validate a bar series from a CSV file.
pub fn load_bars_csv(path: &Path) -> Result<Vec<Bar>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read bar file: {}", path.display()))?;
    parse_bars_csv(&content).with_context(|| format!("in {}", path.display()))
}

/// Parse and validate a bar series from CSV text.
pub fn parse_bars_csv(data: &str) -> Result<Vec<Bar>> {
    let mut rdr = csv::Reader::from_reader(data.as_bytes());

    let headers = rdr.headers().context("failed to read CSV header")?;
    let names: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
    if names != EXPECTED_HEADER {
        bail!(
            "unexpected CSV header {:?} (expected {:?})",
            names,
            EXPECTED_HEADER
        );
    }

    let mut bars = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let row = i + 2; // 1-based, after the header
        let record = record.with_context(|| format!("failed to read CSV row {row}"))?;
        if record.len() != EXPECTED_HEADER.len() {
            bail!(
                "row {row}: expected {} fields, got {}",
                EXPECTED_HEADER.len(),
                record.len()
            );
        }

        let timestamp = parse_timestamp(record[0].trim())
            .with_context(|| format!("row {row}: bad timestamp '{}'", &record[0]))?;
        let open = parse_price(record[1].trim(), row, "open")?;
        let high = parse_price(record[2].trim(), row, "high")?;
        let low = parse_price(record[3].trim(), row, "low")?;
        let close = parse_price(record[4].trim(), row, "close")?;
        let volume: u64 = record[5]
            .trim()
            .parse()
            .with_context(|| format!("row {row}: bad volume '{}'", &record[5]))?;

        bars.push(Bar {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        });
    }

    validate_bars(&bars)?;
    Ok(bars)
}

/// Render a bar series as CSV text in the loader's own format.
pub fn bars_to_csv(bars: &[Bar]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(EXPECTED_HEADER)?;
    for bar in bars {
        wtr.write_record([
            &bar.timestamp.to_string(),
            &format!("{:.6}", bar.open),
            &format!("{:.6}", bar.high),
            &format!("{:.6}", bar.low),
            &format!("{:.6}", bar.close),
            &bar.volume.to_string(),
        ])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Accept `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS`, or `YYYY-MM-DDTHH:MM:SS`.
fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt);
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")?;
    date.and_hms_opt(0, 0, 0)
        .context("date has no midnight representation")
}

fn parse_price(s: &str, row: usize, field: &str) -> Result<f64> {
    s.parse()
        .with_context(|| format!("row {row}: bad {field} '{s}'"))
}
