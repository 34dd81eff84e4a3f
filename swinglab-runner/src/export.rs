//! Artifact export — JSON manifests and CSV tables.
//!
//! Three persisted artifacts per run:
//! - **manifest.json**: the full `SymbolOutcome`, schema-versioned
//! - **trades.csv**: the trade log, one row per round trip
//! - **equity.csv**: the bar-by-bar equity curve
//!
//! Unknown schema versions are rejected on load.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use swinglab_core::domain::{EquityPoint, Trade};

use crate::result::{SymbolOutcome, SCHEMA_VERSION};

// ─── JSON manifest ──────────────────────────────────────────────────

/// Serialize a `SymbolOutcome` to pretty JSON.
pub fn export_json(outcome: &SymbolOutcome) -> Result<String> {
    serde_json::to_string_pretty(outcome).context("failed to serialize SymbolOutcome to JSON")
}

/// Deserialize a `SymbolOutcome` from JSON, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<SymbolOutcome> {
    let outcome: SymbolOutcome =
        serde_json::from_str(json).context("failed to deserialize SymbolOutcome from JSON")?;
    if outcome.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            outcome.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(outcome)
}

// ─── CSV tables ─────────────────────────────────────────────────────

/// Export the trade log as CSV.
///
/// Columns: entry_time, exit_time, entry_price, exit_price, quantity, pnl,
/// return_pct, exit_reason
pub fn export_trades_csv(trades: &[Trade]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "entry_time",
        "exit_time",
        "entry_price",
        "exit_price",
        "quantity",
        "pnl",
        "return_pct",
        "exit_reason",
    ])?;

    for t in trades {
        wtr.write_record([
            &t.entry_time.to_string(),
            &t.exit_time.to_string(),
            &format!("{:.6}", t.entry_price),
            &format!("{:.6}", t.exit_price),
            &t.quantity.to_string(),
            &format!("{:.2}", t.pnl),
            &format!("{:.4}", t.return_pct),
            t.exit_reason.as_str(),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Export an equity curve as CSV with timestamp and equity columns.
pub fn export_equity_csv(equity_curve: &[EquityPoint]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["timestamp", "equity"])?;
    for point in equity_curve {
        wtr.write_record([&point.timestamp.to_string(), &format!("{:.2}", point.equity)])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Save the full artifact set for a single run.
///
/// Creates a directory named `{symbol}_{timestamp}/` under `output_dir`
/// containing `manifest.json`, `trades.csv`, and `equity.csv`. Returns the
/// path to the created directory.
pub fn save_artifacts(outcome: &SymbolOutcome, output_dir: &Path) -> Result<PathBuf> {
    let dirname = format!(
        "{}_{}",
        outcome.symbol,
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    );
    let run_dir = output_dir.join(dirname);
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create artifact dir: {}", run_dir.display()))?;

    let json = export_json(outcome)?;
    std::fs::write(run_dir.join("manifest.json"), &json)?;

    let trades_csv = export_trades_csv(&outcome.trades)?;
    std::fs::write(run_dir.join("trades.csv"), &trades_csv)?;

    let equity_csv = export_equity_csv(&outcome.equity_curve)?;
    std::fs::write(run_dir.join("equity.csv"), &equity_csv)?;

    Ok(run_dir)
}

/// Load a `SymbolOutcome` from an artifact directory's manifest.json.
///
/// Rejects unknown schema versions.
pub fn load_artifacts(dir: &Path) -> Result<SymbolOutcome> {
    let manifest_path = dir.join("manifest.json");
    let json = std::fs::read_to_string(&manifest_path)
        .with_context(|| format!("failed to read {}", manifest_path.display()))?;
    import_json(&json)
}
