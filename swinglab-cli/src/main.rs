//! SwingLab CLI — run, batch, and synthetic data commands.
//!
//! Commands:
//! - `run` — execute one symbol's OHLCV CSV through the engine and print a report
//! - `batch` — run every CSV in a directory and print a ranked summary table
//! - `synth` — write a seeded synthetic OHLCV CSV

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use swinglab_core::domain::Bar;
use swinglab_runner::{
    bars_to_csv, generate_default_bars, load_bars_csv, render_batch_table, render_report,
    run_symbol, save_artifacts, symbol_seed, Batch, RunConfig,
};

#[derive(Parser)]
#[command(
    name = "swinglab",
    about = "SwingLab CLI — swing-trading backtest engine"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one symbol's OHLCV CSV through the engine and print a report.
    Run {
        /// CSV file with header timestamp,open,high,low,close,volume.
        data: PathBuf,

        /// Symbol name for reports. Defaults to the file stem, uppercased.
        #[arg(long)]
        symbol: Option<String>,

        /// Path to a TOML run config. Defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the starting capital from the config.
        #[arg(long)]
        capital: Option<f64>,

        /// Output directory for artifacts. Defaults to ./results.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,

        /// Print the report only, without writing artifacts.
        #[arg(long, default_value_t = false)]
        no_artifacts: bool,
    },
    /// Run every CSV in a directory and print a ranked summary table.
    Batch {
        /// Directory containing one OHLCV CSV per symbol.
        data_dir: PathBuf,

        /// Path to a TOML run config. Defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the starting capital from the config.
        #[arg(long)]
        capital: Option<f64>,

        /// Output directory for artifacts. Defaults to ./results.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,

        /// Run symbols one at a time instead of on the worker pool.
        #[arg(long, default_value_t = false)]
        sequential: bool,
    },
    /// Generate a seeded synthetic OHLCV CSV.
    Synth {
        /// Output CSV path.
        out: PathBuf,

        /// Number of daily bars to generate.
        #[arg(long, default_value_t = 400)]
        bars: usize,

        /// RNG seed. Mutually exclusive with --symbol.
        #[arg(long)]
        seed: Option<u64>,

        /// Derive the seed from a symbol name instead of --seed.
        #[arg(long)]
        symbol: Option<String>,

        /// First bar date (YYYY-MM-DD). Weekends are skipped.
        #[arg(long, default_value = "2022-01-03")]
        start: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            data,
            symbol,
            config,
            capital,
            output_dir,
            no_artifacts,
        } => run_cmd(data, symbol, config, capital, output_dir, no_artifacts),
        Commands::Batch {
            data_dir,
            config,
            capital,
            output_dir,
            sequential,
        } => batch_cmd(data_dir, config, capital, output_dir, sequential),
        Commands::Synth {
            out,
            bars,
            seed,
            symbol,
            start,
        } => synth_cmd(out, bars, seed, symbol, start),
    }
}

fn run_cmd(
    data: PathBuf,
    symbol: Option<String>,
    config_path: Option<PathBuf>,
    capital: Option<f64>,
    output_dir: PathBuf,
    no_artifacts: bool,
) -> Result<()> {
    let config = load_config(config_path, capital)?;
    let symbol = symbol.unwrap_or_else(|| file_stem(&data));
    let bars = load_bars_csv(&data)?;

    let outcome = run_symbol(&symbol, &bars, &config)
        .with_context(|| format!("backtest failed for {symbol}"))?;

    print!("{}", render_report(&outcome));
    for warn in &outcome.warnings {
        eprintln!("WARNING: {warn}");
    }

    if !no_artifacts {
        let run_dir = save_artifacts(&outcome, &output_dir)?;
        println!("Artifacts saved to: {}", run_dir.display());
    }

    Ok(())
}

fn batch_cmd(
    data_dir: PathBuf,
    config_path: Option<PathBuf>,
    capital: Option<f64>,
    output_dir: PathBuf,
    sequential: bool,
) -> Result<()> {
    let config = load_config(config_path, capital)?;
    let series = load_series_dir(&data_dir)?;
    if series.is_empty() {
        bail!("no CSV files found in {}", data_dir.display());
    }

    let batch = Batch::new().with_parallelism(!sequential);
    let summary = batch.run(&series, &config)?;

    print!("{}", render_batch_table(&summary));
    for outcome in &summary.outcomes {
        for warn in &outcome.warnings {
            eprintln!("WARNING [{}]: {warn}", outcome.symbol);
        }
    }

    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;
    for outcome in &summary.outcomes {
        save_artifacts(outcome, &output_dir)?;
    }
    let summary_path = output_dir.join("batch_summary.json");
    std::fs::write(&summary_path, serde_json::to_string_pretty(&summary)?)
        .with_context(|| format!("failed to write {}", summary_path.display()))?;
    println!("Artifacts saved to: {}", output_dir.display());

    if !summary.all_succeeded() {
        for failure in &summary.failures {
            eprintln!("Error for {}: {}", failure.symbol, failure.error);
        }
        std::process::exit(1);
    }

    Ok(())
}

fn synth_cmd(
    out: PathBuf,
    bars: usize,
    seed: Option<u64>,
    symbol: Option<String>,
    start: String,
) -> Result<()> {
    if seed.is_some() && symbol.is_some() {
        bail!("--seed and --symbol are mutually exclusive");
    }

    let start_date = NaiveDate::parse_from_str(&start, "%Y-%m-%d")
        .with_context(|| format!("invalid --start date '{start}'"))?;
    let seed = seed
        .or_else(|| symbol.as_deref().map(symbol_seed))
        .unwrap_or(42);

    let series = generate_default_bars(start_date, bars, seed);
    let csv = bars_to_csv(&series)?;

    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    std::fs::write(&out, csv).with_context(|| format!("failed to write {}", out.display()))?;
    println!("Wrote {bars} bars to {}", out.display());

    Ok(())
}

/// Load the run config from a TOML file, or fall back to defaults, then
/// apply the --capital override and validate.
fn load_config(path: Option<PathBuf>, capital: Option<f64>) -> Result<RunConfig> {
    let mut config = match path {
        Some(p) => RunConfig::from_file(&p)?,
        None => RunConfig::default(),
    };
    if let Some(capital) = capital {
        config.initial_capital = capital;
    }
    config.validate()?;
    Ok(config)
}

/// Every CSV in the directory becomes one symbol series, named by file stem.
/// Files that fail to parse are reported on stderr and skipped.
fn load_series_dir(dir: &Path) -> Result<Vec<(String, Vec<Bar>)>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory {}", dir.display()))?;

    let mut series: Vec<(String, Vec<Bar>)> = Vec::new();
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("csv") {
            continue;
        }
        let symbol = file_stem(&path);
        match load_bars_csv(&path) {
            Ok(bars) => series.push((symbol, bars)),
            Err(err) => eprintln!("skipping {}: {err:#}", path.display()),
        }
    }

    // read_dir order is platform-dependent
    series.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(series)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_uppercase()
}
