//! Plain-text report rendering.
//!
//! Pure string builders; the CLI decides where they go. The single-run
//! block is a fixed-width summary of capital, returns, and trade
//! statistics; the batch table is one ranked row per symbol with failures
//! and skips listed underneath.

use crate::result::{BatchSummary, SymbolOutcome};

const RULE_WIDTH: usize = 60;

/// Render the summary block for one symbol's run.
pub fn render_report(outcome: &SymbolOutcome) -> String {
    let r = &outcome.report;
    let mut out = String::with_capacity(1024);
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);

    out.push_str(&heavy);
    out.push('\n');
    out.push_str(&format!("BACKTEST SUMMARY: {}\n", outcome.symbol));
    out.push_str(&heavy);
    out.push('\n');
    line(&mut out, "Period:", format!("{} to {}", outcome.start_date, outcome.end_date));
    line(&mut out, "Bars:", outcome.bar_count.to_string());
    line(&mut out, "Initial Capital:", format!("{:.2}", outcome.initial_capital));
    line(&mut out, "Final Equity:", format!("{:.2}", outcome.final_equity()));
    out.push_str(&light);
    out.push('\n');
    line(&mut out, "Total Return:", format!("{:.2}%", r.total_return_pct));
    line(&mut out, "CAGR:", format!("{:.2}%", r.cagr));
    line(&mut out, "Sharpe Ratio:", format!("{:.2}", r.sharpe_ratio));
    line(&mut out, "Sortino Ratio:", format!("{:.2}", r.sortino_ratio));
    line(&mut out, "Max Drawdown:", format!("{:.2}%", r.max_drawdown_pct));
    out.push_str(&light);
    out.push('\n');
    line(&mut out, "Total Trades:", r.total_trades.to_string());
    line(&mut out, "Win Rate:", format!("{:.1}%", r.win_rate * 100.0));
    line(&mut out, "Profit Factor:", format!("{:.2}", r.profit_factor));
    line(&mut out, "Average Win:", format!("{:.2}", r.avg_win));
    line(&mut out, "Average Loss:", format!("{:.2}", r.avg_loss));
    line(&mut out, "Max Consec Wins:", r.max_consecutive_wins.to_string());
    line(&mut out, "Max Consec Losses:", r.max_consecutive_losses.to_string());
    line(&mut out, "Avg Holding Days:", format!("{:.1}", r.avg_holding_days));
    out.push_str(&heavy);
    out.push('\n');

    out
}

/// Render the per-symbol table for a batch, best total return first.
pub fn render_batch_table(summary: &BatchSummary) -> String {
    let mut out = String::with_capacity(1024);

    out.push_str(&format!(
        "{:<8} {:>10} {:>9} {:>8} {:>9} {:>7} {:>8}\n",
        "Symbol", "Return%", "CAGR%", "Sharpe", "MaxDD%", "Trades", "WinRate"
    ));
    out.push_str(&"-".repeat(65));
    out.push('\n');

    for outcome in summary.ranked() {
        let r = &outcome.report;
        out.push_str(&format!(
            "{:<8} {:>10.2} {:>9.2} {:>8.2} {:>9.2} {:>7} {:>7.1}%\n",
            outcome.symbol,
            r.total_return_pct,
            r.cagr,
            r.sharpe_ratio,
            r.max_drawdown_pct,
            r.total_trades,
            r.win_rate * 100.0,
        ));
    }

    if !summary.failures.is_empty() {
        out.push('\n');
        for failure in &summary.failures {
            out.push_str(&format!("failed {}: {}\n", failure.symbol, failure.error));
        }
    }
    if !summary.skipped.is_empty() {
        out.push('\n');
        out.push_str(&format!("skipped (cancelled): {}\n", summary.skipped.join(", ")));
    }

    out.push('\n');
    out.push_str(&format!(
        "{} of {} symbols completed\n",
        summary.outcomes.len(),
        summary.total()
    ));

    out
}

fn line(out: &mut String, label: &str, value: String) {
    out.push_str(&format!("{label:<20}{value}\n"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunConfig;
    use crate::result::{SymbolFailure, SCHEMA_VERSION};
    use chrono::NaiveDate;
    use swinglab_core::domain::EquityPoint;
    use swinglab_core::metrics::PerformanceReport;

    fn outcome_with_return(symbol: &str, pct: f64) -> SymbolOutcome {
        let config = RunConfig::default();
        let base = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let equity_curve = vec![
            EquityPoint {
                timestamp: base,
                equity: 100_000.0,
            },
            EquityPoint {
                timestamp: base + chrono::Duration::days(364),
                equity: 100_000.0 * (1.0 + pct / 100.0),
            },
        ];
        SymbolOutcome {
            schema_version: SCHEMA_VERSION,
            run_id: config.run_id(),
            symbol: symbol.into(),
            start_date: "2024-01-02".into(),
            end_date: "2024-12-31".into(),
            initial_capital: 100_000.0,
            bar_count: 252,
            report: PerformanceReport::compute(
                &equity_curve,
                &[],
                100_000.0,
                &config.strategy.metrics,
            ),
            trades: vec![],
            equity_curve,
            warnings: vec![],
        }
    }

    #[test]
    fn report_block_has_all_sections() {
        let text = render_report(&outcome_with_return("SPY", 12.5));
        assert!(text.contains("BACKTEST SUMMARY: SPY"));
        assert!(text.contains("Period:             2024-01-02 to 2024-12-31"));
        assert!(text.contains("Initial Capital:    100000.00"));
        assert!(text.contains("Final Equity:       112500.00"));
        assert!(text.contains("Total Return:       12.50%"));
        assert!(text.contains("Total Trades:       0"));
        assert!(text.contains("Profit Factor:"));
        assert!(text.contains("Avg Holding Days:"));
    }

    #[test]
    fn batch_table_ranks_and_lists_failures() {
        let summary = BatchSummary {
            schema_version: SCHEMA_VERSION,
            run_id: RunConfig::default().run_id(),
            outcomes: vec![
                outcome_with_return("AAA", 2.0),
                outcome_with_return("BBB", 9.0),
            ],
            failures: vec![SymbolFailure {
                symbol: "BAD".into(),
                error: "insufficient data: 200 bars required by the configured periods, got 50"
                    .into(),
                recoverable: true,
            }],
            skipped: vec!["ZZZ".into()],
        };

        let text = render_batch_table(&summary);
        let bbb_pos = text.find("BBB").unwrap();
        let aaa_pos = text.find("AAA").unwrap();
        assert!(bbb_pos < aaa_pos, "best return should be listed first");
        assert!(text.contains("failed BAD: insufficient data"));
        assert!(text.contains("skipped (cancelled): ZZZ"));
        assert!(text.contains("2 of 4 symbols completed"));
    }
}
