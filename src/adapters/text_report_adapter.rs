//! Plain-text report adapter.

use std::fmt::Write as _;
use std::fs;

use crate::domain::backtest::BacktestResult;
use crate::domain::error::CrosstraderError;
use crate::ports::report_port::ReportPort;

pub struct TextReportAdapter;

impl TextReportAdapter {
    pub fn new() -> Self {
        TextReportAdapter
    }

    pub fn render(&self, result: &BacktestResult) -> String {
        let mut out = String::new();
        let metrics = &result.metrics;

        let _ = writeln!(out, "=== BACKTEST REPORT ===");
        let _ = writeln!(out, "Strategy: {}", result.strategy_name);
        let _ = writeln!(out, "Symbol: {}", result.symbol);
        let _ = writeln!(out, "Period: {} to {}", result.start, result.end);
        let _ = writeln!(out, "Timeframe: {}", result.timeframe);
        let _ = writeln!(out);
        let _ = writeln!(out, "=== PERFORMANCE METRICS ===");
        let _ = writeln!(out, "Initial Balance: ${:.2}", result.initial_balance);
        let _ = writeln!(out, "Final Portfolio Value: ${:.2}", metrics.portfolio_value);
        let _ = writeln!(out, "Total Return: {:.2}%", metrics.total_return * 100.0);
        let _ = writeln!(out, "Max Drawdown: {:.2}%", result.max_drawdown * 100.0);
        let _ = writeln!(out, "Sharpe Ratio: {:.3}", result.sharpe_ratio);
        let _ = writeln!(out);
        let _ = writeln!(out, "=== TRADING METRICS ===");
        let _ = writeln!(out, "Total Trades: {}", metrics.total_trades);
        let _ = writeln!(out, "Win Rate: {:.2}%", metrics.win_rate * 100.0);
        let _ = writeln!(out, "Commission Paid: ${:.2}", result.total_commission);
        let _ = writeln!(out, "Unrealized P&L: ${:.2}", metrics.unrealized_pnl);
        let _ = writeln!(out);
        let _ = writeln!(out, "=== OPEN POSITIONS ===");
        if result.open_positions.is_empty() {
            let _ = writeln!(out, "(none)");
        }
        for position in &result.open_positions {
            let _ = writeln!(
                out,
                "{}: {:.6} @ ${:.2}",
                position.symbol, position.quantity, position.entry_price
            );
        }

        out
    }
}

impl Default for TextReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportPort for TextReportAdapter {
    fn write(&self, result: &BacktestResult, output_path: &str) -> Result<(), CrosstraderError> {
        fs::write(output_path, self.render(result))?;
        Ok(())
    }
}
