//! Backtest engine: bar-by-bar replay of a price series through a strategy.

use chrono::NaiveDateTime;
use std::collections::HashMap;

use super::error::CrosstraderError;
use super::ledger::{Ledger, PerformanceMetrics};
use super::metrics;
use super::ohlcv::PriceSeries;
use super::position::{Position, Trade};
use super::strategy::{Signal, Strategy};

#[derive(Debug, Clone)]
pub struct BacktestConfig {
    pub initial_balance: f64,
    /// Fraction of notional charged per executed trade, e.g. 0.001.
    pub commission_rate: f64,
}

/// One point on the portfolio equity curve.
#[derive(Debug, Clone, PartialEq)]
pub struct EquityPoint {
    pub timestamp: NaiveDateTime,
    pub value: f64,
}

/// Everything a report needs, produced once at the end of a run.
#[derive(Debug, Clone)]
pub struct BacktestResult {
    pub strategy_name: String,
    pub symbol: String,
    pub timeframe: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub initial_balance: f64,
    pub commission_rate: f64,
    pub metrics: PerformanceMetrics,
    pub max_drawdown: f64,
    pub sharpe_ratio: f64,
    /// Index-aligned with the input series, one point per bar.
    pub equity_curve: Vec<EquityPoint>,
    /// Index-aligned with the input series, one signal per bar.
    pub signals: Vec<Signal>,
    pub total_commission: f64,
    pub trades: Vec<Trade>,
    /// Positions still open when the run ended.
    pub open_positions: Vec<Position>,
}

/// Replay the series through the strategy and ledger.
///
/// Each bar exposes the prefix observed so far to the strategy; a non-Hold
/// signal is executed at the bar's close, commission is debited on the
/// returned trade's filled quantity, and the portfolio value at that close
/// is appended regardless of whether a trade occurred. Strategy or ledger
/// panics are not caught: a silently skipped bar would corrupt every
/// downstream metric.
pub fn run_backtest(
    strategy: &mut dyn Strategy,
    series: &PriceSeries,
    config: &BacktestConfig,
) -> Result<BacktestResult, CrosstraderError> {
    let bars = series.bars();
    if bars.is_empty() {
        return Err(CrosstraderError::EmptyData {
            symbol: series.symbol.clone(),
        });
    }

    let mut ledger = Ledger::new(config.initial_balance);
    let mut equity_curve: Vec<EquityPoint> = Vec::with_capacity(bars.len());
    let mut signals: Vec<Signal> = Vec::with_capacity(bars.len());
    let mut total_commission = 0.0;

    for i in 0..bars.len() {
        let bar = &bars[i];
        let signal = strategy.generate_signal(&bars[..=i]);
        signals.push(signal);

        if signal != Signal::Hold {
            if let Some(trade) = ledger.execute_trade(
                &*strategy,
                signal,
                bar.close,
                bar.timestamp,
                &series.symbol,
            ) {
                let commission = trade.price * trade.quantity * config.commission_rate;
                ledger.cash -= commission;
                total_commission += commission;
            }
        }

        let current_prices = HashMap::from([(series.symbol.clone(), bar.close)]);
        let value = ledger.portfolio_value(&current_prices);
        equity_curve.push(EquityPoint {
            timestamp: bar.timestamp,
            value,
        });
    }

    let final_prices = HashMap::from([(series.symbol.clone(), series.last().close)]);
    let metrics_snapshot = ledger.performance_metrics(&final_prices);

    let values: Vec<f64> = equity_curve.iter().map(|p| p.value).collect();
    let max_drawdown = metrics::max_drawdown(&values);
    let sharpe_ratio = metrics::sharpe_ratio(&values);

    let mut open_positions: Vec<Position> = ledger.positions.values().cloned().collect();
    open_positions.sort_by(|a, b| a.symbol.cmp(&b.symbol));

    Ok(BacktestResult {
        strategy_name: strategy.name().to_string(),
        symbol: series.symbol.clone(),
        timeframe: series.timeframe.clone(),
        start: series.first().timestamp,
        end: series.last().timestamp,
        initial_balance: config.initial_balance,
        commission_rate: config.commission_rate,
        metrics: metrics_snapshot,
        max_drawdown,
        sharpe_ratio,
        equity_curve,
        signals,
        total_commission,
        trades: ledger.trades,
        open_positions,
    })
}
