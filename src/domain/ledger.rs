//! Portfolio ledger: cash balance, open positions, trade history.
//!
//! Two branches are recorded but not executed: a Buy whose cost exceeds
//! cash and a Sell with no open position both append a Trade to history
//! without mutating cash or positions.

use chrono::NaiveDateTime;
use std::collections::HashMap;

use super::position::{Position, Trade};
use super::strategy::{Signal, Strategy};

#[derive(Debug, Clone)]
pub struct Ledger {
    pub initial_balance: f64,
    pub cash: f64,
    pub positions: HashMap<String, Position>,
    pub trades: Vec<Trade>,
}

/// Point-in-time performance snapshot derived from the ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceMetrics {
    pub initial_balance: f64,
    pub cash: f64,
    pub portfolio_value: f64,
    pub total_return: f64,
    pub total_trades: usize,
    pub win_rate: f64,
    pub unrealized_pnl: f64,
}

impl Ledger {
    pub fn new(initial_balance: f64) -> Self {
        Ledger {
            initial_balance,
            cash: initial_balance,
            positions: HashMap::new(),
            trades: Vec::new(),
        }
    }

    /// Execute a signal at the given price. Returns the recorded trade, or
    /// `None` for Hold and for sizings of zero or less (nothing recorded).
    ///
    /// Commission is deliberately NOT applied here: the backtest loop debits
    /// it on the returned trade's quantity, which for a clamped Sell is the
    /// filled amount rather than the requested one.
    pub fn execute_trade(
        &mut self,
        strategy: &dyn Strategy,
        signal: Signal,
        price: f64,
        timestamp: NaiveDateTime,
        symbol: &str,
    ) -> Option<Trade> {
        if signal == Signal::Hold {
            return None;
        }

        let quantity =
            strategy.position_size(signal, price, self.cash, self.positions.get(symbol));
        if quantity <= 0.0 {
            return None;
        }

        let mut trade = Trade {
            timestamp,
            signal,
            price,
            quantity,
            reason: format!("signal: {signal}"),
        };

        match signal {
            Signal::Buy => {
                let cost = price * quantity;
                if cost <= self.cash {
                    self.cash -= cost;
                    match self.positions.get_mut(symbol) {
                        Some(existing) => {
                            // Average the cost basis into the open position.
                            let total_cost = existing.entry_price * existing.quantity + cost;
                            let total_quantity = existing.quantity + quantity;
                            existing.entry_price = total_cost / total_quantity;
                            existing.quantity = total_quantity;
                            existing.current_price = price;
                        }
                        None => {
                            self.positions.insert(
                                symbol.to_string(),
                                Position {
                                    symbol: symbol.to_string(),
                                    quantity,
                                    entry_price: price,
                                    entry_time: timestamp,
                                    current_price: price,
                                    unrealized_pnl: 0.0,
                                },
                            );
                        }
                    }
                }
                // Unaffordable: fall through and record the attempt as-is.
            }
            Signal::Sell => {
                if let Some(position) = self.positions.get_mut(symbol) {
                    let sell_quantity = quantity.min(position.quantity);
                    self.cash += price * sell_quantity;
                    position.quantity -= sell_quantity;
                    if position.quantity <= 0.0 {
                        self.positions.remove(symbol);
                    }
                    trade.quantity = sell_quantity;
                }
                // No position: record with the requested, un-clamped quantity.
            }
            Signal::Hold => unreachable!(),
        }

        self.trades.push(trade.clone());
        Some(trade)
    }

    /// Cash plus the marked value of open positions.
    ///
    /// Side effect: refreshes each priced position's `current_price` and
    /// `unrealized_pnl`. Valuation is not a pure read.
    pub fn portfolio_value(&mut self, current_prices: &HashMap<String, f64>) -> f64 {
        let mut value = self.cash;
        for (symbol, position) in self.positions.iter_mut() {
            if let Some(&price) = current_prices.get(symbol) {
                position.update_price(price);
                value += position.quantity * price;
            }
        }
        value
    }

    /// Derive the performance snapshot. Shares the valuation side effect of
    /// [`Ledger::portfolio_value`].
    pub fn performance_metrics(
        &mut self,
        current_prices: &HashMap<String, f64>,
    ) -> PerformanceMetrics {
        let portfolio_value = self.portfolio_value(current_prices);
        let total_return = (portfolio_value - self.initial_balance) / self.initial_balance;
        let total_trades = self.trades.len();

        // Win classification is a stub: every recorded trade counts as a
        // win until entry/exit pairing is tracked, so win_rate is 1.0
        // whenever any trade exists.
        let winning_trades = total_trades;
        let win_rate = if total_trades > 0 {
            winning_trades as f64 / total_trades as f64
        } else {
            0.0
        };

        let unrealized_pnl = self.positions.values().map(|p| p.unrealized_pnl).sum();

        PerformanceMetrics {
            initial_balance: self.initial_balance,
            cash: self.cash,
            portfolio_value,
            total_return,
            total_trades,
            win_rate,
            unrealized_pnl,
        }
    }
}
