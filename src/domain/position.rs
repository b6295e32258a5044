//! Open positions and the trade history record.

use chrono::NaiveDateTime;

use super::strategy::Signal;

/// An open holding in one symbol with average cost basis.
///
/// Invariant: `quantity > 0` while the position is held; the ledger removes
/// the position the instant quantity reaches zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub symbol: String,
    pub quantity: f64,
    pub entry_price: f64,
    pub entry_time: NaiveDateTime,
    pub current_price: f64,
    pub unrealized_pnl: f64,
}

impl Position {
    /// Refresh the mark price and unrealized PnL from a fresh market price.
    pub fn update_price(&mut self, current_price: f64) {
        self.current_price = current_price;
        self.unrealized_pnl = (current_price - self.entry_price) * self.quantity;
    }

    pub fn market_value(&self) -> f64 {
        self.quantity * self.current_price
    }
}

/// One entry in the trade history. Created once per executed (non-Hold,
/// non-zero-quantity) signal; a Sell's quantity is overwritten with the
/// actually-filled amount before the record is appended.
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    pub timestamp: NaiveDateTime,
    pub signal: Signal,
    pub price: f64,
    pub quantity: f64,
    pub reason: String,
}
