//! Strategy capability interface and the trading signal enumeration.

use std::fmt;

use super::indicator::IndicatorSet;
use super::ohlcv::Bar;
use super::position::Position;

/// Directional decision for the current bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Signal::Buy => "buy",
            Signal::Sell => "sell",
            Signal::Hold => "hold",
        };
        write!(f, "{s}")
    }
}

/// A trading strategy driven bar-by-bar by the backtest loop.
///
/// `generate_signal` sees only the prefix of bars observed so far and must
/// not look ahead. A prefix shorter than the strategy's required lookback
/// yields `Hold`, never an error. The `&mut self` receiver exists so the
/// instance-scoped indicator cache can be refreshed alongside the signal.
pub trait Strategy {
    fn name(&self) -> &str;

    fn generate_signal(&mut self, bars: &[Bar]) -> Signal;

    /// Desired quantity for `signal` at `price` given available `cash` and
    /// the currently held position, if any. Returning 0 means "do not
    /// trade" even when the signal itself is not Hold; this is how
    /// insufficient funds and sell-with-nothing-held are expressed.
    fn position_size(
        &self,
        signal: Signal,
        price: f64,
        cash: f64,
        held: Option<&Position>,
    ) -> f64;

    /// Indicator series computed during the run, for post-run inspection.
    fn indicators(&self) -> &IndicatorSet;
}
