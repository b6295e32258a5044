//! SMA crossover strategy: buy the golden cross, sell the death cross.

use super::indicator::{sma, IndicatorSet};
use super::ohlcv::Bar;
use super::position::Position;
use super::strategy::{Signal, Strategy};

#[derive(Debug, Clone)]
pub struct SmaCrossover {
    name: String,
    short_window: usize,
    long_window: usize,
    /// Fraction of available cash committed per buy, in (0, 1].
    position_size_pct: f64,
    indicators: IndicatorSet,
}

impl SmaCrossover {
    /// By convention `short_window < long_window`; this is not enforced.
    pub fn new(short_window: usize, long_window: usize, position_size_pct: f64) -> Self {
        SmaCrossover {
            name: "SMA Crossover".to_string(),
            short_window,
            long_window,
            position_size_pct,
            indicators: IndicatorSet::new(),
        }
    }

    pub fn short_window(&self) -> usize {
        self.short_window
    }

    pub fn long_window(&self) -> usize {
        self.long_window
    }
}

impl Strategy for SmaCrossover {
    fn name(&self) -> &str {
        &self.name
    }

    fn generate_signal(&mut self, bars: &[Bar]) -> Signal {
        if bars.len() < self.long_window {
            return Signal::Hold;
        }

        let short = sma(bars, self.short_window);
        let long = sma(bars, self.long_window);

        let last = bars.len() - 1;
        let cur_short = short[last];
        let cur_long = long[last];
        let prev_short = if last > 0 { short[last - 1] } else { cur_short };
        let prev_long = if last > 0 { long[last - 1] } else { cur_long };

        self.indicators.insert("short_sma", short);
        self.indicators.insert("long_sma", long);

        // An invalid operand suppresses the signal. In particular the first
        // bar where the long SMA becomes defined has no previous long value,
        // so no spurious cross can fire there.
        let (Some(ps), Some(pl), Some(cs), Some(cl)) =
            (prev_short, prev_long, cur_short, cur_long)
        else {
            return Signal::Hold;
        };

        if ps <= pl && cs > cl {
            Signal::Buy
        } else if ps >= pl && cs < cl {
            Signal::Sell
        } else {
            Signal::Hold
        }
    }

    fn position_size(
        &self,
        signal: Signal,
        price: f64,
        cash: f64,
        held: Option<&Position>,
    ) -> f64 {
        match signal {
            Signal::Buy => cash * self.position_size_pct / price,
            Signal::Sell => held.map(|pos| pos.quantity).unwrap_or(0.0),
            Signal::Hold => 0.0,
        }
    }

    fn indicators(&self) -> &IndicatorSet {
        &self.indicators
    }
}
