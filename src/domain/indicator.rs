//! Rolling indicator calculations and the per-strategy indicator cache.

use std::collections::HashMap;

use super::ohlcv::Bar;

/// Simple moving average of close prices, index-aligned with `bars`.
///
/// The first `window - 1` points are `None` (not enough data); a zero
/// window produces an all-`None` series.
pub fn sma(bars: &[Bar], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; bars.len()];
    }

    let mut values: Vec<Option<f64>> = Vec::with_capacity(bars.len());
    let mut running_sum = 0.0;

    for (i, bar) in bars.iter().enumerate() {
        running_sum += bar.close;
        if i >= window {
            running_sum -= bars[i - window].close;
        }
        if i + 1 >= window {
            values.push(Some(running_sum / window as f64));
        } else {
            values.push(None);
        }
    }

    values
}

/// Named indicator series scoped to one strategy instance's lifetime.
#[derive(Debug, Clone, Default)]
pub struct IndicatorSet {
    series: HashMap<String, Vec<Option<f64>>>,
}

impl IndicatorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, values: Vec<Option<f64>>) {
        self.series.insert(name.to_string(), values);
    }

    pub fn get(&self, name: &str) -> Option<&[Option<f64>]> {
        self.series.get(name).map(|v| v.as_slice())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(|k| k.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
