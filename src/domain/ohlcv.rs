//! OHLCV bar representation and the cleaned, time-ordered price series.

use chrono::NaiveDateTime;
use std::collections::HashSet;

use super::error::CrosstraderError;

/// One OHLCV candle. Immutable once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// A deduplicated, ascending, range-filtered sequence of bars for one symbol.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    pub symbol: String,
    pub timeframe: String,
    bars: Vec<Bar>,
}

impl PriceSeries {
    /// Build a series from a raw, possibly duplicated and unordered collection.
    ///
    /// Duplicate timestamps keep the first occurrence in original order, bars
    /// are then sorted ascending and restricted to the inclusive
    /// `[start, end]` range. Errors with [`CrosstraderError::EmptyData`] when
    /// nothing survives the filter; a backtest cannot assume a default series.
    pub fn from_raw(
        symbol: &str,
        timeframe: &str,
        raw: Vec<Bar>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self, CrosstraderError> {
        let mut seen: HashSet<NaiveDateTime> = HashSet::with_capacity(raw.len());
        let mut bars: Vec<Bar> = raw
            .into_iter()
            .filter(|bar| seen.insert(bar.timestamp))
            .collect();
        bars.sort_by_key(|bar| bar.timestamp);
        bars.retain(|bar| bar.timestamp >= start && bar.timestamp <= end);

        if bars.is_empty() {
            return Err(CrosstraderError::EmptyData {
                symbol: symbol.to_string(),
            });
        }

        Ok(PriceSeries {
            symbol: symbol.to_string(),
            timeframe: timeframe.to_string(),
            bars,
        })
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn first(&self) -> &Bar {
        &self.bars[0]
    }

    pub fn last(&self) -> &Bar {
        &self.bars[self.bars.len() - 1]
    }
}
