//! Market data access port trait.
//!
//! Implementations resolve a (symbol, timeframe, range) request into raw
//! bars before the simulation starts; the core never fetches mid-run. Any
//! retry or rate-limit handling lives behind this boundary.

use chrono::NaiveDateTime;

use crate::domain::error::CrosstraderError;
use crate::domain::ohlcv::Bar;

pub trait DataPort {
    /// Raw bars for the inclusive range; may be unordered or duplicated.
    /// Cleaning is the price series constructor's job.
    fn fetch_ohlcv(
        &self,
        symbol: &str,
        timeframe: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Bar>, CrosstraderError>;

    /// (first timestamp, last timestamp, bar count) of the available data,
    /// or `None` when the source has nothing for this symbol/timeframe.
    fn data_range(
        &self,
        symbol: &str,
        timeframe: &str,
    ) -> Result<Option<(NaiveDateTime, NaiveDateTime, usize)>, CrosstraderError>;
}
