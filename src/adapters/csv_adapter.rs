//! CSV file market data adapter.
//!
//! Bars live in `{symbol}_{timeframe}.csv` under a base directory, with a
//! header row and `timestamp,open,high,low,close,volume` columns. Slashes
//! in the symbol are flattened to dashes for the file name (`BTC/USD` reads
//! from `BTC-USD_1h.csv`).

use chrono::NaiveDateTime;
use std::path::PathBuf;
use std::str::FromStr;

use crate::domain::config_validation::TIMESTAMP_FORMAT;
use crate::domain::error::CrosstraderError;
use crate::domain::ohlcv::Bar;
use crate::ports::data_port::DataPort;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str, timeframe: &str) -> PathBuf {
        let flat = symbol.replace('/', "-");
        self.base_path.join(format!("{flat}_{timeframe}.csv"))
    }

    fn read_bars(&self, symbol: &str, timeframe: &str) -> Result<Vec<Bar>, CrosstraderError> {
        let path = self.csv_path(symbol, timeframe);
        let mut reader =
            csv::Reader::from_path(&path).map_err(|e| CrosstraderError::Data {
                reason: format!("failed to open {}: {e}", path.display()),
            })?;

        let mut bars = Vec::new();
        for (row, result) in reader.records().enumerate() {
            let record = result.map_err(|e| CrosstraderError::Data {
                reason: format!("CSV parse error in {}: {e}", path.display()),
            })?;

            let timestamp_str = field(&record, 0, "timestamp", row)?;
            let timestamp = NaiveDateTime::parse_from_str(&timestamp_str, TIMESTAMP_FORMAT)
                .map_err(|e| CrosstraderError::Data {
                    reason: format!("row {row}: invalid timestamp {timestamp_str:?}: {e}"),
                })?;

            bars.push(Bar {
                timestamp,
                open: parse_field(&record, 1, "open", row)?,
                high: parse_field(&record, 2, "high", row)?,
                low: parse_field(&record, 3, "low", row)?,
                close: parse_field(&record, 4, "close", row)?,
                volume: parse_field(&record, 5, "volume", row)?,
            });
        }

        Ok(bars)
    }
}

fn field(
    record: &csv::StringRecord,
    index: usize,
    name: &str,
    row: usize,
) -> Result<String, CrosstraderError> {
    record
        .get(index)
        .map(|v| v.to_string())
        .ok_or_else(|| CrosstraderError::Data {
            reason: format!("row {row}: missing {name} column"),
        })
}

fn parse_field<T: FromStr>(
    record: &csv::StringRecord,
    index: usize,
    name: &str,
    row: usize,
) -> Result<T, CrosstraderError>
where
    T::Err: std::fmt::Display,
{
    let raw = field(record, index, name, row)?;
    raw.parse().map_err(|e| CrosstraderError::Data {
        reason: format!("row {row}: invalid {name} value {raw:?}: {e}"),
    })
}

impl DataPort for CsvAdapter {
    fn fetch_ohlcv(
        &self,
        symbol: &str,
        timeframe: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Bar>, CrosstraderError> {
        let mut bars = self.read_bars(symbol, timeframe)?;
        bars.retain(|bar| bar.timestamp >= start && bar.timestamp <= end);
        Ok(bars)
    }

    fn data_range(
        &self,
        symbol: &str,
        timeframe: &str,
    ) -> Result<Option<(NaiveDateTime, NaiveDateTime, usize)>, CrosstraderError> {
        let bars = self.read_bars(symbol, timeframe)?;
        let first = bars.iter().map(|b| b.timestamp).min();
        let last = bars.iter().map(|b| b.timestamp).max();
        Ok(first.zip(last).map(|(lo, hi)| (lo, hi, bars.len())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    const CSV: &str = "\
timestamp,open,high,low,close,volume
2024-01-01T00:00:00,100.0,101.0,99.0,100.5,1200.0
2024-01-01T01:00:00,100.5,102.0,100.0,101.5,900.0
2024-01-01T02:00:00,101.5,103.0,101.0,102.0,1500.0
";

    fn ts(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn adapter_with(content: &str) -> (TempDir, CsvAdapter) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("BTC-USD_1h.csv"), content).unwrap();
        let adapter = CsvAdapter::new(dir.path().to_path_buf());
        (dir, adapter)
    }

    #[test]
    fn fetch_parses_all_columns() {
        let (_dir, adapter) = adapter_with(CSV);
        let bars = adapter.fetch_ohlcv("BTC/USD", "1h", ts(0), ts(23)).unwrap();

        assert_eq!(bars.len(), 3);
        assert_eq!(bars[0].timestamp, ts(0));
        assert!((bars[0].open - 100.0).abs() < f64::EPSILON);
        assert!((bars[0].high - 101.0).abs() < f64::EPSILON);
        assert!((bars[0].low - 99.0).abs() < f64::EPSILON);
        assert!((bars[0].close - 100.5).abs() < f64::EPSILON);
        assert!((bars[0].volume - 1200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn fetch_restricts_to_inclusive_range() {
        let (_dir, adapter) = adapter_with(CSV);
        let bars = adapter.fetch_ohlcv("BTC/USD", "1h", ts(1), ts(1)).unwrap();
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].timestamp, ts(1));
    }

    #[test]
    fn fetch_slash_symbol_maps_to_dashed_file() {
        let (_dir, adapter) = adapter_with(CSV);
        // Same file, addressed by the exchange-style symbol.
        assert!(adapter.fetch_ohlcv("BTC/USD", "1h", ts(0), ts(23)).is_ok());
    }

    #[test]
    fn fetch_missing_file_is_data_error() {
        let dir = TempDir::new().unwrap();
        let adapter = CsvAdapter::new(dir.path().to_path_buf());
        let result = adapter.fetch_ohlcv("ETH/USD", "1h", ts(0), ts(23));
        assert!(matches!(result, Err(CrosstraderError::Data { .. })));
    }

    #[test]
    fn fetch_bad_timestamp_is_data_error() {
        let (_dir, adapter) = adapter_with(
            "timestamp,open,high,low,close,volume\nnot-a-time,1,1,1,1,1\n",
        );
        let result = adapter.fetch_ohlcv("BTC/USD", "1h", ts(0), ts(23));
        assert!(matches!(result, Err(CrosstraderError::Data { .. })));
    }

    #[test]
    fn fetch_bad_number_is_data_error() {
        let (_dir, adapter) = adapter_with(
            "timestamp,open,high,low,close,volume\n2024-01-01T00:00:00,x,1,1,1,1\n",
        );
        let result = adapter.fetch_ohlcv("BTC/USD", "1h", ts(0), ts(23));
        assert!(matches!(result, Err(CrosstraderError::Data { .. })));
    }

    #[test]
    fn data_range_reports_bounds_and_count() {
        let (_dir, adapter) = adapter_with(CSV);
        let range = adapter.data_range("BTC/USD", "1h").unwrap();
        assert_eq!(range, Some((ts(0), ts(2), 3)));
    }

    #[test]
    fn data_range_empty_file_is_none() {
        let (_dir, adapter) = adapter_with("timestamp,open,high,low,close,volume\n");
        assert_eq!(adapter.data_range("BTC/USD", "1h").unwrap(), None);
    }
}
