//! Pre-run validation of the `[backtest]` and `[strategy]` config sections.

use chrono::NaiveDateTime;

use crate::domain::error::CrosstraderError;
use crate::ports::config_port::ConfigPort;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub fn validate_backtest_config(config: &dyn ConfigPort) -> Result<(), CrosstraderError> {
    validate_symbol(config)?;
    validate_timeframe(config)?;
    validate_initial_balance(config)?;
    validate_commission_rate(config)?;
    validate_dates(config)?;
    Ok(())
}

pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<(), CrosstraderError> {
    validate_window(config, "short_window")?;
    validate_window(config, "long_window")?;
    validate_position_size(config)?;
    Ok(())
}

fn invalid(key: &str, reason: &str, section: &str) -> CrosstraderError {
    CrosstraderError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn required(config: &dyn ConfigPort, section: &str, key: &str) -> Result<String, CrosstraderError> {
    config
        .get_string(section, key)
        .ok_or_else(|| CrosstraderError::ConfigMissing {
            section: section.to_string(),
            key: key.to_string(),
        })
}

fn validate_symbol(config: &dyn ConfigPort) -> Result<(), CrosstraderError> {
    let symbol = required(config, "backtest", "symbol")?;
    if symbol.trim().is_empty() {
        return Err(invalid("symbol", "symbol must not be empty", "backtest"));
    }
    Ok(())
}

fn validate_timeframe(config: &dyn ConfigPort) -> Result<(), CrosstraderError> {
    let timeframe = required(config, "backtest", "timeframe")?;
    if timeframe.trim().is_empty() {
        return Err(invalid(
            "timeframe",
            "timeframe must not be empty",
            "backtest",
        ));
    }
    Ok(())
}

fn validate_initial_balance(config: &dyn ConfigPort) -> Result<(), CrosstraderError> {
    let value = config.get_double("backtest", "initial_balance", 0.0);
    if value <= 0.0 {
        return Err(invalid(
            "initial_balance",
            "initial_balance must be positive",
            "backtest",
        ));
    }
    Ok(())
}

fn validate_commission_rate(config: &dyn ConfigPort) -> Result<(), CrosstraderError> {
    let value = config.get_double("backtest", "commission_rate", 0.0);
    if !(0.0..1.0).contains(&value) {
        return Err(invalid(
            "commission_rate",
            "commission_rate must be in [0, 1)",
            "backtest",
        ));
    }
    Ok(())
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), CrosstraderError> {
    let start = parse_timestamp(config, "start")?;
    let end = parse_timestamp(config, "end")?;
    if start >= end {
        return Err(invalid("start", "start must be before end", "backtest"));
    }
    Ok(())
}

pub fn parse_timestamp(
    config: &dyn ConfigPort,
    key: &str,
) -> Result<NaiveDateTime, CrosstraderError> {
    let raw = required(config, "backtest", key)?;
    NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(|e| {
        invalid(
            key,
            &format!("expected {TIMESTAMP_FORMAT}: {e}"),
            "backtest",
        )
    })
}

fn validate_window(config: &dyn ConfigPort, key: &str) -> Result<(), CrosstraderError> {
    let value = config.get_int("strategy", key, 0);
    if value < 1 {
        return Err(invalid(key, "window must be at least 1", "strategy"));
    }
    Ok(())
}

fn validate_position_size(config: &dyn ConfigPort) -> Result<(), CrosstraderError> {
    let value = config.get_double("strategy", "position_size", 0.0);
    if value <= 0.0 || value > 1.0 {
        return Err(invalid(
            "position_size",
            "position_size must be in (0, 1]",
            "strategy",
        ));
    }
    Ok(())
}
