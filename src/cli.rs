//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::text_report_adapter::TextReportAdapter;
use crate::domain::backtest::{run_backtest, BacktestConfig};
use crate::domain::config_validation::{
    parse_timestamp, validate_backtest_config, validate_strategy_config,
};
use crate::domain::error::CrosstraderError;
use crate::domain::ohlcv::PriceSeries;
use crate::domain::sma_crossover::SmaCrossover;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "crosstrader", about = "Single-asset trading strategy backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a backtest
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        /// Write the report here as well as to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Override the configured symbol
        #[arg(long)]
        symbol: Option<String>,
        /// Validate config and show run parameters without fetching data
        #[arg(long)]
        dry_run: bool,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show the available data range for the configured symbol
    Info {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        symbol: Option<String>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let outcome = match cli.command {
        Command::Backtest {
            config,
            output,
            symbol,
            dry_run,
        } => run_backtest_command(&config, output.as_deref(), symbol.as_deref(), dry_run),
        Command::Validate { config } => run_validate(&config),
        Command::Info { config, symbol } => run_info(&config, symbol.as_deref()),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(&err)
        }
    }
}

/// Fully parsed run parameters, extracted from a validated config.
#[derive(Debug, Clone)]
pub struct RunParams {
    pub csv_dir: PathBuf,
    pub symbol: String,
    pub timeframe: String,
    pub start: chrono::NaiveDateTime,
    pub end: chrono::NaiveDateTime,
    pub backtest: BacktestConfig,
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, CrosstraderError> {
    FileConfigAdapter::from_file(path).map_err(|e| CrosstraderError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

pub fn build_run_params(
    config: &dyn ConfigPort,
    symbol_override: Option<&str>,
) -> Result<RunParams, CrosstraderError> {
    validate_backtest_config(config)?;
    validate_strategy_config(config)?;

    let csv_dir = config
        .get_string("data", "csv_dir")
        .ok_or_else(|| CrosstraderError::ConfigMissing {
            section: "data".to_string(),
            key: "csv_dir".to_string(),
        })?;

    let symbol = match symbol_override {
        Some(s) => s.to_string(),
        None => config.get_string("backtest", "symbol").unwrap_or_default(),
    };

    Ok(RunParams {
        csv_dir: PathBuf::from(csv_dir),
        symbol,
        timeframe: config
            .get_string("backtest", "timeframe")
            .unwrap_or_default(),
        start: parse_timestamp(config, "start")?,
        end: parse_timestamp(config, "end")?,
        backtest: BacktestConfig {
            initial_balance: config.get_double("backtest", "initial_balance", 10_000.0),
            commission_rate: config.get_double("backtest", "commission_rate", 0.001),
        },
    })
}

pub fn build_strategy(config: &dyn ConfigPort) -> SmaCrossover {
    SmaCrossover::new(
        config.get_int("strategy", "short_window", 20) as usize,
        config.get_int("strategy", "long_window", 50) as usize,
        config.get_double("strategy", "position_size", 0.1),
    )
}

fn run_backtest_command(
    config_path: &Path,
    output: Option<&Path>,
    symbol_override: Option<&str>,
    dry_run: bool,
) -> Result<(), CrosstraderError> {
    let config = load_config(config_path)?;
    let params = build_run_params(&config, symbol_override)?;
    let mut strategy = build_strategy(&config);

    if dry_run {
        println!("config OK: {}", config_path.display());
        println!(
            "would run {} on {} {} from {} to {}",
            strategy_label(&strategy),
            params.symbol,
            params.timeframe,
            params.start,
            params.end
        );
        return Ok(());
    }

    let data_port = CsvAdapter::new(params.csv_dir.clone());
    let raw = data_port.fetch_ohlcv(&params.symbol, &params.timeframe, params.start, params.end)?;
    let series = PriceSeries::from_raw(
        &params.symbol,
        &params.timeframe,
        raw,
        params.start,
        params.end,
    )?;

    let result = run_backtest(&mut strategy, &series, &params.backtest)?;

    let report = TextReportAdapter::new();
    print!("{}", report.render(&result));
    if let Some(path) = output {
        report.write(&result, &path.display().to_string())?;
    }

    Ok(())
}

fn strategy_label(strategy: &SmaCrossover) -> String {
    format!(
        "SMA Crossover ({}/{})",
        strategy.short_window(),
        strategy.long_window()
    )
}

fn run_validate(config_path: &Path) -> Result<(), CrosstraderError> {
    let config = load_config(config_path)?;
    validate_backtest_config(&config)?;
    validate_strategy_config(&config)?;
    println!("config OK: {}", config_path.display());
    Ok(())
}

fn run_info(config_path: &Path, symbol_override: Option<&str>) -> Result<(), CrosstraderError> {
    let config = load_config(config_path)?;
    let params = build_run_params(&config, symbol_override)?;

    let data_port = CsvAdapter::new(params.csv_dir);
    match data_port.data_range(&params.symbol, &params.timeframe)? {
        Some((first, last, count)) => {
            println!(
                "{} {}: {count} bars from {first} to {last}",
                params.symbol, params.timeframe
            );
        }
        None => {
            println!("{} {}: no data", params.symbol, params.timeframe);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const VALID_INI: &str = r#"
[data]
csv_dir = ./bars

[backtest]
symbol = BTC/USD
timeframe = 1h
start = 2024-01-01T00:00:00
end = 2024-02-01T00:00:00
initial_balance = 10000.0
commission_rate = 0.001

[strategy]
short_window = 20
long_window = 50
position_size = 0.1
"#;

    #[test]
    fn build_run_params_from_valid_config() {
        let config = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let params = build_run_params(&config, None).unwrap();

        assert_eq!(params.symbol, "BTC/USD");
        assert_eq!(params.timeframe, "1h");
        assert_eq!(params.csv_dir, PathBuf::from("./bars"));
        assert_eq!(
            params.start,
            NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
        assert!((params.backtest.initial_balance - 10_000.0).abs() < f64::EPSILON);
        assert!((params.backtest.commission_rate - 0.001).abs() < f64::EPSILON);
    }

    #[test]
    fn symbol_override_wins() {
        let config = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let params = build_run_params(&config, Some("ETH/USD")).unwrap();
        assert_eq!(params.symbol, "ETH/USD");
    }

    #[test]
    fn missing_csv_dir_rejected() {
        let content = VALID_INI.replace("csv_dir = ./bars", "");
        let config = FileConfigAdapter::from_string(&content).unwrap();
        assert!(matches!(
            build_run_params(&config, None),
            Err(CrosstraderError::ConfigMissing { section, .. }) if section == "data"
        ));
    }

    #[test]
    fn invalid_backtest_section_rejected() {
        let content = VALID_INI.replace("initial_balance = 10000.0", "initial_balance = -5");
        let config = FileConfigAdapter::from_string(&content).unwrap();
        assert!(build_run_params(&config, None).is_err());
    }

    #[test]
    fn build_strategy_reads_windows() {
        let config = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let strategy = build_strategy(&config);
        assert_eq!(strategy.short_window(), 20);
        assert_eq!(strategy.long_window(), 50);
    }

    #[test]
    fn build_strategy_uses_defaults_when_absent() {
        let config = FileConfigAdapter::from_string("[strategy]\n").unwrap();
        let strategy = build_strategy(&config);
        assert_eq!(strategy.short_window(), 20);
        assert_eq!(strategy.long_window(), 50);
    }
}
