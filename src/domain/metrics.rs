//! Drawdown and risk-adjusted return calculations over the equity series.

const TRADING_PERIODS_PER_YEAR: f64 = 252.0;
const ANNUAL_RISK_FREE_RATE: f64 = 0.02;

/// Maximum peak-to-trough decline as a (non-positive) fraction of the peak.
///
/// Returns 0.0 for series of one point or fewer.
pub fn max_drawdown(values: &[f64]) -> f64 {
    if values.len() <= 1 {
        return 0.0;
    }

    let mut running_max = values[0];
    let mut worst = 0.0_f64;

    for &value in values {
        if value > running_max {
            running_max = value;
        }
        if running_max > 0.0 {
            let drawdown = (value - running_max) / running_max;
            if drawdown < worst {
                worst = drawdown;
            }
        }
    }

    worst
}

/// Annualized Sharpe ratio over period-to-period returns of the equity
/// series.
///
/// The annualization factor (252) and the 2% risk-free rate are fixed
/// constants regardless of the bar timeframe. Fewer than two returns, or
/// a return series with zero standard deviation, yields exactly 0.0.
pub fn sharpe_ratio(values: &[f64]) -> f64 {
    let returns = period_returns(values);
    if returns.len() < 2 {
        return 0.0;
    }

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    // Sample standard deviation (n - 1 denominator).
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let stddev = variance.sqrt();
    if stddev == 0.0 {
        return 0.0;
    }

    let period_rf = ANNUAL_RISK_FREE_RATE / TRADING_PERIODS_PER_YEAR;
    (mean - period_rf) / stddev * TRADING_PERIODS_PER_YEAR.sqrt()
}

/// Simple percentage-change returns; the undefined first value is dropped.
fn period_returns(values: &[f64]) -> Vec<f64> {
    values
        .windows(2)
        .map(|w| {
            if w[0] != 0.0 {
                (w[1] - w[0]) / w[0]
            } else {
                0.0
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn drawdown_known_series() {
        // rolling max [100, 120, 120, 120]
        // drawdown    [0, 0, -0.25, -0.0833...]
        let values = [100.0, 120.0, 90.0, 110.0];
        assert_relative_eq!(max_drawdown(&values), -0.25);
    }

    #[test]
    fn drawdown_monotonic_rise_is_zero() {
        let values = [100.0, 110.0, 120.0, 130.0];
        assert_relative_eq!(max_drawdown(&values), 0.0);
    }

    #[test]
    fn drawdown_single_point_is_zero() {
        assert_relative_eq!(max_drawdown(&[100.0]), 0.0);
        assert_relative_eq!(max_drawdown(&[]), 0.0);
    }

    #[test]
    fn drawdown_trough_after_later_peak() {
        // Peak 200, trough 100: -0.5 beats the earlier -0.2.
        let values = [100.0, 80.0, 200.0, 100.0];
        assert_relative_eq!(max_drawdown(&values), -0.5);
    }

    #[test]
    fn period_returns_drop_first() {
        let returns = period_returns(&[100.0, 110.0, 99.0]);
        assert_eq!(returns.len(), 2);
        assert_relative_eq!(returns[0], 0.1);
        assert_relative_eq!(returns[1], -0.1);
    }

    #[test]
    fn sharpe_zero_variance_is_exactly_zero() {
        // Doubling each period: every return exactly 1.0, variance exactly
        // 0.0 in f64, so the zero-stddev guard fires.
        let values = [100.0, 200.0, 400.0, 800.0];
        assert_eq!(sharpe_ratio(&values), 0.0);
    }

    #[test]
    fn sharpe_too_few_points_is_zero() {
        assert_eq!(sharpe_ratio(&[]), 0.0);
        assert_eq!(sharpe_ratio(&[100.0]), 0.0);
        assert_eq!(sharpe_ratio(&[100.0, 110.0]), 0.0);
    }

    #[test]
    fn sharpe_flat_series_is_zero() {
        let values = [100.0, 100.0, 100.0, 100.0];
        assert_eq!(sharpe_ratio(&values), 0.0);
    }

    #[test]
    fn sharpe_known_value() {
        // returns = [0.1, -0.05]: mean 0.025, sample stddev
        // sqrt((0.075^2 + 0.075^2) / 1) = 0.10606601717798213.
        let values = [100.0, 110.0, 104.5];
        let mean = 0.025_f64;
        let stddev = 0.106_066_017_177_982_13_f64;
        let expected = (mean - 0.02 / 252.0) / stddev * 252.0_f64.sqrt();
        assert_relative_eq!(sharpe_ratio(&values), expected, max_relative = 1e-12);
    }

    #[test]
    fn sharpe_positive_for_drifting_series() {
        let mut values = vec![100.0];
        for i in 1..100 {
            values.push(100.0 + i as f64 + if i % 2 == 0 { 0.5 } else { 0.0 });
        }
        assert!(sharpe_ratio(&values) > 0.0);
    }
}
