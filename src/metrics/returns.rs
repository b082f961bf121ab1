use crate::data::Series;
use crate::features::Direction;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetricsError {
    #[error("Signal and return series misaligned: {signals} signals for {returns} returns")]
    SignalMismatch { signals: usize, returns: usize },
    #[error("Test window is empty or too short for statistics ({rows} rows)")]
    EmptyWindow { rows: usize },
    #[error("Zero variance in cumulative strategy returns; ratio undefined")]
    ZeroVariance,
}

//one point of the cumulative test-window curves, in percentage points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub date: NaiveDate,
    pub instrument: f64,
    pub strategy: f64,
}

//per-day log return of the close price, aligned to the bar index
//the first row has no prior close and is set to zero
pub fn log_returns(series: &Series) -> Vec<f64> {
    let closes = series.closes();
    let mut returns = Vec::with_capacity(closes.len());

    returns.push(0.0);
    for pair in closes.windows(2) {
        returns.push((pair[1] / pair[0]).ln());
    }

    returns
}

//per-day strategy return: today's instrument return times yesterday's
//predicted signal, so the position is taken before the return is earned
//signals are indexed over the n-1 labeled rows; row 0 has no prior signal
pub fn strategy_returns(
    instrument: &[f64],
    signals: &[Direction],
) -> Result<Vec<f64>, MetricsError> {
    if signals.len() + 1 != instrument.len() {
        return Err(MetricsError::SignalMismatch {
            signals: signals.len(),
            returns: instrument.len(),
        });
    }

    let mut returns = Vec::with_capacity(instrument.len());
    returns.push(0.0);
    for t in 1..instrument.len() {
        returns.push(instrument[t] * signals[t - 1].signal());
    }

    Ok(returns)
}

//cumulative sums of both return series restricted to the test window
//[split, n), scaled to percentage points and paired with dates
pub fn cumulative_curves(
    series: &Series,
    instrument: &[f64],
    strategy: &[f64],
    split: usize,
) -> Vec<CurvePoint> {
    let mut instrument_sum = 0.0;
    let mut strategy_sum = 0.0;
    let mut curve = Vec::with_capacity(instrument.len().saturating_sub(split));

    for t in split..instrument.len() {
        instrument_sum += instrument[t] * 100.0;
        strategy_sum += strategy[t] * 100.0;
        curve.push(CurvePoint {
            date: series[t].date,
            instrument: instrument_sum,
            strategy: strategy_sum,
        });
    }

    curve
}

//relative-performance ratio over the test window:
//mean of (cumulative strategy - cumulative instrument) divided by the
//sample standard deviation of the cumulative strategy curve
//
//not an annualized sharpe ratio: no annualization, cumulative rather
//than period returns in the numerator; keep the formula as is
pub fn performance_ratio(curve: &[CurvePoint]) -> Result<f64, MetricsError> {
    if curve.len() < 2 {
        return Err(MetricsError::EmptyWindow { rows: curve.len() });
    }

    let strategy: Vec<f64> = curve.iter().map(|p| p.strategy).collect();
    let sigma = (&strategy).std_dev();

    if sigma == 0.0 || !sigma.is_finite() {
        return Err(MetricsError::ZeroVariance);
    }

    let diffs: Vec<f64> = curve.iter().map(|p| p.strategy - p.instrument).collect();
    Ok((&diffs).mean() / sigma)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::Direction::{Down, Up};
    use crate::features::{split_index, Dataset};

    fn series(closes: &[f64]) -> Series {
        crate::features::series_from_closes(closes)
    }

    #[test]
    fn log_returns_match_hand_computation() {
        let s = series(&[100.0, 110.0, 99.0]);
        let returns = log_returns(&s);

        assert_eq!(returns.len(), 3);
        assert_eq!(returns[0], 0.0);
        assert!((returns[1] - (110.0f64 / 100.0).ln()).abs() < 1e-12);
        assert!((returns[2] - (99.0f64 / 110.0).ln()).abs() < 1e-12);
    }

    #[test]
    fn flat_series_has_zero_returns_and_curves() {
        let s = series(&[50.0, 50.0, 50.0, 50.0, 50.0]);
        let instrument = log_returns(&s);
        assert!(instrument.iter().all(|&r| r == 0.0));

        let signals = vec![Down; 4];
        let strategy = strategy_returns(&instrument, &signals).unwrap();
        let curve = cumulative_curves(&s, &instrument, &strategy, 3);

        assert!(curve.iter().all(|p| p.instrument == 0.0 && p.strategy == 0.0));
        //zero-variance curve reports a defined error rather than nan
        assert!(matches!(
            performance_ratio(&curve),
            Err(MetricsError::ZeroVariance)
        ));
    }

    #[test]
    fn strategy_returns_use_lagged_signal() {
        let s = series(&[100.0, 110.0, 99.0, 105.0]);
        let instrument = log_returns(&s);
        //signals for rows 0..3: short, long, short
        let signals = vec![Down, Up, Down];
        let strategy = strategy_returns(&instrument, &signals).unwrap();

        assert_eq!(strategy.len(), 4);
        assert_eq!(strategy[0], 0.0);
        //day 1 return is multiplied by day 0's signal, never day 1's
        assert!((strategy[1] - instrument[1] * -1.0).abs() < 1e-12);
        assert!((strategy[2] - instrument[2] * 1.0).abs() < 1e-12);
        assert!((strategy[3] - instrument[3] * -1.0).abs() < 1e-12);
    }

    #[test]
    fn strategy_returns_reject_misaligned_signals() {
        let s = series(&[100.0, 110.0, 99.0]);
        let instrument = log_returns(&s);
        assert!(matches!(
            strategy_returns(&instrument, &[Up, Up, Up]),
            Err(MetricsError::SignalMismatch { .. })
        ));
    }

    #[test]
    fn curves_cover_the_test_window_only() {
        let closes = [10.0, 12.0, 11.0, 13.0, 14.0, 13.5];
        let s = series(&closes);
        let dataset = Dataset::from_series(&s);
        let split = split_index(s.len(), 0.6).unwrap();

        let instrument = log_returns(&s);
        let strategy = strategy_returns(&instrument, &dataset.labels).unwrap();
        let curve = cumulative_curves(&s, &instrument, &strategy, split);

        assert_eq!(curve.len(), s.len() - split);
        assert_eq!(curve[0].date, s[split].date);

        //cumulative sums restart at the window boundary
        assert!((curve[0].instrument - instrument[split] * 100.0).abs() < 1e-12);
    }

    #[test]
    fn perfect_signal_curve_dominates_instrument() {
        //labels used as signals predict every move, so the strategy earns
        //the absolute value of every return
        let closes = [100.0, 104.0, 101.0, 103.0, 99.0, 102.0, 101.0];
        let s = series(&closes);
        let dataset = Dataset::from_series(&s);

        let instrument = log_returns(&s);
        let strategy = strategy_returns(&instrument, &dataset.labels).unwrap();

        //from day 2 on, each strategy return equals |instrument return|
        for t in 2..strategy.len() {
            assert!((strategy[t] - instrument[t].abs()).abs() < 1e-12);
        }
    }

    #[test]
    fn ratio_matches_hand_computation() {
        let curve = vec![
            CurvePoint {
                date: "2020-06-01".parse().unwrap(),
                instrument: 1.0,
                strategy: 2.0,
            },
            CurvePoint {
                date: "2020-06-02".parse().unwrap(),
                instrument: 2.0,
                strategy: 4.0,
            },
            CurvePoint {
                date: "2020-06-03".parse().unwrap(),
                instrument: 3.0,
                strategy: 6.0,
            },
        ];

        //sigma = sample std of [2,4,6] = 2; diffs = [1,2,3], mean = 2
        let ratio = performance_ratio(&curve).unwrap();
        assert!((ratio - 1.0).abs() < 1e-12);
    }

    #[test]
    fn ratio_needs_at_least_two_points() {
        let curve = vec![CurvePoint {
            date: "2020-06-01".parse().unwrap(),
            instrument: 1.0,
            strategy: 2.0,
        }];
        assert!(matches!(
            performance_ratio(&curve),
            Err(MetricsError::EmptyWindow { rows: 1 })
        ));
    }
}
