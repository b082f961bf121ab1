use crate::data::{Bar, Series};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SplitError {
    #[error("Train fraction {0} outside (0, 1)")]
    InvalidTrainFraction(f64),
    #[error("Degenerate split: index {split} leaves an empty partition over {rows} rows")]
    Degenerate { split: usize, rows: usize },
}

//next-day price direction label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    //trading signal value: +1 long, -1 short
    pub fn signal(&self) -> f64 {
        match self {
            Direction::Up => 1.0,
            Direction::Down => -1.0,
        }
    }
}

//per-day predictor variables derived from one bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub open_close: f64,
    pub high_low: f64,
}

impl FeatureRow {
    pub fn from_bar(bar: &Bar) -> Self {
        FeatureRow {
            open_close: bar.open_close(),
            high_low: bar.high_low(),
        }
    }
}

//aligned (feature, label) rows derived from a series of n bars
//row i carries bar i's predictors and the direction of close[i+1] vs close[i],
//so exactly n-1 rows exist: the last bar has no next day and is dropped
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub features: Vec<FeatureRow>,
    pub labels: Vec<Direction>,
}

impl Dataset {
    //pure derivation; the n >= 2 precondition is enforced by Series construction
    pub fn from_series(series: &Series) -> Self {
        let bars = series.bars();
        let labeled = bars.len() - 1;

        let features = bars[..labeled].iter().map(FeatureRow::from_bar).collect();

        let labels = bars
            .windows(2)
            .map(|pair| {
                if pair[1].close > pair[0].close {
                    Direction::Up
                } else {
                    Direction::Down
                }
            })
            .collect();

        Dataset { features, labels }
    }

    //number of aligned rows (n - 1 for a series of n bars)
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    //training prefix view: rows [0, split)
    pub fn train(&self, split: usize) -> (&[FeatureRow], &[Direction]) {
        (&self.features[..split], &self.labels[..split])
    }

    //test suffix view: rows [split, len)
    pub fn test(&self, split: usize) -> (&[FeatureRow], &[Direction]) {
        (&self.features[split..], &self.labels[split..])
    }
}

//partition point over the aligned rows: floor(train_fraction * n_bars),
//computed from the full series length so the split date matches the
//raw price series, then checked against the n-1 aligned rows
pub fn split_index(n_bars: usize, train_fraction: f64) -> Result<usize, SplitError> {
    if !(train_fraction > 0.0 && train_fraction < 1.0) {
        return Err(SplitError::InvalidTrainFraction(train_fraction));
    }

    let split = (train_fraction * n_bars as f64).floor() as usize;
    let rows = n_bars.saturating_sub(1);

    if split == 0 || split >= rows {
        return Err(SplitError::Degenerate { split, rows });
    }

    Ok(split)
}

//test helper shared across modules: builds a series with the given
//closes, synthetic open/high/low
#[cfg(test)]
pub(crate) fn series_from_closes(closes: &[f64]) -> Series {
    use chrono::NaiveDate;

    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let date =
                NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + chrono::Duration::days(i as i64);
            Bar::new_unchecked(date, close, close + 1.0, close - 1.0, close, "TEST".into())
        })
        .collect();
    Series::from_bars(bars).unwrap()
}
