use crate::config::RunConfig;
use crate::data::Series;
use crate::features::{split_index, Dataset, Direction};
use crate::metrics::{
    cumulative_curves, daily_lag_returns, excess_kurtosis, log_returns, performance_ratio,
    strategy_returns, BacktestReport, CurvePoint,
};
use crate::model::{accuracy, DirectionClassifier, KnnClassifier};
use anyhow::{Context, Result};

//everything one run produces: the summary report for printing, the
//cumulative test-window curves for plotting, and the raw signals
#[derive(Debug, Clone)]
pub struct BacktestOutcome {
    pub report: BacktestReport,
    pub curve: Vec<CurvePoint>,
    pub signals: Vec<Direction>,
}

//runs the whole pipeline with the default knn classifier
pub fn run_backtest(config: &RunConfig, series: &Series) -> Result<BacktestOutcome> {
    let mut classifier = KnnClassifier::new(config.k_neighbors);
    run_backtest_with(config, series, &mut classifier)
}

//single-pass pipeline: features -> split -> fit -> predict -> returns ->
//curves -> ratio; every stage is a pure function of the previous one and
//any failure aborts the run
pub fn run_backtest_with<C: DirectionClassifier>(
    config: &RunConfig,
    series: &Series,
    classifier: &mut C,
) -> Result<BacktestOutcome> {
    config.validate().context("Invalid run configuration")?;

    //aligned (feature, label) rows; the unlabeled last bar is dropped
    let dataset = Dataset::from_series(series);

    //partition point over the full bar count, checked against aligned rows
    let split =
        split_index(series.len(), config.train_fraction).context("Train/test split failed")?;

    //fit on the training prefix only
    let (train_x, train_y) = dataset.train(split);
    classifier
        .fit(train_x, train_y)
        .context("Classifier fit failed")?;

    //one signal per aligned row, train and test alike
    let signals = classifier
        .predict(&dataset.features)
        .context("Signal generation failed")?;

    //accuracy diagnostics over each partition
    let (_, test_y) = dataset.test(split);
    let train_accuracy = accuracy(&signals[..split], train_y);
    let test_accuracy = accuracy(&signals[split..], test_y);

    //daily and cumulative returns, instrument vs signal-lagged strategy
    let instrument = log_returns(series);
    let strategy =
        strategy_returns(&instrument, &signals).context("Strategy return computation failed")?;
    let curve = cumulative_curves(series, &instrument, &strategy, split);

    let ratio = performance_ratio(&curve).context("Performance ratio computation failed")?;

    //distribution diagnostic on the raw daily returns
    let return_kurtosis = excess_kurtosis(&daily_lag_returns(series));

    let report = BacktestReport {
        ticker: config.ticker.clone(),
        bar_count: series.len(),
        split_index: split,
        split_date: series[split].date,
        k_neighbors: config.k_neighbors,
        train_accuracy,
        test_accuracy,
        return_kurtosis,
        performance_ratio: ratio,
    };

    Ok(BacktestOutcome {
        report,
        curve,
        signals,
    })
}
