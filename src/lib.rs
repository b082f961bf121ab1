//a Rust-based k-nearest-neighbors next-day direction backtester for daily bars

pub mod config;
pub mod data;
pub mod engine;
pub mod features;
pub mod metrics;
pub mod model;

//prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{ConfigError, RunConfig};
    pub use crate::data::{load_csv, select_series, Bar, Series};
    pub use crate::engine::{run_backtest, run_backtest_with, BacktestOutcome};
    pub use crate::features::{split_index, Dataset, Direction, FeatureRow};
    pub use crate::metrics::{
        cumulative_curves, daily_lag_returns, excess_kurtosis, log_returns, performance_ratio,
        strategy_returns, BacktestReport, CurvePoint,
    };
    pub use crate::model::{accuracy, DirectionClassifier, KnnClassifier, ModelError};
}
