pub mod backtest;

pub use backtest::{run_backtest, run_backtest_with, BacktestOutcome};
