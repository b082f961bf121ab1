pub mod explore;
pub mod report;
pub mod returns;

pub use explore::{daily_lag_returns, excess_kurtosis};
pub use report::{curve_endpoints, BacktestReport};
pub use returns::{
    cumulative_curves, log_returns, performance_ratio, strategy_returns, CurvePoint, MetricsError,
};
