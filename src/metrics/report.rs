use crate::metrics::returns::CurvePoint;
use chrono::NaiveDate;
use prettytable::{Cell, Row, Table};
use serde::{Deserialize, Serialize};

//summary of one backtest run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestReport {
    pub ticker: String,
    pub bar_count: usize,
    pub split_index: usize,
    pub split_date: NaiveDate,
    pub k_neighbors: usize,
    pub train_accuracy: f64,
    pub test_accuracy: f64,
    pub return_kurtosis: Option<f64>,
    pub performance_ratio: f64,
}

impl BacktestReport {
    //prints the report in a formatted table
    //accuracies and the ratio are reported to two decimals
    pub fn pretty_print_table(&self) {
        let mut table = Table::new();

        table.add_row(Row::new(vec![Cell::new("Metric"), Cell::new("Value")]));

        table.add_row(Row::new(vec![
            Cell::new("Ticker"),
            Cell::new(&self.ticker),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Bars"),
            Cell::new(&format!("{}", self.bar_count)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Train/Test Split"),
            Cell::new(&format!(
                "{} rows, test from {}",
                self.split_index, self.split_date
            )),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Neighbors (k)"),
            Cell::new(&format!("{}", self.k_neighbors)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Train Accuracy"),
            Cell::new(&format!("{:.2}", self.train_accuracy)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Test Accuracy"),
            Cell::new(&format!("{:.2}", self.test_accuracy)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Return Kurtosis"),
            Cell::new(
                &self
                    .return_kurtosis
                    .map(|k| format!("{:.2}", k))
                    .unwrap_or_else(|| "n/a".to_string()),
            ),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Performance Ratio"),
            Cell::new(&format!("{:.2}", self.performance_ratio)),
        ]));

        table.printstd();
    }
}

//final cumulative percentage returns, a quick textual stand-in for the
//plotted curves
pub fn curve_endpoints(curve: &[CurvePoint]) -> Option<(f64, f64)> {
    curve.last().map(|p| (p.instrument, p.strategy))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_come_from_last_point() {
        let curve = vec![
            CurvePoint {
                date: "2020-06-01".parse().unwrap(),
                instrument: 1.0,
                strategy: -1.0,
            },
            CurvePoint {
                date: "2020-06-02".parse().unwrap(),
                instrument: 2.5,
                strategy: 3.5,
            },
        ];

        assert_eq!(curve_endpoints(&curve), Some((2.5, 3.5)));
        assert_eq!(curve_endpoints(&[]), None);
    }
}
