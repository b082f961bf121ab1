use crate::data::bar::{Bar, Series};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CsvRecord {
    date: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    ticker: String,
}

//loads daily bars from a csv file
//expected header: date,open,high,low,close,ticker with dates as YYYY-MM-DD
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Bar>> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .context(format!("Failed to open CSV file: {:?}", path))?;

    let mut bars = Vec::new();

    for (index, result) in reader.deserialize().enumerate() {
        let record: CsvRecord =
            result.context(format!("Failed to parse CSV record at line {}", index + 2))?;

        //parse the calendar date
        let date = NaiveDate::parse_from_str(&record.date, "%Y-%m-%d").context(format!(
            "Failed to parse date '{}' at line {}",
            record.date,
            index + 2
        ))?;

        //validate ohlc ranges up front so bad rows fail at load time
        let bar = Bar::new(
            date,
            record.open,
            record.high,
            record.low,
            record.close,
            record.ticker,
        )
        .context(format!("Invalid bar at line {}", index + 2))?;

        bars.push(bar);
    }

    Ok(bars)
}

//selects one ticker's bars within an inclusive date range and
//assembles them into an ordered series
pub fn select_series(
    bars: &[Bar],
    ticker: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Series> {
    let selected: Vec<Bar> = bars
        .iter()
        .filter(|bar| bar.ticker == ticker && bar.date >= start && bar.date <= end)
        .cloned()
        .collect();

    Series::from_bars(selected).context(format!(
        "No usable series for {} between {} and {}",
        ticker, start, end
    ))
}
