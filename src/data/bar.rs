use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::ops::Deref;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BarError {
    #[error("Invalid OHLC values: high ({high}) < low ({low})")]
    InvalidHighLow { high: f64, low: f64 },
    #[error("Invalid OHLC values: close ({close}) outside high-low range [{low}, {high}]")]
    InvalidClose { close: f64, high: f64, low: f64 },
    #[error("Invalid OHLC values: open ({open}) outside high-low range [{low}, {high}]")]
    InvalidOpen { open: f64, high: f64, low: f64 },
    #[error("Non-positive or non-finite price: {0}")]
    InvalidPrice(f64),
}

#[derive(Error, Debug)]
pub enum SeriesError {
    #[error("Duplicate date in series: {0}")]
    DuplicateDate(NaiveDate),
    #[error("Series too short: {got} bars, need at least {need}")]
    InsufficientData { got: usize, need: usize },
}

//represents a single daily ohlc bar of market data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub ticker: String,
}

impl Bar {
    //creates a new Bar with validation
    pub fn new(
        date: NaiveDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        ticker: String,
    ) -> Result<Self, BarError> {
        //validate all prices positive and finite
        for price in [open, high, low, close] {
            if !price.is_finite() || price <= 0.0 {
                return Err(BarError::InvalidPrice(price));
            }
        }

        //validate high >= low
        if high < low {
            return Err(BarError::InvalidHighLow { high, low });
        }

        //validate close within [low, high]
        if close < low || close > high {
            return Err(BarError::InvalidClose { close, high, low });
        }

        //validate open within [low, high]
        if open < low || open > high {
            return Err(BarError::InvalidOpen { open, high, low });
        }

        Ok(Bar {
            date,
            open,
            high,
            low,
            close,
            ticker,
        })
    }

    //creates a Bar without validation
    pub fn new_unchecked(
        date: NaiveDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        ticker: String,
    ) -> Self {
        Bar {
            date,
            open,
            high,
            low,
            close,
            ticker,
        }
    }

    //returns the open-close spread (predictor variable)
    pub fn open_close(&self) -> f64 {
        self.open - self.close
    }

    //returns the high-low range (predictor variable)
    pub fn high_low(&self) -> f64 {
        self.high - self.low
    }
}

//an ordered daily series: ascending by date, no duplicate dates
//calendar gaps (holidays, weekends) are allowed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Series {
    bars: Vec<Bar>,
}

impl Series {
    //builds a series from bars, sorting by date and rejecting duplicates
    //requires at least two bars so a next-day label exists for at least one row
    pub fn from_bars(mut bars: Vec<Bar>) -> Result<Self, SeriesError> {
        if bars.len() < 2 {
            return Err(SeriesError::InsufficientData {
                got: bars.len(),
                need: 2,
            });
        }

        bars.sort_by(|a, b| a.date.cmp(&b.date));

        for pair in bars.windows(2) {
            if pair[0].date == pair[1].date {
                return Err(SeriesError::DuplicateDate(pair[0].date));
            }
        }

        Ok(Series { bars })
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    //returns the close prices in date order
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    //returns the dates in order
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }
}

impl Deref for Series {
    type Target = [Bar];

    fn deref(&self) -> &[Bar] {
        &self.bars
    }
}
