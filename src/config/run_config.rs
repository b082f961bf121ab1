use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Train fraction {0} outside (0, 1)")]
    InvalidTrainFraction(f64),
    #[error("Neighbor count must be positive")]
    ZeroNeighbors,
    #[error("Start date {start} is not before end date {end}")]
    InvertedDateRange { start: NaiveDate, end: NaiveDate },
}

//complete run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    //data
    pub data_path: PathBuf,
    pub ticker: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    //model settings
    pub k_neighbors: usize,
    pub train_fraction: f64,

    //optional output path for the cumulative-return curves
    pub output_curves_csv: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            data_path: PathBuf::from("data.csv"),
            ticker: "SPOT".to_string(),
            start_date: NaiveDate::from_ymd_opt(2019, 12, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2020, 12, 1).unwrap(),
            k_neighbors: 16,
            train_fraction: 0.6,
            output_curves_csv: None,
        }
    }
}

impl RunConfig {
    //checks parameter ranges before any data is touched
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.train_fraction > 0.0 && self.train_fraction < 1.0) {
            return Err(ConfigError::InvalidTrainFraction(self.train_fraction));
        }

        if self.k_neighbors == 0 {
            return Err(ConfigError::ZeroNeighbors);
        }

        if self.start_date >= self.end_date {
            return Err(ConfigError::InvertedDateRange {
                start: self.start_date,
                end: self.end_date,
            });
        }

        Ok(())
    }

    //load configuration from a JSON file
    pub fn from_json_file(path: &PathBuf) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: RunConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }

    //save configuration to a JSON file
    pub fn to_json_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(RunConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_train_fraction() {
        let mut config = RunConfig::default();
        for bad in [0.0, 1.0, -0.2, 2.0] {
            config.train_fraction = bad;
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidTrainFraction(_))
            ));
        }
    }

    #[test]
    fn rejects_zero_neighbors() {
        let config = RunConfig {
            k_neighbors: 0,
            ..RunConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroNeighbors)));
    }

    #[test]
    fn rejects_inverted_date_range() {
        let config = RunConfig {
            start_date: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            ..RunConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedDateRange { .. })
        ));
    }

    #[test]
    fn json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = RunConfig {
            ticker: "AAPL".to_string(),
            k_neighbors: 8,
            ..RunConfig::default()
        };
        config.to_json_file(&path).unwrap();

        let loaded = RunConfig::from_json_file(&path).unwrap();
        assert_eq!(loaded.ticker, "AAPL");
        assert_eq!(loaded.k_neighbors, 8);
        assert_eq!(loaded.train_fraction, config.train_fraction);
    }
}
