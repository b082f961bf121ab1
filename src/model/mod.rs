pub mod knn;

pub use knn::KnnClassifier;

use crate::features::{Direction, FeatureRow};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Neighbor count k must be positive")]
    ZeroNeighbors,
    #[error("Neighbor count k ({k}) exceeds training set size ({rows})")]
    KExceedsTrainingSet { k: usize, rows: usize },
    #[error("Feature and label counts differ: {features} vs {labels}")]
    LengthMismatch { features: usize, labels: usize },
    #[error("Classifier used before fit")]
    NotFitted,
}

//classifier interface: any fit/predict capability over the two
//predictor variables satisfies it
pub trait DirectionClassifier {
    //stores the training set
    fn fit(&mut self, features: &[FeatureRow], labels: &[Direction]) -> Result<(), ModelError>;

    //predicts one direction per feature row
    fn predict(&self, features: &[FeatureRow]) -> Result<Vec<Direction>, ModelError>;
}

//fraction of exact matches between predicted and actual labels, in [0, 1]
//diagnostic only; never feeds back into the model
pub fn accuracy(predicted: &[Direction], actual: &[Direction]) -> f64 {
    if actual.is_empty() {
        return 0.0;
    }

    let hits = predicted
        .iter()
        .zip(actual.iter())
        .filter(|(p, a)| p == a)
        .count();

    hits as f64 / actual.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::Direction::{Down, Up};

    #[test]
    fn accuracy_counts_exact_matches() {
        let predicted = vec![Up, Down, Up, Up];
        let actual = vec![Up, Down, Down, Up];
        assert_eq!(accuracy(&predicted, &actual), 0.75);
    }

    #[test]
    fn accuracy_stays_in_unit_interval() {
        let all_wrong = accuracy(&[Up, Up], &[Down, Down]);
        let all_right = accuracy(&[Down, Up], &[Down, Up]);
        assert_eq!(all_wrong, 0.0);
        assert_eq!(all_right, 1.0);
    }

    #[test]
    fn accuracy_of_empty_is_zero() {
        assert_eq!(accuracy(&[], &[]), 0.0);
    }
}
