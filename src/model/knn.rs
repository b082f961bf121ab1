use crate::features::{Direction, FeatureRow};
use crate::model::{DirectionClassifier, ModelError};
use indexmap::IndexMap;
use std::cmp::Ordering;

//k-nearest-neighbors direction classifier over the two predictor
//variables, euclidean distance, uniform majority vote
//
//determinism: candidate neighbors are ordered by (distance, training row
//index), and vote ties resolve toward the class seen first in that order,
//i.e. the class of the nearest contested neighbor
#[derive(Debug, Clone)]
pub struct KnnClassifier {
    k: usize,
    train_features: Vec<FeatureRow>,
    train_labels: Vec<Direction>,
}

impl KnnClassifier {
    pub fn new(k: usize) -> Self {
        KnnClassifier {
            k,
            train_features: Vec::new(),
            train_labels: Vec::new(),
        }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    fn distance(a: &FeatureRow, b: &FeatureRow) -> f64 {
        let dx = a.open_close - b.open_close;
        let dy = a.high_low - b.high_low;
        (dx * dx + dy * dy).sqrt()
    }

    //majority label among the k nearest training rows for one query row
    fn vote(&self, query: &FeatureRow) -> Direction {
        let mut candidates: Vec<(usize, f64)> = self
            .train_features
            .iter()
            .enumerate()
            .map(|(i, row)| (i, Self::distance(query, row)))
            .collect();

        //distances are finite (validated bars), so partial_cmp never fails;
        //the index tie-break keeps equal distances in training order
        candidates.sort_by(|a, b| {
            a.1.partial_cmp(&b.1)
                .unwrap_or(Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });

        //tally in distance order; insertion order is the tie-break
        let mut votes: IndexMap<Direction, usize> = IndexMap::new();
        for (idx, _) in candidates.iter().take(self.k) {
            *votes.entry(self.train_labels[*idx]).or_insert(0) += 1;
        }

        //strict > keeps the first-inserted class on a tied vote, so a
        //split vote goes to the class of the nearest contested neighbor
        let mut winner = Direction::Down;
        let mut winner_count = 0usize;
        for (label, count) in &votes {
            if *count > winner_count {
                winner = *label;
                winner_count = *count;
            }
        }
        winner
    }
}

impl DirectionClassifier for KnnClassifier {
    fn fit(&mut self, features: &[FeatureRow], labels: &[Direction]) -> Result<(), ModelError> {
        if features.len() != labels.len() {
            return Err(ModelError::LengthMismatch {
                features: features.len(),
                labels: labels.len(),
            });
        }
        if self.k == 0 {
            return Err(ModelError::ZeroNeighbors);
        }
        if self.k > features.len() {
            return Err(ModelError::KExceedsTrainingSet {
                k: self.k,
                rows: features.len(),
            });
        }

        self.train_features = features.to_vec();
        self.train_labels = labels.to_vec();
        Ok(())
    }

    fn predict(&self, features: &[FeatureRow]) -> Result<Vec<Direction>, ModelError> {
        if self.train_features.is_empty() {
            return Err(ModelError::NotFitted);
        }

        Ok(features.iter().map(|row| self.vote(row)).collect())
    }
}
