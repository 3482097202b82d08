//! K-nearest-neighbors classification
//!
//! Instance-based learning: `fit` memorizes the training samples and
//! `predict` votes among the k nearest by Euclidean distance. Both
//! tie-breaks are deterministic and part of the contract:
//!
//! - neighbor selection: among equal distances, the earlier-indexed
//!   training sample wins inclusion (sort key is `(distance, index)`);
//! - vote count: among labels with equal votes, the label whose first
//!   occurrence in distance-rank order is earliest wins.

use crate::error::{KnnError, Result};
use ndarray::{Array1, Array2, ArrayView1};
use rayon::prelude::*;
use std::cmp::Ordering;

/// A fit/predict classifier. The sweep and the evaluator only depend on
/// this interface, so a different algorithm could be swept unchanged.
pub trait Classifier {
    /// Fit to training data
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<usize>) -> Result<()>;

    /// Predict a label for each row, independently per row
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<usize>>;
}

/// K-nearest-neighbors classifier with uniform votes and Euclidean distance
#[derive(Debug, Clone)]
pub struct KnnClassifier {
    k: usize,
    x_train: Option<Array2<f64>>,
    y_train: Option<Array1<usize>>,
    n_classes: usize,
}

impl KnnClassifier {
    /// Create a classifier consulting `k` neighbors
    pub fn new(k: usize) -> Self {
        Self {
            k,
            x_train: None,
            y_train: None,
            n_classes: 0,
        }
    }

    /// Neighbor count
    pub fn k(&self) -> usize {
        self.k
    }

    /// Predict a single query point against the fitted training set
    fn predict_one(
        &self,
        query: ArrayView1<'_, f64>,
        x_train: &Array2<f64>,
        y_train: &Array1<usize>,
    ) -> usize {
        // Distance to every training row, keeping the original index so
        // equal distances resolve to the earlier sample
        let mut candidates: Vec<(f64, usize)> = x_train
            .rows()
            .into_iter()
            .enumerate()
            .map(|(idx, row)| (euclidean(query, row), idx))
            .collect();
        candidates.sort_unstable_by(|a, b| {
            a.0.partial_cmp(&b.0)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.1.cmp(&b.1))
        });

        // Tally votes over the k nearest, remembering each label's first
        // appearance in distance-rank order for the vote tie-break
        let mut votes = vec![0usize; self.n_classes];
        let mut first_rank = vec![usize::MAX; self.n_classes];
        for (rank, &(_, train_idx)) in candidates.iter().take(self.k).enumerate() {
            let label = y_train[train_idx];
            votes[label] += 1;
            if first_rank[label] == usize::MAX {
                first_rank[label] = rank;
            }
        }

        let mut winner = 0usize;
        for label in 1..self.n_classes {
            let better = votes[label] > votes[winner]
                || (votes[label] == votes[winner] && first_rank[label] < first_rank[winner]);
            if better {
                winner = label;
            }
        }
        winner
    }
}

impl Classifier for KnnClassifier {
    /// Store the training samples; no other parameters are learned
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<usize>) -> Result<()> {
        if x.nrows() != y.len() {
            return Err(KnnError::Shape {
                expected: format!("{} labels", x.nrows()),
                actual: format!("{} labels", y.len()),
            });
        }
        self.n_classes = y.iter().max().map_or(0, |&m| m + 1);
        self.x_train = Some(x.clone());
        self.y_train = Some(y.clone());
        Ok(())
    }

    /// Predict each query row independently (parallelized; query order is
    /// preserved and no state is shared between queries)
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<usize>> {
        let x_train = self.x_train.as_ref().ok_or(KnnError::NotFitted)?;
        let y_train = self.y_train.as_ref().ok_or(KnnError::NotFitted)?;

        let n_train = x_train.nrows();
        if self.k == 0 || self.k > n_train {
            return Err(KnnError::InvalidK { k: self.k, n_train });
        }
        if x.ncols() != x_train.ncols() {
            return Err(KnnError::Shape {
                expected: format!("{} columns", x_train.ncols()),
                actual: format!("{} columns", x.ncols()),
            });
        }

        let predictions: Vec<usize> = (0..x.nrows())
            .into_par_iter()
            .map(|i| self.predict_one(x.row(i), x_train, y_train))
            .collect();

        Ok(Array1::from_vec(predictions))
    }
}

fn euclidean(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(ai, bi)| {
            let d = ai - bi;
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn separable_data() -> (Array2<f64>, Array1<usize>) {
        let x = array![
            [1.0, 1.0],
            [1.5, 1.5],
            [2.0, 2.0],
            [8.0, 8.0],
            [8.5, 8.5],
            [9.0, 9.0],
        ];
        let y = array![0usize, 0, 0, 1, 1, 1];
        (x, y)
    }

    #[test]
    fn test_k1_on_training_point_returns_its_label() {
        let (x, y) = separable_data();
        let mut knn = KnnClassifier::new(1);
        knn.fit(&x, &y).unwrap();

        let predictions = knn.predict(&x).unwrap();
        assert_eq!(predictions, y);
    }

    #[test]
    fn test_separable_classes() {
        let (x, y) = separable_data();
        let mut knn = KnnClassifier::new(3);
        knn.fit(&x, &y).unwrap();

        let queries = array![[1.2, 1.2], [8.8, 8.8]];
        let predictions = knn.predict(&queries).unwrap();
        assert_eq!(predictions, array![0usize, 1]);
    }

    #[test]
    fn test_invalid_k_rejected() {
        let (x, y) = separable_data();

        let mut too_large = KnnClassifier::new(7);
        too_large.fit(&x, &y).unwrap();
        assert!(matches!(
            too_large.predict(&x),
            Err(KnnError::InvalidK { k: 7, n_train: 6 })
        ));

        let mut zero = KnnClassifier::new(0);
        zero.fit(&x, &y).unwrap();
        assert!(matches!(zero.predict(&x), Err(KnnError::InvalidK { .. })));
    }

    #[test]
    fn test_predict_before_fit_rejected() {
        let knn = KnnClassifier::new(3);
        let queries = array![[1.0, 1.0]];
        assert!(matches!(knn.predict(&queries), Err(KnnError::NotFitted)));
    }

    #[test]
    fn test_vote_tie_resolves_by_distance_rank() {
        // Four training points around the origin; with k=4 both labels get
        // exactly two votes. Label 1's nearest member is closer than label
        // 0's, so label 1 appears first in distance-rank order and wins.
        let x = array![
            [2.0, 0.0],  // label 0, dist 2.0
            [0.0, 3.0],  // label 0, dist 3.0
            [1.0, 0.0],  // label 1, dist 1.0
            [0.0, 2.5],  // label 1, dist 2.5
        ];
        let y = array![0usize, 0, 1, 1];

        let mut knn = KnnClassifier::new(4);
        knn.fit(&x, &y).unwrap();

        let predictions = knn.predict(&array![[0.0, 0.0]]).unwrap();
        assert_eq!(predictions[0], 1);
    }

    #[test]
    fn test_equal_distance_neighbors_prefer_earlier_index() {
        // Two training points at the same distance from the query; with
        // k=1 the earlier-indexed one must win inclusion.
        let x = array![[1.0, 0.0], [-1.0, 0.0]];
        let y = array![1usize, 0];

        let mut knn = KnnClassifier::new(1);
        knn.fit(&x, &y).unwrap();

        let predictions = knn.predict(&array![[0.0, 0.0]]).unwrap();
        assert_eq!(predictions[0], 1);
    }
}
