//! Classification evaluation metrics

use crate::error::{KnnError, Result};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// Fraction of predictions matching the true labels, in [0, 1]
pub fn accuracy(y_true: &Array1<usize>, y_pred: &Array1<usize>) -> f64 {
    if y_true.is_empty() {
        return 0.0;
    }
    let correct = y_true
        .iter()
        .zip(y_pred.iter())
        .filter(|(t, p)| t == p)
        .count();
    correct as f64 / y_true.len() as f64
}

/// Cross-tabulation of actual (rows) vs predicted (columns) class counts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    counts: Vec<Vec<usize>>,
}

impl ConfusionMatrix {
    /// Tally (actual, predicted) pairs into an `n_classes` square matrix
    pub fn from_predictions(
        y_true: &Array1<usize>,
        y_pred: &Array1<usize>,
        n_classes: usize,
    ) -> Result<Self> {
        if y_true.len() != y_pred.len() {
            return Err(KnnError::Shape {
                expected: format!("{} predictions", y_true.len()),
                actual: format!("{} predictions", y_pred.len()),
            });
        }
        let mut counts = vec![vec![0usize; n_classes]; n_classes];
        for (&actual, &predicted) in y_true.iter().zip(y_pred.iter()) {
            if actual >= n_classes || predicted >= n_classes {
                return Err(KnnError::Data(format!(
                    "label pair ({}, {}) out of range for {} classes",
                    actual, predicted, n_classes
                )));
            }
            counts[actual][predicted] += 1;
        }
        Ok(Self { counts })
    }

    pub fn n_classes(&self) -> usize {
        self.counts.len()
    }

    /// Count of samples with actual class `actual` predicted as `predicted`
    pub fn get(&self, actual: usize, predicted: usize) -> usize {
        self.counts[actual][predicted]
    }

    /// Per-class actual counts (test-set support)
    pub fn row_sums(&self) -> Vec<usize> {
        self.counts.iter().map(|row| row.iter().sum()).collect()
    }

    /// Per-class predicted counts
    pub fn col_sums(&self) -> Vec<usize> {
        (0..self.n_classes())
            .map(|col| self.counts.iter().map(|row| row[col]).sum())
            .collect()
    }

    /// Total correct predictions (diagonal sum)
    pub fn trace(&self) -> usize {
        (0..self.n_classes()).map(|i| self.counts[i][i]).sum()
    }

    /// Total number of samples
    pub fn total(&self) -> usize {
        self.row_sums().iter().sum()
    }

    /// Dense counts view for rendering
    pub fn to_array(&self) -> Array2<usize> {
        let n = self.n_classes();
        Array2::from_shape_fn((n, n), |(i, j)| self.counts[i][j])
    }
}

/// Precision, recall, F1, and support for one class
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Per-class precision/recall/F1 from a confusion matrix.
///
/// A class with no predicted or no actual instances reports 0.0 for the
/// affected ratios rather than NaN.
pub fn per_class_metrics(matrix: &ConfusionMatrix) -> Vec<ClassMetrics> {
    let row_sums = matrix.row_sums();
    let col_sums = matrix.col_sums();

    (0..matrix.n_classes())
        .map(|class| {
            let tp = matrix.get(class, class);
            let actual = row_sums[class];
            let predicted = col_sums[class];

            let precision = if predicted > 0 {
                tp as f64 / predicted as f64
            } else {
                0.0
            };
            let recall = if actual > 0 {
                tp as f64 / actual as f64
            } else {
                0.0
            };
            let f1 = if precision + recall > 0.0 {
                2.0 * precision * recall / (precision + recall)
            } else {
                0.0
            };

            ClassMetrics {
                precision,
                recall,
                f1,
                support: actual,
            }
        })
        .collect()
}

/// Unweighted mean of per-class precision/recall/F1
pub fn macro_average(per_class: &[ClassMetrics]) -> ClassMetrics {
    let n = per_class.len().max(1) as f64;
    ClassMetrics {
        precision: per_class.iter().map(|m| m.precision).sum::<f64>() / n,
        recall: per_class.iter().map(|m| m.recall).sum::<f64>() / n,
        f1: per_class.iter().map(|m| m.f1).sum::<f64>() / n,
        support: per_class.iter().map(|m| m.support).sum(),
    }
}

/// Support-weighted mean of per-class precision/recall/F1
pub fn weighted_average(per_class: &[ClassMetrics]) -> ClassMetrics {
    let total: usize = per_class.iter().map(|m| m.support).sum();
    if total == 0 {
        return macro_average(per_class);
    }
    let total_f = total as f64;
    ClassMetrics {
        precision: per_class
            .iter()
            .map(|m| m.precision * m.support as f64)
            .sum::<f64>()
            / total_f,
        recall: per_class
            .iter()
            .map(|m| m.recall * m.support as f64)
            .sum::<f64>()
            / total_f,
        f1: per_class.iter().map(|m| m.f1 * m.support as f64).sum::<f64>() / total_f,
        support: total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_accuracy_bounds() {
        let y = array![0usize, 1, 2, 1];
        assert_eq!(accuracy(&y, &y), 1.0);
        let wrong = array![1usize, 2, 0, 2];
        assert_eq!(accuracy(&y, &wrong), 0.0);
        let half = array![0usize, 1, 0, 2];
        assert_eq!(accuracy(&y, &half), 0.5);
    }

    #[test]
    fn test_confusion_matrix_invariants() {
        let y_true = array![0usize, 0, 1, 1, 2, 2];
        let y_pred = array![0usize, 1, 1, 1, 2, 0];
        let matrix = ConfusionMatrix::from_predictions(&y_true, &y_pred, 3).unwrap();

        // Row sums equal per-class actual counts
        assert_eq!(matrix.row_sums(), vec![2, 2, 2]);
        // Trace equals correct predictions
        assert_eq!(matrix.trace(), 4);
        // All cells sum to the sample count
        assert_eq!(matrix.total(), 6);
        assert_eq!(matrix.get(0, 1), 1);
        assert_eq!(matrix.get(2, 0), 1);
    }

    #[test]
    fn test_out_of_range_label_rejected() {
        let y_true = array![0usize, 3];
        let y_pred = array![0usize, 0];
        assert!(ConfusionMatrix::from_predictions(&y_true, &y_pred, 3).is_err());
    }

    #[test]
    fn test_per_class_metrics() {
        let y_true = array![0usize, 0, 1, 1, 2, 2];
        let y_pred = array![0usize, 1, 1, 1, 2, 0];
        let matrix = ConfusionMatrix::from_predictions(&y_true, &y_pred, 3).unwrap();
        let metrics = per_class_metrics(&matrix);

        // Class 1: tp=2, predicted 3 times, actual 2 times
        assert_abs_diff_eq!(metrics[1].precision, 2.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(metrics[1].recall, 1.0, epsilon = 1e-12);
        assert_eq!(metrics[1].support, 2);
    }

    #[test]
    fn test_absent_class_reports_zero_not_nan() {
        // Class 2 never appears in truth or predictions
        let y_true = array![0usize, 0, 1, 1];
        let y_pred = array![0usize, 0, 1, 1];
        let matrix = ConfusionMatrix::from_predictions(&y_true, &y_pred, 3).unwrap();
        let metrics = per_class_metrics(&matrix);

        assert_eq!(metrics[2].precision, 0.0);
        assert_eq!(metrics[2].recall, 0.0);
        assert_eq!(metrics[2].f1, 0.0);
        assert_eq!(metrics[2].support, 0);
        assert!(!metrics[2].f1.is_nan());
    }

    #[test]
    fn test_averages() {
        let per_class = vec![
            ClassMetrics {
                precision: 1.0,
                recall: 1.0,
                f1: 1.0,
                support: 3,
            },
            ClassMetrics {
                precision: 0.5,
                recall: 0.5,
                f1: 0.5,
                support: 1,
            },
        ];
        let macro_avg = macro_average(&per_class);
        assert_abs_diff_eq!(macro_avg.precision, 0.75, epsilon = 1e-12);

        let weighted = weighted_average(&per_class);
        assert_abs_diff_eq!(weighted.precision, (3.0 + 0.5) / 4.0, epsilon = 1e-12);
        assert_eq!(weighted.support, 4);
    }
}
