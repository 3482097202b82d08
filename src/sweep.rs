//! Exhaustive K sweep over a validation accuracy metric

use crate::error::{KnnError, Result};
use crate::knn::Classifier;
use crate::metrics::accuracy;
use crate::split::Split;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Accuracy observed for one K value
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct KScore {
    pub k: usize,
    pub accuracy: f64,
}

/// Ordered sweep outcome: exactly one entry per K in the configured
/// inclusive range, in increasing K order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepResult {
    pub entries: Vec<KScore>,
    pub best_k: usize,
    pub best_accuracy: f64,
}

/// Evaluate every K in `k_min..=k_max`: fit on the train partition,
/// predict the test partition, score accuracy.
///
/// `best_k` is the smallest K among those reaching the maximum accuracy.
/// The scan keeps the first maximum (strict `>` comparison) over the
/// ascending K order, which enforces that tie-break rather than relying
/// on it incidentally.
pub fn run_sweep<C, F>(split: &Split, k_min: usize, k_max: usize, make: F) -> Result<SweepResult>
where
    C: Classifier,
    F: Fn(usize) -> C,
{
    let n_train = split.n_train();
    if k_min == 0 {
        return Err(KnnError::InvalidK { k: k_min, n_train });
    }
    // The largest K must find k neighbors in the training partition
    if k_max > n_train {
        return Err(KnnError::InsufficientSamples {
            subject: "training partition".to_string(),
            count: n_train,
            needed: k_max,
        });
    }
    if k_max < k_min {
        return Err(KnnError::Config(format!(
            "k_max ({}) must be >= k_min ({})",
            k_max, k_min
        )));
    }

    let mut entries = Vec::with_capacity(k_max - k_min + 1);
    let mut best_k = k_min;
    let mut best_accuracy = f64::NEG_INFINITY;

    for k in k_min..=k_max {
        let mut classifier = make(k);
        classifier.fit(&split.x_train, &split.y_train)?;
        let predictions = classifier.predict(&split.x_test)?;
        let score = accuracy(&split.y_test, &predictions);
        debug!(k, accuracy = score, "sweep step");

        if score > best_accuracy {
            best_accuracy = score;
            best_k = k;
        }
        entries.push(KScore { k, accuracy: score });
    }

    Ok(SweepResult {
        entries,
        best_k,
        best_accuracy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::load_iris;
    use crate::knn::KnnClassifier;
    use crate::preprocessing::StandardScaler;
    use crate::split::train_test_split;
    use ndarray::{Array1, Array2};

    fn iris_split() -> Split {
        let dataset = load_iris();
        let mut split = train_test_split(dataset.x(), dataset.y(), 0.2, 42).unwrap();
        let scaler = StandardScaler::fit(&split.x_train).unwrap();
        split.x_train = scaler.transform(&split.x_train).unwrap();
        split.x_test = scaler.transform(&split.x_test).unwrap();
        split
    }

    #[test]
    fn test_one_entry_per_k_in_order() {
        let split = iris_split();
        let result = run_sweep(&split, 1, 20, KnnClassifier::new).unwrap();

        assert_eq!(result.entries.len(), 20);
        for (offset, entry) in result.entries.iter().enumerate() {
            assert_eq!(entry.k, offset + 1);
            assert!((0.0..=1.0).contains(&entry.accuracy));
        }
    }

    #[test]
    fn test_sweep_is_deterministic() {
        let split = iris_split();
        let a = run_sweep(&split, 1, 20, KnnClassifier::new).unwrap();
        let b = run_sweep(&split, 1, 20, KnnClassifier::new).unwrap();

        assert_eq!(a.best_k, b.best_k);
        assert_eq!(a.best_accuracy, b.best_accuracy);
        for (ea, eb) in a.entries.iter().zip(b.entries.iter()) {
            assert_eq!(ea.accuracy, eb.accuracy);
        }
    }

    #[test]
    fn test_best_k_matches_max_entry() {
        let split = iris_split();
        let result = run_sweep(&split, 1, 20, KnnClassifier::new).unwrap();

        let max = result
            .entries
            .iter()
            .map(|e| e.accuracy)
            .fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(result.best_accuracy, max);

        // Smallest K among the ties wins
        let smallest_at_max = result
            .entries
            .iter()
            .find(|e| e.accuracy == max)
            .map(|e| e.k)
            .unwrap();
        assert_eq!(result.best_k, smallest_at_max);
    }

    #[test]
    fn test_tie_prefers_smaller_k() {
        // A perfectly separable toy set scores 1.0 for every K, so the
        // sweep must report the smallest K in the range
        let x_train = Array2::from_shape_vec(
            (6, 1),
            vec![0.0, 0.1, 0.2, 10.0, 10.1, 10.2],
        )
        .unwrap();
        let y_train = Array1::from_vec(vec![0usize, 0, 0, 1, 1, 1]);
        let x_test = Array2::from_shape_vec((2, 1), vec![0.05, 10.05]).unwrap();
        let y_test = Array1::from_vec(vec![0usize, 1]);
        let split = Split {
            x_train,
            y_train,
            x_test,
            y_test,
            train_indices: (0..6).collect(),
            test_indices: vec![6, 7],
        };

        let result = run_sweep(&split, 2, 5, KnnClassifier::new).unwrap();
        assert_eq!(result.best_accuracy, 1.0);
        assert_eq!(result.best_k, 2);
    }

    #[test]
    fn test_k_range_exceeding_train_size_rejected() {
        let split = iris_split();
        let n_train = split.n_train();
        let result = run_sweep(&split, 1, n_train + 1, KnnClassifier::new);
        match result {
            Err(KnnError::InsufficientSamples { count, needed, .. }) => {
                assert_eq!(count, n_train);
                assert_eq!(needed, n_train + 1);
            }
            other => panic!("expected InsufficientSamples, got {:?}", other),
        }
    }
}
