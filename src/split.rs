//! Stratified, seeded train/test splitting

use crate::error::{KnnError, Result};
use ndarray::{Array1, Array2, Axis};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// A disjoint train/test partition of a dataset.
///
/// The index vectors refer to rows of the original matrix and are kept so
/// callers can verify reproducibility; the materialized arrays are what
/// the classifier consumes.
#[derive(Debug, Clone)]
pub struct Split {
    pub x_train: Array2<f64>,
    pub y_train: Array1<usize>,
    pub x_test: Array2<f64>,
    pub y_test: Array1<usize>,
    pub train_indices: Vec<usize>,
    pub test_indices: Vec<usize>,
}

impl Split {
    pub fn n_train(&self) -> usize {
        self.y_train.len()
    }

    pub fn n_test(&self) -> usize {
        self.y_test.len()
    }
}

/// Partition samples into train and test subsets, stratified by class.
///
/// Each class's indices are shuffled with a `ChaCha8Rng` seeded from
/// `seed`, then `round(n_class * test_fraction)` of them (clamped so both
/// partitions keep at least one sample) go to the test set. Classes are
/// visited in ascending label order, so the same seed and data always
/// produce the same split.
pub fn train_test_split(
    x: &Array2<f64>,
    y: &Array1<usize>,
    test_fraction: f64,
    seed: u64,
) -> Result<Split> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(KnnError::InvalidFraction {
            value: test_fraction,
        });
    }
    if x.nrows() != y.len() {
        return Err(KnnError::Shape {
            expected: format!("{} labels", x.nrows()),
            actual: format!("{} labels", y.len()),
        });
    }

    let n_classes = y.iter().max().map_or(0, |&m| m + 1);
    let mut class_indices: Vec<Vec<usize>> = vec![Vec::new(); n_classes];
    for (idx, &label) in y.iter().enumerate() {
        class_indices[label].push(idx);
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut train_indices = Vec::new();
    let mut test_indices = Vec::new();

    for (label, indices) in class_indices.iter().enumerate() {
        let count = indices.len();
        if count < 2 {
            return Err(KnnError::InsufficientSamples {
                subject: format!("class {}", label),
                count,
                needed: 2,
            });
        }

        let mut shuffled = indices.clone();
        shuffled.shuffle(&mut rng);

        // At least one sample stays in each partition, rounding otherwise
        let n_test = ((count as f64 * test_fraction).round() as usize).clamp(1, count - 1);

        test_indices.extend_from_slice(&shuffled[..n_test]);
        train_indices.extend_from_slice(&shuffled[n_test..]);
    }

    let x_train = x.select(Axis(0), &train_indices);
    let x_test = x.select(Axis(0), &test_indices);
    let y_train = Array1::from_iter(train_indices.iter().map(|&i| y[i]));
    let y_test = Array1::from_iter(test_indices.iter().map(|&i| y[i]));

    Ok(Split {
        x_train,
        y_train,
        x_test,
        y_test,
        train_indices,
        test_indices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::load_iris;

    #[test]
    fn test_split_is_deterministic() {
        let dataset = load_iris();
        let a = train_test_split(dataset.x(), dataset.y(), 0.2, 42).unwrap();
        let b = train_test_split(dataset.x(), dataset.y(), 0.2, 42).unwrap();
        assert_eq!(a.train_indices, b.train_indices);
        assert_eq!(a.test_indices, b.test_indices);
    }

    #[test]
    fn test_different_seeds_differ() {
        let dataset = load_iris();
        let a = train_test_split(dataset.x(), dataset.y(), 0.2, 42).unwrap();
        let b = train_test_split(dataset.x(), dataset.y(), 0.2, 43).unwrap();
        assert_ne!(a.test_indices, b.test_indices);
    }

    #[test]
    fn test_split_is_stratified() {
        let dataset = load_iris();
        let split = train_test_split(dataset.x(), dataset.y(), 0.2, 42).unwrap();

        assert_eq!(split.n_test(), 30);
        assert_eq!(split.n_train(), 120);

        // 10 test samples per class
        for class in 0..3usize {
            let in_test = split.y_test.iter().filter(|&&l| l == class).count();
            assert_eq!(in_test, 10, "class {} should have 10 test samples", class);
        }
    }

    #[test]
    fn test_partitions_are_disjoint_and_complete() {
        let dataset = load_iris();
        let split = train_test_split(dataset.x(), dataset.y(), 0.2, 42).unwrap();

        let mut all: Vec<usize> = split
            .train_indices
            .iter()
            .chain(split.test_indices.iter())
            .copied()
            .collect();
        all.sort_unstable();
        assert_eq!(all, (0..150).collect::<Vec<_>>());
    }

    #[test]
    fn test_invalid_fraction_rejected() {
        let dataset = load_iris();
        for bad in [0.0, 1.0, -0.1, 2.0] {
            let result = train_test_split(dataset.x(), dataset.y(), bad, 42);
            assert!(matches!(result, Err(KnnError::InvalidFraction { .. })));
        }
    }

    #[test]
    fn test_tiny_class_rejected() {
        let x = Array2::zeros((3, 2));
        let y = Array1::from_vec(vec![0usize, 0, 1]);
        let result = train_test_split(&x, &y, 0.5, 42);
        match result {
            Err(KnnError::InsufficientSamples { subject, .. }) => {
                assert_eq!(subject, "class 1");
            }
            other => panic!("expected InsufficientSamples, got {:?}", other),
        }
    }

    #[test]
    fn test_each_partition_keeps_one_sample_per_class() {
        // 2 samples per class with a fraction that rounds to zero test
        // samples still places one in each partition
        let x = Array2::zeros((4, 2));
        let y = Array1::from_vec(vec![0usize, 0, 1, 1]);
        let split = train_test_split(&x, &y, 0.1, 7).unwrap();
        for class in 0..2usize {
            assert_eq!(split.y_train.iter().filter(|&&l| l == class).count(), 1);
            assert_eq!(split.y_test.iter().filter(|&&l| l == class).count(), 1);
        }
    }
}
