//! Labeled dataset type and the embedded Iris data

use crate::error::{KnnError, Result};
use ndarray::{Array1, Array2};

/// An in-memory labeled dataset: a feature matrix, integer class labels,
/// and the human-readable class names indexed by label.
#[derive(Debug, Clone)]
pub struct Dataset {
    x: Array2<f64>,
    y: Array1<usize>,
    class_names: Vec<String>,
}

impl Dataset {
    /// Build a dataset, checking the shape invariants:
    /// one label per row, every label a valid index into `class_names`,
    /// at least one feature column.
    pub fn new(x: Array2<f64>, y: Array1<usize>, class_names: Vec<String>) -> Result<Self> {
        if x.nrows() != y.len() {
            return Err(KnnError::Shape {
                expected: format!("{} labels", x.nrows()),
                actual: format!("{} labels", y.len()),
            });
        }
        if x.ncols() == 0 {
            return Err(KnnError::Data("dataset has no feature columns".to_string()));
        }
        if let Some(&bad) = y.iter().find(|&&label| label >= class_names.len()) {
            return Err(KnnError::Data(format!(
                "label {} has no entry in the class name list ({} classes)",
                bad,
                class_names.len()
            )));
        }
        Ok(Self { x, y, class_names })
    }

    /// Feature matrix, one row per sample
    pub fn x(&self) -> &Array2<f64> {
        &self.x
    }

    /// Class labels, one per sample
    pub fn y(&self) -> &Array1<usize> {
        &self.y
    }

    /// Class names indexed by label
    pub fn class_names(&self) -> &[String] {
        &self.class_names
    }

    pub fn n_samples(&self) -> usize {
        self.x.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    pub fn n_classes(&self) -> usize {
        self.class_names.len()
    }

    /// Number of samples carrying each label
    pub fn class_counts(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.n_classes()];
        for &label in self.y.iter() {
            counts[label] += 1;
        }
        counts
    }

    /// Project onto a subset of feature columns, keeping labels and names.
    /// Used by the 2D decision-boundary rendering only.
    pub fn select_features(&self, columns: &[usize]) -> Result<Self> {
        for &col in columns {
            if col >= self.n_features() {
                return Err(KnnError::Data(format!(
                    "feature index {} out of range (dataset has {} features)",
                    col,
                    self.n_features()
                )));
            }
        }
        let mut data = Vec::with_capacity(self.n_samples() * columns.len());
        for row in self.x.rows() {
            for &col in columns {
                data.push(row[col]);
            }
        }
        let x = Array2::from_shape_vec((self.n_samples(), columns.len()), data)
            .map_err(|e| KnnError::Data(e.to_string()))?;
        Self::new(x, self.y.clone(), self.class_names.clone())
    }
}

/// Feature names of the Iris dataset, indexed like its columns
pub const IRIS_FEATURE_NAMES: [&str; 4] = [
    "sepal length (cm)",
    "sepal width (cm)",
    "petal length (cm)",
    "petal width (cm)",
];

/// The canonical Iris dataset: 150 samples, 4 features, 3 balanced classes.
/// Deterministic and side-effect-free.
pub fn load_iris() -> Dataset {
    let x = Array2::from_shape_vec((150, 4), IRIS_DATA.to_vec())
        .expect("embedded Iris data is 150x4");
    let mut labels = Vec::with_capacity(150);
    for class in 0..3usize {
        labels.extend(std::iter::repeat(class).take(50));
    }
    let y = Array1::from_vec(labels);
    let class_names = vec![
        "setosa".to_string(),
        "versicolor".to_string(),
        "virginica".to_string(),
    ];
    Dataset::new(x, y, class_names).expect("embedded Iris data satisfies the invariants")
}

// Fisher's Iris measurements in UCI row order, grouped by species:
// rows 0..50 setosa, 50..100 versicolor, 100..150 virginica.
// Columns: sepal length, sepal width, petal length, petal width (cm).
#[rustfmt::skip]
const IRIS_DATA: [f64; 600] = [
    // setosa
    5.1, 3.5, 1.4, 0.2,  4.9, 3.0, 1.4, 0.2,  4.7, 3.2, 1.3, 0.2,
    4.6, 3.1, 1.5, 0.2,  5.0, 3.6, 1.4, 0.2,  5.4, 3.9, 1.7, 0.4,
    4.6, 3.4, 1.4, 0.3,  5.0, 3.4, 1.5, 0.2,  4.4, 2.9, 1.4, 0.2,
    4.9, 3.1, 1.5, 0.1,  5.4, 3.7, 1.5, 0.2,  4.8, 3.4, 1.6, 0.2,
    4.8, 3.0, 1.4, 0.1,  4.3, 3.0, 1.1, 0.1,  5.8, 4.0, 1.2, 0.2,
    5.7, 4.4, 1.5, 0.4,  5.4, 3.9, 1.3, 0.4,  5.1, 3.5, 1.4, 0.3,
    5.7, 3.8, 1.7, 0.3,  5.1, 3.8, 1.5, 0.3,  5.4, 3.4, 1.7, 0.2,
    5.1, 3.7, 1.5, 0.4,  4.6, 3.6, 1.0, 0.2,  5.1, 3.3, 1.7, 0.5,
    4.8, 3.4, 1.9, 0.2,  5.0, 3.0, 1.6, 0.2,  5.0, 3.4, 1.6, 0.4,
    5.2, 3.5, 1.5, 0.2,  5.2, 3.4, 1.4, 0.2,  4.7, 3.2, 1.6, 0.2,
    4.8, 3.1, 1.6, 0.2,  5.4, 3.4, 1.5, 0.4,  5.2, 4.1, 1.5, 0.1,
    5.5, 4.2, 1.4, 0.2,  4.9, 3.1, 1.5, 0.2,  5.0, 3.2, 1.2, 0.2,
    5.5, 3.5, 1.3, 0.2,  4.9, 3.6, 1.4, 0.1,  4.4, 3.0, 1.3, 0.2,
    5.1, 3.4, 1.5, 0.2,  5.0, 3.5, 1.3, 0.3,  4.5, 2.3, 1.3, 0.3,
    4.4, 3.2, 1.3, 0.2,  5.0, 3.5, 1.6, 0.6,  5.1, 3.8, 1.9, 0.4,
    4.8, 3.0, 1.4, 0.3,  5.1, 3.8, 1.6, 0.2,  4.6, 3.2, 1.4, 0.2,
    5.3, 3.7, 1.5, 0.2,  5.0, 3.3, 1.4, 0.2,
    // versicolor
    7.0, 3.2, 4.7, 1.4,  6.4, 3.2, 4.5, 1.5,  6.9, 3.1, 4.9, 1.5,
    5.5, 2.3, 4.0, 1.3,  6.5, 2.8, 4.6, 1.5,  5.7, 2.8, 4.5, 1.3,
    6.3, 3.3, 4.7, 1.6,  4.9, 2.4, 3.3, 1.0,  6.6, 2.9, 4.6, 1.3,
    5.2, 2.7, 3.9, 1.4,  5.0, 2.0, 3.5, 1.0,  5.9, 3.0, 4.2, 1.5,
    6.0, 2.2, 4.0, 1.0,  6.1, 2.9, 4.7, 1.4,  5.6, 2.9, 3.6, 1.3,
    6.7, 3.1, 4.4, 1.4,  5.6, 3.0, 4.5, 1.5,  5.8, 2.7, 4.1, 1.0,
    6.2, 2.2, 4.5, 1.5,  5.6, 2.5, 3.9, 1.1,  5.9, 3.2, 4.8, 1.8,
    6.1, 2.8, 4.0, 1.3,  6.3, 2.5, 4.9, 1.5,  6.1, 2.8, 4.7, 1.2,
    6.4, 2.9, 4.3, 1.3,  6.6, 3.0, 4.4, 1.4,  6.8, 2.8, 4.8, 1.4,
    6.7, 3.0, 5.0, 1.7,  6.0, 2.9, 4.5, 1.5,  5.7, 2.6, 3.5, 1.0,
    5.5, 2.4, 3.8, 1.1,  5.5, 2.4, 3.7, 1.0,  5.8, 2.7, 3.9, 1.2,
    6.0, 2.7, 5.1, 1.6,  5.4, 3.0, 4.5, 1.5,  6.0, 3.4, 4.5, 1.6,
    6.7, 3.1, 4.7, 1.5,  6.3, 2.3, 4.4, 1.3,  5.6, 3.0, 4.1, 1.3,
    5.5, 2.5, 4.0, 1.3,  5.5, 2.6, 4.4, 1.2,  6.1, 3.0, 4.6, 1.4,
    5.8, 2.6, 4.0, 1.2,  5.0, 2.3, 3.3, 1.0,  5.6, 2.7, 4.2, 1.3,
    5.7, 3.0, 4.2, 1.2,  5.7, 2.9, 4.2, 1.3,  6.2, 2.9, 4.3, 1.3,
    5.1, 2.5, 3.0, 1.1,  5.7, 2.8, 4.1, 1.3,
    // virginica
    6.3, 3.3, 6.0, 2.5,  5.8, 2.7, 5.1, 1.9,  7.1, 3.0, 5.9, 2.1,
    6.3, 2.9, 5.6, 1.8,  6.5, 3.0, 5.8, 2.2,  7.6, 3.0, 6.6, 2.1,
    4.9, 2.5, 4.5, 1.7,  7.3, 2.9, 6.3, 1.8,  6.7, 2.5, 5.8, 1.8,
    7.2, 3.6, 6.1, 2.5,  6.5, 3.2, 5.1, 2.0,  6.4, 2.7, 5.3, 1.9,
    6.8, 3.0, 5.5, 2.1,  5.7, 2.5, 5.0, 2.0,  5.8, 2.8, 5.1, 2.4,
    6.4, 3.2, 5.3, 2.3,  6.5, 3.0, 5.5, 1.8,  7.7, 3.8, 6.7, 2.2,
    7.7, 2.6, 6.9, 2.3,  6.0, 2.2, 5.0, 1.5,  6.9, 3.2, 5.7, 2.3,
    5.6, 2.8, 4.9, 2.0,  7.7, 2.8, 6.7, 2.0,  6.3, 2.7, 4.9, 1.8,
    6.7, 3.3, 5.7, 2.1,  7.2, 3.2, 6.0, 1.8,  6.2, 2.8, 4.8, 1.8,
    6.1, 3.0, 4.9, 1.8,  6.4, 2.8, 5.6, 2.1,  7.2, 3.0, 5.8, 1.6,
    7.4, 2.8, 6.1, 1.9,  7.9, 3.8, 6.4, 2.0,  6.4, 2.8, 5.6, 2.2,
    6.3, 2.8, 5.1, 1.5,  6.1, 2.6, 5.6, 1.4,  7.7, 3.0, 6.1, 2.3,
    6.3, 3.4, 5.6, 2.4,  6.4, 3.1, 5.5, 1.8,  6.0, 3.0, 4.8, 1.8,
    6.9, 3.1, 5.4, 2.1,  6.7, 3.1, 5.6, 2.4,  6.9, 3.1, 5.1, 2.3,
    5.8, 2.7, 5.1, 1.9,  6.8, 3.2, 5.9, 2.3,  6.7, 3.3, 5.7, 2.5,
    6.7, 3.0, 5.2, 2.3,  6.3, 2.5, 5.0, 1.9,  6.5, 3.0, 5.2, 2.0,
    6.2, 3.4, 5.4, 2.3,  5.9, 3.0, 5.1, 1.8,
];
