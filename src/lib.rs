//! iris-knn - K-nearest-neighbors on the Iris dataset
//!
//! A small, deterministic classification pipeline:
//! - Embedded Iris dataset (150 samples, 4 features, 3 classes)
//! - Stratified, seeded train/test split
//! - Standardization fit on the training partition only
//! - From-scratch KNN with documented, tested tie-breaks
//! - Exhaustive K sweep selecting the smallest best-scoring K
//! - Text report plus three PNG diagnostics
//!
//! # Modules
//!
//! - [`dataset`] - Labeled dataset type and the embedded Iris data
//! - [`preprocessing`] - Standard scaling
//! - [`split`] - Stratified train/test splitting
//! - [`knn`] - The classifier and the `Classifier` trait
//! - [`sweep`] - Exhaustive K tuning
//! - [`metrics`] - Accuracy, confusion matrix, per-class P/R/F1
//! - [`report`] - Final report aggregation and text rendering
//! - [`visualization`] - PNG plot rendering
//! - [`pipeline`] - End-to-end orchestration
//! - [`cli`] - Command-line interface

pub mod error;

pub mod config;
pub mod dataset;
pub mod knn;
pub mod metrics;
pub mod pipeline;
pub mod preprocessing;
pub mod report;
pub mod split;
pub mod sweep;
pub mod visualization;

pub mod cli;

pub use error::{KnnError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::RunConfig;
    pub use crate::dataset::{load_iris, Dataset};
    pub use crate::error::{KnnError, Result};
    pub use crate::knn::{Classifier, KnnClassifier};
    pub use crate::metrics::{accuracy, ClassMetrics, ConfusionMatrix};
    pub use crate::pipeline::{evaluate, run};
    pub use crate::preprocessing::StandardScaler;
    pub use crate::report::EvaluationReport;
    pub use crate::split::{train_test_split, Split};
    pub use crate::sweep::{run_sweep, KScore, SweepResult};
}
