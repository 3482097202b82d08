//! Run configuration with documented defaults

use crate::error::{KnnError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for a full train / tune / report run.
///
/// Defaults mirror the canonical experiment: 20% test split, seed 42,
/// K swept over 1..=20, petal length/width (feature indices 2 and 3)
/// for the 2D decision-boundary rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Fraction of each class held out for testing, in (0, 1)
    pub test_fraction: f64,
    /// Seed for the deterministic stratified shuffle
    pub seed: u64,
    /// Smallest K evaluated (inclusive)
    pub k_min: usize,
    /// Largest K evaluated (inclusive)
    pub k_max: usize,
    /// Feature column indices used by the decision-boundary plot only
    pub plot_features: (usize, usize),
    /// Directory all artifacts are written into (must already exist)
    pub output_dir: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            seed: 42,
            k_min: 1,
            k_max: 20,
            plot_features: (2, 3),
            output_dir: PathBuf::from("results"),
        }
    }
}

impl RunConfig {
    /// Create a config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the held-out test fraction
    pub fn with_test_fraction(mut self, fraction: f64) -> Self {
        self.test_fraction = fraction;
        self
    }

    /// Set the shuffle seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the inclusive K range
    pub fn with_k_range(mut self, k_min: usize, k_max: usize) -> Self {
        self.k_min = k_min;
        self.k_max = k_max;
        self
    }

    /// Set the feature pair used by the decision-boundary plot
    pub fn with_plot_features(mut self, x: usize, y: usize) -> Self {
        self.plot_features = (x, y);
        self
    }

    /// Set the artifact output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Load a config from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        Ok(config)
    }

    /// Validate parameter ranges.
    ///
    /// Feature indices are checked against the dataset later, where the
    /// feature count is known.
    pub fn validate(&self) -> Result<()> {
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(KnnError::InvalidFraction {
                value: self.test_fraction,
            });
        }
        if self.k_min == 0 {
            return Err(KnnError::InvalidK {
                k: self.k_min,
                n_train: 0,
            });
        }
        if self.k_max < self.k_min {
            return Err(KnnError::Config(format!(
                "k_max ({}) must be >= k_min ({})",
                self.k_max, self.k_min
            )));
        }
        if self.plot_features.0 == self.plot_features.1 {
            return Err(KnnError::Config(format!(
                "plot_features must name two distinct columns, got ({}, {})",
                self.plot_features.0, self.plot_features.1
            )));
        }
        Ok(())
    }

    /// Path of the accuracy-vs-K line chart
    pub fn accuracy_plot_path(&self) -> PathBuf {
        self.output_dir.join("accuracy_vs_k.png")
    }

    /// Path of the confusion-matrix heatmap
    pub fn confusion_plot_path(&self) -> PathBuf {
        self.output_dir.join("confusion_matrix.png")
    }

    /// Path of the 2D decision-boundary map
    pub fn boundary_plot_path(&self) -> PathBuf {
        self.output_dir.join("decision_boundary_bestk.png")
    }

    /// Path of the text report
    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join("report.txt")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RunConfig::default();
        assert_eq!(config.test_fraction, 0.2);
        assert_eq!(config.seed, 42);
        assert_eq!(config.k_min, 1);
        assert_eq!(config.k_max, 20);
        assert_eq!(config.plot_features, (2, 3));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_fraction_rejected() {
        for bad in [0.0, 1.0, -0.5, 1.5] {
            let config = RunConfig::default().with_test_fraction(bad);
            match config.validate() {
                Err(KnnError::InvalidFraction { value }) => assert_eq!(value, bad),
                other => panic!("expected InvalidFraction, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_invalid_k_range_rejected() {
        assert!(RunConfig::default().with_k_range(0, 20).validate().is_err());
        assert!(RunConfig::default().with_k_range(5, 4).validate().is_err());
    }

    #[test]
    fn test_duplicate_plot_features_rejected() {
        let config = RunConfig::default().with_plot_features(2, 2);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_artifact_paths_under_output_dir() {
        let config = RunConfig::default().with_output_dir("out");
        assert_eq!(config.report_path(), PathBuf::from("out/report.txt"));
        assert_eq!(
            config.accuracy_plot_path(),
            PathBuf::from("out/accuracy_vs_k.png")
        );
    }
}
