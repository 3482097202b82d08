//! Feature scaling
//!
//! Standardizes each feature column to zero mean and unit variance.
//! The scaler is fit once on the training partition and the fitted
//! parameters are reused verbatim for any other partition, so nothing
//! leaks from test to train.

use crate::error::{KnnError, Result};
use ndarray::{Array1, Array2, Axis};

/// Per-column (mean, standard deviation) standardizer
#[derive(Debug, Clone)]
pub struct StandardScaler {
    means: Array1<f64>,
    stds: Array1<f64>,
}

impl StandardScaler {
    /// Fit to the given samples, computing per-column mean and
    /// sample standard deviation. A zero-variance column gets scale 1.0,
    /// which makes the transform a centering-only no-op for that column.
    pub fn fit(x: &Array2<f64>) -> Result<Self> {
        if x.nrows() < 2 {
            return Err(KnnError::Data(format!(
                "scaler needs at least 2 samples, got {}",
                x.nrows()
            )));
        }
        let means = x
            .mean_axis(Axis(0))
            .ok_or_else(|| KnnError::Data("cannot compute column means".to_string()))?;
        let stds = x.std_axis(Axis(0), 1.0);
        let stds = stds.mapv(|s| if s == 0.0 { 1.0 } else { s });
        Ok(Self { means, stds })
    }

    /// Apply the fitted parameters: `(value - mean) / std` per column.
    /// Pure; the input is not mutated and the fit parameters never change.
    pub fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        if x.ncols() != self.means.len() {
            return Err(KnnError::Shape {
                expected: format!("{} columns", self.means.len()),
                actual: format!("{} columns", x.ncols()),
            });
        }
        let mut scaled = x.clone();
        for (col_idx, mut column) in scaled.columns_mut().into_iter().enumerate() {
            let mean = self.means[col_idx];
            let std = self.stds[col_idx];
            column.mapv_inplace(|v| (v - mean) / std);
        }
        Ok(scaled)
    }

    /// Fit and transform in one step
    pub fn fit_transform(x: &Array2<f64>) -> Result<(Self, Array2<f64>)> {
        let scaler = Self::fit(x)?;
        let scaled = scaler.transform(x)?;
        Ok((scaler, scaled))
    }

    /// Fitted per-column means
    pub fn means(&self) -> &Array1<f64> {
        &self.means
    }

    /// Fitted per-column standard deviations
    pub fn stds(&self) -> &Array1<f64> {
        &self.stds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_fit_transform_standardizes_columns() {
        let x = array![[1.0, 10.0], [2.0, 20.0], [3.0, 30.0], [4.0, 40.0], [5.0, 50.0]];
        let (_, scaled) = StandardScaler::fit_transform(&x).unwrap();

        for col in scaled.columns() {
            let n = col.len() as f64;
            let mean = col.sum() / n;
            let var = col.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
            assert_abs_diff_eq!(mean, 0.0, epsilon = 1e-10);
            assert_abs_diff_eq!(var.sqrt(), 1.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_transform_does_not_refit() {
        let train = array![[1.0], [2.0], [3.0]];
        let test = array![[100.0], [200.0]];

        let scaler = StandardScaler::fit(&train).unwrap();
        let means_before = scaler.means().clone();
        let stds_before = scaler.stds().clone();

        let transformed = scaler.transform(&test).unwrap();

        assert_eq!(scaler.means(), &means_before);
        assert_eq!(scaler.stds(), &stds_before);
        // Test rows are scaled by the train parameters, far outside [-1, 1]
        assert!(transformed[[0, 0]] > 10.0);
    }

    #[test]
    fn test_zero_variance_column_is_noop_scaled() {
        let x = array![[5.0, 1.0], [5.0, 2.0], [5.0, 3.0]];
        let scaler = StandardScaler::fit(&x).unwrap();
        assert_eq!(scaler.stds()[0], 1.0);

        let scaled = scaler.transform(&x).unwrap();
        // Constant column is centered to zero, not divided by zero
        for row in scaled.rows() {
            assert_abs_diff_eq!(row[0], 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_column_mismatch_rejected() {
        let train = array![[1.0, 2.0], [3.0, 4.0]];
        let scaler = StandardScaler::fit(&train).unwrap();
        let bad = array![[1.0], [2.0]];
        assert!(matches!(
            scaler.transform(&bad),
            Err(KnnError::Shape { .. })
        ));
    }
}
