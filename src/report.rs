//! Final evaluation report: metrics aggregation and text rendering

use crate::error::{KnnError, Result};
use crate::metrics::{
    accuracy, macro_average, per_class_metrics, weighted_average, ClassMetrics, ConfusionMatrix,
};
use crate::sweep::SweepResult;
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::Path;

/// Everything the final report and the plots need: the chosen K, the test
/// accuracy it achieved, the confusion matrix, per-class metrics, and the
/// sweep curve that led to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub best_k: usize,
    pub accuracy: f64,
    pub confusion: ConfusionMatrix,
    pub per_class: Vec<ClassMetrics>,
    pub class_names: Vec<String>,
    pub sweep: SweepResult,
}

impl EvaluationReport {
    /// Aggregate final predictions into a report
    pub fn new(
        y_test: &Array1<usize>,
        y_pred: &Array1<usize>,
        class_names: &[String],
        sweep: SweepResult,
    ) -> Result<Self> {
        let confusion = ConfusionMatrix::from_predictions(y_test, y_pred, class_names.len())?;
        let per_class = per_class_metrics(&confusion);
        Ok(Self {
            best_k: sweep.best_k,
            accuracy: accuracy(y_test, y_pred),
            confusion,
            per_class,
            class_names: class_names.to_vec(),
            sweep,
        })
    }

    /// Render the plain-text report: best K, accuracy to four decimals,
    /// confusion matrix grid, and a per-class classification table with
    /// accuracy / macro / weighted averages.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Best K: {}", self.best_k);
        let _ = writeln!(out, "Test Accuracy (best K): {:.4}", self.accuracy);
        let _ = writeln!(out);
        let _ = writeln!(out, "Confusion Matrix (rows=actual, cols=predicted):");
        self.render_confusion(&mut out);
        let _ = writeln!(out);
        let _ = writeln!(out, "Classification Report:");
        self.render_class_table(&mut out);
        out
    }

    fn render_confusion(&self, out: &mut String) {
        let name_width = self
            .class_names
            .iter()
            .map(|n| n.len())
            .max()
            .unwrap_or(0)
            .max(6);

        let _ = write!(out, "{:>width$} ", "", width = name_width);
        for name in &self.class_names {
            let _ = write!(out, " {:>width$}", name, width = name_width);
        }
        let _ = writeln!(out);

        for (row_idx, name) in self.class_names.iter().enumerate() {
            let _ = write!(out, "{:>width$} ", name, width = name_width);
            for col_idx in 0..self.confusion.n_classes() {
                let _ = write!(
                    out,
                    " {:>width$}",
                    self.confusion.get(row_idx, col_idx),
                    width = name_width
                );
            }
            let _ = writeln!(out);
        }
    }

    fn render_class_table(&self, out: &mut String) {
        let name_width = self
            .class_names
            .iter()
            .map(|n| n.len())
            .max()
            .unwrap_or(0)
            .max("weighted avg".len());

        let _ = writeln!(
            out,
            "{:>name_width$}  precision  recall  f1-score  support",
            ""
        );
        for (name, metrics) in self.class_names.iter().zip(self.per_class.iter()) {
            let _ = writeln!(
                out,
                "{:>name_width$}  {:>9.2}  {:>6.2}  {:>8.2}  {:>7}",
                name, metrics.precision, metrics.recall, metrics.f1, metrics.support
            );
        }
        let _ = writeln!(out);

        let total: usize = self.per_class.iter().map(|m| m.support).sum();
        let _ = writeln!(
            out,
            "{:>name_width$}  {:>9}  {:>6}  {:>8.2}  {:>7}",
            "accuracy", "", "", self.accuracy, total
        );

        let macro_avg = macro_average(&self.per_class);
        let _ = writeln!(
            out,
            "{:>name_width$}  {:>9.2}  {:>6.2}  {:>8.2}  {:>7}",
            "macro avg", macro_avg.precision, macro_avg.recall, macro_avg.f1, macro_avg.support
        );

        let weighted = weighted_average(&self.per_class);
        let _ = writeln!(
            out,
            "{:>name_width$}  {:>9.2}  {:>6.2}  {:>8.2}  {:>7}",
            "weighted avg", weighted.precision, weighted.recall, weighted.f1, weighted.support
        );
    }

    /// Write the full text report to `path` in a single pass.
    /// The parent directory must already exist.
    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(KnnError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("output directory {} does not exist", parent.display()),
                )));
            }
        }
        std::fs::write(path, self.render_text())?;
        Ok(())
    }
}
