//! End-to-end run: load, split, scale, sweep, evaluate, emit artifacts
//!
//! Data flows through parameters and return values only; every stage is a
//! plain function call and any failure aborts the run before later
//! artifacts are touched.

use crate::config::RunConfig;
use crate::dataset::{load_iris, Dataset, IRIS_FEATURE_NAMES};
use crate::error::Result;
use crate::knn::{Classifier, KnnClassifier};
use crate::preprocessing::StandardScaler;
use crate::report::EvaluationReport;
use crate::split::{train_test_split, Split};
use crate::sweep::run_sweep;
use crate::visualization::{plot_accuracy_vs_k, plot_confusion_matrix, plot_decision_boundary};
use tracing::info;

/// Split the raw samples, then standardize both partitions with
/// parameters fitted on the training partition alone.
fn split_and_scale(dataset: &Dataset, config: &RunConfig) -> Result<Split> {
    let mut split = train_test_split(dataset.x(), dataset.y(), config.test_fraction, config.seed)?;
    let scaler = StandardScaler::fit(&split.x_train)?;
    split.x_train = scaler.transform(&split.x_train)?;
    split.x_test = scaler.transform(&split.x_test)?;
    Ok(split)
}

/// Train, tune K, and evaluate without touching the filesystem.
/// `run` adds the artifact writes on top of this.
pub fn evaluate(config: &RunConfig) -> Result<EvaluationReport> {
    config.validate()?;

    let dataset = load_iris();
    info!(
        samples = dataset.n_samples(),
        features = dataset.n_features(),
        classes = dataset.n_classes(),
        "loaded dataset"
    );

    let split = split_and_scale(&dataset, config)?;
    info!(
        train = split.n_train(),
        test = split.n_test(),
        seed = config.seed,
        "stratified split"
    );

    let sweep = run_sweep(&split, config.k_min, config.k_max, KnnClassifier::new)?;
    info!(
        best_k = sweep.best_k,
        best_accuracy = sweep.best_accuracy,
        "sweep finished"
    );

    // Final model at the selected K, re-predicting the test partition
    let mut best = KnnClassifier::new(sweep.best_k);
    best.fit(&split.x_train, &split.y_train)?;
    let y_pred = best.predict(&split.x_test)?;

    EvaluationReport::new(&split.y_test, &y_pred, dataset.class_names(), sweep)
}

/// Full pipeline: `evaluate` plus the text report and the three plots,
/// all written into `config.output_dir` (which must already exist).
pub fn run(config: &RunConfig) -> Result<EvaluationReport> {
    let report = evaluate(config)?;

    report.write(&config.report_path())?;
    plot_accuracy_vs_k(&report.sweep, &config.accuracy_plot_path())?;
    plot_confusion_matrix(
        &report.confusion,
        &report.class_names,
        report.best_k,
        &config.confusion_plot_path(),
    )?;

    // A separate 2D split/scale/fit, used only for the boundary rendering.
    // Same seed and labels, so the partition indices match the full model's.
    let dataset = load_iris();
    let (fx, fy) = config.plot_features;
    let dataset_2d = dataset.select_features(&[fx, fy])?;
    let split_2d = split_and_scale(&dataset_2d, config)?;

    let mut model_2d = KnnClassifier::new(report.best_k);
    model_2d.fit(&split_2d.x_train, &split_2d.y_train)?;

    let axis_label = |idx: usize| -> String {
        IRIS_FEATURE_NAMES
            .get(idx)
            .map_or_else(|| format!("feature {}", idx), |name| format!("{} (scaled)", name))
    };
    plot_decision_boundary(
        &model_2d,
        &split_2d.x_train,
        &split_2d.y_train,
        &split_2d.x_test,
        &split_2d.y_test,
        (&axis_label(fx), &axis_label(fy)),
        report.best_k,
        &config.boundary_plot_path(),
    )?;

    info!(dir = %config.output_dir.display(), "artifacts written");
    Ok(report)
}
