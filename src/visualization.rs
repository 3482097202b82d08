//! Diagnostic plot rendering
//!
//! Three PNG artifacts per run: the accuracy-vs-K curve, the annotated
//! confusion-matrix heatmap, and the 2D decision-region map. Rendering is
//! side-effecting but never feeds back into the reported numbers.

use crate::error::{KnnError, Result};
use crate::knn::Classifier;
use crate::metrics::ConfusionMatrix;
use crate::sweep::SweepResult;
use ndarray::{Array1, Array2};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

/// Per-class plot colors: setosa / versicolor / virginica by default
const CLASS_COLORS: [RGBColor; 3] = [
    RGBColor(214, 69, 65),
    RGBColor(38, 166, 91),
    RGBColor(31, 119, 180),
];

fn class_color(class: usize) -> RGBColor {
    CLASS_COLORS[class % CLASS_COLORS.len()]
}

fn render_err<E: std::fmt::Display>(e: E) -> KnnError {
    KnnError::Render(e.to_string())
}

/// The output directory must exist already; a clear error beats the
/// backend's encoder failure.
fn check_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            return Err(KnnError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("output directory {} does not exist", parent.display()),
            )));
        }
    }
    Ok(())
}

/// Line chart of sweep accuracy against K, with point markers
pub fn plot_accuracy_vs_k(sweep: &SweepResult, path: &Path) -> Result<()> {
    check_parent(path)?;

    let root = BitMapBackend::new(path, (900, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let k_min = sweep.entries.first().map_or(1, |e| e.k) as f64;
    let k_max = sweep.entries.last().map_or(1, |e| e.k) as f64;
    let acc_min = sweep
        .entries
        .iter()
        .map(|e| e.accuracy)
        .fold(f64::INFINITY, f64::min);
    let y_low = (acc_min - 0.05).max(0.0);

    let mut chart = ChartBuilder::on(&root)
        .caption("Accuracy vs K (Iris)", ("sans-serif", 28))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d((k_min - 0.5)..(k_max + 0.5), y_low..1.01)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_desc("K")
        .y_desc("Accuracy")
        .light_line_style(RGBColor(230, 230, 230))
        .draw()
        .map_err(render_err)?;

    let points: Vec<(f64, f64)> = sweep
        .entries
        .iter()
        .map(|e| (e.k as f64, e.accuracy))
        .collect();

    chart
        .draw_series(LineSeries::new(points.clone(), &BLUE))
        .map_err(render_err)?;
    chart
        .draw_series(points.iter().map(|&p| Circle::new(p, 4, BLUE.filled())))
        .map_err(render_err)?;

    // Mark the selected K
    let best = (
        sweep.best_k as f64,
        sweep
            .entries
            .iter()
            .find(|e| e.k == sweep.best_k)
            .map_or(sweep.best_accuracy, |e| e.accuracy),
    );
    chart
        .draw_series(std::iter::once(Circle::new(best, 7, RED.stroke_width(2))))
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    Ok(())
}

/// Heatmap of the confusion matrix with integer annotations and class
/// names on both axes. Rows are actual classes, columns predicted.
pub fn plot_confusion_matrix(
    matrix: &ConfusionMatrix,
    class_names: &[String],
    best_k: usize,
    path: &Path,
) -> Result<()> {
    check_parent(path)?;

    let root = BitMapBackend::new(path, (700, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let n = matrix.n_classes() as f64;
    let max_count = (0..matrix.n_classes())
        .flat_map(|i| (0..matrix.n_classes()).map(move |j| (i, j)))
        .map(|(i, j)| matrix.get(i, j))
        .max()
        .unwrap_or(0)
        .max(1);

    // Left strip holds the row names, top strip the column names;
    // y is reversed so actual class 0 sits in the top row
    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Confusion Matrix (KNN, best K={})", best_k),
            ("sans-serif", 24),
        )
        .margin(15)
        .build_cartesian_2d(-1.6..n, n..-0.7)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .disable_axes()
        .draw()
        .map_err(render_err)?;

    for actual in 0..matrix.n_classes() {
        for predicted in 0..matrix.n_classes() {
            let count = matrix.get(actual, predicted);
            let intensity = count as f64 / max_count as f64;
            let shade = RGBColor(
                (255.0 - 200.0 * intensity) as u8,
                (255.0 - 150.0 * intensity) as u8,
                255,
            );
            let (x, y) = (predicted as f64, actual as f64);
            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [(x, y), (x + 1.0, y + 1.0)],
                    shade.filled(),
                )))
                .map_err(render_err)?;
            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [(x, y), (x + 1.0, y + 1.0)],
                    BLACK.stroke_width(1),
                )))
                .map_err(render_err)?;

            // Light text on dark cells
            let text_color = if intensity > 0.5 { &WHITE } else { &BLACK };
            let style = TextStyle::from(("sans-serif", 22).into_font())
                .color(text_color)
                .pos(Pos::new(HPos::Center, VPos::Center));
            chart
                .draw_series(std::iter::once(Text::new(
                    format!("{}", count),
                    (x + 0.5, y + 0.5),
                    style,
                )))
                .map_err(render_err)?;
        }
    }

    let label_style = TextStyle::from(("sans-serif", 18).into_font())
        .pos(Pos::new(HPos::Center, VPos::Center));
    let row_style = TextStyle::from(("sans-serif", 18).into_font())
        .pos(Pos::new(HPos::Right, VPos::Center));

    for (idx, name) in class_names.iter().enumerate() {
        // Column headers (predicted)
        chart
            .draw_series(std::iter::once(Text::new(
                name.clone(),
                (idx as f64 + 0.5, -0.35),
                label_style.clone(),
            )))
            .map_err(render_err)?;
        // Row labels (actual)
        chart
            .draw_series(std::iter::once(Text::new(
                name.clone(),
                (-0.1, idx as f64 + 0.5),
                row_style.clone(),
            )))
            .map_err(render_err)?;
    }

    root.present().map_err(render_err)?;
    Ok(())
}

/// Number of grid steps per axis in the decision-region map
const BOUNDARY_GRID_STEPS: usize = 300;

/// Filled decision-region map over two features, with the train and test
/// points overlaid. The passed classifier must already be fitted on the
/// matching 2D training data; it exists solely for this rendering and
/// contributes nothing to the reported metrics.
#[allow(clippy::too_many_arguments)]
pub fn plot_decision_boundary<C: Classifier>(
    classifier: &C,
    x_train: &Array2<f64>,
    y_train: &Array1<usize>,
    x_test: &Array2<f64>,
    y_test: &Array1<usize>,
    axis_labels: (&str, &str),
    best_k: usize,
    path: &Path,
) -> Result<()> {
    check_parent(path)?;

    if x_train.ncols() != 2 || x_test.ncols() != 2 {
        return Err(KnnError::Shape {
            expected: "2 columns".to_string(),
            actual: format!("{} / {} columns", x_train.ncols(), x_test.ncols()),
        });
    }

    // Grid range spans all points, padded by 0.5 on each side
    let (train_x, train_y) = (x_train.column(0), x_train.column(1));
    let (test_x, test_y) = (x_test.column(0), x_test.column(1));
    let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &v in train_x.iter().chain(test_x.iter()) {
        x_min = x_min.min(v);
        x_max = x_max.max(v);
    }
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &v in train_y.iter().chain(test_y.iter()) {
        y_min = y_min.min(v);
        y_max = y_max.max(v);
    }
    x_min -= 0.5;
    x_max += 0.5;
    y_min -= 0.5;
    y_max += 0.5;

    let steps = BOUNDARY_GRID_STEPS;
    let dx = (x_max - x_min) / steps as f64;
    let dy = (y_max - y_min) / steps as f64;

    // Predict the whole grid in one batch (cell centers)
    let mut grid = Vec::with_capacity(steps * steps * 2);
    for row in 0..steps {
        for col in 0..steps {
            grid.push(x_min + (col as f64 + 0.5) * dx);
            grid.push(y_min + (row as f64 + 0.5) * dy);
        }
    }
    let grid = Array2::from_shape_vec((steps * steps, 2), grid)
        .map_err(|e| KnnError::Data(e.to_string()))?;
    let grid_labels = classifier.predict(&grid)?;

    let root = BitMapBackend::new(path, (900, 750)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Decision Boundary (K={})", best_k),
            ("sans-serif", 26),
        )
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(55)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_desc(axis_labels.0)
        .y_desc(axis_labels.1)
        .disable_mesh()
        .draw()
        .map_err(render_err)?;

    // Filled regions, one low-alpha rectangle per grid cell
    chart
        .draw_series((0..steps * steps).map(|cell| {
            let row = cell / steps;
            let col = cell % steps;
            let x0 = x_min + col as f64 * dx;
            let y0 = y_min + row as f64 * dy;
            Rectangle::new(
                [(x0, y0), (x0 + dx, y0 + dy)],
                class_color(grid_labels[cell]).mix(0.25).filled(),
            )
        }))
        .map_err(render_err)?;

    // Training points as filled circles
    chart
        .draw_series(
            x_train
                .rows()
                .into_iter()
                .zip(y_train.iter())
                .map(|(row, &label)| {
                    Circle::new((row[0], row[1]), 4, class_color(label).filled())
                }),
        )
        .map_err(render_err)?
        .label("train")
        .legend(|(x, y)| Circle::new((x + 10, y), 4, BLACK.filled()));

    // Test points as triangles
    chart
        .draw_series(
            x_test
                .rows()
                .into_iter()
                .zip(y_test.iter())
                .map(|(row, &label)| {
                    TriangleMarker::new((row[0], row[1]), 6, class_color(label).filled())
                }),
        )
        .map_err(render_err)?
        .label("test")
        .legend(|(x, y)| TriangleMarker::new((x + 10, y), 6, BLACK.filled()));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    Ok(())
}
