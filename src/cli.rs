//! Command-line interface
//!
//! Single command: run the train / tune / report pipeline with optional
//! overrides of the documented defaults.

use clap::Parser;
use colored::*;
use std::path::PathBuf;
use std::time::Instant;

use crate::config::RunConfig;
use crate::pipeline;
use crate::report::EvaluationReport;

// ─── Styling helpers ───────────────────────────────────────────────────────────

fn dim(s: &str) -> ColoredString {
    s.truecolor(100, 100, 100)
}
fn muted(s: &str) -> ColoredString {
    s.truecolor(140, 140, 140)
}
fn ok(s: &str) -> ColoredString {
    s.truecolor(100, 210, 120)
}

fn section(title: &str) {
    println!();
    println!("  {}", title.white().bold());
    println!("  {}", dim(&"─".repeat(46)));
}

// Pad before colorizing; ANSI escapes would otherwise count toward the
// field width and misalign the columns
fn field(label: &str, value: ColoredString) {
    println!("  {} {}", muted(&format!("{:<16}", label)), value);
}

// ─── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "iris-knn")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "KNN on Iris: train, tune K, and emit diagnostic artifacts")]
pub struct Cli {
    /// Directory artifacts are written into (must exist) [default: results]
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Fraction of each class held out for testing [default: 0.2]
    #[arg(long)]
    pub test_fraction: Option<f64>,

    /// Seed for the stratified shuffle [default: 42]
    #[arg(long)]
    pub seed: Option<u64>,

    /// Smallest K evaluated (inclusive) [default: 1]
    #[arg(long)]
    pub k_min: Option<usize>,

    /// Largest K evaluated (inclusive) [default: 20]
    #[arg(long)]
    pub k_max: Option<usize>,

    /// Feature column for the boundary plot x-axis [default: 2]
    #[arg(long)]
    pub feature_x: Option<usize>,

    /// Feature column for the boundary plot y-axis [default: 3]
    #[arg(long)]
    pub feature_y: Option<usize>,

    /// Optional JSON config file; explicit flags override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Fold the config file (if any) and the flags into a `RunConfig`.
    /// Precedence: explicit flag, then file value, then built-in default.
    pub fn to_run_config(&self) -> anyhow::Result<RunConfig> {
        let base = match &self.config {
            Some(path) => RunConfig::from_json_file(path)?,
            None => RunConfig::default(),
        };

        let mut config = base.clone();
        if let Some(fraction) = self.test_fraction {
            config.test_fraction = fraction;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(k_min) = self.k_min {
            config.k_min = k_min;
        }
        if let Some(k_max) = self.k_max {
            config.k_max = k_max;
        }
        if let Some(x) = self.feature_x {
            config.plot_features.0 = x;
        }
        if let Some(y) = self.feature_y {
            config.plot_features.1 = y;
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        Ok(config)
    }
}

/// Run the pipeline and print the styled summary
pub fn cmd_run(config: &RunConfig) -> anyhow::Result<()> {
    section("Train & Tune");
    field("Test fraction", config.test_fraction.to_string().white());
    field("Seed", config.seed.to_string().white());
    field(
        "K range",
        format!("{}..={}", config.k_min, config.k_max).white(),
    );

    let start = Instant::now();
    let report = pipeline::run(config)?;
    let elapsed = start.elapsed();

    print_sweep(&report);

    section("Result");
    field("Best K", report.best_k.to_string().white().bold());
    field("Accuracy", format!("{:.4}", report.accuracy).white().bold());
    field("Time", format!("{:.2?}", elapsed).white());

    section("Artifacts");
    for path in [
        config.report_path(),
        config.accuracy_plot_path(),
        config.confusion_plot_path(),
        config.boundary_plot_path(),
    ] {
        println!("  {} {}", ok("✓"), path.display());
    }
    println!();

    Ok(())
}

fn print_sweep(report: &EvaluationReport) {
    section("Sweep");
    println!(
        "  {} {}",
        muted(&format!("{:<6}", "K")),
        muted(&format!("{:>10}", "Accuracy"))
    );
    for entry in &report.sweep.entries {
        let line = format!("  {:<6} {:>10.4}", entry.k, entry.accuracy);
        if entry.k == report.best_k {
            println!("{} {}", line.white().bold(), ok("best"));
        } else {
            println!("{}", line);
        }
    }
}
