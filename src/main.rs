//! iris-knn - Main entry point

use clap::Parser;
use iris_knn::cli::{cmd_run, Cli};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "iris_knn=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.to_run_config()?;
    cmd_run(&config)?;

    Ok(())
}
