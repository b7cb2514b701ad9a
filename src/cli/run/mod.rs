//! Run command - evaluates datasets end to end

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::config::AppConfig;
use crate::domain::DatasetSelection;
use crate::infrastructure::logging::init_logging;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Dataset to evaluate; repeat for several. Omit or pass `all` for every dataset
    #[arg(long = "dataset", value_name = "NAME")]
    pub datasets: Vec<String>,
}

pub async fn run(args: RunArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    init_logging(&config.logging);

    let pipeline = crate::create_pipeline_with_config(&config)?;
    let selection = DatasetSelection::from_names(args.datasets);

    let reports = pipeline.run(&selection).await?;

    for report in &reports {
        info!(
            "{}: {} records written to {}",
            report.dataset,
            report.records.len(),
            report.result_path.display()
        );
    }
    info!("Evaluated {} datasets", reports.len());

    Ok(())
}
