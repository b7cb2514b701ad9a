//! Score command - metrics for a single answer/reference pair

use anyhow::Context;
use clap::Args;

use crate::config::AppConfig;
use crate::infrastructure::logging::init_logging;

#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Generated answer
    #[arg(long)]
    pub generated: String,

    /// Reference answer
    #[arg(long)]
    pub reference: String,
}

pub async fn run(args: ScoreArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    init_logging(&config.logging);

    let runner = crate::create_runner_with_config(&config)?;

    let (bleu_avg, bleu_1, bleu_2, bleu_3, bleu_4) =
        runner.compute_bleu(&args.generated, &args.reference)?;
    let rouge_l = runner.compute_rouge_l(&args.generated, &args.reference)?;
    let semantic = runner
        .compute_semantic_similarity(&args.generated, &args.reference)
        .await?;

    println!("bleu-avg: {}", bleu_avg);
    println!("bleu-1: {}", bleu_1);
    println!("bleu-2: {}", bleu_2);
    println!("bleu-3: {}", bleu_3);
    println!("bleu-4: {}", bleu_4);
    println!("rouge-L: {}", rouge_l);
    println!("semantic similarity: {}", semantic);

    Ok(())
}
