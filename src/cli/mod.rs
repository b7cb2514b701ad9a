//! CLI module for RAG Benchmark
//!
//! - `run`: evaluate the engine over the benchmark datasets
//! - `score`: score a single generated answer against a reference

pub mod run;
pub mod score;

use clap::{Parser, Subcommand};

/// RAG Benchmark - score retrieval-augmented generation against ground truth
#[derive(Parser)]
#[command(name = "rag-benchmark")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Evaluate the selected datasets and write their result files
    Run(run::RunArgs),

    /// Score one generated answer against a reference answer
    Score(score::ScoreArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_defaults_to_all_datasets() {
        let cli = Cli::try_parse_from(["rag-benchmark", "run"]).unwrap();

        match cli.command {
            Command::Run(args) => assert!(args.datasets.is_empty()),
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_run_with_repeated_datasets() {
        let cli = Cli::try_parse_from([
            "rag-benchmark",
            "run",
            "--dataset",
            "travel",
            "--dataset",
            "news",
        ])
        .unwrap();

        match cli.command {
            Command::Run(args) => assert_eq!(args.datasets, vec!["travel", "news"]),
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_score_requires_both_texts() {
        assert!(Cli::try_parse_from(["rag-benchmark", "score", "--generated", "a"]).is_err());

        let cli = Cli::try_parse_from([
            "rag-benchmark",
            "score",
            "--generated",
            "a",
            "--reference",
            "b",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Score(_)));
    }
}
