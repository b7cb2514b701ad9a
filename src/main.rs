use clap::Parser;
use rag_benchmark::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Run(args) => cli::run::run(args).await,
        Command::Score(args) => cli::score::run(args).await,
    }
}
