mod adapters;
mod config;
mod core;
mod error;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::adapters::ChatCompletionsApi;
use crate::config::ReviewConfig;
use crate::core::{CodeReviewer, GitDiffSource, ReviewRun, StdinPrompter};
use crate::error::ReviewError;

/// Behavior is driven entirely by `.reviewrc.json` and the REVIEW_API_KEY /
/// REVIEW_API_ENDPOINT environment variables; there are no behavioral flags.
#[derive(Parser)]
#[command(name = "reviewgate")]
#[command(about = "AI review gate for staged git changes", long_about = None)]
#[command(version)]
struct Cli {}

#[tokio::main]
async fn main() -> ExitCode {
    let _cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ReviewConfig::load();

    let run = match build_run(&config) {
        Ok(run) => run,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(2);
        }
    };

    match run.run().await {
        Ok(outcome) if outcome.should_commit() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(err) => {
            eprintln!("review run failed: {err}");
            ExitCode::from(2)
        }
    }
}

fn build_run(config: &ReviewConfig) -> Result<ReviewRun, ReviewError> {
    let api = ChatCompletionsApi::from_config(config)?;
    let reviewer = CodeReviewer::new(Box::new(api), config.max_diff_lines);
    Ok(ReviewRun::new(
        config,
        Box::new(GitDiffSource::new(".")),
        Box::new(StdinPrompter),
        reviewer,
    ))
}
