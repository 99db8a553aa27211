use tracing::info;

use crate::config::ReviewConfig;
use crate::core::diff_parser::{DiffParser, IgnoreRule};
use crate::core::git::DiffSource;
use crate::core::reviewer::CodeReviewer;
use crate::core::terminal::Prompter;
use crate::error::ReviewError;

/// Terminal state of one run. Only `Abort` blocks the commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    NoChanges,
    NothingToReview,
    ReviewSkipped,
    Proceed,
    Abort,
}

impl RunOutcome {
    pub fn should_commit(&self) -> bool {
        !matches!(self, RunOutcome::Abort)
    }
}

/// One-shot pipeline: fetch diff, parse and filter, ask for review consent,
/// review, ask for commit consent. All collaborators are injected.
pub struct ReviewRun {
    ignore_rules: Vec<IgnoreRule>,
    diff_source: Box<dyn DiffSource>,
    prompter: Box<dyn Prompter>,
    reviewer: CodeReviewer,
}

impl ReviewRun {
    pub fn new(
        config: &ReviewConfig,
        diff_source: Box<dyn DiffSource>,
        prompter: Box<dyn Prompter>,
        reviewer: CodeReviewer,
    ) -> Self {
        Self {
            ignore_rules: config.ignore_rules(),
            diff_source,
            prompter,
            reviewer,
        }
    }

    pub async fn run(&self) -> Result<RunOutcome, ReviewError> {
        let diff = match self.diff_source.staged_diff() {
            Some(diff) if !diff.is_empty() => diff,
            _ => {
                println!("No staged changes detected");
                return Ok(RunOutcome::NoChanges);
            }
        };

        let files = DiffParser::filter_ignored(DiffParser::parse(&diff), &self.ignore_rules);
        if files.is_empty() {
            println!("No file changes to review");
            return Ok(RunOutcome::NothingToReview);
        }
        info!("{} file(s) staged for review", files.len());

        if !self
            .prompter
            .ask("\nRun AI review on these changes? (y/N) ")
            .await?
        {
            println!("\nSkipping AI review, continuing with commit\n");
            return Ok(RunOutcome::ReviewSkipped);
        }

        if self.reviewer.review(&files, self.prompter.as_ref()).await? {
            Ok(RunOutcome::Proceed)
        } else {
            println!("\nCommit aborted\n");
            Ok(RunOutcome::Abort)
        }
    }
}
