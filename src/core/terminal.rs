use async_trait::async_trait;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::error::ReviewError;

/// Yes/no questions on the terminal. Injected so tests can script answers.
#[async_trait]
pub trait Prompter: Send + Sync {
    async fn ask(&self, question: &str) -> Result<bool, ReviewError>;
}

/// Reads one line from stdin per question; the handle is scoped to the call
/// and released on every path. Only a trimmed, case-folded "y" is a yes.
pub struct StdinPrompter;

#[async_trait]
impl Prompter for StdinPrompter {
    async fn ask(&self, question: &str) -> Result<bool, ReviewError> {
        {
            let mut stdout = std::io::stdout();
            stdout
                .write_all(question.as_bytes())
                .map_err(ReviewError::Prompt)?;
            stdout.flush().map_err(ReviewError::Prompt)?;
        }

        let mut reader = BufReader::new(tokio::io::stdin());
        let mut answer = String::new();
        reader
            .read_line(&mut answer)
            .await
            .map_err(ReviewError::Prompt)?;

        Ok(answer.trim().eq_ignore_ascii_case("y"))
    }
}
