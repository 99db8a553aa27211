use anyhow::Result;
use serde::Serialize;

use crate::core::diff_parser::ChangedFile;

pub const REVIEW_SYSTEM_PROMPT: &str =
    "You are a code reviewer. Examine the provided changes and give concise, actionable suggestions.";

#[derive(Serialize)]
struct FilePayload<'a> {
    filename: &'a str,
    changes: String,
}

pub struct ReviewPromptBuilder;

impl ReviewPromptBuilder {
    /// Builds the (system, user) prompt pair. The user prompt is the JSON
    /// serialization of the changed files, with each file's lines joined.
    pub fn build_review_prompt(files: &[ChangedFile]) -> Result<(String, String)> {
        let payload: Vec<FilePayload> = files
            .iter()
            .map(|file| FilePayload {
                filename: &file.filename,
                changes: file.changes.join("\n"),
            })
            .collect();

        let user_prompt = serde_json::to_string(&payload)?;
        Ok((REVIEW_SYSTEM_PROMPT.to_string(), user_prompt))
    }
}
