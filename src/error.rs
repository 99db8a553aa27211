use thiserror::Error;

/// Failures that stop a run outright. Remote review failures are never
/// represented here; those fall back to allowing the commit.
#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("API key is required; set REVIEW_API_KEY or add \"apiKey\" to .reviewrc.json")]
    MissingApiKey,

    #[error("terminal prompt failed: {0}")]
    Prompt(#[source] std::io::Error),
}
