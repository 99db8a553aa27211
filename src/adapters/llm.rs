use anyhow::Result;
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub user_prompt: String,
}

/// `content` is `None` when the endpoint answered but the completion text
/// was missing, empty, or the body had an unexpected shape.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub content: Option<String>,
}

/// A remote completion endpoint. One call per review, no retry.
#[async_trait]
pub trait CompletionApi: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;
}
