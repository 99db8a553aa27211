use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::adapters::llm::{CompletionApi, CompletionRequest, CompletionResponse};
use crate::config::ReviewConfig;
use crate::error::ReviewError;

/// OpenAI-style chat-completions client. The endpoint URL comes straight
/// from the config, so any compatible provider works. No timeout is set;
/// the run blocks for as long as the endpoint does.
pub struct ChatCompletionsApi {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    stream: bool,
}

#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Deserialize, Default)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl ChatCompletionsApi {
    pub fn from_config(config: &ReviewConfig) -> Result<Self, ReviewError> {
        let api_key = config.require_api_key()?.to_string();
        Ok(Self {
            client: Client::new(),
            endpoint: config.api_endpoint.clone(),
            api_key,
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl CompletionApi for ChatCompletionsApi {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let body = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: request.system_prompt,
                },
                Message {
                    role: "user".to_string(),
                    content: request.user_prompt,
                },
            ],
            stream: false,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .context("failed to send review request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("review API returned {}: {}", status, error_text);
        }

        // An unexpected body shape is a missing review, not an error.
        let text = response
            .text()
            .await
            .context("failed to read review response")?;
        let parsed: ChatResponse = serde_json::from_str(&text).unwrap_or_default();
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty());

        Ok(CompletionResponse { content })
    }
}
