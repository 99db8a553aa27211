use tracing::{info, warn};

use crate::adapters::llm::{CompletionApi, CompletionRequest};
use crate::core::diff_parser::ChangedFile;
use crate::core::prompt::ReviewPromptBuilder;
use crate::core::terminal::Prompter;
use crate::error::ReviewError;

/// Runs one review round against the remote endpoint and reports whether
/// the commit should proceed. Remote failures never block the commit.
pub struct CodeReviewer {
    api: Box<dyn CompletionApi>,
    max_diff_lines: usize,
}

impl CodeReviewer {
    pub fn new(api: Box<dyn CompletionApi>, max_diff_lines: usize) -> Self {
        Self {
            api,
            max_diff_lines,
        }
    }

    pub async fn review(
        &self,
        files: &[ChangedFile],
        prompter: &dyn Prompter,
    ) -> Result<bool, ReviewError> {
        let total_lines: usize = files.iter().map(|file| file.changes.len()).sum();
        if total_lines > self.max_diff_lines {
            warn!(
                "changed lines ({}) exceed limit ({}), skipping AI review",
                total_lines, self.max_diff_lines
            );
            return Ok(true);
        }

        info!("requesting AI review for {} file(s)", files.len());
        let request = match ReviewPromptBuilder::build_review_prompt(files) {
            Ok((system_prompt, user_prompt)) => CompletionRequest {
                system_prompt,
                user_prompt,
            },
            Err(err) => {
                warn!("failed to build review prompt: {:#}", err);
                return Ok(true);
            }
        };

        let response = match self.api.complete(request).await {
            Ok(response) => response,
            Err(err) => {
                warn!("AI review failed: {:#}", err);
                return Ok(true);
            }
        };

        match response.content {
            Some(review) => {
                println!("\nAI review:\n");
                println!("{review}");
                prompter.ask("\nProceed with commit? (y/N) ").await
            }
            None => {
                warn!("review response contained no content");
                prompter
                    .ask("\nNo review available. Proceed with commit anyway? (y/N) ")
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::llm::CompletionResponse;
    use crate::config::ReviewConfig;
    use anyhow::Result;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingApi {
        calls: Arc<AtomicUsize>,
        content: Option<String>,
    }

    #[async_trait]
    impl CompletionApi for CountingApi {
        async fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(CompletionResponse {
                content: self.content.clone(),
            })
        }
    }

    struct ScriptedPrompter {
        answer: bool,
        asked: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Prompter for ScriptedPrompter {
        async fn ask(&self, _question: &str) -> Result<bool, ReviewError> {
            self.asked.fetch_add(1, Ordering::SeqCst);
            Ok(self.answer)
        }
    }

    fn files_with_lines(count: usize) -> Vec<ChangedFile> {
        vec![ChangedFile {
            filename: "big.rs".to_string(),
            changes: (0..count).map(|i| format!("+line {i}")).collect(),
        }]
    }

    #[tokio::test]
    async fn size_gate_skips_review_without_network_call() {
        let calls = Arc::new(AtomicUsize::new(0));
        let asked = Arc::new(AtomicUsize::new(0));
        let reviewer = CodeReviewer::new(
            Box::new(CountingApi {
                calls: calls.clone(),
                content: Some("unused".to_string()),
            }),
            300,
        );
        let prompter = ScriptedPrompter {
            answer: false,
            asked: asked.clone(),
        };

        let proceed = reviewer
            .review(&files_with_lines(301), &prompter)
            .await
            .unwrap();

        assert!(proceed);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(asked.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn size_gate_allows_exactly_the_limit() {
        let calls = Arc::new(AtomicUsize::new(0));
        let reviewer = CodeReviewer::new(
            Box::new(CountingApi {
                calls: calls.clone(),
                content: Some("fine".to_string()),
            }),
            300,
        );
        let prompter = ScriptedPrompter {
            answer: true,
            asked: Arc::new(AtomicUsize::new(0)),
        };

        let proceed = reviewer
            .review(&files_with_lines(300), &prompter)
            .await
            .unwrap();

        assert!(proceed);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn user_answer_decides_after_successful_review() {
        let reviewer = CodeReviewer::new(
            Box::new(CountingApi {
                calls: Arc::new(AtomicUsize::new(0)),
                content: Some("consider renaming this".to_string()),
            }),
            300,
        );
        let prompter = ScriptedPrompter {
            answer: false,
            asked: Arc::new(AtomicUsize::new(0)),
        };

        let proceed = reviewer
            .review(&files_with_lines(2), &prompter)
            .await
            .unwrap();

        assert!(!proceed);
    }

    #[tokio::test]
    async fn missing_review_content_consults_the_user() {
        let asked = Arc::new(AtomicUsize::new(0));
        let reviewer = CodeReviewer::new(
            Box::new(CountingApi {
                calls: Arc::new(AtomicUsize::new(0)),
                content: None,
            }),
            300,
        );
        let prompter = ScriptedPrompter {
            answer: true,
            asked: asked.clone(),
        };

        let proceed = reviewer
            .review(&files_with_lines(2), &prompter)
            .await
            .unwrap();

        assert!(proceed);
        assert_eq!(asked.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn remote_failure_fails_open() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(500)
            .with_body("server busy")
            .create_async()
            .await;

        let config = ReviewConfig {
            api_key: Some("test-key".to_string()),
            api_endpoint: server.url(),
            ..ReviewConfig::default()
        };
        let api = crate::adapters::ChatCompletionsApi::from_config(&config).unwrap();
        let reviewer = CodeReviewer::new(Box::new(api), 300);
        let asked = Arc::new(AtomicUsize::new(0));
        let prompter = ScriptedPrompter {
            answer: false,
            asked: asked.clone(),
        };

        let proceed = reviewer
            .review(&files_with_lines(2), &prompter)
            .await
            .unwrap();

        assert!(proceed);
        assert_eq!(asked.load(Ordering::SeqCst), 0);
    }
}
