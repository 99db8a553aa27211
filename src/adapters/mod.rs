pub mod chat;
pub mod llm;

pub use chat::ChatCompletionsApi;
pub use llm::{CompletionApi, CompletionRequest, CompletionResponse};
