//! Completion backends for the AI helper
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::debug;
use openai::chat::{ChatCompletion, ChatCompletionMessage, ChatCompletionMessageRole};

const SYSTEM_PROMPT: &str = "You are a concise assistant for a personal task manager. \
     When asked for JSON, reply with a single JSON object and nothing else.";

/// Opaque text generator: prompt in, text out
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// OpenAI chat completions.
///
/// The `openai` crate reads its key from `OPENAI_KEY`; the binary exports it at startup.
#[derive(Debug, Clone)]
pub struct OpenAiBackend {
    model: String,
}

impl OpenAiBackend {
    pub fn new(model: String) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionBackend for OpenAiBackend {
    async fn complete(&self, prompt: &str) -> Result<String> {
        debug!(
            "Requesting completion from {} ({} chars)",
            self.model,
            prompt.len()
        );

        let completion = ChatCompletion::builder(
            &self.model,
            vec![
                ChatCompletionMessage {
                    role: ChatCompletionMessageRole::System,
                    content: Some(SYSTEM_PROMPT.to_string()),
                    name: None,
                    function_call: None,
                    tool_call_id: None,
                    tool_calls: None,
                },
                ChatCompletionMessage {
                    role: ChatCompletionMessageRole::User,
                    content: Some(prompt.to_string()),
                    name: None,
                    function_call: None,
                    tool_call_id: None,
                    tool_calls: None,
                },
            ],
        )
        .create()
        .await?;

        completion
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .map(|text| text.trim().to_string())
            .ok_or_else(|| anyhow!("Completion from {} returned no content", self.model))
    }
}
