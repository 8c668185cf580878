use async_trait::async_trait;
use reqwest::Client;

use super::openai::{ChatRequest, chat_completion};
use super::utils::{DEEPSEEK_API_SUFFIX, DEFAULT_DEEPSEEK_BASE, complete_endpoint};
use crate::config::BackendKind;
use crate::error::Result;
use crate::llm::Backend;

/// DeepSeek backend
///
/// DeepSeek exposes an OpenAI-compatible chat completions API without the
/// `/v1` path segment; the request uses the service's default temperature.
pub struct DeepSeekBackend {
    client: Client,
    endpoint: String,
}

impl DeepSeekBackend {
    pub fn new(client: Client, base_url: Option<&str>) -> Self {
        Self {
            client,
            endpoint: complete_endpoint(
                base_url.unwrap_or(DEFAULT_DEEPSEEK_BASE),
                DEEPSEEK_API_SUFFIX,
            ),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Backend for DeepSeekBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::DeepSeek
    }

    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        model: &str,
        credential: &str,
    ) -> Result<String> {
        let request = ChatRequest::new(model, system_prompt, user_prompt, None);

        tracing::debug!(
            "Deepseek API request: model={}, system_len={}, user_len={}",
            model,
            system_prompt.len(),
            user_prompt.len()
        );

        chat_completion(
            &self.client,
            &self.endpoint,
            &request,
            credential,
            BackendKind::DeepSeek,
        )
        .await
    }
}
