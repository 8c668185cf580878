use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::base::send_json_request;
use super::utils::{DEFAULT_OPENAI_BASE, OPENAI_API_SUFFIX, complete_endpoint};
use crate::config::BackendKind;
use crate::constants::llm::DEFAULT_TEMPERATURE;
use crate::error::{CommitlyError, Result};
use crate::llm::Backend;

/// OpenAI chat completions backend
///
/// # Configuration example
/// ```json
/// "openai": {
///   "provider": "openai",
///   "api_key": "sk-...",
///   "model": "gpt-4o",
///   "endpoint": "https://api.openai.com"
/// }
/// ```
pub struct OpenAIBackend {
    client: Client,
    endpoint: String,
}

#[derive(Serialize)]
pub(crate) struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<MessagePayload<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Serialize)]
struct MessagePayload<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
pub(crate) struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    #[serde(default)]
    content: Option<String>,
}

impl<'a> ChatRequest<'a> {
    pub(crate) fn new(
        model: &'a str,
        system_prompt: &'a str,
        user_prompt: &'a str,
        temperature: Option<f32>,
    ) -> Self {
        Self {
            model,
            messages: vec![
                MessagePayload {
                    role: "system",
                    content: system_prompt,
                },
                MessagePayload {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature,
        }
    }
}

impl ChatResponse {
    /// Content of the first choice.
    pub(crate) fn into_first_text(self, backend: BackendKind) -> Result<String> {
        self.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.unwrap_or_default())
            .ok_or(CommitlyError::EmptyResponse(backend))
    }
}

/// Chat completions call shared by OpenAI-compatible backends.
pub(crate) async fn chat_completion(
    client: &Client,
    endpoint: &str,
    request: &ChatRequest<'_>,
    credential: &str,
    backend: BackendKind,
) -> Result<String> {
    let auth = format!("Bearer {}", credential);
    let response: ChatResponse = send_json_request(
        client,
        endpoint,
        &[("Authorization", auth.as_str())],
        request,
        backend,
    )
    .await?;

    response.into_first_text(backend)
}

impl OpenAIBackend {
    /// Builds the backend; `base_url` overrides the public API host.
    pub fn new(client: Client, base_url: Option<&str>) -> Self {
        Self {
            client,
            endpoint: complete_endpoint(base_url.unwrap_or(DEFAULT_OPENAI_BASE), OPENAI_API_SUFFIX),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Backend for OpenAIBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::OpenAI
    }

    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        model: &str,
        credential: &str,
    ) -> Result<String> {
        let request = ChatRequest::new(
            model,
            system_prompt,
            user_prompt,
            Some(DEFAULT_TEMPERATURE),
        );

        tracing::debug!(
            "OpenAI API request: model={}, temperature={}, system_len={}, user_len={}",
            model,
            DEFAULT_TEMPERATURE,
            system_prompt.len(),
            user_prompt.len()
        );

        chat_completion(
            &self.client,
            &self.endpoint,
            &request,
            credential,
            BackendKind::OpenAI,
        )
        .await
    }
}
