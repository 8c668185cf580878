use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::base::send_json_request;
use super::utils::{CLAUDE_API_SUFFIX, DEFAULT_CLAUDE_BASE, complete_endpoint};
use crate::config::BackendKind;
use crate::constants::llm::{ANTHROPIC_VERSION, CLAUDE_MAX_TOKENS};
use crate::error::{CommitlyError, Result};
use crate::llm::Backend;

/// Anthropic Claude messages backend
///
/// # Configuration example
/// ```json
/// "claude": {
///   "provider": "claude",
///   "api_key": "sk-ant-...",
///   "model": "claude-3-5-sonnet-20241022"
/// }
/// ```
pub struct ClaudeBackend {
    client: Client,
    endpoint: String,
}

#[derive(Serialize)]
struct ClaudeRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<MessagePayload<'a>>,
}

#[derive(Serialize)]
struct MessagePayload<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ClaudeResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    #[serde(default)]
    text: Option<String>,
}

impl ClaudeBackend {
    pub fn new(client: Client, base_url: Option<&str>) -> Self {
        Self {
            client,
            endpoint: complete_endpoint(base_url.unwrap_or(DEFAULT_CLAUDE_BASE), CLAUDE_API_SUFFIX),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Backend for ClaudeBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Claude
    }

    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        model: &str,
        credential: &str,
    ) -> Result<String> {
        let request = ClaudeRequest {
            model,
            max_tokens: CLAUDE_MAX_TOKENS,
            system: system_prompt,
            messages: vec![MessagePayload {
                role: "user",
                content: user_prompt,
            }],
        };

        tracing::debug!(
            "Claude API request: model={}, max_tokens={}, system_len={}, user_len={}",
            model,
            CLAUDE_MAX_TOKENS,
            system_prompt.len(),
            user_prompt.len()
        );

        let response: ClaudeResponse = send_json_request(
            &self.client,
            &self.endpoint,
            &[
                ("x-api-key", credential),
                ("anthropic-version", ANTHROPIC_VERSION),
            ],
            &request,
            BackendKind::Claude,
        )
        .await?;

        if response.content.is_empty() {
            return Err(CommitlyError::EmptyResponse(BackendKind::Claude));
        }

        let text = response
            .content
            .into_iter()
            .filter(|block| block.content_type == "text")
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join("\n");

        Ok(text)
    }
}
