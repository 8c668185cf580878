use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use super::base::send_json_request;
use super::utils::DEFAULT_GEMINI_BASE;
use crate::config::BackendKind;
use crate::constants::llm::DEFAULT_TEMPERATURE;
use crate::error::{CommitlyError, Result};
use crate::llm::Backend;

/// Google Gemini backend
///
/// The model is part of the URL rather than the body:
/// `{base}/v1beta/models/{model}:generateContent`.
///
/// # Configuration example
/// ```json
/// "gemini": {
///   "provider": "gemini",
///   "api_key": "AIza...",
///   "model": "gemini-pro"
/// }
/// ```
pub struct GeminiBackend {
    client: Client,
    base_url: String,
}

// ============================================================================
// Request/response structure
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    system_instruction: GeminiContent<'a>,
    contents: Vec<GeminiContent<'a>>,
    safety_settings: Vec<SafetySetting>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct GeminiContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiResponseContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Option<Vec<GeminiResponsePart>>,
}

#[derive(Deserialize)]
struct GeminiResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiBackend {
    pub fn new(client: Client, base_url: Option<&str>) -> Self {
        Self {
            client,
            base_url: base_url
                .unwrap_or(DEFAULT_GEMINI_BASE)
                .trim_end_matches('/')
                .to_string(),
        }
    }

    /// Endpoint: /v1beta/models/{model}:generateContent
    ///
    /// The model is pushed as one path segment, so reserved characters in a
    /// configured model name are percent-encoded.
    pub fn generate_content_url(&self, model: &str) -> Result<String> {
        let invalid = |reason: &str| CommitlyError::Backend {
            backend: BackendKind::Gemini,
            status: None,
            message: format!("invalid endpoint '{}': {}", self.base_url, reason),
        };

        let method = format!("{model}:generateContent");
        let mut url = Url::parse(&self.base_url).map_err(|e| invalid(&e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("URL cannot be a base"))?
            .pop_if_empty()
            .extend(["v1beta", "models", method.as_str()]);
        Ok(url.into())
    }
}

fn build_request<'a>(system: &'a str, user_message: &'a str) -> GeminiRequest<'a> {
    GeminiRequest {
        system_instruction: GeminiContent {
            role: None,
            parts: vec![GeminiPart { text: system }],
        },
        contents: vec![GeminiContent {
            role: Some("user"),
            parts: vec![GeminiPart { text: user_message }],
        }],
        safety_settings: vec![SafetySetting {
            category: "HARM_CATEGORY_HARASSMENT",
            threshold: "BLOCK_NONE",
        }],
        generation_config: GenerationConfig {
            temperature: DEFAULT_TEMPERATURE,
        },
    }
}

fn extract_text(response: GeminiResponse) -> Result<String> {
    let candidate = response
        .candidates
        .and_then(|c| c.into_iter().next())
        .ok_or(CommitlyError::EmptyResponse(BackendKind::Gemini))?;

    // SAFETY, RECITATION and friends mean the text was withheld
    if let Some(reason) = &candidate.finish_reason {
        match reason.as_str() {
            "STOP" => {}
            "MAX_TOKENS" => {
                tracing::warn!("Gemini response truncated (MAX_TOKENS)");
            }
            _ => {
                tracing::warn!("Gemini response finished with reason: {}", reason);
                return Err(CommitlyError::Backend {
                    backend: BackendKind::Gemini,
                    status: None,
                    message: format!("response blocked ({})", reason),
                });
            }
        }
    }

    let parts = candidate
        .content
        .and_then(|c| c.parts)
        .filter(|parts| !parts.is_empty())
        .ok_or(CommitlyError::EmptyResponse(BackendKind::Gemini))?;

    Ok(parts
        .into_iter()
        .filter_map(|p| p.text)
        .collect::<Vec<_>>()
        .join(""))
}

#[async_trait]
impl Backend for GeminiBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Gemini
    }

    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        model: &str,
        credential: &str,
    ) -> Result<String> {
        let request = build_request(system_prompt, user_prompt);

        tracing::debug!(
            "Gemini API request: model={}, temperature={}, system_len={}, user_len={}",
            model,
            DEFAULT_TEMPERATURE,
            system_prompt.len(),
            user_prompt.len()
        );

        let endpoint = self.generate_content_url(model)?;
        let response: GeminiResponse = send_json_request(
            &self.client,
            &endpoint,
            &[("x-goog-api-key", credential)],
            &request,
            BackendKind::Gemini,
        )
        .await?;

        extract_text(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use pretty_assertions::assert_eq;

    use crate::config::NetworkConfig;
    use crate::llm::provider::create_http_client;

    fn backend(url: &str) -> GeminiBackend {
        let client = create_http_client(&NetworkConfig::default()).unwrap();
        GeminiBackend::new(client, Some(url))
    }

    fn parse(body: &str) -> Result<String> {
        extract_text(serde_json::from_str(body).unwrap())
    }

    #[test]
    fn test_generate_content_url() {
        let b = backend("https://example.com/");
        assert_eq!(
            b.generate_content_url("gemini-pro").unwrap(),
            "https://example.com/v1beta/models/gemini-pro:generateContent"
        );
    }

    #[test]
    fn test_generate_content_url_keeps_base_path() {
        let b = backend("https://proxy.local/google");
        assert_eq!(
            b.generate_content_url("gemini-1.5-flash-latest").unwrap(),
            "https://proxy.local/google/v1beta/models/gemini-1.5-flash-latest:generateContent"
        );
    }

    #[test]
    fn test_generate_content_url_escapes_model() {
        let b = backend("https://example.com");
        let url = b.generate_content_url("evil/../x?key=1#frag").unwrap();
        assert_eq!(
            url,
            "https://example.com/v1beta/models/evil%2F..%2Fx%3Fkey=1%23frag:generateContent"
        );
        let parsed = Url::parse(&url).unwrap();
        assert_eq!(parsed.host_str(), Some("example.com"));
        assert!(parsed.query().is_none());
        assert!(parsed.fragment().is_none());
    }

    #[test]
    fn test_generate_content_url_rejects_bad_base() {
        let b = backend("not a url");
        assert!(matches!(
            b.generate_content_url("gemini-pro"),
            Err(CommitlyError::Backend {
                backend: BackendKind::Gemini,
                status: None,
                ..
            })
        ));
    }

    #[test]
    fn test_request_shape() {
        let value = serde_json::to_value(build_request("sys", "user")).unwrap();
        assert_eq!(value["systemInstruction"]["parts"][0]["text"], "sys");
        assert!(value["systemInstruction"].get("role").is_none());
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "user");
        assert!(value["generationConfig"]["temperature"].is_number());
        assert_eq!(
            value["safetySettings"],
            serde_json::json!([{"category": "HARM_CATEGORY_HARASSMENT", "threshold": "BLOCK_NONE"}])
        );
    }

    #[test]
    fn test_extract_text_max_tokens_still_returns_text() {
        let text = parse(
            r#"{"candidates":[{"content":{"parts":[{"text":"feat(G-1): cut"}]},"finishReason":"MAX_TOKENS"}]}"#,
        )
        .unwrap();
        assert_eq!(text, "feat(G-1): cut");
    }

    #[test]
    fn test_extract_text_blocked_reason() {
        let err = parse(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).unwrap_err();
        match err {
            CommitlyError::Backend { message, .. } => {
                assert_eq!(message, "response blocked (SAFETY)");
            }
            other => panic!("Expected CommitlyError::Backend, got: {:?}", other),
        }
    }

    #[test]
    fn test_extract_text_no_candidates() {
        assert!(matches!(
            parse(r#"{}"#),
            Err(CommitlyError::EmptyResponse(BackendKind::Gemini))
        ));
        assert!(matches!(
            parse(r#"{"candidates":[]}"#),
            Err(CommitlyError::EmptyResponse(BackendKind::Gemini))
        ));
    }

    #[test]
    fn test_extract_text_no_parts() {
        assert!(matches!(
            parse(r#"{"candidates":[{"content":{"parts":[]},"finishReason":"STOP"}]}"#),
            Err(CommitlyError::EmptyResponse(BackendKind::Gemini))
        ));
    }

    #[tokio::test]
    async fn test_gemini_success_response_parsing() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/gemini-pro:generateContent")
            .match_header("x-goog-api-key", "AIza-test")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "contents": [{"role": "user", "parts": [{"text": "hi"}]}]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"test(G-2): "},{"text":"cover parser"}]},"finishReason":"STOP"}]}"#,
            )
            .create_async()
            .await;

        let result = backend(&server.url())
            .complete("sys", "hi", "gemini-pro", "AIza-test")
            .await
            .unwrap();
        assert_eq!(result, "test(G-2): cover parser");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_gemini_api_error_403() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/gemini-pro:generateContent")
            .with_status(403)
            .with_body(r#"{"error":{"code":403,"message":"API key not valid"}}"#)
            .create_async()
            .await;

        let err = backend(&server.url())
            .complete("sys", "hi", "gemini-pro", "bad")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CommitlyError::Backend {
                backend: BackendKind::Gemini,
                status: Some(403),
                ..
            }
        ));
        mock.assert_async().await;
    }
}
