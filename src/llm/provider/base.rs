//! HTTP request sending and response normalisation shared by all backends.
//!
//! Dispatch is single-attempt: transport failures, non-2xx statuses and
//! undecodable bodies are all mapped to [`CommitlyError::Backend`] and
//! returned immediately.

use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::BackendKind;
use crate::constants::ui::ERROR_PREVIEW_LENGTH;
use crate::error::{CommitlyError, Result};

/// Classify a transport error into a short, searchable description.
fn describe_transport_error(e: &reqwest::Error) -> &'static str {
    if e.is_timeout() {
        "request timeout"
    } else if e.is_connect() {
        "connection failed"
    } else if e.is_request() {
        "request error"
    } else if e.is_body() {
        "body error"
    } else if e.is_decode() {
        "decode error"
    } else {
        "network error"
    }
}

fn transport_error(backend: BackendKind, e: reqwest::Error) -> CommitlyError {
    let kind = describe_transport_error(&e);
    tracing::debug!("{} API request failed [{}]: {}", backend, kind, e);
    CommitlyError::Backend {
        backend,
        status: None,
        message: format!("{}: {}", kind, e),
    }
}

/// Send one JSON POST request and decode the JSON response.
///
/// # Arguments
/// * `client` - HTTP client
/// * `endpoint` - full API URL
/// * `headers` - extra request headers (auth, versioning)
/// * `request_body` - serialisable request body
/// * `backend` - backend the request belongs to (for logs and errors)
pub async fn send_json_request<Req, Resp>(
    client: &Client,
    endpoint: &str,
    headers: &[(&str, &str)],
    request_body: &Req,
    backend: BackendKind,
) -> Result<Resp>
where
    Req: Serialize,
    Resp: DeserializeOwned,
{
    let mut req = client
        .post(endpoint)
        .header("Content-Type", "application/json");

    for (key, value) in headers {
        req = req.header(*key, *value);
    }

    tracing::debug!("Sending request to: {}", endpoint);

    let response = req
        .json(request_body)
        .send()
        .await
        .map_err(|e| transport_error(backend, e))?;

    let status = response.status();
    let response_text = response
        .text()
        .await
        .map_err(|e| transport_error(backend, e))?;

    tracing::debug!("{} API response status: {}", backend, status);
    tracing::debug!("{} API response body: {}", backend, response_text);

    if !status.is_success() {
        return Err(CommitlyError::Backend {
            backend,
            status: Some(status.as_u16()),
            message: truncate_for_preview(&response_text),
        });
    }

    serde_json::from_str(&response_text).map_err(|e| CommitlyError::Backend {
        backend,
        status: None,
        message: format!(
            "Failed to parse response: {}. Raw response: {}",
            e,
            truncate_for_preview(&response_text)
        ),
    })
}

/// Truncate string for error preview (safe handling of multibyte characters)
pub fn truncate_for_preview(s: &str) -> String {
    if s.len() <= ERROR_PREVIEW_LENGTH {
        return s.to_string();
    }
    let boundary = s
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= ERROR_PREVIEW_LENGTH)
        .last()
        .unwrap_or(0);
    format!("{}...", &s[..boundary])
}

/// Clean commit message response (remove markdown code block fences)
///
/// LLMs sometimes wrap commit messages in code fences like:
/// ````text
/// ```
/// feat(PROJ-1): add login
/// ```
/// ````
pub fn clean_commit_response(response: &str) -> String {
    let trimmed = response.trim();

    if let Some(rest) = trimmed.strip_prefix("```") {
        // 跳过可选的语言标记（如 text、markdown）
        let after_lang = match rest.find('\n') {
            Some(newline_pos)
                if rest[..newline_pos].trim().len() <= 20
                    && !rest[..newline_pos].contains(' ') =>
            {
                &rest[newline_pos + 1..]
            }
            _ => rest,
        };

        if let Some(inner) = after_lang.strip_suffix("```") {
            return inner.trim().to_string();
        }
    }

    trimmed.to_string()
}
