use std::path::PathBuf;

use thiserror::Error;

use crate::config::BackendKind;

pub type Result<T> = std::result::Result<T, CommitlyError>;

#[derive(Error, Debug)]
pub enum CommitlyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid config key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    /// 没有可用的 API key，`instructions` 包含设置方法
    #[error("{backend} API key not found. Set it with:\n{instructions}")]
    MissingCredential {
        backend: BackendKind,
        instructions: String,
    },

    #[error("Empty response from {0} API")]
    EmptyResponse(BackendKind),

    #[error("{backend} API error{}: {message}", status.map(|s| format!(" ({s})")).unwrap_or_default())]
    Backend {
        backend: BackendKind,
        status: Option<u16>,
        message: String,
    },

    #[error("Unsupported provider: {0}")]
    UnsupportedProvider(String),

    #[error("Git command failed: {0}")]
    GitCommand(String),

    #[error("Input error: {0}")]
    Input(#[from] inquire::InquireError),

    /// Missing CLI arguments; the payload is the usage text.
    #[error("{0}")]
    Usage(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl CommitlyError {
    /// 获取错误的解决建议
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            CommitlyError::InvalidKey { .. } => Some(
                "Keys look like 'section.field': openai|claude|deepseek|gemini . api_key|provider|model, or default.provider",
            ),
            CommitlyError::ConfigParse { .. } => Some(
                "Fix the JSON in the config file, or delete it to fall back to the built-in defaults",
            ),
            CommitlyError::UnsupportedProvider(_) => {
                Some("Supported providers are: openai, claude, deepseek, gemini")
            }
            CommitlyError::Backend {
                status: Some(401 | 403),
                ..
            } => Some("Check if your API key is valid and has not expired"),
            CommitlyError::Backend {
                status: Some(429), ..
            } => Some("Rate limit exceeded. Wait a moment and try again, or upgrade your API plan"),
            CommitlyError::Backend {
                status: Some(500..=599),
                ..
            } => Some("API service is temporarily unavailable. Try again in a few moments"),
            CommitlyError::Backend { message, .. } if message.contains("timeout") => Some(
                "The API request timed out. Raise --timeout or network.request_timeout and try again",
            ),
            CommitlyError::Backend { message, .. } if message.contains("connection failed") => {
                Some("Cannot connect to API server. Check endpoint URL, network, or DNS settings")
            }
            CommitlyError::GitCommand(_) => Some("Make sure you are inside a git repository"),
            _ => None,
        }
    }
}
