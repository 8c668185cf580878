pub mod base;
pub mod claude;
pub mod deepseek;
pub mod dispatch;
pub mod gemini;
pub mod openai;
pub mod resolve;
pub mod utils;

#[cfg(test)]
pub mod test_utils;

use std::time::Duration;

use reqwest::Client;

use crate::config::{BackendKind, NetworkConfig};
use crate::error::{CommitlyError, Result};
use crate::llm::Backend;

pub use dispatch::Dispatcher;
pub use resolve::{EffectiveProvider, requested_provider, resolve_credential, resolve_effective};

/// Creates the HTTP client used by every backend.
///
/// reqwest is built with `rustls-no-provider`, so the ring crypto provider is
/// installed here first. Installing twice is harmless; the second attempt is
/// ignored.
pub fn create_http_client(network_config: &NetworkConfig) -> Result<Client> {
    let _ = rustls::crypto::ring::default_provider().install_default();

    let user_agent = format!(
        "{}/{} ({})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(network_config.request_timeout))
        .connect_timeout(Duration::from_secs(network_config.connect_timeout))
        .build()
        .map_err(|e| {
            CommitlyError::Io(std::io::Error::other(format!(
                "failed to create HTTP client: {}",
                e
            )))
        })
}

/// Creates the backend implementation for `kind`.
///
/// `endpoint` overrides the backend's public API host when set.
pub fn create_backend(kind: BackendKind, client: Client, endpoint: Option<&str>) -> Box<dyn Backend> {
    match kind {
        BackendKind::OpenAI => Box::new(openai::OpenAIBackend::new(client, endpoint)),
        BackendKind::Claude => Box::new(claude::ClaudeBackend::new(client, endpoint)),
        BackendKind::DeepSeek => Box::new(deepseek::DeepSeekBackend::new(client, endpoint)),
        BackendKind::Gemini => Box::new(gemini::GeminiBackend::new(client, endpoint)),
    }
}
