//! Backend dispatch.

use reqwest::Client;

use super::base::clean_commit_response;
use super::resolve::{EffectiveProvider, resolve_credential};
use super::{create_backend, create_http_client};
use crate::config::{BackendKind, Config, NetworkConfig};
use crate::error::{CommitlyError, Result};
use crate::llm::prompt::COMMIT_SYSTEM_PROMPT;

/// Routes a prompt to the backend named by an [`EffectiveProvider`].
pub struct Dispatcher {
    client: Client,
}

impl Dispatcher {
    pub fn new(network: &NetworkConfig) -> Result<Self> {
        Ok(Self {
            client: create_http_client(network)?,
        })
    }

    /// Sends `prompt` to the effective backend and returns the cleaned reply.
    ///
    /// Fails with [`CommitlyError::UnsupportedProvider`] for an unknown
    /// backend and with [`CommitlyError::MissingCredential`] when no API key
    /// is available; both happen before any network traffic.
    pub async fn generate(
        &self,
        prompt: &str,
        effective: &EffectiveProvider,
        config: &Config,
    ) -> Result<String> {
        let kind: BackendKind = effective
            .backend
            .parse()
            .map_err(|_| CommitlyError::UnsupportedProvider(effective.backend.clone()))?;

        let credential = resolve_credential(kind, config);
        if credential.is_empty() {
            return Err(CommitlyError::MissingCredential {
                backend: kind,
                instructions: kind.setup_instructions(),
            });
        }

        let model = if effective.model.trim().is_empty() {
            kind.default_model()
        } else {
            effective.model.trim()
        };

        let endpoint = config
            .section(kind)
            .endpoint
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty());

        tracing::debug!("Generating commit message with {} ({})", kind, model);

        let backend = create_backend(kind, self.client.clone(), endpoint);
        let raw = backend
            .complete(COMMIT_SYSTEM_PROMPT, prompt, model, &credential)
            .await?;

        let message = clean_commit_response(&raw);
        if message.is_empty() {
            return Err(CommitlyError::EmptyResponse(kind));
        }
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::provider::test_utils::{EnvGuard, clear_provider_env};
    use mockito::Server;
    use pretty_assertions::assert_eq;
    use serial_test::serial;

    fn effective(backend: &str, model: &str) -> EffectiveProvider {
        EffectiveProvider {
            backend: backend.to_string(),
            model: model.to_string(),
        }
    }

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(&NetworkConfig::default()).unwrap()
    }

    #[tokio::test]
    #[serial]
    async fn test_unsupported_backend() {
        let _env = clear_provider_env();
        let err = dispatcher()
            .generate("p", &effective("ollama", ""), &Config::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CommitlyError::UnsupportedProvider(ref name) if name == "ollama"));
    }

    #[tokio::test]
    #[serial]
    async fn test_missing_credential_makes_no_request() {
        let _env = clear_provider_env();
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/messages")
            .expect(0)
            .create_async()
            .await;

        let mut config = Config::default();
        config.claude.endpoint = Some(server.url());

        let err = dispatcher()
            .generate("p", &effective("claude", ""), &config)
            .await
            .unwrap_err();
        match err {
            CommitlyError::MissingCredential {
                backend,
                instructions,
            } => {
                assert_eq!(backend, BackendKind::Claude);
                assert!(instructions.contains("ANTHROPIC_API_KEY"));
            }
            other => panic!("Expected MissingCredential, got: {:?}", other),
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    #[serial]
    async fn test_empty_model_uses_backend_default_and_cleans_reply() {
        let _env = clear_provider_env();
        let _key = EnvGuard::set("DEEPSEEK_API_KEY", "ds-env");
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer ds-env")
            .match_body(mockito::Matcher::PartialJson(
                serde_json::json!({"model": "deepseek-chat"}),
            ))
            .with_status(200)
            .with_body(
                r#"{"choices":[{"message":{"content":"```\nchore(D-1): bump deps\n```\n"}}]}"#,
            )
            .create_async()
            .await;

        let mut config = Config::default();
        config.deepseek.endpoint = Some(server.url());

        let message = dispatcher()
            .generate("p", &effective("deepseek", " "), &config)
            .await
            .unwrap();
        assert_eq!(message, "chore(D-1): bump deps");
        mock.assert_async().await;
    }

    #[tokio::test]
    #[serial]
    async fn test_whitespace_reply_is_empty_response() {
        let _env = clear_provider_env();
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"content":"   \n"}}]}"#)
            .create_async()
            .await;

        let mut config = Config::default();
        config.openai.api_key = "sk-config".to_string();
        config.openai.endpoint = Some(server.url());

        let err = dispatcher()
            .generate("p", &effective("openai", "gpt-4o"), &config)
            .await
            .unwrap_err();
        assert!(matches!(err, CommitlyError::EmptyResponse(BackendKind::OpenAI)));
        mock.assert_async().await;
    }
}
