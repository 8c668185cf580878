//! LLM abstractions and backend implementations.
//!
//! This module defines the [`Backend`] capability used by the dispatcher
//! and the prompt used for commit-message generation.

/// Prompt-building utilities.
pub mod prompt;
/// Built-in backends, provider resolution and dispatch.
pub mod provider;

use async_trait::async_trait;

use crate::config::BackendKind;
use crate::error::Result;

/// Chat-style completion capability implemented by every backend.
///
/// # Architecture
///
/// Each backend only knows its own wire format. The dispatcher resolves the
/// credential and model, then calls [`complete`](Self::complete) with a
/// `(system, user)` prompt pair and gets back the first textual reply.
///
/// # Implementer Notes
/// 1. Implement `Send + Sync` (required in async contexts).
/// 2. Return [`CommitlyError::EmptyResponse`](crate::error::CommitlyError::EmptyResponse)
///    when the reply holds no choices/candidates.
/// 3. Map every transport or API failure to
///    [`CommitlyError::Backend`](crate::error::CommitlyError::Backend); never retry.
///
/// # Built-In Implementations
/// - [`OpenAIBackend`](provider::openai::OpenAIBackend) - OpenAI chat completions
/// - [`DeepSeekBackend`](provider::deepseek::DeepSeekBackend) - DeepSeek (OpenAI-compatible)
/// - [`ClaudeBackend`](provider::claude::ClaudeBackend) - Anthropic messages API
/// - [`GeminiBackend`](provider::gemini::GeminiBackend) - Google Gemini
///
/// # Custom Backend Example
/// ```no_run
/// use async_trait::async_trait;
/// use commitly::config::BackendKind;
/// use commitly::error::Result;
/// use commitly::llm::Backend;
///
/// struct Echo;
///
/// #[async_trait]
/// impl Backend for Echo {
///     fn kind(&self) -> BackendKind {
///         BackendKind::OpenAI
///     }
///
///     async fn complete(
///         &self,
///         _system_prompt: &str,
///         user_prompt: &str,
///         _model: &str,
///         _credential: &str,
///     ) -> Result<String> {
///         Ok(user_prompt.to_string())
///     }
/// }
/// ```
#[async_trait]
pub trait Backend: Send + Sync {
    /// Which backend this is (used for logs and error messages).
    fn kind(&self) -> BackendKind;

    /// Sends the prompt pair and returns the first textual reply.
    ///
    /// # Parameters
    /// - `system_prompt`: fixed format instruction
    /// - `user_prompt`: prompt built from ticket, diff and history
    /// - `model`: model name (already defaulted by the dispatcher)
    /// - `credential`: API key (non-empty)
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        model: &str,
        credential: &str,
    ) -> Result<String>;
}
