//! Provider and credential resolution.
//!
//! None of these functions fail: an unknown or unconfigured provider is
//! carried through and surfaces as an error at dispatch time.

use crate::config::{BackendKind, Config};
use crate::constants::config::PROVIDER_ENV;

/// Backend and model actually used after redirection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveProvider {
    /// Effective backend name (may name an unsupported backend).
    pub backend: String,
    /// Model from the originally requested slot; empty means backend default.
    pub model: String,
}

fn normalize(name: &str) -> Option<String> {
    let name = name.trim();
    (!name.is_empty()).then(|| name.to_lowercase())
}

/// Determines the logical provider to use.
///
/// Precedence: `cli_override` (`--provider`) > `AI_PROVIDER` >
/// `config.default_provider` > `openai`.
pub fn requested_provider(cli_override: Option<&str>, config: &Config) -> String {
    let env_provider = std::env::var(PROVIDER_ENV).ok();

    cli_override
        .and_then(normalize)
        .or_else(|| env_provider.as_deref().and_then(normalize))
        .or_else(|| normalize(&config.default_provider))
        .unwrap_or_else(|| BackendKind::OpenAI.as_str().to_string())
}

/// Resolves the effective backend and model for a logical provider.
///
/// Redirection is single-hop: only the requested slot's `provider` field is
/// read, never the target slot's.
pub fn resolve_effective(logical: &str, config: &Config) -> EffectiveProvider {
    let Some(slot) = config.slot(logical) else {
        tracing::debug!("Provider '{}' has no config slot", logical);
        return EffectiveProvider {
            backend: logical.to_string(),
            model: String::new(),
        };
    };

    let redirect = slot.provider.trim();
    let backend = if !redirect.is_empty() && !redirect.eq_ignore_ascii_case(logical) {
        tracing::debug!("Provider '{}' redirects to '{}'", logical, redirect);
        redirect.to_lowercase()
    } else {
        logical.to_lowercase()
    };

    EffectiveProvider {
        backend,
        model: slot.model.clone(),
    }
}

/// Resolves the API key for a backend.
///
/// Returns the first non-empty of the backend's environment variable and
/// the `api_key` of the backend's own config section, or an empty string.
pub fn resolve_credential(kind: BackendKind, config: &Config) -> String {
    if let Ok(key) = std::env::var(kind.api_key_env())
        && !key.is_empty()
    {
        return key;
    }
    config.section(kind).api_key.clone()
}
