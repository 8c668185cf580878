//! Configuration document structures.
//!
//! The on-disk shape is the JSON object stored at `~/.commitly.json`:
//!
//! ```json
//! {
//!   "openai":   {"provider": "openai",   "api_key": "", "model": "gpt-4o"},
//!   "claude":   {"provider": "claude",   "api_key": "", "model": "claude-3-5-sonnet-20241022"},
//!   "deepseek": {"provider": "deepseek", "api_key": "", "model": "deepseek-chat"},
//!   "gemini":   {"provider": "gemini",   "api_key": "", "model": "gemini-1.5-flash-latest"},
//!   "default_provider": "openai"
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::llm::provider::utils::mask_api_key;

/// Backend identifier.
///
/// Used both as a config section key and as the dispatch selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// OpenAI chat completions API.
    OpenAI,
    /// Anthropic Claude messages API.
    Claude,
    /// DeepSeek (OpenAI-compatible) API.
    DeepSeek,
    /// Google Gemini API.
    Gemini,
}

impl BackendKind {
    /// All backends, in config-file order.
    pub const ALL: [BackendKind; 4] = [
        BackendKind::OpenAI,
        BackendKind::Claude,
        BackendKind::DeepSeek,
        BackendKind::Gemini,
    ];

    /// Config section / provider name.
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::OpenAI => "openai",
            BackendKind::Claude => "claude",
            BackendKind::DeepSeek => "deepseek",
            BackendKind::Gemini => "gemini",
        }
    }

    /// Human-readable vendor name used in messages.
    pub fn label(&self) -> &'static str {
        match self {
            BackendKind::OpenAI => "OpenAI",
            BackendKind::Claude => "Claude",
            BackendKind::DeepSeek => "Deepseek",
            BackendKind::Gemini => "Gemini",
        }
    }

    /// Environment variable that overrides the configured API key.
    pub fn api_key_env(&self) -> &'static str {
        match self {
            BackendKind::OpenAI => "OPENAI_API_KEY",
            BackendKind::Claude => "ANTHROPIC_API_KEY",
            BackendKind::DeepSeek => "DEEPSEEK_API_KEY",
            BackendKind::Gemini => "GEMINI_API_KEY",
        }
    }

    /// Model used when neither the config nor the caller names one.
    pub fn default_model(&self) -> &'static str {
        match self {
            BackendKind::OpenAI => "gpt-4o",
            BackendKind::Claude => "claude-3-5-sonnet-20241022",
            BackendKind::DeepSeek => "deepseek-chat",
            BackendKind::Gemini => "gemini-1.5-flash-latest",
        }
    }

    /// Example key shown in setup instructions.
    fn example_key(&self) -> &'static str {
        match self {
            BackendKind::OpenAI => "sk-xxxxxxx",
            BackendKind::Claude => "sk-ant-xxxxxxx",
            BackendKind::DeepSeek | BackendKind::Gemini => "xxxxxxx",
        }
    }

    /// Setup instructions attached to a missing-credential error.
    pub fn setup_instructions(&self) -> String {
        format!(
            "export {env}={key}\nor\ncommitly config set {name}.api_key {key}",
            env = self.api_key_env(),
            key = self.example_key(),
            name = self.as_str(),
        )
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(BackendKind::OpenAI),
            "claude" => Ok(BackendKind::Claude),
            "deepseek" => Ok(BackendKind::DeepSeek),
            "gemini" => Ok(BackendKind::Gemini),
            _ => Err(format!("Unknown provider: '{}'", s)),
        }
    }
}

/// Configuration of one logical provider slot.
///
/// `provider` names the backend that actually serves the slot; when it
/// differs from the slot's own name the slot is a redirection.
#[derive(Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// Backend that services this slot.
    #[serde(default)]
    pub provider: String,

    /// API key (may be empty).
    #[serde(default)]
    pub api_key: String,

    /// Model name (may be empty; dispatch then uses the backend default).
    #[serde(default)]
    pub model: String,

    /// Custom base URL, e.g. an OpenAI-compatible proxy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

impl ProviderConfig {
    /// Built-in slot for a backend: points at itself with its standard model.
    pub fn for_backend(kind: BackendKind) -> Self {
        Self {
            provider: kind.as_str().to_string(),
            api_key: String::new(),
            model: kind.default_model().to_string(),
            endpoint: None,
        }
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("provider", &self.provider)
            .field("api_key", &mask_api_key(&self.api_key))
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// Network configuration.
///
/// # Fields
/// - `request_timeout`: HTTP request timeout in seconds (default: `120`)
/// - `connect_timeout`: HTTP connect timeout in seconds (default: `10`)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NetworkConfig {
    /// HTTP request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// HTTP connect timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            request_timeout: default_request_timeout(),
            connect_timeout: default_connect_timeout(),
        }
    }
}

impl NetworkConfig {
    fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

fn default_request_timeout() -> u64 {
    120
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_provider_name() -> String {
    BackendKind::OpenAI.as_str().to_string()
}

/// The whole configuration document.
///
/// Loaded once per command and passed by reference to every resolver and
/// to the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub openai: ProviderConfig,
    pub claude: ProviderConfig,
    pub deepseek: ProviderConfig,
    pub gemini: ProviderConfig,

    /// Provider used when neither `--provider` nor `AI_PROVIDER` is given.
    pub default_provider: String,

    #[serde(skip_serializing_if = "NetworkConfig::is_default")]
    pub network: NetworkConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openai: ProviderConfig::for_backend(BackendKind::OpenAI),
            claude: ProviderConfig::for_backend(BackendKind::Claude),
            deepseek: ProviderConfig::for_backend(BackendKind::DeepSeek),
            gemini: ProviderConfig::for_backend(BackendKind::Gemini),
            default_provider: default_provider_name(),
            network: NetworkConfig::default(),
        }
    }
}

impl Config {
    /// Section for a backend.
    pub fn section(&self, kind: BackendKind) -> &ProviderConfig {
        match kind {
            BackendKind::OpenAI => &self.openai,
            BackendKind::Claude => &self.claude,
            BackendKind::DeepSeek => &self.deepseek,
            BackendKind::Gemini => &self.gemini,
        }
    }

    /// Mutable section for a backend.
    pub fn section_mut(&mut self, kind: BackendKind) -> &mut ProviderConfig {
        match kind {
            BackendKind::OpenAI => &mut self.openai,
            BackendKind::Claude => &mut self.claude,
            BackendKind::DeepSeek => &mut self.deepseek,
            BackendKind::Gemini => &mut self.gemini,
        }
    }

    /// Looks up a slot by logical provider name (case-insensitive).
    pub fn slot(&self, name: &str) -> Option<&ProviderConfig> {
        name.parse::<BackendKind>().ok().map(|kind| self.section(kind))
    }
}
