//! Provider utility functions
//!
//! Endpoint completion and API key masking.

/// OpenAI API endpoint suffix
pub const OPENAI_API_SUFFIX: &str = "/v1/chat/completions";

/// DeepSeek API endpoint suffix (no version segment)
pub const DEEPSEEK_API_SUFFIX: &str = "/chat/completions";

/// Claude API endpoint suffix
pub const CLAUDE_API_SUFFIX: &str = "/v1/messages";

/// OpenAI default base URL
pub const DEFAULT_OPENAI_BASE: &str = "https://api.openai.com";

/// DeepSeek default base URL
pub const DEFAULT_DEEPSEEK_BASE: &str = "https://api.deepseek.com";

/// Claude default base URL
pub const DEFAULT_CLAUDE_BASE: &str = "https://api.anthropic.com";

/// Gemini default base URL
pub const DEFAULT_GEMINI_BASE: &str = "https://generativelanguage.googleapis.com";

/// Smart completion of an API endpoint
///
/// # Behavior
/// 1. Remove trailing slashes
/// 2. Keep the URL if it already ends with the suffix (or a prefix of it)
/// 3. Otherwise append the missing part of the suffix
///
/// # Example
/// ```
/// use commitly::llm::provider::utils::complete_endpoint;
///
/// assert_eq!(
///     complete_endpoint("https://api.openai.com", "/v1/chat/completions"),
///     "https://api.openai.com/v1/chat/completions"
/// );
///
/// assert_eq!(
///     complete_endpoint("https://proxy.local/v1/", "/v1/chat/completions"),
///     "https://proxy.local/v1/chat/completions"
/// );
/// ```
pub fn complete_endpoint(base_url: &str, expected_suffix: &str) -> String {
    let url = base_url.trim_end_matches('/');
    let suffix = expected_suffix.trim_start_matches('/');

    if url.ends_with(suffix) {
        return url.to_string();
    }

    // url 已包含 suffix 的前缀部分时只补全剩余部分
    // 例如：url 为 "https://api.com/v1"，suffix 为 "v1/chat/completions"
    let suffix_parts: Vec<&str> = suffix.split('/').collect();
    for i in 0..suffix_parts.len() {
        let partial_suffix = suffix_parts[..=i].join("/");
        if url.ends_with(&partial_suffix) {
            let remaining_suffix = suffix_parts[i + 1..].join("/");
            if remaining_suffix.is_empty() {
                return url.to_string();
            }
            return format!("{}/{}", url, remaining_suffix);
        }
    }

    if is_complete_api_path(url) {
        return url.to_string();
    }

    format!("{}/{}", url, suffix)
}

/// Path depth >= 2 is treated as a user-defined complete endpoint.
fn is_complete_api_path(url: &str) -> bool {
    let path = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
        .and_then(|rest| rest.split_once('/'))
        .map(|(_, path)| path)
        .unwrap_or("");

    path.split('/').filter(|s| !s.is_empty()).count() >= 2
}

/// Mask an API key for display and logs
///
/// # Rules
/// - empty: `[not set]`
/// - length <= 8: `****`
/// - length > 8: first 4 characters + `...` + last 4 characters
///
/// # Example
/// ```
/// use commitly::llm::provider::utils::mask_api_key;
///
/// assert_eq!(mask_api_key("sk-ant-api03-abcdefgh"), "sk-a...efgh");
/// assert_eq!(mask_api_key("short"), "****");
/// assert_eq!(mask_api_key(""), "[not set]");
/// ```
pub fn mask_api_key(key: &str) -> String {
    let len = key.chars().count();
    if len == 0 {
        return "[not set]".to_string();
    }
    if len <= 8 {
        return "****".to_string();
    }
    let head: String = key.chars().take(4).collect();
    let tail: String = key.chars().skip(len - 4).collect();
    format!("{}...{}", head, tail)
}
