//! Generate 流程测试
//!
//! 使用 MockDiffSource 代替 git，验证 prompt 内容和错误传播。

use commitly::commands::generate::generate_message;
use commitly::config::Config;
use commitly::error::CommitlyError;
use commitly::git::MockDiffSource;
use commitly::llm::provider::Dispatcher;
use mockito::{Matcher, Server};
use pretty_assertions::assert_eq;
use serial_test::serial;

/// Clears provider env vars and restores them on drop.
struct CleanEnv(Vec<(&'static str, Option<String>)>);

impl CleanEnv {
    fn new() -> Self {
        let keys = [
            "OPENAI_API_KEY",
            "ANTHROPIC_API_KEY",
            "DEEPSEEK_API_KEY",
            "GEMINI_API_KEY",
            "AI_PROVIDER",
        ];
        Self(
            keys.into_iter()
                .map(|key| {
                    let original = std::env::var(key).ok();
                    // SAFETY: every test here is #[serial]
                    unsafe { std::env::remove_var(key) };
                    (key, original)
                })
                .collect(),
        )
    }
}

impl Drop for CleanEnv {
    fn drop(&mut self) {
        for (key, value) in &self.0 {
            if let Some(value) = value {
                // SAFETY: every test here is #[serial]
                unsafe { std::env::set_var(key, value) };
            }
        }
    }
}

fn git_with(diff: &'static str, history: &'static str) -> MockDiffSource {
    let mut git = MockDiffSource::new();
    git.expect_diff().times(1).returning(move || Ok(diff.to_string()));
    git.expect_history()
        .withf(|n| *n == 10)
        .times(1)
        .returning(move |_| Ok(history.to_string()));
    git
}

#[tokio::test]
#[serial]
async fn test_generate_sends_system_and_user_prompt() {
    let _env = CleanEnv::new();

    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/messages")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex("conventional commit format".to_string()),
            Matcher::Regex("Generate a commit message for Jira ticket 'CORE-9'".to_string()),
            Matcher::Regex("diff --git a/src/lib.rs b/src/lib.rs".to_string()),
            Matcher::Regex("chore: release 1.2.0".to_string()),
        ]))
        .with_status(200)
        .with_body(
            r#"{"content":[{"type":"text","text":"```text\nfeat(CORE-9): export parser\n\nChanges:\n- make parser public\n```"}]}"#,
        )
        .create_async()
        .await;

    let mut config = Config::default();
    config.default_provider = "claude".to_string();
    config.claude.api_key = "sk-ant-test".to_string();
    config.claude.endpoint = Some(server.url());

    let git = git_with(
        "diff --git a/src/lib.rs b/src/lib.rs\n-mod parser;\n+pub mod parser;\n",
        "chore: release 1.2.0\nfix(CORE-8): handle empty input",
    );
    let dispatcher = Dispatcher::new(&config.network).unwrap();

    let message = generate_message("CORE-9", &git, &config, &dispatcher, None)
        .await
        .unwrap();
    assert_eq!(
        message,
        "feat(CORE-9): export parser\n\nChanges:\n- make parser public"
    );
    mock.assert_async().await;
}

#[tokio::test]
#[serial]
async fn test_empty_diff_and_history_still_dispatch() {
    let _env = CleanEnv::new();

    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(r#"{"choices":[{"message":{"content":"chore(X-1): no-op"}}]}"#)
        .create_async()
        .await;

    let mut config = Config::default();
    config.openai.api_key = "sk-test".to_string();
    config.openai.endpoint = Some(server.url());

    let git = git_with("", "");
    let dispatcher = Dispatcher::new(&config.network).unwrap();

    let message = generate_message("X-1", &git, &config, &dispatcher, Some("openai"))
        .await
        .unwrap();
    assert_eq!(message, "chore(X-1): no-op");
    mock.assert_async().await;
}

#[tokio::test]
#[serial]
async fn test_diff_failure_is_reported() {
    let _env = CleanEnv::new();

    let mut git = MockDiffSource::new();
    git.expect_diff()
        .returning(|| Err(CommitlyError::GitCommand("fatal: not a git repository".to_string())));
    git.expect_history().times(0);

    let config = Config::default();
    let dispatcher = Dispatcher::new(&config.network).unwrap();

    let err = generate_message("X-1", &git, &config, &dispatcher, None)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("not a git repository"));
}

#[tokio::test]
#[serial]
async fn test_backend_error_status_is_surfaced() {
    let _env = CleanEnv::new();

    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(429)
        .with_body(r#"{"error":{"message":"Rate limit reached"}}"#)
        .create_async()
        .await;

    let mut config = Config::default();
    config.openai.api_key = "sk-test".to_string();
    config.openai.endpoint = Some(server.url());

    let git = git_with("+x", "init");
    let dispatcher = Dispatcher::new(&config.network).unwrap();

    let err = generate_message("X-1", &git, &config, &dispatcher, None)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "OpenAI API error (429): {\"error\":{\"message\":\"Rate limit reached\"}}");
    assert!(err.suggestion().unwrap().contains("Rate limit"));
    mock.assert_async().await;
}
