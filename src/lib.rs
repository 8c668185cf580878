//! # commitly
//!
//! 根据 git diff、最近的 commit 历史和 Jira ticket 生成 Conventional Commits 格式的 commit message。
//!
//! ## 功能
//! - **Commit message 生成**：`<type>(<ticket>): <title>` 加 bullet point 正文
//! - **多 Provider 支持**：OpenAI, Claude, DeepSeek, Gemini
//! - **Provider 重定向**：配置槽位可以指向另一个 backend，同时保留自己的 model
//! - **配置管理**：`commitly config set|get|show`
//!
//! ## 快速开始
//!
//! ### 作为 CLI 使用
//! ```bash
//! # 设置 API key
//! commitly config set openai.api_key sk-...
//!
//! # 生成 commit message（会提示输入 Jira ticket）
//! commitly
//!
//! # 指定 ticket 和 provider
//! commitly -t PROJ-123 -p claude
//! ```
//!
//! ### 作为库使用
//! ```no_run
//! use commitly::config::ConfigStore;
//! use commitly::git::{DiffSource, GitCli};
//! use commitly::llm::prompt::build_commit_prompt;
//! use commitly::llm::provider::{Dispatcher, requested_provider, resolve_effective};
//!
//! # async fn example() -> commitly::error::Result<()> {
//! let config = ConfigStore::at_default_location().load()?;
//!
//! let git = GitCli::new();
//! let prompt = build_commit_prompt("PROJ-123", &git.diff()?, &git.history(10)?);
//!
//! let effective = resolve_effective(&requested_provider(None, &config), &config);
//! let message = Dispatcher::new(&config.network)?
//!     .generate(&prompt, &effective, &config)
//!     .await?;
//! println!("Generated: {}", message);
//! # Ok(())
//! # }
//! ```
//!
//! ## 核心模块
//! - [`git`] - diff 和 commit 历史的来源
//! - [`llm`] - prompt、backend 接口和实现、provider 解析与分发
//! - [`commands`] - CLI 命令实现
//! - [`config`] - 配置管理
//! - [`error`] - 统一错误类型
//! - [`ui`] - 用户界面工具
//!
//! ## 配置
//! 配置文件位置：`~/.commitly.json`（可用 `COMMITLY_CONFIG` 覆盖）
//!
//! 示例配置：
//! ```json
//! {
//!   "openai": {"provider": "claude", "api_key": "", "model": "claude-3-opus-20240229"},
//!   "claude": {"provider": "claude", "api_key": "sk-ant-...", "model": "claude-3-5-sonnet-20241022"},
//!   "deepseek": {"provider": "deepseek", "api_key": "", "model": "deepseek-chat"},
//!   "gemini": {"provider": "gemini", "api_key": "", "model": "gemini-1.5-flash-latest"},
//!   "default_provider": "openai"
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod git;
pub mod llm;
pub mod ui;
