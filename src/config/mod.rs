//! Configuration management.
//!
//! # Modules
//! - `structs` - configuration document types and the backend identifier
//! - `store` - loading/saving `~/.commitly.json` and `section.field` access
//!
//! 配置加载优先级（从高到低）：
//! 1. 命令行参数（`--provider`, `--timeout`）
//! 2. 环境变量（`AI_PROVIDER`, `*_API_KEY`）
//! 3. 配置文件（`~/.commitly.json`）
//! 4. 默认值

pub mod store;
pub mod structs;

pub use store::{ConfigKey, ConfigStore, Field, Section};
pub use structs::{BackendKind, Config, NetworkConfig, ProviderConfig};
