//! Command implementations.
//!
//! # Modules
//! - `generate` - Commit message generation flow (the default command).
//! - `config` - `commitly config set|get|show`.
//!
//! # Architecture
//! ```text
//! CLI (cli.rs)
//!   ├── commands/generate.rs ─> git ─> llm::prompt ─> llm::provider::dispatch
//!   └── commands/config.rs ─> config::store
//! ```

/// Configuration get/set/show commands.
pub mod config;
/// Commit message generation flow.
pub mod generate;

pub use generate::GenerateOptions;
