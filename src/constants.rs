//! 全局常量定义

/// 配置文件相关常量
pub mod config {
    /// Config file name, placed in the home directory.
    pub const CONFIG_FILE_NAME: &str = ".commitly.json";

    /// Overrides the config file path.
    pub const CONFIG_PATH_ENV: &str = "COMMITLY_CONFIG";

    /// Overrides the default provider.
    pub const PROVIDER_ENV: &str = "AI_PROVIDER";
}

/// LLM 相关常量
pub mod llm {
    /// Sampling temperature for chat-completion backends.
    pub const DEFAULT_TEMPERATURE: f32 = 0.7;

    /// Claude requires an explicit output budget.
    pub const CLAUDE_MAX_TOKENS: u32 = 1000;

    pub const ANTHROPIC_VERSION: &str = "2023-06-01";
}

/// Git 相关常量
pub mod git {
    /// Number of previous commit subjects sent as style context.
    pub const HISTORY_DEPTH: usize = 10;
}

/// UI 相关常量
pub mod ui {
    /// 错误预览最大长度
    pub const ERROR_PREVIEW_LENGTH: usize = 500;
}
