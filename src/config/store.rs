// Config file persistence and `section.field` access.
//
// The document lives at a fixed per-user path. Loading never creates the
// file; every `set` is a read-modify-write of the whole document.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use directories::BaseDirs;

use super::structs::{BackendKind, Config};
use crate::constants::config::{CONFIG_FILE_NAME, CONFIG_PATH_ENV};
use crate::error::{CommitlyError, Result};

/// Section part of a config key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// One of the four provider slots.
    Provider(BackendKind),
    /// The `default` pseudo-section (only `provider` is valid).
    Default,
}

/// Field part of a config key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    ApiKey,
    Provider,
    Model,
}

/// A parsed `section.field` key.
///
/// Grammar: `section ∈ {openai, claude, deepseek, gemini, default}`;
/// provider sections accept `api_key | provider | model`, `default`
/// accepts only `provider`.
///
/// # Example
/// ```
/// use commitly::config::{ConfigKey, Field, Section};
/// use commitly::config::BackendKind;
///
/// let key: ConfigKey = "claude.model".parse().unwrap();
/// assert_eq!(key.section, Section::Provider(BackendKind::Claude));
/// assert_eq!(key.field, Field::Model);
///
/// assert!("default.model".parse::<ConfigKey>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigKey {
    pub section: Section,
    pub field: Field,
}

impl FromStr for ConfigKey {
    type Err = CommitlyError;

    fn from_str(key: &str) -> Result<Self> {
        let invalid = |reason: String| CommitlyError::InvalidKey {
            key: key.to_string(),
            reason,
        };

        let parts: Vec<&str> = key.split('.').collect();
        let [section, field] = parts.as_slice() else {
            return Err(invalid(
                "invalid config key format, expected 'section.key'".to_string(),
            ));
        };

        let section = match *section {
            "default" => Section::Default,
            "openai" => Section::Provider(BackendKind::OpenAI),
            "claude" => Section::Provider(BackendKind::Claude),
            "deepseek" => Section::Provider(BackendKind::DeepSeek),
            "gemini" => Section::Provider(BackendKind::Gemini),
            other => return Err(invalid(format!("unknown config section: {other}"))),
        };

        let field = match (section, *field) {
            (_, "provider") => Field::Provider,
            (Section::Provider(_), "api_key") => Field::ApiKey,
            (Section::Provider(_), "model") => Field::Model,
            (Section::Default, other) => {
                return Err(invalid(format!("unknown key for default: {other}")));
            }
            (Section::Provider(kind), other) => {
                return Err(invalid(format!("unknown key for {}: {other}", kind.as_str())));
            }
        };

        Ok(ConfigKey { section, field })
    }
}

impl Config {
    /// Reads one scalar field.
    pub fn get(&self, key: ConfigKey) -> &str {
        match key.section {
            Section::Default => &self.default_provider,
            Section::Provider(kind) => {
                let slot = self.section(kind);
                match key.field {
                    Field::ApiKey => &slot.api_key,
                    Field::Provider => &slot.provider,
                    Field::Model => &slot.model,
                }
            }
        }
    }

    /// Overwrites exactly one scalar field.
    pub fn set(&mut self, key: ConfigKey, value: impl Into<String>) {
        let value = value.into();
        match key.section {
            Section::Default => self.default_provider = value,
            Section::Provider(kind) => {
                let slot = self.section_mut(kind);
                match key.field {
                    Field::ApiKey => slot.api_key = value,
                    Field::Provider => slot.provider = value,
                    Field::Model => slot.model = value,
                }
            }
        }
    }
}

/// Loads and saves the configuration document.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Store backed by an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the per-user location.
    ///
    /// `COMMITLY_CONFIG` overrides the path; otherwise `~/.commitly.json`,
    /// or `./.commitly.json` when no home directory can be determined.
    pub fn at_default_location() -> Self {
        Self::new(default_config_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the document, or returns the built-in default if the file does
    /// not exist. Never creates the file.
    pub fn load(&self) -> Result<Config> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(
                    "Config file {} not found, using defaults",
                    self.path.display()
                );
                return Ok(Config::default());
            }
            Err(e) => return Err(CommitlyError::Io(e)),
        };

        serde_json::from_str(&content).map_err(|source| CommitlyError::ConfigParse {
            path: self.path.clone(),
            source,
        })
    }

    /// Writes the document atomically with owner-only permissions.
    pub fn save(&self, config: &Config) -> Result<()> {
        let data = serde_json::to_string_pretty(config)?;

        // 符号链接的配置文件写到链接目标，保留链接本身
        let target = match std::fs::canonicalize(&self.path) {
            Ok(resolved) => resolved,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => self.path.clone(),
            Err(e) => return Err(CommitlyError::Io(e)),
        };

        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        // NamedTempFile 在 unix 上以 0600 创建
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(data.as_bytes())?;
        tmp.write_all(b"\n")?;
        tmp.as_file().sync_all()?;
        tmp.persist(&target).map_err(|e| CommitlyError::Io(e.error))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&target, std::fs::Permissions::from_mode(0o600))?;
        }

        tracing::debug!("Config saved to {}", self.path.display());
        Ok(())
    }

    /// Looks up one `section.field` value.
    pub fn get_value(&self, key: &str) -> Result<String> {
        let key: ConfigKey = key.parse()?;
        let config = self.load()?;
        Ok(config.get(key).to_string())
    }

    /// Sets one `section.field` value and saves the whole document.
    pub fn set_value(&self, key: &str, value: &str) -> Result<()> {
        let key: ConfigKey = key.parse()?;
        let mut config = self.load()?;
        config.set(key, value);
        self.save(&config)
    }
}

fn default_config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }

    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(CONFIG_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
}
