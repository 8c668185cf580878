use std::fmt::Write;

use crate::cli::ConfigAction;
use crate::config::{BackendKind, Config, ConfigStore, NetworkConfig};
use crate::error::{CommitlyError, Result};
use crate::llm::provider::utils::mask_api_key;
use crate::ui;

pub const CONFIG_USAGE: &str = "Usage: commitly config <command>\nAvailable commands: set, get, show";

pub const SET_USAGE: &str = "Usage: commitly config set <key> <value>\n\
Example: commitly config set openai.api_key sk-xxxxxxx\n\
Example: commitly config set openai.provider claude\n\
Example: commitly config set openai.model gpt-4-turbo";

pub const GET_USAGE: &str =
    "Usage: commitly config get <key>\nExample: commitly config get openai.api_key";

/// Runs a `commitly config` action against `store`.
///
/// No action prints the usage text. Missing `set`/`get` arguments fail with
/// [`CommitlyError::Usage`].
pub fn run(action: Option<ConfigAction>, store: &ConfigStore, colored: bool) -> Result<()> {
    match action {
        None => {
            println!("{}", CONFIG_USAGE);
            Ok(())
        }
        Some(ConfigAction::Set {
            key: Some(key),
            value: Some(value),
        }) => {
            store.set_value(&key, &value)?;
            ui::success(&format!("Config {} set successfully", key), colored);
            Ok(())
        }
        Some(ConfigAction::Set { .. }) => Err(CommitlyError::Usage(SET_USAGE.to_string())),
        Some(ConfigAction::Get { key: Some(key) }) => {
            let value = store.get_value(&key)?;
            println!("{} = {}", key, value);
            Ok(())
        }
        Some(ConfigAction::Get { key: None }) => Err(CommitlyError::Usage(GET_USAGE.to_string())),
        Some(ConfigAction::Show) => {
            let config = store.load()?;
            print!("{}", format_config(&config, colored));
            println!();
            println!(
                "{}",
                ui::info(&format!("Config file: {}", store.path().display()), colored)
            );
            Ok(())
        }
    }
}

/// Renders the configuration for `config show`, with API keys masked.
pub fn format_config(config: &Config, colored: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", ui::heading("Current configuration:", colored));
    let _ = writeln!(out, "---------------------");
    let _ = writeln!(out, "Default Provider: {}", config.default_provider);

    for kind in BackendKind::ALL {
        let section = config.section(kind);
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{}",
            ui::heading(&format!("{} Configuration:", kind.label()), colored)
        );
        let _ = writeln!(out, "  Provider: {}", section.provider);
        let _ = writeln!(out, "  Model: {}", section.model);
        let _ = writeln!(out, "  API Key: {}", mask_api_key(&section.api_key));
        if let Some(endpoint) = &section.endpoint {
            let _ = writeln!(out, "  Endpoint: {}", endpoint);
        }
    }

    if config.network != NetworkConfig::default() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", ui::heading("Network:", colored));
        let _ = writeln!(out, "  Request timeout: {}s", config.network.request_timeout);
        let _ = writeln!(out, "  Connect timeout: {}s", config.network.connect_timeout);
    }

    out
}
