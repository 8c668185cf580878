use clap::{Parser, Subcommand, builder::styling};

const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::Green.on_default().bold())
    .usage(styling::AnsiColor::Green.on_default().bold())
    .literal(styling::AnsiColor::Cyan.on_default().bold())
    .placeholder(styling::AnsiColor::Cyan.on_default());

/// Without a subcommand, generates a commit message for the pending changes.
#[derive(Parser, Debug)]
#[command(name = "commitly")]
#[command(author, version, long_about = None)]
#[command(styles = STYLES)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Override the LLM provider (takes precedence over AI_PROVIDER)
    #[arg(short, long, global = true)]
    pub provider: Option<String>,

    /// Jira ticket id; skips the interactive prompt
    #[arg(short, long)]
    pub ticket: Option<String>,

    /// HTTP request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Disable coloured output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Set a configuration value, e.g. `openai.api_key sk-...`
    Set {
        /// Key in `section.field` form
        key: Option<String>,
        /// New value
        value: Option<String>,
    },

    /// Print a configuration value
    Get {
        /// Key in `section.field` form
        key: Option<String>,
    },

    /// Show the whole configuration with masked API keys
    Show,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_is_generate() {
        let cli = Cli::try_parse_from(["commitly", "-t", "PROJ-1", "-p", "claude"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.ticket.as_deref(), Some("PROJ-1"));
        assert_eq!(cli.provider.as_deref(), Some("claude"));
    }

    #[test]
    fn test_config_set_parses_key_and_value() {
        let cli =
            Cli::try_parse_from(["commitly", "config", "set", "openai.model", "gpt-4o-mini"])
                .unwrap();
        match cli.command {
            Some(Commands::Config {
                action: Some(ConfigAction::Set { key, value }),
            }) => {
                assert_eq!(key.as_deref(), Some("openai.model"));
                assert_eq!(value.as_deref(), Some("gpt-4o-mini"));
            }
            other => panic!("unexpected parse: {:?}", other),
        }
    }

    #[test]
    fn test_config_without_action() {
        let cli = Cli::try_parse_from(["commitly", "config"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config { action: None })
        ));
    }

    #[test]
    fn test_config_get_missing_key_still_parses() {
        let cli = Cli::try_parse_from(["commitly", "config", "get"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: Some(ConfigAction::Get { key: None })
            })
        ));
    }

    #[test]
    fn test_timeout_must_be_a_number() {
        assert!(Cli::try_parse_from(["commitly", "--timeout", "soon"]).is_err());
    }
}
