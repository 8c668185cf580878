use crate::config::{Config, ConfigStore};
use crate::constants::git::HISTORY_DEPTH;
use crate::error::Result;
use crate::git::{DiffSource, GitCli};
use crate::llm::prompt::build_commit_prompt;
use crate::llm::provider::{Dispatcher, requested_provider, resolve_effective};
use crate::ui;

/// Options for the generate flow, built from CLI arguments.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions<'a> {
    /// Ticket id; prompts interactively when `None`
    pub ticket: Option<&'a str>,
    /// `--provider` override
    pub provider_override: Option<&'a str>,
    /// `--timeout` override for `network.request_timeout`
    pub timeout: Option<u64>,
    pub colored: bool,
}

/// Generates a commit message for the pending changes and prints it.
pub async fn run(options: &GenerateOptions<'_>, store: &ConfigStore) -> Result<()> {
    let mut config = store.load()?;
    if let Some(timeout) = options.timeout {
        config.network.request_timeout = timeout;
    }

    let ticket = match options.ticket {
        Some(ticket) => ticket.trim().to_string(),
        None => ui::prompt_ticket()?,
    };

    let git = GitCli::new();
    let dispatcher = Dispatcher::new(&config.network)?;

    let spinner = ui::Spinner::new("Generating commit message...");
    let result = generate_message(
        &ticket,
        &git,
        &config,
        &dispatcher,
        options.provider_override,
    )
    .await;
    spinner.finish_and_clear();
    let message = result?;

    println!("\nGenerated commit message:");
    if options.colored {
        use colored::Colorize;
        println!("{}", message.yellow());
    } else {
        println!("{}", message);
    }

    Ok(())
}

/// Collects git text, builds the prompt and dispatches it.
///
/// Git failures abort before any provider is contacted.
pub async fn generate_message(
    ticket: &str,
    git: &dyn DiffSource,
    config: &Config,
    dispatcher: &Dispatcher,
    provider_override: Option<&str>,
) -> Result<String> {
    let diff = git.diff()?;
    let history = git.history(HISTORY_DEPTH)?;
    tracing::debug!(
        "Collected diff ({} bytes) and history ({} lines)",
        diff.len(),
        history.lines().count()
    );

    let prompt = build_commit_prompt(ticket, &diff, &history);

    let logical = requested_provider(provider_override, config);
    let effective = resolve_effective(&logical, config);
    tracing::debug!(
        "Requested provider '{}' resolved to backend '{}' (model: '{}')",
        logical,
        effective.backend,
        effective.model
    );

    dispatcher.generate(&prompt, &effective, config).await
}
