// Re-export all library modules
use commitly::*;

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use tokio::runtime::Runtime;

fn main() -> Result<()> {
    human_panic::setup_panic!();

    let cli = Cli::parse();

    // 根据 verbose 标志设置日志级别
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    // 初始化 tracing 日志（输出到 stderr，stdout 只留给命令结果）
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(log_level.into()),
        )
        .with_writer(ui::LogWriter::default)
        .init();

    let colored = !cli.no_color && std::io::stdout().is_terminal();
    if !colored {
        colored::control::set_override(false);
    }

    let store = config::ConfigStore::at_default_location();
    tracing::debug!("Using config file: {}", store.path().display());

    // 创建 tokio 运行时
    let rt = Runtime::new()?;

    let Cli {
        command,
        ticket,
        provider,
        timeout,
        ..
    } = cli;

    let result = rt.block_on(async {
        match command {
            None => {
                let options = commands::GenerateOptions {
                    ticket: ticket.as_deref(),
                    provider_override: provider.as_deref(),
                    timeout,
                    colored,
                };
                commands::generate::run(&options, &store).await
            }
            Some(Commands::Config { action }) => commands::config::run(action, &store, colored),
        }
    });

    if let Err(e) = result {
        match e {
            error::CommitlyError::Usage(usage) => {
                println!("{}", usage);
            }
            _ => {
                ui::error(&e.to_string(), colored);
                if let Some(suggestion) = e.suggestion() {
                    eprintln!();
                    eprintln!("{}", ui::info(suggestion, colored));
                }
            }
        }
        std::process::exit(1);
    }

    Ok(())
}
