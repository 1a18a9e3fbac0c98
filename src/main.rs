// bizcard - Digital business card for the terminal
//
// Shows a profile card with outbound links, a copy-email button and a
// contact form that posts to a third-party form relay.
//
// Architecture:
// - Card: UI-agnostic state (copy feedback, form status machine, relay post)
// - TUI (ratatui): Renders the card and drives it from keyboard input
// - CLI (clap): Headless `copy` / `send` and config management
// - Logging (tracing): Captured for the logs panel, optionally to JSON files

mod card;
mod cli;
mod config;
mod logging;
mod tui;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use config::Config;
use logging::{LogBuffer, LogSink};
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Config commands (--show, --reset, --edit, --path) exit early
    if cli::handle_config_command(&cli) {
        return Ok(ExitCode::SUCCESS);
    }

    // Ensure config file exists (creates default on first run)
    Config::ensure_config_exists();
    let config = Arc::new(Config::from_env());

    // The TUI owns the terminal, so its logs go to the in-memory buffer
    let log_buffer = LogBuffer::new();
    let sink = if cli.command.is_none() {
        LogSink::Tui
    } else {
        LogSink::Stderr
    };
    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = logging::init(&config.logging, sink, &log_buffer);

    tracing::info!(
        "bizcard v{} starting (theme: {}, relay: {})",
        config::VERSION,
        config.theme,
        config.contact.relay_url
    );

    match cli.command {
        None => {
            tui::run_tui(config, log_buffer).await?;
            Ok(ExitCode::SUCCESS)
        }
        Some(command) => cli::run(command, config).await,
    }
}
