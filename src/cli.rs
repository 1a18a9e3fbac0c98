// CLI module - command-line argument parsing and handlers
//
// With no subcommand the card opens in the terminal. Subcommands:
// - copy: Copy the contact email to the clipboard
// - send: Send a contact message without opening the TUI
// - config --show / --path / --reset / --edit: Configuration management

use crate::card::clipboard::SystemClipboard;
use crate::card::form::{Field, FormStatus};
use crate::card::relay::{RelayClient, SubmitOutcome};
use crate::card::{CardView, SubmitError};
use crate::config::{Config, VERSION};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::process::{Command, ExitCode};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// bizcard - a digital business card for the terminal
#[derive(Parser)]
#[command(name = "bizcard")]
#[command(version = VERSION)]
#[command(about = "Digital business card with a contact form", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Copy the contact email to the clipboard
    Copy {
        /// Seconds to keep serving the copied text on X11/Wayland, unless
        /// something else is copied first (0 to exit at once)
        #[arg(long, default_value_t = 10)]
        hold_secs: u64,
    },

    /// Send a message through the contact form relay
    Send {
        /// Your name
        #[arg(long)]
        name: String,

        /// Your email address (replies go here)
        #[arg(long)]
        email: String,

        /// The message
        #[arg(long)]
        message: String,
    },

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Open config file in $EDITOR
        #[arg(long)]
        edit: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

/// Handle `config` subcommands. Returns true if one was handled (exit after).
///
/// These run before the config file is loaded, so a broken file can still
/// be inspected or reset.
pub fn handle_config_command(cli: &Cli) -> bool {
    let Some(Commands::Config {
        show,
        reset,
        edit,
        path,
    }) = &cli.command
    else {
        return false;
    };

    if *path {
        handle_config_path();
    } else if *show {
        handle_config_show();
    } else if *reset {
        handle_config_reset();
    } else if *edit {
        handle_config_edit();
    } else {
        // No flag provided, show help
        println!("Usage: bizcard config [--show|--reset|--edit|--path]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --reset   Reset config file to defaults");
        println!("  --edit    Open config file in $EDITOR");
        println!("  --path    Show config file path");
    }
    true
}

/// Run a headless card command
pub async fn run(command: Commands, config: Arc<Config>) -> Result<ExitCode> {
    match command {
        Commands::Copy { hold_secs } => {
            handle_copy(config, Duration::from_secs(hold_secs)).map(exit_code)
        }
        Commands::Send {
            name,
            email,
            message,
        } => handle_send(config, [name, email, message])
            .await
            .map(exit_code),
        // Handled by handle_config_command before config is loaded
        Commands::Config { .. } => Ok(ExitCode::SUCCESS),
    }
}

fn headless_card(
    config: Arc<Config>,
    clipboard: SystemClipboard,
) -> Result<(CardView, mpsc::Receiver<SubmitOutcome>)> {
    let relay = RelayClient::new(&config.contact).context("Failed to build relay client")?;
    Ok(CardView::new(config, Box::new(clipboard), relay))
}

fn exit_code(succeeded: bool) -> ExitCode {
    if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Returns Ok(true) once the email is on the clipboard
fn handle_copy(config: Arc<Config>, hold: Duration) -> Result<bool> {
    let email = config.contact.email.clone();
    let (mut card, _) = headless_card(config, SystemClipboard::holding(hold))
        .context("Could not set up the card")?;

    if card.copy_email(Instant::now()) {
        println!("Copied {} to clipboard", email);
        Ok(true)
    } else {
        // Details were logged at warn level
        eprintln!("Could not copy {} to clipboard", email);
        Ok(false)
    }
}

/// Returns Ok(true) once the relay accepted the message
async fn handle_send(config: Arc<Config>, values: [String; 3]) -> Result<bool> {
    let (mut card, mut outcome_rx) = headless_card(config, SystemClipboard::default())?;

    for (field, value) in Field::ALL.into_iter().zip(values) {
        *card.field_mut(field) = value;
    }

    match card.submit() {
        Ok(()) => {}
        Err(SubmitError::Invalid(violations)) => {
            for (field, error) in violations {
                eprintln!("--{}: {}", field.key(), error.message());
            }
            return Ok(false);
        }
        Err(SubmitError::Rejected(reason)) => {
            eprintln!("Error: {}", reason);
            return Ok(false);
        }
    }

    let outcome = outcome_rx
        .recv()
        .await
        .context("Relay task ended without reporting")?;
    card.on_submit_outcome(outcome, Instant::now());

    if card.form_status() == FormStatus::Success {
        println!("Thank you! Your message has been sent successfully.");
        Ok(true)
    } else {
        eprintln!("Something went wrong. Please try again.");
        Ok(false)
    }
}

fn handle_config_path() {
    match Config::config_path() {
        Some(path) => println!("{}", path.display()),
        None => {
            eprintln!("Error: Could not determine config path");
            std::process::exit(1);
        }
    }
}

fn handle_config_show() {
    let path = Config::config_path();
    let contents = match path.as_deref().map(std::fs::read_to_string) {
        Some(Ok(contents)) => Some(contents),
        Some(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => None,
        Some(Err(e)) => {
            eprintln!("Error reading config: {}", e);
            std::process::exit(1);
        }
        None => None,
    };

    match render_config_show(contents.as_deref(), |key| std::env::var(key).ok()) {
        Ok(text) => print!("{}", text),
        Err(text) => {
            print!("{}", text);
            std::process::exit(1);
        }
    }

    println!();
    match path {
        Some(path) if contents.is_some() => println!("# Source: {}", path.display()),
        _ => println!("# Source: defaults (no config file)"),
    }
}

/// Text for `config --show`. A file that doesn't parse is echoed back with
/// the parse error instead of the effective configuration.
fn render_config_show(
    contents: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> std::result::Result<String, String> {
    let file = match contents.map(Config::parse_file).transpose() {
        Ok(file) => file.unwrap_or_default(),
        Err(e) => {
            return Err(format!(
                "# Config file does not parse; effective configuration unavailable\n\
                 #\n\
                 # Error: {}\n\
                 # Fix it with `bizcard config --edit` or start over with `--reset`.\n\n\
                 {}",
                e.to_string().trim_end().replace('\n', "\n#        "),
                contents.unwrap_or_default()
            ));
        }
    };

    Ok(format!(
        "# Effective configuration (env > file > defaults)\n\n{}",
        Config::from_sources(file, env).to_toml()
    ))
}

fn handle_config_reset() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    // Confirm if file exists
    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        let _ = std::io::stderr().flush();

        let mut input = String::new();
        if std::io::stdin().read_line(&mut input).is_err()
            || !input.trim().eq_ignore_ascii_case("y")
        {
            println!("Aborted.");
            return;
        }
    }

    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            std::process::exit(1);
        }
    }

    if let Err(e) = std::fs::write(&path, Config::default().to_toml()) {
        eprintln!("Error writing config: {}", e);
        std::process::exit(1);
    }

    println!("Config reset to defaults: {}", path.display());
}

fn handle_config_edit() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    if !path.exists() {
        Config::ensure_config_exists();
        println!("Created new config file: {}", path.display());
    }

    let editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(windows) {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        });

    println!("Opening {} with {}", path.display(), editor);

    match Command::new(&editor).arg(&path).status() {
        Ok(s) if s.success() => {}
        Ok(s) => {
            eprintln!("Editor exited with status: {}", s);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Failed to launch editor '{}': {}", editor, e);
            eprintln!("Set $EDITOR environment variable to your preferred editor");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::relay;

    fn config_for(url: &str) -> Arc<Config> {
        let mut config = Config::default();
        config.contact.relay_url = url.to_string();
        Arc::new(config)
    }

    fn values(name: &str, email: &str, message: &str) -> [String; 3] {
        [name.to_string(), email.to_string(), message.to_string()]
    }

    #[test]
    fn test_parse_send_flags() {
        let cli = Cli::try_parse_from([
            "bizcard", "send", "--name", "Ada", "--email", "ada@example.com", "--message", "Hi",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Send { ref name, ref email, ref message })
                if name == "Ada" && email == "ada@example.com" && message == "Hi"
        ));
        assert!(!handle_config_command(&cli));
    }

    #[test]
    fn test_copy_holds_by_default() {
        let cli = Cli::try_parse_from(["bizcard", "copy"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Copy { hold_secs: 10 })));

        let cli = Cli::try_parse_from(["bizcard", "copy", "--hold-secs", "0"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Copy { hold_secs: 0 })));
    }

    #[test]
    fn test_no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["bizcard"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_config_show_echoes_unparseable_file() {
        let broken = "theme = Ember\n[contact]\ntimeout_secs = \"soon\"\n";
        let text = render_config_show(Some(broken), |_| None).unwrap_err();

        assert!(text.contains("Error:"));
        assert!(text.ends_with(broken));
    }

    #[test]
    fn test_config_show_applies_file_and_env() {
        let text = render_config_show(Some("theme = \"Paper\"\n"), |key| {
            (key == "BIZCARD_EMAIL").then(|| "me@example.com".to_string())
        })
        .unwrap();

        assert!(text.contains("theme = \"Paper\""));
        assert!(text.contains("email = \"me@example.com\""));

        let defaults = render_config_show(None, |_| None).unwrap();
        assert!(defaults.contains("theme = \"Ember\""));
    }

    #[test]
    fn test_copy_reports_setup_failure() {
        let mut config = Config::default();
        config.contact.relay_url = "not a url".to_string();
        let err = handle_copy(Arc::new(config), Duration::ZERO).unwrap_err();
        assert!(format!("{:#}", err).contains("Could not set up the card"));
    }

    #[tokio::test]
    async fn test_send_succeeds_against_accepting_relay() {
        let (url, received) = relay::tests::spawn_relay(200).await;
        let sent = handle_send(config_for(&url), values("Ada", "ada@example.com", "Hi"))
            .await
            .unwrap();

        assert!(sent);
        assert_eq!(received.lock().unwrap()[0].fields["name"], "Ada");
    }

    #[tokio::test]
    async fn test_send_fails_on_relay_error() {
        let (url, _) = relay::tests::spawn_relay(422).await;
        let sent = handle_send(config_for(&url), values("Ada", "ada@example.com", "Hi"))
            .await
            .unwrap();
        assert!(!sent);
    }

    #[tokio::test]
    async fn test_send_rejects_invalid_email_without_posting() {
        let (url, received) = relay::tests::spawn_relay(200).await;
        let sent = handle_send(config_for(&url), values("Ada", "ada@", "Hi"))
            .await
            .unwrap();

        assert!(!sent);
        assert!(received.lock().unwrap().is_empty());
    }
}
