//! Configuration for the business card
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/bizcard/config.toml)
//! 3. Built-in defaults (lowest priority)
//!
//! The resulting [`Config`] is built once at startup and never mutated.

use serde::Deserialize;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod observability;
mod profile;
mod serialization;

#[cfg(test)]
mod tests;

// ─────────────────────────────────────────────────────────────────────────────
// Re-exports (maintain public API)
// ─────────────────────────────────────────────────────────────────────────────

pub use observability::{FileLogging, LogRotation, LoggingConfig};
pub use profile::{
    ContactConfig, FileContact, FileLinks, FileProfile, FileTiming, LinksConfig, ProfileConfig,
    TimingConfig,
};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default theme name (the card's signature palette)
pub const DEFAULT_THEME: &str = "Ember";

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Theme name: "Ember", "Midnight", "Paper", "Terminal"
    pub theme: String,

    /// Directory the photo and CV paths are resolved against
    pub assets_dir: PathBuf,

    /// Identity fields shown on the card
    pub profile: ProfileConfig,

    /// Contact email and form relay settings
    pub contact: ContactConfig,

    /// Outbound link targets
    pub links: LinksConfig,

    /// Feedback and auto-reset durations
    pub timing: TimingConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            assets_dir: PathBuf::from("./assets"),
            profile: ProfileConfig::default(),
            contact: ContactConfig::default(),
            links: LinksConfig::default(),
            timing: TimingConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub theme: Option<String>,
    pub assets_dir: Option<String>,

    /// Optional [profile] section
    pub profile: Option<FileProfile>,

    /// Optional [contact] section
    pub contact: Option<FileContact>,

    /// Optional [links] section
    pub links: Option<FileLinks>,

    /// Optional [timing] section
    pub timing: Option<FileTiming>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/bizcard/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("bizcard").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Silently fail - config is optional
            }
        }

        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load file config if it exists
    ///
    /// A config file that exists but can't be read or parsed ends the process
    /// with an actionable message instead of silently falling back to defaults.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match Self::parse_file(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                    eprintln!("║  CONFIG ERROR - Failed to parse configuration file          ║");
                    eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                    eprintln!("  File: {}\n", path.display());
                    eprintln!("  Error: {}\n", e);
                    eprintln!("  Tip: Check for:\n");
                    eprintln!("    - Missing quotes around string values");
                    eprintln!("    - Numbers written as strings (timeout_secs = 15)");
                    eprintln!("    - Typos in section names\n");
                    eprintln!("  To reset, run `bizcard config --reset`.\n");
                    std::process::exit(1);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(e) => {
                eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                eprintln!("║  CONFIG ERROR - Cannot read configuration file              ║");
                eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {}\n", e);
                std::process::exit(1);
            }
        }
    }

    /// Parse config file contents without applying defaults or env vars
    pub(crate) fn parse_file(contents: &str) -> Result<FileConfig, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Load configuration: env vars -> file -> defaults
    pub fn from_env() -> Self {
        Self::from_sources(Self::load_file_config(), |key| std::env::var(key).ok())
    }

    /// Merge a parsed config file with an environment lookup
    ///
    /// Split out from [`Config::from_env`] so precedence can be exercised
    /// without touching the process environment.
    pub(crate) fn from_sources(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let theme = env("BIZCARD_THEME")
            .or(file.theme)
            .unwrap_or_else(|| DEFAULT_THEME.to_string());

        let assets_dir = env("BIZCARD_ASSETS_DIR")
            .or(file.assets_dir)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./assets"));

        let mut contact = ContactConfig::from_file(file.contact);
        if let Some(email) = env("BIZCARD_EMAIL") {
            contact.email = email;
        }
        if let Some(relay_url) = env("BIZCARD_RELAY_URL") {
            contact.relay_url = relay_url;
        }

        Self {
            theme,
            assets_dir,
            profile: ProfileConfig::from_file(file.profile),
            contact,
            links: LinksConfig::from_file(file.links),
            timing: TimingConfig::from_file(file.timing),
            logging: LoggingConfig::from_file(file.logging),
        }
    }
}
