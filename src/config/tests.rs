//! Configuration tests
//!
//! Round-trip and precedence checks. When a field is added to `Config`,
//! the round-trip tests fail until `to_toml()` and the `File*` structs agree.

use super::*;
use std::collections::HashMap;
use std::path::PathBuf;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

fn parse(toml_str: &str) -> FileConfig {
    toml::from_str(toml_str).unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );

    let restored = Config::from_sources(parsed.unwrap(), |_| None);
    assert_eq!(restored.profile.footer, config.profile.footer);
    assert_eq!(restored.links.scholar, config.links.scholar);
    assert_eq!(restored.contact.relay_url, config.contact.relay_url);
    assert_eq!(restored.logging.file_rotation, LogRotation::Daily);
}

#[test]
fn test_config_roundtrip_escapes_quotes() {
    let mut config = Config::default();
    config.profile.bio = r#"Says "hi" \ waves"#.to_string();
    config.profile.title = "Line one\nLine two".to_string();

    let restored = Config::from_sources(parse(&config.to_toml()), |_| None);
    assert_eq!(restored.profile.bio, config.profile.bio);
    assert_eq!(restored.profile.title, config.profile.title);
}

#[test]
fn test_config_roundtrip_control_characters() {
    let mut config = Config::default();
    config.profile.footer = "tab\there \u{7} bell 'single'".to_string();
    config.assets_dir = PathBuf::from(r"C:\Users\naz\card");

    let restored = Config::from_sources(parse(&config.to_toml()), |_| None);
    assert_eq!(restored.profile.footer, config.profile.footer);
    assert_eq!(restored.assets_dir, config.assets_dir);
}

// ─────────────────────────────────────────────────────────────────────────────
// Precedence tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_file_uses_card_defaults() {
    let config = Config::from_sources(FileConfig::default(), |_| None);

    assert_eq!(config.theme, "Ember");
    assert_eq!(config.profile.name, "Naz Otken");
    assert_eq!(config.contact.email, "naz.otken@gmail.com");
    assert_eq!(config.contact.relay_url, "https://formspree.io/f/mqeklnnp");
    assert_eq!(config.links.cv_download_name, "Naz_Otken_CV.pdf");
    assert_eq!(config.timing.copy_feedback_ms, 2000);
    assert_eq!(config.timing.success_reset_ms, 5000);
}

#[test]
fn test_file_overrides_defaults_per_field() {
    let file = parse(
        r#"
theme = "Paper"

[profile]
name = "Ada Lovelace"

[timing]
success_reset_ms = 1000
"#,
    );
    let config = Config::from_sources(file, |_| None);

    assert_eq!(config.theme, "Paper");
    assert_eq!(config.profile.name, "Ada Lovelace");
    // Untouched fields in a present section keep their defaults
    assert_eq!(config.profile.title, "Associate Product Manager @ Google");
    assert_eq!(config.timing.success_reset_ms, 1000);
    assert_eq!(config.timing.copy_feedback_ms, 2000);
}

#[test]
fn test_env_overrides_file() {
    let file = parse(
        r#"
theme = "Paper"
assets_dir = "/srv/card"

[contact]
email = "file@example.com"
relay_url = "https://file.example.com/f"
"#,
    );
    let env = env_from(&[
        ("BIZCARD_THEME", "Midnight"),
        ("BIZCARD_EMAIL", "env@example.com"),
        ("BIZCARD_RELAY_URL", "http://127.0.0.1:9/f"),
    ]);
    let config = Config::from_sources(file, env);

    assert_eq!(config.theme, "Midnight");
    assert_eq!(config.contact.email, "env@example.com");
    assert_eq!(config.contact.relay_url, "http://127.0.0.1:9/f");
    // Not overridden by env
    assert_eq!(config.assets_dir, PathBuf::from("/srv/card"));
}

#[test]
fn test_unknown_rotation_falls_back_to_daily() {
    assert_eq!(LogRotation::parse("HOURLY"), LogRotation::Hourly);
    assert_eq!(LogRotation::parse("never"), LogRotation::Never);
    assert_eq!(LogRotation::parse("weekly"), LogRotation::Daily);
}

#[test]
fn test_initials() {
    let mut profile = ProfileConfig::default();
    assert_eq!(profile.initials(), "NO");

    profile.name = "ada king lovelace".to_string();
    assert_eq!(profile.initials(), "AK");

    profile.name = "   ".to_string();
    assert_eq!(profile.initials(), "");
}
