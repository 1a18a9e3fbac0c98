//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

/// Render a string as a TOML value
fn quote(value: &str) -> String {
    toml::Value::String(value.to_string()).to_string()
}

impl Config {
    /// Serialize the full configuration as a commented TOML document
    pub fn to_toml(&self) -> String {
        format!(
            r#"# bizcard configuration
#
# Environment variables override this file:
#   BIZCARD_THEME, BIZCARD_EMAIL, BIZCARD_RELAY_URL, BIZCARD_ASSETS_DIR

# Theme: Ember, Midnight, Paper, Terminal (press 't' in the card to cycle)
theme = {theme}

# Directory the photo and CV paths below are resolved against
assets_dir = {assets_dir}

[profile]
name = {name}
title = {title}
bio = {bio}
photo = {photo}
footer = {footer}

[contact]
email = {email}
# Contact form submissions are posted here as multipart form data
relay_url = {relay_url}
timeout_secs = {timeout_secs}

[links]
linkedin = {linkedin}
github = {github}
scholar = {scholar}
cv = {cv}
cv_download_name = {cv_download_name}

[timing]
copy_feedback_ms = {copy_feedback_ms}
success_reset_ms = {success_reset_ms}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = {log_level}
# File logging (in addition to the logs panel or stderr)
file_enabled = {log_file_enabled}
file_dir = {log_file_dir}
file_rotation = {log_file_rotation}  # hourly, daily, never
file_prefix = {log_file_prefix}
"#,
            theme = quote(&self.theme),
            assets_dir = quote(&self.assets_dir.display().to_string()),
            name = quote(&self.profile.name),
            title = quote(&self.profile.title),
            bio = quote(&self.profile.bio),
            photo = quote(&self.profile.photo),
            footer = quote(&self.profile.footer),
            email = quote(&self.contact.email),
            relay_url = quote(&self.contact.relay_url),
            timeout_secs = self.contact.timeout_secs,
            linkedin = quote(&self.links.linkedin),
            github = quote(&self.links.github),
            scholar = quote(&self.links.scholar),
            cv = quote(&self.links.cv),
            cv_download_name = quote(&self.links.cv_download_name),
            copy_feedback_ms = self.timing.copy_feedback_ms,
            success_reset_ms = self.timing.success_reset_ms,
            log_level = quote(&self.logging.level),
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = quote(&self.logging.file_dir.display().to_string()),
            log_file_rotation = quote(self.logging.file_rotation.as_str()),
            log_file_prefix = quote(&self.logging.file_prefix),
        )
    }
}
