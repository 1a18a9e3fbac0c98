//! Card content configuration: identity, contact, links, timing
//!
//! Defaults reproduce the published card. Every section follows the same
//! shape: a resolved struct, its `Default`, a `File*` mirror with optional
//! fields, and a `from_file()` merge.

use serde::Deserialize;
use std::time::Duration;

// ─────────────────────────────────────────────────────────────────────────────
// Profile
// ─────────────────────────────────────────────────────────────────────────────

/// Identity fields rendered on the card
#[derive(Debug, Clone)]
pub struct ProfileConfig {
    pub name: String,
    pub title: String,
    pub bio: String,
    /// Photo path, relative to `assets_dir`
    pub photo: String,
    /// Line rendered under the card
    pub footer: String,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            name: "Naz Otken".to_string(),
            title: "Associate Product Manager @ Google".to_string(),
            bio: "I keep things moving (the right way)".to_string(),
            photo: "img_nanobanana.jpg".to_string(),
            footer: "© 2025 Naz Otken • Digital Business Card".to_string(),
        }
    }
}

impl ProfileConfig {
    /// Initials for the monogram avatar ("Naz Otken" -> "NO")
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect()
    }
}

/// Profile section as loaded from file
#[derive(Debug, Deserialize, Default)]
pub struct FileProfile {
    pub name: Option<String>,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub photo: Option<String>,
    pub footer: Option<String>,
}

impl ProfileConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileProfile>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            name: file.name.unwrap_or(defaults.name),
            title: file.title.unwrap_or(defaults.title),
            bio: file.bio.unwrap_or(defaults.bio),
            photo: file.photo.unwrap_or(defaults.photo),
            footer: file.footer.unwrap_or(defaults.footer),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Contact
// ─────────────────────────────────────────────────────────────────────────────

/// Contact email and the form relay endpoint
#[derive(Debug, Clone)]
pub struct ContactConfig {
    /// Address written to the clipboard by the copy action
    pub email: String,
    /// Form relay endpoint that receives contact form posts
    pub relay_url: String,
    /// Request timeout for the relay post
    pub timeout_secs: u64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            email: "naz.otken@gmail.com".to_string(),
            relay_url: "https://formspree.io/f/mqeklnnp".to_string(),
            timeout_secs: 15,
        }
    }
}

/// Contact section as loaded from file
#[derive(Debug, Deserialize, Default)]
pub struct FileContact {
    pub email: Option<String>,
    pub relay_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl ContactConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileContact>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            email: file.email.unwrap_or(defaults.email),
            relay_url: file.relay_url.unwrap_or(defaults.relay_url),
            timeout_secs: file.timeout_secs.unwrap_or(defaults.timeout_secs),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Links
// ─────────────────────────────────────────────────────────────────────────────

/// Outbound link targets
#[derive(Debug, Clone)]
pub struct LinksConfig {
    pub linkedin: String,
    pub github: String,
    pub scholar: String,
    /// CV path, relative to `assets_dir`
    pub cv: String,
    /// File name the CV is saved under when downloaded
    pub cv_download_name: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            linkedin: "https://uk.linkedin.com/in/celennazotken".to_string(),
            github: "https://github.com/celennazotken".to_string(),
            scholar: "https://scholar.google.com/citations?user=wF8vsPgAAAAJ&hl=tr".to_string(),
            cv: "CNO_CV_Dec2025.pdf".to_string(),
            cv_download_name: "Naz_Otken_CV.pdf".to_string(),
        }
    }
}

/// Links section as loaded from file
#[derive(Debug, Deserialize, Default)]
pub struct FileLinks {
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub scholar: Option<String>,
    pub cv: Option<String>,
    pub cv_download_name: Option<String>,
}

impl LinksConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileLinks>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            linkedin: file.linkedin.unwrap_or(defaults.linkedin),
            github: file.github.unwrap_or(defaults.github),
            scholar: file.scholar.unwrap_or(defaults.scholar),
            cv: file.cv.unwrap_or(defaults.cv),
            cv_download_name: file.cv_download_name.unwrap_or(defaults.cv_download_name),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Timing
// ─────────────────────────────────────────────────────────────────────────────

/// Durations for the two auto-reverting states
#[derive(Debug, Clone)]
pub struct TimingConfig {
    /// How long the "copied" check mark stays up
    pub copy_feedback_ms: u64,
    /// How long the success panel stays up before the form returns
    pub success_reset_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            copy_feedback_ms: 2000,
            success_reset_ms: 5000,
        }
    }
}

impl TimingConfig {
    pub fn copy_feedback(&self) -> Duration {
        Duration::from_millis(self.copy_feedback_ms)
    }

    pub fn success_reset(&self) -> Duration {
        Duration::from_millis(self.success_reset_ms)
    }
}

/// Timing section as loaded from file
#[derive(Debug, Deserialize, Default)]
pub struct FileTiming {
    pub copy_feedback_ms: Option<u64>,
    pub success_reset_ms: Option<u64>,
}

impl TimingConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileTiming>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            copy_feedback_ms: file.copy_feedback_ms.unwrap_or(defaults.copy_feedback_ms),
            success_reset_ms: file.success_reset_ms.unwrap_or(defaults.success_reset_ms),
        }
    }
}
